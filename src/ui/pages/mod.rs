//! The five screens of the app. Each page owns its view state and edits the
//! shared [`Session`] in response to keys.

mod cart;
mod home;
mod menu;
mod profile;
mod tracking;

pub use cart::CartPage;
pub use home::HomePage;
pub use menu::MenuPage;
pub use profile::ProfilePage;
pub use tracking::TrackingPage;

use crossterm::event::KeyCode;
use ratatui::{layout::Rect, Frame};
use std::time::Instant;

use crate::session::Session;
use crate::ui::keybindings::ShortcutContext;
use crate::ui::widgets::Toast;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Menu(String),
    Cart,
    Tracking(String),
    Profile,
}

impl Route {
    /// Position in the tab bar
    pub fn tab_index(&self) -> usize {
        match self {
            Route::Home => 0,
            Route::Menu(_) => 1,
            Route::Cart => 2,
            Route::Tracking(_) => 3,
            Route::Profile => 4,
        }
    }
}

/// What a page asks the shell to do after handling a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    Navigate(Route),
    Notify(Toast),
}

pub trait Page {
    fn title(&self, session: &Session) -> String;

    fn context(&self) -> ShortcutContext;

    /// True while a text field is being edited, so global keys go to the page
    fn captures_input(&self) -> bool {
        false
    }

    fn handle_key(&mut self, key: KeyCode, session: &mut Session, now: Instant)
        -> Vec<PageAction>;

    /// Called every loop iteration for timers
    fn tick(&mut self, _session: &mut Session, _now: Instant) -> Vec<PageAction> {
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, session: &Session);
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::{backend::TestBackend, Terminal};

    use super::Page;
    use crate::config::Config;
    use crate::session::Session;

    pub fn session() -> Session {
        Session::new(Config::default()).unwrap()
    }

    /// Render a page into a test terminal and return its rows as text
    pub fn draw(page: &mut dyn Page, session: &Session, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| page.render(f, f.area(), session))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    pub fn contains(rows: &[String], needle: &str) -> bool {
        rows.iter().any(|r| r.contains(needle))
    }
}
