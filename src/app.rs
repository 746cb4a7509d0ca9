use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::data::SAMPLE_ORDER_ID;
use crate::session::Session;
use crate::ui::dialogs::HelpDialog;
use crate::ui::keybindings::footer_hint;
use crate::ui::pages::{
    CartPage, HomePage, MenuPage, Page, PageAction, ProfilePage, Route, TrackingPage,
};
use crate::ui::panels::{HeaderBar, StatusBar, TabBar, TAB_TITLES};
use crate::ui::terminal_guard::{install_panic_hook, TerminalGuard};
use crate::ui::widgets::ToastQueue;

const DEFAULT_RESTAURANT_ID: &str = "1";

pub struct App {
    pub session: Session,
    route: Route,
    home: HomePage,
    menu: MenuPage,
    cart: CartPage,
    tracking: TrackingPage,
    profile: ProfilePage,
    toasts: ToastQueue,
    help_dialog: HelpDialog,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let session = Session::new(config)?;
        let now = Instant::now();
        Ok(Self {
            home: HomePage::new(&session, now),
            menu: MenuPage::new(DEFAULT_RESTAURANT_ID),
            cart: CartPage::new(&session),
            tracking: TrackingPage::new(&session, SAMPLE_ORDER_ID, now),
            profile: ProfilePage::new(&session),
            toasts: ToastQueue::new(session.config.ui.toast_secs),
            help_dialog: HelpDialog::new(),
            route: Route::Home,
            should_quit: false,
            session,
        })
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn page(&self) -> &dyn Page {
        match self.route {
            Route::Home => &self.home,
            Route::Menu(_) => &self.menu,
            Route::Cart => &self.cart,
            Route::Tracking(_) => &self.tracking,
            Route::Profile => &self.profile,
        }
    }

    /// Route for a tab, reusing the last restaurant / order viewed
    fn route_for_tab(&self, index: usize) -> Route {
        match index {
            1 => Route::Menu(self.menu.restaurant_id().to_string()),
            2 => Route::Cart,
            3 => Route::Tracking(self.tracking.order_id().to_string()),
            4 => Route::Profile,
            _ => Route::Home,
        }
    }

    pub fn navigate(&mut self, route: Route, now: Instant) {
        tracing::info!(?route, "Navigate");
        match &route {
            Route::Menu(id) => self.menu.open(id),
            Route::Cart => self.cart = CartPage::new(&self.session),
            Route::Tracking(id) => self.tracking.open(&self.session, id, now),
            Route::Home | Route::Profile => {}
        }
        self.route = route;
    }

    fn apply(&mut self, actions: Vec<PageAction>, now: Instant) {
        for action in actions {
            match action {
                PageAction::Navigate(route) => self.navigate(route, now),
                PageAction::Notify(toast) => self.toasts.push(toast, now),
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyCode, now: Instant) {
        if self.help_dialog.visible {
            self.help_dialog.visible = false;
            return;
        }

        if !self.page().captures_input() {
            let tab = self.route.tab_index();
            match key {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('?') => {
                    self.help_dialog.toggle();
                    return;
                }
                KeyCode::Char(c @ '1'..='5') => {
                    let index = c as usize - '1' as usize;
                    let route = self.route_for_tab(index);
                    self.navigate(route, now);
                    return;
                }
                KeyCode::Tab => {
                    let route = self.route_for_tab((tab + 1) % TAB_TITLES.len());
                    self.navigate(route, now);
                    return;
                }
                KeyCode::BackTab => {
                    let route =
                        self.route_for_tab((tab + TAB_TITLES.len() - 1) % TAB_TITLES.len());
                    self.navigate(route, now);
                    return;
                }
                _ => {}
            }
        }

        let actions = match self.route {
            Route::Home => self.home.handle_key(key, &mut self.session, now),
            Route::Menu(_) => self.menu.handle_key(key, &mut self.session, now),
            Route::Cart => self.cart.handle_key(key, &mut self.session, now),
            Route::Tracking(_) => self.tracking.handle_key(key, &mut self.session, now),
            Route::Profile => self.profile.handle_key(key, &mut self.session, now),
        };
        self.apply(actions, now);
    }

    pub fn tick(&mut self, now: Instant) {
        let actions = match self.route {
            Route::Home => self.home.tick(&mut self.session, now),
            Route::Menu(_) => self.menu.tick(&mut self.session, now),
            Route::Cart => self.cart.tick(&mut self.session, now),
            Route::Tracking(_) => self.tracking.tick(&mut self.session, now),
            Route::Profile => self.profile.tick(&mut self.session, now),
        };
        self.apply(actions, now);
        self.toasts.expire(now);
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Length(2), // Tabs
                Constraint::Min(10),   // Page
                Constraint::Length(2), // Status bar
            ])
            .split(frame.area());

        let title = self.page().title(&self.session);
        HeaderBar {
            page_title: &title,
            cart_count: self.session.cart.item_count(),
        }
        .render(frame, chunks[0]);
        TabBar {
            selected: self.route.tab_index(),
        }
        .render(frame, chunks[1]);

        let context = self.page().context();
        match self.route {
            Route::Home => self.home.render(frame, chunks[2], &self.session),
            Route::Menu(_) => self.menu.render(frame, chunks[2], &self.session),
            Route::Cart => self.cart.render(frame, chunks[2], &self.session),
            Route::Tracking(_) => self.tracking.render(frame, chunks[2], &self.session),
            Route::Profile => self.profile.render(frame, chunks[2], &self.session),
        }

        let hint = footer_hint(context);
        StatusBar { hint: &hint }.render(frame, chunks[3]);

        self.toasts.render(frame);
        self.help_dialog.render(frame, context);
    }

    pub fn run(&mut self) -> Result<()> {
        install_panic_hook();
        let _guard = TerminalGuard::new()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let tick_rate = Duration::from_millis(self.session.config.ui.refresh_rate_ms);
        tracing::info!(tick_ms = self.session.config.ui.refresh_rate_ms, "TUI started");

        while !self.should_quit {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, Instant::now());
                    }
                }
            }

            self.tick(Instant::now());
        }

        tracing::info!("TUI exited");
        Ok(())
    }
}
