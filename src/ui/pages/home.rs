use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::time::Instant;

use super::{Page, PageAction, Route};
use crate::data::CUISINE_CATEGORIES;
use crate::search::filter_restaurants;
use crate::session::Session;
use crate::types::Restaurant;
use crate::ui::form_field::TextInput;
use crate::ui::keybindings::ShortcutContext;
use crate::ui::panels::{border_style, clamp_selection, select_next, select_prev};
use crate::ui::widgets::CarouselState;

pub const NO_RESULTS_MESSAGE: &str = "No restaurants found matching your criteria.";

pub struct HomePage {
    pub carousel: CarouselState,
    search: TextInput,
    editing: bool,
    cuisine: usize,
    state: ListState,
}

impl HomePage {
    pub fn new(session: &Session, now: Instant) -> Self {
        Self {
            carousel: CarouselState::new(
                session.slides.clone(),
                session.config.ui.carousel_delay_ms,
                now,
            ),
            search: TextInput::new("Search for restaurants..."),
            editing: false,
            cuisine: 0,
            state: ListState::default().with_selected(Some(0)),
        }
    }

    pub fn cuisine(&self) -> &'static str {
        CUISINE_CATEGORIES[self.cuisine]
    }

    pub fn search_term(&self) -> &str {
        self.search.value()
    }

    pub fn visible<'a>(&self, session: &'a Session) -> Vec<&'a Restaurant> {
        filter_restaurants(&session.restaurants, self.search.value(), self.cuisine())
    }

    pub fn selected<'a>(&self, session: &'a Session) -> Option<&'a Restaurant> {
        let visible = self.visible(session);
        self.state.selected().and_then(|i| visible.get(i).copied())
    }

    fn refilter(&mut self, session: &Session) {
        let len = self.visible(session).len();
        self.state.select(clamp_selection(self.state.selected(), len));
    }

    fn card(restaurant: &Restaurant) -> ListItem<'static> {
        let mut details = vec![Span::styled(
            format!(
                "   {} · {} · {}",
                restaurant.cuisine, restaurant.delivery_time, restaurant.price_range
            ),
            Style::default().fg(Color::Gray),
        )];
        for tag in restaurant.card_tags() {
            details.push(Span::styled(
                format!(" [{}]", tag),
                Style::default().fg(Color::Magenta),
            ));
        }

        ListItem::new(vec![
            Line::from(vec![
                Span::styled(
                    restaurant.name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  ★ {:.1}", restaurant.rating),
                    Style::default().fg(Color::Yellow),
                ),
            ]),
            Line::from(details),
        ])
    }

    fn cuisine_line(&self) -> Line<'static> {
        let mut spans = vec![Span::styled("Cuisine: ", Style::default().fg(Color::Gray))];
        for (i, category) in CUISINE_CATEGORIES.iter().enumerate() {
            let style = if i == self.cuisine {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(format!(" {} ", category), style));
            spans.push(Span::raw(" "));
        }
        Line::from(spans)
    }
}

impl Page for HomePage {
    fn title(&self, _session: &Session) -> String {
        "Restaurants".to_string()
    }

    fn context(&self) -> ShortcutContext {
        if self.editing {
            ShortcutContext::Editing
        } else {
            ShortcutContext::Home
        }
    }

    fn captures_input(&self) -> bool {
        self.editing
    }

    fn handle_key(&mut self, key: KeyCode, session: &mut Session, now: Instant) -> Vec<PageAction> {
        if self.editing {
            match key {
                KeyCode::Enter | KeyCode::Esc => self.editing = false,
                other => {
                    if self.search.handle_key(other) {
                        self.refilter(session);
                    }
                }
            }
            return Vec::new();
        }

        let len = self.visible(session).len();
        match key {
            KeyCode::Char('/') => self.editing = true,
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.select(select_next(self.state.selected(), len));
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.select(select_prev(self.state.selected(), len));
            }
            KeyCode::Char('l') | KeyCode::Right => {
                self.cuisine = (self.cuisine + 1) % CUISINE_CATEGORIES.len();
                self.refilter(session);
            }
            KeyCode::Char('h') | KeyCode::Left => {
                self.cuisine = self
                    .cuisine
                    .checked_sub(1)
                    .unwrap_or(CUISINE_CATEGORIES.len() - 1);
                self.refilter(session);
            }
            KeyCode::Char(']') => self.carousel.next(now),
            KeyCode::Char('[') => self.carousel.prev(now),
            KeyCode::Enter => {
                if let Some(restaurant) = self.selected(session) {
                    return vec![PageAction::Navigate(Route::Menu(restaurant.id.clone()))];
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn tick(&mut self, _session: &mut Session, now: Instant) -> Vec<PageAction> {
        self.carousel.tick(now);
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, session: &Session) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Carousel
                Constraint::Length(3), // Search
                Constraint::Length(1), // Cuisine filter
                Constraint::Min(4),    // Restaurants
            ])
            .split(area);

        self.carousel.render(frame, chunks[0]);
        self.search
            .render(frame, chunks[1], "Search", !self.editing, self.editing);
        frame.render_widget(Paragraph::new(self.cuisine_line()), chunks[2]);

        let visible = self.visible(session);
        let block = Block::default()
            .title(format!(" Restaurants ({}) ", visible.len()))
            .borders(Borders::ALL)
            .border_style(border_style(!self.editing));

        if visible.is_empty() {
            let para = Paragraph::new(Span::styled(
                NO_RESULTS_MESSAGE,
                Style::default().fg(Color::DarkGray),
            ))
            .block(block);
            frame.render_widget(para, chunks[3]);
            return;
        }

        let items: Vec<ListItem> = visible.iter().map(|r| Self::card(r)).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, chunks[3], &mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::pages::test_support::{contains, draw, session};

    fn type_search(page: &mut HomePage, session: &mut Session, text: &str) {
        let now = Instant::now();
        page.handle_key(KeyCode::Char('/'), session, now);
        for c in text.chars() {
            page.handle_key(KeyCode::Char(c), session, now);
        }
        page.handle_key(KeyCode::Enter, session, now);
    }

    #[test]
    fn test_enter_opens_selected_menu() {
        let mut session = session();
        let mut page = HomePage::new(&session, Instant::now());
        let now = Instant::now();
        page.handle_key(KeyCode::Char('j'), &mut session, now);
        let actions = page.handle_key(KeyCode::Enter, &mut session, now);
        assert_eq!(
            actions,
            vec![PageAction::Navigate(Route::Menu("2".to_string()))]
        );
    }

    #[test]
    fn test_search_captures_keys_until_enter() {
        let mut session = session();
        let mut page = HomePage::new(&session, Instant::now());
        page.handle_key(KeyCode::Char('/'), &mut session, Instant::now());
        assert!(page.captures_input());
        assert_eq!(page.context(), ShortcutContext::Editing);
        page.handle_key(KeyCode::Char('q'), &mut session, Instant::now());
        assert_eq!(page.search_term(), "q");
        page.handle_key(KeyCode::Esc, &mut session, Instant::now());
        assert!(!page.captures_input());
    }

    #[test]
    fn test_search_filters_list() {
        let mut session = session();
        let mut page = HomePage::new(&session, Instant::now());
        type_search(&mut page, &mut session, "sushi");
        let names: Vec<_> = page.visible(&session).iter().map(|r| r.name.clone()).collect();
        assert_eq!(names, vec!["Sushi Central"]);
        assert_eq!(page.selected(&session).unwrap().id, "3");
    }

    #[test]
    fn test_cuisine_cycle() {
        let mut session = session();
        let mut page = HomePage::new(&session, Instant::now());
        assert_eq!(page.cuisine(), "All");
        page.handle_key(KeyCode::Right, &mut session, Instant::now());
        assert_eq!(page.cuisine(), "Italian");
        assert_eq!(page.visible(&session).len(), 1);
        page.handle_key(KeyCode::Left, &mut session, Instant::now());
        page.handle_key(KeyCode::Left, &mut session, Instant::now());
        assert_eq!(page.cuisine(), "Chinese");
        assert!(page.selected(&session).is_none());
    }

    #[test]
    fn test_render_cards_and_no_results() {
        let mut session = session();
        let mut page = HomePage::new(&session, Instant::now());
        let rows = draw(&mut page, &session, 100, 30);
        assert!(contains(&rows, "The Pizza Place"));
        assert!(contains(&rows, "★ 4.8"));
        assert!(contains(&rows, "Restaurants (4)"));

        type_search(&mut page, &mut session, "tacos");
        let rows = draw(&mut page, &session, 100, 30);
        assert!(contains(&rows, NO_RESULTS_MESSAGE));
    }

    #[test]
    fn test_enter_with_no_results_does_nothing() {
        let mut session = session();
        let mut page = HomePage::new(&session, Instant::now());
        type_search(&mut page, &mut session, "zzz");
        assert!(page
            .handle_key(KeyCode::Enter, &mut session, Instant::now())
            .is_empty());
    }
}
