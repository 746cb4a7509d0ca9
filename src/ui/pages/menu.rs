use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};
use std::time::Instant;

use super::{Page, PageAction, Route};
use crate::session::Session;
use crate::types::{format_price, MenuItem, Restaurant};
use crate::ui::dialogs::{ItemDetailDialog, ItemDetailResult};
use crate::ui::keybindings::ShortcutContext;
use crate::ui::panels::{border_style, select_next, select_prev};
use crate::ui::widgets::Toast;

/// Menu items grouped by category, categories in first-seen order
pub fn grouped_menu(restaurant: &Restaurant) -> Vec<&MenuItem> {
    restaurant
        .menu_categories()
        .into_iter()
        .flat_map(|category| restaurant.menu.iter().filter(move |m| m.category == category))
        .collect()
}

pub struct MenuPage {
    restaurant_id: String,
    state: TableState,
    detail: ItemDetailDialog,
}

impl MenuPage {
    pub fn new(restaurant_id: &str) -> Self {
        Self {
            restaurant_id: restaurant_id.to_string(),
            state: TableState::default().with_selected(Some(0)),
            detail: ItemDetailDialog::new(),
        }
    }

    pub fn restaurant_id(&self) -> &str {
        &self.restaurant_id
    }

    /// Switch restaurants, resetting the selection
    pub fn open(&mut self, restaurant_id: &str) {
        if self.restaurant_id != restaurant_id {
            self.restaurant_id = restaurant_id.to_string();
            self.state.select(Some(0));
        }
        self.detail.hide();
    }

    fn selected_item_id(&self, session: &Session) -> Option<String> {
        let restaurant = session.restaurant(&self.restaurant_id)?;
        let i = self.state.selected()?;
        grouped_menu(restaurant).get(i).map(|m| m.id.clone())
    }

    fn add(&self, session: &mut Session, item_id: &str) -> Vec<PageAction> {
        match session.add_to_cart(&self.restaurant_id, item_id) {
            Some((name, _)) => vec![PageAction::Notify(Toast::info(
                "Item Added!",
                format!("{} has been added to your cart.", name),
            ))],
            None => Vec::new(),
        }
    }

    fn render_not_found(&self, frame: &mut Frame, area: Rect) {
        let para = Paragraph::new(vec![
            Line::from(Span::styled(
                "Restaurant not found",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!(
                "No restaurant with id '{}'. Press Esc to go back home.",
                self.restaurant_id
            )),
        ])
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(para, area);
    }
}

impl Page for MenuPage {
    fn title(&self, session: &Session) -> String {
        session
            .restaurant(&self.restaurant_id)
            .map_or_else(|| "Menu".to_string(), |r| r.name.clone())
    }

    fn context(&self) -> ShortcutContext {
        ShortcutContext::Menu
    }

    fn captures_input(&self) -> bool {
        self.detail.visible
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        session: &mut Session,
        _now: Instant,
    ) -> Vec<PageAction> {
        if self.detail.visible {
            return match self.detail.handle_key(key) {
                Some(ItemDetailResult::AddToCart { item_id }) => self.add(session, &item_id),
                _ => Vec::new(),
            };
        }

        let Some(restaurant) = session.restaurant(&self.restaurant_id) else {
            return match key {
                KeyCode::Esc => vec![PageAction::Navigate(Route::Home)],
                _ => Vec::new(),
            };
        };
        let len = restaurant.menu.len();

        match key {
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.select(select_next(self.state.selected(), len));
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.select(select_prev(self.state.selected(), len));
            }
            KeyCode::Enter => {
                let selected = self
                    .state
                    .selected()
                    .and_then(|i| grouped_menu(restaurant).get(i).copied());
                if let Some(item) = selected {
                    self.detail.show(item, &restaurant.name);
                }
            }
            KeyCode::Char('a') => {
                if let Some(item_id) = self.selected_item_id(session) {
                    return self.add(session, &item_id);
                }
            }
            KeyCode::Esc => return vec![PageAction::Navigate(Route::Home)],
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, session: &Session) {
        let Some(restaurant) = session.restaurant(&self.restaurant_id) else {
            self.render_not_found(frame, area);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Restaurant header
                Constraint::Min(5),    // Menu table
                Constraint::Length(4), // Selected item description
            ])
            .split(area);

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                restaurant.name.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "{} · ★ {:.1} · {} · {}",
                restaurant.cuisine, restaurant.rating, restaurant.delivery_time, restaurant.address
            )),
        ])
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        let items = grouped_menu(restaurant);
        let rows: Vec<Row> = items
            .iter()
            .map(|item| {
                Row::new(vec![
                    item.category.clone(),
                    item.name.clone(),
                    format_price(item.price),
                    item.tags.join(", "),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(14),
                Constraint::Min(20),
                Constraint::Length(9),
                Constraint::Min(10),
            ],
        )
        .header(
            Row::new(vec!["Category", "Item", "Price", "Tags"])
                .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .title(" Menu ")
                .borders(Borders::ALL)
                .border_style(border_style(!self.detail.visible)),
        )
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");
        frame.render_stateful_widget(table, chunks[1], &mut self.state);

        let description = self
            .state
            .selected()
            .and_then(|i| items.get(i))
            .map(|m| m.description.clone())
            .unwrap_or_default();
        frame.render_widget(
            Paragraph::new(description)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(" Details ")),
            chunks[2],
        );

        self.detail.render(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::pages::test_support::{contains, draw, session};

    #[test]
    fn test_add_selected_item_merges_into_cart() {
        let mut session = session();
        let mut page = MenuPage::new("1");
        let before = session.cart.get("m1").unwrap().quantity;
        let actions = page.handle_key(KeyCode::Char('a'), &mut session, Instant::now());
        assert_eq!(session.cart.get("m1").unwrap().quantity, before + 1);
        match &actions[..] {
            [PageAction::Notify(toast)] => {
                assert_eq!(toast.title, "Item Added!");
                assert!(toast.description.contains("Margherita Pizza"));
            }
            other => panic!("unexpected actions {:?}", other),
        }
    }

    #[test]
    fn test_detail_dialog_adds_item() {
        let mut session = session();
        let mut page = MenuPage::new("1");
        let now = Instant::now();
        page.handle_key(KeyCode::Down, &mut session, now);
        page.handle_key(KeyCode::Enter, &mut session, now);
        assert!(page.captures_input());
        let actions = page.handle_key(KeyCode::Char('a'), &mut session, now);
        assert_eq!(actions.len(), 1);
        assert!(!page.captures_input());
        assert!(session.cart.get(&grouped_menu(session.restaurant("1").unwrap())[1].id).is_some());
    }

    #[test]
    fn test_escape_returns_home() {
        let mut session = session();
        let mut page = MenuPage::new("1");
        assert_eq!(
            page.handle_key(KeyCode::Esc, &mut session, Instant::now()),
            vec![PageAction::Navigate(Route::Home)]
        );
    }

    #[test]
    fn test_unknown_restaurant_view() {
        let mut session = session();
        let mut page = MenuPage::new("99");
        let rows = draw(&mut page, &session, 80, 10);
        assert!(contains(&rows, "Restaurant not found"));
        assert!(page
            .handle_key(KeyCode::Char('a'), &mut session, Instant::now())
            .is_empty());
        assert_eq!(page.title(&session), "Menu");
    }

    #[test]
    fn test_render_menu_table() {
        let session = session();
        let mut page = MenuPage::new("1");
        let rows = draw(&mut page, &session, 100, 20);
        assert!(contains(&rows, "The Pizza Place"));
        assert!(contains(&rows, "Margherita Pizza"));
        assert!(contains(&rows, "$14.99"));
    }

    #[test]
    fn test_grouped_menu_keeps_categories_together() {
        let session = session();
        for restaurant in &session.restaurants {
            let categories: Vec<&str> = grouped_menu(restaurant)
                .iter()
                .map(|m| m.category.as_str())
                .collect();
            let mut deduped = categories.clone();
            deduped.dedup();
            assert_eq!(deduped, restaurant.menu_categories());
            assert_eq!(categories.len(), restaurant.menu.len());
        }
    }
}
