use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::centered_rect;
use crate::types::{format_price, MenuItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemDetailResult {
    AddToCart { item_id: String },
    Close,
}

/// Full view of one menu item with an add-to-cart action
#[derive(Debug, Default)]
pub struct ItemDetailDialog {
    pub visible: bool,
    item: Option<MenuItem>,
    restaurant_name: String,
}

impl ItemDetailDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, item: &MenuItem, restaurant_name: &str) {
        self.item = Some(item.clone());
        self.restaurant_name = restaurant_name.to_string();
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.item = None;
    }

    pub fn item(&self) -> Option<&MenuItem> {
        self.item.as_ref()
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Option<ItemDetailResult> {
        if !self.visible {
            return None;
        }
        match key {
            KeyCode::Char('a') | KeyCode::Enter => {
                let item_id = self.item.as_ref()?.id.clone();
                self.hide();
                Some(ItemDetailResult::AddToCart { item_id })
            }
            KeyCode::Esc | KeyCode::Char('q') => {
                self.hide();
                Some(ItemDetailResult::Close)
            }
            _ => None,
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let Some(item) = self.item.as_ref().filter(|_| self.visible) else {
            return;
        };

        let area = centered_rect(60, 50, frame.area());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(format!(" {} ", item.name))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // price + restaurant
                Constraint::Min(3),    // description
                Constraint::Length(1), // tags
                Constraint::Length(1), // hint
            ])
            .margin(1)
            .split(inner);

        let heading = Line::from(vec![
            Span::styled(
                format_price(item.price),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {} · {}", self.restaurant_name, item.category)),
        ]);
        frame.render_widget(Paragraph::new(heading), chunks[0]);

        frame.render_widget(
            Paragraph::new(item.description.as_str()).wrap(Wrap { trim: true }),
            chunks[1],
        );

        let tags: Vec<Span> = item
            .tags
            .iter()
            .map(|t| Span::styled(format!("[{}] ", t), Style::default().fg(Color::Magenta)))
            .collect();
        frame.render_widget(Paragraph::new(Line::from(tags)), chunks[2]);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("[a]", Style::default().fg(Color::Yellow)),
                Span::raw(" Add to cart  "),
                Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
                Span::raw(" Close"),
            ]))
            .alignment(Alignment::Center),
            chunks[3],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;

    fn margherita() -> MenuItem {
        data::restaurants()[0].menu[0].clone()
    }

    #[test]
    fn test_add_returns_item_and_hides() {
        let mut dialog = ItemDetailDialog::new();
        dialog.show(&margherita(), "The Pizza Place");
        assert!(dialog.visible);
        assert_eq!(
            dialog.handle_key(KeyCode::Char('a')),
            Some(ItemDetailResult::AddToCart {
                item_id: "m1".to_string()
            })
        );
        assert!(!dialog.visible);
        assert!(dialog.item().is_none());
    }

    #[test]
    fn test_escape_closes() {
        let mut dialog = ItemDetailDialog::new();
        dialog.show(&margherita(), "The Pizza Place");
        assert_eq!(dialog.handle_key(KeyCode::Char('x')), None);
        assert_eq!(dialog.handle_key(KeyCode::Esc), Some(ItemDetailResult::Close));
    }

    #[test]
    fn test_hidden_dialog_ignores_keys() {
        let mut dialog = ItemDetailDialog::new();
        assert_eq!(dialog.handle_key(KeyCode::Enter), None);
    }
}
