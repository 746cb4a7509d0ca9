use chrono::Local;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
    Frame,
};
use std::time::Instant;

use super::{Page, PageAction, Route};
use crate::cart::{CartError, QuantityChange};
use crate::session::Session;
use crate::types::format_price;
use crate::ui::form_field::TextInput;
use crate::ui::keybindings::ShortcutContext;
use crate::ui::panels::{border_style, clamp_selection, select_next, select_prev};
use crate::ui::widgets::Toast;

pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty. Press 1 to browse restaurants.";

pub struct CartPage {
    state: TableState,
    promo: TextInput,
    editing_promo: bool,
}

impl CartPage {
    pub fn new(session: &Session) -> Self {
        let mut promo = TextInput::new("Promo code")
            .with_max_length(session.config.cart.promo_length)
            .uppercase();
        promo.set_value(session.cart.promo_code());
        Self {
            state: TableState::default().with_selected(Some(0)),
            promo,
            editing_promo: false,
        }
    }

    fn selected_id(&self, session: &Session) -> Option<String> {
        let i = self.state.selected()?;
        session.cart.items().get(i).map(|item| item.id.clone())
    }

    fn apply_promo(&mut self, session: &mut Session) -> Vec<PageAction> {
        session.cart.set_promo_code(self.promo.value());
        let outcome = session.cart.apply_promo();
        tracing::debug!(code = %session.cart.promo_code(), ?outcome, "Promo applied");
        match outcome.message() {
            Some((title, description)) if outcome.is_error() => {
                vec![PageAction::Notify(Toast::error(title, description))]
            }
            Some((title, description)) => vec![PageAction::Notify(Toast::info(title, description))],
            None => Vec::new(),
        }
    }

    fn change_quantity(&mut self, session: &mut Session, delta: i64) -> Vec<PageAction> {
        let Some(id) = self.selected_id(session) else {
            return Vec::new();
        };
        let name = session
            .cart
            .get(&id)
            .map(|i| i.name.clone())
            .unwrap_or_default();
        let change = if delta > 0 {
            session.cart.increment(&id)
        } else {
            session.cart.decrement(&id)
        };
        self.state
            .select(clamp_selection(self.state.selected(), session.cart.items().len()));
        match change {
            Ok(QuantityChange::Removed) => vec![PageAction::Notify(Toast::info(
                "Item Removed",
                format!("{} removed from cart.", name),
            ))],
            _ => Vec::new(),
        }
    }

    fn remove(&mut self, session: &mut Session) -> Vec<PageAction> {
        let Some(id) = self.selected_id(session) else {
            return Vec::new();
        };
        let removed = session.cart.remove(&id);
        self.state
            .select(clamp_selection(self.state.selected(), session.cart.items().len()));
        match removed {
            Ok(item) => vec![PageAction::Notify(Toast::info(
                "Item Removed",
                format!("{} removed from cart.", item.name),
            ))],
            Err(_) => Vec::new(),
        }
    }

    fn checkout(&mut self, session: &mut Session) -> Vec<PageAction> {
        match session.checkout(Local::now()) {
            Ok(order_id) => {
                self.promo.clear();
                self.state.select(None);
                vec![
                    PageAction::Notify(Toast::info(
                        "Order Placed!",
                        format!("Tracking order {}.", order_id),
                    )),
                    PageAction::Navigate(Route::Tracking(order_id)),
                ]
            }
            Err(err @ CartError::Empty) => {
                vec![PageAction::Notify(Toast::error("Empty Cart", err.to_string()))]
            }
            Err(err) => vec![PageAction::Notify(Toast::error("Checkout Failed", err.to_string()))],
        }
    }

    fn summary_lines(session: &Session) -> Vec<Line<'static>> {
        let cart = &session.cart;
        let row = |label: &str, amount: String, style: Style| {
            Line::from(vec![
                Span::raw(format!("{:<14}", label)),
                Span::styled(format!("{:>10}", amount), style),
            ])
        };
        let mut lines = vec![
            row("Subtotal", format_price(cart.subtotal()), Style::default()),
            row("Delivery Fee", format_price(cart.delivery_fee()), Style::default()),
        ];
        if cart.promo_discount() > 0 {
            lines.push(row(
                "Promo",
                format!("-{}", format_price(cart.promo_discount())),
                Style::default().fg(Color::Green),
            ));
        }
        lines.push(Line::from("─".repeat(24)));
        lines.push(row(
            "Total",
            format_price(cart.total()),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        lines
    }
}

impl Page for CartPage {
    fn title(&self, _session: &Session) -> String {
        "Your Cart".to_string()
    }

    fn context(&self) -> ShortcutContext {
        if self.editing_promo {
            ShortcutContext::Editing
        } else {
            ShortcutContext::Cart
        }
    }

    fn captures_input(&self) -> bool {
        self.editing_promo
    }

    fn handle_key(
        &mut self,
        key: KeyCode,
        session: &mut Session,
        _now: Instant,
    ) -> Vec<PageAction> {
        if self.editing_promo {
            match key {
                KeyCode::Enter => {
                    self.editing_promo = false;
                    return self.apply_promo(session);
                }
                KeyCode::Esc => self.editing_promo = false,
                other => {
                    self.promo.handle_key(other);
                }
            }
            return Vec::new();
        }

        let len = session.cart.items().len();
        match key {
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.select(select_next(self.state.selected(), len));
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.select(select_prev(self.state.selected(), len));
            }
            KeyCode::Char('+') | KeyCode::Char('=') => return self.change_quantity(session, 1),
            KeyCode::Char('-') => return self.change_quantity(session, -1),
            KeyCode::Char('d') | KeyCode::Delete => return self.remove(session),
            KeyCode::Char('p') => self.editing_promo = true,
            KeyCode::Char('o') => return self.checkout(session),
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, session: &Session) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(area);

        let items_block = Block::default()
            .title(format!(" Items ({}) ", session.cart.item_count()))
            .borders(Borders::ALL)
            .border_style(border_style(!self.editing_promo));

        if session.cart.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    EMPTY_CART_MESSAGE,
                    Style::default().fg(Color::DarkGray),
                ))
                .block(items_block),
                chunks[0],
            );
        } else {
            let rows: Vec<Row> = session
                .cart
                .items()
                .iter()
                .map(|item| {
                    Row::new(vec![
                        item.name.clone(),
                        item.restaurant.clone().unwrap_or_default(),
                        format!("x{}", item.quantity),
                        format_price(item.price),
                        format_price(item.line_total()),
                    ])
                })
                .collect();
            let table = Table::new(
                rows,
                [
                    Constraint::Min(16),
                    Constraint::Min(14),
                    Constraint::Length(4),
                    Constraint::Length(8),
                    Constraint::Length(8),
                ],
            )
            .header(
                Row::new(vec!["Item", "Restaurant", "Qty", "Price", "Total"])
                    .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)),
            )
            .block(items_block)
            .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");
            frame.render_stateful_widget(table, chunks[0], &mut self.state);
        }

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(6)])
            .split(chunks[1]);

        self.promo
            .render(frame, side[0], "Promo Code", false, self.editing_promo);

        frame.render_widget(
            Paragraph::new(Self::summary_lines(session)).block(
                Block::default()
                    .title(" Order Summary ")
                    .borders(Borders::ALL)
                    .border_style(border_style(false)),
            ),
            side[1],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::pages::test_support::{contains, draw, session};

    fn press(page: &mut CartPage, session: &mut Session, keys: &[KeyCode]) -> Vec<PageAction> {
        keys.iter()
            .flat_map(|k| page.handle_key(*k, session, Instant::now()))
            .collect()
    }

    fn titles(actions: &[PageAction]) -> Vec<String> {
        actions
            .iter()
            .filter_map(|a| match a {
                PageAction::Notify(t) => Some(t.title.clone()),
                PageAction::Navigate(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_quantity_edits_on_selected_line() {
        let mut session = session();
        let mut page = CartPage::new(&session);
        press(&mut page, &mut session, &[KeyCode::Char('+')]);
        assert_eq!(session.cart.items()[0].quantity, 2);
        let actions = press(&mut page, &mut session, &[KeyCode::Char('-'), KeyCode::Char('-')]);
        assert_eq!(titles(&actions), vec!["Item Removed"]);
        assert_eq!(session.cart.items().len(), 2);
    }

    #[test]
    fn test_remove_last_item_clamps_selection() {
        let mut session = session();
        let mut page = CartPage::new(&session);
        press(&mut page, &mut session, &[KeyCode::Up, KeyCode::Char('d')]);
        assert_eq!(session.cart.items().len(), 2);
        assert_eq!(page.state.selected(), Some(1));
    }

    #[test]
    fn test_promo_outcomes() {
        let mut session = session();
        let mut page = CartPage::new(&session);

        let keys: Vec<KeyCode> = "p".chars().chain("save10".chars()).map(KeyCode::Char).collect();
        press(&mut page, &mut session, &keys);
        assert!(page.captures_input());
        let actions = press(&mut page, &mut session, &[KeyCode::Enter]);
        assert_eq!(titles(&actions), vec!["Promo Applied!"]);
        assert_eq!(session.cart.promo_code(), "SAVE10");
        assert!(session.cart.promo_discount() > 0);

        let mut keys = vec![KeyCode::Char('p')];
        keys.extend([KeyCode::Backspace; 6]);
        keys.extend("abc".chars().map(KeyCode::Char));
        keys.push(KeyCode::Enter);
        match &press(&mut page, &mut session, &keys)[..] {
            [PageAction::Notify(toast)] => {
                assert_eq!(toast.description, "Promo code must be 6 characters.");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(session.cart.promo_discount(), 0);
    }

    #[test]
    fn test_blank_promo_is_silent() {
        let mut session = session();
        let mut page = CartPage::new(&session);
        assert!(press(&mut page, &mut session, &[KeyCode::Char('p'), KeyCode::Enter]).is_empty());
    }

    #[test]
    fn test_checkout_navigates_to_tracking() {
        let mut session = session();
        let mut page = CartPage::new(&session);
        let actions = press(&mut page, &mut session, &[KeyCode::Char('o')]);
        let route = actions.iter().find_map(|a| match a {
            PageAction::Navigate(Route::Tracking(id)) => Some(id.clone()),
            _ => None,
        });
        let order_id = route.expect("navigates to tracking");
        assert!(session.cart.is_empty());
        assert!(session.track(&order_id, Local::now()).is_some());

        let actions = press(&mut page, &mut session, &[KeyCode::Char('o')]);
        assert_eq!(titles(&actions), vec!["Empty Cart"]);
    }

    #[test]
    fn test_render_totals() {
        let session = session();
        let mut page = CartPage::new(&session);
        let rows = draw(&mut page, &session, 120, 16);
        assert!(contains(&rows, "Items (4)"));
        assert!(contains(&rows, "Garlic Bread"));
        assert!(contains(&rows, "Delivery Fee"));
        assert!(contains(&rows, &format_price(session.cart.total())));
    }

    #[test]
    fn test_render_empty_cart() {
        let mut session = session();
        session.cart.clear();
        let mut page = CartPage::new(&session);
        let rows = draw(&mut page, &session, 120, 16);
        assert!(contains(&rows, "Your cart is empty."));
    }
}
