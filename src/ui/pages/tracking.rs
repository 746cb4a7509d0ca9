use chrono::Local;
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};
use std::time::Instant;

use super::{Page, PageAction, Route};
use crate::progress::Orientation;
use crate::session::Session;
use crate::tracking::{Courier, OrderTracker};
use crate::types::format_price;
use crate::ui::keybindings::ShortcutContext;
use crate::ui::panels::border_style;
use crate::ui::widgets::{render_stepper, stepper_height, Toast};

pub struct TrackingPage {
    order_id: String,
    tracker: Option<OrderTracker>,
    pub orientation: Orientation,
    courier: Courier,
    /// Spinner frame counter
    frame: usize,
}

impl TrackingPage {
    pub fn new(session: &Session, order_id: &str, now: Instant) -> Self {
        Self {
            order_id: order_id.to_string(),
            tracker: session.track(order_id, Local::now()),
            orientation: session.config.tracking.orientation,
            courier: Courier::new(session.config.tracking.simulate_interval_secs, now),
            frame: 0,
        }
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn tracker(&self) -> Option<&OrderTracker> {
        self.tracker.as_ref()
    }

    /// Re-open for a (possibly different) order
    pub fn open(&mut self, session: &Session, order_id: &str, now: Instant) {
        self.order_id = order_id.to_string();
        self.tracker = session.track(order_id, Local::now());
        self.courier.reset(now);
    }

    /// Move the order on in the backing store, then pull the change in
    fn advance(&mut self, session: &mut Session) -> Vec<PageAction> {
        let Some(tracker) = self.tracker.as_mut() else {
            return Vec::new();
        };
        if session.advance_order(&self.order_id).is_none() {
            return Vec::new();
        }
        tracker.refresh(&session.orders, Local::now());
        match tracker.current_stage() {
            Some(stage) => vec![PageAction::Notify(Toast::info(
                "Order Update",
                format!("{}: {}", stage.name, stage.description.clone().unwrap_or_default()),
            ))],
            None => Vec::new(),
        }
    }

    fn render_not_found(&self, frame: &mut Frame, area: Rect) {
        let para = Paragraph::new(vec![
            Line::from(Span::styled(
                "Order not found",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!(
                "We couldn't find order '{}'. Press Esc to go back home.",
                self.order_id
            )),
        ])
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(para, area);
    }

    fn summary_lines(tracker: &OrderTracker) -> Vec<Line<'static>> {
        let order = tracker.order();
        let mut lines: Vec<Line> = order
            .items
            .iter()
            .map(|line| {
                Line::from(vec![
                    Span::raw(format!("{} x {}", line.quantity, line.name)),
                    Span::styled(
                        format!("  {}", format_price(line.line_total())),
                        Style::default().fg(Color::Gray),
                    ),
                ])
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Total Amount: {}", format_price(order.total)),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!("Delivering to: {}", order.delivery_address)));
        lines
    }
}

impl Page for TrackingPage {
    fn title(&self, _session: &Session) -> String {
        format!("Track Order #{}", self.order_id)
    }

    fn context(&self) -> ShortcutContext {
        ShortcutContext::Tracking
    }

    fn handle_key(&mut self, key: KeyCode, session: &mut Session, now: Instant) -> Vec<PageAction> {
        match key {
            KeyCode::Char('v') => {
                self.orientation = self.orientation.toggled();
                tracing::debug!(orientation = self.orientation.as_str(), "Stepper orientation");
            }
            KeyCode::Char('n') => {
                self.courier.reset(now);
                return self.advance(session);
            }
            KeyCode::Char('r') => {
                if let Some(tracker) = self.tracker.as_mut() {
                    tracker.refresh(&session.orders, Local::now());
                } else {
                    self.tracker = session.track(&self.order_id, Local::now());
                }
            }
            KeyCode::Esc => return vec![PageAction::Navigate(Route::Home)],
            _ => {}
        }
        Vec::new()
    }

    fn tick(&mut self, session: &mut Session, now: Instant) -> Vec<PageAction> {
        self.frame = self.frame.wrapping_add(1);
        let finished = self.tracker.as_ref().map_or(true, OrderTracker::is_finished);
        if !finished && self.courier.due(now) {
            return self.advance(session);
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, _session: &Session) {
        let Some(tracker) = &self.tracker else {
            self.render_not_found(frame, area);
            return;
        };

        let view = tracker.stepper(self.orientation);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                         // Order header
                Constraint::Length(stepper_height(&view) + 2), // Stepper
                Constraint::Min(6),                            // Summary + updates
            ])
            .split(area);

        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                format!("Order #{}", tracker.order_id()),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   Estimated delivery: "),
            Span::styled(
                tracker.order().estimated_delivery.clone(),
                Style::default().fg(Color::Green),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        render_stepper(frame, chunks[1], &view, self.frame);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[2]);

        frame.render_widget(
            Paragraph::new(Self::summary_lines(tracker))
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .title(" Order Summary ")
                        .borders(Borders::ALL)
                        .border_style(border_style(false)),
                ),
            bottom[0],
        );

        let updates: Vec<ListItem> = tracker
            .live_updates()
            .into_iter()
            .map(|u| {
                let style = if u.emphasized {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(Span::styled(format!("• {}", u.text), style)))
            })
            .collect();
        frame.render_widget(
            List::new(updates).block(
                Block::default()
                    .title(" Live Updates ")
                    .borders(Borders::ALL)
                    .border_style(border_style(false)),
            ),
            bottom[1],
        );
    }
}
