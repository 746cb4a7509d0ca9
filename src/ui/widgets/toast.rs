//! Short-lived notifications drawn in the bottom-right corner.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

const MAX_VISIBLE: usize = 3;
const TOAST_WIDTH: u16 = 40;
const TOAST_HEIGHT: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }
}

#[derive(Debug)]
pub struct ToastQueue {
    toasts: VecDeque<(Toast, Instant)>,
    lifetime: Duration,
}

impl ToastQueue {
    pub fn new(lifetime_secs: u64) -> Self {
        Self {
            toasts: VecDeque::new(),
            lifetime: Duration::from_secs(lifetime_secs),
        }
    }

    pub fn push(&mut self, toast: Toast, now: Instant) {
        tracing::debug!(title = %toast.title, "Toast");
        self.toasts.push_back((toast, now));
        while self.toasts.len() > MAX_VISIBLE {
            self.toasts.pop_front();
        }
    }

    /// Drop toasts older than the configured lifetime
    pub fn expire(&mut self, now: Instant) {
        let lifetime = self.lifetime;
        self.toasts
            .retain(|(_, created)| now.duration_since(*created) < lifetime);
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Toast> {
        self.toasts.iter().map(|(t, _)| t)
    }

    /// Newest toast lowest, stacked upwards
    pub fn render(&self, frame: &mut Frame) {
        let screen = frame.area();
        let width = TOAST_WIDTH.min(screen.width);

        for (slot, toast) in self.iter().rev().enumerate() {
            let offset = TOAST_HEIGHT * (slot as u16 + 1);
            if offset + 1 > screen.height {
                break;
            }
            let area = Rect {
                x: screen.x + screen.width - width,
                y: screen.y + screen.height - offset - 1,
                width,
                height: TOAST_HEIGHT,
            };

            let color = match toast.variant {
                ToastVariant::Default => Color::Green,
                ToastVariant::Destructive => Color::Red,
            };
            let para = Paragraph::new(vec![
                Line::from(Span::styled(
                    toast.title.clone(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
                Line::from(toast.description.clone()),
            ])
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            );
            frame.render_widget(Clear, area);
            frame.render_widget(para, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_toasts_expire() {
        let start = Instant::now();
        let mut queue = ToastQueue::new(3);
        queue.push(Toast::info("Item Added!", "Garlic Bread"), start);
        queue.push(
            Toast::info("Promo Applied!", "10% off"),
            start + Duration::from_secs(2),
        );
        queue.expire(start + Duration::from_secs(3));
        let titles: Vec<_> = queue.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Promo Applied!"]);
        queue.expire(start + Duration::from_secs(10));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_queue_keeps_newest() {
        let now = Instant::now();
        let mut queue = ToastQueue::new(3);
        for i in 0..5 {
            queue.push(Toast::info(format!("t{}", i), ""), now);
        }
        assert_eq!(queue.len(), MAX_VISIBLE);
        assert_eq!(queue.iter().next().unwrap().title, "t2");
    }

    #[test]
    fn test_render_bottom_right() {
        let mut queue = ToastQueue::new(3);
        queue.push(Toast::error("Empty Cart", "Add items"), Instant::now());
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal.draw(|f| queue.render(f)).unwrap();
        let buffer = terminal.backend().buffer();
        let rows: Vec<String> = buffer
            .content()
            .chunks(60)
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect();
        // box occupies rows 5..9, title on row 6
        assert!(rows[6].contains("Empty Cart"));
        assert!(rows[6].starts_with(&" ".repeat(20)));
    }

    #[test]
    fn test_render_stacks_newest_lowest() {
        let now = Instant::now();
        let mut queue = ToastQueue::new(3);
        queue.push(Toast::info("Item Added!", "Garlic Bread"), now);
        queue.push(Toast::info("Order Placed!", "On its way"), now);
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal.draw(|f| queue.render(f)).unwrap();
        let rows: Vec<String> = terminal
            .backend()
            .buffer()
            .content()
            .chunks(60)
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect();
        assert!(rows[6].contains("Order Placed!"));
        assert!(rows[2].contains("Item Added!"));
    }
}
