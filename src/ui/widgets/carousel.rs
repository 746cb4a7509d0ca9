//! Promotional slide carousel with looping autoplay.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::time::{Duration, Instant};

use crate::types::CarouselSlide;

pub const NO_SLIDES_MESSAGE: &str = "No slides to display.";

#[derive(Debug)]
pub struct CarouselState {
    slides: Vec<CarouselSlide>,
    current: usize,
    delay: Duration,
    last_change: Instant,
}

impl CarouselState {
    /// `delay_ms` of zero disables autoplay
    pub fn new(slides: Vec<CarouselSlide>, delay_ms: u64, now: Instant) -> Self {
        Self {
            slides,
            current: 0,
            delay: Duration::from_millis(delay_ms),
            last_change: now,
        }
    }

    pub fn current(&self) -> Option<&CarouselSlide> {
        self.slides.get(self.current)
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn next(&mut self, now: Instant) {
        if !self.slides.is_empty() {
            self.current = (self.current + 1) % self.slides.len();
        }
        self.last_change = now;
    }

    pub fn prev(&mut self, now: Instant) {
        if !self.slides.is_empty() {
            self.current = self
                .current
                .checked_sub(1)
                .unwrap_or(self.slides.len() - 1);
        }
        self.last_change = now;
    }

    /// Autoplay step. Returns true when the slide changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.delay.is_zero() || self.slides.len() < 2 {
            return false;
        }
        if now.duration_since(self.last_change) >= self.delay {
            self.next(now);
            return true;
        }
        false
    }

    /// "● ○ ○" style position indicator
    fn dots(&self) -> Line<'static> {
        let spans: Vec<Span> = (0..self.slides.len())
            .map(|i| {
                if i == self.current {
                    Span::styled("● ", Style::default().fg(Color::Cyan))
                } else {
                    Span::styled("○ ", Style::default().fg(Color::DarkGray))
                }
            })
            .collect();
        Line::from(spans)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Featured ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray));

        let lines = match self.current() {
            None => vec![Line::from(Span::styled(
                NO_SLIDES_MESSAGE,
                Style::default().fg(Color::DarkGray),
            ))],
            Some(slide) => {
                let mut lines = vec![Line::from(Span::styled(
                    slide.title.clone(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))];
                lines.push(Line::from(
                    slide
                        .description
                        .clone()
                        .unwrap_or_else(|| slide.alt_text.clone()),
                ));
                lines.push(self.dots());
                lines
            }
        };

        let para = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(para, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_next_and_prev_loop() {
        let now = Instant::now();
        let mut carousel = CarouselState::new(data::carousel_slides(), 4000, now);
        assert_eq!(carousel.len(), 3);
        carousel.prev(now);
        assert_eq!(carousel.index(), 2);
        carousel.next(now);
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn test_autoplay_waits_for_delay() {
        let start = Instant::now();
        let mut carousel = CarouselState::new(data::carousel_slides(), 4000, start);
        assert!(!carousel.tick(start + Duration::from_millis(3999)));
        assert!(carousel.tick(start + Duration::from_millis(4000)));
        assert_eq!(carousel.index(), 1);
        // the timer restarts from the change
        assert!(!carousel.tick(start + Duration::from_millis(7000)));
        assert!(carousel.tick(start + Duration::from_millis(8000)));
    }

    #[test]
    fn test_manual_change_resets_timer() {
        let start = Instant::now();
        let mut carousel = CarouselState::new(data::carousel_slides(), 4000, start);
        carousel.next(start + Duration::from_millis(3000));
        assert!(!carousel.tick(start + Duration::from_millis(4500)));
    }

    #[test]
    fn test_zero_delay_disables_autoplay() {
        let start = Instant::now();
        let mut carousel = CarouselState::new(data::carousel_slides(), 0, start);
        assert!(!carousel.tick(start + Duration::from_secs(60)));
    }

    #[test]
    fn test_empty_carousel() {
        let now = Instant::now();
        let mut carousel = CarouselState::new(Vec::new(), 4000, now);
        carousel.next(now);
        carousel.prev(now);
        assert!(carousel.current().is_none());

        let mut terminal = Terminal::new(TestBackend::new(40, 5)).unwrap();
        terminal.draw(|f| carousel.render(f, f.area())).unwrap();
        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains(NO_SLIDES_MESSAGE));
    }
}
