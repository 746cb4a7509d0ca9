//! Single-line text input used by the search box, promo field and profile form

use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    /// Cursor position in chars, not bytes
    cursor: usize,
    placeholder: String,
    max_length: Option<usize>,
    /// Force typed letters to upper case (promo codes)
    uppercase: bool,
}

impl TextInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            ..Self::default()
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, new_value: &str) {
        self.value = match self.max_length {
            Some(max) => new_value.chars().take(max).collect(),
            None => new_value.to_string(),
        };
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    /// Handle a key event, returns true if the key was consumed
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char(c) => {
                if self.max_length.map_or(true, |m| self.len() < m) {
                    let c = if self.uppercase {
                        c.to_ascii_uppercase()
                    } else {
                        c
                    };
                    let at = self.byte_index(self.cursor);
                    self.value.insert(at, c);
                    self.cursor += 1;
                }
                true
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index(self.cursor);
                    self.value.remove(at);
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < self.len() {
                    let at = self.byte_index(self.cursor);
                    self.value.remove(at);
                }
                true
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right => {
                if self.cursor < self.len() {
                    self.cursor += 1;
                }
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.len();
                true
            }
            _ => false,
        }
    }

    /// Content line: placeholder when empty and idle, value with a bar cursor while editing
    pub fn line(&self, editing: bool) -> Line<'_> {
        if self.value.is_empty() && !editing {
            return Line::from(Span::styled(
                self.placeholder.as_str(),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let mut text = self.value.clone();
        if editing {
            text.insert(self.byte_index(self.cursor), '|');
        }

        let suffix = self
            .max_length
            .map(|m| format!(" ({}/{})", self.len(), m))
            .unwrap_or_default();

        Line::from(vec![
            Span::raw(text),
            Span::styled(suffix, Style::default().fg(Color::DarkGray)),
        ])
    }

    /// Render inside a bordered box titled `label`
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        focused: bool,
        editing: bool,
    ) {
        let border_style = if editing {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };

        let para = Paragraph::new(self.line(editing)).block(
            Block::default()
                .title(format!(" {} ", label))
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        frame.render_widget(para, area);
    }
}
