use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::centered_rect;
use crate::ui::keybindings::{shortcuts_by_category_for_context, ShortcutContext};

pub struct HelpDialog {
    pub visible: bool,
}

impl Default for HelpDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpDialog {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    fn section(lines: &mut Vec<Line<'static>>, context: ShortcutContext) {
        lines.push(Line::from(Span::styled(
            format!("{}:", context.display_name()),
            Style::default()
                .add_modifier(Modifier::BOLD)
                .fg(Color::Cyan),
        )));
        for (_, shortcuts) in shortcuts_by_category_for_context(context) {
            for shortcut in shortcuts {
                lines.push(Line::from(vec![
                    Span::styled(
                        shortcut.key_display_padded(),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::raw(shortcut.description),
                ]));
            }
        }
        lines.push(Line::from(""));
    }

    /// Global shortcuts, then those of the page the user is on
    pub fn lines(page: ShortcutContext) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                "Keyboard Shortcuts",
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::Cyan),
            )),
            Line::from(""),
        ];
        Self::section(&mut lines, ShortcutContext::Global);
        if !matches!(page, ShortcutContext::Global | ShortcutContext::Editing) {
            Self::section(&mut lines, page);
        }
        Self::section(&mut lines, ShortcutContext::Editing);
        lines.push(Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::Gray),
        )));
        lines
    }

    pub fn render(&self, frame: &mut Frame, page: ShortcutContext) {
        if !self.visible {
            return;
        }

        let area = centered_rect(60, 80, frame.area());
        frame.render_widget(Clear, area);

        let help = Paragraph::new(Self::lines(page))
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false });

        frame.render_widget(help, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_help_dialog_toggle() {
        let mut dialog = HelpDialog::new();
        assert!(!dialog.visible);
        dialog.toggle();
        assert!(dialog.visible);
        dialog.toggle();
        assert!(!dialog.visible);
    }

    #[test]
    fn test_lines_include_page_section() {
        let text = plain(&HelpDialog::lines(ShortcutContext::Cart));
        assert!(text.iter().any(|l| l == "Everywhere:"));
        assert!(text.iter().any(|l| l == "Cart:"));
        assert!(text.iter().any(|l| l.contains("Proceed to checkout")));
        assert!(!text.iter().any(|l| l.contains("Toggle stepper orientation")));
    }
}
