use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

pub const TAB_TITLES: &[&str] = &["Home", "Menu", "Cart", "Track", "Profile"];

/// Wrap-around selection helpers shared by every list on every page
pub fn select_next(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(selected.map_or(0, |i| if i >= len - 1 { 0 } else { i + 1 }))
}

pub fn select_prev(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(selected.map_or(0, |i| if i == 0 { len - 1 } else { i - 1 }))
}

/// Keep a selection inside a list that may have shrunk
pub fn clamp_selection(selected: Option<usize>, len: usize) -> Option<usize> {
    match (selected, len) {
        (_, 0) => None,
        (None, _) => Some(0),
        (Some(i), len) => Some(i.min(len - 1)),
    }
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    }
}

pub struct HeaderBar<'a> {
    pub page_title: &'a str,
    pub cart_count: u32,
}

impl HeaderBar<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                " GrubTrack",
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" v{}", env!("CARGO_PKG_VERSION")),
                Style::default().fg(Color::Gray),
            ),
            Span::styled("  │  ", Style::default().fg(Color::DarkGray)),
            Span::styled(self.page_title.to_string(), Style::default().fg(Color::White)),
            Span::styled("  │  ", Style::default().fg(Color::DarkGray)),
        ];

        let badge_style = if self.cart_count > 0 {
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightRed)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::raw("Cart "));
        spans.push(Span::styled(format!(" {} ", self.cart_count), badge_style));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

pub struct TabBar {
    pub selected: usize,
}

impl TabBar {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = TAB_TITLES
            .iter()
            .enumerate()
            .map(|(i, t)| Line::from(format!("{} {}", i + 1, t)))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.selected)
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(tabs, area);
    }
}

pub struct StatusBar<'a> {
    pub hint: &'a str,
}

impl StatusBar<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let content = Line::from(vec![
            Span::styled(self.hint.to_string(), Style::default().fg(Color::DarkGray)),
            Span::styled("  [?]Help [q]uit", Style::default().fg(Color::DarkGray)),
        ]);
        let bar = Paragraph::new(content).block(Block::default().borders(Borders::TOP));
        frame.render_widget(bar, area);
    }
}
