//! Draws a [`StepperView`] as terminal lines.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::progress::{NodeMarker, Orientation, StepperTrack, StepperView};

pub const CHECK: &str = "✓";
pub const EMPTY: &str = "○";
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const MIN_SLOT_WIDTH: usize = 3;

fn marker_span(marker: NodeMarker, tick: usize) -> Span<'static> {
    match marker {
        NodeMarker::Check => Span::styled(
            CHECK,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        NodeMarker::Active => Span::styled(
            SPINNER_FRAMES[tick % SPINNER_FRAMES.len()],
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        NodeMarker::Empty => Span::styled(EMPTY, Style::default().fg(Color::DarkGray)),
    }
}

fn connector_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn label_style(highlighted: bool) -> Style {
    if highlighted {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

/// Marker row over a label row; every node gets an equal slot of `width`.
fn horizontal_lines(track: &StepperTrack, width: usize, tick: usize) -> Vec<Line<'static>> {
    let count = track.nodes.len().max(1);
    let slot = (width / count).max(MIN_SLOT_WIDTH);
    let left = slot / 2;
    let right = slot - left - 1;

    let mut markers = Vec::with_capacity(count * 3);
    let mut labels = Vec::with_capacity(count);

    for (i, node) in track.nodes.iter().enumerate() {
        let incoming = i.checked_sub(1).and_then(|j| track.connectors.get(j));
        let outgoing = track.connectors.get(i);

        markers.push(match incoming {
            Some(c) => Span::styled(
                format!("{} ", "─".repeat(left - 1)),
                connector_style(c.active),
            ),
            None => Span::raw(" ".repeat(left)),
        });
        markers.push(marker_span(node.marker, tick));
        markers.push(match outgoing {
            Some(c) => Span::styled(
                format!(" {}", "─".repeat(right - 1)),
                connector_style(c.active),
            ),
            None => Span::raw(" ".repeat(right)),
        });

        let label = truncate(&node.label, slot - 1);
        labels.push(Span::styled(
            format!("{:^slot$}", label, slot = slot),
            label_style(node.highlighted),
        ));
    }

    vec![Line::from(markers), Line::from(labels)]
}

/// One node per row, descriptions underneath, connectors as a vertical rule.
fn vertical_lines(track: &StepperTrack, tick: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let last = track.nodes.len().saturating_sub(1);

    for (i, node) in track.nodes.iter().enumerate() {
        lines.push(Line::from(vec![
            marker_span(node.marker, tick),
            Span::raw(" "),
            Span::styled(node.label.clone(), label_style(node.highlighted)),
        ]));

        let rule = track
            .connectors
            .get(i)
            .filter(|_| i < last)
            .map(|c| Span::styled("│", connector_style(c.active)));
        let gutter = rule.clone().unwrap_or_else(|| Span::raw(" "));

        if let Some(description) = &node.description {
            lines.push(Line::from(vec![
                gutter,
                Span::raw(" "),
                Span::styled(description.clone(), Style::default().fg(Color::DarkGray)),
            ]));
        }
        if let Some(rule) = rule {
            lines.push(Line::from(rule));
        }
    }
    lines
}

/// Lines for a view; `width` is the drawable width, `tick` drives the spinner
pub fn stepper_lines(view: &StepperView, width: u16, tick: usize) -> Vec<Line<'static>> {
    match view {
        StepperView::Placeholder { message } => vec![Line::from(Span::styled(
            *message,
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))],
        StepperView::Track(track) => match track.orientation {
            Orientation::Horizontal => horizontal_lines(track, width as usize, tick),
            Orientation::Vertical => vertical_lines(track, tick),
        },
    }
}

/// Rows the view needs, not counting the border
pub fn stepper_height(view: &StepperView) -> u16 {
    match view {
        StepperView::Placeholder { .. } => 1,
        StepperView::Track(track) => match track.orientation {
            Orientation::Horizontal => 2,
            Orientation::Vertical => vertical_lines(track, 0).len() as u16,
        },
    }
}

pub fn render_stepper(frame: &mut Frame, area: Rect, view: &StepperView, tick: usize) {
    let block = Block::default()
        .title(" Order Progress ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);

    let alignment = if view.is_placeholder() {
        Alignment::Center
    } else {
        Alignment::Left
    };
    let para = Paragraph::new(stepper_lines(view, inner.width, tick))
        .alignment(alignment)
        .block(block);
    frame.render_widget(para, area);
}
