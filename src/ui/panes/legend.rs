//! Legend rendering

use crate::snapshot::CellRole;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the one-line color key, in role priority order
pub fn render_legend(frame: &mut Frame, area: Rect) {
    let mut spans = Vec::with_capacity(CellRole::ALL.len() * 3);
    for role in CellRole::ALL {
        spans.push(Span::styled(
            "  ",
            Style::default().bg(DEFAULT_THEME.role_color(role)),
        ));
        spans.push(Span::styled(
            format!(" {}", role.label()),
            Style::default().fg(DEFAULT_THEME.fg),
        ));
        spans.push(Span::raw("   "));
    }

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
