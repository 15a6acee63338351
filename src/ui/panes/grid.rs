//! Grid pane rendering
//!
//! Draws the N×N grid as colored blocks. Each block's background comes from
//! [`Snapshot::role_of`], and its label is the cell's resolved path count (or
//! `-` while unresolved). Block size adapts to the pane; counts that do not fit
//! are shortened to scientific notation.

use super::border_style;
use crate::grid::{Cell, Grid};
use crate::snapshot::{CellRole, Snapshot};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const MIN_CELL_WIDTH: u16 = 3;
const MAX_CELL_WIDTH: u16 = 14;
const MAX_CELL_HEIGHT: u16 = 3;

/// Data needed to render the grid pane
pub struct GridRenderData<'a> {
    /// Snapshot on display, `None` before any run
    pub snapshot: Option<&'a Snapshot>,
    pub grid_size: usize,
    /// Path count once the run has finished
    pub total: Option<u64>,
}

/// Render the grid pane
pub fn render_grid_pane(frame: &mut Frame, area: Rect, data: GridRenderData, is_focused: bool) {
    let title = match data.total {
        Some(total) => format!(
            " Grid {}×{} · {} paths ",
            data.grid_size, data.grid_size, total
        ),
        None => format!(" Grid {}×{} ", data.grid_size, data.grid_size),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let inner = block.inner(area);
    let (cell_width, cell_height) = cell_dimensions(inner, data.grid_size);
    let grid = Grid::new(data.grid_size);

    let mut lines = Vec::with_capacity(data.grid_size * cell_height);
    for row in 0..grid.size() {
        for sub_row in 0..cell_height {
            let is_label_row = sub_row == cell_height / 2;
            let mut spans = Vec::with_capacity(grid.size() * 2);
            for col in 0..grid.size() {
                let cell = Cell::new(row, col);
                let (role, label) = match data.snapshot {
                    Some(snapshot) => (snapshot.role_of(cell), snapshot.label_of(cell)),
                    None => (CellRole::Unvisited, "-".to_string()),
                };
                let text = if is_label_row {
                    fit_label(&label, cell_width)
                } else {
                    " ".repeat(cell_width)
                };
                let mut style = Style::default()
                    .bg(DEFAULT_THEME.role_color(role))
                    .fg(DEFAULT_THEME.cell_text);
                if role == CellRole::Updating || role == CellRole::Current {
                    style = style.add_modifier(Modifier::BOLD);
                }
                spans.push(Span::styled(text, style));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Block width and height (in terminal cells) for an `n`×`n` grid in `inner`.
///
/// One column per block is reserved for the gap between blocks.
pub(crate) fn cell_dimensions(inner: Rect, n: usize) -> (usize, usize) {
    let n = n.max(1) as u16;
    let width = (inner.width / n)
        .saturating_sub(1)
        .clamp(MIN_CELL_WIDTH, MAX_CELL_WIDTH);
    let height = (inner.height / n).clamp(1, MAX_CELL_HEIGHT);
    (width as usize, height as usize)
}

/// Center `label` in `width` columns, shortening large counts
pub(crate) fn fit_label(label: &str, width: usize) -> String {
    let text = if label.chars().count() <= width {
        label.to_string()
    } else {
        match label.parse::<u64>() {
            Ok(n) => format!("{:.0e}", n as f64),
            Err(_) => label.to_string(),
        }
    };
    let text: String = text.chars().take(width).collect();
    format!("{:^width$}", text, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_label_centers_short_labels() {
        assert_eq!(fit_label("6", 5), "  6  ");
        assert_eq!(fit_label("-", 3), " - ");
    }

    #[test]
    fn test_fit_label_shortens_large_counts() {
        let fitted = fit_label("35345263800", 5);
        assert_eq!(fitted.len(), 5);
        assert_eq!(fitted.trim(), "4e10");
    }

    #[test]
    fn test_cell_dimensions_are_bounded() {
        let (w, h) = cell_dimensions(Rect::new(0, 0, 200, 100), 2);
        assert_eq!((w, h), (MAX_CELL_WIDTH as usize, MAX_CELL_HEIGHT as usize));

        let (w, h) = cell_dimensions(Rect::new(0, 0, 40, 10), 20);
        assert_eq!((w, h), (MIN_CELL_WIDTH as usize, 1));
    }
}
