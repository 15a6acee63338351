//! Call stack pane rendering
//!
//! Shows the traversal's recursion as frames, outermost call first, followed
//! by a summary of the transient state: current and updating cells, the
//! contributing neighbours, visited count and memo hits.
//!
//! # Layout
//!
//! ```text
//! ▸ Frame 0 │ visit(0, 0)
//! ▸ Frame 1 │ visit(0, 1)
//! ▸ Frame 2 │ visit(1, 1)            = 1
//!
//! current       (1, 1)
//! ...
//! ```

use super::border_style;
use crate::grid::Cell;
use crate::snapshot::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Scroll state for the stack pane
#[derive(Debug, Default)]
pub struct StackScrollState {
    pub offset: usize,
    pub prev_item_count: usize,
}

/// Data needed to render the stack pane
pub struct StackRenderData<'a> {
    pub snapshot: Option<&'a Snapshot>,
}

/// Render the stack pane
pub fn render_stack_pane(
    frame: &mut Frame,
    area: Rect,
    data: StackRenderData,
    is_focused: bool,
    scroll_state: &mut StackScrollState,
) {
    let block = Block::default()
        .title(" Call Stack ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let content_width = area.width.saturating_sub(2) as usize;
    let mut all_items = Vec::new();

    match data.snapshot {
        None => {
            all_items.push(
                ListItem::new("(no run yet: press Enter)")
                    .style(Style::default().fg(DEFAULT_THEME.comment)),
            );
        }
        Some(snapshot) => {
            if snapshot.stack.is_empty() {
                all_items.push(
                    ListItem::new("(empty)").style(Style::default().fg(DEFAULT_THEME.comment)),
                );
            }

            let top = snapshot.stack.len().saturating_sub(1);
            for (depth, &cell) in snapshot.stack.iter().enumerate() {
                all_items.push(ListItem::new(frame_line(
                    snapshot,
                    depth,
                    cell,
                    depth == top,
                    content_width,
                )));
            }

            all_items.push(ListItem::new(Line::from("")));
            all_items.extend(summary_lines(snapshot).into_iter().map(ListItem::new));
        }
    }

    // Calculate visible range for scrolling
    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    // Smart auto-scroll: follow the top of the stack only when content grows
    if total_items > scroll_state.prev_item_count {
        if total_items > visible_height {
            scroll_state.offset = total_items - visible_height;
        } else {
            scroll_state.offset = 0;
        }
    } else if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        scroll_state.offset = scroll_state.offset.min(max_scroll);
    } else {
        scroll_state.offset = 0;
    }

    scroll_state.prev_item_count = total_items;

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}

fn frame_line(
    snapshot: &Snapshot,
    depth: usize,
    cell: Cell,
    is_top: bool,
    content_width: usize,
) -> Line<'static> {
    let marker_style = if is_top {
        Style::default().fg(DEFAULT_THEME.secondary)
    } else {
        Style::default().fg(DEFAULT_THEME.comment)
    };
    let call_style = if is_top {
        Style::default()
            .fg(DEFAULT_THEME.role_color(snapshot.role_of(cell)))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.stack_cell)
    };

    let header = format!("Frame {} ", depth);
    let call = format!("visit{}", cell);
    let mut spans = vec![
        Span::styled("▸ ", marker_style),
        Span::styled(header.clone(), Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled("│ ", Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(call.clone(), call_style),
    ];

    // Right-align the answer once this frame's cell has resolved
    if let Some(answer) = snapshot.answers.get(&cell) {
        let value = format!("= {}", answer);
        let left_width = 2 + header.chars().count() + 2 + call.chars().count();
        let padding = content_width.saturating_sub(left_width + value.len()).max(1);
        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(Span::styled(value, Style::default().fg(DEFAULT_THEME.number)));
    }

    Line::from(spans)
}

fn summary_lines(snapshot: &Snapshot) -> Vec<Line<'static>> {
    let key_style = Style::default().fg(DEFAULT_THEME.comment);
    let value_style = Style::default().fg(DEFAULT_THEME.fg);
    let format_cell =
        |cell: Option<Cell>| cell.map_or_else(|| "none".to_string(), |c| c.to_string());

    let contributing = if snapshot.contributing.is_empty() {
        "none".to_string()
    } else {
        snapshot
            .contributing
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    };

    let area = snapshot.grid().area();
    let rows = [
        ("event", snapshot.kind.label().to_string()),
        ("current", format_cell(snapshot.current_cell)),
        ("updating", format_cell(snapshot.updating_cell)),
        ("contributing", contributing),
        ("visited", format!("{}/{}", snapshot.visited.len(), area)),
        ("memo hits", snapshot.memo_hits.to_string()),
    ];

    rows.into_iter()
        .map(|(key, value)| {
            Line::from(vec![
                Span::styled(format!("{:<13}", key), key_style),
                Span::styled(value, value_style),
            ])
        })
        .collect()
}
