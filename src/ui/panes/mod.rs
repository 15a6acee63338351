//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`grid`]: the N×N grid, one colored block per cell with its resolved count
//! - [`legend`]: color key for the cell roles
//! - [`stack`]: the traversal's call stack, innermost call first
//! - [`status`]: status bar with keybindings and playback state
//!
//! Each pane module exports a primary `render_*` function and, where the pane
//! needs more than a couple of inputs, a `*RenderData` struct.

pub mod grid;
pub mod legend;
pub mod stack;
pub mod status;

pub use grid::{render_grid_pane, GridRenderData};
pub use legend::render_legend;
pub use stack::{render_stack_pane, StackRenderData, StackScrollState};
pub use status::{render_status_bar, StatusRenderData};

use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

/// Border style shared by focusable panes
pub(crate) fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}
