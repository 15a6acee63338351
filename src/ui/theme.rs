use crate::snapshot::CellRole;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub cell_text: Color,
    pub updating_cell: Color,
    pub current_cell: Color,
    pub stack_cell: Color,
    pub contributing_cell: Color,
    pub visited_cell: Color,
    pub unvisited_cell: Color,
}

impl Theme {
    /// Background color for a cell in the given role
    pub fn role_color(&self, role: CellRole) -> Color {
        match role {
            CellRole::Updating => self.updating_cell,
            CellRole::Current => self.current_cell,
            CellRole::Stack => self.stack_cell,
            CellRole::Contributing => self.contributing_cell,
            CellRole::Visited => self.visited_cell,
            CellRole::Unvisited => self.unvisited_cell,
        }
    }
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for status bar
    cell_text: Color::Black,
    updating_cell: Color::Rgb(255, 77, 77),      // #FF4D4D
    current_cell: Color::Rgb(50, 205, 50),       // #32CD32
    stack_cell: Color::Rgb(30, 144, 255),        // #1E90FF
    contributing_cell: Color::Rgb(255, 215, 0),  // #FFD700
    visited_cell: Color::Rgb(147, 112, 219),     // #9370DB
    unvisited_cell: Color::Rgb(255, 255, 255),   // #FFFFFF
};
