use crate::grid::{GridError, GridState};

/// Drawing tool applied to pointer clicks on the map.
///
/// Only `Pen` edits the map. `Line` and `Rectangle` can be selected but do
/// not draw yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Pen,
    Line,
    Rectangle,
    None,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Tool::Pen, Tool::Line, Tool::Rectangle, Tool::None];

    pub fn label(self) -> &'static str {
        match self {
            Tool::Pen => "Pen",
            Tool::Line => "Line",
            Tool::Rectangle => "Rectangle",
            Tool::None => "None",
        }
    }

    pub fn edits_cells(self) -> bool {
        matches!(self, Tool::Pen)
    }

    /// Applies a click on cell `(x, y)`. Returns whether the map changed.
    pub fn apply_click(self, grid: &mut GridState, x: u32, y: u32) -> Result<bool, GridError> {
        match self {
            Tool::Pen => {
                let on = grid.toggle_cell_at(x, y)?;
                log::debug!("Toggled ({}, {}) -> {}", x, y, u8::from(on));
                Ok(true)
            }
            Tool::Line | Tool::Rectangle => {
                log::debug!("{} tool does not draw yet; click at ({}, {}) ignored", self.label(), x, y);
                Ok(false)
            }
            Tool::None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pen_toggles_the_clicked_cell() {
        let mut grid = GridState::new(2, 2).unwrap();
        assert_eq!(Tool::Pen.apply_click(&mut grid, 1, 0), Ok(true));
        assert!(grid.get_cell(1, 0));
    }

    #[test]
    fn other_tools_leave_the_map_alone() {
        for tool in [Tool::Line, Tool::Rectangle, Tool::None] {
            let mut grid = GridState::new(2, 2).unwrap();
            assert_eq!(tool.apply_click(&mut grid, 1, 0), Ok(false));
            assert_eq!(grid, GridState::new(2, 2).unwrap());
            assert!(!tool.edits_cells());
        }
    }

    #[test]
    fn default_tool_is_pen() {
        assert_eq!(Tool::default(), Tool::Pen);
        assert_eq!(Tool::ALL.map(Tool::label), ["Pen", "Line", "Rectangle", "None"]);
    }
}
