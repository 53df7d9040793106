use thiserror::Error;

/// Largest map the editor will allocate (64M cells).
pub const MAX_CELLS: usize = 1 << 26;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Invalid map size ({width}, {height}): both dimensions must be greater than zero")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Map size ({width}, {height}) is too large")]
    TooLarge { width: u32, height: u32 },
    #[error("Cell ({x}, {y}) is outside the {width}x{height} map")]
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },
    #[error("Expected {expected} cells, got {found}")]
    CellCount { expected: usize, found: usize },
}

/// A `width * height` map of on/off cells stored row-major (`x + width * y`).
///
/// `GridState::default()` is the empty 0x0 map an editing session starts with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridState {
    width: u32,
    height: u32,
    pub cursor_x: u32,
    pub cursor_y: u32,
    cells: Vec<bool>,
}

impl GridState {
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        let len = Self::check_size(width, height)?;

        Ok(Self {
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
            cells: vec![false; len],
        })
    }

    pub fn from_cells(width: u32, height: u32, cells: Vec<bool>) -> Result<Self, GridError> {
        let len = Self::check_size(width, height)?;
        if cells.len() != len {
            return Err(GridError::CellCount { expected: len, found: cells.len() });
        }

        Ok(Self {
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
            cells,
        })
    }

    /// Cell count of a `width * height` map, without allocating it.
    pub fn check_size(width: u32, height: u32) -> Result<usize, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        match (width as usize).checked_mul(height as usize) {
            Some(len) if len <= MAX_CELLS => Ok(len),
            _ => Err(GridError::TooLarge { width, height }),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Flat index of `(x, y)`. Callers check bounds first.
    pub fn index(&self, x: u32, y: u32) -> usize {
        x as usize + self.width as usize * y as usize
    }

    pub fn move_cursor(&mut self, dx: i32, dy: i32) {
        if self.is_empty() {
            return;
        }
        let new_x = (self.cursor_x as i64 + dx as i64).max(0) as u32;
        let new_y = (self.cursor_y as i64 + dy as i64).max(0) as u32;

        self.cursor_x = new_x.min(self.width - 1);
        self.cursor_y = new_y.min(self.height - 1);
    }

    /// Flips one cell and moves the cursor onto it. Returns the new state.
    pub fn toggle_cell_at(&mut self, x: u32, y: u32) -> Result<bool, GridError> {
        if !self.contains(x, y) {
            return Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        let index = self.index(x, y);
        self.cells[index] = !self.cells[index];
        self.cursor_x = x;
        self.cursor_y = y;
        Ok(self.cells[index])
    }

    pub fn toggle_cell(&mut self) -> Result<bool, GridError> {
        self.toggle_cell_at(self.cursor_x, self.cursor_y)
    }

    pub fn get_cell(&self, x: u32, y: u32) -> bool {
        if self.contains(x, y) {
            return self.cells[self.index(x, y)];
        }
        false
    }

    /// The value written to a map file: 1 for on, 0 for off.
    pub fn cell_value(&self, x: u32, y: u32) -> u8 {
        u8::from(self.get_cell(x, y))
    }

    pub fn row(&self, y: u32) -> &[bool] {
        let start = self.index(0, y);
        &self.cells[start..start + self.width as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_off() {
        let grid = GridState::new(5, 3).unwrap();
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.cells().len(), 15);
        assert!(grid.cells().iter().all(|&cell| !cell));
        assert_eq!((grid.cursor_x, grid.cursor_y), (0, 0));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            GridState::new(0, 4),
            Err(GridError::InvalidDimensions { width: 0, height: 4 })
        );
        assert!(GridState::new(4, 0).is_err());
        assert!(GridState::default().is_empty());
    }

    #[test]
    fn huge_maps_are_refused_without_allocating() {
        assert_eq!(
            GridState::new(u32::MAX, u32::MAX),
            Err(GridError::TooLarge { width: u32::MAX, height: u32::MAX })
        );
        assert!(GridState::check_size(1 << 13, 1 << 13).is_ok());
        assert!(GridState::check_size((1 << 13) + 1, 1 << 13).is_err());
    }

    #[test]
    fn index_is_column_plus_width_times_row() {
        let grid = GridState::new(4, 3).unwrap();
        assert_eq!(grid.index(0, 0), 0);
        assert_eq!(grid.index(1, 0), 1);
        assert_eq!(grid.index(0, 1), 4);
        assert_eq!(grid.index(3, 2), 11);
    }

    #[test]
    fn toggling_twice_restores_the_cell() {
        let mut grid = GridState::new(3, 3).unwrap();
        assert_eq!(grid.toggle_cell_at(2, 1), Ok(true));
        assert_eq!(grid.cell_value(2, 1), 1);
        assert_eq!(grid.cells().iter().filter(|&&cell| cell).count(), 1);
        assert_eq!(grid.toggle_cell_at(2, 1), Ok(false));
        assert_eq!(grid, GridState { cursor_x: 2, cursor_y: 1, ..GridState::new(3, 3).unwrap() });
    }

    #[test]
    fn out_of_range_toggle_changes_nothing() {
        let mut grid = GridState::new(2, 2).unwrap();
        let before = grid.clone();
        assert!(matches!(grid.toggle_cell_at(2, 0), Err(GridError::OutOfBounds { .. })));
        assert!(grid.toggle_cell_at(0, 2).is_err());
        assert_eq!(grid, before);
    }

    #[test]
    fn cursor_is_clamped_to_the_grid() {
        let mut grid = GridState::new(3, 2).unwrap();
        grid.move_cursor(-5, -5);
        assert_eq!((grid.cursor_x, grid.cursor_y), (0, 0));
        grid.move_cursor(10, 10);
        assert_eq!((grid.cursor_x, grid.cursor_y), (2, 1));
        assert_eq!(grid.toggle_cell(), Ok(true));
        assert!(grid.get_cell(2, 1));
    }

    #[test]
    fn from_cells_checks_length() {
        assert!(GridState::from_cells(2, 1, vec![true, false]).is_ok());
        assert_eq!(
            GridState::from_cells(2, 2, vec![true]),
            Err(GridError::CellCount { expected: 4, found: 1 })
        );
    }

    #[test]
    fn rows_are_contiguous_slices() {
        let mut grid = GridState::new(3, 2).unwrap();
        grid.toggle_cell_at(1, 1).unwrap();
        assert_eq!(grid.row(0), &[false, false, false]);
        assert_eq!(grid.row(1), &[false, true, false]);
    }
}
