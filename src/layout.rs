//! Pixel geometry shared by the renderer and pointer picking.
//!
//! Cells are laid out as squares sized by the ruler, the larger of the two
//! grid dimensions, so a non-square map leaves unused space along one edge.

/// A square cell on screen. `side` can be zero or negative when the surface
/// is narrower than the ruler; such cells are simply not visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub side: i64,
}

pub fn ruler(grid_width: u32, grid_height: u32) -> u32 {
    grid_width.max(grid_height)
}

/// Side of every cell. Both axes use the surface width.
pub fn cell_side(surface_width: u32, ruler: u32) -> i64 {
    if ruler == 0 {
        return 0;
    }
    (surface_width / ruler) as i64 - 1
}

pub fn cell_origin(x: u32, y: u32, surface_width: u32, surface_height: u32, ruler: u32) -> (u32, u32) {
    if ruler == 0 {
        return (0, 0);
    }
    let px = surface_width as u64 * x as u64 / ruler as u64;
    let py = surface_height as u64 * y as u64 / ruler as u64;
    (px as u32, py as u32)
}

pub fn cell_rect(x: u32, y: u32, surface_width: u32, surface_height: u32, ruler: u32) -> CellRect {
    let (px, py) = cell_origin(x, y, surface_width, surface_height, ruler);
    CellRect {
        x: px,
        y: py,
        side: cell_side(surface_width, ruler),
    }
}

/// Maps a pointer position on the surface to the grid cell it falls in.
pub fn pick_cell(
    px: f64,
    py: f64,
    surface_width: u32,
    surface_height: u32,
    grid_width: u32,
    grid_height: u32,
) -> Option<(u32, u32)> {
    if grid_width == 0 || grid_height == 0 || surface_width == 0 || surface_height == 0 {
        return None;
    }
    if !(px >= 0.0 && py >= 0.0) {
        return None;
    }

    // `as u64` saturates for huge pointer values; the bounds check below rejects those.
    let x = (px as u64).saturating_mul(grid_width as u64) / surface_width as u64;
    let y = (py as u64).saturating_mul(grid_height as u64) / surface_height as u64;

    if x < grid_width as u64 && y < grid_height as u64 {
        Some((x as u32, y as u32))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ruler_is_the_larger_dimension() {
        assert_eq!(ruler(3, 7), 7);
        assert_eq!(ruler(9, 2), 9);
    }

    #[test]
    fn cells_leave_a_one_pixel_gap() {
        assert_eq!(cell_side(787, 10), 77);
        assert_eq!(cell_rect(3, 2, 787, 787, 10), CellRect { x: 236, y: 157, side: 77 });
    }

    #[test]
    fn small_surfaces_degrade_to_invisible_cells() {
        assert_eq!(cell_side(100, 100), 0);
        assert_eq!(cell_side(100, 200), -1);
    }

    #[test]
    fn non_square_grid_uses_the_ruler_on_both_axes() {
        // 4x2 grid on 400x400: cells are 100px wide, rows stop halfway down.
        assert_eq!(cell_origin(3, 1, 400, 400, ruler(4, 2)), (300, 100));
    }

    #[test]
    fn corners_map_to_corner_cells() {
        assert_eq!(pick_cell(0.0, 0.0, 787, 787, 10, 6), Some((0, 0)));
        assert_eq!(pick_cell(786.0, 786.0, 787, 787, 10, 6), Some((9, 5)));
        assert_eq!(pick_cell(786.9, 786.9, 787, 787, 10, 6), Some((9, 5)));
    }

    #[test]
    fn points_outside_the_surface_are_ignored() {
        assert_eq!(pick_cell(787.0, 10.0, 787, 787, 10, 10), None);
        assert_eq!(pick_cell(-1.0, 10.0, 787, 787, 10, 10), None);
        assert_eq!(pick_cell(f64::NAN, 10.0, 787, 787, 10, 10), None);
        assert_eq!(pick_cell(f64::MAX, 10.0, 787, 787, 10, 10), None);
        assert_eq!(pick_cell(10.0, 1e30, 787, 787, 10, 10), None);
    }

    #[test]
    fn empty_grid_picks_nothing() {
        assert_eq!(pick_cell(5.0, 5.0, 787, 787, 0, 0), None);
        assert_eq!(pick_cell(5.0, 5.0, 0, 787, 4, 4), None);
    }
}
