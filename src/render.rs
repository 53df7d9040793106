use thiserror::Error;

use crate::grid::GridState;
use crate::layout::{self, CellRect};

pub type Rgba = [u8; 4];

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to present frame: {0}")]
    Present(#[from] pixels::Error),
}

/// A drawing surface backed by an off-screen buffer.
pub trait Canvas {
    fn size(&self) -> (u32, u32);
    fn clear(&mut self, color: Rgba);
    fn fill_rects(&mut self, color: Rgba, rects: &[CellRect]);
    /// Shows everything drawn since the last call in one step.
    fn present(&mut self) -> Result<(), RenderError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub on: Rgba,
    pub off: Rgba,
    pub background: Rgba,
    pub cursor: Option<Rgba>,
}

const CURSOR_THICKNESS: i64 = 2;

/// Draws the map and presents it. All on cells go out in one fill call,
/// then all off cells in a second one.
pub fn render_grid<C: Canvas + ?Sized>(
    canvas: &mut C,
    grid: &GridState,
    palette: &Palette,
) -> Result<(), RenderError> {
    canvas.clear(palette.background);

    if !grid.is_empty() {
        let (surface_width, surface_height) = canvas.size();
        let ruler = layout::ruler(grid.width(), grid.height());

        let mut on_rects = Vec::new();
        let mut off_rects = Vec::new();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let rect = layout::cell_rect(x, y, surface_width, surface_height, ruler);
                if grid.get_cell(x, y) {
                    on_rects.push(rect);
                } else {
                    off_rects.push(rect);
                }
            }
        }

        if !on_rects.is_empty() {
            canvas.fill_rects(palette.on, &on_rects);
        }
        if !off_rects.is_empty() {
            canvas.fill_rects(palette.off, &off_rects);
        }

        if let Some(color) = palette.cursor {
            let cell = layout::cell_rect(grid.cursor_x, grid.cursor_y, surface_width, surface_height, ruler);
            let outline = cursor_outline(cell);
            if !outline.is_empty() {
                canvas.fill_rects(color, &outline);
            }
        }
    }

    canvas.present()
}

/// Four thin squares along the edges of `cell`. Squares are the only shape a
/// canvas fills, so each edge is a row of them.
fn cursor_outline(cell: CellRect) -> Vec<CellRect> {
    if cell.side <= CURSOR_THICKNESS * 2 {
        return Vec::new();
    }

    let far = (cell.side - CURSOR_THICKNESS) as u32;
    let mut rects = Vec::new();
    let mut offset = 0;
    while offset < cell.side as u32 {
        rects.push(CellRect { x: cell.x + offset, y: cell.y, side: CURSOR_THICKNESS });
        rects.push(CellRect { x: cell.x + offset, y: cell.y + far, side: CURSOR_THICKNESS });
        rects.push(CellRect { x: cell.x, y: cell.y + offset, side: CURSOR_THICKNESS });
        rects.push(CellRect { x: cell.x + far, y: cell.y + offset, side: CURSOR_THICKNESS });
        offset += CURSOR_THICKNESS as u32;
    }
    rects
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear(Rgba),
        Fill(Rgba, Vec<CellRect>),
        Present,
    }

    struct RecordingCanvas {
        width: u32,
        height: u32,
        ops: Vec<Op>,
    }

    impl RecordingCanvas {
        fn new(width: u32, height: u32) -> Self {
            Self { width, height, ops: Vec::new() }
        }

        fn fills(&self) -> Vec<&Op> {
            self.ops.iter().filter(|op| matches!(op, Op::Fill(..))).collect()
        }
    }

    impl Canvas for RecordingCanvas {
        fn size(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        fn clear(&mut self, color: Rgba) {
            self.ops.push(Op::Clear(color));
        }

        fn fill_rects(&mut self, color: Rgba, rects: &[CellRect]) {
            self.ops.push(Op::Fill(color, rects.to_vec()));
        }

        fn present(&mut self) -> Result<(), RenderError> {
            self.ops.push(Op::Present);
            Ok(())
        }
    }

    const ON: Rgba = [0, 128, 0, 255];
    const OFF: Rgba = [169, 169, 169, 255];
    const BLACK: Rgba = [0, 0, 0, 255];

    fn palette() -> Palette {
        Palette { on: ON, off: OFF, background: BLACK, cursor: None }
    }

    #[test]
    fn empty_grid_draws_no_cells() {
        let mut canvas = RecordingCanvas::new(100, 100);
        render_grid(&mut canvas, &GridState::default(), &palette()).unwrap();
        assert!(canvas.fills().is_empty());
        assert_eq!(canvas.ops, vec![Op::Clear(BLACK), Op::Present]);
    }

    #[test]
    fn on_cells_are_drawn_before_off_cells() {
        let mut grid = GridState::new(2, 2).unwrap();
        grid.toggle_cell_at(1, 0).unwrap();

        let mut canvas = RecordingCanvas::new(100, 100);
        render_grid(&mut canvas, &grid, &palette()).unwrap();

        assert_eq!(
            canvas.ops,
            vec![
                Op::Clear(BLACK),
                Op::Fill(ON, vec![CellRect { x: 50, y: 0, side: 49 }]),
                Op::Fill(
                    OFF,
                    vec![
                        CellRect { x: 0, y: 0, side: 49 },
                        CellRect { x: 0, y: 50, side: 49 },
                        CellRect { x: 50, y: 50, side: 49 },
                    ]
                ),
                Op::Present,
            ]
        );
    }

    #[test]
    fn all_off_grid_skips_the_on_pass() {
        let grid = GridState::new(3, 1).unwrap();
        let mut canvas = RecordingCanvas::new(90, 90);
        render_grid(&mut canvas, &grid, &palette()).unwrap();

        let fills = canvas.fills();
        assert_eq!(fills.len(), 1);
        assert!(matches!(fills[0], Op::Fill(color, rects) if *color == OFF && rects.len() == 3));
    }

    #[test]
    fn cursor_outline_is_drawn_last() {
        let grid = GridState::new(2, 2).unwrap();
        let mut canvas = RecordingCanvas::new(100, 100);
        let palette = Palette { cursor: Some([255, 255, 255, 255]), ..palette() };
        render_grid(&mut canvas, &grid, &palette).unwrap();

        let fills = canvas.fills();
        assert_eq!(fills.len(), 2);
        match fills[1] {
            Op::Fill(color, rects) => {
                assert_eq!(*color, [255, 255, 255, 255]);
                assert!(rects.iter().all(|r| r.x < 49 && r.y < 49));
            }
            other => panic!("unexpected op {other:?}"),
        }
    }

    #[test]
    fn tiny_cells_get_no_cursor_outline() {
        assert!(cursor_outline(CellRect { x: 0, y: 0, side: 3 }).is_empty());
        assert!(!cursor_outline(CellRect { x: 0, y: 0, side: 10 }).is_empty());
    }
}
