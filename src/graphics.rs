use pixels::{Pixels, SurfaceTexture};
use winit::window::Window;

use crate::layout::CellRect;
use crate::render::{Canvas, RenderError, Rgba};

/// Map viewer surface. The `pixels` frame is the off-screen buffer; nothing
/// reaches the window until `present`.
pub struct GraphicsRenderer {
    pixels: Pixels,
    width: u32,
    height: u32,
}

impl GraphicsRenderer {
    pub fn new(window: &Window) -> Result<Self, pixels::Error> {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, window);
        let pixels = Pixels::new(window_size.width, window_size.height, surface_texture)?;

        Ok(Self {
            pixels,
            width: window_size.width,
            height: window_size.height,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        // Minimized windows report 0x0; keep the old buffer until restored.
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;

        if let Err(err) = self.pixels.resize_surface(width, height) {
            log::error!("Failed to resize surface: {}", err);
        }
        if let Err(err) = self.pixels.resize_buffer(width, height) {
            log::error!("Failed to resize buffer: {}", err);
        }
    }
}

impl Canvas for GraphicsRenderer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgba) {
        for pixel in self.pixels.frame_mut().chunks_exact_mut(4) {
            pixel.copy_from_slice(&color);
        }
    }

    fn fill_rects(&mut self, color: Rgba, rects: &[CellRect]) {
        // Copy the size out before borrowing the frame mutably
        let (width, height) = (self.width, self.height);
        let frame = self.pixels.frame_mut();
        for rect in rects {
            fill_square(frame, width, height, *rect, color);
        }
    }

    // Swap the finished frame onto the window
    fn present(&mut self) -> Result<(), RenderError> {
        Ok(self.pixels.render()?)
    }
}

/// Fills one square of an RGBA frame, clipped to the frame.
pub fn fill_square(frame: &mut [u8], width: u32, height: u32, rect: CellRect, color: Rgba) {
    if rect.side <= 0 || rect.x >= width || rect.y >= height {
        return;
    }
    let side = rect.side.min(u32::MAX as i64) as u32;
    let x_end = rect.x.saturating_add(side).min(width);
    let y_end = rect.y.saturating_add(side).min(height);

    // One contiguous slice per row
    for py in rect.y..y_end {
        let row_start = (py as usize * width as usize + rect.x as usize) * 4;
        let row_end = (py as usize * width as usize + x_end as usize) * 4;
        // Frame smaller than the recorded size (mid-resize)
        if row_end > frame.len() {
            return;
        }
        for pixel in frame[row_start..row_end].chunks_exact_mut(4) {
            pixel.copy_from_slice(&color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = [255, 0, 0, 255];

    fn painted(frame: &[u8], width: u32) -> Vec<(u32, u32)> {
        frame
            .chunks_exact(4)
            .enumerate()
            .filter(|(_, pixel)| *pixel == RED)
            .map(|(i, _)| (i as u32 % width, i as u32 / width))
            .collect()
    }

    #[test]
    fn fills_exactly_the_square() {
        let mut frame = vec![0u8; 4 * 4 * 4];
        fill_square(&mut frame, 4, 4, CellRect { x: 1, y: 2, side: 2 }, RED);
        assert_eq!(painted(&frame, 4), vec![(1, 2), (2, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn clips_at_the_frame_edge() {
        let mut frame = vec![0u8; 3 * 3 * 4];
        fill_square(&mut frame, 3, 3, CellRect { x: 2, y: 2, side: 5 }, RED);
        assert_eq!(painted(&frame, 3), vec![(2, 2)]);
    }

    #[test]
    fn non_positive_side_draws_nothing() {
        let mut frame = vec![0u8; 2 * 2 * 4];
        fill_square(&mut frame, 2, 2, CellRect { x: 0, y: 0, side: 0 }, RED);
        fill_square(&mut frame, 2, 2, CellRect { x: 0, y: 0, side: -1 }, RED);
        fill_square(&mut frame, 2, 2, CellRect { x: 5, y: 0, side: 1 }, RED);
        assert!(painted(&frame, 2).is_empty());
    }
}
