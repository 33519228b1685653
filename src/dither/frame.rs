//! RGBA output buffer for the target grid.

use super::TargetGrid;

/// Fixed black, RGBA.
pub const BLACK_RGBA: [u8; 4] = [0, 0, 0, 255];

/// Fixed accent (orange, 255/140/0), RGBA.
pub const ACCENT_RGBA: [u8; 4] = [255, 140, 0, 255];

/// Row-major RGBA bytes, 4 per grid cell.
///
/// Only the engine holds `&mut` access; surfaces read it through
/// [`FrameBuffer::as_bytes`] or [`FrameBuffer::cell`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl FrameBuffer {
    /// A buffer for `grid`, filled with black.
    pub fn new(grid: TargetGrid) -> Self {
        let mut pixels = Vec::with_capacity(grid.cells() * 4);
        for _ in 0..grid.cells() {
            pixels.extend_from_slice(&BLACK_RGBA);
        }
        Self {
            width: grid.width,
            height: grid.height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA of the cell at a row-major index.
    #[inline]
    pub fn cell(&self, index: usize) -> [u8; 4] {
        let o = index * 4;
        [
            self.pixels[o],
            self.pixels[o + 1],
            self.pixels[o + 2],
            self.pixels[o + 3],
        ]
    }

    /// RGBA at `(x, y)`; coordinates past the edge clamp to the last column/row.
    #[inline]
    pub fn cell_clamped(&self, x: usize, y: usize) -> [u8; 4] {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        self.cell(y * self.width + x)
    }

    #[inline]
    pub(crate) fn set_cell(&mut self, index: usize, rgba: &[u8; 4]) {
        let o = index * 4;
        self.pixels[o..o + 4].copy_from_slice(rgba);
    }

    /// Write either the accent or the black constant.
    #[inline]
    pub(crate) fn set_accent(&mut self, index: usize, accent: bool) {
        self.set_cell(index, if accent { &ACCENT_RGBA } else { &BLACK_RGBA });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_black() {
        let fb = FrameBuffer::new(TargetGrid::new(3, 2));
        assert_eq!(fb.as_bytes().len(), 3 * 2 * 4);
        for i in 0..6 {
            assert_eq!(fb.cell(i), BLACK_RGBA);
        }
    }

    #[test]
    fn test_set_accent_only_touches_one_cell() {
        let mut fb = FrameBuffer::new(TargetGrid::new(3, 1));
        fb.set_accent(1, true);
        assert_eq!(fb.cell(0), BLACK_RGBA);
        assert_eq!(fb.cell(1), ACCENT_RGBA);
        assert_eq!(fb.cell(2), BLACK_RGBA);
        fb.set_accent(1, false);
        assert_eq!(fb.cell(1), BLACK_RGBA);
    }

    #[test]
    fn test_cell_clamped() {
        let mut fb = FrameBuffer::new(TargetGrid::new(2, 2));
        fb.set_accent(3, true);
        assert_eq!(fb.cell_clamped(1, 1), ACCENT_RGBA);
        assert_eq!(fb.cell_clamped(5, 9), ACCENT_RGBA);
        assert_eq!(fb.cell_clamped(0, 9), BLACK_RGBA);
    }
}
