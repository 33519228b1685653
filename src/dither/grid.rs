//! Target grid dimensions.

use super::EngineError;

/// The coarse cell grid the animation runs on.
///
/// Each cell covers a `block_size x block_size` square of the presentation
/// surface. Dimensions use integer division, so a partial block at the right
/// or bottom edge does not get a cell of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetGrid {
    pub width: usize,
    pub height: usize,
}

impl TargetGrid {
    /// Build a grid directly from cell counts.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Derive the grid from a surface size and block size.
    ///
    /// # Errors
    /// Returns [`EngineError::EmptyGrid`] when the surface is smaller than a
    /// single block in either direction.
    pub fn from_surface(
        surface_width: usize,
        surface_height: usize,
        block_size: usize,
    ) -> Result<Self, EngineError> {
        let block = block_size.max(1);
        let width = surface_width / block;
        let height = surface_height / block;
        if width == 0 || height == 0 {
            return Err(EngineError::EmptyGrid {
                surface_width,
                surface_height,
                block_size: block,
            });
        }
        Ok(Self { width, height })
    }

    /// Total number of cells.
    #[inline]
    pub fn cells(&self) -> usize {
        self.width * self.height
    }

    /// Column and row of a row-major cell index.
    #[inline]
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }
}
