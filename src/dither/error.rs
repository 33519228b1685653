//! Dither engine error types

use std::path::PathBuf;

/// Errors that can occur while loading an image or producing frames.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Failed to load image '{}': {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error(
        "Surface {surface_width}x{surface_height} is smaller than one {block_size}x{block_size} block"
    )]
    EmptyGrid {
        surface_width: usize,
        surface_height: usize,
        block_size: usize,
    },

    #[error("Expected {expected} cells for the grid, got {actual}")]
    CellCount { expected: usize, actual: usize },

    #[error("Accent probability {value} at cell {index} is outside [0, 1]")]
    InvalidProbability { index: usize, value: f32 },

    #[error("Dither engine has no image loaded")]
    NotReady,
}
