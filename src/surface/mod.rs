//! Presentation surfaces for dithered frames.
//!
//! A [`Surface`] owns whatever the host environment needs to show pixels
//! (a desktop window, a terminal) and is the only part of the program that
//! talks to it. The engine hands it a read-only [`FrameBuffer`] once per
//! produced frame.

pub mod terminal;
#[cfg(feature = "window")]
pub mod window;

use std::time::Duration;

use crate::dither::FrameBuffer;

pub use terminal::TerminalSurface;
#[cfg(feature = "window")]
pub use window::WindowSurface;

/// Errors raised while opening or drawing to a surface.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[cfg(feature = "window")]
    #[error("Window error: {0}")]
    Window(#[from] minifb::Error),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Window output is not available in this build (enable the `window` feature)")]
    Unsupported,
}

/// Host-side collaborator of the frame loop.
pub trait Surface {
    /// Drawable size in surface pixels.
    fn size(&self) -> (usize, usize);

    /// Show `frame`, magnifying every cell to `block_size x block_size`.
    fn present(&mut self, frame: &FrameBuffer, block_size: usize) -> Result<(), SurfaceError>;

    /// Process pending input without blocking. Returns `false` once the
    /// surface has been closed.
    fn poll_events(&mut self) -> bool;

    /// Monotonic time since the surface was created.
    fn now(&self) -> Duration;

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Pack RGBA as `0x00RRGGBB`.
#[inline]
pub fn pack_0rgb(rgba: [u8; 4]) -> u32 {
    ((rgba[0] as u32) << 16) | ((rgba[1] as u32) << 8) | rgba[2] as u32
}

/// Nearest-neighbour upscale of `frame` into a `width x height` pixel buffer.
///
/// Surface pixel `(x, y)` shows cell `(x / block, y / block)`; pixels past the
/// last full block repeat the last column/row. `pack` converts each RGBA cell
/// into the surface's native pixel format.
///
/// # Returns
/// The number of pixels written (`width * height`).
pub fn magnify<F>(
    frame: &FrameBuffer,
    block_size: usize,
    width: usize,
    height: usize,
    buffer: &mut Vec<u32>,
    pack: F,
) -> usize
where
    F: Fn([u8; 4]) -> u32,
{
    buffer.clear();
    if frame.width() == 0 || frame.height() == 0 {
        buffer.resize(width * height, 0);
        return buffer.len();
    }
    buffer.reserve(width * height);

    let block = block_size.max(1);
    let mut row = Vec::with_capacity(width);
    for y in 0..height {
        // Rows inside one block are identical, so only repack on a new cell row
        if y % block == 0 || row.is_empty() {
            row.clear();
            let cy = y / block;
            row.extend((0..width).map(|x| pack(frame.cell_clamped(x / block, cy))));
        }
        buffer.extend_from_slice(&row);
    }

    buffer.len()
}
