//! Bilinear resampling from a decoded photo to the target grid.

use super::{EngineError, TargetGrid};

/// Decoded 8-bit RGB raster, row-major, 3 bytes per pixel.
#[derive(Debug, Clone)]
pub struct SourceImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl SourceImage {
    /// Wrap raw RGB bytes.
    ///
    /// # Errors
    /// Returns [`EngineError::EmptyImage`] for a zero-sized raster or a buffer
    /// shorter than `width * height * 3` bytes.
    pub fn from_rgb(width: usize, height: usize, data: Vec<u8>) -> Result<Self, EngineError> {
        if width == 0 || height == 0 || data.len() < width * height * 3 {
            return Err(EngineError::EmptyImage {
                width: width as u32,
                height: height as u32,
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn texel(&self, x: usize, y: usize) -> [f32; 3] {
        let idx = (y * self.width + x) * 3;
        [
            self.data[idx] as f32,
            self.data[idx + 1] as f32,
            self.data[idx + 2] as f32,
        ]
    }
}

impl TryFrom<image::RgbImage> for SourceImage {
    type Error = EngineError;

    fn try_from(img: image::RgbImage) -> Result<Self, Self::Error> {
        let (w, h) = img.dimensions();
        Self::from_rgb(w as usize, h as usize, img.into_raw())
    }
}

/// Float RGB for one grid cell, each channel in `[0, 1]`.
pub type CellColor = [f32; 3];

/// ITU-R BT.601 luma of a normalized color.
#[inline]
pub fn luma(c: CellColor) -> f32 {
    0.299 * c[0] + 0.587 * c[1] + 0.114 * c[2]
}

/// Resample `src` to `grid` with bilinear filtering.
///
/// Cell `(x, y)` samples the source at `(x / W1 * W0, y / H1 * H0)`; the
/// second neighbour is clamped to the last row/column at the image border.
/// Cells whose luma falls below `threshold / 255` are forced to black.
///
/// # Returns
/// One [`CellColor`] per grid cell, row-major.
pub fn resample(src: &SourceImage, grid: TargetGrid, threshold: u8) -> Vec<CellColor> {
    let mut cells = Vec::with_capacity(grid.cells());
    resample_into(src, grid, threshold, &mut cells);
    cells
}

/// Allocation-reusing variant of [`resample`].
pub fn resample_into(
    src: &SourceImage,
    grid: TargetGrid,
    threshold: u8,
    buffer: &mut Vec<CellColor>,
) -> usize {
    buffer.clear();
    if grid.cells() == 0 {
        return 0;
    }
    buffer.reserve(grid.cells());

    let (w0, h0) = (src.width, src.height);
    let cutoff = threshold as f32 / 255.0;

    for sy in 0..grid.height {
        let src_y = sy as f32 / grid.height as f32 * h0 as f32;
        let y0 = (src_y as usize).min(h0 - 1);
        let y1 = if y0 + 1 < h0 { y0 + 1 } else { y0 };
        let fy = src_y - y0 as f32;

        for sx in 0..grid.width {
            let src_x = sx as f32 / grid.width as f32 * w0 as f32;
            let x0 = (src_x as usize).min(w0 - 1);
            let x1 = if x0 + 1 < w0 { x0 + 1 } else { x0 };
            let fx = src_x - x0 as f32;

            let p00 = src.texel(x0, y0);
            let p01 = src.texel(x1, y0);
            let p10 = src.texel(x0, y1);
            let p11 = src.texel(x1, y1);

            let w00 = (1.0 - fx) * (1.0 - fy);
            let w01 = fx * (1.0 - fy);
            let w10 = (1.0 - fx) * fy;
            let w11 = fx * fy;

            let mut color = [0.0f32; 3];
            for (c, out) in color.iter_mut().enumerate() {
                *out = (p00[c] * w00 + p01[c] * w01 + p10[c] * w10 + p11[c] * w11) / 255.0;
            }

            if threshold > 0 && luma(color) < cutoff {
                color = [0.0; 3];
            }

            buffer.push(color);
        }
    }

    grid.cells()
}
