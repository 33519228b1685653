//! Image-to-animated-bitmap engine.
//!
//! Pipeline, run once per loaded image:
//!
//! 1. **Resampling** - bilinear resize of the photo to the target grid, with
//!    an optional brightness cutoff
//! 2. **Classification** - each cell becomes black, accent, or uncertain
//!
//! and then once per frame:
//!
//! 3. **Dithering** - uncertain cells are re-decided by the configured
//!    [`Algorithm`] and written to the [`FrameBuffer`]

mod classify;
mod error;
mod frame;
mod grid;
mod resample;
mod rng;
mod strategy;

use std::path::Path;

pub use classify::{
    accent_probability, CellState, Classification, ACCENT_RGB, UNCERTAIN_HIGH, UNCERTAIN_LOW,
};
pub use error::EngineError;
pub use frame::{FrameBuffer, ACCENT_RGBA, BLACK_RGBA};
pub use grid::TargetGrid;
pub use resample::{luma, resample, resample_into, CellColor, SourceImage};
pub use rng::{XorShift32, DEFAULT_SEED};
pub use strategy::{
    fill_row_sines, normalized_x, random_decision, wave_decision, wave_threshold, Algorithm,
    CLOCK_STEP,
};

/// Engine parameters, fixed for the lifetime of an [`Engine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DitherSettings {
    pub algorithm: Algorithm,
    /// Brightness cutoff in `[0, 255]`; darker cells are forced to black.
    pub threshold: u8,
    /// Wave/noise blend in `[0, 100]`.
    pub chaos: u8,
    pub seed: u32,
}

impl Default for DitherSettings {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Wave,
            threshold: 40,
            chaos: 10,
            seed: DEFAULT_SEED,
        }
    }
}

/// Loaded state of the engine.
#[derive(Debug)]
struct Prepared {
    classification: Classification,
    frame: FrameBuffer,
    row_sines: Vec<f32>,
}

/// Lifecycle of an [`Engine`].
#[derive(Debug)]
enum EngineState {
    Uninitialized,
    Ready(Prepared),
}

/// Owns everything the animation needs: settings, classification, output
/// buffer, animation clock and RNG.
#[derive(Debug)]
pub struct Engine {
    settings: DitherSettings,
    state: EngineState,
    clock: f32,
    rng: XorShift32,
}

impl Engine {
    /// An engine with no image loaded.
    pub fn new(settings: DitherSettings) -> Self {
        Self {
            settings,
            state: EngineState::Uninitialized,
            clock: 0.0,
            rng: XorShift32::new(settings.seed),
        }
    }

    pub fn settings(&self) -> &DitherSettings {
        &self.settings
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, EngineState::Ready(_))
    }

    /// Animation clock, advanced by [`CLOCK_STEP`] per animated frame.
    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Decode the image at `path` and prepare it for `grid`.
    ///
    /// On failure the engine keeps its previous state.
    pub fn load_path(&mut self, path: &Path, grid: TargetGrid) -> Result<(), EngineError> {
        let decoded = image::open(path).map_err(|source| EngineError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!(
            "Loaded image: {}x{} from {}",
            decoded.width(),
            decoded.height(),
            path.display()
        );
        let source = SourceImage::try_from(decoded.into_rgb8())?;
        self.load_image(&source, grid)
    }

    /// Resample and classify an in-memory image, replacing any previous one.
    ///
    /// The animation clock restarts at zero.
    pub fn load_image(
        &mut self,
        source: &SourceImage,
        grid: TargetGrid,
    ) -> Result<(), EngineError> {
        let cells = resample(source, grid, self.settings.threshold);
        let classification = Classification::from_cells(&cells, grid)?;
        log::info!("Dither resolution: {}x{}", grid.width, grid.height);
        log::info!(
            "Optimized: {} uncertain cells out of {} ({:.1}%)",
            classification.uncertain.len(),
            grid.cells(),
            classification.uncertain_percent()
        );
        self.install(classification);
        Ok(())
    }

    /// Use an existing classification directly.
    ///
    /// The animation clock restarts at zero.
    pub fn load_classification(&mut self, classification: Classification) {
        self.install(classification);
    }

    fn install(&mut self, classification: Classification) {
        let frame = classification.initial_frame();
        let row_sines = Vec::with_capacity(classification.grid.height);
        self.clock = 0.0;
        self.state = EngineState::Ready(Prepared {
            classification,
            frame,
            row_sines,
        });
    }

    /// Classification of the loaded image.
    pub fn classification(&self) -> Result<&Classification, EngineError> {
        match &self.state {
            EngineState::Ready(p) => Ok(&p.classification),
            EngineState::Uninitialized => Err(EngineError::NotReady),
        }
    }

    /// Current frame without advancing the animation.
    pub fn frame(&self) -> Result<&FrameBuffer, EngineError> {
        match &self.state {
            EngineState::Ready(p) => Ok(&p.frame),
            EngineState::Uninitialized => Err(EngineError::NotReady),
        }
    }

    /// Run one dither pass over the uncertain cells and return the frame.
    pub fn next_frame(&mut self) -> Result<&FrameBuffer, EngineError> {
        let prepared = match &mut self.state {
            EngineState::Ready(p) => p,
            EngineState::Uninitialized => return Err(EngineError::NotReady),
        };

        let Prepared {
            classification,
            frame,
            row_sines,
        } = prepared;
        let grid = classification.grid;

        if !self.settings.algorithm.is_animated() {
            return Ok(&*frame);
        }

        match self.settings.algorithm {
            Algorithm::Static => {}
            Algorithm::Random => {
                for &idx in &classification.uncertain {
                    let accent =
                        random_decision(classification.probabilities[idx], &mut self.rng);
                    frame.set_accent(idx, accent);
                }
            }
            Algorithm::Wave => {
                let chaos = self.settings.chaos.min(100) as f32 / 100.0;
                fill_row_sines(row_sines, grid.height, self.clock);
                for &idx in &classification.uncertain {
                    let (x, y) = grid.position(idx);
                    let accent = wave_decision(
                        classification.probabilities[idx],
                        normalized_x(x, grid.width),
                        row_sines[y],
                        chaos,
                        &mut self.rng,
                    );
                    frame.set_accent(idx, accent);
                }
            }
        }

        self.clock += CLOCK_STEP;
        log::trace!(
            "Dithered {} cells, clock {:.3}",
            classification.uncertain.len(),
            self.clock
        );
        Ok(&*frame)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(DitherSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wave_engine(classification: Classification) -> Engine {
        let mut engine = Engine::new(DitherSettings {
            algorithm: Algorithm::Wave,
            threshold: 0,
            chaos: 0,
            seed: DEFAULT_SEED,
        });
        engine.load_classification(classification);
        engine
    }

    #[test]
    fn test_wave_order_independent() {
        let grid = TargetGrid::new(12, 9);
        let n = grid.cells();
        let probabilities = (0..n)
            .map(|i| UNCERTAIN_LOW + (UNCERTAIN_HIGH - UNCERTAIN_LOW) * (i as f32 / n as f32))
            .collect();
        let row_major = Classification::from_probabilities(probabilities, grid).unwrap();

        // Column-major visiting order, so consecutive cells never share a row
        let mut permuted = row_major.clone();
        permuted
            .uncertain
            .sort_by_key(|&idx| (idx % grid.width, idx / grid.width));
        assert_ne!(permuted.uncertain, row_major.uncertain);

        let mut a = wave_engine(row_major);
        let mut b = wave_engine(permuted);
        for _ in 0..10 {
            let fa = a.next_frame().unwrap().clone();
            let fb = b.next_frame().unwrap().clone();
            assert_eq!(fa, fb);
        }
    }

    #[test]
    fn test_load_image_replaces_grid_and_resets_clock() {
        let class = Classification::from_probabilities(vec![0.5; 4], TargetGrid::new(2, 2));
        let mut engine = wave_engine(class.unwrap());
        engine.next_frame().unwrap();

        let source = SourceImage::from_rgb(1, 1, vec![0, 0, 0]).unwrap();
        engine.load_image(&source, TargetGrid::new(3, 1)).unwrap();
        assert_eq!(engine.frame().unwrap().width(), 3);
        assert_eq!(engine.clock(), 0.0);
    }
}
