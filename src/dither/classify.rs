//! Per-cell color classification.
//!
//! Each resampled cell is scored by how close it sits to the accent color
//! relative to black. Confident cells are fixed once; the rest form the
//! uncertain set that the animation re-decides every frame.

use super::resample::CellColor;
use super::{EngineError, FrameBuffer, TargetGrid};

/// Accent color in normalized RGB (255, 140, 0).
pub const ACCENT_RGB: CellColor = [1.0, 0.549, 0.0];

/// Below this probability a cell is fixed black.
pub const UNCERTAIN_LOW: f32 = 0.3;

/// Above this probability a cell is fixed accent.
pub const UNCERTAIN_HIGH: f32 = 0.7;

/// Distance sums at or below this are treated as undefined color.
const DEGENERATE_DISTANCE: f32 = 0.001;

/// Certainty category of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Black,
    Accent,
    Uncertain,
}

impl CellState {
    /// Partition `[0, 1]`: strict outer bands, inclusive middle band.
    pub fn from_probability(prob: f32) -> Self {
        if prob < UNCERTAIN_LOW {
            CellState::Black
        } else if prob > UNCERTAIN_HIGH {
            CellState::Accent
        } else {
            CellState::Uncertain
        }
    }
}

/// Probability that a cell should be shown in the accent color.
///
/// `dist_black / (dist_black + dist_accent)`, or 0.5 when both distances
/// are (nearly) zero.
pub fn accent_probability(c: CellColor) -> f32 {
    let dist_black = (c[0] * c[0] + c[1] * c[1] + c[2] * c[2]).sqrt();
    let dr = c[0] - ACCENT_RGB[0];
    let dg = c[1] - ACCENT_RGB[1];
    let db = c[2] - ACCENT_RGB[2];
    let dist_accent = (dr * dr + dg * dg + db * db).sqrt();

    let total = dist_black + dist_accent;
    if total > DEGENERATE_DISTANCE {
        dist_black / total
    } else {
        0.5
    }
}

fn check_cell_count(actual: usize, grid: TargetGrid) -> Result<(), EngineError> {
    let expected = grid.cells();
    if actual == expected {
        Ok(())
    } else {
        Err(EngineError::CellCount { expected, actual })
    }
}

/// Result of classifying a resampled grid.
///
/// Built only through [`Classification::from_cells`] or
/// [`Classification::from_probabilities`], so every listed uncertain cell is
/// in range, in row-major order and really uncertain.
#[derive(Debug, Clone)]
pub struct Classification {
    pub(super) grid: TargetGrid,
    pub(super) states: Vec<CellState>,
    pub(super) probabilities: Vec<f32>,
    pub(super) uncertain: Vec<usize>,
}

impl Classification {
    /// Classify `cells` (row-major, one per grid cell).
    ///
    /// # Errors
    /// Returns [`EngineError::CellCount`] when `cells` does not cover the grid.
    pub fn from_cells(cells: &[CellColor], grid: TargetGrid) -> Result<Self, EngineError> {
        check_cell_count(cells.len(), grid)?;
        Ok(Self::build(
            grid,
            cells.iter().map(|&c| accent_probability(c)).collect(),
        ))
    }

    /// Classify precomputed accent probabilities (row-major, one per cell).
    ///
    /// # Errors
    /// Returns [`EngineError::CellCount`] on a length mismatch and
    /// [`EngineError::InvalidProbability`] for values outside `[0, 1]`.
    pub fn from_probabilities(
        probabilities: Vec<f32>,
        grid: TargetGrid,
    ) -> Result<Self, EngineError> {
        check_cell_count(probabilities.len(), grid)?;
        if let Some((index, &value)) = probabilities
            .iter()
            .enumerate()
            .find(|(_, p)| !(0.0..=1.0).contains(*p))
        {
            return Err(EngineError::InvalidProbability { index, value });
        }
        Ok(Self::build(grid, probabilities))
    }

    fn build(grid: TargetGrid, probabilities: Vec<f32>) -> Self {
        let mut states = Vec::with_capacity(probabilities.len());
        let mut uncertain = Vec::with_capacity(probabilities.len() / 4);

        for (idx, &prob) in probabilities.iter().enumerate() {
            let state = CellState::from_probability(prob);
            if state == CellState::Uncertain {
                uncertain.push(idx);
            }
            states.push(state);
        }

        Self {
            grid,
            states,
            probabilities,
            uncertain,
        }
    }

    pub fn grid(&self) -> TargetGrid {
        self.grid
    }

    /// Per-cell state, row-major.
    pub fn states(&self) -> &[CellState] {
        &self.states
    }

    /// Accent probability per cell; meaningful only for uncertain cells.
    pub fn probabilities(&self) -> &[f32] {
        &self.probabilities
    }

    /// Indices of uncertain cells in row-major order.
    pub fn uncertain(&self) -> &[usize] {
        &self.uncertain
    }

    /// Fraction of cells that are uncertain, in percent.
    pub fn uncertain_percent(&self) -> f32 {
        if self.states.is_empty() {
            return 0.0;
        }
        100.0 * self.uncertain.len() as f32 / self.states.len() as f32
    }

    /// Initial frame: fixed cells get their color, uncertain cells the
    /// nearer of the two colors.
    pub fn initial_frame(&self) -> FrameBuffer {
        let mut frame = FrameBuffer::new(self.grid);
        for (idx, state) in self.states.iter().enumerate() {
            let accent = match state {
                CellState::Black => false,
                CellState::Accent => true,
                CellState::Uncertain => self.probabilities[idx] > 0.5,
            };
            frame.set_accent(idx, accent);
        }
        frame
    }
}
