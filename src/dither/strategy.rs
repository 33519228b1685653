//! Per-frame dithering strategies for the uncertain cells.

use serde::Deserialize;

use super::rng::XorShift32;

/// Clock advance per produced frame, independent of wall time.
pub const CLOCK_STEP: f32 = 0.016;

/// Vertical wave frequency (radians per row).
const WAVE_ROW_FREQ: f32 = 0.8;

/// Temporal wave speed (radians per clock unit).
const WAVE_SPEED: f32 = 2.0;

/// How strongly column position and the wave shift the threshold.
const WAVE_AMPLITUDE: f32 = 0.3;

/// Spread of the random threshold used by the chaos blend.
const CHAOS_SPREAD: f32 = 0.4;

/// Animation strategy, chosen once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Keep the initial classification forever.
    Static,
    /// Independent coin flip per cell per frame, weighted by its probability.
    Random,
    /// Diagonal bands sweeping through the image, optionally mixed with noise.
    #[default]
    Wave,
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Static => "static",
            Algorithm::Random => "random",
            Algorithm::Wave => "wave",
        }
    }

    /// Whether frames change the buffer and advance the clock.
    pub fn is_animated(&self) -> bool {
        !matches!(self, Algorithm::Static)
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Random strategy decision: accent iff a uniform draw is below `prob`.
#[inline]
pub fn random_decision(prob: f32, rng: &mut XorShift32) -> bool {
    rng.next_f32() < prob
}

/// Fill `table` with `sin(row * 0.8 - time * 2.0)` for every row.
///
/// Computed once per frame so cells can be visited in any order.
pub fn fill_row_sines(table: &mut Vec<f32>, rows: usize, time: f32) {
    table.clear();
    table.extend((0..rows).map(|y| (y as f32 * WAVE_ROW_FREQ - time * WAVE_SPEED).sin()));
}

/// Map a column into `[-1, 1)`.
#[inline]
pub fn normalized_x(x: usize, width: usize) -> f32 {
    x as f32 * (2.0 / width as f32) - 1.0
}

/// Deterministic part of the wave threshold.
#[inline]
pub fn wave_threshold(prob: f32, norm_x: f32, row_sine: f32) -> f32 {
    prob + (norm_x - row_sine) * WAVE_AMPLITUDE
}

/// Wave strategy decision.
///
/// `chaos` is the blend fraction in `[0, 1]`; at zero no random numbers are
/// drawn and the result depends only on the inputs.
#[inline]
pub fn wave_decision(
    prob: f32,
    norm_x: f32,
    row_sine: f32,
    chaos: f32,
    rng: &mut XorShift32,
) -> bool {
    let mut threshold = wave_threshold(prob, norm_x, row_sine);
    if chaos > 0.0 {
        let random_threshold = prob + (rng.next_f32() - 0.5) * CHAOS_SPREAD;
        threshold = threshold * (1.0 - chaos) + random_threshold * chaos;
    }
    threshold > 0.5
}
