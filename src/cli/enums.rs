//! CLI enum types for algorithm and output options.

use clap::ValueEnum;

use crate::config::Output;
use crate::dither::Algorithm;

/// Animation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AlgorithmArg {
    /// Fixed image, no animation
    Static,
    /// Per-cell flicker weighted by color probability
    Random,
    /// Sweeping bands blended with noise (see --chaos)
    #[default]
    Wave,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(a: AlgorithmArg) -> Self {
        match a {
            AlgorithmArg::Static => Algorithm::Static,
            AlgorithmArg::Random => Algorithm::Random,
            AlgorithmArg::Wave => Algorithm::Wave,
        }
    }
}

/// Presentation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputArg {
    #[default]
    Window,
    Terminal,
}

impl From<OutputArg> for Output {
    fn from(o: OutputArg) -> Self {
        match o {
            OutputArg::Window => Output::Window,
            OutputArg::Terminal => Output::Terminal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_arg_to_algorithm() {
        assert_eq!(Algorithm::from(AlgorithmArg::Static), Algorithm::Static);
        assert_eq!(Algorithm::from(AlgorithmArg::Random), Algorithm::Random);
        assert_eq!(Algorithm::from(AlgorithmArg::Wave), Algorithm::Wave);
    }

    #[test]
    fn test_output_arg_to_output() {
        assert_eq!(Output::from(OutputArg::Window), Output::Window);
        assert_eq!(Output::from(OutputArg::Terminal), Output::Terminal);
    }
}
