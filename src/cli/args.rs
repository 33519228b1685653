//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::{AlgorithmArg, OutputArg};
use crate::config::{self, Config, DisplayConfig, DitherConfig};

/// Turn a photo into an animated black/orange dithered background
#[derive(Parser, Debug)]
#[command(name = "live-dither")]
#[command(version, about = "Animated two-color dithered background from a photo", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Background image path (default: bg.jpg)
    #[arg(short, long)]
    pub image: Option<PathBuf>,

    /// Animation algorithm
    #[arg(short, long)]
    pub algorithm: Option<AlgorithmArg>,

    /// Brightness threshold (0-255); darker cells become black
    #[arg(short, long)]
    pub threshold: Option<u8>,

    /// Screen pixels per dither cell
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub block_size: Option<u32>,

    /// Frame rate cap (0 = unlimited)
    #[arg(short = 'f', long)]
    pub max_fps: Option<u32>,

    /// Randomness blended into the wave (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub chaos: Option<u8>,

    /// RNG seed
    #[arg(long)]
    pub seed: Option<u32>,

    /// Where to show the animation
    #[arg(short, long)]
    pub output: Option<OutputArg>,

    /// Window width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Log frames per second
    #[arg(long)]
    pub profile: bool,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

impl Args {
    /// `config init` writes the file, so it must not require one to exist.
    pub fn reads_config_file(&self) -> bool {
        !matches!(
            self.command,
            Some(Command::Config {
                action: ConfigAction::Init
            })
        )
    }

    /// The `--config` path, or the default location.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config::default_path)
    }

    /// Flags given on the command line as a partial config, for layering over
    /// the config file with [`Config::or`].
    pub fn to_config(&self) -> Config {
        Config {
            image: self.image.clone(),
            dither: DitherConfig {
                algorithm: self.algorithm.map(Into::into),
                threshold: self.threshold.map(i64::from),
                chaos: self.chaos.map(i64::from),
                seed: self.seed,
            },
            display: DisplayConfig {
                output: self.output.map(Into::into),
                block_size: self.block_size.map(i64::from),
                max_fps: self.max_fps.map(i64::from),
                width: self.width.map(i64::from),
                height: self.height.map(i64::from),
                profile: self.profile.then_some(true),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Output, Settings};
    use crate::dither::Algorithm;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["live-dither"]);
        assert!(args.image.is_none());
        assert!(args.algorithm.is_none());
        assert!(args.threshold.is_none());
        assert!(args.block_size.is_none());
        assert!(args.max_fps.is_none());
        assert!(args.chaos.is_none());
        assert!(args.output.is_none());
        assert!(!args.profile);
        assert!(args.config.is_none());
        assert!(args.command.is_none());
        assert_eq!(args.to_config(), Config::default());
    }

    #[test]
    fn test_args_algorithm_values() {
        let args = Args::parse_from(["live-dither", "--algorithm", "static"]);
        assert_eq!(args.algorithm, Some(AlgorithmArg::Static));

        let args = Args::parse_from(["live-dither", "-a", "random"]);
        assert_eq!(args.algorithm, Some(AlgorithmArg::Random));

        let args = Args::parse_from(["live-dither", "--algorithm", "wave"]);
        assert_eq!(args.algorithm, Some(AlgorithmArg::Wave));
    }

    #[test]
    fn test_args_rejects_unknown_algorithm() {
        assert!(Args::try_parse_from(["live-dither", "-a", "spiral"]).is_err());
    }

    #[test]
    fn test_args_ranges() {
        assert!(Args::try_parse_from(["live-dither", "--threshold", "256"]).is_err());
        assert!(Args::try_parse_from(["live-dither", "--chaos", "101"]).is_err());
        assert!(Args::try_parse_from(["live-dither", "--block-size", "0"]).is_err());
        assert!(Args::try_parse_from(["live-dither", "--max-fps", "0"]).is_ok());
    }

    #[test]
    fn test_args_config_subcommands() {
        let args = Args::parse_from(["live-dither", "config", "show"]);
        match args.command {
            Some(Command::Config {
                action: ConfigAction::Show,
            }) => (),
            _ => panic!("Expected Config Show subcommand"),
        }

        let args = Args::parse_from(["live-dither", "config", "init"]);
        match args.command {
            Some(Command::Config {
                action: ConfigAction::Init,
            }) => (),
            _ => panic!("Expected Config Init subcommand"),
        }
    }

    #[test]
    fn test_config_init_at_custom_path_skips_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh").join("config.toml");
        let path_arg = path.to_str().unwrap();

        let args = Args::parse_from(["live-dither", "--config", path_arg, "config", "init"]);
        assert!(!args.reads_config_file());
        assert_eq!(args.config_path(), path);
        crate::cli::init_config(&args.config_path()).unwrap();
        assert!(path.exists());

        let args = Args::parse_from(["live-dither", "--config", path_arg, "config", "show"]);
        assert!(args.reads_config_file());
        assert!(Args::parse_from(["live-dither"]).reads_config_file());
    }

    #[test]
    fn test_args_combined_options() {
        let args = Args::parse_from([
            "live-dither",
            "-i",
            "/tmp/photo.png",
            "-a",
            "random",
            "-t",
            "12",
            "-b",
            "4",
            "-f",
            "30",
            "--chaos",
            "100",
            "--seed",
            "7",
            "-o",
            "terminal",
            "--profile",
        ]);
        let s = Settings::clamped(&args.to_config());
        assert_eq!(s.image, PathBuf::from("/tmp/photo.png"));
        assert_eq!(s.algorithm, Algorithm::Random);
        assert_eq!(s.threshold, 12);
        assert_eq!(s.block_size, 4);
        assert_eq!(s.max_fps, 30);
        assert_eq!(s.chaos, 100);
        assert_eq!(s.seed, 7);
        assert_eq!(s.output, Output::Terminal);
        assert!(s.profile);
    }

    #[test]
    fn test_profile_flag_absent_does_not_override_file() {
        let file = Config {
            display: DisplayConfig {
                profile: Some(true),
                ..Default::default()
            },
            ..Default::default()
        };
        let args = Args::parse_from(["live-dither"]);
        assert!(Settings::clamped(&args.to_config().or(file)).profile);
    }
}
