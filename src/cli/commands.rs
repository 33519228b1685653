//! Subcommand handlers for config actions.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::{Settings, DEFAULT_CONFIG_TOML};

/// Print the effective settings and where they were loaded from.
pub fn show_config<W: Write>(out: &mut W, settings: &Settings, config_path: &Path) -> io::Result<()> {
    writeln!(out, "Current configuration:")?;
    writeln!(out, "  Image: {}", settings.image.display())?;
    writeln!(out, "  Algorithm: {}", settings.algorithm)?;
    writeln!(out, "  Threshold: {}", settings.threshold)?;
    writeln!(out, "  Chaos: {}%", settings.chaos)?;
    writeln!(out, "  Seed: {}", settings.seed)?;
    writeln!(out, "  Output: {}", settings.output.name())?;
    writeln!(out, "  Block size: {}", settings.block_size)?;
    if settings.max_fps == 0 {
        writeln!(out, "  Max FPS: unlimited")?;
    } else {
        writeln!(out, "  Max FPS: {}", settings.max_fps)?;
    }
    writeln!(out, "  Window: {}x{}", settings.width, settings.height)?;
    writeln!(out, "  Profile: {}", if settings.profile { "yes" } else { "no" })?;
    writeln!(out)?;

    if config_path.exists() {
        writeln!(out, "Config file: {} (exists)", config_path.display())
    } else {
        writeln!(out, "Config file: {} (not found)", config_path.display())
    }
}

/// Write the default config file, creating parent directories.
///
/// Refuses to overwrite an existing file.
pub fn init_config(config_path: &Path) -> io::Result<PathBuf> {
    if config_path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!(
                "Config file already exists: {}\nUse 'live-dither config show' to view current settings.",
                config_path.display()
            ),
        ));
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(config_path, DEFAULT_CONFIG_TOML)?;
    Ok(config_path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_show_lists_settings() {
        let mut out = Vec::new();
        let settings = Settings {
            max_fps: 0,
            ..Settings::default()
        };
        show_config(&mut out, &settings, Path::new("/nonexistent/config.toml")).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Algorithm: wave"));
        assert!(text.contains("Max FPS: unlimited"));
        assert!(text.contains("(not found)"));
    }

    #[test]
    fn test_init_writes_parseable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let written = init_config(&path).unwrap();
        assert_eq!(written, path);

        let cfg = Config::load_explicit(&path).unwrap();
        assert_eq!(Settings::clamped(&cfg), Settings::default());
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "image = \"mine.png\"\n").unwrap();

        let err = init_config(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "image = \"mine.png\"\n");
    }
}
