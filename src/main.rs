use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::Parser;
use log::{info, warn};

use live_dither::cli::{self, Args, Command, ConfigAction};
use live_dither::config::{Config, ConfigError, Output, Settings};
use live_dither::dither::{Engine, TargetGrid};
use live_dither::event_loop;
use live_dither::surface::{Surface, SurfaceError, TerminalSurface};

/// Load the config file.
///
/// If --config is specified, the file must exist and parse. Otherwise a
/// missing default file means built-in defaults and a broken one is reported
/// and skipped.
fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return Config::load_explicit(path);
    }
    match Config::load(None) {
        Ok(c) => Ok(c),
        Err(e) => {
            warn!("{}", e);
            warn!("Using default settings.");
            Ok(Config::default())
        }
    }
}

fn open_surface(settings: &Settings) -> Result<Box<dyn Surface>, SurfaceError> {
    match settings.output {
        #[cfg(feature = "window")]
        Output::Window => Ok(Box::new(live_dither::surface::WindowSurface::open(
            settings.width,
            settings.height,
        )?)),
        #[cfg(not(feature = "window"))]
        Output::Window => Err(SurfaceError::Unsupported),
        Output::Terminal => Ok(Box::new(TerminalSurface::stdout()?)),
    }
}

fn run(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    info!("Live Dither Background");
    info!("Image: {}", settings.image.display());
    info!("Algorithm: {}", settings.algorithm);
    info!("Threshold: {}", settings.threshold);
    info!("Block size: {}", settings.block_size);
    if settings.max_fps == 0 {
        info!("Max FPS: unlimited");
    } else {
        info!("Max FPS: {}", settings.max_fps);
    }
    info!("Chaos: {}%", settings.chaos);

    let running = match event_loop::install_stop_handler() {
        Ok(flag) => flag,
        Err(e) => {
            warn!("Could not set up Ctrl+C handler: {}", e);
            Arc::new(AtomicBool::new(true))
        }
    };

    // Log lines on stderr would draw over a terminal image
    if std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(log::max_level().min(settings.output.max_log_level()));
    }

    let mut surface = open_surface(settings)?;
    let (width, height) = surface.size();
    info!("Surface size: {}x{} ({})", width, height, settings.output.name());

    let grid = TargetGrid::from_surface(width, height, settings.block_size)?;
    let mut engine = Engine::new(settings.dither());
    engine.load_path(&settings.image, grid)?;

    let stats = event_loop::run(
        &mut engine,
        surface.as_mut(),
        &settings.loop_options(),
        &running,
    )?;
    info!("Stopped after {} frames", stats.frames);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let file_config = if args.reads_config_file() {
        match load_config(args.config.as_deref()) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };
    // Merge settings: CLI args > config file > built-in defaults
    let settings = Settings::clamped(&args.to_config().or(file_config));

    match &args.command {
        Some(Command::Config { action }) => {
            let config_path = args.config_path();
            let result = match action {
                ConfigAction::Show => {
                    cli::show_config(&mut std::io::stdout(), &settings, &config_path)
                }
                ConfigAction::Init => cli::init_config(&config_path)
                    .map(|path| println!("Created config file: {}", path.display())),
            };
            if let Err(e) = result {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        None => {
            if let Err(e) = run(&settings) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
