//! Frame loop driving the dither engine and a presentation surface.
//!
//! The loop is single threaded and cooperative:
//! 1. Check the shared stop flag (set up by [`install_stop_handler`])
//! 2. Poll surface events without blocking
//! 3. If a frame is due, dither and present it; otherwise sleep until it is
//!
//! A frame in progress always completes before the stop flag is read again.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::dither::{Engine, EngineError};
use crate::surface::{Surface, SurfaceError};

/// Errors that end the frame loop early.
#[derive(Debug, thiserror::Error)]
pub enum LoopError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Frame loop parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOptions {
    /// Frame rate cap; 0 runs unthrottled.
    pub max_fps: u32,
    /// Surface pixels per grid cell along each axis.
    pub block_size: usize,
    /// Log the achieved frame rate once per second.
    pub profile: bool,
}

impl LoopOptions {
    /// Minimum spacing between produced frames.
    pub fn frame_interval(&self) -> Duration {
        if self.max_fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / self.max_fps as f64)
        }
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub frames: u64,
}

/// Run until `running` is cleared or the surface closes.
pub fn run<S: Surface + ?Sized>(
    engine: &mut Engine,
    surface: &mut S,
    options: &LoopOptions,
    running: &AtomicBool,
) -> Result<LoopStats, LoopError> {
    let interval = options.frame_interval();
    let mut stats = LoopStats::default();

    // Show the classified image right away
    surface.present(engine.frame()?, options.block_size)?;

    let mut last_frame = surface.now();
    let mut fps_timer = Duration::ZERO;
    let mut fps_frames: u32 = 0;

    while running.load(Ordering::SeqCst) {
        if !surface.poll_events() {
            log::info!("Surface closed");
            break;
        }

        let now = surface.now();
        let elapsed = now.saturating_sub(last_frame);

        if elapsed >= interval {
            let frame = engine.next_frame()?;
            surface.present(frame, options.block_size)?;
            last_frame = now;
            stats.frames += 1;

            if options.profile {
                fps_frames += 1;
                fps_timer += elapsed;
                if fps_timer >= Duration::from_secs(1) {
                    log::info!("FPS: {}", fps_frames);
                    fps_frames = 0;
                    fps_timer = Duration::ZERO;
                }
            }
        } else {
            surface.sleep(interval - elapsed);
        }
    }

    log::debug!("Frame loop finished after {} frames", stats.frames);
    Ok(stats)
}

/// Install a Ctrl+C / SIGTERM handler and return the flag it clears.
///
/// This should be called once at program startup.
pub fn install_stop_handler() -> Result<Arc<AtomicBool>, ctrlc::Error> {
    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();
    ctrlc::set_handler(move || {
        flag.store(false, Ordering::SeqCst);
        log::info!("Received stop signal, shutting down...");
    })?;
    Ok(running)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_interval() {
        let opts = LoopOptions {
            max_fps: 50,
            block_size: 1,
            profile: false,
        };
        assert_eq!(opts.frame_interval(), Duration::from_millis(20));

        let unthrottled = LoopOptions { max_fps: 0, ..opts };
        assert_eq!(unthrottled.frame_interval(), Duration::ZERO);
    }

    #[test]
    fn test_loop_error_display_is_transparent() {
        let err = LoopError::from(EngineError::NotReady);
        assert_eq!(err.to_string(), EngineError::NotReady.to_string());
    }
}
