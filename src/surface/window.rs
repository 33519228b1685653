//! Desktop window surface backed by minifb.

use std::time::{Duration, Instant};

use log::info;
use minifb::{Key, Window, WindowOptions};

use super::{magnify, pack_0rgb, Surface, SurfaceError};
use crate::dither::FrameBuffer;

pub const WINDOW_TITLE: &str = "Live Dither";

/// A plain top-level window showing the magnified frame.
pub struct WindowSurface {
    window: Window,
    width: usize,
    height: usize,
    pixels: Vec<u32>,
    started: Instant,
}

impl WindowSurface {
    /// Open a `width x height` window.
    pub fn open(width: usize, height: usize) -> Result<Self, SurfaceError> {
        let options = WindowOptions {
            borderless: false,
            title: true,
            resize: false,
            ..WindowOptions::default()
        };
        let mut window = Window::new(WINDOW_TITLE, width, height, options)?;
        // Pacing is done by the frame loop
        window.set_target_fps(0);
        info!("Window opened: {}x{}", width, height);

        Ok(Self {
            window,
            width,
            height,
            pixels: vec![0; width * height],
            started: Instant::now(),
        })
    }
}

impl Surface for WindowSurface {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn present(&mut self, frame: &FrameBuffer, block_size: usize) -> Result<(), SurfaceError> {
        magnify(
            frame,
            block_size,
            self.width,
            self.height,
            &mut self.pixels,
            pack_0rgb,
        );
        self.window
            .update_with_buffer(&self.pixels, self.width, self.height)?;
        Ok(())
    }

    fn poll_events(&mut self) -> bool {
        self.window.update();
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    fn now(&self) -> Duration {
        self.started.elapsed()
    }
}
