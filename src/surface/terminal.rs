//! ANSI true-color terminal surface.
//!
//! Every terminal cell shows two vertically stacked surface pixels using the
//! upper half block `▀`: the foreground color paints the upper pixel, the
//! background color the lower one. A terminal of `cols x rows` therefore
//! offers a `cols x rows*2` pixel surface.

use std::io::Write;
use std::time::{Duration, Instant};

use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use super::{Surface, SurfaceError};
use crate::dither::FrameBuffer;

/// Size used when the terminal cannot be queried.
pub const FALLBACK_SIZE: (u16, u16) = (80, 24);

const UPPER_HALF: char = '▀';

fn rgb(rgba: [u8; 4]) -> Color {
    Color::Rgb {
        r: rgba[0],
        g: rgba[1],
        b: rgba[2],
    }
}

/// Renders frames as colored half blocks to any writer.
pub struct TerminalSurface<W: Write = std::io::Stdout> {
    out: W,
    cols: u16,
    rows: u16,
    started: Instant,
    output: Vec<u8>,
}

impl TerminalSurface<std::io::Stdout> {
    /// Draw to stdout, sized to the current terminal.
    pub fn stdout() -> Result<Self, SurfaceError> {
        let (cols, rows) = match crossterm::terminal::size() {
            Ok((cols, rows)) if cols > 0 && rows > 0 => (cols, rows),
            _ => {
                log::warn!(
                    "Could not query terminal size, using {}x{}",
                    FALLBACK_SIZE.0,
                    FALLBACK_SIZE.1
                );
                FALLBACK_SIZE
            }
        };
        Self::with_size(std::io::stdout(), cols, rows)
    }
}

impl<W: Write> TerminalSurface<W> {
    /// Draw to `out` assuming a `cols x rows` terminal.
    ///
    /// Clears the screen and hides the cursor; both are restored on drop.
    pub fn with_size(mut out: W, cols: u16, rows: u16) -> Result<Self, SurfaceError> {
        execute!(out, cursor::Hide, Clear(ClearType::All))?;
        Ok(Self {
            out,
            cols,
            rows,
            started: Instant::now(),
            output: Vec::new(),
        })
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        &self.out
    }

    fn render(&mut self, frame: &FrameBuffer, block_size: usize) -> std::io::Result<()> {
        let block = block_size.max(1);
        self.output.clear();

        for row in 0..self.rows {
            queue!(self.output, cursor::MoveTo(0, row))?;
            let upper_y = (row as usize * 2) / block;
            let lower_y = (row as usize * 2 + 1) / block;

            let mut prev: Option<([u8; 4], [u8; 4])> = None;
            for col in 0..self.cols as usize {
                let cx = col / block;
                let fg = frame.cell_clamped(cx, upper_y);
                let bg = frame.cell_clamped(cx, lower_y);

                // Only emit colors when they change along the row
                if prev != Some((fg, bg)) {
                    queue!(
                        self.output,
                        SetForegroundColor(rgb(fg)),
                        SetBackgroundColor(rgb(bg))
                    )?;
                    prev = Some((fg, bg));
                }
                queue!(self.output, Print(UPPER_HALF))?;
            }
        }

        queue!(self.output, ResetColor)
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn size(&self) -> (usize, usize) {
        (self.cols as usize, self.rows as usize * 2)
    }

    fn present(&mut self, frame: &FrameBuffer, block_size: usize) -> Result<(), SurfaceError> {
        self.render(frame, block_size)?;
        self.out.write_all(&self.output)?;
        self.out.flush()?;
        Ok(())
    }

    fn poll_events(&mut self) -> bool {
        // The terminal is not in raw mode; Ctrl+C arrives through the stop flag.
        true
    }

    fn now(&self) -> Duration {
        self.started.elapsed()
    }
}

impl<W: Write> Drop for TerminalSurface<W> {
    fn drop(&mut self) {
        // Reset colors, show cursor, move below the image
        let _ = execute!(
            self.out,
            ResetColor,
            cursor::Show,
            cursor::MoveTo(0, self.rows),
            Print('\n')
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dither::{Classification, TargetGrid, ACCENT_RGB};

    fn frame(cells: &[[f32; 3]], w: usize, h: usize) -> FrameBuffer {
        Classification::from_cells(cells, TargetGrid::new(w, h))
            .unwrap()
            .initial_frame()
    }

    fn rendered(surface: &mut TerminalSurface<Vec<u8>>, f: &FrameBuffer, block: usize) -> String {
        surface.present(f, block).unwrap();
        String::from_utf8_lossy(surface.writer()).into_owned()
    }

    #[test]
    fn test_size_doubles_rows() {
        let surface = TerminalSurface::with_size(Vec::new(), 40, 12).unwrap();
        assert_eq!(surface.size(), (40, 24));
    }

    #[test]
    fn test_setup_hides_cursor() {
        let surface = TerminalSurface::with_size(Vec::new(), 2, 1).unwrap();
        let out = String::from_utf8_lossy(surface.writer()).into_owned();
        assert!(out.starts_with("\x1b[?25l"));
    }

    #[test]
    fn test_drop_restores_cursor() {
        let mut buf = Vec::new();
        {
            let _surface = TerminalSurface::with_size(&mut buf, 2, 3).unwrap();
        }
        let out = String::from_utf8_lossy(&buf).into_owned();
        assert!(out.contains("\x1b[?25h"));
        // Below the last image row
        assert!(out.contains("\x1b[4;1H"));
    }

    #[test]
    fn test_half_blocks_use_upper_and_lower_pixels() {
        // 1 column, 2 pixel rows: accent above black
        let f = frame(&[ACCENT_RGB, [0.0; 3]], 1, 2);
        let mut surface = TerminalSurface::with_size(Vec::new(), 1, 1).unwrap();
        let out = rendered(&mut surface, &f, 1);
        assert!(out.contains("\x1b[1;1H"));
        assert!(out.contains("\x1b[38;2;255;140;0m\x1b[48;2;0;0;0m▀"));
        assert!(out.ends_with("\x1b[0m"));
    }

    #[test]
    fn test_colors_emitted_only_on_change() {
        let f = frame(&[[0.0; 3]; 8], 4, 2);
        let mut surface = TerminalSurface::with_size(Vec::new(), 4, 1).unwrap();
        let out = rendered(&mut surface, &f, 1);
        assert_eq!(out.matches("\x1b[38;2;").count(), 1);
        assert_eq!(out.matches('▀').count(), 4);
    }

    #[test]
    fn test_block_size_magnifies() {
        // 2x1 grid, block 2 -> 4 columns, left half accent
        let f = frame(&[ACCENT_RGB, [0.0; 3]], 2, 1);
        let mut surface = TerminalSurface::with_size(Vec::new(), 4, 1).unwrap();
        let out = rendered(&mut surface, &f, 2);
        assert_eq!(out.matches("\x1b[38;2;").count(), 2);
        assert!(out.contains("\x1b[38;2;255;140;0m\x1b[48;2;255;140;0m▀▀"));
        assert!(out.contains("\x1b[38;2;0;0;0m\x1b[48;2;0;0;0m▀▀"));
    }
}
