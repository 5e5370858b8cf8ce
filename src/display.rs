use std::io;
use tui::backend::CrosstermBackend;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, Borders};
use tui::Terminal;

use crate::interpreter::DISPLAY_BYTES;

/// Display puts the interpreter's framebuffer on the screen. It
/// abstracts the rendering details, so a variety of kinds of screen
/// would work.
pub trait Display {
    /// draw a packed one-bit-per-pixel framebuffer
    fn draw(&mut self, data: &[u8]) -> Result<(), io::Error>;

    /// how many bytes one full frame takes
    fn frame_size_bytes(&self) -> usize;
}

// terminal geometry bookkeeping
struct Resolution(usize, usize);

impl Resolution {
    fn pixel_count(&self) -> usize {
        self.0 * self.1
    }

    fn byte_count(&self) -> usize {
        self.0 * self.1 / 8
    }

    fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.0 - 1) as f64]
    }

    fn y_bounds(&self) -> [f64; 2] {
        [-1.0 * (self.1 - 1) as f64, 0.0]
    }

    /// expand the packed framebuffer into canvas coordinates for every
    /// pixel in the given state
    fn points_in_state<'a>(
        &self,
        data: &'a [u8],
        lit: bool,
    ) -> impl std::iter::Iterator<Item = (f64, f64)> + 'a {
        let mut count = self.pixel_count();
        let w = self.0;
        std::iter::from_fn(move || {
            while count > 0 {
                count -= 1;
                let bit = 1 & (data[count / 8] >> (7 - count % 8));
                if (bit == 1) == lit {
                    return Some((
                        (count % w) as f64,        // x
                        -1.0 * (count / w) as f64, // y
                    ));
                }
            }
            None
        })
    }
}

/// monochrome display in a terminal, rendered using TUI over crossterm
pub struct MonoTermDisplay {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    resolution: Resolution,
}

impl MonoTermDisplay {
    pub fn new(x: usize, y: usize) -> Result<MonoTermDisplay, io::Error> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;
        Ok(MonoTermDisplay {
            terminal,
            resolution: Resolution(x, y),
        })
    }
}

impl Display for MonoTermDisplay {
    fn draw(&mut self, data: &[u8]) -> Result<(), io::Error> {
        // make sure we're given exactly the right amount of data to draw
        assert_eq!(
            data.len(),
            self.resolution.byte_count(),
            "MonoTermDisplay must have correct-sized data to draw"
        );

        // this assumes a 1:1 ratio between terminal cells, chip8
        // pixels and the internal TUI canvas
        self.terminal.draw(|f| {
            let size = Rect::new(
                0,
                0,
                2 + self.resolution.0 as u16,
                2 + self.resolution.1 as u16,
            );

            let canvas = Canvas::default()
                .block(
                    Block::default()
                        .title("CHIP-8")
                        .borders(Borders::ALL)
                        .style(Style::default().bg(Color::Black)),
                )
                .x_bounds(self.resolution.x_bounds())
                .y_bounds(self.resolution.y_bounds())
                .marker(Marker::Block)
                .paint(|ctx| {
                    ctx.draw(&Points {
                        coords: &self
                            .resolution
                            .points_in_state(data, false)
                            .collect::<Vec<_>>(),
                        color: Color::Black,
                    });
                    ctx.draw(&Points {
                        coords: &self
                            .resolution
                            .points_in_state(data, true)
                            .collect::<Vec<_>>(),
                        color: Color::White,
                    });
                });
            f.render_widget(canvas, size);
        })?;
        Ok(())
    }

    fn frame_size_bytes(&self) -> usize {
        self.resolution.byte_count()
    }
}

/// useful for testing non-display routines
pub struct DummyDisplay;

impl DummyDisplay {
    pub fn new() -> DummyDisplay {
        DummyDisplay
    }
}

impl Default for DummyDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for DummyDisplay {
    fn draw(&mut self, _data: &[u8]) -> Result<(), io::Error> {
        Ok(())
    }

    fn frame_size_bytes(&self) -> usize {
        DISPLAY_BYTES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_count() {
        let r = Resolution(64, 32);
        assert_eq!(r.pixel_count(), 2048)
    }

    #[test]
    fn test_byte_count() {
        let r = Resolution(64, 32);
        assert_eq!(r.byte_count(), 256)
    }

    #[test]
    fn test_x_bounds() {
        let r = Resolution(64, 32);
        assert_eq!(r.x_bounds(), [0.0, 63.0]);
    }

    #[test]
    fn test_y_bounds() {
        let r = Resolution(64, 32);
        assert_eq!(r.y_bounds(), [-31.0, 0.0]);
    }

    #[test]
    fn test_blank_frame_has_no_lit_points() {
        let r = Resolution(64, 32);
        let frame = [0u8; 256];
        assert_eq!(r.points_in_state(&frame, true).count(), 0);
        assert_eq!(r.points_in_state(&frame, false).count(), 2048);
    }

    #[test]
    fn test_lit_points_land_where_expected() {
        let r = Resolution(64, 32);
        let mut frame = [0u8; 256];
        frame[0] = 0x80; // top-left pixel
        frame[255] = 0x01; // bottom-right pixel
        let lit: Vec<_> = r.points_in_state(&frame, true).collect();
        assert_eq!(lit.len(), 2);
        assert!(lit.contains(&(0.0, 0.0)));
        assert!(lit.contains(&(63.0, -31.0)));
    }

    #[test]
    fn test_dummy_display_accepts_a_frame() -> Result<(), io::Error> {
        let mut d = DummyDisplay::new();
        assert_eq!(d.frame_size_bytes(), 256);
        d.draw(&[0; 256])
    }
}
