//! LCD Frame Buffer
//!
//! A 128x64 page-addressed panel: page 0 is the status strip, pages 1..=7
//! hold the main frame buffer. Each byte is eight vertically stacked pixels
//! with bit 0 on top. Both buffers implement `DrawTarget` so UI code can
//! render text and shapes with embedded-graphics.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_hal::delay::DelayNs;

use crate::config::{FRAME_PAGES, LCD_COLUMN_OFFSET, LCD_WIDTH};
use crate::hal::board::Board;
use crate::hal::gpio::Gpio;

use super::st7565::cmd;

/// Display width in pixels
pub const DISPLAY_WIDTH: u32 = LCD_WIDTH as u32;

/// Frame buffer height in pixels
pub const FRAME_HEIGHT: u32 = (FRAME_PAGES * 8) as u32;

/// Status strip height in pixels
pub const STATUS_HEIGHT: u32 = 8;

/// One page of panel RAM
pub type Page = [u8; LCD_WIDTH];

fn set_page_pixel(page: &mut Page, x: usize, bit: u32, on: bool) {
    let mask = 1u8 << bit;
    if on {
        page[x] |= mask;
    } else {
        page[x] &= !mask;
    }
}

/// Main frame buffer, 7 pages
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pages: [Page; FRAME_PAGES],
}

impl FrameBuffer {
    /// Create a new empty frame buffer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pages: [[0; LCD_WIDTH]; FRAME_PAGES],
        }
    }

    /// Set every byte
    pub fn fill(&mut self, value: u8) {
        for page in &mut self.pages {
            page.fill(value);
        }
    }

    /// All pages, top first
    #[must_use]
    pub const fn pages(&self) -> &[Page; FRAME_PAGES] {
        &self.pages
    }

    /// One page; `None` past the last page
    #[must_use]
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// One page, mutably
    pub fn page_mut(&mut self, index: usize) -> Option<&mut Page> {
        self.pages.get_mut(index)
    }

    /// Set a pixel; out-of-range coordinates are ignored
    pub fn set_pixel(&mut self, x: u32, y: u32, on: bool) {
        if x >= DISPLAY_WIDTH || y >= FRAME_HEIGHT {
            return;
        }
        set_page_pixel(&mut self.pages[(y / 8) as usize], x as usize, y % 8, on);
    }

    /// Read a pixel
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> bool {
        x < DISPLAY_WIDTH
            && y < FRAME_HEIGHT
            && self.pages[(y / 8) as usize][x as usize] & (1 << (y % 8)) != 0
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let (Ok(x), Ok(y)) = (u32::try_from(coord.x), u32::try_from(coord.y)) {
                self.set_pixel(x, y, color.is_on());
            }
        }
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH, FRAME_HEIGHT)
    }
}

/// Status strip, one page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusLine {
    bytes: Page,
}

impl StatusLine {
    /// Create a blank strip
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bytes: [0; LCD_WIDTH],
        }
    }

    /// Set every byte
    pub fn fill(&mut self, value: u8) {
        self.bytes.fill(value);
    }

    /// Raw bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &Page {
        &self.bytes
    }

    /// Raw bytes, mutably
    pub fn as_bytes_mut(&mut self) -> &mut Page {
        &mut self.bytes
    }

    /// Set a pixel; out-of-range coordinates are ignored
    pub fn set_pixel(&mut self, x: u32, y: u32, on: bool) {
        if x >= DISPLAY_WIDTH || y >= STATUS_HEIGHT {
            return;
        }
        set_page_pixel(&mut self.bytes, x as usize, y, on);
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawTarget for StatusLine {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let (Ok(x), Ok(y)) = (u32::try_from(coord.x), u32::try_from(coord.y)) {
                self.set_pixel(x, y, color.is_on());
            }
        }
        Ok(())
    }
}

impl OriginDimensions for StatusLine {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH, STATUS_HEIGHT)
    }
}

/// What [`Display::draw_line`] writes
#[derive(Clone, Copy, Debug)]
pub enum LineContent<'a> {
    /// Bytes to stream
    Bitmap(&'a [u8]),
    /// This many zero bytes
    Clear(usize),
}

impl LineContent<'_> {
    fn len(&self) -> usize {
        match self {
            Self::Bitmap(b) => b.len(),
            Self::Clear(n) => *n,
        }
    }

    fn byte(&self, i: usize) -> u8 {
        match self {
            Self::Bitmap(b) => b[i],
            Self::Clear(_) => 0,
        }
    }
}

/// Panel driver: owns the buffers, borrows the board for each transfer
#[derive(Clone, Default)]
pub struct Display {
    frame: FrameBuffer,
    status: StatusLine,
}

impl Display {
    /// Blank buffers; the panel is untouched until [`Display::init`]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frame: FrameBuffer::new(),
            status: StatusLine::new(),
        }
    }

    /// Frame buffer
    #[must_use]
    pub const fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Frame buffer, for drawing
    pub fn frame_mut(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    /// Status strip
    #[must_use]
    pub const fn status(&self) -> &StatusLine {
        &self.status
    }

    /// Status strip, for drawing
    pub fn status_mut(&mut self) -> &mut StatusLine {
        &mut self.status
    }

    /// Reset and configure the controller, then clear the panel
    pub fn init<G: Gpio, D: DelayNs>(&mut self, board: &mut Board<G, D>) {
        board.lcd_hardware_reset();
        board.lcd().configure();
        self.fill_screen(board, 0);
    }

    /// Stream the 7 frame pages
    pub fn blit_full_screen<G: Gpio, D: DelayNs>(&self, board: &mut Board<G, D>) {
        let mut lcd = board.lcd();
        lcd.command_mode();
        lcd.write_byte(cmd::START_LINE_0);
        for (line, page) in (1u8..).zip(self.frame.pages.iter()) {
            lcd.select_column_and_line(LCD_COLUMN_OFFSET, line);
            lcd.data_mode();
            lcd.write_all(page);
        }
    }

    /// Stream the status strip
    pub fn blit_status_line<G: Gpio, D: DelayNs>(&self, board: &mut Board<G, D>) {
        let mut lcd = board.lcd();
        lcd.command_mode();
        lcd.write_byte(cmd::START_LINE_0);
        lcd.select_column_and_line(LCD_COLUMN_OFFSET, 0);
        lcd.data_mode();
        lcd.write_all(&self.status.bytes);
    }

    /// Fill both buffers with `value` and push them to the panel
    pub fn fill_screen<G: Gpio, D: DelayNs>(&mut self, board: &mut Board<G, D>, value: u8) {
        self.status.fill(value);
        self.frame.fill(value);
        self.blit_status_line(board);
        self.blit_full_screen(board);
    }

    /// Write one run of bytes straight to panel page `line` from `column`.
    ///
    /// Line 0 is the status strip, lines 1..=7 the frame pages. The matching
    /// bytes of the in-memory buffer are updated so a read-back reflects the
    /// panel. The run is clipped at the right edge; lines past the last
    /// frame page are ignored.
    pub fn draw_line<G: Gpio, D: DelayNs>(
        &mut self,
        board: &mut Board<G, D>,
        column: u8,
        line: u8,
        content: LineContent<'_>,
    ) {
        let start = usize::from(column);
        if start >= LCD_WIDTH || usize::from(line) > FRAME_PAGES {
            return;
        }
        let len = content.len().min(LCD_WIDTH - start);

        let page = match line {
            0 => Some(&mut self.status.bytes),
            n => self.frame.pages.get_mut(usize::from(n) - 1),
        };
        if let Some(page) = page {
            for i in 0..len {
                page[start + i] = content.byte(i);
            }
        }

        let mut lcd = board.lcd();
        lcd.select_column_and_line(column + LCD_COLUMN_OFFSET, line);
        lcd.data_mode();
        for i in 0..len {
            lcd.write_byte(content.byte(i));
        }
    }
}
