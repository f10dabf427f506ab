//! Display Tests
//!
//! Frame buffer drawing and the byte stream seen by the LCD controller.
//! Run with: cargo test --features std --test display_tests

// The first board revision has no serial LCD lines to observe.
#![cfg(not(feature = "board-v1"))]

mod common;

use common::LcdByte;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use k5_firmware::config::{FRAME_PAGES, LCD_WIDTH};
use k5_firmware::drivers::display::{Display, FrameBuffer, LineContent, StatusLine};
use k5_firmware::drivers::st7565::cmd;

fn command(value: u8) -> LcdByte {
    LcdByte { data: false, value }
}

fn data(value: u8) -> LcdByte {
    LcdByte { data: true, value }
}

// =============================================================================
// Buffers
// =============================================================================

#[test]
fn fill_screen_sets_every_byte() {
    let (_sim, mut board) = common::board();
    let mut display = Display::new();
    display.fill_screen(&mut board, 0xAA);

    assert!(display.status().as_bytes().iter().all(|&b| b == 0xAA));
    for page in display.frame().pages() {
        assert!(page.iter().all(|&b| b == 0xAA));
    }
}

#[test]
fn pixels_stack_from_bit_zero() {
    let mut frame = FrameBuffer::new();
    frame.set_pixel(3, 0, true);
    frame.set_pixel(3, 9, true);
    assert_eq!(frame.page(0).unwrap()[3], 0x01);
    assert_eq!(frame.page(1).unwrap()[3], 0x02);
    assert!(frame.pixel(3, 9));
    frame.set_pixel(3, 9, false);
    assert!(!frame.pixel(3, 9));
}

#[test]
fn out_of_range_pixels_are_ignored() {
    let mut frame = FrameBuffer::new();
    frame.set_pixel(128, 0, true);
    frame.set_pixel(0, 56, true);
    assert_eq!(frame, FrameBuffer::new());
    assert!(frame.page(FRAME_PAGES).is_none());

    let mut status = StatusLine::new();
    status.set_pixel(0, 8, true);
    assert_eq!(status, StatusLine::new());
}

// =============================================================================
// embedded-graphics
// =============================================================================

#[test]
fn filled_rectangle_lands_in_the_right_bytes() {
    let mut frame = FrameBuffer::new();
    Rectangle::new(Point::new(0, 4), Size::new(2, 8))
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
        .draw(&mut frame)
        .unwrap();

    let page0 = frame.page(0).unwrap();
    let page1 = frame.page(1).unwrap();
    assert_eq!(&page0[..3], &[0xF0, 0xF0, 0x00]);
    assert_eq!(&page1[..3], &[0x0F, 0x0F, 0x00]);
}

#[test]
fn negative_coordinates_are_clipped() {
    let mut frame = FrameBuffer::new();
    Pixel(Point::new(-1, 0), BinaryColor::On)
        .draw(&mut frame)
        .unwrap();
    assert_eq!(frame, FrameBuffer::new());
}

#[test]
fn text_renders_into_the_status_line() {
    let mut status = StatusLine::new();
    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    Text::with_baseline("8", Point::zero(), style, Baseline::Top)
        .draw(&mut status)
        .unwrap();
    assert!(status.as_bytes()[..6].iter().any(|&b| b != 0));
    assert!(status.as_bytes()[6..].iter().all(|&b| b == 0));
}

#[test]
fn sizes() {
    assert_eq!(FrameBuffer::new().size(), Size::new(128, 56));
    assert_eq!(StatusLine::new().size(), Size::new(128, 8));
}

// =============================================================================
// Controller Byte Stream
// =============================================================================

#[test]
fn init_configures_then_clears() {
    let (sim, mut board) = common::board();
    let mut display = Display::new();
    display.init(&mut board);

    let sim = sim.borrow();
    let expected_setup: Vec<LcdByte> = [
        cmd::RESET,
        cmd::BIAS_1_9,
        cmd::COM_NORMAL,
        cmd::SEG_REVERSE,
        cmd::DISPLAY_NORMAL,
        cmd::ALL_POINTS_OFF,
        cmd::REGULATION_RATIO,
        cmd::SET_CONTRAST,
        cmd::CONTRAST_LEVEL,
        cmd::POWER_BOOSTER,
        cmd::POWER_REGULATOR,
        cmd::POWER_ALL,
        cmd::POWER_ALL,
        cmd::POWER_ALL,
        cmd::POWER_ALL,
        cmd::START_LINE_0,
        cmd::DISPLAY_ON,
    ]
    .into_iter()
    .map(command)
    .collect();
    assert_eq!(&sim.lcd[..expected_setup.len()], expected_setup.as_slice());

    // Status page, then 7 frame pages, each with 128 data bytes.
    let rest = &sim.lcd[expected_setup.len()..];
    assert_eq!(rest.len(), 1 + 3 + LCD_WIDTH + 1 + FRAME_PAGES * (3 + LCD_WIDTH));
    assert!(rest.iter().filter(|b| b.data).all(|b| b.value == 0));
    assert_eq!(
        rest.iter().filter(|b| b.data).count(),
        LCD_WIDTH * (FRAME_PAGES + 1)
    );
}

#[test]
fn status_blit_addresses_page_zero_with_column_bias() {
    let (sim, mut board) = common::board();
    let mut display = Display::new();
    display.status_mut().fill(0x81);
    display.blit_status_line(&mut board);

    let sim = sim.borrow();
    assert_eq!(
        &sim.lcd[..4],
        &[
            command(cmd::START_LINE_0),
            command(0xB0),
            command(0x10),
            command(0x04),
        ]
    );
    assert_eq!(sim.lcd.len(), 4 + LCD_WIDTH);
    assert!(sim.lcd[4..].iter().all(|&b| b == data(0x81)));
}

#[test]
fn full_screen_blit_walks_pages_one_to_seven() {
    let (sim, mut board) = common::board();
    let display = Display::new();
    display.blit_full_screen(&mut board);

    let sim = sim.borrow();
    assert_eq!(sim.lcd[0], command(cmd::START_LINE_0));
    let pages: Vec<u8> = sim
        .lcd
        .iter()
        .filter(|b| !b.data && b.value & 0xF0 == cmd::PAGE_ADDRESS)
        .map(|b| b.value & 0x0F)
        .collect();
    assert_eq!(pages, vec![1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn draw_line_streams_bitmap_and_updates_buffer() {
    let (sim, mut board) = common::board();
    let mut display = Display::new();
    display.draw_line(&mut board, 10, 3, LineContent::Bitmap(&[1, 2, 3]));

    assert_eq!(&sim.borrow().lcd[..], &[
        command(0xB3),
        command(0x10),
        command(0x0E),
        data(1),
        data(2),
        data(3),
    ]);
    assert_eq!(&display.frame().page(2).unwrap()[9..14], &[0, 1, 2, 3, 0]);
}

#[test]
fn draw_line_clear_zeroes_exactly_the_run() {
    let (sim, mut board) = common::board();
    let mut display = Display::new();
    display.fill_screen(&mut board, 0xFF);
    sim.borrow_mut().lcd.clear();

    display.draw_line(&mut board, 5, 0, LineContent::Clear(4));

    let status = display.status().as_bytes();
    assert!(status[..5].iter().all(|&b| b == 0xFF));
    assert!(status[5..9].iter().all(|&b| b == 0));
    assert!(status[9..].iter().all(|&b| b == 0xFF));
    assert_eq!(sim.borrow().lcd.iter().filter(|b| b.data).count(), 4);
}

#[test]
fn draw_line_clips_at_the_right_edge() {
    let (sim, mut board) = common::board();
    let mut display = Display::new();
    display.draw_line(&mut board, 126, 1, LineContent::Bitmap(&[7, 7, 7, 7]));
    assert_eq!(sim.borrow().lcd.iter().filter(|b| b.data).count(), 2);
    assert_eq!(&display.frame().page(0).unwrap()[126..], &[7, 7]);

    sim.borrow_mut().lcd.clear();
    display.draw_line(&mut board, 128, 1, LineContent::Bitmap(&[7]));
    assert!(sim.borrow().lcd.is_empty());
}

#[test]
fn draw_line_ignores_lines_past_the_last_page() {
    let (sim, mut board) = common::board();
    let mut display = Display::new();
    let before = display.frame().clone();
    sim.borrow_mut().lcd.clear();

    for line in [8u8, 79, 80, 255] {
        display.draw_line(&mut board, 0, line, LineContent::Clear(1));
        display.draw_line(&mut board, 0, line, LineContent::Bitmap(&[0xFF]));
    }

    assert!(sim.borrow().lcd.is_empty());
    assert_eq!(display.frame(), &before);
    assert!(display.status().as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn draw_line_reaches_the_last_page() {
    let (sim, mut board) = common::board();
    let mut display = Display::new();
    sim.borrow_mut().lcd.clear();
    display.draw_line(&mut board, 0, FRAME_PAGES as u8, LineContent::Bitmap(&[0x81]));
    assert_eq!(display.frame().page(FRAME_PAGES - 1).unwrap()[0], 0x81);
    assert_eq!(sim.borrow().lcd.iter().filter(|b| b.data).count(), 1);
}

#[test]
fn chip_select_is_released_after_a_transfer() {
    let (sim, mut board) = common::board();
    Display::new().blit_status_line(&mut board);
    assert!(sim.borrow().output(k5_firmware::hal::pins::Pin::St7565Cs));
}
