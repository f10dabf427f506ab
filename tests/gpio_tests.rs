//! Pin Map and Board Tests
//!
//! Tests for the per-revision pin tables, the GPIO primitives and the
//! shared-line claims.
//! Run with: cargo test --features std --test gpio_tests

mod common;

use std::collections::HashSet;

use k5_firmware::hal::pins::{BoardV1, BoardV2, Direction, PhysicalPin, Pin, PinMap};
use k5_firmware::hal::poll::poll_bounded;

// =============================================================================
// Pin Tables
// =============================================================================

#[test]
fn v2_routes_every_pin() {
    for pin in Pin::ALL {
        assert!(BoardV2::physical(pin).is_some(), "{pin:?} unrouted on v2");
    }
}

#[test]
fn v1_lcd_serial_lines_are_unrouted() {
    assert_eq!(BoardV1::physical(Pin::St7565Cs), None);
    assert_eq!(BoardV1::physical(Pin::St7565Sclk), None);
    assert_eq!(BoardV1::physical(Pin::St7565Sda), None);
    assert!(BoardV1::physical(Pin::St7565A0).is_some());
    assert!(BoardV1::physical(Pin::St7565Res).is_some());
}

#[test]
fn v2_fm_enable_shares_lcd_reset() {
    assert_eq!(
        BoardV2::physical(Pin::Bk1080),
        BoardV2::physical(Pin::St7565Res)
    );
}

#[test]
fn no_other_pins_collide() {
    fn unique<B: PinMap>(allowed_shared: &[Pin]) {
        let mut seen = HashSet::new();
        for pin in Pin::ALL {
            if allowed_shared.contains(&pin) {
                continue;
            }
            if let Some(p) = B::physical(pin) {
                assert!(seen.insert(p), "{pin:?} collides on {}", B::NAME);
            }
        }
    }
    unique::<BoardV1>(&[]);
    unique::<BoardV2>(&[Pin::Bk1080]);
}

#[test]
fn bus_aliases_follow_keypad_lines() {
    assert_eq!(Pin::I2C_SCL, Pin::Keyboard4);
    assert_eq!(Pin::I2C_SDA, Pin::Keyboard5);
    assert_eq!(Pin::VOICE_0, Pin::Keyboard6);
    assert_eq!(Pin::VOICE_1, Pin::Keyboard7);
}

#[test]
fn physical_pin_packing() {
    let p = PhysicalPin::new(BoardV2::PORT_B, 7);
    assert_eq!(p.port_offset(), 0x0400);
    assert_eq!(p.bit(), 7);
    assert_eq!(p.mask(), 0x80);
    assert_eq!(p.raw(), 0x0400_0007);
}

#[test]
fn v2_keypad_lines() {
    assert_eq!(
        BoardV2::physical(Pin::Keyboard0),
        Some(PhysicalPin::new(BoardV2::PORT_F, 0))
    );
    assert_eq!(
        BoardV2::physical(Pin::Keyboard7),
        Some(PhysicalPin::new(BoardV2::PORT_B, 0))
    );
    assert_eq!(
        BoardV2::physical(Pin::AudioPath),
        Some(PhysicalPin::new(BoardV2::PORT_B, 7))
    );
}

// =============================================================================
// Board Init and Idle Lines
// =============================================================================

#[test]
fn init_leaves_keypad_idle() {
    let (sim, _board) = common::board();
    let sim = sim.borrow();
    assert!(sim.output(Pin::Keyboard4));
    assert!(sim.output(Pin::Keyboard5));
    assert!(!sim.output(Pin::Keyboard6));
    assert!(sim.output(Pin::Keyboard7));
    for row in Pin::ROWS {
        assert_eq!(sim.direction(row), Direction::Output);
    }
    for column in Pin::COLUMNS {
        assert_eq!(sim.direction(column), Direction::Input);
    }
    assert_eq!(sim.direction(Pin::Ptt), Direction::Input);
}

#[test]
#[cfg(not(feature = "board-v1"))]
fn init_deselects_lcd_and_silences_amp() {
    let (sim, _board) = common::board();
    let sim = sim.borrow();
    assert!(sim.output(Pin::St7565Cs));
    assert!(!sim.output(Pin::AudioPath));
    assert!(!sim.output(Pin::Flashlight));
}

#[test]
fn dropping_a_claim_restores_idle() {
    let (sim, mut board) = common::board();
    {
        let mut lines = board.claim_shared();
        lines.clear(Pin::Keyboard4);
        lines.clear(Pin::Keyboard5);
        lines.set(Pin::Keyboard6);
        lines.clear(Pin::Keyboard7);
        lines.set_direction(Pin::Keyboard5, Direction::Input);
    }
    let sim = sim.borrow();
    assert!(sim.output(Pin::Keyboard4));
    assert!(sim.output(Pin::Keyboard5));
    assert!(!sim.output(Pin::Keyboard6));
    assert!(sim.output(Pin::Keyboard7));
    assert_eq!(sim.direction(Pin::Keyboard5), Direction::Output);
}

// =============================================================================
// Helpers on the GPIO layer
// =============================================================================

#[test]
fn ptt_is_active_low() {
    let (sim, mut board) = common::board();
    assert!(!board.is_ptt_pressed());
    sim.borrow_mut().ptt = true;
    assert!(board.is_ptt_pressed());
}

#[test]
fn flashlight_toggles() {
    let (sim, mut board) = common::board();
    board.toggle_flashlight();
    assert!(sim.borrow().output(Pin::Flashlight));
    board.toggle_flashlight();
    assert!(!sim.borrow().output(Pin::Flashlight));
    board.set_flashlight(true);
    assert!(sim.borrow().output(Pin::Flashlight));
}

#[test]
fn audio_path_switches_amp() {
    let (sim, mut board) = common::board();
    board.set_audio_path(true);
    board.set_audio_path(false);
    assert_eq!(
        sim.borrow().events,
        vec![common::Event::Amp(true), common::Event::Amp(false)]
    );
}

// =============================================================================
// Bounded Polling
// =============================================================================

#[test]
fn poll_reports_attempts_on_timeout() {
    let err = poll_bounded(255, || false).unwrap_err();
    assert_eq!(err.attempts, 255);
    assert_eq!(err.to_string(), "condition not met after 255 attempts");
}

#[test]
fn poll_with_zero_limit_never_evaluates() {
    let mut calls = 0;
    assert!(poll_bounded(0, || {
        calls += 1;
        true
    })
    .is_err());
    assert_eq!(calls, 0);
}
