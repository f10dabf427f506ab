//! Keypad Tests
//!
//! Matrix scanning against a simulated keypad, and the debounce record.
//! Run with: cargo test --features std --test keyboard_tests

mod common;

use k5_firmware::drivers::keyboard::{KeyCode, KeyState};
use k5_firmware::hal::pins::Pin;

const MATRIX_KEYS: [KeyCode; 16] = [
    KeyCode::Menu,
    KeyCode::Key1,
    KeyCode::Key4,
    KeyCode::Key7,
    KeyCode::Up,
    KeyCode::Key2,
    KeyCode::Key5,
    KeyCode::Key8,
    KeyCode::Down,
    KeyCode::Key3,
    KeyCode::Key6,
    KeyCode::Key9,
    KeyCode::Exit,
    KeyCode::Star,
    KeyCode::Key0,
    KeyCode::F,
];

fn assert_rows_idle(sim: &common::Sim) {
    assert!(sim.output(Pin::Keyboard4));
    assert!(sim.output(Pin::Keyboard5));
    assert!(!sim.output(Pin::Keyboard6));
    assert!(sim.output(Pin::Keyboard7));
}

// =============================================================================
// Scanning
// =============================================================================

#[test]
fn no_key_reads_invalid() {
    let (sim, mut board) = common::board();
    assert_eq!(board.keyboard().poll(), KeyCode::Invalid);
    assert_rows_idle(&sim.borrow());
}

#[test]
fn every_matrix_key_is_found() {
    let (sim, mut board) = common::board();
    for key in MATRIX_KEYS {
        sim.borrow_mut().pressed = Some(key);
        assert_eq!(board.keyboard().poll(), key);
        assert_rows_idle(&sim.borrow());
    }
}

#[test]
fn side_keys_win_over_the_matrix() {
    let (sim, mut board) = common::board();
    sim.borrow_mut().pressed = Some(KeyCode::Side1);
    assert_eq!(board.keyboard().poll(), KeyCode::Side1);
    sim.borrow_mut().pressed = Some(KeyCode::Side2);
    assert_eq!(board.keyboard().poll(), KeyCode::Side2);
}

#[test]
fn release_reads_invalid_again() {
    let (sim, mut board) = common::board();
    sim.borrow_mut().pressed = Some(KeyCode::Key5);
    assert_eq!(board.keyboard().poll(), KeyCode::Key5);
    sim.borrow_mut().pressed = None;
    assert_eq!(board.keyboard().poll(), KeyCode::Invalid);
}

// =============================================================================
// Key Codes
// =============================================================================

#[test]
fn digits() {
    assert_eq!(KeyCode::Key0.digit(), Some(0));
    assert_eq!(KeyCode::Key9.digit(), Some(9));
    assert_eq!(KeyCode::Menu.digit(), None);
    assert_eq!(KeyCode::Invalid.digit(), None);
}

#[test]
fn default_is_invalid() {
    assert_eq!(KeyCode::default(), KeyCode::Invalid);
}

// =============================================================================
// Debounce Record
// =============================================================================

#[test]
fn identical_scans_count_up() {
    let mut state = KeyState::new();
    assert_eq!(state.record(KeyCode::Key1), 0);
    assert_eq!(state.record(KeyCode::Key1), 1);
    assert_eq!(state.record(KeyCode::Key1), 2);
    assert_eq!(state.reading0, KeyCode::Key1);
    assert_eq!(state.reading1, KeyCode::Key1);
}

#[test]
fn change_resets_the_count() {
    let mut state = KeyState::new();
    state.record(KeyCode::Key1);
    state.record(KeyCode::Key1);
    assert_eq!(state.record(KeyCode::Key2), 0);
    assert_eq!(state.reading1, KeyCode::Key1);
}

#[test]
fn idle_scans_also_count() {
    let mut state = KeyState::default();
    assert_eq!(state.record(KeyCode::Invalid), 1);
    assert!(!state.was_f_key_pressed);
}
