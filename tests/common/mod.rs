//! Simulated K5 board for host tests
//!
//! One shared [`Sim`] sits behind the GPIO, the delay and the radio chip
//! mocks so a test can look at everything that happened in order. The sim
//! plays the parts of the hardware on the far side of the pins: the keypad
//! matrix, a 24xx EEPROM on the I2C lines, the LCD controller and the voice
//! chip.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use k5_firmware::config::{EEPROM_SIZE, VOICE_START_PULSE_MS};
use k5_firmware::drivers::keyboard::KeyCode;
use k5_firmware::hal::board::Board;
use k5_firmware::hal::gpio::Gpio;
use k5_firmware::hal::pins::{ActiveBoard, Direction, Pin, PinMap};
use k5_firmware::radio::{AfMode, FmReceiver, Transceiver};

// ============================================================================
// Event log
// ============================================================================

/// Something observable that happened on the simulated board
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Amplifier switched
    Amp(bool),
    /// Millisecond busy-wait
    DelayMs(u32),
    /// Transceiver register read
    ReadRegister(u8),
    /// Transceiver register write
    WriteRegister(u8, u16),
    /// Tone generator started
    Tone(u16),
    /// Tone output muted
    EnterTxMute,
    /// Tone output unmuted
    ExitTxMute,
    /// AF routing changed
    Af(AfMode),
    /// Receiver woken
    RxTurnOn,
    /// Transceiver asleep
    Sleep,
    /// Tones off, receiver on
    TonesOffRxOn,
    /// FM receiver muted or unmuted
    FmMute(bool),
    /// Voice chip received a clip code
    Voice(u8),
}

// ============================================================================
// I2C EEPROM slave
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Receive { bits: u8, byte: u8 },
    AckReceived,
    Transmit { bit: u8 },
    AckFromMaster { acked: bool },
}

/// 24xx EEPROM answering on the shared keypad lines
pub struct EepromSlave {
    /// Device contents
    pub memory: Vec<u8>,
    /// When false the device never acknowledges
    pub present: bool,
    /// Data bytes written by the master
    pub bytes_written: usize,
    /// Write transactions that carried data
    pub write_transactions: usize,
    phase: Phase,
    drive_low: bool,
    first_byte: bool,
    reading: bool,
    address_bytes: u8,
    pointer: usize,
    wrote_data: bool,
}

impl EepromSlave {
    fn new() -> Self {
        Self {
            memory: vec![0xFF; EEPROM_SIZE],
            present: true,
            bytes_written: 0,
            write_transactions: 0,
            phase: Phase::Idle,
            drive_low: false,
            first_byte: false,
            reading: false,
            address_bytes: 0,
            pointer: 0,
            wrote_data: false,
        }
    }

    fn start(&mut self) {
        self.finish_write();
        self.phase = Phase::Receive { bits: 0, byte: 0 };
        self.first_byte = true;
        self.drive_low = false;
    }

    fn stop(&mut self) {
        self.finish_write();
        self.phase = Phase::Idle;
        self.drive_low = false;
    }

    fn finish_write(&mut self) {
        if self.wrote_data {
            self.write_transactions += 1;
            self.wrote_data = false;
        }
    }

    fn current_bit(&self, bit: u8) -> bool {
        let byte = self.memory.get(self.pointer).copied().unwrap_or(0xFF);
        byte & (0x80 >> bit) != 0
    }

    fn scl_rising(&mut self, sda: bool) {
        match self.phase {
            Phase::Receive { bits, byte } if bits < 8 => {
                self.phase = Phase::Receive {
                    bits: bits + 1,
                    byte: (byte << 1) | u8::from(sda),
                };
            }
            Phase::AckFromMaster { .. } => {
                self.phase = Phase::AckFromMaster { acked: !sda };
            }
            _ => {}
        }
    }

    fn scl_falling(&mut self) {
        match self.phase {
            Phase::Receive { bits: 8, byte } => self.byte_received(byte),
            Phase::AckReceived => {
                self.drive_low = false;
                if self.reading {
                    self.phase = Phase::Transmit { bit: 0 };
                    self.drive_low = !self.current_bit(0);
                } else {
                    self.phase = Phase::Receive { bits: 0, byte: 0 };
                }
            }
            Phase::Transmit { bit } => {
                let next = bit + 1;
                if next == 8 {
                    self.drive_low = false;
                    self.phase = Phase::AckFromMaster { acked: false };
                } else {
                    self.phase = Phase::Transmit { bit: next };
                    self.drive_low = !self.current_bit(next);
                }
            }
            Phase::AckFromMaster { acked } => {
                self.pointer += 1;
                if acked {
                    self.phase = Phase::Transmit { bit: 0 };
                    self.drive_low = !self.current_bit(0);
                } else {
                    self.phase = Phase::Idle;
                    self.drive_low = false;
                }
            }
            _ => {}
        }
    }

    fn byte_received(&mut self, byte: u8) {
        if !self.present {
            self.phase = Phase::Idle;
            return;
        }
        if self.first_byte {
            self.first_byte = false;
            match byte {
                0xA0 => {
                    self.reading = false;
                    self.address_bytes = 0;
                }
                0xA1 => self.reading = true,
                _ => {
                    self.phase = Phase::Idle;
                    return;
                }
            }
        } else if self.address_bytes < 2 {
            self.pointer = if self.address_bytes == 0 {
                usize::from(byte) << 8
            } else {
                self.pointer | usize::from(byte)
            };
            self.address_bytes += 1;
        } else {
            if let Some(slot) = self.memory.get_mut(self.pointer) {
                *slot = byte;
            }
            self.pointer += 1;
            self.bytes_written += 1;
            self.wrote_data = true;
        }
        self.drive_low = true;
        self.phase = Phase::AckReceived;
    }
}

// ============================================================================
// LCD and voice chip decoders
// ============================================================================

/// One byte shifted into the LCD controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LcdByte {
    /// A0 level: false for commands, true for data
    pub data: bool,
    /// The byte
    pub value: u8,
}

#[derive(Default)]
struct ShiftIn {
    bits: u8,
    value: u8,
}

// ============================================================================
// Shared simulation state
// ============================================================================

/// Everything on the far side of the pins
pub struct Sim {
    directions: HashMap<Pin, Direction>,
    outputs: HashMap<Pin, bool>,
    /// Key held down, if any
    pub pressed: Option<KeyCode>,
    /// PTT held down
    pub ptt: bool,
    /// EEPROM on the I2C lines
    pub eeprom: EepromSlave,
    /// Bytes the LCD controller received
    pub lcd: Vec<LcdByte>,
    lcd_shift: ShiftIn,
    voice_frame: Option<ShiftIn>,
    /// Ordered log
    pub events: Vec<Event>,
    /// Total busy-wait time
    pub elapsed_ns: u64,
    /// Transceiver registers
    pub registers: HashMap<u8, u16>,
    scl_line: bool,
    sda_line: bool,
}

/// Keypad matrix position of a key: (row line 0..4, column 0..4)
pub fn matrix_position(key: KeyCode) -> Option<(usize, usize)> {
    const MATRIX: [[KeyCode; 4]; 4] = [
        [KeyCode::Menu, KeyCode::Key1, KeyCode::Key4, KeyCode::Key7],
        [KeyCode::Up, KeyCode::Key2, KeyCode::Key5, KeyCode::Key8],
        [KeyCode::Down, KeyCode::Key3, KeyCode::Key6, KeyCode::Key9],
        [KeyCode::Exit, KeyCode::Star, KeyCode::Key0, KeyCode::F],
    ];
    MATRIX.iter().enumerate().find_map(|(row, keys)| {
        keys.iter().position(|&k| k == key).map(|col| (row, col))
    })
}

fn is_routed(pin: Pin) -> bool {
    ActiveBoard::physical(pin).is_some()
}

impl Sim {
    fn new() -> Self {
        Self {
            directions: HashMap::new(),
            outputs: HashMap::new(),
            pressed: None,
            ptt: false,
            eeprom: EepromSlave::new(),
            lcd: Vec::new(),
            lcd_shift: ShiftIn::default(),
            voice_frame: None,
            events: Vec::new(),
            elapsed_ns: 0,
            registers: HashMap::new(),
            scl_line: true,
            sda_line: true,
        }
    }

    /// Driven output level of a pin
    pub fn output(&self, pin: Pin) -> bool {
        self.outputs.get(&pin).copied().unwrap_or(false)
    }

    /// Configured direction of a pin
    pub fn direction(&self, pin: Pin) -> Direction {
        self.directions.get(&pin).copied().unwrap_or(Direction::Input)
    }

    fn driven(&self, pin: Pin) -> bool {
        self.direction(pin) == Direction::Output && self.output(pin)
    }

    fn i2c_lines(&self) -> (bool, bool) {
        let scl = self.direction(Pin::I2C_SCL) == Direction::Input || self.output(Pin::I2C_SCL);
        let master_sda =
            self.direction(Pin::I2C_SDA) == Direction::Input || self.output(Pin::I2C_SDA);
        (scl, master_sda && !self.eeprom.drive_low)
    }

    fn column_level(&self, column: usize) -> bool {
        match self.pressed {
            Some(KeyCode::Side1) if column == 0 => return false,
            Some(KeyCode::Side2) if column == 1 => return false,
            _ => {}
        }
        let Some(key) = self.pressed else {
            return true;
        };
        match matrix_position(key) {
            Some((row, col)) if col == column => self.driven(Pin::ROWS[row]),
            _ => true,
        }
    }

    /// Level seen on an input pin
    pub fn input(&self, pin: Pin) -> bool {
        if let Some(column) = Pin::COLUMNS.iter().position(|&c| c == pin) {
            return self.column_level(column);
        }
        match pin {
            Pin::Ptt => !self.ptt,
            p if p == Pin::I2C_SDA => self.i2c_lines().1,
            p if p == Pin::I2C_SCL => self.i2c_lines().0,
            p if self.direction(p) == Direction::Output => self.output(p),
            _ => true,
        }
    }

    fn before(&self, pin: Pin) -> bool {
        self.output(pin)
    }

    fn after(&mut self, pin: Pin, was: bool) {
        let now = self.output(pin);

        if pin == Pin::AudioPath {
            self.events.push(Event::Amp(now));
        }

        if pin == Pin::St7565Sclk && !was && now && !self.output(Pin::St7565Cs) {
            let data = self.output(Pin::St7565Sda);
            self.lcd_shift.value = (self.lcd_shift.value << 1) | u8::from(data);
            self.lcd_shift.bits += 1;
            if self.lcd_shift.bits == 8 {
                self.lcd.push(LcdByte {
                    data: self.output(Pin::St7565A0),
                    value: self.lcd_shift.value,
                });
                self.lcd_shift = ShiftIn::default();
            }
        }
        if pin == Pin::St7565Cs && now {
            self.lcd_shift = ShiftIn::default();
        }

        if pin == Pin::VOICE_0 && !was && now {
            let data = self.output(Pin::VOICE_1);
            if let Some(frame) = self.voice_frame.as_mut() {
                frame.value = (frame.value << 1) | u8::from(data);
                frame.bits += 1;
                if frame.bits == 8 {
                    let id = frame.value;
                    self.voice_frame = None;
                    self.events.push(Event::Voice(id));
                }
            }
        }

        self.update_i2c();
    }

    fn update_i2c(&mut self) {
        let (scl, sda) = self.i2c_lines();
        let (was_scl, was_sda) = (self.scl_line, self.sda_line);
        if scl && was_scl && was_sda && !sda {
            self.eeprom.start();
        } else if scl && was_scl && !was_sda && sda {
            self.eeprom.stop();
        } else if scl && !was_scl {
            self.eeprom.scl_rising(sda);
        } else if !scl && was_scl {
            self.eeprom.scl_falling();
        }
        let (scl, sda) = self.i2c_lines();
        self.scl_line = scl;
        self.sda_line = sda;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.elapsed_ns += u64::from(ms) * 1_000_000;
        self.events.push(Event::DelayMs(ms));
        if ms == VOICE_START_PULSE_MS && self.output(Pin::VOICE_0) {
            self.voice_frame = Some(ShiftIn::default());
        }
    }

    /// Voice clip codes received so far
    pub fn voice_ids(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Voice(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Events other than delays
    pub fn actions(&self) -> Vec<Event> {
        self.events
            .iter()
            .copied()
            .filter(|e| !matches!(e, Event::DelayMs(_)))
            .collect()
    }
}

/// Handle to the shared simulation
pub type SimHandle = Rc<RefCell<Sim>>;

// ============================================================================
// GPIO, delay and chip mocks
// ============================================================================

/// GPIO backed by the sim
pub struct SimGpio(pub SimHandle);

impl Gpio for SimGpio {
    fn set_direction(&mut self, pin: Pin, direction: Direction) {
        if !is_routed(pin) {
            return;
        }
        let mut sim = self.0.borrow_mut();
        sim.directions.insert(pin, direction);
        sim.update_i2c();
    }

    fn set_output(&mut self, pin: Pin) {
        self.write(pin, true);
    }

    fn clear_output(&mut self, pin: Pin) {
        self.write(pin, false);
    }

    fn toggle_output(&mut self, pin: Pin) {
        let level = self.0.borrow().output(pin);
        self.write(pin, !level);
    }

    fn read_input(&mut self, pin: Pin) -> bool {
        if !is_routed(pin) {
            return false;
        }
        self.0.borrow().input(pin)
    }

    fn write(&mut self, pin: Pin, high: bool) {
        if !is_routed(pin) {
            return;
        }
        let mut sim = self.0.borrow_mut();
        let was = sim.before(pin);
        sim.outputs.insert(pin, high);
        sim.after(pin, was);
    }
}

/// Delay that only advances simulated time
pub struct SimDelay(pub SimHandle);

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().elapsed_ns += u64::from(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().elapsed_ns += u64::from(us) * 1000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.borrow_mut().delay_ms(ms);
    }
}

/// Transceiver that records every call
pub struct MockTransceiver(pub SimHandle);

impl Transceiver for MockTransceiver {
    fn read_register(&mut self, register: u8) -> u16 {
        let mut sim = self.0.borrow_mut();
        sim.events.push(Event::ReadRegister(register));
        sim.registers.get(&register).copied().unwrap_or(0)
    }

    fn write_register(&mut self, register: u8, value: u16) {
        let mut sim = self.0.borrow_mut();
        sim.events.push(Event::WriteRegister(register, value));
        sim.registers.insert(register, value);
    }

    fn play_tone(&mut self, frequency_hz: u16, _tuning_gain: bool) {
        self.0.borrow_mut().events.push(Event::Tone(frequency_hz));
    }

    fn enter_tx_mute(&mut self) {
        self.0.borrow_mut().events.push(Event::EnterTxMute);
    }

    fn exit_tx_mute(&mut self) {
        self.0.borrow_mut().events.push(Event::ExitTxMute);
    }

    fn set_af(&mut self, mode: AfMode) {
        self.0.borrow_mut().events.push(Event::Af(mode));
    }

    fn rx_turn_on(&mut self) {
        self.0.borrow_mut().events.push(Event::RxTurnOn);
    }

    fn sleep(&mut self) {
        self.0.borrow_mut().events.push(Event::Sleep);
    }

    fn turn_off_tones_turn_on_rx(&mut self) {
        self.0.borrow_mut().events.push(Event::TonesOffRxOn);
    }
}

/// FM receiver that records mute changes
pub struct MockFm(pub SimHandle);

impl FmReceiver for MockFm {
    fn mute(&mut self, mute: bool) {
        self.0.borrow_mut().events.push(Event::FmMute(mute));
    }
}

/// Simulated board with its pins initialised
pub type SimBoard = Board<SimGpio, SimDelay>;

/// A fresh sim and an initialised board wired to it
pub fn board() -> (SimHandle, SimBoard) {
    let sim = Rc::new(RefCell::new(Sim::new()));
    let mut board = Board::new(SimGpio(sim.clone()), SimDelay(sim.clone()));
    board.init_pins();
    sim.borrow_mut().events.clear();
    (sim, board)
}
