//! Logical pins and per-revision mapping tables
//!
//! Every signal the firmware touches is a [`Pin`]. Signals that share a wire
//! are expressed as associated constants so that aliasing is visible at the
//! call site: the EEPROM clock *is* keyboard line 4.

/// Logical pin identifier
///
/// The set is closed; an out-of-range pin cannot be named.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Pin {
    /// Keypad column input 0 (also the side key 1 sense)
    Keyboard0,
    /// Keypad column input 1 (also the side key 2 sense)
    Keyboard1,
    /// Keypad column input 2
    Keyboard2,
    /// Keypad column input 3
    Keyboard3,
    /// Keypad row output 4 (I2C SCL)
    Keyboard4,
    /// Keypad row output 5 (I2C SDA)
    Keyboard5,
    /// Keypad row output 6 (voice chip strobe)
    Keyboard6,
    /// Keypad row output 7 (voice chip data)
    Keyboard7,
    /// LCD backlight enable
    Backlight,
    /// LCD command/data select
    St7565A0,
    /// LCD reset (active low)
    St7565Res,
    /// LCD chip select (active low)
    St7565Cs,
    /// LCD serial clock
    St7565Sclk,
    /// LCD serial data
    St7565Sda,
    /// FM receiver enable
    Bk1080,
    /// Transceiver serial chip enable
    Bk4819Scn,
    /// Transceiver serial clock
    Bk4819Scl,
    /// Transceiver serial data
    Bk4819Sda,
    /// Flashlight LED
    Flashlight,
    /// Audio amplifier enable
    AudioPath,
    /// Push-to-talk input
    Ptt,
}

impl Pin {
    /// EEPROM bus clock
    pub const I2C_SCL: Self = Self::Keyboard4;
    /// EEPROM bus data
    pub const I2C_SDA: Self = Self::Keyboard5;
    /// Voice chip strobe line
    pub const VOICE_0: Self = Self::Keyboard6;
    /// Voice chip data line
    pub const VOICE_1: Self = Self::Keyboard7;

    /// Keypad column inputs, column 0 first
    pub const COLUMNS: [Self; 4] = [
        Self::Keyboard0,
        Self::Keyboard1,
        Self::Keyboard2,
        Self::Keyboard3,
    ];

    /// Keypad row outputs, line 4 first
    pub const ROWS: [Self; 4] = [
        Self::Keyboard4,
        Self::Keyboard5,
        Self::Keyboard6,
        Self::Keyboard7,
    ];

    /// Every logical pin
    pub const ALL: [Self; 21] = [
        Self::Keyboard0,
        Self::Keyboard1,
        Self::Keyboard2,
        Self::Keyboard3,
        Self::Keyboard4,
        Self::Keyboard5,
        Self::Keyboard6,
        Self::Keyboard7,
        Self::Backlight,
        Self::St7565A0,
        Self::St7565Res,
        Self::St7565Cs,
        Self::St7565Sclk,
        Self::St7565Sda,
        Self::Bk1080,
        Self::Bk4819Scn,
        Self::Bk4819Scl,
        Self::Bk4819Sda,
        Self::Flashlight,
        Self::AudioPath,
        Self::Ptt,
    ];
}

#[cfg(feature = "embedded")]
impl defmt::Format for Pin {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Pin({})", *self as u8);
    }
}

/// Pin direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// High impedance, readable
    Input,
    /// Push-pull driven
    Output,
}

/// Physical pin: port register offset and bit index packed as
/// `port_offset << 16 | bit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhysicalPin(u32);

impl PhysicalPin {
    /// Pack a port offset and bit index
    #[must_use]
    pub const fn new(port_offset: u16, bit: u8) -> Self {
        Self(((port_offset as u32) << 16) | (bit as u32 & 0x0F))
    }

    /// Offset of the port block from the revision's GPIO base
    #[must_use]
    pub const fn port_offset(self) -> u16 {
        (self.0 >> 16) as u16
    }

    /// Bit index within the port
    #[must_use]
    pub const fn bit(self) -> u8 {
        (self.0 & 0xFFFF) as u8
    }

    /// Single-bit mask for data registers
    #[must_use]
    pub const fn mask(self) -> u32 {
        1 << self.bit()
    }

    /// Packed encoding
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PhysicalPin {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "P{:04X}.{}", self.port_offset(), self.bit());
    }
}

/// Logical-to-physical mapping for one hardware revision
pub trait PinMap {
    /// Revision name for boot logs
    const NAME: &'static str;

    /// Physical location of a logical pin, `None` where the revision does
    /// not route the signal to a GPIO.
    fn physical(pin: Pin) -> Option<PhysicalPin>;
}

/// First revision, DP32G030
///
/// The LCD runs from the hardware SPI block on this board, so its clock,
/// data and chip select are not GPIO-routed.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoardV1;

impl BoardV1 {
    /// GPIOA block offset
    pub const PORT_A: u16 = 0x0000;
    /// GPIOB block offset
    pub const PORT_B: u16 = 0x0800;
    /// GPIOC block offset
    pub const PORT_C: u16 = 0x1000;
}

impl PinMap for BoardV1 {
    const NAME: &'static str = "DP32G030";

    fn physical(pin: Pin) -> Option<PhysicalPin> {
        let (port, bit) = match pin {
            Pin::Keyboard0 => (Self::PORT_A, 3),
            Pin::Keyboard1 => (Self::PORT_A, 4),
            Pin::Keyboard2 => (Self::PORT_A, 5),
            Pin::Keyboard3 => (Self::PORT_A, 6),
            Pin::Keyboard4 => (Self::PORT_A, 10),
            Pin::Keyboard5 => (Self::PORT_A, 11),
            Pin::Keyboard6 => (Self::PORT_A, 12),
            Pin::Keyboard7 => (Self::PORT_A, 13),
            Pin::Backlight => (Self::PORT_B, 6),
            Pin::St7565A0 => (Self::PORT_B, 9),
            Pin::St7565Res => (Self::PORT_B, 11),
            Pin::St7565Cs | Pin::St7565Sclk | Pin::St7565Sda => return None,
            Pin::Bk1080 => (Self::PORT_B, 15),
            Pin::Bk4819Scn => (Self::PORT_C, 0),
            Pin::Bk4819Scl => (Self::PORT_C, 1),
            Pin::Bk4819Sda => (Self::PORT_C, 2),
            Pin::Flashlight => (Self::PORT_C, 3),
            Pin::AudioPath => (Self::PORT_C, 4),
            Pin::Ptt => (Self::PORT_C, 5),
        };
        Some(PhysicalPin::new(port, bit))
    }
}

/// Second revision, PY32F071
///
/// The FM receiver enable shares PA13 with the LCD reset.
#[derive(Clone, Copy, Debug, Default)]
pub struct BoardV2;

impl BoardV2 {
    /// GPIOA block offset from IOPORT
    pub const PORT_A: u16 = 0x0000;
    /// GPIOB block offset from IOPORT
    pub const PORT_B: u16 = 0x0400;
    /// GPIOF block offset from IOPORT
    pub const PORT_F: u16 = 0x1400;
}

impl PinMap for BoardV2 {
    const NAME: &'static str = "PY32F071";

    fn physical(pin: Pin) -> Option<PhysicalPin> {
        let (port, bit) = match pin {
            Pin::Keyboard0 => (Self::PORT_F, 0),
            Pin::Keyboard1 => (Self::PORT_F, 1),
            Pin::Keyboard2 => (Self::PORT_A, 0),
            Pin::Keyboard3 => (Self::PORT_A, 1),
            Pin::Keyboard4 => (Self::PORT_A, 5),
            Pin::Keyboard5 => (Self::PORT_A, 6),
            Pin::Keyboard6 => (Self::PORT_A, 7),
            Pin::Keyboard7 => (Self::PORT_B, 0),
            Pin::Backlight => (Self::PORT_A, 8),
            Pin::St7565A0 => (Self::PORT_A, 11),
            Pin::St7565Res | Pin::Bk1080 => (Self::PORT_A, 13),
            Pin::St7565Cs => (Self::PORT_A, 9),
            Pin::St7565Sclk => (Self::PORT_A, 10),
            Pin::St7565Sda => (Self::PORT_A, 12),
            Pin::Bk4819Scn => (Self::PORT_B, 3),
            Pin::Bk4819Scl => (Self::PORT_B, 4),
            Pin::Bk4819Sda => (Self::PORT_B, 5),
            Pin::Flashlight => (Self::PORT_B, 6),
            Pin::AudioPath => (Self::PORT_B, 7),
            Pin::Ptt => (Self::PORT_A, 3),
        };
        Some(PhysicalPin::new(port, bit))
    }
}

/// Mapping compiled into this build
#[cfg(feature = "board-v1")]
pub type ActiveBoard = BoardV1;

/// Mapping compiled into this build
#[cfg(not(feature = "board-v1"))]
pub type ActiveBoard = BoardV2;
