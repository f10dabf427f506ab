//! DTMF code validation
//!
//! Stored codes are NUL- or 0xFF-terminated runs of DTMF symbols. Only the
//! shape is checked here; what the codes mean belongs to the DTMF engine.

/// `0-9`, `A-D`, `*` or `#`
#[must_use]
pub const fn is_dtmf_symbol(b: u8) -> bool {
    matches!(b, b'0'..=b'9' | b'A'..=b'D' | b'*' | b'#')
}

const fn is_terminator(b: u8) -> bool {
    b == 0x00 || b == 0xFF
}

/// Check a stored code in place.
///
/// An empty code (first byte a terminator) is invalid. Scanning stops at the
/// first terminator, which is rewritten to `0x00`; every byte before it must
/// be a DTMF symbol.
pub fn validate_codes(code: &mut [u8]) -> bool {
    match code.first() {
        None => return false,
        Some(&b) if is_terminator(b) => return false,
        Some(_) => {}
    }
    for b in code.iter_mut() {
        if is_terminator(*b) {
            *b = 0;
            return true;
        }
        if !is_dtmf_symbol(*b) {
            return false;
        }
    }
    true
}

/// Fixed-size stored DTMF code
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DtmfString<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> DtmfString<N> {
    /// Build a zero-padded code from a literal; longer input is truncated
    #[must_use]
    pub const fn from_code(code: &[u8]) -> Self {
        let mut bytes = [0u8; N];
        let mut i = 0;
        while i < code.len() && i < N {
            bytes[i] = code[i];
            i += 1;
        }
        Self { bytes }
    }

    /// Validate a stored block, falling back to `default` wholesale
    #[must_use]
    pub fn from_stored(mut raw: [u8; N], default: Self) -> Self {
        if validate_codes(&mut raw) {
            Self { bytes: raw }
        } else {
            default
        }
    }

    /// Symbols before the terminator
    #[must_use]
    pub fn code(&self) -> &[u8] {
        let end = self.bytes.iter().position(|&b| b == 0).unwrap_or(N);
        &self.bytes[..end]
    }

    /// All stored bytes, including anything after the terminator
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }
}

impl<const N: usize> core::fmt::Debug for DtmfString<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let code = core::str::from_utf8(self.code()).unwrap_or("?");
        write!(f, "DtmfString({code:?})")
    }
}
