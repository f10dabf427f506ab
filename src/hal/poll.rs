//! Bounded busy-wait polling

use core::fmt;

/// A bounded wait ran out of attempts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeout {
    /// Attempts made before giving up
    pub attempts: u16,
}

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "condition not met after {} attempts", self.attempts)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Timeout {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Timeout({})", self.attempts);
    }
}

/// Evaluate `ready` up to `limit` times.
///
/// Returns the zero-based attempt on which the condition held.
///
/// # Errors
///
/// [`Timeout`] when the condition never held.
pub fn poll_bounded(limit: u16, mut ready: impl FnMut() -> bool) -> Result<u16, Timeout> {
    for attempt in 0..limit {
        if ready() {
            return Ok(attempt);
        }
    }
    Err(Timeout { attempts: limit })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_first_success() {
        let mut n = 0;
        let r = poll_bounded(10, || {
            n += 1;
            n == 3
        });
        assert_eq!(r, Ok(2));
        assert_eq!(n, 3);
    }

    #[test]
    fn gives_up_after_limit() {
        let mut n = 0u32;
        let r = poll_bounded(255, || {
            n += 1;
            false
        });
        assert_eq!(r, Err(Timeout { attempts: 255 }));
        assert_eq!(n, 255);
    }
}
