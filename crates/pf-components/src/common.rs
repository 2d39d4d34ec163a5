//! Common utilities for component calculations.

use crate::error::{ComponentError, ComponentResult};
use pf_core::numeric::ensure_finite;

/// Fully open valve position (%).
pub const FULL_OPEN: u8 = 100;

/// Closed valve position (%).
pub const CLOSED: u8 = 0;

/// Ensure a value is finite, returning ComponentError if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<()> {
    ensure_finite(value, what).map_err(|_| ComponentError::NonNumeric { what, value })?;
    Ok(())
}

/// Validate a requested valve position and narrow it to a percentage.
pub fn check_position(position: i64) -> ComponentResult<u8> {
    match u8::try_from(position) {
        Ok(pct) if pct <= FULL_OPEN => Ok(pct),
        _ => Err(ComponentError::InvalidPosition { position }),
    }
}

/// Validate a requested pump speed.
pub fn check_speed(speed: i64) -> ComponentResult<u32> {
    if speed < 0 {
        return Err(ComponentError::NegativeSpeed { speed });
    }
    u32::try_from(speed).map_err(|_| ComponentError::InvalidArg {
        what: "pump speed too large",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_finite() {
        assert!(check_finite(1.0, "test").is_ok());
        assert!(check_finite(f64::INFINITY, "test").is_err());
        assert!(check_finite(f64::NAN, "test").is_err());
    }

    #[test]
    fn test_check_position() {
        assert_eq!(check_position(0).unwrap(), 0);
        assert_eq!(check_position(100).unwrap(), 100);
        assert_eq!(
            check_position(101),
            Err(ComponentError::InvalidPosition { position: 101 })
        );
        assert!(check_position(-1).is_err());
    }

    #[test]
    fn test_check_speed() {
        assert_eq!(check_speed(1750).unwrap(), 1750);
        assert_eq!(
            check_speed(-5),
            Err(ComponentError::NegativeSpeed { speed: -5 })
        );
    }
}
