//! Float comparison and finiteness guards.
//!
//! Plant values are plain `f64` in imperial units. Comparisons go through a
//! [`Tolerances`] pair so that merge checks and fixture tests agree on what
//! "the same pressure" means.

use crate::VpError;

pub type Real = f64;

/// Absolute and relative slack for comparing two readings.
///
/// Two values match when they differ by at most `abs`, or by at most `rel`
/// times the larger magnitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerances {
    /// Bit-for-bit reproducible formula results.
    pub const EXACT: Tolerances = Tolerances {
        abs: 1e-12,
        rel: 1e-12,
    };

    /// Branch pressures meeting at a manifold (psi).
    pub const MERGE_PRESSURE: Tolerances = Tolerances {
        abs: 1e-9,
        rel: 1e-9,
    };

    /// Values carried through a long chain of valves, where each hop adds
    /// rounding (large flows, summed branches).
    pub const LOOSE: Tolerances = Tolerances {
        abs: 1e-6,
        rel: 1e-9,
    };
}

impl Default for Tolerances {
    fn default() -> Self {
        Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

/// Pass `v` through, or name the quantity that went NaN or infinite.
pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, VpError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(VpError::NonFinite { what, value: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_slack_near_zero() {
        assert!(nearly_equal(0.0, 1e-13, Tolerances::default()));
        assert!(!nearly_equal(0.0, 1e-7, Tolerances::MERGE_PRESSURE));
        assert!(nearly_equal(0.0, 1e-7, Tolerances::LOOSE));
    }

    #[test]
    fn relative_slack_on_large_flows() {
        // two 16 in tank outlets summed at a manifold
        let q = 39085.73879782904;
        assert!(nearly_equal(q, q * (1.0 + 5e-10), Tolerances::LOOSE));
        assert!(!nearly_equal(q, q * (1.0 + 5e-10), Tolerances::EXACT));
        assert!(!nearly_equal(q, q + 1.0, Tolerances::LOOSE));
    }

    #[test]
    fn non_finite_names_the_quantity() {
        match ensure_finite(Real::INFINITY, "tank level") {
            Err(VpError::NonFinite { what, value }) => {
                assert_eq!(what, "tank level");
                assert!(value.is_infinite());
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(ensure_finite(6.5, "tank level").unwrap(), 6.5);
    }
}
