//! Fixed-point distance type.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// Error returned when parsing an invalid distance.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid distance {input:?}: {reason}")]
pub struct InvalidKilo {
    input: String,
    reason: &'static str,
}

/// A distance in tenths of a kilometre.
///
/// Tariff distances are published with one decimal place. Billing always
/// happens on whole kilometres, rounded up, after distances have been
/// summed: see [`Kilo::whole_km`].
///
/// # Examples
///
/// ```
/// use fare_server::domain::Kilo;
///
/// let a: Kilo = "6.8".parse().unwrap();
/// let b = Kilo::km(3);
/// assert_eq!((a + b).to_string(), "9.8");
/// assert_eq!((a + b).whole_km(), 10);
///
/// assert!("6.85".parse::<Kilo>().is_err());
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Kilo(u32);

impl Kilo {
    /// The zero distance.
    pub const ZERO: Kilo = Kilo(0);

    /// Creates a distance from tenths of a kilometre.
    pub const fn from_tenths(tenths: u32) -> Self {
        Kilo(tenths)
    }

    /// Creates a distance from whole kilometres.
    pub const fn km(km: u32) -> Self {
        Kilo(km * 10)
    }

    /// Returns the distance in tenths of a kilometre.
    pub const fn tenths(self) -> u32 {
        self.0
    }

    /// Returns the distance in whole kilometres, rounding any fraction up.
    pub const fn whole_km(self) -> u32 {
        self.0.div_ceil(10)
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Absolute difference between two kilometre posts.
    pub const fn between(a: Kilo, b: Kilo) -> Kilo {
        Kilo(a.0.abs_diff(b.0))
    }
}

impl Add for Kilo {
    type Output = Kilo;

    fn add(self, rhs: Kilo) -> Kilo {
        Kilo(self.0 + rhs.0)
    }
}

impl AddAssign for Kilo {
    fn add_assign(&mut self, rhs: Kilo) {
        self.0 += rhs.0;
    }
}

impl Sum for Kilo {
    fn sum<I: Iterator<Item = Kilo>>(iter: I) -> Kilo {
        iter.fold(Kilo::ZERO, Add::add)
    }
}

impl FromStr for Kilo {
    type Err = InvalidKilo;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| InvalidKilo {
            input: s.to_string(),
            reason,
        };
        let trimmed = s.trim();
        let (whole, fraction) = match trimmed.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (trimmed, "0"),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected decimal kilometres"));
        }
        if fraction.len() != 1 || !fraction.as_bytes()[0].is_ascii_digit() {
            return Err(invalid("expected exactly one fractional digit"));
        }

        let whole: u32 = whole.parse().map_err(|_| invalid("out of range"))?;
        let tenths = whole
            .checked_mul(10)
            .and_then(|t| t.checked_add(u32::from(fraction.as_bytes()[0] - b'0')))
            .ok_or_else(|| invalid("out of range"))?;
        Ok(Kilo(tenths))
    }
}

impl fmt::Debug for Kilo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Kilo({self})")
    }
}

impl fmt::Display for Kilo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Summing then rounding never bills less than the exact distance.
        #[test]
        fn whole_km_covers_distance(tenths in 0u32..100_000) {
            let km = Kilo::from_tenths(tenths).whole_km();
            prop_assert!(km * 10 >= tenths);
            prop_assert!(km * 10 < tenths + 10);
        }

        /// Display output parses back to the same distance.
        #[test]
        fn display_parses_back(tenths in 0u32..10_000_000) {
            let kilo = Kilo::from_tenths(tenths);
            prop_assert_eq!(kilo.to_string().parse::<Kilo>().unwrap(), kilo);
        }
    }
}
