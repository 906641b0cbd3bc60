//! The dominant company's progressive main-line formula.
//!
//! Distances above the fixed short-trip fares are first snapped to the
//! middle of a band, whose width grows with distance. The snapped distance
//! is priced over three rate brackets, then taxed and rounded. Trips under
//! 100 snapped km round the pre-tax sum up to 10 yen; longer trips round
//! it to the nearest 100 yen. Both then add tax and round the half-biased
//! result down to 10 yen.
//!
//! Everything is evaluated in hundredths of a yen.

use crate::domain::Yen;

use super::config::TariffConfig;

/// Snaps a distance to the band grid.
pub fn banded_km(km: u32) -> u32 {
    let (step, offset) = match km {
        0..=50 => (5, 3),
        51..=100 => (10, 5),
        101..=600 => (20, 10),
        _ => (40, 20),
    };
    (km.saturating_sub(1)) / step * step + offset
}

/// Pre-tax sum for a snapped distance, in hundredths of a yen.
fn progressive_sum(km: u32, config: &TariffConfig) -> u64 {
    let [second, third] = config.bracket_starts;
    let brackets = [(0, second), (second, third), (third, u32::MAX)];

    brackets
        .iter()
        .zip(config.rates_hundredths)
        .map(|(&(low, high), rate)| {
            let portion = km.clamp(low, high) - low;
            u64::from(portion) * u64::from(rate)
        })
        .sum()
}

/// Adds tax to a whole-yen amount and rounds down to 10 yen after a
/// 5 yen bias.
fn taxed(yen: u64, config: &TariffConfig) -> u64 {
    let base = yen * u64::from(100 + config.tax_percent) / 100 + 5;
    base - base % 10
}

/// Fare on the main-line formula for a whole-km distance.
///
/// # Examples
///
/// ```
/// use fare_server::domain::Yen;
/// use fare_server::fare::{main_line_fare, TariffConfig};
///
/// let config = TariffConfig::default();
/// assert_eq!(main_line_fare(3, &config), Yen(140));
/// assert_eq!(main_line_fare(11, &config), Yen(230));
/// assert_eq!(main_line_fare(557, &config), Yen(8510));
/// ```
pub fn main_line_fare(km: u32, config: &TariffConfig) -> Yen {
    if let Some((_, fare)) = config.minimum_fares.iter().find(|(limit, _)| km <= *limit) {
        return *fare;
    }

    let banded = banded_km(km);
    let sum = progressive_sum(banded, config);

    let rounded = if banded < 100 {
        sum.div_ceil(1000) * 10
    } else {
        let biased = sum / 100 + 50;
        biased - biased % 100
    };

    // Fares stay far below u32::MAX for any distance on a real network.
    Yen(u32::try_from(taxed(rounded, config)).unwrap_or(u32::MAX))
}
