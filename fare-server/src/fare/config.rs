//! Tariff constants for the main-line formula.

use crate::domain::Yen;

/// Constants of the dominant company's progressive formula.
///
/// Rates are held in hundredths of a yen per kilometre so the formula can
/// be evaluated in integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TariffConfig {
    /// Consumption tax, in percent.
    pub tax_percent: u32,

    /// Fixed fares for short trips: `(up to km, fare)`, ascending.
    pub minimum_fares: [(u32, Yen); 3],

    /// Per-kilometre rates for each bracket, in hundredths of a yen.
    pub rates_hundredths: [u32; 3],

    /// Distances at which the second and third rate brackets start.
    pub bracket_starts: [u32; 2],

    /// Combined main and local distance (km) at or below which mixed
    /// travel is billed on the local table.
    pub local_threshold_km: u32,
}

impl TariffConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        tax_percent: u32,
        minimum_fares: [(u32, Yen); 3],
        rates_hundredths: [u32; 3],
        bracket_starts: [u32; 2],
        local_threshold_km: u32,
    ) -> Self {
        Self {
            tax_percent,
            minimum_fares,
            rates_hundredths,
            bracket_starts,
            local_threshold_km,
        }
    }

    /// Returns a copy with a different tax rate.
    pub fn with_tax_percent(mut self, tax_percent: u32) -> Self {
        self.tax_percent = tax_percent;
        self
    }
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            tax_percent: 5,
            minimum_fares: [(3, Yen(140)), (6, Yen(180)), (10, Yen(190))],
            rates_hundredths: [1620, 1285, 705], // 16.20, 12.85, 7.05 yen/km
            bracket_starts: [300, 600],
            local_threshold_km: 10,
        }
    }
}
