//! Fare table kinds.
//!
//! Every tariff table the engine consults is named here. Tables keyed by a
//! single distance are [`FareTable`]s; tables keyed by a real/nominal
//! distance pair are [`CountryTable`]s. Reference data files refer to them
//! by short keys such as `"L1"`.

use std::fmt;
use std::str::FromStr;

use super::MetroZone;

/// Error returned for an unrecognised table key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fare table key {0:?}")]
pub struct UnknownTable(String);

/// A table keyed by company and a single whole-km distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FareTable {
    /// Step table for local-line journeys on the dominant network.
    Local,
    /// Flat table for journeys wholly inside a metropolitan zone.
    Metro(MetroZone),
    /// A dedicated-tariff company's trunk table.
    PeripheralMain,
    /// A dedicated-tariff company's local-line table.
    PeripheralLocal,
    /// Inter-company settlement table for trunk mileage.
    SettlementMain,
    /// Inter-company settlement table for local mileage.
    SettlementLocal,
}

impl FareTable {
    pub const ALL: [FareTable; 9] = [
        FareTable::Local,
        FareTable::Metro(MetroZone::CapitalZone),
        FareTable::Metro(MetroZone::CapitalLoop),
        FareTable::Metro(MetroZone::KansaiZone),
        FareTable::Metro(MetroZone::KansaiLoop),
        FareTable::PeripheralMain,
        FareTable::PeripheralLocal,
        FareTable::SettlementMain,
        FareTable::SettlementLocal,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FareTable::Local => "L1",
            FareTable::Metro(MetroZone::CapitalZone) => "M1",
            FareTable::Metro(MetroZone::CapitalLoop) => "M2",
            FareTable::Metro(MetroZone::KansaiZone) => "M3",
            FareTable::Metro(MetroZone::KansaiLoop) => "M4",
            FareTable::PeripheralMain => "P1",
            FareTable::PeripheralLocal => "P2",
            FareTable::SettlementMain => "S1",
            FareTable::SettlementLocal => "S2",
        }
    }
}

impl FromStr for FareTable {
    type Err = UnknownTable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        FareTable::ALL
            .into_iter()
            .find(|table| table.key() == key)
            .ok_or_else(|| UnknownTable(key.to_string()))
    }
}

impl fmt::Display for FareTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A table keyed by company and a (real, nominal) whole-km pair.
///
/// A lookup may legitimately find nothing; callers then fall back to a
/// single-distance table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountryTable {
    /// Dedicated-tariff combination of trunk and local mileage.
    PeripheralCombination,
}

impl CountryTable {
    pub fn key(self) -> &'static str {
        match self {
            CountryTable::PeripheralCombination => "C1",
        }
    }
}

impl FromStr for CountryTable {
    type Err = UnknownTable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "C1" => Ok(CountryTable::PeripheralCombination),
            other => Err(UnknownTable(other.to_string())),
        }
    }
}

impl fmt::Display for CountryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
