//! Tariff classifications attached to lines, companies and sections.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::Yen;

/// Error returned when a classification keyword is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} {value:?}")]
pub struct UnknownClass {
    kind: &'static str,
    value: String,
}

impl UnknownClass {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Tariff class of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineClass {
    /// Trunk line, billed on the progressive formula.
    Main,
    /// Local line, billed on its own tables or at nominal distance.
    Local,
}

impl FromStr for LineClass {
    type Err = UnknownClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "main" => Ok(LineClass::Main),
            "local" => Ok(LineClass::Local),
            other => Err(UnknownClass::new("line class", other)),
        }
    }
}

/// How a company's mileage is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyTariff {
    /// The dominant company; its progressive formula is the base tariff.
    Dominant,
    /// A peripheral company with its own simplified tariff.
    Dedicated,
    /// A peripheral company that settles jointly with the dominant network.
    Pooled,
    /// Outside the primary group. Only reachable through special fares.
    Other,
}

impl CompanyTariff {
    /// Returns true for companies whose mileage the tariff engine prices.
    pub fn is_group(self) -> bool {
        !matches!(self, CompanyTariff::Other)
    }
}

impl FromStr for CompanyTariff {
    type Err = UnknownClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "dominant" => Ok(CompanyTariff::Dominant),
            "dedicated" => Ok(CompanyTariff::Dedicated),
            "pooled" => Ok(CompanyTariff::Pooled),
            "other" => Ok(CompanyTariff::Other),
            other => Err(UnknownClass::new("company tariff", other)),
        }
    }
}

/// Metropolitan area with its own flat-fare tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetroArea {
    Capital,
    Kansai,
}

/// Metropolitan flat-fare zone.
///
/// Each area has a commuter zone and, inside it, a loop line with a
/// cheaper table. The zone is the broader of the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetroZone {
    CapitalZone,
    CapitalLoop,
    KansaiZone,
    KansaiLoop,
}

impl MetroZone {
    pub fn area(self) -> MetroArea {
        match self {
            MetroZone::CapitalZone | MetroZone::CapitalLoop => MetroArea::Capital,
            MetroZone::KansaiZone | MetroZone::KansaiLoop => MetroArea::Kansai,
        }
    }

    pub fn is_loop(self) -> bool {
        matches!(self, MetroZone::CapitalLoop | MetroZone::KansaiLoop)
    }

    /// Combines two attributions of one journey.
    ///
    /// Within an area the broader zone wins, so a zone is never narrowed
    /// back to its loop. Crossing into another area yields `None`.
    pub fn widen(self, other: MetroZone) -> Option<MetroZone> {
        if self.area() != other.area() {
            return None;
        }
        if self.is_loop() { Some(other) } else { Some(self) }
    }
}

impl FromStr for MetroZone {
    type Err = UnknownClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "capital_zone" => Ok(MetroZone::CapitalZone),
            "capital_loop" => Ok(MetroZone::CapitalLoop),
            "kansai_zone" => Ok(MetroZone::KansaiZone),
            "kansai_loop" => Ok(MetroZone::KansaiLoop),
            other => Err(UnknownClass::new("metro zone", other)),
        }
    }
}

/// Which pot a special flat fare is charged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FareAttribution {
    /// Added to the primary group's fare.
    Group,
    /// Charged by a company outside the group.
    Other,
}

impl FromStr for FareAttribution {
    type Err = UnknownClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "group" => Ok(FareAttribution::Group),
            "other" => Ok(FareAttribution::Other),
            other => Err(UnknownClass::new("fare attribution", other)),
        }
    }
}

/// A flat charge that replaces mileage accumulation for one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialFare {
    pub amount: Yen,
    pub attribution: FareAttribution,
}

impl fmt::Display for LineClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LineClass::Main => "main",
            LineClass::Local => "local",
        })
    }
}
