//! The reference data seam.
//!
//! The fare engine never owns station, line or tariff data. Everything it
//! needs to know about the network is asked through [`ReferenceData`], which
//! keeps the engine testable against small hand-built networks.

use crate::domain::{
    CompanyId, CompanyTariff, CountryTable, FareTable, Kilo, LineClass, LineId, MetroZone,
    Segment, SpecialFare, StationId, Yen,
};

/// Direction of travel along a line's kilometre posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// The kilometre posts at either end of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TravelRange {
    pub from: Kilo,
    pub to: Kilo,
}

impl TravelRange {
    pub fn direction(&self) -> Direction {
        if self.to >= self.from {
            Direction::Ascending
        } else {
            Direction::Descending
        }
    }

    pub fn length(&self) -> Kilo {
        Kilo::between(self.from, self.to)
    }

    /// Returns true if the two ranges share more than a single post.
    pub fn overlaps(&self, other: &TravelRange) -> bool {
        let low = self.from.min(self.to).max(other.from.min(other.to));
        let high = self.from.max(self.to).min(other.from.max(other.to));
        low < high
    }
}

/// One company's share of a segment.
///
/// `nominal` is the distance billed when local-line travel is combined with
/// trunk travel. It equals `real` on main lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MileageShare {
    pub company: CompanyId,
    pub class: LineClass,
    pub real: Kilo,
    pub nominal: Kilo,
}

/// A segment broken down into per-company mileage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
    pub shares: Vec<MileageShare>,
    /// Set only if every section of the segment lies in a metropolitan zone.
    pub metro: Option<MetroZone>,
}

impl Decomposition {
    pub fn real_total(&self) -> Kilo {
        self.shares.iter().map(|s| s.real).sum()
    }
}

/// Read-only access to stations, lines, companies and fare tables.
///
/// Implementations are shared across concurrent fare calculations, so every
/// method takes `&self` and the trait requires `Send + Sync`.
///
/// Lookups return `None` when the data has no answer. Whether that is a
/// caller error or a data fault is for the caller to decide.
pub trait ReferenceData: Send + Sync {
    fn station_name(&self, station: StationId) -> Option<&str>;
    fn station_id(&self, name: &str) -> Option<StationId>;
    fn line_name(&self, line: LineId) -> Option<&str>;
    fn line_id(&self, name: &str) -> Option<LineId>;
    fn company_name(&self, company: CompanyId) -> Option<&str>;
    fn company_id(&self, name: &str) -> Option<CompanyId>;

    /// The company whose formula is the base tariff.
    fn dominant_company(&self) -> CompanyId;

    fn company_tariff(&self, company: CompanyId) -> Option<CompanyTariff>;

    fn line_class(&self, line: LineId) -> Option<LineClass>;

    /// Returns true if `station` lies within the span of `segment`,
    /// endpoints included.
    fn contains(&self, segment: &Segment, station: StationId) -> bool;

    /// Every station the segment passes, in travel order, both ends included.
    ///
    /// Returns `None` if either end is not on the segment's line.
    fn stations_on(&self, segment: &Segment) -> Option<Vec<StationId>>;

    /// Kilometre posts of the segment's ends on its line.
    fn travel_range(&self, segment: &Segment) -> Option<TravelRange>;

    /// Breaks the segment into per-company, per-class mileage.
    fn decompose(&self, segment: &Segment) -> Option<Decomposition>;

    /// A flat charge that replaces mileage for this segment, if any.
    fn special_fare(&self, segment: &Segment) -> Option<SpecialFare>;

    /// Looks up a single-distance table.
    fn fare_table(&self, table: FareTable, company: CompanyId, km: u32) -> Option<Yen>;

    /// Looks up a paired-distance table. `None` means no entry matches.
    fn fare_country_table(
        &self,
        table: CountryTable,
        company: CompanyId,
        km: u32,
        nominal_km: u32,
    ) -> Option<Yen>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_direction() {
        let up = TravelRange {
            from: Kilo::ZERO,
            to: Kilo::from_tenths(68),
        };
        let down = TravelRange {
            from: Kilo::from_tenths(288),
            to: Kilo::from_tenths(68),
        };
        assert_eq!(up.direction(), Direction::Ascending);
        assert_eq!(down.direction(), Direction::Descending);
        assert_eq!(down.length(), Kilo::km(22));
    }

    #[test]
    fn range_overlap() {
        let range = |from, to| TravelRange {
            from: Kilo::from_tenths(from),
            to: Kilo::from_tenths(to),
        };
        assert!(range(0, 68).overlaps(&range(68, 0)));
        assert!(range(0, 288).overlaps(&range(100, 68)));
        assert!(!range(0, 68).overlaps(&range(68, 288)));
        assert!(!range(288, 68).overlaps(&range(0, 68)));
    }
}
