//! Per-company mileage accumulation.

use std::collections::BTreeMap;

use crate::domain::{CompanyId, Kilo, LineClass, MetroZone};
use crate::reference::{Decomposition, MileageShare};

/// Metropolitan zone state of the travel seen so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetroFlag {
    /// No mileage recorded yet.
    #[default]
    Unset,
    /// Every section so far lies in this zone.
    Within(MetroZone),
    /// Some section lay outside any zone, or in a different area.
    Outside,
}

impl MetroFlag {
    /// Folds the attribution of one more segment into the flag.
    ///
    /// The broader zone of an area wins, so a loop-line flag widens to the
    /// surrounding zone but a zone flag never narrows back to the loop.
    pub fn merge(self, zone: Option<MetroZone>) -> MetroFlag {
        match (self, zone) {
            (MetroFlag::Outside, _) | (_, None) => MetroFlag::Outside,
            (MetroFlag::Unset, Some(zone)) => MetroFlag::Within(zone),
            (MetroFlag::Within(current), Some(zone)) => current
                .widen(zone)
                .map_or(MetroFlag::Outside, MetroFlag::Within),
        }
    }

    pub fn zone(self) -> Option<MetroZone> {
        match self {
            MetroFlag::Within(zone) => Some(zone),
            MetroFlag::Unset | MetroFlag::Outside => None,
        }
    }
}

/// Real and nominal distance for one company and line class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub real: Kilo,
    pub nominal: Kilo,
}

/// One company's mileage split by line class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompanyMileage {
    pub main: Kilo,
    pub local: Kilo,
    /// Local distance at nominal posts.
    pub local_nominal: Kilo,
}

impl CompanyMileage {
    pub fn is_zero(&self) -> bool {
        self.main.is_zero() && self.local.is_zero()
    }

    /// Physical distance travelled.
    pub fn real_total(&self) -> Kilo {
        self.main + self.local
    }

    /// Distance with local travel counted at nominal posts.
    pub fn nominal_total(&self) -> Kilo {
        self.main + self.local_nominal
    }
}

impl std::ops::Add for CompanyMileage {
    type Output = CompanyMileage;

    fn add(self, rhs: CompanyMileage) -> CompanyMileage {
        CompanyMileage {
            main: self.main + rhs.main,
            local: self.local + rhs.local,
            local_nominal: self.local_nominal + rhs.local_nominal,
        }
    }
}

/// Distance totals keyed by company and line class, plus the metro flag.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MileageAccumulator {
    tallies: BTreeMap<(CompanyId, LineClass), Tally>,
    metro: MetroFlag,
}

impl MileageAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one company's share of a segment.
    ///
    /// Main-line shares are counted at their real distance for both totals.
    pub fn add_share(&mut self, share: &MileageShare) {
        let nominal = match share.class {
            LineClass::Main => share.real,
            LineClass::Local => share.nominal,
        };
        let tally = self.tallies.entry((share.company, share.class)).or_default();
        tally.real += share.real;
        tally.nominal += nominal;
    }

    /// Adds a decomposed segment: every share and its metro attribution.
    pub fn add_decomposition(&mut self, parts: &Decomposition) {
        for share in &parts.shares {
            self.add_share(share);
        }
        self.metro = self.metro.merge(parts.metro);
    }

    pub fn tally(&self, company: CompanyId, class: LineClass) -> Tally {
        self.tallies
            .get(&(company, class))
            .copied()
            .unwrap_or_default()
    }

    pub fn company(&self, company: CompanyId) -> CompanyMileage {
        let main = self.tally(company, LineClass::Main);
        let local = self.tally(company, LineClass::Local);
        CompanyMileage {
            main: main.real,
            local: local.real,
            local_nominal: local.nominal,
        }
    }

    /// Companies with non-zero mileage, ascending.
    pub fn companies(&self) -> Vec<CompanyId> {
        let mut companies: Vec<CompanyId> = self
            .tallies
            .iter()
            .filter(|(_, tally)| !tally.real.is_zero())
            .map(|((company, _), _)| *company)
            .collect();
        companies.dedup();
        companies
    }

    /// Total real distance over every company.
    pub fn total(&self) -> Kilo {
        self.tallies.values().map(|t| t.real).sum()
    }

    /// The zone every recorded section lies in, if there is one.
    pub fn metro_zone(&self) -> Option<MetroZone> {
        self.metro.zone()
    }
}
