//! Fare accumulation over a route's segments.

use crate::domain::{FareAttribution, SpecialFare, Yen};
use crate::reference::Decomposition;

use super::mileage::MileageAccumulator;

/// What one segment contributes to a fare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentCharge {
    /// A flat fare replacing the segment's mileage.
    Special(SpecialFare),
    /// Mileage to be priced by the tariff.
    Mileage(Decomposition),
}

/// Mileage plus the flat charges resolved while walking a route.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FareAccumulator {
    pub mileage: MileageAccumulator,
    /// Flat charges belonging to the primary group.
    pub group_fare: Yen,
    /// Flat charges of companies outside the group.
    pub other_fare: Yen,
}

impl FareAccumulator {
    /// Folds segment charges, in route order, into an accumulator.
    pub fn fold(charges: impl IntoIterator<Item = SegmentCharge>) -> Self {
        charges
            .into_iter()
            .fold(FareAccumulator::default(), FareAccumulator::with_charge)
    }

    fn with_charge(mut self, charge: SegmentCharge) -> Self {
        match charge {
            SegmentCharge::Special(special) => match special.attribution {
                FareAttribution::Group => self.group_fare += special.amount,
                FareAttribution::Other => self.other_fare += special.amount,
            },
            SegmentCharge::Mileage(parts) => self.mileage.add_decomposition(&parts),
        }
        self
    }

    /// Sum of the flat charges.
    pub fn flat_total(&self) -> Yen {
        self.group_fare + self.other_fare
    }
}
