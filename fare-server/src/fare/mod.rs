//! Fare calculation.
//!
//! A route is folded into a [`FareAccumulator`] holding per-company mileage
//! and flat charges, which the [`TariffEngine`] turns into a [`FareQuote`].

mod accumulator;
mod config;
mod engine;
mod error;
mod formula;
mod mileage;

pub use accumulator::{FareAccumulator, SegmentCharge};
pub use config::TariffConfig;
pub use engine::{FareQuote, PoolTables, TariffBranch, TariffEngine};
pub use error::FareError;
pub use formula::{banded_km, main_line_fare};
pub use mileage::{CompanyMileage, MetroFlag, MileageAccumulator, Tally};
