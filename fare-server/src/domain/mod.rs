//! Domain types for the fare engine.
//!
//! Opaque handles, distances, amounts and the tariff classifications that
//! reference data attaches to them. Types that parse from text enforce
//! their invariants at construction time.

mod class;
mod error;
mod ids;
mod kilo;
mod segment;
mod table;
mod yen;

pub use class::{
    CompanyTariff, FareAttribution, LineClass, MetroArea, MetroZone, SpecialFare, UnknownClass,
};
pub use error::RouteError;
pub use ids::{CompanyId, LineId, StationId};
pub use kilo::{InvalidKilo, Kilo};
pub use segment::Segment;
pub use table::{CountryTable, FareTable, UnknownTable};
pub use yen::Yen;
