//! Network and tariff reference data.
//!
//! [`ReferenceData`] is the read-only interface the fare engine consumes.
//! [`MemoryReference`] implements it over data built in code or loaded from
//! a directory of CSV files.

mod error;
mod loader;
mod memory;
mod provider;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::ReferenceError;
pub use memory::{LineBuilder, MemoryReference, ReferenceBuilder};
pub use provider::{Decomposition, Direction, MileageShare, ReferenceData, TravelRange};
