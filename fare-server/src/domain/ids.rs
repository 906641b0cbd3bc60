//! Opaque handles for stations, lines and companies.
//!
//! Handles are issued by a [`ReferenceData`](crate::reference::ReferenceData)
//! provider. The fare engine only compares them; it never looks inside.

use std::fmt;

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            /// Wraps a raw index issued by a provider.
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Returns the raw index.
            pub const fn index(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

handle!(
    /// A station handle.
    StationId,
    "Station"
);

handle!(
    /// A line handle.
    LineId,
    "Line"
);

handle!(
    /// An operating company handle.
    CompanyId,
    "Company"
);
