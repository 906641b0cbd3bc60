//! Rail fare engine server.
//!
//! Prices multi-segment journeys under a tariff with regional operating
//! companies, trunk and local lines, metropolitan flat-fare zones and
//! inter-company settlement tables.
//!
//! Routes are built in [`route`], priced by [`fare`] against the network
//! and tariff tables behind [`reference::ReferenceData`], and served over
//! HTTP by [`web`].

pub mod domain;
pub mod fare;
pub mod reference;
pub mod route;
pub mod web;
