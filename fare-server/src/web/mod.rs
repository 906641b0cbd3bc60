//! Web layer for the fare engine.
//!
//! Provides HTTP endpoints for station lookup and fare quotes.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router, fare_response};
pub use state::AppState;
