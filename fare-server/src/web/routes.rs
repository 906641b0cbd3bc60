//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::RouteError;
use crate::fare::{FareError, TariffEngine};
use crate::reference::ReferenceData;
use crate::route::Route;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations/search", get(search_stations))
        .route("/fare", post(quote_fare))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search stations by name.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Json<StationSearchResponse> {
    let limit = req.limit.unwrap_or(10).min(50);
    let reference = &state.reference;

    let stations = reference
        .search_stations(&req.q, limit)
        .into_iter()
        .map(|name| StationSearchResult {
            name: name.to_string(),
            lines: reference
                .station_id(name)
                .map(|id| reference.lines_at(id).into_iter().map(String::from).collect())
                .unwrap_or_default(),
        })
        .collect();

    Json(StationSearchResponse { stations })
}

/// Price a route.
async fn quote_fare(
    State(state): State<AppState>,
    Json(req): Json<FareRequest>,
) -> Result<Json<FareResponse>, AppError> {
    fare_response(&state, &req).map(Json)
}

/// Parses, prices and renders a fare request.
pub fn fare_response(state: &AppState, req: &FareRequest) -> Result<FareResponse, AppError> {
    let reference = state.reference.as_ref();
    let mut route = Route::parse(&req.route, reference)?;

    let engine = TariffEngine::new(reference, &state.config);
    let quote = engine.calculate_fare(&mut route)?;

    let text = route.display(reference).to_string();
    Ok(FareResponse::from_quote(text, &quote))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unprocessable { message: String },
    Internal { message: String },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<FareError> for AppError {
    fn from(e: FareError) -> Self {
        match e {
            FareError::Route(e) => e.into(),
            FareError::InvalidRoute => AppError::Unprocessable {
                message: e.to_string(),
            },
            FareError::ReferenceIntegrity(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
