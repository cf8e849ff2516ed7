//! HTTP request handlers for the `/flights` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use super::body::FlightBody;
use super::AppState;
use crate::error::{Error, Result};
use crate::flight::{Flight, FlightId};

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            // Plain text, not JSON
            err @ Self::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()).into_response(),
            Self::InvalidBody { message } => (StatusCode::BAD_REQUEST, message).into_response(),
            other => {
                error!(error = %other, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// `POST /flights`
pub async fn create_flight(
    State(state): State<AppState>,
    FlightBody(flight): FlightBody,
) -> Result<(StatusCode, Json<Flight>)> {
    let flight = state.repository().create(flight).await?;
    Ok((StatusCode::CREATED, Json(flight)))
}

/// `GET /flights`
pub async fn list_flights(State(state): State<AppState>) -> Result<Json<Vec<Flight>>> {
    Ok(Json(state.repository().list().await?))
}

/// `GET /flights/{id}`
pub async fn get_flight(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Flight>> {
    let flight = state.repository().get(FlightId::parse(&id)).await?;
    Ok(Json(flight))
}

/// `PUT /flights/{id}`
pub async fn update_flight(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FlightBody(patch): FlightBody,
) -> Result<Json<Flight>> {
    let flight = state
        .repository()
        .update(FlightId::parse(&id), patch)
        .await?;
    Ok(Json(flight))
}

/// `DELETE /flights/{id}`
pub async fn delete_flight(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Flight>>> {
    let removed = state.repository().delete(FlightId::parse(&id)).await?;
    Ok(Json(removed))
}
