//! Booking endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use devevent_core::{Booking, BookingDraft};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::server::AppState;

#[derive(Serialize)]
pub struct BookingResponse {
    pub message: &'static str,
    pub booking: Booking,
}

/// POST /api/bookings - book a seat at an event
async fn create_booking(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BookingDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    let Json(draft) = payload?;
    let booking = state.bookings.create_booking(draft).await?;
    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            message: "Booking created successfully",
            booking,
        }),
    ))
}

/// Booking routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/bookings", post(create_booking))
}
