//! Booking routes, including the paid-at-creation debit path.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use stayledger_core::booking::{
    BookingError as RuleError, DateRange, PaymentMethod, booking_total,
};
use stayledger_db::entities::bookings;
use stayledger_db::repositories::booking::{
    BookingError, BookingRepository, CreateBookingInput,
};
use stayledger_db::repositories::property::{PropertyError, PropertyRepository};

/// Creates the booking routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/bookings/{id}", get(get_booking))
        .route("/accounts/{id}/bookings", get(list_account_bookings))
        .route("/bookings/{id}/confirm", post(confirm_booking))
        .route("/bookings/{id}/cancel", post(cancel_booking))
        .route("/bookings/{id}/complete", post(complete_booking))
        .route("/bookings/sweep", post(sweep_expired))
}

/// Request body for creating a booking.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    /// The paying account.
    pub account_id: Uuid,
    /// The property being booked.
    pub property_id: Uuid,
    /// First night of the stay.
    pub start_date: NaiveDate,
    /// Checkout date, exclusive.
    pub end_date: NaiveDate,
}

/// Response for a booking.
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    /// Booking ID.
    pub id: Uuid,
    /// The paying account.
    pub account_id: Uuid,
    /// The booked property.
    pub property_id: Uuid,
    /// First night of the stay.
    pub start_date: NaiveDate,
    /// Checkout date, exclusive.
    pub end_date: NaiveDate,
    /// Lifecycle status.
    pub status: String,
    /// Payment method.
    pub payment_method: String,
    /// Payment status.
    pub payment_status: String,
    /// Total price in points.
    pub total_amount: i64,
}

impl From<bookings::Model> for BookingResponse {
    fn from(booking: bookings::Model) -> Self {
        let status: stayledger_core::booking::BookingStatus = booking.status.into();
        Self {
            id: booking.id,
            account_id: booking.account_id,
            property_id: booking.property_id,
            start_date: booking.start_date,
            end_date: booking.end_date,
            status: status.as_str().to_string(),
            payment_method: booking.payment_method,
            payment_status: booking.payment_status,
            total_amount: booking.total_amount,
        }
    }
}

fn rule_error_response(e: &RuleError) -> axum::response::Response {
    match e {
        RuleError::InsufficientBalance { balance, requested } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "insufficient_balance",
                "message": e.to_string(),
                "balance": balance.get(),
                "requested": requested.get()
            })),
        )
            .into_response(),
        RuleError::TotalOutOfRange | RuleError::InvalidDateRange { .. } => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_booking",
                "message": e.to_string()
            })),
        )
            .into_response(),
        RuleError::InvalidStatusTransition { .. } => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "invalid_status_transition",
                "message": e.to_string()
            })),
        )
            .into_response(),
    }
}

fn booking_error_response(e: &BookingError) -> axum::response::Response {
    match e {
        BookingError::NotFound(_)
        | BookingError::AccountNotFound(_)
        | BookingError::PropertyNotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": e.to_string()
            })),
        )
            .into_response(),
        BookingError::Rule(rule) => rule_error_response(rule),
        BookingError::Database(_) => {
            error!(error = %e, "Booking operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response()
        }
    }
}

/// POST `/bookings` - Book a stay, paying in points at creation.
///
/// The total is the property's nightly price times the number of
/// nights; the debit and the booking row commit together or not at all.
async fn create_booking(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookingRequest>,
) -> impl IntoResponse {
    let range = match DateRange::new(payload.start_date, payload.end_date) {
        Ok(range) => range,
        Err(e) => return rule_error_response(&e),
    };

    // Price the stay off the current listing.
    let property_repo = PropertyRepository::new((*state.db).clone());
    let property = match property_repo.find_by_id(payload.property_id).await {
        Ok(property) => property,
        Err(e @ PropertyError::NotFound(_)) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "not_found",
                    "message": e.to_string()
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Failed to load property for booking");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred"
                })),
            )
                .into_response();
        }
    };

    let Some(price) = stayledger_shared::Points::new(property.price_per_night) else {
        error!(property_id = %property.id, "Property has a negative nightly price");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "internal_error",
                "message": "An error occurred"
            })),
        )
            .into_response();
    };

    let total = match booking_total(price, range.nights()) {
        Ok(total) => total,
        Err(e) => return rule_error_response(&e),
    };

    let repo = BookingRepository::new((*state.db).clone());
    match repo
        .create_booking(CreateBookingInput {
            account_id: payload.account_id,
            property_id: payload.property_id,
            range,
            total_amount: total,
            payment_method: PaymentMethod::Points,
        })
        .await
    {
        Ok(booking) => (
            StatusCode::CREATED,
            Json(json!({ "booking": BookingResponse::from(booking) })),
        )
            .into_response(),
        Err(e) => booking_error_response(&e),
    }
}

/// GET `/bookings/{id}` - Fetch a booking.
async fn get_booking(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = BookingRepository::new((*state.db).clone());
    match repo.get_booking(id).await {
        Ok(booking) => (
            StatusCode::OK,
            Json(json!({ "booking": BookingResponse::from(booking) })),
        )
            .into_response(),
        Err(e) => booking_error_response(&e),
    }
}

/// GET `/accounts/{id}/bookings` - List an account's bookings.
async fn list_account_bookings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = BookingRepository::new((*state.db).clone());
    match repo.list_for_account(id).await {
        Ok(bookings) => {
            let data: Vec<BookingResponse> =
                bookings.into_iter().map(BookingResponse::from).collect();
            (StatusCode::OK, Json(json!({ "bookings": data }))).into_response()
        }
        Err(e) => booking_error_response(&e),
    }
}

/// POST `/bookings/{id}/confirm` - Confirm a pending booking.
async fn confirm_booking(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = BookingRepository::new((*state.db).clone());
    match repo.confirm_booking(id).await {
        Ok(booking) => (
            StatusCode::OK,
            Json(json!({ "booking": BookingResponse::from(booking) })),
        )
            .into_response(),
        Err(e) => booking_error_response(&e),
    }
}

/// POST `/bookings/{id}/cancel` - Cancel a booking.
async fn cancel_booking(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = BookingRepository::new((*state.db).clone());
    match repo.cancel_booking(id).await {
        Ok(booking) => (
            StatusCode::OK,
            Json(json!({ "booking": BookingResponse::from(booking) })),
        )
            .into_response(),
        Err(e) => booking_error_response(&e),
    }
}

/// POST `/bookings/{id}/complete` - Complete a confirmed booking.
async fn complete_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = BookingRepository::new((*state.db).clone());
    match repo.complete_booking(id).await {
        Ok(booking) => (
            StatusCode::OK,
            Json(json!({ "booking": BookingResponse::from(booking) })),
        )
            .into_response(),
        Err(e) => booking_error_response(&e),
    }
}

/// POST `/bookings/sweep` - Complete all confirmed bookings whose stay
/// has ended. Intended to be hit from a scheduler.
async fn sweep_expired(State(state): State<AppState>) -> impl IntoResponse {
    let repo = BookingRepository::new((*state.db).clone());
    match repo.complete_expired(Utc::now().date_naive()).await {
        Ok(completed) => (StatusCode::OK, Json(json!({ "completed": completed }))).into_response(),
        Err(e) => booking_error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use stayledger_shared::Points;

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_insufficient_balance_maps_to_422_with_amounts() {
        let response = rule_error_response(&RuleError::InsufficientBalance {
            balance: Points::new(40).unwrap(),
            requested: Points::new(50).unwrap(),
        });
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(response).await;
        assert_eq!(json["error"], "insufficient_balance");
        assert_eq!(json["balance"], 40);
        assert_eq!(json["requested"], 50);
    }

    #[tokio::test]
    async fn test_invalid_date_range_maps_to_400() {
        let start = NaiveDate::from_ymd_opt(2026, 9, 4).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
        let response = rule_error_response(&RuleError::InvalidDateRange { start, end });
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_status_transition_maps_to_409() {
        use stayledger_core::booking::BookingStatus;
        let response = rule_error_response(&RuleError::InvalidStatusTransition {
            from: BookingStatus::Completed,
            to: BookingStatus::Cancelled,
        });
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let response = booking_error_response(&BookingError::NotFound(Uuid::new_v4()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = booking_error_response(&BookingError::AccountNotFound(Uuid::new_v4()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
