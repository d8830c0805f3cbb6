//! Rating routes.
//!
//! Score validation (1 to 5) lives here; the repository stores whatever
//! it is given and keeps the property averages in step.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use stayledger_db::entities::ratings;
use stayledger_db::repositories::rating::{
    CreateRatingInput, RatingError, RatingRepository, UpdateRatingInput,
};

const MIN_SCORE: i16 = 1;
const MAX_SCORE: i16 = 5;

/// Creates the rating routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/properties/{id}/ratings", get(list_ratings))
        .route("/properties/{id}/ratings", post(create_rating))
        .route("/ratings/{id}", patch(update_rating))
        .route("/ratings/{id}", delete(delete_rating))
}

/// Request body for creating a rating.
#[derive(Debug, Deserialize)]
pub struct CreateRatingRequest {
    /// The rating account.
    pub account_id: Uuid,
    /// Score, 1 to 5.
    pub score: i16,
    /// Optional free-text comment.
    pub comment: Option<String>,
}

/// Request body for updating a rating. Absent fields are unchanged.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateRatingRequest {
    /// New score, 1 to 5.
    pub score: Option<i16>,
    /// New comment; an explicit `null` clears it.
    #[serde(default, deserialize_with = "crate::routes::double_option")]
    pub comment: Option<Option<String>>,
    /// Reassign the rating to a different property.
    pub property_id: Option<Uuid>,
}

/// Response for a rating.
#[derive(Debug, Serialize)]
pub struct RatingResponse {
    /// Rating ID.
    pub id: Uuid,
    /// The rating account.
    pub account_id: Uuid,
    /// The rated property.
    pub property_id: Uuid,
    /// Score, 1 to 5.
    pub score: i16,
    /// Free-text comment.
    pub comment: Option<String>,
}

impl From<ratings::Model> for RatingResponse {
    fn from(rating: ratings::Model) -> Self {
        Self {
            id: rating.id,
            account_id: rating.account_id,
            property_id: rating.property_id,
            score: rating.score,
            comment: rating.comment,
        }
    }
}

fn invalid_score_response() -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "invalid_score",
            "message": format!("Score must be between {MIN_SCORE} and {MAX_SCORE}")
        })),
    )
        .into_response()
}

fn rating_error_response(e: &RatingError) -> axum::response::Response {
    match e {
        RatingError::NotFound(_)
        | RatingError::AccountNotFound(_)
        | RatingError::PropertyNotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": e.to_string()
            })),
        )
            .into_response(),
        RatingError::Database(_) => {
            error!(error = %e, "Rating operation failed");
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

/// GET `/properties/{id}/ratings` - List a property's ratings.
async fn list_ratings(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = RatingRepository::new((*state.db).clone());
    match repo.list_for_property(id).await {
        Ok(ratings) => {
            let data: Vec<RatingResponse> =
                ratings.into_iter().map(RatingResponse::from).collect();
            (StatusCode::OK, Json(json!({ "ratings": data }))).into_response()
        }
        Err(e) => rating_error_response(&e),
    }
}

/// POST `/properties/{id}/ratings` - Rate a property.
async fn create_rating(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateRatingRequest>,
) -> impl IntoResponse {
    if !(MIN_SCORE..=MAX_SCORE).contains(&payload.score) {
        return invalid_score_response();
    }

    let repo = RatingRepository::new((*state.db).clone());
    match repo
        .create_rating(CreateRatingInput {
            account_id: payload.account_id,
            property_id: id,
            score: payload.score,
            comment: payload.comment,
        })
        .await
    {
        Ok(rating) => (
            StatusCode::CREATED,
            Json(json!({ "rating": RatingResponse::from(rating) })),
        )
            .into_response(),
        Err(e) => rating_error_response(&e),
    }
}

/// PATCH `/ratings/{id}` - Update a rating.
async fn update_rating(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRatingRequest>,
) -> impl IntoResponse {
    if let Some(score) = payload.score
        && !(MIN_SCORE..=MAX_SCORE).contains(&score)
    {
        return invalid_score_response();
    }

    let repo = RatingRepository::new((*state.db).clone());
    match repo
        .update_rating(
            id,
            UpdateRatingInput {
                score: payload.score,
                comment: payload.comment,
                property_id: payload.property_id,
            },
        )
        .await
    {
        Ok(rating) => (
            StatusCode::OK,
            Json(json!({ "rating": RatingResponse::from(rating) })),
        )
            .into_response(),
        Err(e) => rating_error_response(&e),
    }
}

/// DELETE `/ratings/{id}` - Delete a rating.
async fn delete_rating(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = RatingRepository::new((*state.db).clone());
    match repo.delete_rating(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => rating_error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = rating_error_response(&RatingError::NotFound(Uuid::new_v4()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_absent_comment_leaves_it_unchanged() {
        let payload: UpdateRatingRequest = serde_json::from_value(json!({ "score": 3 })).unwrap();
        assert_eq!(payload.score, Some(3));
        assert_eq!(payload.comment, None);
    }

    #[test]
    fn test_null_comment_clears_it() {
        let payload: UpdateRatingRequest =
            serde_json::from_value(json!({ "comment": null })).unwrap();
        assert_eq!(payload.comment, Some(None));
    }

    #[test]
    fn test_comment_value_replaces_it() {
        let payload: UpdateRatingRequest =
            serde_json::from_value(json!({ "comment": "great stay" })).unwrap();
        assert_eq!(payload.comment, Some(Some("great stay".to_string())));
    }
}
