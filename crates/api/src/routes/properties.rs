//! Property and facility routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use stayledger_db::entities::{facilities, properties};
use stayledger_db::repositories::property::{
    CreatePropertyInput, PropertyError, PropertyRepository, UpdatePropertyInput,
};
use stayledger_shared::types::pagination::PageRequest;

/// Creates the property and facility routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/properties", get(list_properties))
        .route("/properties", post(create_property))
        .route("/properties/{id}", get(get_property))
        .route("/properties/{id}", patch(update_property))
        .route("/properties/{id}", delete(delist_property))
        .route("/facilities", get(list_facilities))
        .route("/facilities", post(create_facility))
        .route(
            "/properties/{id}/facilities/{facility_id}",
            put(attach_facility),
        )
        .route(
            "/properties/{id}/facilities/{facility_id}",
            delete(detach_facility),
        )
}

/// Request body for creating a property.
#[derive(Debug, Deserialize)]
pub struct CreatePropertyRequest {
    /// Owning account.
    pub owner_id: Uuid,
    /// Listing name.
    pub name: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Street address.
    pub address: String,
    /// Nightly price in points.
    pub price_per_night: i64,
    /// Optional image URL.
    pub image_url: Option<String>,
}

/// Request body for updating a property. Absent fields are unchanged.
#[derive(Debug, Deserialize, Default)]
pub struct UpdatePropertyRequest {
    /// Listing name.
    pub name: Option<String>,
    /// Long description; an explicit `null` clears it.
    #[serde(default, deserialize_with = "crate::routes::double_option")]
    pub description: Option<Option<String>>,
    /// Street address.
    pub address: Option<String>,
    /// Nightly price in points.
    pub price_per_night: Option<i64>,
    /// Image URL; an explicit `null` clears it.
    #[serde(default, deserialize_with = "crate::routes::double_option")]
    pub image_url: Option<Option<String>>,
    /// Whether the property shows up in listings.
    pub is_listed: Option<bool>,
}

/// Response for a property.
#[derive(Debug, Serialize)]
pub struct PropertyResponse {
    /// Property ID.
    pub id: Uuid,
    /// Owning account.
    pub owner_id: Uuid,
    /// Listing name.
    pub name: String,
    /// Long description.
    pub description: Option<String>,
    /// Street address.
    pub address: String,
    /// Nightly price in points.
    pub price_per_night: i64,
    /// Image URL.
    pub image_url: Option<String>,
    /// Derived average rating, two decimal places.
    pub rating_avg: Decimal,
    /// Whether the property shows up in listings.
    pub is_listed: bool,
}

impl From<properties::Model> for PropertyResponse {
    fn from(property: properties::Model) -> Self {
        Self {
            id: property.id,
            owner_id: property.owner_id,
            name: property.name,
            description: property.description,
            address: property.address,
            price_per_night: property.price_per_night,
            image_url: property.image_url,
            rating_avg: property.rating_avg,
            is_listed: property.is_listed,
        }
    }
}

/// Request body for creating a facility.
#[derive(Debug, Deserialize)]
pub struct CreateFacilityRequest {
    /// Facility name, unique.
    pub name: String,
}

/// Response for a facility.
#[derive(Debug, Serialize)]
pub struct FacilityResponse {
    /// Facility ID.
    pub id: Uuid,
    /// Facility name.
    pub name: String,
}

impl From<facilities::Model> for FacilityResponse {
    fn from(facility: facilities::Model) -> Self {
        Self {
            id: facility.id,
            name: facility.name,
        }
    }
}

fn property_error_response(e: &PropertyError) -> axum::response::Response {
    match e {
        PropertyError::NotFound(_)
        | PropertyError::OwnerNotFound(_)
        | PropertyError::FacilityNotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "not_found",
                "message": e.to_string()
            })),
        )
            .into_response(),
        PropertyError::DuplicateFacility(_) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "duplicate_facility",
                "message": e.to_string()
            })),
        )
            .into_response(),
        PropertyError::Database(_) => {
            error!(error = %e, "Property operation failed");
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

/// GET `/properties` - List listed properties, paginated.
async fn list_properties(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> impl IntoResponse {
    let repo = PropertyRepository::new((*state.db).clone());
    match repo.list(page).await {
        Ok(paginated) => {
            let data: Vec<PropertyResponse> = paginated
                .data
                .into_iter()
                .map(PropertyResponse::from)
                .collect();
            (
                StatusCode::OK,
                Json(json!({ "properties": data, "meta": paginated.meta })),
            )
                .into_response()
        }
        Err(e) => property_error_response(&e),
    }
}

/// POST `/properties` - Create a property.
async fn create_property(
    State(state): State<AppState>,
    Json(payload): Json<CreatePropertyRequest>,
) -> impl IntoResponse {
    if payload.name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_name",
                "message": "Property name must not be empty"
            })),
        )
            .into_response();
    }
    if payload.price_per_night < 0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_price",
                "message": "Nightly price must be non-negative"
            })),
        )
            .into_response();
    }

    let repo = PropertyRepository::new((*state.db).clone());
    match repo
        .create_property(CreatePropertyInput {
            owner_id: payload.owner_id,
            name: payload.name,
            description: payload.description,
            address: payload.address,
            price_per_night: payload.price_per_night,
            image_url: payload.image_url,
        })
        .await
    {
        Ok(property) => (
            StatusCode::CREATED,
            Json(json!({ "property": PropertyResponse::from(property) })),
        )
            .into_response(),
        Err(e) => property_error_response(&e),
    }
}

/// GET `/properties/{id}` - Fetch a property.
async fn get_property(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = PropertyRepository::new((*state.db).clone());
    match repo.find_by_id(id).await {
        Ok(property) => (
            StatusCode::OK,
            Json(json!({ "property": PropertyResponse::from(property) })),
        )
            .into_response(),
        Err(e) => property_error_response(&e),
    }
}

/// PATCH `/properties/{id}` - Update a property.
async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePropertyRequest>,
) -> impl IntoResponse {
    if let Some(price) = payload.price_per_night
        && price < 0
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_price",
                "message": "Nightly price must be non-negative"
            })),
        )
            .into_response();
    }

    let repo = PropertyRepository::new((*state.db).clone());
    match repo
        .update_property(
            id,
            UpdatePropertyInput {
                name: payload.name,
                description: payload.description,
                address: payload.address,
                price_per_night: payload.price_per_night,
                image_url: payload.image_url,
                is_listed: payload.is_listed,
            },
        )
        .await
    {
        Ok(property) => (
            StatusCode::OK,
            Json(json!({ "property": PropertyResponse::from(property) })),
        )
            .into_response(),
        Err(e) => property_error_response(&e),
    }
}

/// DELETE `/properties/{id}` - Delist a property.
async fn delist_property(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = PropertyRepository::new((*state.db).clone());
    match repo.delist_property(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => property_error_response(&e),
    }
}

/// GET `/facilities` - List all facilities.
async fn list_facilities(State(state): State<AppState>) -> impl IntoResponse {
    let repo = PropertyRepository::new((*state.db).clone());
    match repo.list_facilities().await {
        Ok(facilities) => {
            let data: Vec<FacilityResponse> =
                facilities.into_iter().map(FacilityResponse::from).collect();
            (StatusCode::OK, Json(json!({ "facilities": data }))).into_response()
        }
        Err(e) => property_error_response(&e),
    }
}

/// POST `/facilities` - Create a facility.
async fn create_facility(
    State(state): State<AppState>,
    Json(payload): Json<CreateFacilityRequest>,
) -> impl IntoResponse {
    if payload.name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_name",
                "message": "Facility name must not be empty"
            })),
        )
            .into_response();
    }

    let repo = PropertyRepository::new((*state.db).clone());
    match repo.create_facility(payload.name).await {
        Ok(facility) => (
            StatusCode::CREATED,
            Json(json!({ "facility": FacilityResponse::from(facility) })),
        )
            .into_response(),
        Err(e) => property_error_response(&e),
    }
}

/// PUT `/properties/{id}/facilities/{facility_id}` - Attach a facility.
async fn attach_facility(
    State(state): State<AppState>,
    Path((id, facility_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    let repo = PropertyRepository::new((*state.db).clone());
    match repo.attach_facility(id, facility_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => property_error_response(&e),
    }
}

/// DELETE `/properties/{id}/facilities/{facility_id}` - Detach a facility.
async fn detach_facility(
    State(state): State<AppState>,
    Path((id, facility_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse {
    let repo = PropertyRepository::new((*state.db).clone());
    match repo.detach_facility(id, facility_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => property_error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_facility_maps_to_409() {
        let response =
            property_error_response(&PropertyError::DuplicateFacility("WiFi".to_string()));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let payload: UpdatePropertyRequest =
            serde_json::from_value(json!({ "name": "Villa", "image_url": null })).unwrap();
        assert_eq!(payload.name, Some("Villa".to_string()));
        // Absent: leave the description alone. Null: clear the image.
        assert_eq!(payload.description, None);
        assert_eq!(payload.image_url, Some(None));
    }

    #[test]
    fn test_update_accepts_new_description() {
        let payload: UpdatePropertyRequest =
            serde_json::from_value(json!({ "description": "Sea view" })).unwrap();
        assert_eq!(payload.description, Some(Some("Sea view".to_string())));
    }
}
