//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod accounts;
pub mod bookings;
pub mod health;
pub mod properties;
pub mod ratings;

/// Deserializes a field that distinguishes "absent" from "null".
///
/// With `#[serde(default, deserialize_with = "double_option")]` an
/// absent field stays `None` (leave unchanged), an explicit `null`
/// becomes `Some(None)` (clear), and a value becomes `Some(Some(v))`.
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(de).map(Some)
}

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(accounts::routes())
        .merge(properties::routes())
        .merge(ratings::routes())
        .merge(bookings::routes())
}
