//! Account routes: registration, login, and point grants.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use stayledger_db::entities::accounts;
use stayledger_db::repositories::account::{
    AccountError, AccountRepository, RegisterAccountInput,
};
use stayledger_shared::Points;

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", post(register))
        .route("/accounts/login", post(login))
        .route("/accounts/{id}", get(get_account))
        .route("/accounts/{id}/points", post(grant_points))
}

/// Request body for registering an account.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Display name.
    pub full_name: String,
}

/// Request body for logging in.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Request body for granting points.
#[derive(Debug, Deserialize)]
pub struct GrantPointsRequest {
    /// Points to credit. Must be non-negative.
    pub amount: i64,
}

/// Response for an account. Never includes the password hash.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: Uuid,
    /// Login email.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Current point balance.
    pub points: i64,
    /// Whether the account has admin rights.
    pub is_admin: bool,
}

impl From<accounts::Model> for AccountResponse {
    fn from(account: accounts::Model) -> Self {
        Self {
            id: account.id,
            email: account.email,
            full_name: account.full_name,
            points: account.points,
            is_admin: account.is_admin,
        }
    }
}

fn account_error_response(e: &AccountError) -> axum::response::Response {
    match e {
        AccountError::DuplicateEmail(_) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "duplicate_email",
                "message": e.to_string()
            })),
        )
            .into_response(),
        AccountError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "account_not_found",
                "message": e.to_string()
            })),
        )
            .into_response(),
        AccountError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "invalid_credentials",
                "message": e.to_string()
            })),
        )
            .into_response(),
        AccountError::BalanceOverflow(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": "balance_overflow",
                "message": e.to_string()
            })),
        )
            .into_response(),
        AccountError::Password(_) | AccountError::Database(_) => {
            error!(error = %e, "Account operation failed");
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

/// POST `/accounts` - Register an account.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    if payload.email.is_empty() || !payload.email.contains('@') {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_email",
                "message": "A valid email address is required"
            })),
        )
            .into_response();
    }
    if payload.password.len() < 8 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "weak_password",
                "message": "Password must be at least 8 characters"
            })),
        )
            .into_response();
    }

    let repo = AccountRepository::new((*state.db).clone());
    match repo
        .register(RegisterAccountInput {
            email: payload.email,
            password: payload.password,
            full_name: payload.full_name,
        })
        .await
    {
        Ok(account) => (
            StatusCode::CREATED,
            Json(json!({ "account": AccountResponse::from(account) })),
        )
            .into_response(),
        Err(e) => account_error_response(&e),
    }
}

/// POST `/accounts/login` - Verify credentials.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());
    match repo.login(&payload.email, &payload.password).await {
        Ok(account) => (
            StatusCode::OK,
            Json(json!({ "account": AccountResponse::from(account) })),
        )
            .into_response(),
        Err(e) => account_error_response(&e),
    }
}

/// GET `/accounts/{id}` - Fetch an account.
async fn get_account(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());
    match repo.find_by_id(id).await {
        Ok(account) => (
            StatusCode::OK,
            Json(json!({ "account": AccountResponse::from(account) })),
        )
            .into_response(),
        Err(e) => account_error_response(&e),
    }
}

/// POST `/accounts/{id}/points` - Credit points to an account.
async fn grant_points(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<GrantPointsRequest>,
) -> impl IntoResponse {
    let Some(amount) = Points::new(payload.amount) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_amount",
                "message": "Point amount must be non-negative"
            })),
        )
            .into_response();
    };

    let repo = AccountRepository::new((*state.db).clone());
    match repo.grant_points(id, amount).await {
        Ok(account) => (
            StatusCode::OK,
            Json(json!({ "account": AccountResponse::from(account) })),
        )
            .into_response(),
        Err(e) => account_error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_email_maps_to_409() {
        let response =
            account_error_response(&AccountError::DuplicateEmail("a@b.test".to_string()));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_invalid_credentials_maps_to_401() {
        let response = account_error_response(&AccountError::InvalidCredentials);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = account_error_response(&AccountError::NotFound(Uuid::new_v4()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
