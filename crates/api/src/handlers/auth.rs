//! Handlers for the `/auth` resource (signup, login, current account).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use dayjob_core::account::{Account, CreateAccount};
use dayjob_core::error::CoreError;
use dayjob_core::roles::Role;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{
    hash_password, validate_password_strength, verify_password, MIN_PASSWORD_LENGTH,
};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub department: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: Account,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Register a poster or doer account. Returns the account with 201 Created.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Account>>)> {
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateAccount {
        username: input.username,
        email: input.email,
        role: input.role,
        department: input.department,
    };
    let account = state.marketplace.accounts.sign_up(&create, &hashed).await?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(account))))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Unknown usernames and wrong
/// passwords are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    let credentials = state
        .marketplace
        .accounts
        .find_credentials(&input.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &credentials.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(username = %input.username, "Login failed");
        return Err(invalid_credentials());
    }

    let account = credentials.account;
    let access_token = generate_access_token(account.id, account.role.as_str(), &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(account_id = %account.id, role = %account.role, "Login succeeded");

    Ok(Json(DataResponse::new(AuthResponse {
        access_token,
        token_type: "bearer",
        expires_in: state.config.jwt.expires_in_secs(),
        user: account,
    })))
}

/// GET /api/v1/auth/user
pub async fn current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Account>>> {
    let account = state.marketplace.accounts.get(auth.actor.id).await?;
    Ok(Json(DataResponse::new(account)))
}
