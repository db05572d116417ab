//! Handlers for the `/admin` resource (account management).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use dayjob_core::account::{Account, AccountFilter};
use dayjob_core::earnings::Earnings;
use dayjob_core::roles::Role;
use dayjob_core::types::DbId;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for `GET /admin/users`.
#[derive(Debug, Default, Deserialize)]
pub struct UserListParams {
    pub role: Option<Role>,
}

/// Request body for `PUT /admin/users/{username}/role`.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(params): Query<UserListParams>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Account>>>> {
    let filter = AccountFilter {
        role: params.role,
        limit: Some(page.limit()),
        offset: Some(page.offset()),
    };
    let accounts = state
        .marketplace
        .accounts
        .list(&admin.actor, &filter)
        .await?;
    Ok(Json(DataResponse::new(accounts)))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Jobs and applications authored by the account are kept.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.marketplace.accounts.delete(&admin.actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/admin/users/{username}/role
pub async fn update_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(username): Path<String>,
    Json(input): Json<UpdateRoleRequest>,
) -> AppResult<Json<DataResponse<Account>>> {
    let account = state
        .marketplace
        .accounts
        .update_role(&admin.actor, &username, input.role)
        .await?;
    Ok(Json(DataResponse::new(account)))
}

/// GET /api/v1/admin/users/{id}/earnings
pub async fn user_earnings(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Earnings>>> {
    let earnings = state
        .marketplace
        .earnings
        .earnings_for(&admin.actor, id)
        .await?;
    Ok(Json(DataResponse::new(earnings)))
}
