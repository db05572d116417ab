//! Role-based access control extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use dayjob_core::authz::{evaluate, Action, Resource};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     // admin.actor.role is Role::Admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        evaluate(&user.actor, Action::ManageAccounts, &Resource::None)
            .into_result(Action::ManageAccounts)?;
        Ok(RequireAdmin(user))
    }
}
