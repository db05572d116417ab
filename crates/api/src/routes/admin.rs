//! Route definitions for the `/admin` resource.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `admin` role (enforced by handler extractors).
/// The `{account}` segment is an account id, except under `/role` where it
/// is a username; the router requires one parameter name per position.
///
/// ```text
/// GET    /users                       -> list_users
/// DELETE /users/{account}             -> delete_user
/// PUT    /users/{account}/role        -> update_role
/// GET    /users/{account}/earnings    -> user_earnings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{account}", delete(admin::delete_user))
        .route("/users/{account}/role", put(admin::update_role))
        .route("/users/{account}/earnings", get(admin::user_earnings))
}
