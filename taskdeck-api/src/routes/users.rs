/// User listing endpoints
///
/// Read-only. Accounts are created and mutated through the external
/// credential service; this surface only lists them for assignment
/// pickers and identifies the current viewer.
///
/// # Endpoints
///
/// - `GET /users` - List all employee-role users
/// - `GET /user` - Current viewer (public access mode: the first user)

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use serde::Serialize;
use taskdeck_shared::models::user::{User, UserRole};

/// Employee listing response
#[derive(Debug, Serialize)]
pub struct UsersResponse {
    /// All users with the employee role
    pub users: Vec<User>,
}

/// Lists all employee-role users
///
/// Admin accounts are excluded: the listing feeds assignment pickers and
/// only staff can own tasks there. No pagination; the full list is
/// returned on every call.
///
/// # Endpoint
///
/// ```text
/// GET /users
/// ```
///
/// # Response
///
/// ```json
/// { "users": [ { "id": 2, "name": "John Doe", "role": "employee", ... } ] }
/// ```
pub async fn list_employees(State(state): State<AppState>) -> ApiResult<Json<UsersResponse>> {
    let users = User::list_by_role(&state.db, UserRole::Employee).await?;

    tracing::debug!(count = users.len(), "Listed employees");

    Ok(Json(UsersResponse { users }))
}

/// Returns the current viewer
///
/// In public access mode there is no session to resolve, so the first
/// user in the store stands in for the viewer. Returns JSON `null` when
/// the store is empty.
///
/// # Endpoint
///
/// ```text
/// GET /user
/// ```
pub async fn current_user(State(state): State<AppState>) -> ApiResult<Json<Option<User>>> {
    let user = User::first(&state.db).await?;

    Ok(Json(user))
}
