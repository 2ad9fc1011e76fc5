/**
 * User Lookup Handlers
 *
 * - `GET /users/me` - the caller's own record
 * - `GET /users?search=` - case-insensitive search on username or email
 */
use std::sync::Arc;

use axum::{
    extract::State,
    response::Json,
};

use crate::backend::auth::handlers::types::{UserResponse, UserSearchQuery};
use crate::backend::error::BackendResult;
use crate::backend::middleware::{AuthUser, QueryParams};
use crate::backend::store::{DocumentStore, USER_SEARCH_LIMIT};

/// Get current user handler
pub async fn get_me(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}

/// Search users handler
///
/// The search text is matched literally; without it the first 100 users are
/// listed.
pub async fn search_users(
    State(store): State<Arc<dyn DocumentStore>>,
    AuthUser(_caller): AuthUser,
    QueryParams(query): QueryParams<UserSearchQuery>,
) -> BackendResult<Json<Vec<UserResponse>>> {
    let users = store
        .search_users(query.search.as_deref(), USER_SEARCH_LIMIT)
        .await?;

    tracing::debug!("User search {:?} matched {} user(s)", query.search, users.len());

    Ok(Json(users.iter().map(UserResponse::from).collect()))
}
