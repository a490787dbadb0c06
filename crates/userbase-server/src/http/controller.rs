//! User controller: one handler per route, one service call per handler.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::IntoResponse,
};
use userbase_core::domain::{NewUser, User, UserPatch};

use super::{AppState, error::ApiError};

type ApiResult<T> = Result<T, ApiError>;

/// Id segment of `/users/{id}`. An undecodable segment is reported as a
/// missing user with the usual JSON error body.
type UserIdPath = Result<Path<String>, PathRejection>;

fn path_id(path: UserIdPath) -> ApiResult<String> {
    let Path(id) = path?;
    Ok(id)
}

/// `GET /users`
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.users.list().await?))
}

/// `GET /users/{id}`
pub async fn get_user(
    State(state): State<AppState>,
    path: UserIdPath,
) -> ApiResult<Json<User>> {
    let id = path_id(path)?;
    match state.users.get(&id).await? {
        Some(user) => Ok(Json(user)),
        None => Err(ApiError::NotFound { id }),
    }
}

/// `POST /users`
///
/// Responds `201 Created` with the stored user and a `Location` header.
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(new_user) = payload?;
    let user = state.users.create(new_user).await?;
    let location = format!("/users/{}", user.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(user)))
}

/// `PUT /users/{id}`
pub async fn update_user(
    State(state): State<AppState>,
    path: UserIdPath,
    payload: Result<Json<UserPatch>, JsonRejection>,
) -> ApiResult<Json<User>> {
    let id = path_id(path)?;
    let Json(patch) = payload?;
    Ok(Json(state.users.update(&id, patch).await?))
}

/// `DELETE /users/{id}`
pub async fn delete_user(
    State(state): State<AppState>,
    path: UserIdPath,
) -> ApiResult<StatusCode> {
    let id = path_id(path)?;
    state.users.delete(&id).await?;
    Ok(StatusCode::OK)
}
