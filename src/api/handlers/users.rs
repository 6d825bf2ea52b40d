use crate::{
    auth::{cookies::apply_delta, CurrentUser},
    types::{AppError, Result, UserResponse},
    users::{self, SignUp},
    AppState,
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

/// Register a new user and sign them in
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SignUp>,
) -> Result<Response> {
    let user = users::register(state.users.as_ref(), &payload).await?;
    let body = UserResponse::from(&user);

    let mut sessions = state.session_manager(&headers);
    sessions.sign_in(user).await?;

    let mut response = (StatusCode::CREATED, Json(body)).into_response();
    apply_delta(sessions.jar(), response.headers_mut());
    Ok(response)
}

/// Public view of a single user
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>> {
    let user = state
        .users
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {}", id)))?;

    Ok(Json(UserResponse::from(&user)))
}

/// The signed-in user's own record
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}
