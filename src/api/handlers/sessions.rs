use crate::{
    auth::{cookies::apply_delta, redirect::redirect_back_or},
    types::{AppError, Result, SignInRequest},
    AppState,
};
use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use tower_sessions::Session;

/// Sign in with email and password
///
/// On success the remember cookie is set and the client is sent back to the
/// page it was originally denied, or to its own profile.
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    Json(payload): Json<SignInRequest>,
) -> Result<Response> {
    let user = state
        .authenticator
        .authenticate(&payload.email, &payload.password)
        .await?
        .ok_or_else(|| AppError::Auth("Invalid email/password combination".to_string()))?;

    let default_target = format!("/users/{}", user.id);

    let mut sessions = state.session_manager(&headers);
    sessions.sign_in(user).await?;

    let mut response = redirect_back_or(&session, &default_target)
        .await?
        .into_response();
    apply_delta(sessions.jar(), response.headers_mut());
    Ok(response)
}

/// Sign out and return to the home page
pub async fn destroy(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    let mut sessions = state.session_manager(&headers);
    sessions.sign_out().await?;

    let mut response = Redirect::to("/").into_response();
    apply_delta(sessions.jar(), response.headers_mut());
    Ok(response)
}
