use crate::auth::cookies::apply_delta;
use crate::auth::redirect::store_location;
use crate::types::{AppError, User};
use crate::AppState;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::debug;

/// The signed-in user, placed in request extensions by `require_signed_in`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Access filter for routes that need a signed-in user.
///
/// Anonymous navigations are sent to the sign-in page after their URL is
/// stored, so a successful sign-in can send them back.
pub async fn require_signed_in(
    State(state): State<AppState>,
    session: Session,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let mut sessions = state.session_manager(req.headers());

    let Some(user) = sessions.current_user().await?.cloned() else {
        if req.method() == Method::GET || req.method() == Method::HEAD {
            // Path only; the return-to target must stay on this host.
            let target = req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or("/");
            store_location(&session, target).await?;
        }
        debug!(path = %req.uri().path(), "anonymous request redirected to sign-in");
        return Ok(Redirect::to(&state.config.auth.sign_in_path).into_response());
    };

    req.extensions_mut().insert(CurrentUser(user));

    let mut response = next.run(req).await;
    apply_delta(sessions.jar(), response.headers_mut());
    Ok(response)
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
