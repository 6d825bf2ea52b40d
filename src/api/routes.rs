use crate::api::handlers::{health, sessions, users};
use crate::auth::middleware::require_signed_in;
use crate::AppState;
use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        // Public routes (no sign-in required)
        .route("/health", get(health))
        .route("/users", post(users::create))
        .route("/users/{id}", get(users::show))
        .route("/signin", post(sessions::create))
        .route("/signout", delete(sessions::destroy));

    let protected_routes = Router::new()
        // Protected routes (sign-in required)
        .route("/profile", get(users::me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_signed_in,
        ));

    // Holds the return-to location between the denied request and sign-in.
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(state.config.auth.cookie_secure);

    public_routes
        .merge(protected_routes)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
