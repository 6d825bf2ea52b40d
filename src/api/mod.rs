//! HTTP API Handlers and Routes
//!
//! This module exposes the authentication core over HTTP, built on the Axum
//! web framework. It is a thin adapter: every decision is made in
//! [`auth`](crate::auth) and [`users`](crate::users).
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! ## Users
//! - `POST /users` - Register (JSON sign-up form), signs the new user in
//! - `GET /users/{id}` - Public user view
//! - `GET /profile` - The signed-in user (requires sign-in)
//!
//! ## Sessions
//! - `POST /signin` - Email/password sign-in, sets the remember cookie
//! - `DELETE /signout` - Deletes the remember cookie
//!
//! ## Health
//! - `GET /health` - Health check endpoint
//!
//! # Authentication
//!
//! Protected endpoints resolve the user from the `remember_token` cookie.
//! Anonymous requests are redirected to the sign-in path and their URL is
//! remembered in the server-side session for the post-sign-in redirect.

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
