use crate::auth::cookies::RememberCookie;
use crate::auth::token::TokenIssuer;
use crate::db::UserRepository;
use crate::types::{Result, User};
use std::sync::Arc;
use tower_sessions::cookie::CookieJar;
use tracing::{debug, info};

/// Outcome of current-user resolution for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated(User),
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Authenticated(user) => Some(user),
        }
    }
}

/// Per-request sign-in state.
///
/// Build one per inbound request from the shared repository and that
/// request's cookie jar, then hand the jar back to the HTTP layer so its
/// delta reaches the client. The resolved user is memoized on the value
/// itself and dies with it.
pub struct SessionManager {
    users: Arc<dyn UserRepository>,
    tokens: TokenIssuer,
    cookie: RememberCookie,
    rotate_on_sign_out: bool,
    jar: CookieJar,
    // `None` until the first lookup.
    current: Option<SessionState>,
}

impl SessionManager {
    pub fn new(users: Arc<dyn UserRepository>, cookie: RememberCookie, jar: CookieJar) -> Self {
        Self {
            users,
            tokens: TokenIssuer::new(),
            cookie,
            rotate_on_sign_out: false,
            jar,
            current: None,
        }
    }

    /// Replace the stored digest on sign-out, invalidating every cookie
    /// issued for the user so far.
    pub fn rotate_on_sign_out(mut self, rotate: bool) -> Self {
        self.rotate_on_sign_out = rotate;
        self
    }

    /// Issues a fresh remember token for `user` and marks them signed in.
    ///
    /// On a store failure nothing changes: no cookie is set and the
    /// resolved user is left as it was.
    pub async fn sign_in(&mut self, mut user: User) -> Result<()> {
        let (raw, digest) = self.tokens.mint()?.into_parts();

        self.users.update_remember_digest(&user.id, &digest).await?;
        user.remember_digest = digest;

        self.jar.add(self.cookie.issue(&raw));
        info!(user_id = %user.id, "signed in");
        self.current = Some(SessionState::Authenticated(user));
        Ok(())
    }

    /// Resolves the user behind this request's remember cookie.
    ///
    /// Only the first call per request touches the store. A missing or
    /// unknown cookie resolves to `None`; the only error is a store failure.
    pub async fn current_user(&mut self) -> Result<Option<&User>> {
        if self.current.is_none() {
            let resolved = self.resolve_from_cookie().await?;
            self.current = Some(resolved);
        }
        Ok(self.current.as_ref().and_then(SessionState::user))
    }

    async fn resolve_from_cookie(&self) -> Result<SessionState> {
        let Some(token) = self.cookie.read(&self.jar) else {
            debug!("no remember cookie");
            return Ok(SessionState::Anonymous);
        };

        let digest = self.tokens.digest(token);
        match self.users.find_by_remember_digest(&digest).await? {
            Some(user) => {
                debug!(user_id = %user.id, "resolved current user from remember cookie");
                Ok(SessionState::Authenticated(user))
            }
            None => {
                debug!("remember cookie matches no user");
                Ok(SessionState::Anonymous)
            }
        }
    }

    pub async fn is_signed_in(&mut self) -> Result<bool> {
        Ok(self.current_user().await?.is_some())
    }

    /// Identity is compared by id, not by the rest of the record.
    pub async fn is_current_user(&mut self, candidate: &User) -> Result<bool> {
        Ok(self
            .current_user()
            .await?
            .is_some_and(|user| user.id == candidate.id))
    }

    /// Forgets the current user and deletes the remember cookie.
    ///
    /// Unless rotation is enabled the stored digest is left alone, so a copy
    /// of the old cookie value still resolves until the next sign-in.
    pub async fn sign_out(&mut self) -> Result<()> {
        if self.rotate_on_sign_out {
            if let Some(user_id) = self.current_user().await?.map(|u| u.id.clone()) {
                // The matching raw token is never handed to anyone.
                let digest = self.tokens.mint()?.digest().to_string();
                self.users.update_remember_digest(&user_id, &digest).await?;
                debug!(user_id = %user_id, "rotated remember digest on sign-out");
            }
        }

        if let Some(user) = self.current.as_ref().and_then(SessionState::user) {
            info!(user_id = %user.id, "signed out");
        }
        self.current = Some(SessionState::Anonymous);
        self.jar.remove(self.cookie.removal());
        Ok(())
    }

    /// The resolution state, or `None` if nothing has been resolved yet.
    pub fn state(&self) -> Option<&SessionState> {
        self.current.as_ref()
    }

    pub fn jar(&self) -> &CookieJar {
        &self.jar
    }

    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}
