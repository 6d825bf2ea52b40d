use crate::utils::AuthConfig;
use axum::http::{header, HeaderMap, HeaderValue};
use tower_sessions::cookie::{time::Duration, Cookie, CookieJar, SameSite};
use tracing::warn;

/// Lifetime given to "permanent" cookies.
pub const PERMANENT_MAX_AGE_DAYS: i64 = 20 * 365;

/// How the remember-me cookie is named and scoped.
#[derive(Debug, Clone)]
pub struct RememberCookie {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
}

impl Default for RememberCookie {
    fn default() -> Self {
        Self::from(&AuthConfig::default())
    }
}

impl From<&AuthConfig> for RememberCookie {
    fn from(config: &AuthConfig) -> Self {
        Self {
            name: config.cookie_name.clone(),
            secure: config.cookie_secure,
            http_only: config.cookie_http_only,
        }
    }
}

impl RememberCookie {
    /// A long-lived cookie carrying the raw token.
    pub fn issue(&self, token: &str) -> Cookie<'static> {
        Cookie::build((self.name.clone(), token.to_string()))
            .path("/")
            .max_age(Duration::days(PERMANENT_MAX_AGE_DAYS))
            .http_only(self.http_only)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .build()
    }

    /// The cookie shape needed for the jar to emit a matching removal.
    pub fn removal(&self) -> Cookie<'static> {
        Cookie::build(self.name.clone()).path("/").build()
    }

    pub fn read<'j>(&self, jar: &'j CookieJar) -> Option<&'j str> {
        jar.get(&self.name)
            .map(Cookie::value)
            .filter(|value| !value.is_empty())
    }
}

/// Builds a jar holding the cookies the client sent with this request.
pub fn jar_from_headers(headers: &HeaderMap) -> CookieJar {
    let mut jar = CookieJar::new();

    for value in headers.get_all(header::COOKIE) {
        let Ok(value) = value.to_str() else {
            continue;
        };
        for cookie in Cookie::split_parse(value).flatten() {
            jar.add_original(cookie.into_owned());
        }
    }

    jar
}

/// Appends the jar's pending changes as `Set-Cookie` headers.
pub fn apply_delta(jar: &CookieJar, headers: &mut HeaderMap) {
    for cookie in jar.delta() {
        match HeaderValue::from_str(&cookie.to_string()) {
            Ok(value) => {
                headers.append(header::SET_COOKIE, value);
            }
            Err(e) => warn!(cookie = cookie.name(), error = %e, "skipping unencodable cookie"),
        }
    }
}
