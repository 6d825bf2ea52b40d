use crate::types::Result;
use axum::response::Redirect;
use tower_sessions::Session;
use tracing::debug;

/// Session key under which the pending return-to URL is kept.
pub const RETURN_TO_KEY: &str = "return_to";

/// Remembers where to send the client once they have signed in.
pub async fn store_location(session: &Session, url: &str) -> Result<()> {
    session.insert(RETURN_TO_KEY, url.to_string()).await?;
    debug!(url, "stored return-to location");
    Ok(())
}

/// Consumes the stored location, falling back to `default`.
///
/// Storage is only written when there was something to consume.
pub async fn take_return_to(session: &Session, default: &str) -> Result<String> {
    match session.get::<String>(RETURN_TO_KEY).await? {
        Some(url) => {
            session.remove::<String>(RETURN_TO_KEY).await?;
            Ok(url)
        }
        None => Ok(default.to_string()),
    }
}

/// Redirects to the stored location (once) or to `default`.
pub async fn redirect_back_or(session: &Session, default: &str) -> Result<Redirect> {
    let target = take_return_to(session, default).await?;
    Ok(Redirect::to(&target))
}
