use tower_sessions::session::Error;
use tower_sessions::Session;

const TOKEN_KEY: &str = "access_token";

/// Marks a response whose backend call was refused with 401, so the guard
/// can drop that browser's login.
#[derive(Clone, Copy, Debug)]
pub struct SessionExpired;

/// Stores the operator's bearer token in this browser's session. The session
/// id is rotated on login.
pub async fn begin(session: &Session, token: String) -> Result<(), Error> {
    session.cycle_id().await?;
    session.insert(TOKEN_KEY, token).await?;
    tracing::info!("session started");
    Ok(())
}

pub async fn end(session: &Session) -> Result<(), Error> {
    session.flush().await?;
    tracing::info!("session ended");
    Ok(())
}

pub async fn token(session: &Session) -> Result<Option<String>, Error> {
    session.get::<String>(TOKEN_KEY).await
}
