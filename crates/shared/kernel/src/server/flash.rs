//! Flash messages persisted in the `tower-sessions` session between a redirect
//! and the request that follows it.

use crate::context::FlashMessages;
use agora_domain::config::SessionConfig;
use agora_domain::constants::FLASH_ERRORS_KEY;
use std::borrow::Cow;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

#[agora_derive::agora_error]
pub enum FlashError {
    #[error("Session error{}: {source}", format_context(.context))]
    Session { source: tower_sessions::session::Error, context: Option<Cow<'static, str>> },
}

/// Removes and returns the flash errors stored by a previous request.
pub async fn take_flash(session: &Session) -> Result<FlashMessages, FlashError> {
    let errors = session
        .remove::<Vec<String>>(FLASH_ERRORS_KEY)
        .await
        .context("Failed to read flash errors")?
        .unwrap_or_default();
    Ok(FlashMessages::new(errors))
}

/// Appends `flash` to whatever the session already holds; empty sets are not written.
pub async fn persist_flash(session: &Session, mut flash: FlashMessages) -> Result<(), FlashError> {
    if flash.is_empty() {
        return Ok(());
    }

    let mut errors = session
        .get::<Vec<String>>(FLASH_ERRORS_KEY)
        .await
        .context("Failed to read flash errors")?
        .unwrap_or_default();
    errors.extend(flash.take());

    session.insert(FLASH_ERRORS_KEY, errors).await.context("Failed to store flash errors")?;
    Ok(())
}

/// In-memory session layer configured from [`SessionConfig`].
#[must_use]
pub fn session_layer(config: &SessionConfig) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(config.cookie_name.clone())
        .with_secure(config.secure)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(config.inactivity_minutes)))
}
