//! Forums feature slice.
//!
//! * [`gateway`]: resolves threads by id or slug, hides soft-deleted threads and
//!   builds share previews.
//! * [`pagination`]: reply pages where the original post takes the first slot.
//! * [`guard`]: role, ownership and lock checks in front of creation and deletion.
//! * [`preview`]: markdown to truncated plain text.
//! * [`directory`]: forums home and per-forum thread listings.
//!
//! Persistence stays behind [`data::ForumsDataContext`]; the HTTP layer lives in
//! [`server`] behind the `server` feature.

pub mod data;
pub mod directory;
mod error;
pub mod gateway;
pub mod guard;
pub mod pagination;
pub mod preview;
#[cfg(feature = "server")]
pub mod server;
pub mod settings;
pub mod views;

pub use crate::error::{ForumsError, ForumsErrorExt};
use crate::data::ForumsDataContext;
use crate::preview::{ConvertMarkdown, MarkdownConverter};
use crate::settings::ForumsSettings;
use agora_kernel::domain::config::ApiConfig;
use agora_kernel::domain::registry::InitializedSlice;
use std::sync::Arc;

/// Forums feature state.
#[agora_derive::agora_slice]
pub struct Forums {
    pub settings: ForumsSettings,
    pub data: Arc<dyn ForumsDataContext>,
    pub markdown: Arc<dyn ConvertMarkdown>,
}

impl Forums {
    /// Builds the slice with the default markdown converter.
    pub fn build(
        config: &ApiConfig,
        data: Arc<dyn ForumsDataContext>,
    ) -> Result<Self, ForumsError> {
        let settings = ForumsSettings::from_config(&config.forums)?;
        Ok(Self::new(ForumsInner { settings, data, markdown: Arc::new(MarkdownConverter) }))
    }
}

/// Initializes the forums slice for registration in the API state.
pub fn init(
    config: &ApiConfig,
    data: Arc<dyn ForumsDataContext>,
) -> Result<InitializedSlice, ForumsError> {
    let slice = Forums::build(config, data)?;

    tracing::info!(
        page_size = slice.settings.page_size.get(),
        preview_length = slice.settings.preview_length,
        "Forums slice initialized"
    );

    Ok(InitializedSlice::new(slice))
}
