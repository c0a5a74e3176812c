use crate::error::ForumsError;
use agora_kernel::domain::config::ForumsConfig;
use regex::Regex;
use std::num::NonZeroUsize;

/// Validated, ready-to-use form of [`ForumsConfig`].
#[derive(Debug, Clone)]
pub struct ForumsSettings {
    pub page_size: NonZeroUsize,
    pub preview_length: usize,
    pub title_pattern: Regex,
    pub title_error_message: String,
    pub public_base_url: String,
}

impl ForumsSettings {
    pub fn from_config(config: &ForumsConfig) -> Result<Self, ForumsError> {
        let page_size = NonZeroUsize::new(config.page_size)
            .ok_or_else(|| ForumsError::config("forums.page_size must be at least 1"))?;

        let title_pattern = Regex::new(&config.title_pattern).map_err(|err| ForumsError::Config {
            message: err.to_string().into(),
            context: Some("forums.title_pattern".into()),
        })?;

        Ok(Self {
            page_size,
            preview_length: config.preview_length,
            title_pattern,
            title_error_message: config.title_error_message.clone(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Canonical link handed out by the share endpoint.
    #[must_use]
    pub fn share_link(&self, thread_id: u64) -> String {
        format!("{}/forums/threads/{thread_id}", self.public_base_url)
    }
}
