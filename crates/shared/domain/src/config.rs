use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared by the server and the feature slices.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfigInner {
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
    pub forums: ForumsConfig,
}

/// Arc-wrapped config for inexpensive cloning into handlers and slices.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(flatten, default)]
    inner: Arc<ApiConfigInner>,
}

impl Deref for ApiConfig {
    type Target = ApiConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ApiConfig {
    fn deref_mut(&mut self) -> &mut ApiConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub address: IpAddr,
    pub port: u16,
    pub ssl: Option<SslConfig>,
}

/// TLS certificate/key paths.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SslConfig {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Session cookie used for flash messages.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub secure: bool,
    pub inactivity_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Enables the rolling file layer when set.
    pub directory: Option<PathBuf>,
    pub json: bool,
}

/// Forum behaviour knobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ForumsConfig {
    /// Items per page; on thread pages the original post counts as one item.
    pub page_size: usize,
    /// Maximum characters of the share/unfurl preview.
    pub preview_length: usize,
    /// Regular expression a trimmed thread title must match.
    pub title_pattern: String,
    pub title_error_message: String,
    /// Absolute origin used to build share links.
    pub public_base_url: String,
    /// Forums created in the in-memory data context at start-up.
    pub seed: Vec<ForumSeed>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForumSeed {
    pub slug: String,
    pub title: String,
    #[serde(default = "active_by_default")]
    pub active: bool,
}

const fn active_by_default() -> bool {
    true
}

// --- Default ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: 4583, ssl: None }
    }
}

impl Default for SslConfig {
    fn default() -> Self {
        Self { cert: PathBuf::from("cert.pem"), key: PathBuf::from("key.pem") }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { cookie_name: "agora-session".to_owned(), secure: false, inactivity_minutes: 60 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), directory: None, json: false }
    }
}

impl Default for ForumsConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            preview_length: 100,
            title_pattern: r"^[\p{L}\p{N}][\p{L}\p{N}\p{P}\p{S}\p{Zs}]{2,99}$".to_owned(),
            title_error_message:
                "Thread titles must be 3 to 100 characters long and start with a letter or digit."
                    .to_owned(),
            public_base_url: "https://localhost:4583".to_owned(),
            seed: vec![ForumSeed {
                slug: "general".to_owned(),
                title: "General Discussion".to_owned(),
                active: true,
            }],
        }
    }
}
