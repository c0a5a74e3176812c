//! Facade crate for Agora features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `agora` with the `server` feature for the HTTP surface.
//! - Call [`init`] to build the feature slices for the API state.

pub use agora_domain as domain;
use agora_domain::config::ApiConfig;
use agora_domain::registry::InitializedSlice;
pub use agora_kernel as kernel;
use std::sync::Arc;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use agora_forums::server::router::forums_router;
        pub use agora_kernel::server::router::system_router;
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use agora_forums as forums;

    /// Build-time enabled features (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        "forums",
        #[cfg(feature = "server")]
        "server",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initializes every feature slice.
///
/// The forums slice reads and writes through `forums_data`; pass
/// [`features::forums::data::InMemoryForums`] for a self-contained deployment.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub fn init(
    config: &ApiConfig,
    forums_data: Arc<dyn features::forums::data::ForumsDataContext>,
) -> Result<Vec<InitializedSlice>, Box<dyn std::error::Error + Send + Sync>> {
    let slices = vec![features::forums::init(config, forums_data)?];

    Ok(slices)
}
