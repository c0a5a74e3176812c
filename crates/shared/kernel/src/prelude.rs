pub use crate::context::{FlashMessages, RequestContext};
pub use crate::security::identity::{AccessError, Identity};
#[cfg(feature = "server")]
pub use crate::server::state::ApiState;
pub use agora_domain::config::ApiConfig;
pub use agora_domain::roles::RoleSet;
