//! Shared string constants: `OpenAPI` tags, claim values, header and session keys.

pub const SYSTEM_TAG: &str = "System";
pub const FORUMS_TAG: &str = "Forums";

pub const FORUMS_WRITER_CLAIM: &str = "forums-writer";
pub const FORUMS_MODERATOR_CLAIM: &str = "forums-moderator";
pub const ADMIN_CLAIM: &str = "admin";

/// Set by the upstream authentication proxy.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Comma separated role claim values, set by the upstream authentication proxy.
pub const USER_ROLES_HEADER: &str = "x-user-roles";

pub const FLASH_ERRORS_KEY: &str = "flash.errors";
