use crate::constants::{ADMIN_CLAIM, FORUMS_MODERATOR_CLAIM, FORUMS_WRITER_CLAIM};
use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Role claims attached to an authenticated identity.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RoleSet: u32 {
        const FORUMS_WRITER = 1 << 0;
        const FORUMS_MODERATOR = 1 << 1;
        const ADMIN = 1 << 2;
    }
}

impl RoleSet {
    /// Parses a comma separated list of claim values; unknown claims are ignored.
    #[must_use]
    pub fn from_claims(raw: &str) -> Self {
        raw.split(',').map(str::trim).filter(|c| !c.is_empty()).map(Self::from).collect()
    }
}

impl From<&str> for RoleSet {
    fn from(claim: &str) -> Self {
        match claim {
            FORUMS_WRITER_CLAIM => Self::FORUMS_WRITER,
            FORUMS_MODERATOR_CLAIM => Self::FORUMS_MODERATOR,
            ADMIN_CLAIM => Self::ADMIN,
            _ => Self::empty(),
        }
    }
}

impl Serialize for RoleSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for RoleSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        u32::deserialize(deserializer).map(Self::from_bits_truncate)
    }
}
