//! Per-request state threaded explicitly through the forum components.

use crate::security::identity::Identity;

/// Flash errors carried over to the next request (a redirect target).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlashMessages {
    errors: Vec<String>,
}

impl FlashMessages {
    #[must_use]
    pub const fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Drains the pending errors, leaving the set empty.
    pub fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.errors)
    }

    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Identity plus the flash messages pushed while handling the request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub identity: Identity,
    pub flash: FlashMessages,
}

impl RequestContext {
    #[must_use]
    pub fn new(identity: Identity) -> Self {
        Self { identity, flash: FlashMessages::default() }
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self::new(Identity::anonymous())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_drains_pending_errors() {
        let mut flash = FlashMessages::default();
        flash.push_error("That thread does not exist.");
        assert!(!flash.is_empty());

        assert_eq!(flash.take(), vec!["That thread does not exist.".to_owned()]);
        assert!(flash.is_empty());
        assert!(flash.take().is_empty());
    }
}
