//! Concrete authorization and anti-CSRF implementations

use ldlog_core::constants::{logs_dir, MANAGE_CAPABILITY};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::request::AdminRequest;
use crate::{Authorizer, CsrfVerifier};

/// Issues single-use tokens per action and verifies them once
#[derive(Debug, Default)]
pub struct NonceRegistry {
    issued: Mutex<HashMap<String, Vec<String>>>,
}

impl NonceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token for `action`
    pub fn issue(&self, action: &str) -> String {
        let token = uuid::Uuid::new_v4().simple().to_string();
        self.issued
            .lock()
            .entry(action.to_string())
            .or_default()
            .push(token.clone());
        token
    }

    /// Consume `token` for `action`. Unknown or already used tokens fail.
    pub fn consume(&self, action: &str, token: &str) -> bool {
        let mut issued = self.issued.lock();
        let Some(tokens) = issued.get_mut(action) else {
            return false;
        };
        match tokens.iter().position(|t| t == token) {
            Some(pos) => {
                tokens.swap_remove(pos);
                true
            }
            None => false,
        }
    }
}

impl CsrfVerifier for NonceRegistry {
    fn verify(&self, request: &AdminRequest, action: &str, field: &str) -> bool {
        let Some(token) = request.field_str(field) else {
            debug!("Request has no {} token", field);
            return false;
        };
        let valid = self.consume(action, &token);
        if !valid {
            debug!("Rejected {} token for action {}", field, action);
        }
        valid
    }
}

/// Grants the manage capability to callers that can write to the log
/// directory (or its nearest existing ancestor)
#[derive(Debug, Clone)]
pub struct WritableRootAuthorizer {
    root: PathBuf,
}

impl WritableRootAuthorizer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Authorizer for WritableRootAuthorizer {
    fn can(&self, capability: &str) -> bool {
        if capability != MANAGE_CAPABILITY {
            return false;
        }
        let dir = logs_dir(&self.root);
        match nearest_existing(&dir).and_then(|p| fs::metadata(p).ok()) {
            Some(meta) => !meta.permissions().readonly(),
            None => false,
        }
    }
}

fn nearest_existing(path: &Path) -> Option<&Path> {
    path.ancestors().find(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_nonce_is_single_use() {
        let registry = NonceRegistry::new();
        let token = registry.issue("ldl_delete_log_action");

        let request = AdminRequest::post().with_field("ldl_delete_nonce", token.as_str());
        assert!(registry.verify(&request, "ldl_delete_log_action", "ldl_delete_nonce"));
        assert!(!registry.verify(&request, "ldl_delete_log_action", "ldl_delete_nonce"));
    }

    #[test]
    fn test_nonce_is_action_scoped() {
        let registry = NonceRegistry::new();
        let token = registry.issue("ldl_save_settings_action");

        let request = AdminRequest::post().with_field("ldl_delete_nonce", token.as_str());
        assert!(!registry.verify(&request, "ldl_delete_log_action", "ldl_delete_nonce"));
    }

    #[test]
    fn test_nonce_missing_or_forged() {
        let registry = NonceRegistry::new();
        registry.issue("ldl_delete_log_action");

        let missing = AdminRequest::post();
        assert!(!registry.verify(&missing, "ldl_delete_log_action", "ldl_delete_nonce"));

        let forged = AdminRequest::post().with_field("ldl_delete_nonce", "forged");
        assert!(!registry.verify(&forged, "ldl_delete_log_action", "ldl_delete_nonce"));

        let wrong_type = AdminRequest::post().with_field("ldl_delete_nonce", true);
        assert!(!registry.verify(&wrong_type, "ldl_delete_log_action", "ldl_delete_nonce"));
    }

    #[test]
    fn test_authorizer_grants_manage_on_writable_root() {
        let dir = TempDir::new().unwrap();
        let authorizer = WritableRootAuthorizer::new(dir.path());

        assert!(authorizer.can(MANAGE_CAPABILITY));
        assert!(!authorizer.can("edit_posts"));
    }
}
