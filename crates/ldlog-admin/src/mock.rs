//! Mock implementations for testing

use crate::request::AdminRequest;
use crate::{Authorizer, CsrfVerifier};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A mock authorizer that records every capability it was asked about
#[derive(Default)]
pub struct MockAuthorizer {
    /// Capabilities that have been checked
    capabilities: Mutex<Vec<String>>,
    /// Number of `can` calls
    call_count: AtomicUsize,
    /// Whether to grant every capability
    allow: bool,
}

impl MockAuthorizer {
    /// Create an authorizer that grants everything
    pub fn allow() -> Self {
        Self {
            allow: true,
            ..Default::default()
        }
    }

    /// Create an authorizer that denies everything
    pub fn deny() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn capabilities(&self) -> Vec<String> {
        self.capabilities.lock().clone()
    }
}

impl Authorizer for MockAuthorizer {
    fn can(&self, capability: &str) -> bool {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.capabilities.lock().push(capability.to_string());
        self.allow
    }
}

/// A mock token verifier that records (action, field) pairs
#[derive(Default)]
pub struct MockCsrf {
    checks: Mutex<Vec<(String, String)>>,
    call_count: AtomicUsize,
    valid: bool,
}

impl MockCsrf {
    /// Create a verifier that accepts every token
    pub fn valid() -> Self {
        Self {
            valid: true,
            ..Default::default()
        }
    }

    /// Create a verifier that rejects every token
    pub fn invalid() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// All (action, field) pairs that were verified
    pub fn checks(&self) -> Vec<(String, String)> {
        self.checks.lock().clone()
    }
}

impl CsrfVerifier for MockCsrf {
    fn verify(&self, _request: &AdminRequest, action: &str, field: &str) -> bool {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.checks
            .lock()
            .push((action.to_string(), field.to_string()));
        self.valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_authorizer_records_checks() {
        let auth = MockAuthorizer::allow();
        assert!(auth.can("manage_options"));
        assert!(auth.can("edit_posts"));

        assert_eq!(auth.call_count(), 2);
        assert_eq!(auth.capabilities(), vec!["manage_options", "edit_posts"]);
        assert!(!MockAuthorizer::deny().can("manage_options"));
    }

    #[test]
    fn test_mock_csrf_records_checks() {
        let csrf = MockCsrf::invalid();
        assert!(!csrf.verify(&AdminRequest::post(), "action", "field"));
        assert_eq!(csrf.call_count(), 1);
        assert_eq!(csrf.checks(), vec![("action".to_string(), "field".to_string())]);
    }
}
