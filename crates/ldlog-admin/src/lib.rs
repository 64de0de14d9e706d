//! ldlog Admin - Request handling for the log screen
//!
//! Handlers take their authorization and anti-CSRF checks as injected
//! traits and return their outcome to the caller, which hands it to the
//! page model for rendering.

mod guard;
mod handler;
#[cfg(test)]
pub mod mock;
mod page;
mod request;

pub use guard::{NonceRegistry, WritableRootAuthorizer};
pub use handler::{handle_delete_request, handle_settings_save};
pub use page::LogPage;
pub use request::{is_truthy, AdminRequest, Method};

/// Capability check for the current caller
pub trait Authorizer {
    /// Whether the caller holds `capability`
    fn can(&self, capability: &str) -> bool;
}

/// Anti-CSRF token check
pub trait CsrfVerifier {
    /// Verify the token carried in `field` of `request` for `action`
    fn verify(&self, request: &AdminRequest, action: &str, field: &str) -> bool;
}
