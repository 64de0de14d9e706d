//! Command implementations

pub mod clear;
pub mod settings;
pub mod show;
pub mod timezone;
pub mod validate;
pub mod write;

use anyhow::Result;
use ldlog_admin::WritableRootAuthorizer;
use ldlog_core::{OptionStore, SiteSettings};
use ldlog_logs::LogLocation;
use std::path::PathBuf;
use tracing::debug;

/// Resolved site root, log location and settings for one invocation
pub struct Context {
    pub location: LogLocation,
    pub store: OptionStore,
}

impl Context {
    /// Load the context for `root`, or the default home when unset
    pub fn load(root: Option<PathBuf>) -> Result<Self> {
        let location = root.map_or_else(LogLocation::default_home, LogLocation::new);
        debug!("Using site root {}", location.root().display());

        let store = OptionStore::find_and_load(location.root())?;
        Ok(Self { location, store })
    }

    pub fn settings(&self) -> SiteSettings {
        SiteSettings::from_store(&self.store)
    }

    pub fn authorizer(&self) -> WritableRootAuthorizer {
        WritableRootAuthorizer::new(self.location.root())
    }
}
