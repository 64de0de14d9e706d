//! Site settings storage for ldlog
//!
//! Settings live in a flat key/value file next to the log directory.
//! Supported formats:
//! - TOML (.toml)
//! - YAML (.yaml, .yml)
//! - JSON (.json)
//!
//! Readers always supply a typed default, so a missing file, a missing key or
//! a value of the wrong shape never fails a read.

use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::constants::*;
use crate::error::{Error, Result};
use crate::types::LogOrder;

/// Supported settings file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(ConfigFormat::Toml),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "json" => Some(ConfigFormat::Json),
            _ => None,
        }
    }

    /// Detect format from file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Key/value option store backed by a settings file
#[derive(Debug, Clone)]
pub struct OptionStore {
    path: PathBuf,
    format: ConfigFormat,
    values: BTreeMap<String, Value>,
}

impl OptionStore {
    /// Empty store that will be saved to `path`
    pub fn new(path: PathBuf) -> Result<Self> {
        let format = detect_format(&path)?;
        Ok(Self {
            path,
            format,
            values: BTreeMap::new(),
        })
    }

    /// Load options from a file. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        let mut store = Self::new(path.to_path_buf())?;

        if !path.exists() {
            debug!("Settings not found at {:?}, using defaults", path);
            return Ok(store);
        }

        let content = std::fs::read_to_string(path)?;
        store.values = Self::parse(&content, store.format)?;
        debug!("Loaded {} option(s) from {:?}", store.values.len(), path);
        Ok(store)
    }

    /// Find the settings file in `root`, falling back to `settings.toml`
    pub fn find_and_load(root: &Path) -> Result<Self> {
        for name in SETTINGS_FILES {
            let path = root.join(name);
            if path.exists() {
                return Self::load(&path);
            }
        }
        Self::new(root.join(SETTINGS_FILES[0]))
    }

    /// Parse settings content with specified format
    pub fn parse(content: &str, format: ConfigFormat) -> Result<BTreeMap<String, Value>> {
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let values = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };
        Ok(values)
    }

    /// Write all options back to the settings file
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = match self.format {
            ConfigFormat::Toml => toml::to_string_pretty(&self.values)?,
            ConfigFormat::Yaml => serde_yaml::to_string(&self.values)?,
            ConfigFormat::Json => serde_json::to_string_pretty(&self.values)?,
        };
        std::fs::write(&self.path, content)?;

        info!("Saved settings to {:?}", self.path);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw stored value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Read a string option. Numbers are rendered as text.
    pub fn get_string(&self, key: &str, default: &str) -> String {
        match self.values.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => default.to_string(),
        }
    }

    /// Read a numeric option. Numeric strings are accepted.
    pub fn get_f64(&self, key: &str, default: f64) -> f64 {
        match self.values.get(key) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(default),
            Some(Value::String(s)) if s.trim().is_empty() => 0.0,
            Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    /// Read a boolean option. Values that are not recognisably boolean
    /// return `default`.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.values.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => match n.as_i64() {
                Some(0) => false,
                Some(1) => true,
                _ => default,
            },
            Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => default,
            },
            _ => default,
        }
    }

    /// Set an option. Null values remove the key.
    pub fn set<V: Into<Value>>(&mut self, key: &str, value: V) {
        match value.into() {
            Value::Null => {
                self.values.remove(key);
            }
            value => {
                self.values.insert(key.to_string(), value);
            }
        }
    }
}

fn detect_format(path: &Path) -> Result<ConfigFormat> {
    ConfigFormat::from_path(path).ok_or_else(|| {
        Error::ConfigError(format!(
            "Unsupported settings file extension: {}. Expected .toml, .yaml, .yml, or .json",
            path.display()
        ))
    })
}

/// Typed view of the site settings
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSettings {
    /// Explicit timezone name, empty when unset
    pub timezone_string: String,
    /// UTC offset in hours, used when no timezone name is set
    pub gmt_offset: f64,
    /// Capture log output even when debug is off
    pub force_capture: bool,
    /// Display order of log lines
    pub log_order: LogOrder,
    /// Debug mode flag
    pub debug: bool,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            timezone_string: String::new(),
            gmt_offset: 0.0,
            force_capture: false,
            log_order: LogOrder::Oldest,
            debug: false,
        }
    }
}

impl SiteSettings {
    pub fn from_store(store: &OptionStore) -> Self {
        let log_order = store
            .get_string(OPT_LOG_ORDER, LogOrder::Oldest.as_str())
            .parse()
            .unwrap_or_default();

        Self {
            timezone_string: store.get_string(OPT_TIMEZONE_STRING, ""),
            gmt_offset: store.get_f64(OPT_GMT_OFFSET, 0.0),
            force_capture: store.get_bool(OPT_FORCE_CAPTURE, false),
            log_order,
            debug: store.get_bool(OPT_DEBUG, false),
        }
    }

    /// Whether log output should be captured to the log file
    pub fn capture_enabled(&self) -> bool {
        self.debug || self.force_capture
    }
}
