//! Containment check for log file paths
//!
//! A candidate is accepted only if it lies strictly inside the allowed log
//! directory. Candidates containing `../` are resolved with the platform's
//! canonicalization and rejected if they cannot be resolved; there is no
//! manual segment collapsing.

use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A path proven, at validation time, to lie inside the allowed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPath(PathBuf);

impl ValidatedPath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for ValidatedPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ValidatedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Validates candidate paths against a single allowed directory
#[derive(Debug, Clone)]
pub struct PathValidator {
    allowed_root: PathBuf,
}

impl PathValidator {
    pub fn new(allowed_root: impl Into<PathBuf>) -> Self {
        Self {
            allowed_root: allowed_root.into(),
        }
    }

    pub fn allowed_root(&self) -> &Path {
        &self.allowed_root
    }

    /// Validate an untyped value. Anything but a string is rejected.
    pub fn validate_value(&self, candidate: &Value) -> Option<ValidatedPath> {
        match candidate {
            Value::String(s) => self.validate(s),
            other => {
                debug!("Rejecting non-string path value: {}", other);
                None
            }
        }
    }

    /// Validate a candidate path string
    pub fn validate(&self, candidate: &str) -> Option<ValidatedPath> {
        if candidate.is_empty() {
            return None;
        }

        let normalized = normalize_separators(candidate);

        if normalized.contains("../") {
            return self.validate_resolved(&normalized);
        }

        if !self.roots().iter().any(|root| is_inside(&normalized, root)) {
            debug!("Rejecting path outside log directory: {:?}", candidate);
            return None;
        }

        // Entries that already exist must resolve inside (symlinks, a
        // trailing `..`). Entries that do not exist yet need a parent that
        // resolves to the root or inside it.
        let path = PathBuf::from(&normalized);
        if fs::symlink_metadata(&path).is_ok() {
            return self.validate_resolved(&normalized);
        }
        self.validate_new_entry(&path)
    }

    fn validate_new_entry(&self, path: &Path) -> Option<ValidatedPath> {
        let (parent, file_name) = match (path.parent(), path.file_name()) {
            (Some(parent), Some(name)) => (parent, name),
            _ => return None,
        };

        let parent = match fs::canonicalize(parent) {
            Ok(p) => p,
            Err(e) => {
                debug!("Rejecting {:?}: parent does not resolve: {}", path, e);
                return None;
            }
        };

        let parent_str = normalize_root(&parent.to_string_lossy());
        let contained = self
            .roots()
            .iter()
            .any(|root| parent_str == *root || is_inside(&parent_str, root));
        if !contained {
            debug!("Rejecting {:?}: parent resolves to {:?}", path, parent);
            return None;
        }
        Some(ValidatedPath(parent.join(file_name)))
    }

    fn validate_resolved(&self, normalized: &str) -> Option<ValidatedPath> {
        let resolved = match fs::canonicalize(normalized) {
            Ok(p) => p,
            Err(e) => {
                debug!("Rejecting unresolvable path {:?}: {}", normalized, e);
                return None;
            }
        };

        let resolved_str = normalize_separators(&resolved.to_string_lossy());
        if self.roots().iter().any(|root| is_inside(&resolved_str, root)) {
            Some(ValidatedPath(resolved))
        } else {
            debug!("Rejecting path resolving outside log directory: {:?}", resolved);
            None
        }
    }

    /// Literal root plus its canonical form when the directory exists
    fn roots(&self) -> Vec<String> {
        let literal = normalize_root(&self.allowed_root.to_string_lossy());
        let mut roots = vec![literal];

        if let Ok(canonical) = fs::canonicalize(&self.allowed_root) {
            let canonical = normalize_root(&canonical.to_string_lossy());
            if !roots.contains(&canonical) {
                roots.push(canonical);
            }
        }
        roots
    }
}

fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

fn normalize_root(root: &str) -> String {
    normalize_separators(root).trim_end_matches('/').to_string()
}

fn is_inside(path: &str, root: &str) -> bool {
    path.strip_prefix(root)
        .and_then(|rest| rest.strip_prefix('/'))
        .is_some_and(|rest| !rest.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathValidator) {
        let dir = TempDir::new().unwrap();
        let logs = dir.path().join("logs");
        fs::create_dir_all(&logs).unwrap();
        let validator = PathValidator::new(logs);
        (dir, validator)
    }

    fn logs_str(validator: &PathValidator) -> String {
        validator.allowed_root().to_string_lossy().into_owned()
    }

    #[test]
    fn test_rejects_empty() {
        let (_dir, validator) = setup();
        assert!(validator.validate("").is_none());
    }

    #[test]
    fn test_rejects_non_string_values() {
        let (_dir, validator) = setup();
        assert!(validator.validate_value(&Value::Null).is_none());
        assert!(validator.validate_value(&json!(123)).is_none());
        assert!(validator.validate_value(&json!(123.45)).is_none());
        assert!(validator.validate_value(&json!([])).is_none());
        assert!(validator.validate_value(&json!(["path"])).is_none());
        assert!(validator.validate_value(&json!(true)).is_none());
        assert!(validator.validate_value(&json!(false)).is_none());
        assert!(validator.validate_value(&json!({})).is_none());
    }

    #[test]
    fn test_accepts_string_value() {
        let (_dir, validator) = setup();
        let candidate = format!("{}/debug.log", logs_str(&validator));
        assert!(validator.validate_value(&json!(candidate)).is_some());
    }

    #[test]
    fn test_rejects_traversal() {
        let (_dir, validator) = setup();
        assert!(validator.validate("../../../etc/passwd").is_none());
        assert!(validator.validate("../debug.log").is_none());
        assert!(validator.validate("..\\..\\.\\debug.log").is_none());
        assert!(validator.validate("/logs/../etc/passwd").is_none());
        assert!(validator.validate("logs/../logs/../logs/../etc/passwd").is_none());
    }

    #[test]
    fn test_rejects_deep_traversal_quickly() {
        let (_dir, validator) = setup();
        let deep = format!("{}test.log", "../".repeat(1000));
        assert!(validator.validate(&deep).is_none());
    }

    #[test]
    fn test_rejects_absolute_outside() {
        let (_dir, validator) = setup();
        assert!(validator.validate("/etc/passwd").is_none());
        assert!(validator.validate("/dev/null").is_none());
        assert!(validator.validate("C:\\Windows\\System32\\hosts").is_none());
    }

    #[test]
    fn test_rejects_relative_and_whitespace() {
        let (_dir, validator) = setup();
        for candidate in ["debug.log", " ", "\n", "\t", "CON.log", "subdirectory/debug.log"] {
            assert!(validator.validate(candidate).is_none(), "accepted {:?}", candidate);
        }
    }

    #[test]
    fn test_rejects_root_itself() {
        let (_dir, validator) = setup();
        let root = logs_str(&validator);
        assert!(validator.validate(&root).is_none());
        assert!(validator.validate(&format!("{}/", root)).is_none());
    }

    #[test]
    fn test_rejects_sibling_with_shared_prefix() {
        let (dir, validator) = setup();
        let sibling = dir.path().join("logs-archive").join("debug.log");
        assert!(validator.validate(&sibling.to_string_lossy()).is_none());
    }

    #[test]
    fn test_accepts_new_file_inside() {
        let (_dir, validator) = setup();
        let candidate = format!("{}/debug.log", logs_str(&validator));
        let validated = validator.validate(&candidate).unwrap();
        let expected = fs::canonicalize(validator.allowed_root()).unwrap().join("debug.log");
        assert_eq!(validated.as_path(), expected);
    }

    #[test]
    fn test_rejects_new_file_in_missing_directory() {
        let (_dir, validator) = setup();
        let candidate = format!("{}/missing/debug.log", logs_str(&validator));
        assert!(validator.validate(&candidate).is_none());
    }

    #[test]
    fn test_accepts_existing_file_inside() {
        let (_dir, validator) = setup();
        let file = validator.allowed_root().join("debug.log");
        fs::write(&file, "line\n").unwrap();

        let validated = validator.validate(&file.to_string_lossy()).unwrap();
        assert_eq!(validated.as_path(), fs::canonicalize(&file).unwrap());
    }

    #[test]
    fn test_accepts_backslash_separators() {
        let (_dir, validator) = setup();
        let candidate = format!("{}\\debug.log", logs_str(&validator));
        let validated = validator.validate(&candidate).unwrap();
        assert!(validated.to_string().ends_with("/debug.log"));
    }

    #[test]
    fn test_traversal_resolving_inside() {
        let (_dir, validator) = setup();
        let root = validator.allowed_root().to_path_buf();
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("debug.log"), "").unwrap();

        let candidate = format!("{}/sub/../debug.log", logs_str(&validator));
        let validated = validator.validate(&candidate).unwrap();
        assert_eq!(validated.as_path(), fs::canonicalize(root.join("debug.log")).unwrap());
    }

    #[test]
    fn test_traversal_escaping_root() {
        let (dir, validator) = setup();
        fs::write(dir.path().join("secret.txt"), "secret").unwrap();

        let candidate = format!("{}/../secret.txt", logs_str(&validator));
        assert!(validator.validate(&candidate).is_none());
    }

    #[test]
    fn test_traversal_through_missing_directory() {
        let (_dir, validator) = setup();
        let candidate = format!("{}/missing/../debug.log", logs_str(&validator));
        assert!(validator.validate(&candidate).is_none());
    }

    #[test]
    fn test_trailing_dotdot_without_slash() {
        let (_dir, validator) = setup();
        let candidate = format!("{}/..", logs_str(&validator));
        assert!(validator.validate(&candidate).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_rejects_symlink_escaping_root() {
        let (dir, validator) = setup();
        let outside = dir.path().join("outside.log");
        fs::write(&outside, "outside").unwrap();
        let link = validator.allowed_root().join("link.log");
        std::os::unix::fs::symlink(&outside, &link).unwrap();

        assert!(validator.validate(&link.to_string_lossy()).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_rejects_new_file_under_symlinked_directory() {
        let (dir, validator) = setup();
        let outside = dir.path().join("outside");
        fs::create_dir_all(&outside).unwrap();
        let link = validator.allowed_root().join("link");
        std::os::unix::fs::symlink(&outside, &link).unwrap();

        let candidate = link.join("new.log");
        assert!(validator.validate(&candidate.to_string_lossy()).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_accepts_new_file_in_real_subdirectory() {
        let (_dir, validator) = setup();
        let sub = validator.allowed_root().join("archive");
        fs::create_dir_all(&sub).unwrap();

        let validated = validator.validate(&sub.join("new.log").to_string_lossy()).unwrap();
        assert_eq!(validated.as_path(), fs::canonicalize(&sub).unwrap().join("new.log"));
    }

    #[cfg(unix)]
    #[test]
    fn test_rejects_dangling_symlink() {
        let (dir, validator) = setup();
        let link = validator.allowed_root().join("dangling.log");
        std::os::unix::fs::symlink(dir.path().join("nowhere.log"), &link).unwrap();

        assert!(validator.validate(&link.to_string_lossy()).is_none());
    }

    #[test]
    fn test_control_characters_fall_through_to_prefix_check() {
        let (_dir, validator) = setup();
        assert!(validator.validate("debug\0.log").is_none());
        assert!(validator.validate("debug\r\n.log").is_none());

        let inside = format!("{}/デバッグ.log", logs_str(&validator));
        assert!(validator.validate(&inside).is_some());
    }
}
