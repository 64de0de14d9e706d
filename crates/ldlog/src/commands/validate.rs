//! Validate command implementation

use anyhow::Result;
use ldlog_core::Error;
use serde_json::json;

use crate::output::{is_json_mode, print_json, print_success};

use super::Context;

pub fn execute(ctx: &Context, path: &str) -> Result<()> {
    let validator = ctx.location.validator();

    match validator.validate(path) {
        Some(validated) => {
            if is_json_mode() {
                print_json(&json!({ "valid": true, "path": validated.to_string() }));
            } else {
                print_success(&validated.to_string());
            }
            Ok(())
        }
        None => {
            if is_json_mode() {
                print_json(&json!({ "valid": false, "path": path }));
            }
            Err(Error::path_rejected(format!(
                "{} is outside {}",
                path,
                validator.allowed_root().display()
            ))
            .into())
        }
    }
}
