//! Clear command implementation - empties the log file

use anyhow::{bail, Result};
use colored::Colorize;
use dialoguer::Confirm;
use ldlog_admin::{handle_delete_request, AdminRequest, NonceRegistry};
use ldlog_core::constants::*;
use ldlog_core::Notice;

use crate::cli::ClearArgs;
use crate::output::{is_json_mode, print_json, print_notice};

use super::Context;

pub fn execute(ctx: &Context, args: ClearArgs) -> Result<()> {
    ctx.location.ensure_log_dir()?;

    let target = args
        .path
        .clone()
        .unwrap_or_else(|| ctx.location.log_path().display().to_string());

    if !args.yes {
        if !atty::is(atty::Stream::Stdin) {
            eprintln!("To clear without a prompt, run:");
            eprintln!("  {}", "ldlog clear --yes".cyan());
            bail!("Refusing to clear {} without confirmation", target);
        }

        let confirmed = Confirm::new()
            .with_prompt(format!("Clear {}?", target))
            .default(false)
            .interact()
            .unwrap_or(false);
        if !confirmed {
            eprintln!("Aborted");
            return Ok(());
        }
    }

    let nonces = NonceRegistry::new();
    let token = nonces.issue(DELETE_ACTION);

    let mut request = AdminRequest::post()
        .with_field(DELETE_FIELD, "1")
        .with_field(DELETE_NONCE_FIELD, token);
    if let Some(path) = args.path {
        request = request.with_field(DELETE_PATH_FIELD, path);
    }

    let Some(result) = handle_delete_request(
        &request,
        &ctx.authorizer(),
        &nonces,
        &ctx.location.eraser(),
    ) else {
        bail!("Delete request was not handled");
    };

    if is_json_mode() {
        print_json(&result);
    } else {
        print_notice(&Notice::for_deletion(&result));
    }

    match result.message() {
        None => Ok(()),
        Some(code) => bail!("Log file was not cleared ({})", code),
    }
}
