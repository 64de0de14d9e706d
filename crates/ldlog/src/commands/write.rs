//! Write command implementation - appends a message to the log

use anyhow::Result;
use ldlog_logs::CaptureOutcome;
use serde_json::json;

use crate::cli::WriteArgs;
use crate::output::{is_json_mode, print_info, print_json, print_success};

use super::Context;

pub fn execute(ctx: &Context, args: WriteArgs) -> Result<()> {
    let message = args.message.join(" ");
    let writer = ctx.location.writer();

    let outcome = if args.force {
        CaptureOutcome::Written {
            entries: writer.append(&message)?,
        }
    } else {
        writer.capture(&ctx.settings(), &message)?
    };

    if is_json_mode() {
        let entries = match outcome {
            CaptureOutcome::Written { entries } => entries,
            CaptureOutcome::Skipped => 0,
        };
        print_json(&json!({ "written": entries }));
        return Ok(());
    }

    match outcome {
        CaptureOutcome::Written { entries } => print_success(&format!(
            "Wrote {} line(s) to {}",
            entries,
            writer.path().display()
        )),
        CaptureOutcome::Skipped => print_info(
            "Capture is disabled. Enable ldl_force_capture or ldl_debug, or pass --force",
        ),
    }
    Ok(())
}
