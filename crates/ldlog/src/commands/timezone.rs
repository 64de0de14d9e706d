//! Timezone command implementation

use anyhow::Result;
use colored::Colorize;
use ldlog_logs::{format_local_timestamp, resolve_timezone};
use serde_json::json;

use crate::output::{is_json_mode, print_json, print_warning};

use super::Context;

pub fn execute(ctx: &Context) -> Result<()> {
    let timezone = resolve_timezone(&ctx.settings());
    // An empty timestamp means "now"
    let local_time = format_local_timestamp("", &timezone);

    if is_json_mode() {
        print_json(&json!({ "timezone": timezone, "local_time": local_time }));
        return Ok(());
    }

    println!("  {} │ {}", "Timezone".bold(), timezone);
    match local_time {
        Some(now) => println!("  {} │ {}", "Local time".bold(), now),
        None => print_warning(&format!("Unknown timezone {}, lines will not be tagged", timezone)),
    }
    Ok(())
}
