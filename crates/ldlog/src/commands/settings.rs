//! Settings command implementation

use anyhow::{bail, Result};
use ldlog_admin::{handle_settings_save, AdminRequest, NonceRegistry};
use ldlog_core::constants::*;
use ldlog_core::{Error, LogOrder};
use ldlog_logs::timestamp::is_known_timezone;

use crate::cli::{SettingsAction, SettingsSetArgs};
use crate::output::{is_json_mode, print_json, print_settings_table, print_success};

use super::Context;

pub fn execute(ctx: Context, action: SettingsAction) -> Result<()> {
    match action {
        SettingsAction::Show => show(&ctx),
        SettingsAction::Set(args) => set(ctx, args),
    }
}

fn show(ctx: &Context) -> Result<()> {
    let settings = ctx.settings();
    if is_json_mode() {
        print_json(&serde_json::json!({
            OPT_TIMEZONE_STRING: settings.timezone_string,
            OPT_GMT_OFFSET: settings.gmt_offset,
            OPT_FORCE_CAPTURE: settings.force_capture,
            OPT_LOG_ORDER: settings.log_order,
            OPT_DEBUG: settings.debug,
        }));
    } else {
        print_settings_table(&settings);
    }
    Ok(())
}

fn set(mut ctx: Context, args: SettingsSetArgs) -> Result<()> {
    let current = ctx.settings();
    let nonces = NonceRegistry::new();
    let token = nonces.issue(SETTINGS_ACTION);

    // The form always posts the capture checkbox, so carry the current value
    let force_capture = args.force_capture.unwrap_or(current.force_capture);
    let mut request = AdminRequest::post()
        .with_field(SAVE_SETTINGS_FIELD, "1")
        .with_field(SETTINGS_NONCE_FIELD, token)
        .with_field(OPT_FORCE_CAPTURE, force_capture);

    if let Some(timezone) = args.timezone {
        if !timezone.is_empty() && !is_known_timezone(&timezone) {
            return Err(Error::InvalidTimezone(timezone).into());
        }
        request = request.with_field(OPT_TIMEZONE_STRING, timezone);
    }
    if let Some(offset) = args.gmt_offset {
        if !offset.is_finite() {
            bail!("Invalid UTC offset: {}", offset);
        }
        request = request.with_field(OPT_GMT_OFFSET, offset.to_string());
    }
    if let Some(order) = args.order {
        let order: LogOrder = order.parse()?;
        request = request.with_field(OPT_LOG_ORDER, order.as_str());
    }
    if let Some(debug) = args.debug {
        request = request.with_field(OPT_DEBUG, debug);
    }

    let authorizer = ctx.authorizer();
    if !handle_settings_save(&request, &authorizer, &nonces, &mut ctx.store)? {
        bail!("Settings were not saved");
    }

    if is_json_mode() {
        print_json(&serde_json::json!({ "saved": true }));
    } else {
        print_success(&format!("Settings saved to {}", ctx.store.path().display()));
        print_settings_table(&ctx.settings());
    }
    Ok(())
}
