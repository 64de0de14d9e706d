//! Delete and settings-save request handlers

use ldlog_core::constants::*;
use ldlog_core::{DeleteFailure, DeletionResult, LogOrder, OptionStore, Result};
use ldlog_logs::timestamp::is_known_timezone;
use ldlog_logs::LogFileEraser;
use tracing::{info, warn};

use crate::request::AdminRequest;
use crate::{Authorizer, CsrfVerifier};

/// Handle a log delete submission.
///
/// Returns `None` when the request is not a delete submission (not a POST,
/// or the delete field is missing or falsy). Otherwise returns the outcome,
/// which the caller passes on to the page for display.
pub fn handle_delete_request(
    request: &AdminRequest,
    authorizer: &dyn Authorizer,
    csrf: &dyn CsrfVerifier,
    eraser: &LogFileEraser,
) -> Option<DeletionResult> {
    if !request.is_post() || !request.flag(DELETE_FIELD) {
        return None;
    }

    if !authorizer.can(MANAGE_CAPABILITY) {
        warn!("Delete request denied: missing {}", MANAGE_CAPABILITY);
        return Some(DeletionResult::failed(DeleteFailure::Permission));
    }

    if !csrf.verify(request, DELETE_ACTION, DELETE_NONCE_FIELD) {
        warn!("Delete request denied: token check failed");
        return Some(DeletionResult::failed(DeleteFailure::Nonce));
    }

    let result = eraser.erase_value(request.field(DELETE_PATH_FIELD));
    info!("Delete request handled: success={}", result.is_success());
    Some(result)
}

/// Handle a settings form submission.
///
/// The force-capture flag is always written (an absent field means off).
/// Timezone, offset, order and debug fields are written only when posted
/// and well-formed. Returns `Ok(true)` when the settings were saved.
pub fn handle_settings_save(
    request: &AdminRequest,
    authorizer: &dyn Authorizer,
    csrf: &dyn CsrfVerifier,
    store: &mut OptionStore,
) -> Result<bool> {
    if !request.is_post() || !request.flag(SAVE_SETTINGS_FIELD) {
        return Ok(false);
    }

    if !authorizer.can(MANAGE_CAPABILITY) {
        warn!("Settings save denied: missing {}", MANAGE_CAPABILITY);
        return Ok(false);
    }

    if !csrf.verify(request, SETTINGS_ACTION, SETTINGS_NONCE_FIELD) {
        warn!("Settings save denied: token check failed");
        return Ok(false);
    }

    store.set(OPT_FORCE_CAPTURE, request.flag(OPT_FORCE_CAPTURE));

    if request.field(OPT_DEBUG).is_some() {
        store.set(OPT_DEBUG, request.flag(OPT_DEBUG));
    }

    if let Some(order) = request.field_str(OPT_LOG_ORDER) {
        match order.parse::<LogOrder>() {
            Ok(order) => store.set(OPT_LOG_ORDER, order.as_str()),
            Err(e) => warn!("Ignoring log order: {}", e),
        }
    }

    if let Some(timezone) = request.field_str(OPT_TIMEZONE_STRING) {
        if timezone.is_empty() || is_known_timezone(&timezone) {
            store.set(OPT_TIMEZONE_STRING, timezone);
        } else {
            warn!("Ignoring unknown timezone {:?}", timezone);
        }
    }

    if let Some(offset) = request.field_str(OPT_GMT_OFFSET) {
        match offset.trim().parse::<f64>() {
            Ok(hours) if hours.is_finite() => store.set(OPT_GMT_OFFSET, hours),
            _ => warn!("Ignoring UTC offset {:?}", offset),
        }
    }

    store.save()?;
    Ok(true)
}
