//! Show command implementation

use anyhow::{bail, Result};
use ldlog_admin::LogPage;
use ldlog_core::LogOrder;
use regex::Regex;

use crate::cli::ShowArgs;
use crate::output::{format_bytes, is_json_mode, print_info, print_logs, print_notice};

use super::Context;

pub fn execute(ctx: &Context, args: ShowArgs) -> Result<()> {
    let grep_regex = match &args.grep {
        Some(pattern) => {
            Some(Regex::new(pattern).map_err(|e| anyhow::anyhow!("Invalid regex pattern: {}", e))?)
        }
        None => None,
    };

    let mut settings = ctx.settings();
    if args.newest {
        settings.log_order = LogOrder::Newest;
    } else if args.oldest {
        settings.log_order = LogOrder::Oldest;
    }

    let page = LogPage::build(&ctx.location, &settings, None, &ctx.authorizer());
    for notice in &page.notices {
        print_notice(notice);
    }
    if !page.authorized {
        bail!("Not allowed to read {}", ctx.location.log_path().display());
    }

    if page.file_exists && !is_json_mode() {
        print_info(&format!(
            "{} ({})",
            ctx.location.log_path().display(),
            format_bytes(page.size_bytes)
        ));
    }

    let lines: Vec<String> = match grep_regex {
        Some(regex) => page.lines.into_iter().filter(|l| regex.is_match(l)).collect(),
        None => page.lines,
    };

    print_logs(&lines);
    Ok(())
}
