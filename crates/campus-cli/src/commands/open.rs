//! `campus open <path>` -- run the navigation guard against an app path.
//!
//! Mirrors what the web client does before rendering a view: progress
//! indicator on, guard decision (with role refresh if needed), then
//! either the resolved page or the redirect chain it took to get there.

use std::sync::{Arc, Mutex};

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use campus_core::{NavigationGuard, PageChrome, find_route};

use crate::cli::OpenArgs;
use crate::error::CliError;
use crate::output;

use super::Ctx;

/// Drives an indicatif spinner as the page-load indicator and prints the
/// resolved title the way a browser tab would show it.
struct SpinnerChrome {
    quiet: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl SpinnerChrome {
    fn new(quiet: bool) -> Self {
        Self {
            quiet,
            bar: Mutex::new(None),
        }
    }
}

impl PageChrome for SpinnerChrome {
    fn progress_start(&self) {
        if self.quiet {
            return;
        }
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message("loading");
        bar.enable_steady_tick(std::time::Duration::from_millis(80));
        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(bar);
        }
    }

    fn progress_done(&self) {
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(bar) = slot.take() {
                bar.finish_and_clear();
            }
        }
    }

    fn set_title(&self, title: &str) {
        if !self.quiet {
            eprintln!("{} {title}", "»".bold());
        }
    }
}

pub async fn handle(ctx: &Ctx, args: OpenArgs) -> Result<(), CliError> {
    let chrome = Arc::new(SpinnerChrome::new(ctx.quiet));
    let guard = NavigationGuard::new(ctx.session.clone(), chrome);

    let landed = guard.navigate(&args.path).await?;
    let route = find_route(&landed);

    if landed == args.path {
        output::success(ctx.quiet, &format!("{} -> {}", args.path, route.title));
    } else {
        output::success(
            ctx.quiet,
            &format!("{} -> {landed} ({})", args.path, route.title),
        );
    }
    println!("{landed}");
    Ok(())
}
