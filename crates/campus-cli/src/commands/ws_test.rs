//! `campus ws-test` -- WebSocket notification smoke test.
//!
//! Standalone diagnostic: connect to the notification endpoint with the
//! stored (or supplied) token as a URL query parameter, send a probe
//! frame, print whatever arrives within the listen window, and report
//! how the connection ended.

use std::time::Duration;

use owo_colors::OwoColorize;

use campus_api::websocket;

use crate::cli::WsTestArgs;
use crate::error::CliError;
use crate::output;

use super::Ctx;

pub async fn handle(ctx: &Ctx, args: WsTestArgs) -> Result<(), CliError> {
    let token = args
        .token
        .or_else(|| ctx.session.token())
        .ok_or(CliError::NotLoggedIn)?;

    let ws_url = websocket::notification_url(ctx.client().base_url(), &token)?;
    if !ctx.quiet {
        eprintln!("connecting to {}", ws_url.as_str().dimmed());
    }

    let window = Duration::from_secs(args.duration);
    let report = websocket::smoke_test(&ws_url, window).await?;

    if report.frames.is_empty() {
        if !ctx.quiet {
            eprintln!("no frames received in {}s", args.duration);
        }
    } else {
        for frame in &report.frames {
            println!("{frame}");
        }
    }

    if report.server_closed {
        output::success(ctx.quiet, "server closed the connection");
    } else {
        output::success(
            ctx.quiet,
            &format!(
                "connection healthy, {} frame(s) in {}s",
                report.frames.len(),
                args.duration
            ),
        );
    }
    Ok(())
}
