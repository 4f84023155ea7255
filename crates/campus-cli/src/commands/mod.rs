//! Command handlers and the shared command context.

pub mod auth;
pub mod course;
pub mod dict;
pub mod enroll;
pub mod message;
pub mod open;
pub mod search;
pub mod student;
pub mod upload;
pub mod ws_test;

use std::sync::Arc;

use owo_colors::OwoColorize;

use campus_api::ApiClient;
use campus_core::{Navigator, Notifier, ResponseInterceptor, Session};

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Everything a command handler needs: the session, the shared failure
/// policy, and the relevant global flags.
pub struct Ctx {
    pub session: Session,
    pub interceptor: ResponseInterceptor,
    pub format: OutputFormat,
    pub quiet: bool,
    pub yes: bool,
}

impl Ctx {
    pub fn new(session: Session, global: &GlobalOpts) -> Self {
        let interceptor = ResponseInterceptor::new(
            session.clone(),
            Arc::new(TermNotifier),
            Arc::new(TermNavigator { quiet: global.quiet }),
        );
        Self {
            session,
            interceptor,
            format: global.output,
            quiet: global.quiet,
            yes: global.yes,
        }
    }

    pub fn client(&self) -> Arc<ApiClient> {
        self.session.client()
    }

    /// Route a raw API result through the interceptor, then into CLI
    /// error space.
    pub fn resolve<T>(&self, result: Result<T, campus_api::Error>) -> Result<T, CliError> {
        self.interceptor.resolve(result).map_err(CliError::from)
    }

    pub fn require_login(&self) -> Result<(), CliError> {
        if self.session.is_logged_in() {
            Ok(())
        } else {
            Err(CliError::NotLoggedIn)
        }
    }

    /// Ask before a destructive operation; `--yes` skips the prompt.
    pub fn confirm(&self, prompt: &str) -> Result<bool, CliError> {
        if self.yes {
            return Ok(true);
        }
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|_| CliError::Validation {
                field: "confirmation".into(),
                reason: "not an interactive terminal; pass --yes to proceed".into(),
            })
    }
}

/// Transient user-facing messages, as the interceptor contract requires:
/// exactly one line per failure.
struct TermNotifier;

impl Notifier for TermNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{} {message}", "!".yellow().bold());
    }
}

/// Forced navigations (only `/login` today) become a hint line.
struct TermNavigator {
    quiet: bool,
}

impl Navigator for TermNavigator {
    fn navigate(&self, path: &str) {
        if !self.quiet {
            eprintln!("{}", format!("→ session cleared, sign in again ({path})").dimmed());
        }
    }
}

/// Route a parsed command to its handler.
pub async fn dispatch(cmd: Command, ctx: &Ctx) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => auth::login(ctx, args).await,
        Command::Logout => auth::logout(ctx).await,
        Command::Register(args) => auth::register(ctx, args).await,
        Command::Whoami => auth::whoami(ctx).await,
        Command::Roles(args) => auth::roles(ctx, args).await,
        Command::Open(args) => open::handle(ctx, args).await,
        Command::Student(args) => student::handle(ctx, args).await,
        Command::Course(args) => course::handle(ctx, args).await,
        Command::Enroll(args) => enroll::handle(ctx, args).await,
        Command::Message(args) => message::handle(ctx, args).await,
        Command::Dict(args) => dict::handle(ctx, args).await,
        Command::Search(args) => search::handle(ctx, args).await,
        Command::Upload(args) => upload::handle(ctx, args).await,
        Command::WsTest(args) => ws_test::handle(ctx, args).await,
        // handled before a context exists
        Command::Completions(_) => Ok(()),
    }
}
