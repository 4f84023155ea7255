// ── Navigation guard ──
//
// Evaluated before every route transition. Decision order with a token:
// the login page bounces home, roles are fetched once if needed, then
// role requirements are checked. Without a token only the public
// allow-list passes; everything else bounces to the login page with the
// intended path preserved for post-login redirect.

use std::sync::Arc;

use tracing::debug;

use crate::error::CoreError;
use crate::routes::{self, RouteDescriptor};
use crate::session::Session;

// Redirect targets in the table are terminal, so any legitimate chain
// resolves well before this.
const MAX_REDIRECTS: usize = 8;

/// Outcome of a single guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect { to: String },
}

/// Page-level side channels the guard drives on every transition:
/// a load progress indicator and the page title.
pub trait PageChrome: Send + Sync {
    fn progress_start(&self);
    fn progress_done(&self);
    fn set_title(&self, title: &str);
}

/// Chrome that does nothing; for headless use and tests.
pub struct NoChrome;

impl PageChrome for NoChrome {
    fn progress_start(&self) {}
    fn progress_done(&self) {}
    fn set_title(&self, _title: &str) {}
}

/// Gatekeeper for route transitions.
pub struct NavigationGuard {
    session: Session,
    chrome: Arc<dyn PageChrome>,
}

impl NavigationGuard {
    pub fn new(session: Session, chrome: Arc<dyn PageChrome>) -> Self {
        Self { session, chrome }
    }

    /// Evaluate one transition attempt. Drives the progress indicator
    /// for the duration and sets the page title when the transition is
    /// allowed.
    pub async fn check(&self, path: &str) -> GuardDecision {
        self.chrome.progress_start();
        let decision = self.decide(path).await;
        self.chrome.progress_done();

        match &decision {
            GuardDecision::Allow => {
                self.chrome.set_title(routes::find_route(path).title);
                debug!(path, "navigation allowed");
            }
            GuardDecision::Redirect { to } => {
                debug!(path, to, "navigation redirected");
            }
        }
        decision
    }

    /// Follow redirects until a transition is allowed; returns the final
    /// path. Each hop re-enters [`NavigationGuard::check`].
    pub async fn navigate(&self, path: &str) -> Result<String, CoreError> {
        let mut current = path.to_owned();
        for _ in 0..MAX_REDIRECTS {
            match self.check(&current).await {
                GuardDecision::Allow => return Ok(current),
                GuardDecision::Redirect { to } => current = to,
            }
        }
        Err(CoreError::Internal(format!(
            "navigation to {path} did not settle after {MAX_REDIRECTS} redirects"
        )))
    }

    async fn decide(&self, path: &str) -> GuardDecision {
        if self.session.is_logged_in() {
            return self.decide_authenticated(path).await;
        }

        if routes::is_public_path(path) {
            GuardDecision::Allow
        } else {
            GuardDecision::Redirect {
                to: format!("/login?redirect={path}"),
            }
        }
    }

    async fn decide_authenticated(&self, path: &str) -> GuardDecision {
        let route = routes::find_route(path);

        // An authenticated user never sees the login page.
        if route.name == "login" {
            return GuardDecision::Redirect { to: "/".to_owned() };
        }

        if let Some(target) = route.redirect {
            return GuardDecision::Redirect {
                to: target.to_owned(),
            };
        }

        // Roles may not be loaded yet right after a restore; resolve
        // them before enforcing requirements. Fail-soft: a failed fetch
        // leaves previous (possibly empty) roles in place.
        if !self.session.roles_fetched() {
            self.session.fetch_roles_and_permissions().await;
        }

        if self.requires_missing_role(route) {
            return GuardDecision::Redirect {
                to: "/403".to_owned(),
            };
        }
        GuardDecision::Allow
    }

    fn requires_missing_role(&self, route: &RouteDescriptor) -> bool {
        !route.required_roles.is_empty()
            && !self.session.has_any_role(route.required_roles.iter().copied())
    }
}
