// ── Response interceptor ──
//
// Central failure policy for API calls: every failure produces exactly
// one user-facing notification, and authentication failures additionally
// tear the session down and issue exactly one navigation to the login
// view. Success passes the payload through untouched.

use std::sync::Arc;

use tracing::warn;

use crate::error::CoreError;
use crate::session::Session;

/// Sink for transient user-facing messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Sink for client-side navigation requests.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Applies the shared failure policy to raw API results.
#[derive(Clone)]
pub struct ResponseInterceptor {
    session: Session,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl ResponseInterceptor {
    pub fn new(
        session: Session,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            session,
            notifier,
            navigator,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Resolve an API result: success passes `data` through unmodified;
    /// any failure notifies once with its user-facing message, and an
    /// authentication failure also clears the session and navigates to
    /// `/login` once.
    pub fn resolve<T>(&self, result: Result<T, campus_api::Error>) -> Result<T, CoreError> {
        match result {
            Ok(data) => Ok(data),
            Err(err) => {
                self.notifier.notify(&err.user_message());
                if err.is_unauthenticated() {
                    if let Err(e) = self.session.force_clear() {
                        warn!("failed to clear session storage after auth failure: {e}");
                    }
                    self.navigator.navigate("/login");
                }
                Err(CoreError::from(err))
            }
        }
    }
}
