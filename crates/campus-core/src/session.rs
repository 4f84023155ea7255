// ── Session state container ──
//
// One `Session` exists per process. It owns the in-memory auth state
// (token, refresh token, user, roles, permissions), keeps the persistent
// store and the API client's token slot in sync with every mutation, and
// orchestrates the login / register / logout / refresh flows.
//
// Mutations take the state lock synchronously between await points, so
// concurrent operations interleave only at network boundaries and never
// observe a half-applied update.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use campus_api::ApiClient;
use campus_api::models::{LoginRequest, LoginResponse, RegisterRequest, User};

use crate::error::CoreError;
use crate::storage::SessionStorage;

#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    refresh_token: Option<String>,
    user: Option<User>,
    roles: Vec<String>,
    permissions: Vec<String>,
    /// Distinguishes "never fetched" from "fetched and empty", so a user
    /// who genuinely holds zero roles does not trigger a refetch on every
    /// navigation.
    roles_fetched: bool,
}

struct SessionInner {
    client: Arc<ApiClient>,
    storage: SessionStorage,
    state: RwLock<SessionState>,
}

/// The client-held authentication state for the current user.
///
/// Cheaply cloneable handle over shared inner state. Invariants:
/// the token is present iff the user is considered logged in, and
/// roles/permissions are empty whenever the token is absent.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    pub fn new(client: Arc<ApiClient>, storage: SessionStorage) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                client,
                storage,
                state: RwLock::new(SessionState::default()),
            }),
        }
    }

    /// The API client this session installs its token into.
    pub fn client(&self) -> Arc<ApiClient> {
        Arc::clone(&self.inner.client)
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Hydrate from persistent storage. Returns whether a token was
    /// restored; when one was, a role/permission refresh is kicked off in
    /// the background (must be called within a tokio runtime).
    pub fn restore(&self) -> Result<bool, CoreError> {
        let token = self.inner.storage.token()?;
        let refresh_token = self.inner.storage.refresh_token()?;
        let user = self.inner.storage.user()?;

        let Some(token) = token else {
            return Ok(false);
        };

        debug!("restoring session from storage");
        self.inner.client.set_token(&token);
        {
            let mut state = self.write_state();
            state.token = Some(token);
            state.refresh_token = refresh_token;
            state.user = user;
        }

        let session = self.clone();
        tokio::spawn(async move {
            session.fetch_roles_and_permissions().await;
        });
        Ok(true)
    }

    /// Authenticate and install the resulting token pair and user record,
    /// then fetch roles and permissions before returning.
    pub async fn login(&self, req: &LoginRequest) -> Result<User, CoreError> {
        let resp = self.inner.client.login(req).await?;
        let user = self.install(resp)?;
        self.fetch_roles_and_permissions().await;
        Ok(user)
    }

    /// Register a new account; on success the session is installed exactly
    /// as for [`Session::login`].
    pub async fn register(&self, req: &RegisterRequest) -> Result<User, CoreError> {
        let resp = self.inner.client.register(req).await?;
        let user = self.install(resp)?;
        self.fetch_roles_and_permissions().await;
        Ok(user)
    }

    /// End the session. The server-side logout call is best-effort --
    /// a network failure must never block local teardown -- after which
    /// memory, storage, and the client token slot are cleared
    /// unconditionally.
    pub async fn logout(&self) -> Result<(), CoreError> {
        if self.is_logged_in() {
            if let Err(e) = self.inner.client.logout().await {
                warn!("server-side logout failed, clearing local session anyway: {e}");
            }
        }
        self.force_clear()
    }

    /// Clear memory, storage, and the client token slot without the
    /// network call. Used on authentication failure.
    pub fn force_clear(&self) -> Result<(), CoreError> {
        {
            let mut state = self.write_state();
            *state = SessionState::default();
        }
        self.inner.client.clear_token();
        self.inner.storage.clear()
    }

    // ── Refresh operations ───────────────────────────────────────────

    /// Re-fetch the current user record, overwriting memory and storage.
    /// No-op when not logged in.
    pub async fn fetch_current_user(&self) -> Result<Option<User>, CoreError> {
        if !self.is_logged_in() {
            return Ok(None);
        }
        let user = self.inner.client.current_user().await?;
        self.inner.storage.set_user(&user)?;
        self.write_state().user = Some(user.clone());
        Ok(Some(user))
    }

    /// Fetch roles and permissions concurrently. Both lookups must
    /// succeed for the result to apply; on any failure the previous
    /// roles/permissions stay in place and the error is only logged.
    /// No-op when not logged in.
    pub async fn fetch_roles_and_permissions(&self) {
        if !self.is_logged_in() {
            return;
        }
        let client = &self.inner.client;
        match tokio::join!(client.my_roles(), client.my_permissions()) {
            (Ok(roles), Ok(permissions)) => {
                debug!(
                    roles = roles.len(),
                    permissions = permissions.len(),
                    "refreshed roles and permissions"
                );
                let mut state = self.write_state();
                state.roles = roles;
                state.permissions = permissions;
                state.roles_fetched = true;
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("role/permission refresh failed, keeping previous values: {e}");
            }
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_logged_in(&self) -> bool {
        self.read_state().token.is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.read_state().token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read_state().refresh_token.clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.read_state().user.clone()
    }

    pub fn roles(&self) -> Vec<String> {
        self.read_state().roles.clone()
    }

    pub fn permissions(&self) -> Vec<String> {
        self.read_state().permissions.clone()
    }

    /// Whether a role/permission fetch has completed for this token.
    pub fn roles_fetched(&self) -> bool {
        self.read_state().roles_fetched
    }

    pub fn has_role(&self, code: &str) -> bool {
        self.read_state().roles.iter().any(|r| r == code)
    }

    pub fn has_any_role<I, S>(&self, codes: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let state = self.read_state();
        codes
            .into_iter()
            .any(|code| state.roles.iter().any(|r| r == code.as_ref()))
    }

    pub fn has_permission(&self, code: &str) -> bool {
        self.read_state().permissions.iter().any(|p| p == code)
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Persist and install a freshly issued token pair and user record.
    /// Roles are reset to unfetched; callers follow up with
    /// [`Session::fetch_roles_and_permissions`].
    fn install(&self, resp: LoginResponse) -> Result<User, CoreError> {
        self.inner.storage.set_token(&resp.token)?;
        if let Some(refresh) = &resp.refresh_token {
            self.inner.storage.set_refresh_token(refresh)?;
        }
        self.inner.storage.set_user(&resp.user)?;
        self.inner.client.set_token(&resp.token);

        let mut state = self.write_state();
        state.token = Some(resp.token);
        state.refresh_token = resp.refresh_token;
        state.user = Some(resp.user.clone());
        state.roles.clear();
        state.permissions.clear();
        state.roles_fetched = false;
        Ok(resp.user)
    }

    // A poisoned lock only means another thread panicked mid-read; the
    // state itself is always consistent between awaits, so recover it.
    fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
