//! Session and navigation layer between `campus-api` and its consumers.
//!
//! This crate owns the client-side auth state and the policy around it:
//!
//! - **[`Session`]** — Process-wide auth state (token, refresh token,
//!   user, roles, permissions) kept in sync with a [`SessionStorage`]
//!   and the API client's token slot through every login, logout, and
//!   refresh.
//! - **[`ResponseInterceptor`]** — Shared failure policy: one
//!   notification per failure, forced logout plus a `/login` navigation
//!   on authentication failures.
//! - **[`routes`]** — Static role-annotated route table.
//! - **[`NavigationGuard`]** — The allow / redirect decision machine run
//!   before every route transition.

pub mod error;
pub mod guard;
pub mod interceptor;
pub mod routes;
pub mod session;
pub mod storage;

pub use error::CoreError;
pub use guard::{GuardDecision, NavigationGuard, NoChrome, PageChrome};
pub use interceptor::{Navigator, Notifier, ResponseInterceptor};
pub use routes::{RouteDescriptor, find_route, is_public_path, route_table};
pub use session::Session;
pub use storage::SessionStorage;
