//! Async client for the campus student-management backend.
//!
//! The backend wraps every payload in a `{ code, message, data }` envelope;
//! [`ApiClient`] strips that envelope and maps failures onto [`Error`], so
//! callers only ever see typed `data` payloads or a classified error.
//!
//! - **[`ApiClient`]** — HTTP facade: URL construction, bearer-token
//!   injection, envelope unwrapping. Endpoint wrappers are inherent methods
//!   grouped into one module per backend area ([`students`], [`courses`],
//!   [`enrollments`], [`permissions`], [`notifications`], [`uploads`],
//!   [`dict`], [`search`], plus auth on the client itself).
//! - **[`models`]** — Wire types: the envelope, paged responses, and the
//!   domain records (`User`, `Student`, `Course`, `Enrollment`, `Message`).
//! - **[`websocket`]** — Notification stream over
//!   `/ws/notification?token=...` with reconnect, plus a standalone
//!   smoke test used by the CLI diagnostic.

pub mod auth;
pub mod client;
pub mod courses;
pub mod dict;
pub mod enrollments;
pub mod error;
pub mod models;
pub mod notifications;
pub mod permissions;
pub mod search;
pub mod students;
pub mod transport;
pub mod uploads;
pub mod websocket;

pub use client::ApiClient;
pub use error::Error;
