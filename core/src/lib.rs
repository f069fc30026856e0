//! Client core for the short-link service.
//!
//! # Overview
//! Wraps the backend's four operations (create, update, delete, analytics)
//! behind `ShortLinkClient`. Every operation makes one HTTP round trip and
//! reports failures through `ApiError`: `Application` for non-2xx answers,
//! `Transport` for exchanges that never completed.
//!
//! # Design
//! - `ClientConfig` is resolved once (`API_BASE_URL`, `DEFAULT_API_KEY`) and
//!   passed in explicitly; the client reads no globals.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response); the executing method glues them with a `Transport`.
//! - The default transport is a blocking `ureq` agent. Closures implement
//!   `Transport`, which is how the unit tests inspect outgoing requests.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod http;
pub mod types;

pub use client::{Operation, ShortLinkClient};
pub use config::ClientConfig;
pub use credential::resolve_credential;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use types::{short_code_from_url, AnalyticsRecord, ErrorPayload, ShortLinkRecord, TargetUrl};
