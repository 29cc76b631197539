// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # cf-ops
//!
//! Pagination, resolution and composition for the Cloud Foundry v2 API.
//!
//! ## Features
//!
//! - **Lazy Pagination**: Pages are fetched only as items are consumed
//! - **Strict Resolution**: Exactly one match, or a typed not-found / ambiguous outcome
//! - **Pipelines**: Resolve, derive, mutate, with short-circuit and cancellation
//! - **HTTP Executor**: Retries, backoff and rate limiting on top of reqwest
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cf_ops::config::Config;
//! use cf_ops::http::HttpClient;
//! use cf_ops::operations::{OrganizationAdmin, SetQuotaRequest};
//!
//! #[tokio::main]
//! async fn main() -> cf_ops::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = HttpClient::with_config(config.to_http_config())?;
//!
//!     let admin = OrganizationAdmin::new(client);
//!     admin
//!         .set_quota(&SetQuotaRequest::new("test-organization", "test-quota"))
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │   operations: OrganizationAdmin, ServiceInstances            │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────────┬──────────────┴──┬──────────────┬──────────────┐
//! │  Pipeline    │    Resolver     │  Pagination  │   Executor   │
//! ├──────────────┼─────────────────┼──────────────┼──────────────┤
//! │ Named steps  │ Server filter   │ fetch_page   │ HttpClient   │
//! │ Outputs      │ Client scan     │ PageStream   │ Retry        │
//! │ Cancellation │ Found/NotFound/ │ Cancellation │ Rate Limit   │
//! │              │ Ambiguous       │              │ Backoff      │
//! └──────────────┴─────────────────┴──────────────┴──────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Request executor contract
pub mod executor;

/// HTTP client with retry and rate limiting
pub mod http;

/// Typed Cloud Foundry v2 resources and requests
pub mod v2;

/// Lazy page aggregation
pub mod pagination;

/// Single-entity resolution
pub mod resolve;

/// Multi-step composition
pub mod pipeline;

/// Organization and service instance operations
pub mod operations;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

#[cfg(test)]
pub(crate) mod test_support;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, PipelineError, Result};
pub use executor::Executor;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
