//! HTTP client module
//!
//! The request executor the resolution core calls through
//! [`crate::executor::Executor`].
//!
//! # Features
//!
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Backoff Strategies**: Constant, linear, and exponential backoff
//! - **Typed Calls**: List pages and single requests decoded with serde

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig, PAGE_PARAM};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
