//! Pagination module
//!
//! # Overview
//!
//! - [`fetch_page`] issues one page request through an executor.
//! - [`PageStream`] / [`paginate`] concatenate consecutive pages into one
//!   lazy stream of items, fetching the next page only when the consumer
//!   asks for an item past the buffered ones.

mod fetcher;
mod stream;
mod types;

pub use fetcher::fetch_page;
pub use stream::{paginate, paginate_owned, PageFuture, PageStream};
pub use types::Page;
