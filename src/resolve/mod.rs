//! Resolution module
//!
//! Reduces a paginated listing to exactly one entity, or to a
//! distinguished not-found / ambiguous outcome.
//!
//! # Overview
//!
//! - [`resolve_one`] works on any stream of `Result<T>` and a predicate.
//! - [`Resolver`] drives [`crate::pagination::paginate`] for a list request,
//!   pushing a name filter to the server when the endpoint supports one.
//!
//! Ambiguity: by default the resolver stops pulling at the second match and
//! reports `Ambiguous(2)`. Zero or one match always requires the whole
//! listing. [`AmbiguityPolicy::Exhaust`] drains the listing for an exact count.

mod resolver;
mod types;

pub use resolver::{name_equals, resolve_one, Resolver};
pub use types::{AmbiguityPolicy, Identified, Resolution, Strategy};
