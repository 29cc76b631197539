//! Resolution types

use crate::error::{Error, Result};

/// Entities a resolver can match on
pub trait Identified {
    /// Server-assigned identifier
    fn id(&self) -> &str;

    /// Human-readable identifying field
    fn name(&self) -> &str;
}

/// Outcome of reducing a listing to at most one entity
///
/// Transport failures are not a variant: they travel in the `Err` arm of
/// the surrounding `Result`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    /// Exactly one entity matched
    Found(T),
    /// No entity matched after the whole listing was searched
    NotFound,
    /// More than one entity matched; the count may be a lower bound
    Ambiguous(usize),
}

impl<T> Resolution<T> {
    /// Check if exactly one entity matched
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Check if nothing matched
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Check if several entities matched
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous(_))
    }

    /// The matched entity, if any
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(entity) => Some(entity),
            _ => None,
        }
    }

    /// Transform the matched entity
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Resolution<U> {
        match self {
            Self::Found(entity) => Resolution::Found(f(entity)),
            Self::NotFound => Resolution::NotFound,
            Self::Ambiguous(count) => Resolution::Ambiguous(count),
        }
    }

    /// Require a single match, naming what was looked for otherwise
    ///
    /// `kind` and `name` only feed the error message, e.g.
    /// `Quota test-quota does not exist`.
    pub fn into_result(self, kind: &str, name: &str) -> Result<T> {
        match self {
            Self::Found(entity) => Ok(entity),
            Self::NotFound => Err(Error::not_found(kind, name)),
            Self::Ambiguous(count) => Err(Error::ambiguous(kind, name, count)),
        }
    }
}

/// How the resolver looks for matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Push a name filter into the list request when the endpoint has one,
    /// then still check every returned item client-side
    #[default]
    ServerFilter,
    /// Scan every page client-side
    ClientScan,
}

/// When the resolver may stop after finding several matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmbiguityPolicy {
    /// Stop pulling at the second match; reports `Ambiguous(2)` as a lower bound
    #[default]
    StopAtSecond,
    /// Drain the listing and report the exact number of matches
    Exhaust,
}
