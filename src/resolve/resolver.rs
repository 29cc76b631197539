//! Reducing a lazy listing to a single entity

use super::types::{AmbiguityPolicy, Identified, Resolution, Strategy};
use crate::error::{ensure_not_blank, Result};
use crate::executor::Executor;
use crate::pagination::paginate;
use crate::v2::ListRequest;
use futures::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Pull items one at a time and reduce them to a [`Resolution`]
///
/// Zero or one match can only be confirmed once the stream is exhausted.
/// With [`AmbiguityPolicy::StopAtSecond`] pulling stops at the second match.
/// The first stream error is returned unchanged.
pub async fn resolve_one<S, T, P>(
    stream: S,
    mut predicate: P,
    policy: AmbiguityPolicy,
) -> Result<Resolution<T>>
where
    S: Stream<Item = Result<T>>,
    P: FnMut(&T) -> bool,
{
    let mut stream = std::pin::pin!(stream);
    let mut found = None;
    let mut matches = 0usize;

    while let Some(item) = stream.next().await {
        let item = item?;
        if !predicate(&item) {
            continue;
        }

        matches += 1;
        if matches == 1 {
            found = Some(item);
        } else if policy == AmbiguityPolicy::StopAtSecond {
            break;
        }
    }

    Ok(match (matches, found) {
        (1, Some(entity)) => Resolution::Found(entity),
        (0, _) => Resolution::NotFound,
        (count, _) => Resolution::Ambiguous(count),
    })
}

/// Predicate matching entities by exact, case-sensitive name
pub fn name_equals<T: Identified>(name: &str) -> impl Fn(&T) -> bool + '_ {
    move |entity| entity.name() == name
}

/// Resolves named entities out of paginated list endpoints
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    strategy: Strategy,
    policy: AmbiguityPolicy,
    cancel: Option<CancellationToken>,
}

impl Resolver {
    /// Server-side filtering where available, stop at the second match
    pub fn new() -> Self {
        Self::default()
    }

    /// Always scan every page client-side
    pub fn client_scan() -> Self {
        Self::new().with_strategy(Strategy::ClientScan)
    }

    /// Set the search strategy
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the ambiguity policy
    #[must_use]
    pub fn with_policy(mut self, policy: AmbiguityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Stop fetching pages once `token` is cancelled
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// The configured strategy
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The configured ambiguity policy
    pub fn policy(&self) -> AmbiguityPolicy {
        self.policy
    }

    /// Resolve the single entity of `request` whose name equals `name`
    ///
    /// An empty name fails with a validation error before any call.
    pub async fn resolve<C, R>(
        &self,
        executor: &C,
        request: &R,
        name: &str,
    ) -> Result<Resolution<R::Entity>>
    where
        C: Executor,
        R: ListRequest,
        R::Entity: Identified,
    {
        ensure_not_blank("name", name)?;

        let filtered = match self.strategy {
            Strategy::ServerFilter => request.name_filter(name),
            Strategy::ClientScan => None,
        };
        if self.strategy == Strategy::ServerFilter && filtered.is_none() {
            debug!(path = %request.path(), "No server-side name filter, scanning client-side");
        }
        let target = filtered.as_ref().unwrap_or(request);

        let resolution = self
            .resolve_matching(executor, target, name_equals::<R::Entity>(name))
            .await?;

        debug!(
            path = %request.path(),
            name,
            found = resolution.is_found(),
            ambiguous = resolution.is_ambiguous(),
            "Resolved entity"
        );

        Ok(resolution)
    }

    /// Resolve the single entity of `request` satisfying `predicate`
    ///
    /// No filter is pushed to the server: every page may be scanned.
    pub async fn resolve_matching<C, R, P>(
        &self,
        executor: &C,
        request: &R,
        predicate: P,
    ) -> Result<Resolution<R::Entity>>
    where
        C: Executor,
        R: ListRequest,
        P: FnMut(&R::Entity) -> bool,
    {
        let mut stream = paginate(executor, request);
        if let Some(token) = &self.cancel {
            stream = stream.with_cancellation(token.clone());
        }
        resolve_one(stream, predicate, self.policy).await
    }
}
