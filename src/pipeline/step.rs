//! Pipeline steps
//!
//! A step is either a resolution (read-only, paginated) or a mutation (one
//! write call). Its input-derivation function sees only the results of the
//! steps before it.

use super::outputs::Outputs;
use crate::error::Result;
use crate::executor::Executor;
use crate::resolve::{Identified, Resolver};
use crate::v2::{ListRequest, SingleRequest};
use async_trait::async_trait;
use std::any::Any;
use std::marker::PhantomData;

/// Result value a step leaves in the arena
pub(crate) type StepValue = Box<dyn Any + Send + Sync>;

/// What a step does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Resolve exactly one entity out of a listing
    Resolve,
    /// Perform a single write call
    Mutate,
}

/// A named lookup: which listing to search and for which name
#[derive(Debug, Clone)]
pub struct Lookup<R> {
    /// List request to search
    pub request: R,
    /// Name the entity must carry
    pub name: String,
    /// How to search
    pub resolver: Resolver,
}

impl<R: ListRequest> Lookup<R> {
    /// Look for the entity named `name` in `request`
    pub fn by_name(request: R, name: impl Into<String>) -> Self {
        Self {
            request,
            name: name.into(),
            resolver: Resolver::new(),
        }
    }

    /// Search with a specific resolver
    #[must_use]
    pub fn using(mut self, resolver: Resolver) -> Self {
        self.resolver = resolver;
        self
    }
}

#[async_trait]
pub(crate) trait Action<C: Executor>: Send + Sync {
    async fn run(&self, executor: &C, outputs: &Outputs) -> Result<StepValue>;
}

struct ResolveAction<R, F> {
    entity_kind: String,
    derive: F,
    _request: PhantomData<fn() -> R>,
}

#[async_trait]
impl<C, R, F> Action<C> for ResolveAction<R, F>
where
    C: Executor,
    R: ListRequest,
    R::Entity: Identified,
    F: Fn(&Outputs) -> Result<Lookup<R>> + Send + Sync,
{
    async fn run(&self, executor: &C, outputs: &Outputs) -> Result<StepValue> {
        let lookup = (self.derive)(outputs)?;
        let entity = lookup
            .resolver
            .resolve(executor, &lookup.request, &lookup.name)
            .await?
            .into_result(&self.entity_kind, &lookup.name)?;
        Ok(Box::new(entity))
    }
}

struct MutateAction<R, F> {
    derive: F,
    _request: PhantomData<fn() -> R>,
}

#[async_trait]
impl<C, R, F> Action<C> for MutateAction<R, F>
where
    C: Executor,
    R: SingleRequest,
    F: Fn(&Outputs) -> Result<R> + Send + Sync,
{
    async fn run(&self, executor: &C, outputs: &Outputs) -> Result<StepValue> {
        let request = (self.derive)(outputs)?;
        let response = executor.send(&request).await?;
        Ok(Box::new(response))
    }
}

/// One named unit of work of a [`super::Pipeline`]
pub struct Step<C> {
    pub(crate) name: String,
    pub(crate) kind: StepKind,
    pub(crate) reads: Vec<String>,
    pub(crate) action: Box<dyn Action<C>>,
}

impl<C: Executor> Step<C> {
    /// Resolve exactly one `entity_kind` entity
    ///
    /// The result, `R::Entity`, is stored under `name`. `entity_kind` only
    /// labels not-found and ambiguous errors (`Quota x does not exist`).
    pub fn resolve<R, F>(name: impl Into<String>, entity_kind: impl Into<String>, derive: F) -> Self
    where
        R: ListRequest,
        R::Entity: Identified,
        F: Fn(&Outputs) -> Result<Lookup<R>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            kind: StepKind::Resolve,
            reads: Vec::new(),
            action: Box::new(ResolveAction {
                entity_kind: entity_kind.into(),
                derive,
                _request: PhantomData,
            }),
        }
    }

    /// Perform one write call built from earlier results
    ///
    /// The response, `R::Response`, is stored under `name`.
    pub fn mutate<R, F>(name: impl Into<String>, derive: F) -> Self
    where
        R: SingleRequest,
        F: Fn(&Outputs) -> Result<R> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            kind: StepKind::Mutate,
            reads: Vec::new(),
            action: Box::new(MutateAction {
                derive,
                _request: PhantomData,
            }),
        }
    }
}

impl<C> Step<C> {
    /// Declare the earlier steps this step reads
    #[must_use]
    pub fn reads(mut self, steps: &[&str]) -> Self {
        self.reads = steps.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Step name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Step kind
    pub fn kind(&self) -> StepKind {
        self.kind
    }
}

impl<C> std::fmt::Debug for Step<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("reads", &self.reads)
            .finish_non_exhaustive()
    }
}
