//! Composition pipeline
//!
//! Chains resolutions and single write calls into a multi-step workflow
//! (resolve organization, resolve quota, update organization with the quota
//! id). Steps run strictly in declared order, each reading the named results
//! of earlier steps from [`Outputs`]. The first failing step aborts the run
//! and is reported as a [`PipelineError`] carrying the step name.
//!
//! ```rust,ignore
//! let outputs = Pipeline::new()
//!     .step(Step::resolve("quota", "Quota", move |_| {
//!         Ok(Lookup::by_name(ListOrganizationQuotaDefinitionsRequest::new(), quota_name.clone()))
//!     }))
//!     .step(Step::mutate("update", |outputs| {
//!         let quota = outputs.get::<OrganizationQuotaDefinitionResource>("quota")?;
//!         Ok(UpdateOrganizationRequest::new(org_id.clone()).quota_definition_id(quota.id()))
//!     }).reads(&["quota"]))
//!     .run(&client)
//!     .await?;
//! ```

mod outputs;
mod step;

pub use outputs::Outputs;
pub use step::{Lookup, Step, StepKind};

use crate::error::{Error, PipelineError};
use crate::executor::Executor;
use std::collections::HashSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Result of a pipeline run
pub type PipelineResult = std::result::Result<Outputs, PipelineError>;

/// An ordered chain of dependent steps
pub struct Pipeline<C> {
    steps: Vec<Step<C>>,
}

impl<C> Default for Pipeline<C> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<C: Executor> Pipeline<C> {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step
    #[must_use]
    pub fn step(mut self, step: Step<C>) -> Self {
        self.steps.push(step);
        self
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if the pipeline has no step
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step names in execution order
    pub fn step_names(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(Step::name)
    }

    /// Run every step in order against `executor`
    pub async fn run(&self, executor: &C) -> PipelineResult {
        self.execute(executor, None).await
    }

    /// Run every step, stopping at the next suspension point once `token` is cancelled
    ///
    /// The in-flight step is dropped, so no further page is fetched.
    pub async fn run_with_cancellation(
        &self,
        executor: &C,
        token: &CancellationToken,
    ) -> PipelineResult {
        self.execute(executor, Some(token)).await
    }

    /// Check names are unique and every step only reads earlier steps
    pub fn validate(&self) -> std::result::Result<(), PipelineError> {
        let mut seen = HashSet::new();
        for step in &self.steps {
            if let Some(read) = step.reads.iter().find(|read| !seen.contains(read.as_str())) {
                return Err(PipelineError::new(
                    step.name.clone(),
                    Error::validation(
                        "reads",
                        format!("step '{read}' is not declared before '{}'", step.name),
                    ),
                ));
            }
            if !seen.insert(step.name.as_str()) {
                return Err(PipelineError::new(
                    step.name.clone(),
                    Error::validation("name", "step names must be unique"),
                ));
            }
        }
        Ok(())
    }

    async fn execute(&self, executor: &C, cancel: Option<&CancellationToken>) -> PipelineResult {
        self.validate()?;

        let mut outputs = Outputs::new();
        for step in &self.steps {
            if cancel.is_some_and(CancellationToken::is_cancelled) {
                return Err(PipelineError::new(step.name.clone(), Error::Cancelled));
            }

            info!(step = %step.name, kind = ?step.kind, "Running pipeline step");

            let result = match cancel {
                Some(token) => {
                    tokio::select! {
                        biased;
                        () = token.cancelled() => Err(Error::Cancelled),
                        result = step.action.run(executor, &outputs) => result,
                    }
                }
                None => step.action.run(executor, &outputs).await,
            };

            match result {
                Ok(value) => {
                    debug!(step = %step.name, "Pipeline step completed");
                    outputs.insert(step.name.clone(), value);
                }
                Err(error) => {
                    debug!(step = %step.name, %error, "Pipeline step failed");
                    return Err(PipelineError::new(step.name.clone(), error));
                }
            }
        }

        Ok(outputs)
    }
}
