//! Organization quota administration

use crate::error::{ensure_not_blank, PipelineError, Result};
use crate::executor::Executor;
use crate::pagination::paginate_owned;
use crate::pipeline::{Lookup, Outputs, Pipeline, Step};
use crate::resolve::Resolver;
use crate::v2::{
    ListOrganizationQuotaDefinitionsRequest, ListOrganizationsRequest,
    OrganizationQuotaDefinitionResource, OrganizationResource, UpdateOrganizationRequest,
};
use futures::{Stream, TryStreamExt};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Quota definition as exposed to operators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationQuota {
    /// Quota definition GUID
    pub id: String,
    /// Quota definition name
    pub name: String,
    /// Whether paid service plans may be provisioned
    pub allow_paid_service_plans: bool,
    /// Maximum application instances, `-1` for unlimited
    pub application_instance_limit: i64,
    /// Maximum memory per instance in MB, `-1` for unlimited
    pub instance_memory_limit: i64,
    /// Total memory in MB
    pub memory_limit: i64,
    /// Maximum number of routes
    pub total_routes: i64,
    /// Maximum number of service instances
    pub total_services: i64,
}

impl From<OrganizationQuotaDefinitionResource> for OrganizationQuota {
    fn from(resource: OrganizationQuotaDefinitionResource) -> Self {
        let entity = resource.entity;
        Self {
            id: resource.metadata.id,
            name: entity.name,
            allow_paid_service_plans: entity.non_basic_services_allowed,
            application_instance_limit: entity.app_instance_limit,
            instance_memory_limit: entity.instance_memory_limit,
            memory_limit: entity.memory_limit,
            total_routes: entity.total_routes,
            total_services: entity.total_services,
        }
    }
}

/// Look up one quota by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetQuotaRequest {
    /// Exact, case-sensitive quota name
    pub name: String,
}

impl GetQuotaRequest {
    /// Create a lookup for `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Assign a named quota to a named organization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetQuotaRequest {
    /// Organization to update
    pub organization_name: String,
    /// Quota definition to assign
    pub quota_name: String,
}

impl SetQuotaRequest {
    /// Create an assignment of `quota_name` to `organization_name`
    pub fn new(organization_name: impl Into<String>, quota_name: impl Into<String>) -> Self {
        Self {
            organization_name: organization_name.into(),
            quota_name: quota_name.into(),
        }
    }

    fn validate(&self) -> Result<()> {
        ensure_not_blank("organization_name", &self.organization_name)?;
        ensure_not_blank("quota_name", &self.quota_name)
    }
}

/// Organization administration against one executor
pub struct OrganizationAdmin<C> {
    executor: C,
    resolver: Resolver,
    cancel: Option<CancellationToken>,
}

impl<C: Executor> OrganizationAdmin<C> {
    /// Create an admin with the default resolver
    pub fn new(executor: C) -> Self {
        Self {
            executor,
            resolver: Resolver::new(),
            cancel: None,
        }
    }

    /// Resolve names with a specific resolver
    #[must_use]
    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Abort lookups and pipelines once `token` is cancelled
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.resolver = self.resolver.with_cancellation(token.clone());
        self.cancel = Some(token);
        self
    }

    /// Fetch the quota definition named `request.name`
    pub async fn get_quota(&self, request: &GetQuotaRequest) -> Result<OrganizationQuota> {
        self.resolver
            .resolve(
                &self.executor,
                &ListOrganizationQuotaDefinitionsRequest::new(),
                &request.name,
            )
            .await?
            .into_result("Quota", &request.name)
            .map(OrganizationQuota::from)
    }

    /// Stream every quota definition, fetching pages on demand
    pub fn list_quotas(&self) -> impl Stream<Item = Result<OrganizationQuota>> + Send + '_ {
        let mut stream = paginate_owned(&self.executor, ListOrganizationQuotaDefinitionsRequest::new());
        if let Some(token) = &self.cancel {
            stream = stream.with_cancellation(token.clone());
        }
        stream.map_ok(OrganizationQuota::from)
    }

    /// Resolve the quota, then the organization, then update the organization
    ///
    /// The update is never issued when either lookup fails.
    pub async fn set_quota(&self, request: &SetQuotaRequest) -> Result<OrganizationResource> {
        request.validate()?;

        let quota_name = request.quota_name.clone();
        let quota_resolver = self.resolver.clone();
        let organization_name = request.organization_name.clone();
        let organization_resolver = self.resolver.clone();

        let pipeline = Pipeline::new()
            .step(Step::resolve("quota", "Quota", move |_| {
                Ok(
                    Lookup::by_name(ListOrganizationQuotaDefinitionsRequest::new(), &quota_name)
                        .using(quota_resolver.clone()),
                )
            }))
            .step(Step::resolve("organization", "Organization", move |_| {
                Ok(
                    Lookup::by_name(ListOrganizationsRequest::new(), &organization_name)
                        .using(organization_resolver.clone()),
                )
            }))
            .step(
                Step::mutate("update", |outputs: &Outputs| {
                    let quota = outputs.get::<OrganizationQuotaDefinitionResource>("quota")?;
                    let organization = outputs.get::<OrganizationResource>("organization")?;
                    Ok(UpdateOrganizationRequest::new(organization.id())
                        .quota_definition_id(quota.id()))
                })
                .reads(&["quota", "organization"]),
            );

        let outputs = match &self.cancel {
            Some(token) => pipeline.run_with_cancellation(&self.executor, token).await,
            None => pipeline.run(&self.executor).await,
        };
        let mut outputs = outputs.map_err(PipelineError::into_inner)?;

        info!(
            organization = %request.organization_name,
            quota = %request.quota_name,
            "Organization quota updated"
        );

        outputs.take::<OrganizationResource>("update")
    }
}
