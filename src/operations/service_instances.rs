//! Service instance lookups

use crate::error::Result;
use crate::executor::Executor;
use crate::pagination::paginate_owned;
use crate::resolve::Resolver;
use crate::v2::{
    GetServiceInstanceRequest, ListServiceInstanceServiceBindingsRequest,
    ListServiceInstancesRequest, ServiceBindingResource, ServiceInstanceResource,
};
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Summary of a service instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInstance {
    /// Service instance GUID
    pub id: String,
    /// Service instance name
    pub name: String,
    /// GUID of the owning space
    pub space_id: Option<String>,
    /// GUID of the service plan, absent for user-provided instances
    pub service_plan_id: Option<String>,
    /// `managed_service_instance` or `user_provided_service_instance`
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub dashboard_url: Option<String>,
    pub tags: Vec<String>,
    /// `<type> <state>` of the last operation, e.g. `create succeeded`
    pub last_operation: Option<String>,
}

impl From<ServiceInstanceResource> for ServiceInstance {
    fn from(resource: ServiceInstanceResource) -> Self {
        let entity = resource.entity;
        Self {
            id: resource.metadata.id,
            name: entity.name,
            space_id: entity.space_guid,
            service_plan_id: entity.service_plan_guid,
            kind: entity.kind,
            dashboard_url: entity.dashboard_url,
            tags: entity.tags,
            last_operation: entity
                .last_operation
                .map(|op| format!("{} {}", op.kind, op.state)),
        }
    }
}

/// Summary of a binding between an app and a service instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceBinding {
    /// Binding GUID
    pub id: String,
    /// GUID of the bound app
    pub app_id: Option<String>,
    /// GUID of the bound service instance
    pub service_instance_id: Option<String>,
}

impl From<ServiceBindingResource> for ServiceBinding {
    fn from(resource: ServiceBindingResource) -> Self {
        Self {
            id: resource.metadata.id,
            app_id: resource.entity.app_guid,
            service_instance_id: resource.entity.service_instance_guid,
        }
    }
}

/// Service instance operations against one executor
pub struct ServiceInstances<C> {
    executor: C,
    resolver: Resolver,
    cancel: Option<CancellationToken>,
}

impl<C: Executor> ServiceInstances<C> {
    /// Create service instance operations with the default resolver
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

    /// Stop fetching pages once `token` is cancelled
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.resolver = self.resolver.with_cancellation(token.clone());
        self.cancel = Some(token);
        self
    }

    /// The service instance named `name`
    pub async fn get(&self, name: &str) -> Result<ServiceInstance> {
        self.resolve(name).await.map(ServiceInstance::from)
    }

    /// The service instance with GUID `id`
    pub async fn get_by_id(&self, id: &str) -> Result<ServiceInstance> {
        self.executor
            .send(&GetServiceInstanceRequest::new(id))
            .await
            .map(ServiceInstance::from)
    }

    /// Every binding of the service instance named `name`
    pub async fn list_bindings(&self, name: &str) -> Result<Vec<ServiceBinding>> {
        let instance = self.resolve(name).await?;

        let mut stream = paginate_owned(
            &self.executor,
            ListServiceInstanceServiceBindingsRequest::new(instance.id()),
        );
        if let Some(token) = &self.cancel {
            stream = stream.with_cancellation(token.clone());
        }
        let bindings: Vec<ServiceBinding> = stream.map_ok(ServiceBinding::from).try_collect().await?;

        debug!(service_instance = name, count = bindings.len(), "Listed service bindings");
        Ok(bindings)
    }

    async fn resolve(&self, name: &str) -> Result<ServiceInstanceResource> {
        self.resolver
            .resolve(&self.executor, &ListServiceInstancesRequest::new(), name)
            .await?
            .into_result("Service instance", name)
    }
}
