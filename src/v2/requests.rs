//! v2 request types
//!
//! List requests describe a path, their `q=` filters and paging knobs; the
//! executor adds the page index. Single requests describe one call.

use super::resources::{
    OrganizationQuotaDefinitionResource, OrganizationResource, ServiceBindingResource,
    ServiceInstanceResource,
};
use crate::error::{ensure_not_blank, Result};
use crate::types::{Method, OrderDirection};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Query parameter carrying filter clauses (may repeat)
pub const FILTER_PARAM: &str = "q";

/// Query parameter carrying the page size
pub const RESULTS_PER_PAGE_PARAM: &str = "results-per-page";

/// Query parameter carrying the sort order
pub const ORDER_DIRECTION_PARAM: &str = "order-direction";

// ============================================================================
// Traits
// ============================================================================

/// A paginated list request
pub trait ListRequest: Send + Sync + 'static {
    /// Decoded list element
    type Entity: DeserializeOwned + Send + Sync + 'static;

    /// Endpoint path, relative to the API root
    fn path(&self) -> String;

    /// Query parameters, excluding the page index
    fn query_params(&self) -> Vec<(String, String)>;

    /// Reject malformed requests before any network call
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// The same request narrowed server-side to entities named `name`
    ///
    /// Returns `None` when the endpoint has no name filter.
    fn name_filter(&self, _name: &str) -> Option<Self>
    where
        Self: Sized,
    {
        None
    }
}

/// A single, non-paginated request
pub trait SingleRequest: Send + Sync + 'static {
    /// Decoded response body
    type Response: DeserializeOwned + Send + Sync + 'static;

    /// HTTP method
    fn method(&self) -> Method;

    /// Endpoint path, relative to the API root
    fn path(&self) -> String;

    /// Query parameters
    fn query_params(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// JSON body
    fn body(&self) -> Option<Value> {
        None
    }

    /// Reject malformed requests before any network call
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

// ============================================================================
// Filters and paging
// ============================================================================

/// Comparison of a filter clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// `field:value`
    Eq,
    /// `field IN a,b`
    In,
}

/// One `q=` filter clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Filtered field
    pub field: String,
    /// Comparison
    pub op: FilterOp,
    /// Compared values
    pub values: Vec<String>,
}

impl Filter {
    /// `field:value`
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::Eq,
            values: vec![value.into()],
        }
    }

    /// `field IN a,b,...`
    pub fn in_values(field: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::In,
            values,
        }
    }

    /// Equality for one value, `IN` for several, nothing for none
    pub fn for_values(field: &str, values: &[String]) -> Option<Self> {
        match values {
            [] => None,
            [single] => Some(Self::eq(field, single.clone())),
            many => Some(Self::in_values(field, many.to_vec())),
        }
    }

    /// Render as a `q` parameter value
    pub fn render(&self) -> String {
        match self.op {
            FilterOp::Eq => format!("{}:{}", self.field, self.values.join(",")),
            FilterOp::In => format!("{} IN {}", self.field, self.values.join(",")),
        }
    }
}

/// Page size and order shared by list requests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paging {
    /// Results per page (server default when unset)
    pub results_per_page: Option<u32>,
    /// Sort order
    pub order_direction: Option<OrderDirection>,
}

impl Paging {
    fn push_params(&self, params: &mut Vec<(String, String)>) {
        if let Some(size) = self.results_per_page {
            params.push((RESULTS_PER_PAGE_PARAM.to_string(), size.to_string()));
        }
        if let Some(direction) = self.order_direction {
            params.push((
                ORDER_DIRECTION_PARAM.to_string(),
                direction.as_str().to_string(),
            ));
        }
    }
}

/// Render filters followed by paging parameters
fn list_params(filters: impl IntoIterator<Item = Option<Filter>>, paging: &Paging) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = filters
        .into_iter()
        .flatten()
        .map(|filter| (FILTER_PARAM.to_string(), filter.render()))
        .collect();
    paging.push_params(&mut params);
    params
}

// ============================================================================
// Organizations
// ============================================================================

/// `GET /v2/organizations`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOrganizationsRequest {
    /// Organization names to match
    pub names: Vec<String>,
    /// Paging knobs
    pub paging: Paging,
}

impl ListOrganizationsRequest {
    /// Create an unfiltered request
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name to match
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Set the page size
    #[must_use]
    pub fn results_per_page(mut self, size: u32) -> Self {
        self.paging.results_per_page = Some(size);
        self
    }
}

impl ListRequest for ListOrganizationsRequest {
    type Entity = OrganizationResource;

    fn path(&self) -> String {
        "/v2/organizations".to_string()
    }

    fn query_params(&self) -> Vec<(String, String)> {
        list_params([Filter::for_values("name", &self.names)], &self.paging)
    }

    fn name_filter(&self, name: &str) -> Option<Self> {
        Some(Self {
            names: vec![name.to_string()],
            paging: self.paging.clone(),
        })
    }
}

/// `PUT /v2/organizations/:guid`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateOrganizationRequest {
    /// Organization GUID
    pub organization_id: String,
    /// New name
    pub name: Option<String>,
    /// New quota definition GUID
    pub quota_definition_id: Option<String>,
    /// New status (`active` / `suspended`)
    pub status: Option<String>,
}

impl UpdateOrganizationRequest {
    /// Create an update for an organization
    pub fn new(organization_id: impl Into<String>) -> Self {
        Self {
            organization_id: organization_id.into(),
            ..Default::default()
        }
    }

    /// Assign a quota definition
    #[must_use]
    pub fn quota_definition_id(mut self, id: impl Into<String>) -> Self {
        self.quota_definition_id = Some(id.into());
        self
    }

    /// Rename the organization
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl SingleRequest for UpdateOrganizationRequest {
    type Response = OrganizationResource;

    fn method(&self) -> Method {
        Method::PUT
    }

    fn path(&self) -> String {
        format!("/v2/organizations/{}", self.organization_id)
    }

    fn body(&self) -> Option<Value> {
        let mut body = Map::new();
        if let Some(name) = &self.name {
            body.insert("name".to_string(), Value::String(name.clone()));
        }
        if let Some(quota) = &self.quota_definition_id {
            body.insert(
                "quota_definition_guid".to_string(),
                Value::String(quota.clone()),
            );
        }
        if let Some(status) = &self.status {
            body.insert("status".to_string(), Value::String(status.clone()));
        }
        Some(Value::Object(body))
    }

    fn validate(&self) -> Result<()> {
        ensure_not_blank("organization_id", &self.organization_id)
    }
}

// ============================================================================
// Organization Quota Definitions
// ============================================================================

/// `GET /v2/quota_definitions`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOrganizationQuotaDefinitionsRequest {
    /// Quota names to match
    pub names: Vec<String>,
    /// Paging knobs
    pub paging: Paging,
}

impl ListOrganizationQuotaDefinitionsRequest {
    /// Create an unfiltered request
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name to match
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Set the page size
    #[must_use]
    pub fn results_per_page(mut self, size: u32) -> Self {
        self.paging.results_per_page = Some(size);
        self
    }
}

impl ListRequest for ListOrganizationQuotaDefinitionsRequest {
    type Entity = OrganizationQuotaDefinitionResource;

    fn path(&self) -> String {
        "/v2/quota_definitions".to_string()
    }

    fn query_params(&self) -> Vec<(String, String)> {
        list_params([Filter::for_values("name", &self.names)], &self.paging)
    }

    fn name_filter(&self, name: &str) -> Option<Self> {
        Some(Self {
            names: vec![name.to_string()],
            paging: self.paging.clone(),
        })
    }
}

// ============================================================================
// Service Instances
// ============================================================================

/// `GET /v2/service_instances`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListServiceInstancesRequest {
    /// Instance names to match
    pub names: Vec<String>,
    /// Space GUIDs to match
    pub space_ids: Vec<String>,
    /// Paging knobs
    pub paging: Paging,
}

impl ListServiceInstancesRequest {
    /// Create an unfiltered request
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name to match
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Add a space GUID to match
    #[must_use]
    pub fn space_id(mut self, space_id: impl Into<String>) -> Self {
        self.space_ids.push(space_id.into());
        self
    }

    /// Set the page size
    #[must_use]
    pub fn results_per_page(mut self, size: u32) -> Self {
        self.paging.results_per_page = Some(size);
        self
    }

    /// Set the sort order
    #[must_use]
    pub fn order_direction(mut self, direction: OrderDirection) -> Self {
        self.paging.order_direction = Some(direction);
        self
    }
}

impl ListRequest for ListServiceInstancesRequest {
    type Entity = ServiceInstanceResource;

    fn path(&self) -> String {
        "/v2/service_instances".to_string()
    }

    fn query_params(&self) -> Vec<(String, String)> {
        list_params(
            [
                Filter::for_values("name", &self.names),
                Filter::for_values("space_guid", &self.space_ids),
            ],
            &self.paging,
        )
    }

    fn name_filter(&self, name: &str) -> Option<Self> {
        Some(Self {
            names: vec![name.to_string()],
            ..self.clone()
        })
    }
}

/// `GET /v2/service_instances/:guid`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetServiceInstanceRequest {
    /// Service instance GUID
    pub service_instance_id: String,
}

impl GetServiceInstanceRequest {
    /// Create a request for one instance
    pub fn new(service_instance_id: impl Into<String>) -> Self {
        Self {
            service_instance_id: service_instance_id.into(),
        }
    }
}

impl SingleRequest for GetServiceInstanceRequest {
    type Response = ServiceInstanceResource;

    fn method(&self) -> Method {
        Method::GET
    }

    fn path(&self) -> String {
        format!("/v2/service_instances/{}", self.service_instance_id)
    }

    fn validate(&self) -> Result<()> {
        ensure_not_blank("service_instance_id", &self.service_instance_id)
    }
}

/// `GET /v2/service_instances/:guid/service_bindings`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListServiceInstanceServiceBindingsRequest {
    /// Service instance GUID
    pub service_instance_id: String,
    /// App GUIDs to match
    pub app_ids: Vec<String>,
    /// Paging knobs
    pub paging: Paging,
}

impl ListServiceInstanceServiceBindingsRequest {
    /// Create a request for one instance's bindings
    pub fn new(service_instance_id: impl Into<String>) -> Self {
        Self {
            service_instance_id: service_instance_id.into(),
            ..Default::default()
        }
    }

    /// Add an app GUID to match
    #[must_use]
    pub fn app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_ids.push(app_id.into());
        self
    }
}

impl ListRequest for ListServiceInstanceServiceBindingsRequest {
    type Entity = ServiceBindingResource;

    fn path(&self) -> String {
        format!(
            "/v2/service_instances/{}/service_bindings",
            self.service_instance_id
        )
    }

    fn query_params(&self) -> Vec<(String, String)> {
        list_params([Filter::for_values("app_guid", &self.app_ids)], &self.paging)
    }

    fn validate(&self) -> Result<()> {
        ensure_not_blank("service_instance_id", &self.service_instance_id)
    }
}
