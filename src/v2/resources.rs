//! v2 resource payloads
//!
//! Every v2 list element and single-resource response has the shape
//! `{ "metadata": {...}, "entity": {...} }`; list responses wrap them with
//! `total_results` / `total_pages`.

use crate::pagination::Page;
use crate::resolve::Identified;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// Envelope
// ============================================================================

/// Resource metadata shared by every v2 resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Resource GUID
    #[serde(rename = "guid", alias = "id")]
    pub id: String,
    /// Resource URL, relative to the API root
    #[serde(default)]
    pub url: Option<String>,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A v2 resource: metadata plus a typed entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource<E> {
    /// Identity and timestamps
    pub metadata: Metadata,
    /// Resource-specific fields
    pub entity: E,
}

impl<E> Resource<E> {
    /// Resource GUID
    pub fn id(&self) -> &str {
        &self.metadata.id
    }
}

/// Entities that carry a `name` field
pub trait Named {
    /// The entity's name
    fn name(&self) -> &str;
}

impl<E: Named> Identified for Resource<E> {
    fn id(&self) -> &str {
        &self.metadata.id
    }

    fn name(&self) -> &str {
        self.entity.name()
    }
}

/// One page of a v2 list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Number of results across all pages
    #[serde(default)]
    pub total_results: u64,
    /// Number of pages
    #[serde(default)]
    pub total_pages: u32,
    /// URL of the previous page
    #[serde(default)]
    pub prev_url: Option<String>,
    /// URL of the next page
    #[serde(default)]
    pub next_url: Option<String>,
    /// Items of this page, in server order
    #[serde(default = "Vec::new")]
    pub resources: Vec<T>,
}

impl<T> ListResponse<T> {
    /// Convert into a [`Page`] for the page number that was requested
    pub fn into_page(self, page_number: u32) -> Page<T> {
        Page::new(
            self.resources,
            page_number,
            self.total_pages,
            self.total_results,
        )
    }
}

// ============================================================================
// Organizations
// ============================================================================

/// Organization entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationEntity {
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub billing_enabled: Option<bool>,
    #[serde(default)]
    pub quota_definition_guid: Option<String>,
    #[serde(default)]
    pub quota_definition_url: Option<String>,
    #[serde(default)]
    pub spaces_url: Option<String>,
}

impl Named for OrganizationEntity {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Organization resource
pub type OrganizationResource = Resource<OrganizationEntity>;

// ============================================================================
// Organization Quota Definitions
// ============================================================================

/// Organization quota definition entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationQuotaDefinitionEntity {
    pub name: String,
    pub non_basic_services_allowed: bool,
    pub total_services: i64,
    pub total_routes: i64,
    pub memory_limit: i64,
    pub instance_memory_limit: i64,
    pub app_instance_limit: i64,
}

impl Named for OrganizationQuotaDefinitionEntity {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Organization quota definition resource
pub type OrganizationQuotaDefinitionResource = Resource<OrganizationQuotaDefinitionEntity>;

// ============================================================================
// Service Instances
// ============================================================================

/// Last operation performed on a service instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LastOperation {
    #[serde(rename = "type")]
    pub kind: String,
    pub state: String,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Service instance entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceInstanceEntity {
    pub name: String,
    pub credentials: Map<String, Value>,
    pub service_plan_guid: Option<String>,
    pub space_guid: Option<String>,
    pub dashboard_url: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub last_operation: Option<LastOperation>,
    pub tags: Vec<String>,
    pub space_url: Option<String>,
    pub service_plan_url: Option<String>,
    pub service_bindings_url: Option<String>,
    pub service_keys_url: Option<String>,
}

impl Named for ServiceInstanceEntity {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Service instance resource
pub type ServiceInstanceResource = Resource<ServiceInstanceEntity>;

// ============================================================================
// Service Bindings
// ============================================================================

/// Service binding entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceBindingEntity {
    pub app_guid: Option<String>,
    pub service_instance_guid: Option<String>,
    pub credentials: Map<String, Value>,
    pub binding_options: Map<String, Value>,
    pub gateway_name: Option<String>,
    pub syslog_drain_url: Option<String>,
    pub app_url: Option<String>,
    pub service_instance_url: Option<String>,
}

/// Service binding resource
pub type ServiceBindingResource = Resource<ServiceBindingEntity>;
