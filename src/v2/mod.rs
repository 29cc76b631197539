//! Typed Cloud Foundry v2 resources and requests
//!
//! Only the endpoints the operations layer needs: organizations, quota
//! definitions, service instances and their bindings.

mod requests;
mod resources;

pub use requests::{
    Filter, FilterOp, GetServiceInstanceRequest, ListOrganizationQuotaDefinitionsRequest,
    ListOrganizationsRequest, ListRequest, ListServiceInstanceServiceBindingsRequest,
    ListServiceInstancesRequest, Paging, SingleRequest, UpdateOrganizationRequest, FILTER_PARAM,
    ORDER_DIRECTION_PARAM, RESULTS_PER_PAGE_PARAM,
};
pub use resources::{
    LastOperation, ListResponse, Metadata, Named, OrganizationEntity,
    OrganizationQuotaDefinitionEntity, OrganizationQuotaDefinitionResource, OrganizationResource,
    Resource, ServiceBindingEntity, ServiceBindingResource, ServiceInstanceEntity,
    ServiceInstanceResource,
};
