//! Operations built on the pagination and resolution core
//!
//! Callers pass human-readable names; the operations resolve them to
//! resources, chain the dependent calls and surface not-found / ambiguous
//! outcomes as errors such as `Quota test-quota does not exist`.

mod organization_admin;
mod service_instances;

pub use organization_admin::{GetQuotaRequest, OrganizationAdmin, OrganizationQuota, SetQuotaRequest};
pub use service_instances::{ServiceBinding, ServiceInstance, ServiceInstances};
