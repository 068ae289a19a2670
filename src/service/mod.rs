//! Lifecycle services.
//!
//! [`EntityService`] implements the tenant-scoped lifecycle once for every
//! entity kind. [`KindEndpoint`] exposes it to the operation handler without
//! the kind's type, and [`TenantService`] manages the tenants themselves.

pub mod endpoint;
pub mod lifecycle;
pub mod tenant;

pub use endpoint::KindEndpoint;
pub use lifecycle::EntityService;
pub use tenant::TenantService;
