//! Integration tests for the roster server.
//!
//! ## Test Organization
//!
//! - `skill_rest_contract` - The Skill REST contract through the operation handler
//! - `lifecycle` - Ordering and isolation guarantees of the typed services
//! - `tenants` - Tenant registration and cascading removal
//! - `references` - Required skills must exist in the spot's tenant
//! - `admin_reset` - Wiping every kind and tenant
//! - `concurrency` - Parallel creates, updates and deletes
//! - `properties` - Property tests over tenants and ids

pub mod admin_reset;
pub mod concurrency;
pub mod lifecycle;
pub mod properties;
pub mod references;
pub mod tenants;
