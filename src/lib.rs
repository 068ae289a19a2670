//! Multi-tenant rostering back end for Rust.
//!
//! Provides the tenant-scoped lifecycle shared by every rostering entity
//! (skills, spots, contracts): create, read, update, delete and list, each
//! confined to one tenant, plus tenant registration and an administrative
//! reset. Storage is pluggable and the REST contract is exposed through a
//! framework-agnostic operation handler.
//!
//! # Core Components
//!
//! - [`RosterServer`] - Registered entity kinds and their services
//! - [`EntityService`] - Generic lifecycle for one entity kind
//! - [`EntityStore`] - Trait for implementing storage backends
//! - [`RosterOperationHandler`] - Maps REST requests onto the services
//!
//! # Quick Start
//!
//! ```rust
//! use roster_server::RosterServer;
//! use roster_server::context::RequestContext;
//! use roster_server::entity::{Record, Skill, TenantId};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let server = RosterServer::standard()?;
//! let skills = server.service::<Skill>().ok_or("Skill is registered")?;
//! let ctx = RequestContext::with_generated_id();
//!
//! let created = skills
//!     .create(TenantId::new(1), Record::new(1, Skill::new("forklift")), &ctx)
//!     .await?;
//! let id = created.id.ok_or("id assigned on create")?;
//! assert_eq!(skills.read(TenantId::new(1), id, &ctx).await?, created);
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod context;
pub mod entity;
pub mod error;
pub mod operation_handler;
pub mod server;
pub mod service;
pub mod storage;
pub mod validator;

// Re-export commonly used types for convenience
pub use admin::{AdminService, ResetSummary};
pub use context::RequestContext;
pub use entity::{Contract, EntityId, EntityKind, Record, Skill, Spot, Tenant, TenantId, View};
pub use error::{BuildError, RosterError, RosterResult, ValidationError};
pub use operation_handler::{
    ErrorBody, HttpMethod, RosterOperationHandler, RosterRequest, RosterResponse,
};
pub use server::{RosterServer, RosterServerBuilder, RosterServerConfig};
pub use service::{EntityService, KindEndpoint, TenantService};
pub use storage::{EntityStore, InMemoryStore, StorageError};
pub use validator::EntityValidator;
