//! Configuration and builder for roster servers.
//!
//! The builder collects entity kinds, checks that their names and route
//! segments are unique, and wires every kind to one shared id sequence and
//! to the reset and tenant-removal services.

use crate::entity::{Contract, EntityKind, Skill, Spot, Tenant};
use crate::error::BuildError;
use crate::server::RosterServer;
use crate::server::core::{KindRegistration, register_in_memory};
use crate::storage::{IdSequence, ReferenceSource};
use log::debug;
use std::any::TypeId;
use std::collections::HashSet;
use std::sync::Arc;

/// Configuration for a roster server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterServerConfig {
    /// Prefix of every route, e.g. `/rest`. Empty serves from the root.
    pub base_path: String,

    /// First id handed out by the shared entity id sequence.
    pub first_entity_id: i64,

    /// First id handed out to registered tenants.
    pub first_tenant_id: i32,
}

impl Default for RosterServerConfig {
    fn default() -> Self {
        Self {
            base_path: "/rest".to_string(),
            first_entity_id: 1,
            first_tenant_id: 1,
        }
    }
}

impl RosterServerConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), BuildError> {
        if !self.base_path.is_empty() {
            if !self.base_path.starts_with('/') {
                return Err(BuildError::InvalidConfiguration {
                    message: format!("Base path '{}' must start with '/'", self.base_path),
                });
            }
            if self.base_path.ends_with('/') {
                return Err(BuildError::InvalidConfiguration {
                    message: format!("Base path '{}' must not end with '/'", self.base_path),
                });
            }
        }

        if self.first_entity_id < 1 {
            return Err(BuildError::InvalidConfiguration {
                message: format!("First entity id must be positive, got {}", self.first_entity_id),
            });
        }

        if self.first_tenant_id < 1 {
            return Err(BuildError::InvalidConfiguration {
                message: format!("First tenant id must be positive, got {}", self.first_tenant_id),
            });
        }

        Ok(())
    }
}

/// A kind waiting to be registered at build time.
struct PendingKind {
    type_id: TypeId,
    name: &'static str,
    path: &'static str,
    references: &'static [&'static str],
    register: fn(&Arc<IdSequence>, &[Arc<dyn ReferenceSource>]) -> KindRegistration,
}

/// Builder for configuring and creating [`RosterServer`] instances.
///
/// # Examples
///
/// ```rust
/// use roster_server::RosterServerBuilder;
/// use roster_server::entity::{Skill, Spot};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let server = RosterServerBuilder::new()
///     .with_base_path("/api")
///     .with_kind::<Skill>()
///     .with_kind::<Spot>()
///     .build()?;
///
/// assert_eq!(server.kinds(), vec!["Skill", "Spot"]);
/// # Ok(())
/// # }
/// ```
pub struct RosterServerBuilder {
    config: RosterServerConfig,
    kinds: Vec<PendingKind>,
}

impl RosterServerBuilder {
    /// Create a builder with default configuration and no kinds.
    pub fn new() -> Self {
        Self {
            config: RosterServerConfig::default(),
            kinds: Vec::new(),
        }
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: RosterServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the route prefix.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.config.base_path = base_path.into();
        self
    }

    /// Register an entity kind backed by an in-memory store.
    pub fn with_kind<K: EntityKind>(mut self) -> Self {
        self.kinds.push(PendingKind {
            type_id: TypeId::of::<K>(),
            name: K::NAME,
            path: K::PATH,
            references: K::REFERENCES,
            register: register_in_memory::<K>,
        });
        self
    }

    /// Register the rostering kinds: Skill, Spot and Contract.
    pub fn with_standard_kinds(self) -> Self {
        self.with_kind::<Skill>()
            .with_kind::<Spot>()
            .with_kind::<Contract>()
    }

    /// Build the server.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] if the configuration is invalid, if two kinds
    /// share a type, a name or a route segment, if a kind is named like the
    /// tenant registry, or if a kind references a kind not registered before
    /// it.
    pub fn build(self) -> Result<RosterServer, BuildError> {
        self.config.validate()?;

        let mut types = HashSet::new();
        let mut names: HashSet<&'static str> = HashSet::new();
        let mut paths = HashSet::new();
        for kind in &self.kinds {
            if kind.name == Tenant::KIND {
                return Err(BuildError::ReservedKind { kind: kind.name });
            }
            if let Some(missing) = kind.references.iter().find(|name| !names.contains(*name)) {
                return Err(BuildError::UnresolvedReference {
                    kind: kind.name,
                    references: *missing,
                });
            }
            if !types.insert(kind.type_id) || !names.insert(kind.name) {
                return Err(BuildError::DuplicateKind { kind: kind.name });
            }
            if !paths.insert(kind.path) {
                return Err(BuildError::DuplicateRoute { path: kind.path });
            }
        }

        let ids = Arc::new(IdSequence::starting_at(self.config.first_entity_id));
        let mut sources: Vec<Arc<dyn ReferenceSource>> = Vec::with_capacity(self.kinds.len());
        let mut registrations = Vec::with_capacity(self.kinds.len());
        for kind in &self.kinds {
            debug!("Registering entity kind {} at '{}'", kind.name, kind.path);
            let registration = (kind.register)(&ids, &sources);
            sources.push(Arc::clone(&registration.source));
            registrations.push(registration);
        }

        Ok(RosterServer::assemble(self.config, ids, registrations))
    }
}

impl Default for RosterServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
