//! Core roster server structure.

use crate::admin::AdminService;
use crate::entity::EntityKind;
use crate::error::BuildError;
use crate::server::builder::{RosterServerBuilder, RosterServerConfig};
use crate::service::{EntityService, KindEndpoint, TenantService};
use crate::storage::{ErasableStore, IdSequence, InMemoryStore, ReferenceSource, TenantRegistry};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// Typed service for kind `K` as wired by the server.
pub type InMemoryService<K> = EntityService<K, InMemoryStore<K>>;

/// Everything the server keeps for one registered kind.
pub(crate) struct KindRegistration {
    pub(crate) type_id: TypeId,
    pub(crate) service: Arc<dyn Any + Send + Sync>,
    pub(crate) endpoint: Arc<dyn KindEndpoint>,
    pub(crate) store: Arc<dyn ErasableStore>,
    pub(crate) source: Arc<dyn ReferenceSource>,
}

/// Create the in-memory store and service for kind `K`.
///
/// `registered` holds the stores of the kinds registered before `K`; the
/// ones named in `K::REFERENCES` are attached to the service.
pub(crate) fn register_in_memory<K: EntityKind>(
    ids: &Arc<IdSequence>,
    registered: &[Arc<dyn ReferenceSource>],
) -> KindRegistration {
    let store = InMemoryStore::<K>::with_sequence(Arc::clone(ids));
    let references = registered
        .iter()
        .filter(|source| K::REFERENCES.contains(&source.kind()))
        .cloned()
        .collect();
    let service = Arc::new(EntityService::new(store.clone()).with_references(references));

    KindRegistration {
        type_id: TypeId::of::<K>(),
        service: Arc::clone(&service) as Arc<dyn Any + Send + Sync>,
        endpoint: service,
        store: Arc::new(store.clone()),
        source: Arc::new(store),
    }
}

/// A configured rostering back end.
///
/// The server owns one service per registered entity kind, the tenant
/// service and the reset service. All kinds draw ids from the same
/// sequence, so an id identifies at most one entity across the system.
///
/// # Examples
///
/// ```rust
/// use roster_server::RosterServer;
/// use roster_server::context::RequestContext;
/// use roster_server::entity::{Record, Skill, TenantId};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let server = RosterServer::standard()?;
/// let skills = server.service::<Skill>().ok_or("Skill is registered")?;
///
/// let ctx = RequestContext::with_generated_id();
/// let skill = skills
///     .create(TenantId::new(1), Record::new(1, Skill::new("welding")), &ctx)
///     .await?;
/// assert_eq!(skill.version, Some(0));
/// # Ok(())
/// # }
/// ```
pub struct RosterServer {
    config: RosterServerConfig,
    ids: Arc<IdSequence>,
    services: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
    endpoints: Vec<Arc<dyn KindEndpoint>>,
    tenants: TenantService,
    admin: AdminService,
}

impl RosterServer {
    /// Server with the rostering kinds and default configuration.
    pub fn standard() -> Result<Self, BuildError> {
        Self::with_config(RosterServerConfig::default())
    }

    /// Server with the rostering kinds and the given configuration.
    pub fn with_config(config: RosterServerConfig) -> Result<Self, BuildError> {
        RosterServerBuilder::new()
            .with_config(config)
            .with_standard_kinds()
            .build()
    }

    /// Start configuring a server.
    pub fn builder() -> RosterServerBuilder {
        RosterServerBuilder::new()
    }

    pub(crate) fn assemble(
        config: RosterServerConfig,
        ids: Arc<IdSequence>,
        registrations: Vec<KindRegistration>,
    ) -> Self {
        let registry = TenantRegistry::starting_at(config.first_tenant_id);

        let mut services = HashMap::new();
        let mut endpoints = Vec::with_capacity(registrations.len());
        let mut stores: Vec<Arc<dyn ErasableStore>> = Vec::with_capacity(registrations.len() + 1);
        for registration in registrations {
            services.insert(registration.type_id, registration.service);
            endpoints.push(registration.endpoint);
            stores.push(registration.store);
        }
        // Locks are taken in this order by reset and tenant removal.
        stores.push(Arc::new(registry.clone()));

        Self {
            config,
            ids,
            services,
            endpoints,
            tenants: TenantService::new(registry, stores.clone()),
            admin: AdminService::new(stores),
        }
    }

    /// The configuration the server was built with.
    pub fn config(&self) -> &RosterServerConfig {
        &self.config
    }

    /// The id sequence shared by every kind.
    pub fn id_sequence(&self) -> &Arc<IdSequence> {
        &self.ids
    }

    /// Typed lifecycle service for kind `K`, if registered.
    pub fn service<K: EntityKind>(&self) -> Option<Arc<InMemoryService<K>>> {
        let service = self.services.get(&TypeId::of::<K>())?;
        Arc::clone(service).downcast::<InMemoryService<K>>().ok()
    }

    /// Kind-erased endpoint for a route segment, if registered.
    pub fn endpoint(&self, path_segment: &str) -> Option<Arc<dyn KindEndpoint>> {
        self.endpoints
            .iter()
            .find(|endpoint| endpoint.path_segment() == path_segment)
            .cloned()
    }

    /// Names of the registered kinds, in registration order.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.endpoints
            .iter()
            .map(|endpoint| endpoint.kind_name())
            .collect()
    }

    pub fn tenants(&self) -> &TenantService {
        &self.tenants
    }

    pub fn admin(&self) -> &AdminService {
        &self.admin
    }
}
