//! Tenant-scoped entity model.
//!
//! Every persisted domain object shares the same envelope, [`Record`], which
//! carries the system-wide identity, the optimistic-locking version and the
//! owning tenant. The kind-specific fields are flattened into the same JSON
//! object, so a Skill travels on the wire as:
//!
//! ```json
//! { "id": 42, "version": 0, "tenantId": 1, "name": "skill" }
//! ```
//!
//! Kinds plug into the generic lifecycle by implementing [`EntityKind`].

mod contract;
mod skill;
mod spot;
mod tenant;

pub use contract::Contract;
pub use skill::Skill;
pub use spot::Spot;
pub use tenant::Tenant;

use crate::error::ValidationError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a tenant, the isolation boundary for every entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(i32);

impl TenantId {
    /// Wrap a raw tenant identifier.
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// The raw identifier.
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for TenantId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl FromStr for TenantId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// System-wide entity identifier.
///
/// Identifiers are unique across every tenant and every entity kind, so an
/// id alone is enough to find a record. Finding it does not grant access
/// to it: the tenant check still applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(i64);

impl EntityId {
    /// Wrap a raw entity identifier.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// The raw identifier.
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for EntityId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Descriptor of an entity kind.
///
/// Implementors supply the kind name used in error messages, the route
/// segment used by the operation handler, and the field rules. The
/// lifecycle ordering rules live once, in
/// [`EntityService`](crate::service::EntityService), and apply to every kind.
pub trait EntityKind:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Kind name rendered into messages, e.g. `Skill`.
    const NAME: &'static str;

    /// Route segment, e.g. `skill` in `/tenant/{tenantId}/skill/{id}`.
    const PATH: &'static str;

    /// Names of the kinds whose ids this kind may hold.
    ///
    /// A server registers the referenced kinds before this one.
    const REFERENCES: &'static [&'static str] = &[];

    /// The entity's name. Names are unique within a tenant.
    fn name(&self) -> &str;

    /// Human label used in tenant-mismatch messages.
    fn label(&self) -> String {
        self.name().to_string()
    }

    /// Kind-specific field rules, checked before create and update.
    fn validate(&self) -> Result<(), ValidationError> {
        if self.name().trim().is_empty() {
            return Err(ValidationError::empty_name(Self::NAME));
        }
        Ok(())
    }

    /// Ids of other entities this entity points at, with their kind names.
    ///
    /// Each referenced entity must exist and belong to the same tenant.
    fn references(&self) -> Vec<(&'static str, EntityId)> {
        Vec::new()
    }

    /// Copy the updatable fields of `self` onto a persisted entity.
    fn apply(&self, target: &mut Self) {
        *target = self.clone();
    }
}

/// A tenant-scoped entity, both as persisted and as the wire-level view.
///
/// A view sent for creation has no `id`; the store assigns one exactly once.
/// `tenant_id` is fixed at creation and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record<T> {
    /// Identity, absent before first persistence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    /// Optimistic-locking version, 0 on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Kind-specific fields.
    #[serde(flatten)]
    pub fields: T,
}

/// Wire-level representation used for create and update requests.
pub type View<T> = Record<T>;

impl<T: EntityKind> Record<T> {
    /// Create a view without identity, ready to be passed to `create`.
    pub fn new(tenant_id: impl Into<TenantId>, fields: T) -> Self {
        Self {
            id: None,
            version: None,
            tenant_id: tenant_id.into(),
            fields,
        }
    }

    /// Set the identity, for update views.
    pub fn with_id(mut self, id: impl Into<EntityId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the expected version, for conditional updates.
    pub fn with_version(mut self, version: u64) -> Self {
        self.version = Some(version);
        self
    }

    /// Label of the wrapped fields.
    pub fn label(&self) -> String {
        self.fields.label()
    }
}
