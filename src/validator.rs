//! Tenant and field rules for entity lifecycle operations.
//!
//! Every check here is pure: it looks at the path tenant, the client view and
//! the stored record handed to it, and either passes or returns the exact
//! [`RosterError`] the caller should surface. The lifecycle service decides
//! the order in which checks run; this module only decides what each check
//! means.

use crate::entity::{EntityId, EntityKind, Record, Tenant, TenantId};
use crate::error::{Lookup, RosterError, RosterResult, ValidationError};
use crate::storage::{ReferenceGuard, StorageError};

/// Tenant and field checks shared by every entity kind.
pub struct EntityValidator;

impl EntityValidator {
    /// A view submitted under a tenant path must name that tenant.
    pub fn check_payload_tenant<T: EntityKind>(
        tenant_id: TenantId,
        view: &Record<T>,
    ) -> RosterResult<()> {
        if view.tenant_id != tenant_id {
            return Err(RosterError::tenant_mismatch(
                tenant_id,
                view.label(),
                view.tenant_id,
            ));
        }
        Ok(())
    }

    /// Resolve a lookup, rendering a miss with the template for `lookup`.
    pub fn require_found<T: EntityKind>(
        id: EntityId,
        found: Option<&Record<T>>,
        lookup: Lookup,
    ) -> RosterResult<&Record<T>> {
        found.ok_or_else(|| match lookup {
            Lookup::Read => RosterError::not_found(T::NAME, id),
            Lookup::Update => RosterError::update_target_not_found(T::NAME, id),
        })
    }

    /// A stored record may only be read or deleted through its owner's path.
    pub fn check_ownership<T: EntityKind>(tenant_id: TenantId, found: &Record<T>) -> RosterResult<()> {
        if found.tenant_id != tenant_id {
            return Err(RosterError::tenant_mismatch(
                tenant_id,
                found.label(),
                found.tenant_id,
            ));
        }
        Ok(())
    }

    /// A stored record may not be updated through another tenant's path.
    pub fn check_tenant_unchanged<T: EntityKind>(
        tenant_id: TenantId,
        found: &Record<T>,
    ) -> RosterResult<()> {
        if found.tenant_id != tenant_id {
            return Err(RosterError::tenant_change_forbidden(T::NAME, found.tenant_id));
        }
        Ok(())
    }

    /// An update carrying a version must be based on the stored version.
    ///
    /// Views without a version are unconditional.
    pub fn check_version<T: EntityKind>(view: &Record<T>, found: &Record<T>) -> RosterResult<()> {
        let actual = found.version.unwrap_or_default();
        match view.version {
            Some(expected) if expected != actual => Err(RosterError::VersionConflict {
                kind: T::NAME,
                id: found.id.unwrap_or(EntityId::new(0)),
                expected,
                actual,
            }),
            _ => Ok(()),
        }
    }

    /// Kind-specific field rules.
    pub fn check_fields<T: EntityKind>(fields: &T) -> RosterResult<()> {
        fields.validate().map_err(RosterError::from)
    }

    /// Names are unique among the tenant's records of one kind.
    ///
    /// `exclude` skips the record being updated so that it does not collide
    /// with itself.
    pub fn check_unique_name<'a, T, I>(
        candidate: &T,
        siblings: I,
        exclude: Option<EntityId>,
    ) -> RosterResult<()>
    where
        T: EntityKind,
        I: IntoIterator<Item = &'a Record<T>>,
    {
        let taken = siblings
            .into_iter()
            .filter(|record| exclude.is_none() || record.id != exclude)
            .any(|record| record.fields.name() == candidate.name());

        if taken {
            return Err(ValidationError::duplicate_name(T::NAME, candidate.name()).into());
        }
        Ok(())
    }

    /// Every referenced entity exists and is owned by `tenant_id`.
    ///
    /// Existence is checked before ownership, as for reads.
    pub fn check_references<T: EntityKind>(
        tenant_id: TenantId,
        fields: &T,
        guards: &[Box<dyn ReferenceGuard>],
    ) -> RosterResult<()> {
        for (kind, id) in fields.references() {
            let guard = guards
                .iter()
                .find(|guard| guard.kind() == kind)
                .ok_or_else(|| {
                    StorageError::internal(format!(
                        "no {} store is attached to resolve references from {}",
                        kind,
                        T::NAME
                    ))
                })?;
            let (owner, label) = guard
                .resolve(id)
                .ok_or_else(|| RosterError::not_found(kind, id))?;
            if owner != tenant_id {
                return Err(RosterError::tenant_mismatch(tenant_id, label, owner));
            }
        }
        Ok(())
    }

    /// Tenant names must be present and unique.
    pub fn check_tenant_name<'a, I>(candidate: &Tenant, existing: I) -> RosterResult<()>
    where
        I: IntoIterator<Item = &'a Tenant>,
    {
        if candidate.name.trim().is_empty() {
            return Err(ValidationError::empty_name(Tenant::KIND).into());
        }
        if existing.into_iter().any(|tenant| tenant.name == candidate.name) {
            return Err(ValidationError::duplicate_name(Tenant::KIND, candidate.name.clone()).into());
        }
        Ok(())
    }
}
