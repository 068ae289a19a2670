//! Error types for roster operations.
//!
//! [`RosterError`] is the single failure type surfaced by the lifecycle
//! services and the operation handler. Its `Display` output is the exact
//! message sent to clients, and [`RosterError::class`] is the stable tag
//! reported next to it.

use crate::entity::{EntityId, TenantId};
use crate::storage::StorageError;

/// Which call site reported a missing entity.
///
/// Read and update paths render the same condition with different templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Lookup by id for read or delete.
    Read,
    /// Lookup of the record an update targets.
    Update,
}

fn not_found_message(kind: &str, id: &str, lookup: &Lookup) -> String {
    match lookup {
        Lookup::Read => format!("No {} entity found with ID ({}).", kind, id),
        Lookup::Update => format!("{} entity with ID ({}) not found.", kind, id),
    }
}

/// Main error type for roster operations.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// The referenced entity id does not exist for this kind
    #[error("{}", not_found_message(.kind, .id, .lookup))]
    NotFound {
        kind: &'static str,
        id: String,
        lookup: Lookup,
    },

    /// The tenant embedded in a payload, or owning a stored entity, differs
    /// from the tenant of the call
    #[error(
        "The tenantId ({path_tenant}) does not match the persistable ({label})'s tenantId ({entity_tenant})."
    )]
    TenantMismatch {
        path_tenant: TenantId,
        label: String,
        entity_tenant: TenantId,
    },

    /// An update tried to move an existing entity to another tenant
    #[error("{kind} entity with tenantId ({tenant_id}) cannot change tenants.")]
    TenantChangeForbidden {
        kind: &'static str,
        tenant_id: TenantId,
    },

    /// Field-level validation failure
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The update was based on a stale version of the entity
    #[error(
        "{kind} entity with ID ({id}) has version ({actual}) but the request expected version ({expected})."
    )]
    VersionConflict {
        kind: &'static str,
        id: EntityId,
        expected: u64,
        actual: u64,
    },

    /// The storage backend failed; never conflated with the domain failures
    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),

    /// JSON serialization of a response failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The request could not be understood (missing or malformed body)
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// No route matches the method and path
    #[error("No route found for {method} {path}")]
    RouteNotFound { method: String, path: String },
}

impl RosterError {
    /// Create a not-found error for a read or delete lookup.
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
            lookup: Lookup::Read,
        }
    }

    /// Create a not-found error for the target of an update.
    pub fn update_target_not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
            lookup: Lookup::Update,
        }
    }

    /// Create a tenant mismatch error.
    pub fn tenant_mismatch(
        path_tenant: TenantId,
        label: impl Into<String>,
        entity_tenant: TenantId,
    ) -> Self {
        Self::TenantMismatch {
            path_tenant,
            label: label.into(),
            entity_tenant,
        }
    }

    /// Create a tenant change error.
    pub fn tenant_change_forbidden(kind: &'static str, tenant_id: TenantId) -> Self {
        Self::TenantChangeForbidden { kind, tenant_id }
    }

    /// Create an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create a route not found error.
    pub fn route_not_found(method: impl ToString, path: impl Into<String>) -> Self {
        Self::RouteNotFound {
            method: method.to_string(),
            path: path.into(),
        }
    }

    /// Stable taxonomy tag reported as `exceptionClass`.
    pub fn class(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NotFound",
            Self::TenantMismatch { .. } => "TenantMismatch",
            Self::TenantChangeForbidden { .. } => "TenantChangeForbidden",
            Self::Validation(_) => "ValidationFailure",
            Self::VersionConflict { .. } => "VersionConflict",
            Self::Storage(_) => "StorageFailure",
            Self::Json(_) => "SerializationFailure",
            Self::InvalidRequest { .. } => "InvalidRequest",
            Self::RouteNotFound { .. } => "RouteNotFound",
        }
    }

    /// Whether repeating the request may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Storage(storage) if storage.is_transient())
    }

    /// HTTP status the transport adapter answers with.
    ///
    /// Domain validation failures surface as 500, not 400/409. Clients of the
    /// rostering API depend on that.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } | Self::RouteNotFound { .. } => 404,
            Self::InvalidRequest { .. } => 400,
            Self::TenantMismatch { .. }
            | Self::TenantChangeForbidden { .. }
            | Self::Validation(_)
            | Self::VersionConflict { .. }
            | Self::Storage(_)
            | Self::Json(_) => 500,
        }
    }
}

/// Field-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Name is empty or whitespace
    #[error("{kind} cannot have an empty name.")]
    EmptyName { kind: &'static str },

    /// Name already used by another entity of the same kind in the tenant
    #[error("Name ({name}) is already taken by another {kind}.")]
    DuplicateName { kind: &'static str, name: String },

    /// Update view carries no id
    #[error("{kind} entity cannot be updated without an ID.")]
    MissingId { kind: &'static str },

    /// Kind-specific field rule
    #[error("{kind} field ({field}) is invalid: {message}.")]
    InvalidField {
        kind: &'static str,
        field: String,
        message: String,
    },
}

impl ValidationError {
    pub fn empty_name(kind: &'static str) -> Self {
        Self::EmptyName { kind }
    }

    pub fn duplicate_name(kind: &'static str, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            kind,
            name: name.into(),
        }
    }

    pub fn missing_id(kind: &'static str) -> Self {
        Self::MissingId { kind }
    }

    pub fn invalid_field(
        kind: &'static str,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            kind,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur while building a server.
///
/// These are programming errors and should surface during development.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Invalid configuration provided
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// The same entity kind was registered twice
    #[error("Entity kind '{kind}' is registered more than once")]
    DuplicateKind { kind: &'static str },

    /// Two kinds share a route segment
    #[error("Route segment '{path}' is used by more than one entity kind")]
    DuplicateRoute { path: &'static str },

    /// The kind name is taken by the tenant registry
    #[error("Entity kind name '{kind}' is reserved")]
    ReservedKind { kind: &'static str },

    /// A kind references a kind that is not registered before it
    #[error("Entity kind '{kind}' references '{references}', which must be registered first")]
    UnresolvedReference {
        kind: &'static str,
        references: &'static str,
    },
}

/// Result type for roster operations.
pub type RosterResult<T> = Result<T, RosterError>;
