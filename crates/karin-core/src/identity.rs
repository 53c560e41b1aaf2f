//! # Case, Tenant & Deadline Identifiers
//!
//! Newtypes for the identifiers that cross the engine's boundary. Case
//! and tenant ids are assigned by the intake application (document-store
//! keys), so they are opaque strings validated only for non-emptiness.
//! Deadline ids are derived deterministically from the case id and the
//! catalog template key, so recomputing a case's deadlines yields stable
//! ids the caller can persist and reference across reads.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// -- Validating Deserialize for CaseId ----------------------------------------

impl<'de> Deserialize<'de> for CaseId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// A case identifier assigned by the intake application.
///
/// # Validation
///
/// Must be a non-empty string. No further format restrictions are imposed
/// because the upstream document store generates opaque keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CaseId(String);

impl CaseId {
    /// Create a case identifier from a string, validating non-emptiness.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidCaseId`] if the string is empty
    /// or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidCaseId);
        }
        Ok(Self(trimmed))
    }

    /// Access the case identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// -- Validating Deserialize for TenantId --------------------------------------

impl<'de> Deserialize<'de> for TenantId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// A tenant (client organization) identifier.
///
/// Every case belongs to exactly one tenant; deadline computation never
/// crosses tenant boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TenantId(String);

impl TenantId {
    /// Create a tenant identifier from a string, validating non-emptiness.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTenantId`] if the string is empty
    /// or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidTenantId);
        }
        Ok(Self(trimmed))
    }

    /// Access the tenant identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A deadline instance identifier.
///
/// Deterministic form `<case-id>:<template-key>`, e.g.
/// `case-4f2a:notificacion_dt`. Stable across recomputation of the same
/// case so completion and extension operations can reference instances
/// persisted on a previous read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeadlineId(String);

impl DeadlineId {
    /// Derive the identifier for a template instantiated on a case.
    pub fn for_case(case_id: &CaseId, template_key: &str) -> Self {
        Self(format!("{}:{}", case_id.as_str(), template_key))
    }

    /// Wrap an existing identifier string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDeadlineId`] if the string is
    /// empty or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidDeadlineId);
        }
        Ok(Self(trimmed))
    }

    /// Access the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeadlineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
