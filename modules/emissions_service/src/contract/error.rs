//! Contract error types for the emissions service
//!
//! These errors are transport-agnostic and used for inter-module communication.

/// Emissions service domain errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmissionsError {
    /// Referenced type, recipe or inventory item does not exist
    NotFound {
        /// Resource kind (garment_type, fabric_block_type, ...)
        resource: String,
        /// Resource identifier
        id: String,
    },
    /// Conflict (duplicate name, ...)
    Conflict {
        /// Conflict reason
        reason: String,
    },
    /// Malformed create input
    Validation {
        /// Validation error message
        message: String,
    },
    /// LCA provider unreachable, rejected the request or returned garbage
    Upstream {
        /// Upstream failure description
        message: String,
    },
    /// Internal error
    Internal,
}

impl EmissionsError {
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for EmissionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { resource, id } => {
                write!(f, "{} not found: {}", resource, id)
            }
            Self::Conflict { reason } => {
                write!(f, "Conflict: {}", reason)
            }
            Self::Validation { message } => {
                write!(f, "Validation error: {}", message)
            }
            Self::Upstream { message } => {
                write!(f, "Upstream LCA error: {}", message)
            }
            Self::Internal => {
                write!(f, "Internal error")
            }
        }
    }
}

impl std::error::Error for EmissionsError {}
