//! Error — failures surfaced by the logs provider.

use std::fmt;

use thiserror::Error;

use crate::store::StoreError;

/// Operation categories the provider refuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetType,
    Insert,
    Update,
    Delete,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::GetType => "getType",
            Operation::Insert => "insert",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Cannot query unknown URI {uri}")]
    UnrecognizedRoute { uri: String },
    #[error("Only read operations allowed ({operation} rejected)")]
    OperationNotSupported { operation: Operation },
    #[error("No log store attached to the provider")]
    ContextUnavailable,
    #[error("Log store error: {0}")]
    Store(#[from] StoreError),
}

impl ProviderError {
    /// Both the unknown-route and the disabled-operation case are reported
    /// to callers as an unsupported operation.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            ProviderError::UnrecognizedRoute { .. } | ProviderError::OperationNotSupported { .. }
        )
    }
}
