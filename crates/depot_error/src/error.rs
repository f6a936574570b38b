//! Top-level error wrapper types.

use crate::{ConfigError, StorageError};

/// Every error a Depot operation can produce.
///
/// # Examples
///
/// ```
/// use depot_error::{DepotError, DepotErrorKind, ConfigError};
///
/// let err: DepotError = ConfigError::new("unknown backend type").into();
/// assert!(matches!(err.kind(), DepotErrorKind::Config(_)));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum DepotErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Storage error
    #[from(StorageError)]
    Storage(StorageError),
}

/// Depot error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Depot Error: {}", _0)]
pub struct DepotError(Box<DepotErrorKind>);

impl DepotError {
    /// Create a new error from a kind.
    pub fn new(kind: DepotErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &DepotErrorKind {
        &self.0
    }

    /// The wrapped storage error, if this is one.
    pub fn as_storage(&self) -> Option<&StorageError> {
        match self.kind() {
            DepotErrorKind::Storage(e) => Some(e),
            DepotErrorKind::Config(_) => None,
        }
    }

    /// The wrapped configuration error, if this is one.
    pub fn as_config(&self) -> Option<&ConfigError> {
        match self.kind() {
            DepotErrorKind::Config(e) => Some(e),
            DepotErrorKind::Storage(_) => None,
        }
    }
}

// Generic From implementation for any type that converts to DepotErrorKind
impl<T> From<T> for DepotError
where
    T: Into<DepotErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Depot operations.
pub type DepotResult<T> = std::result::Result<T, DepotError>;
