//! Storage error types.

/// Storage operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageOperation {
    /// Opening a stored file for reading
    #[display("open")]
    Open,
    /// Creating a new stored file
    #[display("save")]
    Save,
    /// Removing a stored file
    #[display("delete")]
    Delete,
    /// Reading the byte size of a stored file
    #[display("get size of")]
    GetSize,
    /// Preparing a stored file for delivery to a client
    #[display("send")]
    SendFile,
    /// Materialising a stored file on the local filesystem
    #[display("get local path of")]
    GetLocalPath,
}

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// No file exists for the identifier
    #[display("file not found")]
    NotFound,
    /// A file with this name already exists
    #[display("a file with this name already exists")]
    AlreadyExists,
    /// The backend does not allow writes
    #[display("storage is read-only")]
    ReadOnly,
    /// The identifier is not a valid path inside the storage root
    #[display("invalid path: {}", _0)]
    InvalidPath(String),
    /// Permission denied when accessing storage
    #[display("permission denied")]
    PermissionDenied,
    /// Any other I/O failure
    #[display("I/O failure")]
    Io,
}

/// Storage error with operation context and location tracking.
///
/// Every fault raised by a storage backend is reported as a `StorageError`
/// carrying the failing operation, the file identifier (or save name) and,
/// when there is one, the underlying I/O error as [`std::error::Error::source`].
///
/// # Examples
///
/// ```
/// use depot_error::{StorageError, StorageErrorKind, StorageOperation};
///
/// let err = StorageError::new(StorageOperation::Open, "a/b.txt", StorageErrorKind::NotFound);
/// assert!(err.is_not_found());
/// assert!(format!("{}", err).contains("Could not open \"a/b.txt\""));
/// ```
#[derive(Debug, derive_more::Display)]
#[display(
    "Storage Error: Could not {} \"{}\": {}{} at line {} in {}",
    operation,
    target,
    kind,
    source.as_ref().map(|e| format!(" ({e})")).unwrap_or_default(),
    line,
    file
)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// The operation that failed
    pub operation: StorageOperation,
    /// File identifier or save name the operation was called with
    pub target: String,
    /// Underlying I/O error, if any
    pub source: Option<std::io::Error>,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(
        operation: StorageOperation,
        target: impl Into<String>,
        kind: StorageErrorKind,
    ) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            operation,
            target: target.into(),
            source: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Wrap an I/O error, classifying it into a [`StorageErrorKind`].
    #[track_caller]
    pub fn io(operation: StorageOperation, target: impl Into<String>, err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::AlreadyExists => StorageErrorKind::AlreadyExists,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Io,
        };
        let mut error = Self::new(operation, target, kind);
        error.source = Some(err);
        error
    }

    /// Attempted mutation of a read-only backend.
    #[track_caller]
    pub fn read_only(operation: StorageOperation, target: impl Into<String>) -> Self {
        Self::new(operation, target, StorageErrorKind::ReadOnly)
    }

    /// Identifier rejected by path containment checks.
    #[track_caller]
    pub fn invalid_path(
        operation: StorageOperation,
        target: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(operation, target, StorageErrorKind::InvalidPath(reason.into()))
    }

    /// Report this error as a failure of `operation`, keeping kind and cause.
    pub fn during(mut self, operation: StorageOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Whether the backend refused a write because it is read-only.
    pub fn is_read_only(&self) -> bool {
        self.kind == StorageErrorKind::ReadOnly
    }

    /// Whether the file did not exist.
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }

    /// Whether a save collided with an existing file.
    pub fn is_already_exists(&self) -> bool {
        self.kind == StorageErrorKind::AlreadyExists
    }

    /// Whether the identifier failed path validation.
    pub fn is_invalid_path(&self) -> bool {
        matches!(self.kind, StorageErrorKind::InvalidPath(_))
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for operations on a storage backend.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn io_errors_are_classified() {
        let err = StorageError::io(
            StorageOperation::Delete,
            "x",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(err.is_not_found());

        let err = StorageError::io(
            StorageOperation::Save,
            "x",
            std::io::Error::from(std::io::ErrorKind::AlreadyExists),
        );
        assert!(err.is_already_exists());

        let err = StorageError::io(
            StorageOperation::Open,
            "x",
            std::io::Error::other("disk on fire"),
        );
        assert_eq!(err.kind, StorageErrorKind::Io);
    }

    #[test]
    fn cause_is_preserved_as_source() {
        let err = StorageError::io(
            StorageOperation::GetSize,
            "reports/q3.pdf",
            std::io::Error::other("disk on fire"),
        );
        let source = err.source().expect("io cause");
        assert_eq!(source.to_string(), "disk on fire");

        let message = err.to_string();
        assert!(message.contains("Could not get size of \"reports/q3.pdf\""));
        assert!(message.contains("disk on fire"));
    }

    #[test]
    fn during_keeps_kind_and_cause() {
        let err = StorageError::io(
            StorageOperation::Open,
            "a.txt",
            std::io::Error::from(std::io::ErrorKind::NotFound),
        )
        .during(StorageOperation::GetLocalPath);
        assert_eq!(err.operation, StorageOperation::GetLocalPath);
        assert!(err.is_not_found());
        assert!(err.source().is_some());
        assert!(err.to_string().contains("Could not get local path of \"a.txt\""));
    }

    #[test]
    fn read_only_has_no_source() {
        let err = StorageError::read_only(StorageOperation::Save, "a.txt");
        assert!(err.is_read_only());
        assert!(err.source().is_none());
        assert_eq!(err.line, line!() - 3);
        assert!(err.file.ends_with("storage.rs"));
    }
}
