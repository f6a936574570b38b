//! Path containment checks for filesystem-backed identifiers.

use std::path::{Component, Path, PathBuf};

/// Validate a file identifier and turn it into a relative path.
///
/// Purely lexical: no filesystem access. Rejects identifiers that are empty,
/// contain null bytes or backslashes, are absolute, or contain `..` segments.
/// `.` segments are dropped.
pub(crate) fn relative_path(file_id: &str) -> Result<PathBuf, String> {
    if file_id.is_empty() {
        return Err("identifier is empty".to_string());
    }
    if file_id.contains('\0') {
        return Err("identifier contains null bytes".to_string());
    }
    if file_id.contains('\\') {
        return Err("identifier contains backslashes".to_string());
    }

    let mut relative = PathBuf::new();
    for component in Path::new(file_id).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                return Err("parent directory segments are not allowed".to_string());
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err("absolute paths are not allowed".to_string());
            }
        }
    }

    if relative.as_os_str().is_empty() {
        return Err("identifier does not name a file".to_string());
    }
    Ok(relative)
}

/// Verify that `full` does not leave `root` through a symlink.
///
/// Canonicalizes the deepest existing ancestor of `full` (the path itself if it
/// exists) and checks it against the canonical root. Only metadata is read.
/// A root that does not exist yet cannot contain an escaping link.
pub(crate) fn ensure_contained(root: &Path, full: &Path) -> Result<(), String> {
    let Ok(canonical_root) = root.canonicalize() else {
        return Ok(());
    };

    for ancestor in full.ancestors() {
        if let Ok(canonical) = ancestor.canonicalize() {
            if canonical.starts_with(&canonical_root) {
                return Ok(());
            }
            return Err(format!(
                "resolves to {} outside the storage root",
                canonical.display()
            ));
        }
    }

    Ok(())
}
