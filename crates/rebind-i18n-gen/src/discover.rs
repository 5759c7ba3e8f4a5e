//! Loading an interface's properties bundles from a directory.

use std::path::{Path, PathBuf};

use rebind_i18n::discovery::{PROPERTIES_EXTENSION, descriptor_from_named_properties};
use rebind_i18n::{InterfaceId, ResourceSet};

use crate::error::{GenerateError, Result};
use crate::source::{InterfaceBundle, InterfaceKind};

/// Collect `<Simple>.properties` and `<Simple>_<locale>.properties` from
/// `dir` into a bundle. Files for other interfaces are ignored.
pub fn bundle_from_dir(
    dir: impl AsRef<Path>,
    interface: impl Into<InterfaceId>,
    kind: InterfaceKind,
) -> Result<InterfaceBundle> {
    let dir = dir.as_ref();
    let interface = interface.into();
    let io_error = |path: &Path, source: std::io::Error| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    };

    let entries = std::fs::read_dir(dir).map_err(|e| io_error(dir, e))?;
    let paths = matching_paths(dir, entries.map(|e| e.map(|e| e.path())), &interface)?;

    let mut set = ResourceSet::empty(interface.clone());
    for path in &paths {
        let text = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        set.insert(descriptor_from_named_properties(&interface, file_name, &text)?)?;
    }

    tracing::debug!(
        interface = %interface,
        dir = %dir.display(),
        resources = set.len(),
        "loaded properties bundle"
    );
    Ok(InterfaceBundle::new(kind, set))
}

/// Sorted paths of `interface`'s files. A failed directory entry fails the
/// whole listing.
fn matching_paths<I>(dir: &Path, entries: I, interface: &InterfaceId) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = std::io::Result<PathBuf>>,
{
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|source| GenerateError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        if belongs_to(&path, interface) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn belongs_to(path: &Path, interface: &InterfaceId) -> bool {
    if path.extension().and_then(|e| e.to_str()) != Some(PROPERTIES_EXTENSION) {
        return false;
    }
    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return false;
    };
    let simple = interface.simple_name();
    stem == simple
        || stem
            .strip_prefix(simple)
            .is_some_and(|rest| rest.starts_with('_'))
}
