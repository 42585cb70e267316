//! Import-search path containment checks.

use std::path::Path;

/// Returns true if some directory in `search_path` is an ancestor of `file`.
///
/// The walk starts at the file's parent directory and climbs one level at a
/// time until a registered directory matches or the filesystem root is
/// passed. Comparison is on path components, so `idl` and `idl/` match but
/// `idl` does not match `idl-extra`.
pub fn is_in_search_path<'a, I>(file: &Path, search_path: I) -> bool
where
    I: IntoIterator<Item = &'a Path>,
    I::IntoIter: Clone,
{
    let dirs = search_path.into_iter();
    let Some(parent) = file.parent() else {
        return false;
    };

    parent
        .ancestors()
        .any(|ancestor| dirs.clone().any(|dir| dir == ancestor))
}
