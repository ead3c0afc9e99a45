use crate::error::{DocgrepError, Result};
use ignore::{DirEntry, WalkBuilder};
use std::path::Path;

/// Depth-first walk below `path`, root excluded.
///
/// Non-recursive walks list the root's own entries and never descend. Ignore
/// files and hidden-file rules only apply when `respect_ignore` is set.
pub fn walk_dir(
    path: &Path,
    recursive: bool,
    respect_ignore: bool,
) -> impl Iterator<Item = Result<DirEntry>> {
    let max_depth = if recursive { None } else { Some(1) };
    WalkBuilder::new(path)
        .hidden(respect_ignore)
        .parents(respect_ignore)
        .git_global(respect_ignore)
        .git_ignore(respect_ignore)
        .git_exclude(respect_ignore)
        .ignore(respect_ignore)
        .max_depth(max_depth)
        .build()
        .map(|entry| entry.map_err(DocgrepError::from))
        .filter(|entry| !matches!(entry, Ok(e) if e.depth() == 0))
}
