//! Up-to-date check for generated sources.

use std::{
    fs, io,
    path::Path,
    time::{Duration, SystemTime},
};

/// Returns true if `destination` already holds output newer than every schema
/// file.
///
/// The newest file anywhere beneath `destination` is compared against each
/// schema file's modification time; `stale` widens the window by treating
/// generated output as that much older than it is. An empty or missing
/// destination is never up to date.
pub fn is_up_to_date<'a, I>(
    schema_files: I,
    destination: &Path,
    stale: Duration,
) -> io::Result<bool>
where
    I: IntoIterator<Item = &'a Path>,
{
    let Some(newest_output) = newest_modification(destination)? else {
        return Ok(false);
    };
    let threshold = newest_output.checked_sub(stale).unwrap_or(SystemTime::UNIX_EPOCH);

    for file in schema_files {
        if fs::metadata(file)?.modified()? > threshold {
            return Ok(false);
        }
    }
    Ok(true)
}

fn newest_modification(dir: &Path) -> io::Result<Option<SystemTime>> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let mut newest: Option<SystemTime> = None;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let candidate = if entry.file_type()?.is_dir() {
            newest_modification(&entry.path())?
        } else {
            Some(entry.metadata()?.modified()?)
        };
        newest = newest.max(candidate);
    }
    Ok(newest)
}
