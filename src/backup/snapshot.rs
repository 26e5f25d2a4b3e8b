//! Timestamped file copies.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Returns the backup path for `path` taken at `millis` since the Unix epoch:
/// `<path>.backup.<millis>`.
pub fn backup_path_at(path: &Path, millis: u128) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".backup.{}", millis));
    PathBuf::from(name)
}

/// Copies `path` to a timestamped sibling.
///
/// Returns `Ok(None)` if there is nothing to back up.
pub fn try_create_backup(path: &Path) -> Result<Option<PathBuf>> {
    match fs::metadata(path) {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::io("inspect", path, e)),
    }

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let backup = backup_path_at(path, millis);

    fs::copy(path, &backup).map_err(|e| Error::io("back up", path, e))?;
    info!(path = %path.display(), backup = %backup.display(), "created backup");
    Ok(Some(backup))
}

/// Copies `path` to a timestamped sibling, logging failures instead of
/// returning them.
pub fn create_backup(path: &Path) -> Option<PathBuf> {
    match try_create_backup(path) {
        Ok(backup) => backup,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not create backup");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_path_naming() {
        let path = backup_path_at(Path::new("res/values/styles.xml"), 1700000000123);
        assert_eq!(path, PathBuf::from("res/values/styles.xml.backup.1700000000123"));
    }

    #[test]
    fn test_backup_copies_content() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("styles.xml");
        fs::write(&target, "<resources/>").unwrap();

        let backup = create_backup(&target).expect("backup should be created");

        let name = backup.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("styles.xml.backup."));
        assert!(name["styles.xml.backup.".len()..].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(fs::read_to_string(&backup).unwrap(), "<resources/>");
        assert_eq!(fs::read_to_string(&target).unwrap(), "<resources/>");
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.xml");

        assert!(try_create_backup(&missing).unwrap().is_none());
        assert!(create_backup(&missing).is_none());
    }

    #[test]
    fn test_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        // A directory exists but cannot be copied as a file.
        let sub = dir.path().join("values");
        fs::create_dir(&sub).unwrap();

        assert!(try_create_backup(&sub).is_err());
        assert!(create_backup(&sub).is_none());
    }
}
