//! Scoped backup and restore of the canonical configuration file.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::ports::CoreError;

/// Extension that replaces the original one on the backup copy.
pub const BACKUP_SUFFIX: &str = "backup.xml";

/// Sibling path used for the backup of `path`.
///
/// The stem is kept and the extension replaced, so `walker.xml` is backed
/// up to `walker.backup.xml`.
pub fn backup_path_for(path: &Path) -> PathBuf {
    path.with_extension(BACKUP_SUFFIX)
}

/// Copy `path` to its backup location and return a guard that owns it.
///
/// An existing backup file is left alone and reported as
/// [`CoreError::StaleBackup`]: after an interrupted sweep it is the only
/// copy of the original. The source file is never touched.
pub fn backup(path: &Path) -> Result<ConfigBackup, CoreError> {
    let backup_path = backup_path_for(path);
    let mut source = File::open(path).map_err(|e| CoreError::io(path, e))?;

    let mut target = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&backup_path)
    {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(CoreError::StaleBackup {
                backup: backup_path,
            });
        }
        Err(e) => return Err(CoreError::io(&backup_path, e)),
    };

    if let Err(e) = io::copy(&mut source, &mut target).and_then(|_| target.sync_all()) {
        drop(target);
        // Partial copy; the canonical file is still intact.
        let _ = fs::remove_file(&backup_path);
        return Err(CoreError::io(&backup_path, e));
    }
    debug!(
        "Backed up {} to {}",
        path.display(),
        backup_path.display()
    );

    Ok(ConfigBackup {
        original: path.to_path_buf(),
        backup: backup_path,
        armed: true,
    })
}

/// Guard over a live backup of the canonical configuration file.
///
/// Call [`ConfigBackup::restore`] on every exit path. If the guard is dropped
/// without that (a panic unwinding through the sweep), `Drop` restores on a
/// best-effort basis. The backup file is only removed once the canonical
/// file has been overwritten successfully.
#[derive(Debug)]
#[must_use = "the configuration file stays modified unless the backup is restored"]
pub struct ConfigBackup {
    original: PathBuf,
    backup: PathBuf,
    armed: bool,
}

impl ConfigBackup {
    /// Canonical configuration path.
    pub fn original_path(&self) -> &Path {
        &self.original
    }

    /// Location of the backup copy.
    pub fn backup_path(&self) -> &Path {
        &self.backup
    }

    /// Copy the backup over the canonical file, then delete the backup.
    ///
    /// If the copy fails the backup is left in place for manual recovery.
    pub fn restore(mut self) -> Result<(), CoreError> {
        self.armed = false;
        restore_files(&self.original, &self.backup)?;
        debug!("Restored {} from backup", self.original.display());
        Ok(())
    }
}

impl Drop for ConfigBackup {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(e) = restore_files(&self.original, &self.backup) {
            error!(
                "Failed to restore {} from {}: {}",
                self.original.display(),
                self.backup.display(),
                e
            );
        }
    }
}

fn restore_files(original: &Path, backup: &Path) -> Result<(), CoreError> {
    fs::copy(backup, original).map_err(|e| CoreError::io(backup, e))?;
    fs::remove_file(backup).map_err(|e| CoreError::io(backup, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("walker.xml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_backup_path_replaces_extension() {
        assert_eq!(
            backup_path_for(Path::new("/sim/walker.xml")),
            PathBuf::from("/sim/walker.backup.xml")
        );
        assert_eq!(
            backup_path_for(Path::new("walker")),
            PathBuf::from("walker.backup.xml")
        );
    }

    #[test]
    fn test_backup_then_restore_is_identity() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "<option gravity=\"0 0 -9.81\"/>\n");

        let guard = backup(&path).unwrap();
        let backup_path = guard.backup_path().to_path_buf();
        assert!(backup_path.exists());

        guard.restore().unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "<option gravity=\"0 0 -9.81\"/>\n"
        );
        assert!(!backup_path.exists());
    }

    #[test]
    fn test_restore_undoes_edits() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "original");

        let guard = backup(&path).unwrap();
        fs::write(&path, "edited").unwrap();
        guard.restore().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn test_backup_missing_file_fails_without_side_effects() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.xml");

        let err = backup(&path).unwrap_err();
        assert!(matches!(err, CoreError::Io { .. }));
        assert!(!backup_path_for(&path).exists());
    }

    #[test]
    fn test_existing_backup_is_never_overwritten() {
        let dir = TempDir::new().unwrap();
        // Left behind by an interrupted sweep: config edited, backup original.
        let path = write_config(&dir, "<option gravity=\"0 0 -3.71\"/>");
        let stale = backup_path_for(&path);
        fs::write(&stale, "<option gravity=\"0 0 -9.81\"/>").unwrap();

        let err = backup(&path).unwrap_err();
        assert!(matches!(err, CoreError::StaleBackup { ref backup } if *backup == stale));
        assert_eq!(
            fs::read_to_string(&stale).unwrap(),
            "<option gravity=\"0 0 -9.81\"/>"
        );
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "<option gravity=\"0 0 -3.71\"/>"
        );
    }

    #[test]
    fn test_drop_restores_when_not_restored_explicitly() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "original");

        {
            let _guard = backup(&path).unwrap();
            fs::write(&path, "edited").unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
        assert!(!backup_path_for(&path).exists());
    }

    #[test]
    fn test_restore_keeps_backup_when_copy_fails() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "original");
        let guard = backup(&path).unwrap();
        let backup_path = guard.backup_path().to_path_buf();

        // Replace the canonical file with a directory so the copy fails.
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(guard.restore().is_err());
        assert!(backup_path.exists());
    }
}
