//! File persistence helpers.
//!
//! Handles loading and saving data files with owner-only permissions.

use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::StoreError;

// ============================================================================
// Default Paths
// ============================================================================

/// Directory holding the cache and output files, relative to the working directory.
pub const DATA_DIR: &str = "data";

/// Returns the default snapshot cache path.
pub fn default_cache_path() -> PathBuf {
    Path::new(DATA_DIR).join("membertools_data.json")
}

/// Returns the default roster output path.
pub fn default_output_path() -> PathBuf {
    Path::new(DATA_DIR).join("class_members.txt")
}

/// Returns the default config file path.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.yml")
}

// ============================================================================
// Security: File Permissions
// ============================================================================

/// Sets restrictive file permissions (0o600) on Unix systems.
///
/// The cache holds member names and contact details.
#[cfg(unix)]
async fn set_restrictive_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = tokio::fs::metadata(path).await?;
    let mut perms = metadata.permissions();
    perms.set_mode(0o600); // Owner read/write only
    tokio::fs::set_permissions(path, perms).await?;

    debug!(path = %path.display(), mode = "0600", "Set restrictive permissions");
    Ok(())
}

/// No-op for non-Unix systems.
#[cfg(not(unix))]
async fn set_restrictive_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

// ============================================================================
// File Operations
// ============================================================================

/// Creates missing parent directories.
async fn create_parent_dirs(path: &Path) -> Result<(), StoreError> {
    let missing = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty() && !parent.exists());
    if let Some(parent) = missing {
        debug!(path = %parent.display(), "Creating directory");
        tokio::fs::create_dir_all(parent).await?;
    }
    Ok(())
}

/// Writes `contents` to the sibling temp file of `path` and returns its path.
///
/// With `private` the temp file is restricted to the owner before it can be
/// renamed into place.
async fn stage_temp(path: &Path, contents: &[u8], private: bool) -> Result<PathBuf, StoreError> {
    create_parent_dirs(path).await?;

    let mut temp_name = path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let written = match tokio::fs::write(&temp_path, contents).await {
        Ok(()) if private => set_restrictive_permissions(&temp_path).await,
        Ok(()) => Ok(()),
        Err(e) => Err(e.into()),
    };
    if let Err(e) = written {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }
    Ok(temp_path)
}

/// Writes `contents` to `path` via a sibling temp file and rename.
async fn write_atomic(path: &Path, contents: &[u8], private: bool) -> Result<(), StoreError> {
    let temp_path = stage_temp(path, contents, private).await?;
    tokio::fs::rename(&temp_path, path).await?;
    Ok(())
}

/// Saves data to a JSON file with secure permissions.
///
/// Creates parent directories if they don't exist, writes atomically
/// (via temp file + rename), and restricts the temp file to the owner on
/// Unix before it is renamed into place.
pub async fn save_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<(), StoreError> {
    debug!(path = %path.display(), "Saving JSON file");

    let json = serde_json::to_string_pretty(data)?;
    write_atomic(path, json.as_bytes(), true).await?;

    debug!(path = %path.display(), "JSON file saved securely");
    Ok(())
}

/// Loads data from a JSON file.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    debug!(path = %path.display(), "Loading JSON file");

    let content = tokio::fs::read_to_string(path).await?;
    let data = serde_json::from_str(&content)?;

    debug!(path = %path.display(), "JSON file loaded");
    Ok(data)
}

/// Writes one line per item, each terminated by `\n`, replacing the file.
pub async fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<(), StoreError> {
    let mut contents = String::new();
    for line in lines {
        contents.push_str(line.as_ref());
        contents.push('\n');
    }
    write_atomic(path, contents.as_bytes(), false).await?;

    debug!(path = %path.display(), lines = lines.len(), "Wrote lines");
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        assert!(default_cache_path().ends_with("membertools_data.json"));
        assert!(default_output_path().ends_with("class_members.txt"));
        assert!(default_cache_path().starts_with(DATA_DIR));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("test.json");

        save_json(&test_file, &serde_json::json!({"a": 1})).await.unwrap();

        let metadata = tokio::fs::metadata(&test_file).await.unwrap();
        let mode = metadata.permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "File should have 0600 permissions");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_staged_file_is_private_before_rename() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let target = temp_dir.path().join("cache.json");

        let staged = stage_temp(&target, b"{}", true).await.unwrap();

        assert!(!target.exists());
        let mode = tokio::fs::metadata(&staged).await.unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600, "Temp file should be 0600 before rename");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_overwrite_keeps_restrictive_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let test_file = temp_dir.path().join("cache.json");
        tokio::fs::write(&test_file, "{}").await.unwrap();
        tokio::fs::set_permissions(&test_file, std::fs::Permissions::from_mode(0o644))
            .await
            .unwrap();

        save_json(&test_file, &serde_json::json!({"a": 2})).await.unwrap();

        let mode = tokio::fs::metadata(&test_file).await.unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("out.txt");

        write_lines(&path, &["a", "b"]).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("out.txt")]);
    }
}
