use anyhow::Result;
use std::path::{Path, PathBuf};

/// Resolve deployment folder (absolute path)
pub fn resolve_deployment_folder() -> Result<PathBuf> {
    // Prefer the folder where the executable is running from (works in dev
    // and deployed)
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(dir) = exe_path.parent() {
            return Ok(dir.to_path_buf());
        }
    }

    // Fallback: current working directory
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    Ok(cwd)
}

/// Resolve the log folder (absolute path), creating it if needed.
///
/// Order:
/// - an explicit override (config `logging.dir` / `APPLYFORM__LOGGING__DIR`)
/// - the platform-local data dir (`<data>/applyform/logs`)
/// - `applyform_logs/` next to the executable (best-effort)
pub fn resolve_log_folder(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        std::fs::create_dir_all(dir)
            .map_err(|e| anyhow::anyhow!("Failed to create log folder {:?}: {}", dir, e))?;
        return Ok(dir.to_path_buf());
    }

    if let Some(data_dir) = dirs::data_local_dir() {
        let candidate = data_dir.join("applyform").join("logs");
        if std::fs::create_dir_all(&candidate).is_ok() {
            return Ok(candidate);
        }
    }

    let base = resolve_deployment_folder()?;
    let log_dir = base.join("applyform_logs");
    std::fs::create_dir_all(&log_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create log folder {:?}: {}", log_dir, e))?;
    Ok(log_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_override_is_created_and_used() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("nested").join("logs");
        let resolved = resolve_log_folder(Some(&target)).expect("resolves override");
        assert_eq!(resolved, target);
        assert!(target.is_dir());
    }

    #[test]
    fn default_resolution_yields_a_writable_folder() {
        let resolved = resolve_log_folder(None).expect("resolves a default folder");
        assert!(resolved.is_dir());
    }
}
