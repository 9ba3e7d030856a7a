//! Environment/runtime helpers
//!
//! Sanity checks to ensure the record file exists at startup.

use std::path::Path;

use tracing::info;

/// Ensure the record file exists, creating it (and its parent directories)
/// empty if missing. An existing file is left untouched.
pub async fn touch_file<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    match tokio::fs::metadata(path).await {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
            }
            tokio::fs::File::create(path)
                .await
                .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", path.display()))?;
            info!(path = %path.display(), "created empty record file");
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("cannot stat {}: {e}", path.display())),
    }
}
