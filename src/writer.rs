//! Writing fetched content to the local filesystem.

use std::path::{Component, Path, PathBuf};

use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::{DriveError, Result};

/// Path of `name` inside `dir`. `name` must be a single plain file name, so
/// the result never leaves `dir`.
pub fn target_path(dir: &Path, name: &str) -> Result<PathBuf> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(file)), None) => Ok(dir.join(file)),
        _ => Err(DriveError::InvalidFileName(name.to_string())),
    }
}

/// Create or truncate `path` and write `bytes` to it. Returns the number of
/// bytes written.
///
/// The parent directory must exist. A failure part way through leaves a
/// truncated file behind.
pub async fn write_file<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<u64> {
    let mut file = File::create(path.as_ref()).await?;
    file.write_all(bytes).await?;
    file.flush().await?;
    file.sync_all().await?;
    Ok(bytes.len() as u64)
}
