//! JSON file sink for the final aggregate.

use dossier_common::Result;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Serialize `record` and write it to `path` as one document, in one unit.
pub async fn write_aggregate<T: Serialize>(path: impl AsRef<Path>, record: &T) -> Result<()> {
    let path = path.as_ref();
    debug!(target: "sink", path = %path.display(), "saving data as json");
    let payload = serde_json::to_vec_pretty(record)?;
    tokio::fs::write(path, payload).await?;
    Ok(())
}
