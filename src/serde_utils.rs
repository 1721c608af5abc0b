use std::path::Path;

use eyre::Context;
use serde::Serialize;

use crate::error::ExtractError;

pub async fn read_json(
    path: impl AsRef<Path>,
) -> Result<serde_json::Value, ExtractError> {
    let path = path.as_ref();

    let content = tokio::fs::read_to_string(path).await.map_err(|source| {
        ExtractError::Access {
            path: path.to_owned(),
            source,
        }
    })?;

    serde_json::from_str(&content).map_err(|source| ExtractError::Format {
        path: path.to_owned(),
        source,
    })
}

pub async fn write_serialize<T>(
    path: impl AsRef<Path>,
    value: T,
) -> eyre::Result<()>
where
    T: Serialize,
{
    let path = path.as_ref();

    let content = serde_yaml::to_string(&value)
        .with_context(|| format!("Serializing {}", path.display()))?;

    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Writing to {}", path.display()))?;

    Ok(())
}
