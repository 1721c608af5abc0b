//! The subset of a `forge script --broadcast` artifact (`run-latest.json`)
//! that we care about. Everything besides `transactions` and the two
//! contract fields of each record is ignored.

use std::path::Path;

use serde::Deserialize;
use tracing::instrument;

use crate::error::ExtractError;
use crate::serde_utils;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub contract_name: String,
    pub contract_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Broadcast {
    pub transactions: Vec<DeploymentRecord>,
}

#[derive(Deserialize)]
struct RawBroadcast {
    transactions: Vec<serde_json::Value>,
}

impl Broadcast {
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ExtractError> {
        let path = path.as_ref();

        let value = serde_utils::read_json(path).await?;
        let broadcast = Self::from_value(path, value)?;

        tracing::debug!(
            records = broadcast.transactions.len(),
            "Loaded broadcast artifact"
        );

        Ok(broadcast)
    }

    /// Validates every record up front, so a malformed artifact fails
    /// before anything gets printed.
    pub fn from_value(
        path: &Path,
        value: serde_json::Value,
    ) -> Result<Self, ExtractError> {
        let raw: RawBroadcast =
            serde_json::from_value(value).map_err(|source| {
                ExtractError::Schema {
                    path: path.to_owned(),
                    index: None,
                    source,
                }
            })?;

        let transactions = raw
            .transactions
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                serde_json::from_value(record).map_err(|source| {
                    ExtractError::Schema {
                        path: path.to_owned(),
                        index: Some(index),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<DeploymentRecord>, _>>()?;

        Ok(Self { transactions })
    }
}
