use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Reading {}: {source}", .path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parsing {} as JSON: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "{} is not a broadcast artifact{}: {source}",
        .path.display(),
        record_location(.index)
    )]
    Schema {
        path: PathBuf,
        /// Position in `transactions` of the offending record, if any
        index: Option<usize>,
        #[source]
        source: serde_json::Error,
    },
}

fn record_location(index: &Option<usize>) -> String {
    match index {
        Some(index) => format!(" (transactions[{index}])"),
        None => String::new(),
    }
}
