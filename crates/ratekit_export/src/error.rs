//! Layered error types for the export pipeline.

use std::path::PathBuf;

use ratekit_io_xlsx::XlsxWriteError;
use thiserror::Error;

/// Rate store failures. Always fatal to the run.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to open rate store {}: {source}", path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Rate query failed for {tier}: {source}")]
    Query {
        tier: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to release rate store: {0}")]
    Close(#[source] rusqlite::Error),

    /// Failure from a non-SQLite backend.
    #[error("Rate store backend error: {0}")]
    Backend(String),
}

/// Top-level export failure, mapped to a process exit code.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to write sheet {sheet_name:?}: {source}")]
    Sheet {
        sheet_name: String,
        #[source]
        source: XlsxWriteError,
    },

    #[error("Failed to persist workbook {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: XlsxWriteError,
    },
}

impl ExportError {
    /// Process exit status for this failure category.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Store(_) => 3,
            Self::Sheet { .. } | Self::Persist { .. } => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct_per_category() {
        let err_store = ExportError::from(StoreError::Backend("down".to_string()));
        let err_persist = ExportError::Persist {
            path: PathBuf::from("out.xlsx"),
            source: XlsxWriteError::Closed,
        };

        assert_eq!(err_store.exit_code(), 3);
        assert_eq!(err_persist.exit_code(), 4);
        assert_eq!(err_store.to_string(), "Rate store backend error: down");
    }
}
