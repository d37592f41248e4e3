//! Exchange-table side of the metadata transfer.
//!
//! One CSV table per run, one row per filename:
//! - [`append_records`] adds freshly decoded records to a table without
//!   disturbing existing rows or columns
//! - [`read_records`] turns a (possibly hand-edited) table back into records
//! - [`index`] folds many tables into one genre-keyed JSON index
//!
//! Tables are UTF-8 with a byte-order mark, every cell is a string and blank
//! cells mean "empty". The table file is owned by the run; nothing guards
//! against another process editing it at the same time.

pub mod acronyms;
mod import;
pub mod index;
mod merge;
mod table;

use std::path::PathBuf;
use thiserror::Error;

pub use acronyms::GenreAcronyms;
pub use import::{read_records, ImportedRecords, SkippedRow};
pub use index::{build_index, collect_tables, default_index_path, CompositeIndex, IndexEntry};
pub use merge::{append_records, AppendOutcome, SkipReason};
pub use table::{Table, TableRow};

#[derive(Error, Debug)]
pub enum TableError {
    #[error("table not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to parse table {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("io error while {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("table {path} has no '{column}' column")]
    Schema { path: PathBuf, column: &'static str },

    #[error("no CSV tables found in the given inputs")]
    NoTables,

    #[error("failed to encode JSON for {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl TableError {
    pub(crate) fn io(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        TableError::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}
