use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;
use id3_metadata::MetadataError;
use track_record::Record;

use crate::batch::{self, Failure};
use crate::config::ImportConfig;
use crate::progress::Progress;

#[derive(Debug)]
pub struct ImportSummary {
    /// Distinct filenames in the table
    pub total: usize,
    pub updated: usize,
    /// Rows naming a file that is not in the target directory
    pub missing: Vec<PathBuf>,
    /// Rows the table reader could not use
    pub skipped_rows: usize,
    pub failures: Vec<Failure>,
}

/// Write each row of the table into the file it names under the target
/// directory.
pub async fn run(config: &ImportConfig, progress: &mut dyn Progress) -> Result<ImportSummary> {
    if !config.mp3_dir.is_dir() {
        bail!("{} is not a directory", config.mp3_dir.display());
    }

    let imported = metadata_table::read_records(&config.csv)
        .wrap_err_with(|| format!("failed to read {}", config.csv.display()))?;
    let records = last_row_wins(imported.records);
    let total = records.len();

    let mut missing = Vec::new();
    let mut items = Vec::with_capacity(total);
    for record in records {
        let path = config.mp3_dir.join(&record.filename);
        if is_plain_name(&record.filename) && path.is_file() {
            items.push((path, record));
        } else {
            let error = MetadataError::PathNotFound { path };
            tracing::warn!("{}, row skipped", error);
            missing.push(error.path().to_path_buf());
        }
    }

    tracing::info!("writing tags of {} files", items.len());
    let results = batch::for_each_file(
        items,
        config.jobs,
        |path: &Path, record: Record| id3_metadata::encode(path, &record),
        progress,
    )
    .await;
    let (updated, failures) = batch::partition(results);

    Ok(ImportSummary {
        total,
        updated: updated.len(),
        missing,
        skipped_rows: imported.skipped.len(),
        failures,
    })
}

/// Collapse rows sharing a filename into the last of them, keeping the
/// position of the first.
fn last_row_wins(records: Vec<Record>) -> Vec<Record> {
    let mut position: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<Record> = Vec::with_capacity(records.len());

    for record in records {
        match position.get(&record.filename) {
            Some(&index) => {
                tracing::debug!(
                    "{} appears more than once, using the later row",
                    record.filename
                );
                unique[index] = record;
            }
            None => {
                position.insert(record.filename.clone(), unique.len());
                unique.push(record);
            }
        }
    }
    unique
}

/// Filenames resolve directly inside the target directory only.
fn is_plain_name(filename: &str) -> bool {
    let mut components = Path::new(filename).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
