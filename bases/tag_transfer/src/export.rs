use std::path::Path;

use color_eyre::eyre::{bail, WrapErr};
use color_eyre::Result;
use metadata_table::AppendOutcome;

use crate::batch::{self, Failure};
use crate::config::ExportConfig;
use crate::progress::Progress;
use crate::scan::scan_audio_files;

#[derive(Debug)]
pub struct ExportSummary {
    /// MP3 files found
    pub total: usize,
    /// Files whose tags made it into the batch
    pub processed: usize,
    pub failures: Vec<Failure>,
    pub outcome: AppendOutcome,
}

/// Decode every MP3 under the configured directories and append the
/// records to the table in one write.
pub async fn run(config: &ExportConfig, progress: &mut dyn Progress) -> Result<ExportSummary> {
    let mut files = Vec::new();
    for dir in &config.mp3_dirs {
        if !dir.is_dir() {
            tracing::warn!("{} is not a directory, skipping", dir.display());
            continue;
        }
        let found = scan_audio_files(dir);
        if found.is_empty() {
            tracing::info!("no MP3 files in {}", dir.display());
        }
        files.extend(found);
    }

    if files.is_empty() {
        bail!("no MP3 files found in the given directories");
    }

    let total = files.len();
    tracing::info!("reading tags of {} files", total);

    let items = files.into_iter().map(|path| (path, ())).collect();
    let results = batch::for_each_file(
        items,
        config.jobs,
        |path: &Path, ()| id3_metadata::decode(path),
        progress,
    )
    .await;
    let (records, failures) = batch::partition(results);

    let outcome = metadata_table::append_records(&config.csv, &records, config.length_format)
        .wrap_err_with(|| format!("failed to write {}", config.csv.display()))?;

    Ok(ExportSummary {
        total,
        processed: records.len(),
        failures,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::Silent;
    use id3::{Tag, TagLike, Version};
    use id3_metadata::fixtures::write_silent_mp3;
    use metadata_table::Table;
    use std::num::NonZeroUsize;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use track_record::LengthFormat;

    fn config(dirs: Vec<PathBuf>, csv: PathBuf) -> ExportConfig {
        ExportConfig {
            mp3_dirs: dirs,
            csv,
            length_format: LengthFormat::Seconds,
            jobs: NonZeroUsize::new(2).unwrap(),
        }
    }

    #[tokio::test]
    async fn exports_every_file_under_every_directory() {
        let dir = TempDir::new().unwrap();
        let cd1 = dir.path().join("cd1");
        let cd2 = dir.path().join("cd2");
        std::fs::create_dir_all(cd1.join("bonus")).unwrap();
        std::fs::create_dir(&cd2).unwrap();

        for path in [cd1.join("01.mp3"), cd1.join("bonus/02.mp3"), cd2.join("03.mp3")] {
            write_silent_mp3(&path, 40).unwrap();
            let mut tag = Tag::new();
            tag.set_artist("Shajarian");
            tag.write_to_path(&path, Version::Id3v24).unwrap();
        }
        let csv = dir.path().join("meta.csv");

        let summary = run(&config(vec![cd1, cd2], csv.clone()), &mut Silent)
            .await
            .unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.processed, 3);
        assert!(summary.failures.is_empty());
        assert_eq!(summary.outcome, AppendOutcome::Created { rows: 3 });

        let table = Table::read(&csv).unwrap();
        let names: Vec<_> = table.rows().map(|row| row.get("filename").unwrap()).collect();
        assert_eq!(names, ["01.mp3", "02.mp3", "03.mp3"]);
        assert!(table.rows().all(|row| row.get("artist") == Some("Shajarian")));
    }

    #[tokio::test]
    async fn missing_directory_is_skipped() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real");
        std::fs::create_dir(&real).unwrap();
        write_silent_mp3(real.join("a.mp3"), 40).unwrap();
        let csv = dir.path().join("meta.csv");

        let summary = run(
            &config(vec![dir.path().join("gone"), real], csv),
            &mut Silent,
        )
        .await
        .unwrap();

        assert_eq!(summary.processed, 1);
    }

    #[tokio::test]
    async fn no_files_at_all_is_an_error() {
        let dir = TempDir::new().unwrap();
        let csv = dir.path().join("meta.csv");

        let result = run(&config(vec![dir.path().to_path_buf()], csv.clone()), &mut Silent).await;

        assert!(result.is_err());
        assert!(!csv.exists());
    }
}
