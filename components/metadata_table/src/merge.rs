//! Export side: add records to a table without disturbing what is there.

use std::path::Path;

use track_record::{Column, LengthFormat, Record};

use crate::table::Table;
use crate::TableError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    /// A new table was written
    Created { rows: usize },
    /// Rows were appended to an existing table
    Appended {
        rows: usize,
        added_columns: Vec<String>,
    },
    /// Nothing was written
    Skipped { reason: SkipReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoRecords,
    /// None of the new fields matches an existing column
    NoSharedColumns,
}

/// Append `records` to the table at `path`.
///
/// A missing, zero-length or header-only target gets a fresh table whose
/// header is the union of the records' columns in canonical order. An
/// existing table keeps its columns and rows exactly; columns it lacks are
/// added at the end and back-filled with empty cells, and the new rows follow
/// in that column order. Existing headers are matched after trimming and
/// lowercasing, so a hand-edited `Title` column is reused, not duplicated.
///
/// The rewrite is all-or-nothing: on failure the previous table is intact.
pub fn append_records(
    path: impl AsRef<Path>,
    records: &[Record],
    length_format: LengthFormat,
) -> Result<AppendOutcome, TableError> {
    let path = path.as_ref();

    if records.is_empty() {
        tracing::warn!("no records to write to {}", path.display());
        return Ok(AppendOutcome::Skipped {
            reason: SkipReason::NoRecords,
        });
    }

    let new_columns = union_columns(records);

    let existing = if path.exists() {
        Some(Table::read(path)?)
    } else {
        None
    };

    match existing {
        Some(table) if !table.is_empty() => {
            append_to(table, path, records, &new_columns, length_format)
        }
        _ => create(path, records, &new_columns, length_format),
    }
}

fn union_columns(records: &[Record]) -> Vec<Column> {
    Column::CANONICAL
        .into_iter()
        .filter(|column| {
            records
                .iter()
                .any(|record| record.present_columns().contains(column))
        })
        .collect()
}

fn create(
    path: &Path,
    records: &[Record],
    columns: &[Column],
    length_format: LengthFormat,
) -> Result<AppendOutcome, TableError> {
    let mut table = Table::new(columns.iter().map(|c| c.name().to_string()).collect());
    for record in records {
        table.push_row(
            columns
                .iter()
                .map(|&c| record.cell_with_length(c, length_format))
                .collect(),
        );
    }

    table.write(path)?;
    tracing::info!("exported {} records to new table {}", records.len(), path.display());

    Ok(AppendOutcome::Created {
        rows: records.len(),
    })
}

fn append_to(
    mut table: Table,
    path: &Path,
    records: &[Record],
    new_columns: &[Column],
    length_format: LengthFormat,
) -> Result<AppendOutcome, TableError> {
    let existing: Vec<Option<Column>> = table
        .header()
        .iter()
        .map(|h| Column::from_header(h))
        .collect();

    if !new_columns.iter().any(|c| existing.contains(&Some(*c))) {
        tracing::warn!(
            "{} shares no columns with the exported fields; nothing appended",
            path.display()
        );
        return Ok(AppendOutcome::Skipped {
            reason: SkipReason::NoSharedColumns,
        });
    }

    let added: Vec<Column> = new_columns
        .iter()
        .copied()
        .filter(|c| !existing.contains(&Some(*c)))
        .collect();
    for column in &added {
        table.add_column(column.name());
    }

    // Each header position maps to the record field it holds, if any;
    // duplicated headers only receive the value in their first occurrence.
    let mut seen = Vec::new();
    let layout: Vec<Option<Column>> = table
        .header()
        .iter()
        .map(|h| {
            let column = Column::from_header(h).filter(|c| !seen.contains(c))?;
            seen.push(column);
            Some(column)
        })
        .collect();

    for record in records {
        table.push_row(
            layout
                .iter()
                .map(|column| {
                    column
                        .map(|c| record.cell_with_length(c, length_format))
                        .unwrap_or_default()
                })
                .collect(),
        );
    }

    table.write(path)?;
    tracing::info!("appended {} rows to {}", records.len(), path.display());

    Ok(AppendOutcome::Appended {
        rows: records.len(),
        added_columns: added.iter().map(|c| c.name().to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use track_record::{Cue, Disc};

    fn record(filename: &str, title: &str) -> Record {
        let mut record = Record::new(filename);
        record.title = title.to_string();
        record.length_seconds = 200;
        record.bitrate_kbps = 128;
        record
    }

    fn header(path: &Path) -> Vec<String> {
        Table::read(path).unwrap().header().to_vec()
    }

    #[test]
    fn new_table_uses_canonical_columns_and_blank_cells() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("meta.csv");

        let outcome = append_records(
            &path,
            &[record("a.mp3", "Song A"), record("b.mp3", "")],
            LengthFormat::Seconds,
        )
        .unwrap();

        assert_eq!(outcome, AppendOutcome::Created { rows: 2 });
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "\u{feff}filename,title,artist,album,tracknumber,disc,genre,date,composer,comments,length,bitrate\n\
             a.mp3,Song A,,,,,,,,,200,128\n\
             b.mp3,,,,,,,,,,200,128\n"
        );
    }

    #[test]
    fn lyrics_columns_appear_only_when_some_record_has_them() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("meta.csv");

        let mut with_cues = record("a.mp3", "A");
        with_cues.synced_lyrics = Some(vec![Cue::new(0, "x")]);
        append_records(
            &path,
            &[with_cues, record("b.mp3", "B")],
            LengthFormat::MinutesSeconds,
        )
        .unwrap();

        let table = Table::read(&path).unwrap();
        assert!(!table.header().contains(&"lyrics".to_string()));
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[0].get("synced_lyrics"), Some(r#"[{"ts_ms":0,"text":"x"}]"#));
        assert_eq!(rows[1].get("synced_lyrics"), Some(""));
        assert_eq!(rows[1].get("length"), Some("3:20"));
    }

    #[test]
    fn header_only_target_is_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("meta.csv");
        std::fs::write(&path, "notes\n").unwrap();

        let outcome =
            append_records(&path, &[record("a.mp3", "A")], LengthFormat::Seconds).unwrap();

        assert_eq!(outcome, AppendOutcome::Created { rows: 1 });
        assert_eq!(header(&path)[0], "filename");
    }

    #[test]
    fn subset_append_keeps_existing_columns_and_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("meta.csv");
        std::fs::write(
            &path,
            "\u{feff}title,filename,notes,length,bitrate,artist,album,tracknumber,disc,genre,date,composer,comments\n\
             Old,old.mp3,keep me,1,2,,,,,,,,\n",
        )
        .unwrap();
        let before = header(&path);

        let outcome =
            append_records(&path, &[record("new.mp3", "New")], LengthFormat::Seconds).unwrap();

        assert_eq!(
            outcome,
            AppendOutcome::Appended {
                rows: 1,
                added_columns: vec![]
            }
        );
        let table = Table::read(&path).unwrap();
        assert_eq!(table.header(), before.as_slice());

        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[0].get("notes"), Some("keep me"));
        assert_eq!(rows[0].get("title"), Some("Old"));
        assert_eq!(rows[1].get("filename"), Some("new.mp3"));
        assert_eq!(rows[1].get("title"), Some("New"));
        assert_eq!(rows[1].get("notes"), Some(""));
    }

    #[test]
    fn one_new_field_adds_one_back_filled_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("meta.csv");
        append_records(
            &path,
            &[record("a.mp3", "A"), record("b.mp3", "B")],
            LengthFormat::Seconds,
        )
        .unwrap();
        let before = header(&path);

        let mut lyrical = record("c.mp3", "C");
        lyrical.lyrics = Some("words".to_string());
        let outcome = append_records(&path, &[lyrical], LengthFormat::Seconds).unwrap();

        assert_eq!(
            outcome,
            AppendOutcome::Appended {
                rows: 1,
                added_columns: vec!["lyrics".to_string()]
            }
        );

        let table = Table::read(&path).unwrap();
        assert_eq!(&table.header()[..before.len()], before.as_slice());
        assert_eq!(table.header().len(), before.len() + 1);

        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[0].get("lyrics"), Some(""));
        assert_eq!(rows[1].get("lyrics"), Some(""));
        assert_eq!(rows[2].get("lyrics"), Some("words"));
        assert_eq!(rows[0].get("title"), Some("A"));
    }

    #[test]
    fn differently_cased_headers_are_reused() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("meta.csv");
        std::fs::write(&path, " FileName ,Title\nold.mp3,Old\n").unwrap();

        let mut new = record("new.mp3", "New");
        new.disc = Some(Disc::Number(2));
        let outcome = append_records(&path, &[new], LengthFormat::Seconds).unwrap();

        let AppendOutcome::Appended { added_columns, .. } = outcome else {
            panic!("expected append, got {outcome:?}");
        };
        assert!(!added_columns.contains(&"filename".to_string()));
        assert!(!added_columns.contains(&"title".to_string()));

        let table = Table::read(&path).unwrap();
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[1].get(" FileName "), Some("new.mp3"));
        assert_eq!(rows[1].get("Title"), Some("New"));
        assert_eq!(rows[1].get("disc"), Some("2"));
    }

    #[test]
    fn no_shared_columns_skips_and_leaves_file_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("meta.csv");
        let original = "isbn,price\n123,9.99\n";
        std::fs::write(&path, original).unwrap();

        let outcome =
            append_records(&path, &[record("a.mp3", "A")], LengthFormat::Seconds).unwrap();

        assert_eq!(
            outcome,
            AppendOutcome::Skipped {
                reason: SkipReason::NoSharedColumns
            }
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn no_records_does_not_touch_the_target() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("meta.csv");

        let outcome = append_records(&path, &[], LengthFormat::Seconds).unwrap();

        assert_eq!(
            outcome,
            AppendOutcome::Skipped {
                reason: SkipReason::NoRecords
            }
        );
        assert!(!path.exists());
    }
}
