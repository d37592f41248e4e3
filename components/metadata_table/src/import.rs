//! Import side: turn a table back into records.

use std::collections::HashMap;
use std::path::Path;

use track_record::{Column, CueError, Record};

use crate::table::Table;
use crate::TableError;

/// Records read from a table plus the rows that could not be used.
#[derive(Debug, Default)]
pub struct ImportedRecords {
    pub records: Vec<Record>,
    pub skipped: Vec<SkippedRow>,
    /// Data rows in the table, used or not
    pub total_rows: usize,
}

#[derive(Debug)]
pub enum SkippedRow {
    MissingFilename { line: usize },
    MalformedCues { line: usize, source: CueError },
}

impl SkippedRow {
    /// One-based line in the file, counting the header as line 1
    pub fn line(&self) -> usize {
        match self {
            SkippedRow::MissingFilename { line } | SkippedRow::MalformedCues { line, .. } => *line,
        }
    }
}

/// Read every usable row of the table at `path` as a record.
///
/// Header names are trimmed and lowercased before matching. A table without
/// a `filename` column is a schema error; a row without a filename or with
/// unreadable cue data is skipped and reported, the rest still import.
pub fn read_records(path: impl AsRef<Path>) -> Result<ImportedRecords, TableError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(TableError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let table = Table::read(path)?;

    let mut columns: HashMap<Column, usize> = HashMap::new();
    for (index, name) in table.header().iter().enumerate() {
        if let Some(column) = Column::from_header(name) {
            columns.entry(column).or_insert(index);
        }
    }

    if !columns.contains_key(&Column::Filename) {
        return Err(TableError::Schema {
            path: path.to_path_buf(),
            column: Column::Filename.name(),
        });
    }

    let columns = &columns;
    let mut imported = ImportedRecords {
        total_rows: table.len(),
        ..ImportedRecords::default()
    };

    for (index, row) in table.rows().enumerate() {
        let line = index + 2;
        let cells = row.cells();
        let cell = move |column: Column| columns.get(&column).map(|&i| cells[i].as_str());

        let filename = cell(Column::Filename).unwrap_or_default().trim();
        if filename.is_empty() {
            tracing::warn!("{} line {}: no filename, row skipped", path.display(), line);
            imported.skipped.push(SkippedRow::MissingFilename { line });
            continue;
        }

        match Record::from_cells(cell) {
            Ok(mut record) => {
                record.filename = filename.to_string();
                imported.records.push(record);
            }
            Err(source) => {
                tracing::warn!("{} line {}: {}, row skipped", path.display(), line, source);
                imported.skipped.push(SkippedRow::MalformedCues { line, source });
            }
        }
    }

    tracing::debug!(
        "read {} records from {} ({} rows skipped)",
        imported.records.len(),
        path.display(),
        imported.skipped.len()
    );
    Ok(imported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use track_record::{Cue, Disc};

    fn write_table(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("meta.csv");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn rows_without_filename_are_skipped_individually() {
        let dir = TempDir::new().unwrap();
        let path = write_table(
            &dir,
            "\u{feff}filename,title\na.mp3,A\nb.mp3,B\n,Orphan\nc.mp3,C\nd.mp3,D\n",
        );

        let imported = read_records(&path).unwrap();

        assert_eq!(imported.records.len(), 4);
        assert_eq!(imported.total_rows, 5);
        assert_eq!(imported.skipped.len(), 1);
        assert_matches!(imported.skipped[0], SkippedRow::MissingFilename { line: 4 });
    }

    #[test]
    fn headers_are_normalised() {
        let dir = TempDir::new().unwrap();
        let path = write_table(&dir, " FileName , TITLE ,Disc\n x.mp3 ,Hello,3/5\n");

        let imported = read_records(&path).unwrap();
        let record = &imported.records[0];

        assert_eq!(record.filename, "x.mp3");
        assert_eq!(record.title, "Hello");
        assert_eq!(record.disc, Some(Disc::Text("3/5".to_string())));
    }

    #[test]
    fn missing_filename_column_is_a_schema_error() {
        let dir = TempDir::new().unwrap();
        let path = write_table(&dir, "title,artist\nA,B\n");

        assert_matches!(
            read_records(&path),
            Err(TableError::Schema { column: "filename", .. })
        );
    }

    #[test]
    fn missing_table_is_not_found() {
        let dir = TempDir::new().unwrap();
        assert_matches!(
            read_records(dir.path().join("none.csv")),
            Err(TableError::NotFound { .. })
        );
    }

    #[test]
    fn cells_stay_strings() {
        let dir = TempDir::new().unwrap();
        let path = write_table(&dir, "filename,tracknumber,date,disc\n01.mp3,01,1998,03\n");

        let record = &read_records(&path).unwrap().records[0];
        assert_eq!(record.track_number, "01");
        assert_eq!(record.date, "1998");
        assert_eq!(record.disc, Some(Disc::Number(3)));
    }

    #[test]
    fn oversized_length_reads_as_zero() {
        let dir = TempDir::new().unwrap();
        let path = write_table(
            &dir,
            "filename,title,length\na.mp3,A,18446744073709551615:00\nb.mp3,B,1:00\n",
        );

        let imported = read_records(&path).unwrap();

        let lengths: Vec<_> = imported
            .records
            .iter()
            .map(|r| (r.filename.as_str(), r.length_seconds))
            .collect();
        assert_eq!(lengths, [("a.mp3", 0), ("b.mp3", 60)]);
        assert!(imported.skipped.is_empty());
    }

    #[test]
    fn malformed_cue_row_is_skipped_and_others_import() {
        let dir = TempDir::new().unwrap();
        let path = write_table(
            &dir,
            "filename,synced_lyrics\n\
             good.mp3,\"[{\"\"ts_ms\"\": 5, \"\"text\"\": \"\"hi\"\"}]\"\n\
             bad.mp3,[not json\n\
             blank.mp3,\n",
        );

        let imported = read_records(&path).unwrap();

        let names: Vec<_> = imported.records.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, ["good.mp3", "blank.mp3"]);
        assert_eq!(imported.records[0].synced_lyrics, Some(vec![Cue::new(5, "hi")]));
        assert_eq!(imported.records[1].synced_lyrics, None);
        assert_matches!(imported.skipped[0], SkippedRow::MalformedCues { line: 3, .. });
    }

    #[test]
    fn absent_optional_columns_read_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = write_table(&dir, "filename\nonly.mp3\n");

        let record = &read_records(&path).unwrap().records[0];
        assert_eq!(record, &Record::new("only.mp3"));
    }
}
