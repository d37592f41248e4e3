//! Composite JSON index over many tables.
//!
//! Every row whose album (or, failing that, genre) names a known genre is
//! keyed as `<ACRONYM>|<filename without extension>`. Rows are folded in
//! table order, so when two rows produce the same key the later one wins.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::Serialize;
use track_record::{parse_length, Column, Disc};

use crate::acronyms::GenreAcronyms;
use crate::table::Table;
use crate::TableError;

pub const DEFAULT_INDEX_NAME: &str = "mp3-metadata.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub filename: String,
    pub title: String,
    pub artist: String,
    /// Album name as tagged, blank when the key came from the genre column
    pub genre: String,
    pub composer: String,
    /// Taken from the `comments` column
    pub poet: String,
    pub length: Option<u64>,
    pub disc: Option<Disc>,
    pub bitrate: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompositeIndex {
    entries: BTreeMap<String, IndexEntry>,
}

impl CompositeIndex {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&IndexEntry> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Write the index as indented JSON with keys in sorted order.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), TableError> {
        let path = path.as_ref();
        let mut json = serde_json::to_string_pretty(self).map_err(|source| TableError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        json.push('\n');

        std::fs::write(path, json).map_err(|e| TableError::io("writing", path, e))?;
        tracing::info!("wrote {} index entries to {}", self.len(), path.display());
        Ok(())
    }
}

/// Resolve inputs to table files.
///
/// A file is taken when it has a `.csv` extension; a directory contributes
/// its direct `.csv` children in name order. Anything else is skipped with
/// a warning.
pub fn collect_tables(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, TableError> {
    let mut tables = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let entries =
                std::fs::read_dir(input).map_err(|e| TableError::io("listing", input, e))?;
            let mut found = Vec::new();
            for entry in entries {
                let path = entry.map_err(|e| TableError::io("listing", input, e))?.path();
                if path.is_file() && is_csv(&path) {
                    found.push(path);
                }
            }
            found.sort();
            tracing::debug!("{} tables in {}", found.len(), input.display());
            tables.extend(found);
        } else if input.is_file() && is_csv(input) {
            tables.push(input.clone());
        } else {
            tracing::warn!("{} is not a CSV file or directory, skipping", input.display());
        }
    }

    if tables.is_empty() {
        return Err(TableError::NoTables);
    }
    Ok(tables)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Where the index goes when no output is given: inside the first input if
/// it is a directory, otherwise next to it.
pub fn default_index_path(inputs: &[PathBuf]) -> PathBuf {
    let dir = match inputs.first() {
        Some(first) if first.is_dir() => first.as_path(),
        Some(first) => first
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new(".")),
        None => Path::new("."),
    };
    dir.join(DEFAULT_INDEX_NAME)
}

/// Fold the rows of every table into one index.
///
/// A table that cannot be read is reported and left out; the others still
/// contribute.
pub fn build_index(
    tables: &[PathBuf],
    acronyms: &GenreAcronyms,
) -> Result<CompositeIndex, TableError> {
    if tables.is_empty() {
        return Err(TableError::NoTables);
    }

    let mut index = CompositeIndex::default();
    for path in tables {
        let table = match Table::read(path) {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };

        let before = index.len();
        fold_table(&mut index, &table, acronyms, path);
        tracing::debug!(
            "{}: {} rows, {} new keys",
            path.display(),
            table.len(),
            index.len() - before
        );
    }

    Ok(index)
}

fn fold_table(index: &mut CompositeIndex, table: &Table, acronyms: &GenreAcronyms, path: &Path) {
    let mut columns: HashMap<Column, usize> = HashMap::new();
    for (i, name) in table.header().iter().enumerate() {
        if let Some(column) = Column::from_header(name) {
            columns.entry(column).or_insert(i);
        }
    }
    let columns = &columns;

    for row in table.rows() {
        let cells = row.cells();
        let cell = move |column: Column| {
            columns
                .get(&column)
                .map(|&i| cells[i].trim())
                .unwrap_or_default()
        };

        let filename = cell(Column::Filename);
        let album = cell(Column::Album);
        let genre_name = match album {
            "" => cell(Column::Genre),
            album => album,
        };
        let Some(acronym) = acronyms.lookup(genre_name) else {
            continue;
        };
        if filename.is_empty() {
            continue;
        }

        let stem = Path::new(filename)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| filename.to_string());
        let key = format!("{acronym}|{stem}");

        let entry = IndexEntry {
            filename: filename.to_string(),
            title: cell(Column::Title).to_string(),
            artist: cell(Column::Artist).to_string(),
            genre: album.to_string(),
            composer: cell(Column::Composer).to_string(),
            poet: cell(Column::Comments).to_string(),
            length: parse_length(cell(Column::Length)),
            disc: Disc::parse(cell(Column::Disc)),
            bitrate: cell(Column::Bitrate).parse().ok(),
        };

        if index.entries.insert(key.clone(), entry).is_some() {
            tracing::debug!("{}: {} replaces an earlier row", path.display(), key);
        }
    }
}
