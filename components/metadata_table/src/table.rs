use std::io::Write;
use std::path::Path;

use crate::TableError;

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// An all-strings CSV table: one header, rows aligned to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Borrowed view of one row, addressed by header name.
#[derive(Debug, Clone, Copy)]
pub struct TableRow<'a> {
    header: &'a [String],
    cells: &'a [String],
}

impl<'a> TableRow<'a> {
    /// Cell under the first column named exactly `name`.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        let index = self.header.iter().position(|h| h == name)?;
        self.cells.get(index).map(String::as_str)
    }

    pub fn cells(&self) -> &'a [String] {
        self.cells
    }
}

impl Table {
    pub fn new(header: Vec<String>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// A table without data rows counts as empty, even with a header.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = TableRow<'_>> {
        self.rows.iter().map(|cells| TableRow {
            header: &self.header,
            cells,
        })
    }

    /// Append a row; short rows are padded with empty cells, cells beyond
    /// the header are dropped.
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        if cells.len() > self.header.len() {
            tracing::warn!(
                "row {} has {} cells for {} columns; extra cells dropped",
                self.rows.len() + 2,
                cells.len(),
                self.header.len()
            );
        }
        cells.resize(self.header.len(), String::new());
        self.rows.push(cells);
    }

    /// Add a column at the end, back-filling existing rows with empty cells.
    pub fn add_column(&mut self, name: impl Into<String>) {
        self.header.push(name.into());
        for row in &mut self.rows {
            row.push(String::new());
        }
    }

    /// Read a table, ignoring a leading byte-order mark.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| TableError::io("reading", path, e))?;
        Self::from_bytes(&bytes, path)
    }

    pub(crate) fn from_bytes(bytes: &[u8], path: &Path) -> Result<Self, TableError> {
        let csv_error = |source| TableError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let content = bytes.strip_prefix(BOM).unwrap_or(bytes);
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(content);

        let header = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(str::to_string)
            .collect();

        let mut table = Table::new(header);
        for result in reader.records() {
            let record = result.map_err(csv_error)?;
            table.push_row(record.iter().map(str::to_string).collect());
        }

        Ok(table)
    }

    /// Write the table with a byte-order mark.
    ///
    /// The content goes to a temporary file next to `path` which then
    /// replaces it, so readers see either the old table or the new one.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), TableError> {
        let path = path.as_ref();
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut temp = tempfile::NamedTempFile::new_in(dir)
            .map_err(|e| TableError::io("creating temporary file in", dir, e))?;

        if let Ok(metadata) = std::fs::metadata(path) {
            temp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(|e| TableError::io("copying permissions of", path, e))?;
        }

        temp.write_all(BOM)
            .map_err(|e| TableError::io("writing", path, e))?;

        if !self.header.is_empty() {
            let csv_error = |source| TableError::Csv {
                path: path.to_path_buf(),
                source,
            };
            let mut writer = csv::Writer::from_writer(&mut temp);
            writer.write_record(&self.header).map_err(csv_error)?;
            for row in &self.rows {
                writer.write_record(row).map_err(csv_error)?;
            }
            writer
                .flush()
                .map_err(|e| TableError::io("writing", path, e))?;
        }

        temp.persist(path)
            .map_err(|e| TableError::io("replacing", path, e.error))?;

        Ok(())
    }
}
