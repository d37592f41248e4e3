use std::path::PathBuf;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use metadata_table::GenreAcronyms;

use crate::config::IndexConfig;

#[derive(Debug)]
pub struct IndexSummary {
    pub tables: usize,
    pub entries: usize,
    pub output: PathBuf,
}

/// Fold the input tables into one JSON index.
pub fn run(config: &IndexConfig) -> Result<IndexSummary> {
    let acronyms = match &config.acronyms {
        Some(path) => GenreAcronyms::from_json_file(path)
            .wrap_err_with(|| format!("failed to load genre acronyms from {}", path.display()))?,
        None => GenreAcronyms::builtin(),
    };

    let tables = metadata_table::collect_tables(&config.inputs)?;
    tracing::info!("indexing {} tables", tables.len());

    let index = metadata_table::build_index(&tables, &acronyms)?;
    index
        .write(&config.output)
        .wrap_err_with(|| format!("failed to write {}", config.output.display()))?;

    Ok(IndexSummary {
        tables: tables.len(),
        entries: index.len(),
        output: config.output.clone(),
    })
}
