//! Genre name to acronym lookup used for composite index keys.

use std::collections::HashMap;
use std::path::Path;

use crate::TableError;

const BUILTIN: [(&str, &str); 12] = [
    ("دستگاه ماهور", "MHUR"),
    ("دستگاه چهارگاه", "CHGH"),
    ("دستگاه سه‌گاه", "SGAH"),
    ("دستگاه همایون", "HMYN"),
    ("آواز اصفهان", "H-ESF"),
    ("دستگاه نوا", "NAVA"),
    ("دستگاه راست‌پنجگاه", "RSTP"),
    ("دستگاه شور", "SHUR"),
    ("آواز ابوعطا", "S-ABT"),
    ("آواز افشاری", "S-AFS"),
    ("آواز بیات‌ترک", "S-TRK"),
    ("آواز دشتی", "S-DST"),
];

/// Static mapping from a genre (or album) name to a short acronym.
///
/// Lookups are exact: no trimming, case folding or Unicode normalisation
/// happens here, so names containing a zero-width non-joiner only match
/// when the table carries the same code points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreAcronyms {
    map: HashMap<String, String>,
}

impl Default for GenreAcronyms {
    fn default() -> Self {
        Self::builtin()
    }
}

impl GenreAcronyms {
    /// The Persian dastgah and avaz names.
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN)
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            map: pairs
                .into_iter()
                .map(|(name, acronym)| (name.into(), acronym.into()))
                .collect(),
        }
    }

    /// Load a table from a JSON object of `name: acronym` pairs.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(TableError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| TableError::io("reading", path, e))?;
        let map: HashMap<String, String> =
            serde_json::from_str(&content).map_err(|source| TableError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!("loaded {} genre acronyms from {}", map.len(), path.display());
        Ok(Self { map })
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
