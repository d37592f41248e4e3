use crate::column::Column;
use crate::cues::{decode_cues, encode_cues, Cue, CueError};
use crate::disc::Disc;
use crate::length::{parse_length, LengthFormat};

/// Metadata snapshot of one track.
///
/// String fields use `""` for "no value"; the exchange table cannot tell a
/// blank cell from a missing one, so neither can the record. Only lyrics and
/// synced lyrics keep an explicit absent state, because their columns are
/// optional in the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// Base name of the audio file, the join key within a batch
    pub filename: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub composer: String,
    /// Free-form comment; the collection uses it for the poet
    pub comments: String,
    /// Track position verbatim, e.g. "3" or "3/12"
    pub track_number: String,
    pub disc: Option<Disc>,
    pub genre: String,
    /// Raw date text as tagged, never parsed
    pub date: String,
    pub length_seconds: u64,
    pub bitrate_kbps: u32,
    pub lyrics: Option<String>,
    pub synced_lyrics: Option<Vec<Cue>>,
}

impl Record {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Self::default()
        }
    }

    /// Cell text of a column, with length in whole seconds.
    pub fn cell(&self, column: Column) -> String {
        self.cell_with_length(column, LengthFormat::Seconds)
    }

    pub fn cell_with_length(&self, column: Column, length_format: LengthFormat) -> String {
        match column {
            Column::Filename => self.filename.clone(),
            Column::Title => self.title.clone(),
            Column::Artist => self.artist.clone(),
            Column::Album => self.album.clone(),
            Column::TrackNumber => self.track_number.clone(),
            Column::Disc => self.disc.as_ref().map(Disc::to_string).unwrap_or_default(),
            Column::Genre => self.genre.clone(),
            Column::Date => self.date.clone(),
            Column::Composer => self.composer.clone(),
            Column::Comments => self.comments.clone(),
            Column::Lyrics => self.lyrics.clone().unwrap_or_default(),
            Column::SyncedLyrics => self
                .synced_lyrics
                .as_deref()
                .map(encode_cues)
                .unwrap_or_default(),
            Column::Length => length_format.format(self.length_seconds),
            Column::Bitrate => self.bitrate_kbps.to_string(),
        }
    }

    /// Columns this record contributes to a table header, canonical order.
    ///
    /// Lyrics columns only appear when the record carries lyrics at all.
    pub fn present_columns(&self) -> Vec<Column> {
        Column::CANONICAL
            .into_iter()
            .filter(|column| match column {
                Column::Lyrics => self.lyrics.is_some(),
                Column::SyncedLyrics => self.synced_lyrics.is_some(),
                _ => true,
            })
            .collect()
    }

    /// Build a record from table cells.
    ///
    /// `cell` returns the raw text of a column, or `None` when the table has
    /// no such column. Absent and blank cells are treated alike. Length and
    /// bitrate are informational and fall back to 0 when unparseable.
    pub fn from_cells<'a, F>(cell: F) -> Result<Self, CueError>
    where
        F: Fn(Column) -> Option<&'a str>,
    {
        let text = |column| cell(column).unwrap_or_default().to_string();
        let non_empty = |column| cell(column).filter(|value| !value.is_empty());

        let synced_lyrics = match non_empty(Column::SyncedLyrics) {
            Some(raw) => Some(decode_cues(raw)?),
            None => None,
        };

        Ok(Self {
            filename: text(Column::Filename),
            title: text(Column::Title),
            artist: text(Column::Artist),
            album: text(Column::Album),
            composer: text(Column::Composer),
            comments: text(Column::Comments),
            track_number: text(Column::TrackNumber),
            disc: cell(Column::Disc).and_then(Disc::parse),
            genre: text(Column::Genre),
            date: text(Column::Date),
            length_seconds: cell(Column::Length).and_then(parse_length).unwrap_or(0),
            bitrate_kbps: cell(Column::Bitrate)
                .and_then(|raw| raw.trim().parse().ok())
                .unwrap_or(0),
            lyrics: non_empty(Column::Lyrics).map(str::to_string),
            synced_lyrics,
        })
    }

    /// Whether any tag-managed field carries a value.
    pub fn has_managed_content(&self) -> bool {
        let texts = [
            &self.title,
            &self.artist,
            &self.album,
            &self.track_number,
            &self.genre,
            &self.date,
            &self.composer,
            &self.comments,
        ];

        texts.iter().any(|s| !s.is_empty())
            || self.disc.is_some()
            || self.lyrics.as_deref().is_some_and(|s| !s.is_empty())
            || self.synced_lyrics.as_deref().is_some_and(|c| !c.is_empty())
    }
}
