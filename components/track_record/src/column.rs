use std::fmt;

/// Columns of the exchange table, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Filename,
    Title,
    Artist,
    Album,
    TrackNumber,
    Disc,
    Genre,
    Date,
    Composer,
    Comments,
    Lyrics,
    SyncedLyrics,
    Length,
    Bitrate,
}

impl Column {
    /// Every column in canonical header order.
    pub const CANONICAL: [Column; 14] = [
        Column::Filename,
        Column::Title,
        Column::Artist,
        Column::Album,
        Column::TrackNumber,
        Column::Disc,
        Column::Genre,
        Column::Date,
        Column::Composer,
        Column::Comments,
        Column::Lyrics,
        Column::SyncedLyrics,
        Column::Length,
        Column::Bitrate,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Column::Filename => "filename",
            Column::Title => "title",
            Column::Artist => "artist",
            Column::Album => "album",
            Column::TrackNumber => "tracknumber",
            Column::Disc => "disc",
            Column::Genre => "genre",
            Column::Date => "date",
            Column::Composer => "composer",
            Column::Comments => "comments",
            Column::Lyrics => "lyrics",
            Column::SyncedLyrics => "synced_lyrics",
            Column::Length => "length",
            Column::Bitrate => "bitrate",
        }
    }

    /// Look up a header name, ignoring surrounding whitespace and case.
    pub fn from_header(header: &str) -> Option<Self> {
        let normalized = normalize_header(header);
        Self::CANONICAL
            .into_iter()
            .find(|column| column.name() == normalized)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Header normalisation used when reading tables: trim and lowercase.
pub fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_matches_exchange_header() {
        let names: Vec<_> = Column::CANONICAL.iter().map(Column::name).collect();
        assert_eq!(
            names.join(","),
            "filename,title,artist,album,tracknumber,disc,genre,date,composer,comments,lyrics,synced_lyrics,length,bitrate"
        );
    }

    #[test]
    fn header_lookup_is_trimmed_and_case_insensitive() {
        assert_eq!(Column::from_header(" FileName "), Some(Column::Filename));
        assert_eq!(Column::from_header("Synced_Lyrics"), Some(Column::SyncedLyrics));
        assert_eq!(Column::from_header("notes"), None);
    }
}
