use id3::frame::Content;
use id3::Tag;

/// Frame types owned by the codec.
///
/// `encode` deletes every one of these before writing, so a field that is
/// empty in the record leaves no frame behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagedFrame {
    Title,
    Artist,
    Album,
    Track,
    Disc,
    Genre,
    Date,
    /// ID3v2.3 year frame; read as a date fallback and dropped on save
    LegacyYear,
    Composer,
    Comment,
    Lyrics,
    SyncedLyrics,
    UserText,
}

impl ManagedFrame {
    pub const ALL: [ManagedFrame; 13] = [
        ManagedFrame::Title,
        ManagedFrame::Artist,
        ManagedFrame::Album,
        ManagedFrame::Track,
        ManagedFrame::Disc,
        ManagedFrame::Genre,
        ManagedFrame::Date,
        ManagedFrame::LegacyYear,
        ManagedFrame::Composer,
        ManagedFrame::Comment,
        ManagedFrame::Lyrics,
        ManagedFrame::SyncedLyrics,
        ManagedFrame::UserText,
    ];

    /// Four-character ID3v2 frame identifier
    pub const fn id(&self) -> &'static str {
        match self {
            ManagedFrame::Title => "TIT2",
            ManagedFrame::Artist => "TPE1",
            ManagedFrame::Album => "TALB",
            ManagedFrame::Track => "TRCK",
            ManagedFrame::Disc => "TPOS",
            ManagedFrame::Genre => "TCON",
            ManagedFrame::Date => "TDRC",
            ManagedFrame::LegacyYear => "TYER",
            ManagedFrame::Composer => "TCOM",
            ManagedFrame::Comment => "COMM",
            ManagedFrame::Lyrics => "USLT",
            ManagedFrame::SyncedLyrics => "SYLT",
            ManagedFrame::UserText => "TXXX",
        }
    }
}

/// First value of a plain text frame, if the frame exists.
///
/// ID3v2.4 stores multiple values NUL-separated; only the first is used.
pub(crate) fn first_text(tag: &Tag, frame: ManagedFrame) -> Option<String> {
    tag.frames()
        .filter(|f| f.id() == frame.id())
        .find_map(|f| match f.content() {
            Content::Text(s) => Some(first_value(s).to_string()),
            _ => None,
        })
}

pub(crate) fn first_value(s: &str) -> &str {
    s.split('\0').next().unwrap_or_default()
}
