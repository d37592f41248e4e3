//! Write a `Record` into an MP3's ID3 tag, replacing every managed frame.

use std::path::Path;

use id3::frame::{
    Comment, Frame, Lyrics, SynchronisedLyrics, SynchronisedLyricsType, TimestampFormat,
};
use id3::{Tag, TagLike, Version};
use track_record::Record;

use crate::frames::ManagedFrame;
use crate::read::read_tag;
use crate::MetadataError;

const LANGUAGE: &str = "eng";

/// Replace the managed frames of `path` with the contents of `record`.
///
/// All managed frame types are removed first, including every TXXX frame.
/// A frame is then written only for a non-empty field, so empty fields end
/// up absent rather than stored as empty frames. Frames outside the managed
/// set (pictures, play counts, ...) survive untouched. Saved as ID3v2.4.
pub fn encode(path: impl AsRef<Path>, record: &Record) -> Result<(), MetadataError> {
    let path = path.as_ref();

    let mut tag = match read_tag(path) {
        Ok(tag) => tag,
        Err(MetadataError::ContainerMissing { .. }) => Tag::new(),
        Err(e) => return Err(e),
    };

    apply_record(&mut tag, record);

    tag.write_to_path(path, Version::Id3v24)
        .map_err(|source| MetadataError::Encoding {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!("{}: wrote {} frames", path.display(), tag.frames().count());
    Ok(())
}

pub(crate) fn apply_record(tag: &mut Tag, record: &Record) {
    for frame in ManagedFrame::ALL {
        let _ = tag.remove(frame.id());
    }

    let disc = record.disc.as_ref().map(ToString::to_string).unwrap_or_default();
    let texts = [
        (ManagedFrame::Title, record.title.as_str()),
        (ManagedFrame::Artist, record.artist.as_str()),
        (ManagedFrame::Album, record.album.as_str()),
        (ManagedFrame::Track, record.track_number.as_str()),
        (ManagedFrame::Disc, disc.as_str()),
        (ManagedFrame::Genre, record.genre.as_str()),
        (ManagedFrame::Date, record.date.as_str()),
        (ManagedFrame::Composer, record.composer.as_str()),
    ];

    for (frame, value) in texts {
        if !value.is_empty() {
            let _ = tag.add_frame(Frame::text(frame.id(), value));
        }
    }

    if !record.comments.is_empty() {
        let _ = tag.add_frame(Comment {
            lang: LANGUAGE.to_string(),
            description: String::new(),
            text: record.comments.clone(),
        });
    }

    if let Some(lyrics) = record.lyrics.as_deref().filter(|s| !s.is_empty()) {
        let _ = tag.add_frame(Lyrics {
            lang: LANGUAGE.to_string(),
            description: String::new(),
            text: lyrics.to_string(),
        });
    }

    if let Some(cues) = record.synced_lyrics.as_deref().filter(|c| !c.is_empty()) {
        let _ = tag.add_frame(SynchronisedLyrics {
            lang: LANGUAGE.to_string(),
            timestamp_format: TimestampFormat::Ms,
            content_type: SynchronisedLyricsType::Lyrics,
            description: String::new(),
            content: cues
                .iter()
                .map(|cue| (cue.offset_ms, cue.text.clone()))
                .collect(),
        });
    }
}
