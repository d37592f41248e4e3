//! Read the managed ID3 frames of an MP3 into a `Record`.

use std::path::Path;

use id3::frame::Content;
use id3::{ErrorKind, Tag};
use track_record::{Cue, Disc, Record};

use crate::frames::{first_text, first_value, ManagedFrame};
use crate::properties::read_properties;
use crate::{base_name, MetadataError};

/// Open the ID3v2 tag of a file.
///
/// A file without a tag header yields [`MetadataError::ContainerMissing`];
/// callers treat that as an empty tag. A damaged tag that still parsed
/// partially is returned as far as it could be read.
pub fn read_tag(path: impl AsRef<Path>) -> Result<Tag, MetadataError> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(MetadataError::PathNotFound {
            path: path.to_path_buf(),
        });
    }

    match Tag::read_from_path(path) {
        Ok(tag) => Ok(tag),
        Err(e) if matches!(e.kind, ErrorKind::NoTag) => Err(MetadataError::ContainerMissing {
            path: path.to_path_buf(),
        }),
        Err(mut source) => match source.partial_tag.take() {
            Some(tag) => {
                tracing::warn!(
                    "{}: using partially read tag ({})",
                    path.display(),
                    source.description
                );
                Ok(tag)
            }
            None => Err(MetadataError::Read {
                path: path.to_path_buf(),
                source,
            }),
        },
    }
}

/// Decode one MP3 into a record.
///
/// A missing tag is not an error: every tag field comes back blank. Audio
/// properties that cannot be probed are reported and left at zero.
pub fn decode(path: impl AsRef<Path>) -> Result<Record, MetadataError> {
    let path = path.as_ref();

    let tag = match read_tag(path) {
        Ok(tag) => tag,
        Err(MetadataError::ContainerMissing { .. }) => {
            tracing::debug!("{}: no ID3 tag, treating as empty", path.display());
            Tag::new()
        }
        Err(e) => return Err(e),
    };

    let mut record = record_from_tag(base_name(path), &tag);

    match read_properties(path) {
        Ok(properties) => {
            record.length_seconds = properties.duration.as_secs();
            record.bitrate_kbps = properties.bitrate_kbps;
        }
        Err(e) => tracing::warn!("{}; length and bitrate left at 0", e),
    }

    Ok(record)
}

pub(crate) fn record_from_tag(filename: String, tag: &Tag) -> Record {
    let text = |frame| first_text(tag, frame).unwrap_or_default();

    let date = first_text(tag, ManagedFrame::Date)
        .filter(|s| !s.is_empty())
        .or_else(|| first_text(tag, ManagedFrame::LegacyYear))
        .unwrap_or_default();

    Record {
        filename,
        title: text(ManagedFrame::Title),
        artist: text(ManagedFrame::Artist),
        album: text(ManagedFrame::Album),
        composer: text(ManagedFrame::Composer),
        comments: first_comment(tag).unwrap_or_default(),
        track_number: text(ManagedFrame::Track),
        disc: disc(tag),
        genre: text(ManagedFrame::Genre),
        date,
        length_seconds: 0,
        bitrate_kbps: 0,
        lyrics: first_lyrics(tag),
        synced_lyrics: synced_lyrics(tag),
    }
}

/// TPOS wins whenever it has a value; otherwise the first TXXX described
/// as "disc" or "disk", in storage order.
fn disc(tag: &Tag) -> Option<Disc> {
    let dedicated = first_text(tag, ManagedFrame::Disc).unwrap_or_default();
    if !dedicated.is_empty() {
        return Disc::parse(&dedicated);
    }

    let fallback = tag
        .frames()
        .filter(|f| f.id() == ManagedFrame::UserText.id())
        .find_map(|f| match f.content() {
            Content::ExtendedText(et) => {
                let description = et.description.trim().to_lowercase();
                (description == "disc" || description == "disk")
                    .then(|| first_value(&et.value).to_string())
            }
            _ => None,
        })?;

    tracing::debug!("disc taken from TXXX fallback: {:?}", fallback);
    Disc::parse(&fallback)
}

fn first_comment(tag: &Tag) -> Option<String> {
    tag.frames()
        .filter(|f| f.id() == ManagedFrame::Comment.id())
        .find_map(|f| match f.content() {
            Content::Comment(c) => Some(first_value(&c.text).to_string()),
            _ => None,
        })
}

fn first_lyrics(tag: &Tag) -> Option<String> {
    tag.frames()
        .filter(|f| f.id() == ManagedFrame::Lyrics.id())
        .find_map(|f| match f.content() {
            Content::Lyrics(l) => Some(l.text.clone()),
            _ => None,
        })
}

/// Cues of every SYLT frame, frame order then in-frame order, never sorted.
fn synced_lyrics(tag: &Tag) -> Option<Vec<Cue>> {
    let mut found = false;
    let mut cues = Vec::new();

    for frame in tag.frames() {
        if frame.id() != ManagedFrame::SyncedLyrics.id() {
            continue;
        }
        if let Content::SynchronisedLyrics(sylt) = frame.content() {
            found = true;
            cues.extend(
                sylt.content
                    .iter()
                    .map(|(offset, text)| Cue::new(*offset, text.clone())),
            );
        }
    }

    found.then_some(cues)
}
