//! Timed lyric cues and their single-cell text encoding.
//!
//! A cue list travels through the exchange table as one JSON array of
//! `{"ts_ms": <offset>, "text": <line>}` objects. Order is playback order and
//! is never re-sorted; duplicate offsets are legal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CueError {
    #[error("malformed cue data: {0}")]
    MalformedCueData(#[from] serde_json::Error),
}

/// One synchronized lyric line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cue {
    /// Offset from the start of the track in milliseconds
    #[serde(rename = "ts_ms")]
    pub offset_ms: u32,
    pub text: String,
}

impl Cue {
    pub fn new(offset_ms: u32, text: impl Into<String>) -> Self {
        Self {
            offset_ms,
            text: text.into(),
        }
    }
}

/// Encode cues into a self-contained cell value.
///
/// The empty list encodes to `[]`, never to an empty string, so "no cues"
/// stays distinguishable from "no column".
pub fn encode_cues(cues: &[Cue]) -> String {
    // A Vec of plain structs with String/u32 fields cannot fail to serialize.
    serde_json::to_string(cues).unwrap_or_else(|_| "[]".to_string())
}

/// Decode a cell produced by [`encode_cues`] (or by another tool writing the
/// same array shape, with or without spacing).
pub fn decode_cues(cell: &str) -> Result<Vec<Cue>, CueError> {
    Ok(serde_json::from_str(cell.trim())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn empty_list_round_trips_as_explicit_array() {
        let encoded = encode_cues(&[]);
        assert_eq!(encoded, "[]");
        assert_eq!(decode_cues(&encoded).unwrap(), Vec::<Cue>::new());
    }

    #[test]
    fn duplicate_offsets_and_unicode_round_trip_in_order() {
        let cues = vec![
            Cue::new(1500, "دستگاه شور"),
            Cue::new(1500, "second line, same time"),
            Cue::new(200, "earlier offset after a later one"),
            Cue::new(0, "emoji 🎶 and \"quotes\""),
        ];

        let decoded = decode_cues(&encode_cues(&cues)).unwrap();
        assert_eq!(decoded, cues);
    }

    #[test]
    fn non_ascii_is_written_literally() {
        let encoded = encode_cues(&[Cue::new(10, "آواز")]);
        assert_eq!(encoded, r#"[{"ts_ms":10,"text":"آواز"}]"#);
    }

    #[test]
    fn accepts_spaced_json_from_other_writers() {
        let cues = decode_cues(r#"[{"ts_ms": 0, "text": "a"}, {"ts_ms": 250, "text": "b"}]"#)
            .unwrap();
        assert_eq!(cues, vec![Cue::new(0, "a"), Cue::new(250, "b")]);
    }

    #[test]
    fn invalid_syntax_is_malformed() {
        assert_matches!(
            decode_cues("[{\"ts_ms\": 0, \"text\": "),
            Err(CueError::MalformedCueData(_))
        );
    }

    #[test]
    fn wrong_shape_is_malformed() {
        assert_matches!(
            decode_cues(r#"[{"ts_ms": -5, "text": "negative"}]"#),
            Err(CueError::MalformedCueData(_))
        );
        assert_matches!(
            decode_cues(r#"{"ts_ms": 0}"#),
            Err(CueError::MalformedCueData(_))
        );
    }
}
