//! Canonical in-memory metadata for one audio track.
//!
//! A [`Record`] only lives for the duration of an export or import pass. It
//! persists in two serialized forms: the ID3 tag of the audio file and one
//! row of the exchange table. This crate knows neither format's container,
//! only the field values and their textual cell form.
//!
//! # Examples
//!
//! ```
//! use track_record::{Column, Disc, Record};
//!
//! let mut record = Record::new("01 Intro.mp3");
//! record.title = "Intro".to_string();
//! record.disc = Disc::parse("2");
//!
//! assert_eq!(record.cell(Column::Title), "Intro");
//! assert_eq!(record.cell(Column::Disc), "2");
//! assert_eq!(record.cell(Column::Artist), "");
//! ```

mod column;
pub mod cues;
mod disc;
mod length;
mod record;

pub use column::{normalize_header, Column};
pub use cues::{decode_cues, encode_cues, Cue, CueError};
pub use disc::Disc;
pub use length::{parse_length, LengthFormat};
pub use record::Record;
