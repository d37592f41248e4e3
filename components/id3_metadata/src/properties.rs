use lofty::{AudioFile, Probe};
use std::path::Path;
use std::time::Duration;

use crate::MetadataError;

/// Stream properties reported next to the tag fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioProperties {
    pub duration: Duration,
    /// Audio bitrate in kbps, 0 when the stream does not say
    pub bitrate_kbps: u32,
}

/// Read the audio stream of a file for duration and bitrate.
pub fn read_properties(path: impl AsRef<Path>) -> Result<AudioProperties, MetadataError> {
    let path = path.as_ref();
    let wrap = |source| MetadataError::Properties {
        path: path.to_path_buf(),
        source,
    };

    let tagged_file = Probe::open(path).map_err(wrap)?.read().map_err(wrap)?;
    let properties = tagged_file.properties();

    Ok(AudioProperties {
        duration: properties.duration(),
        bitrate_kbps: properties.audio_bitrate().unwrap_or(0),
    })
}
