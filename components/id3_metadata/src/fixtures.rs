//! Synthetic MP3 files for tests.

use std::io;
use std::path::Path;

/// MPEG-1 Layer III, 128 kbps, 44.1 kHz, no CRC, joint stereo
const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];
const FRAME_LEN: usize = 144 * 128_000 / 44_100;

/// Write `frames` silent CBR frames (about 26 ms each) with no tag.
pub fn write_silent_mp3(path: impl AsRef<Path>, frames: usize) -> io::Result<()> {
    let mut data = Vec::with_capacity(frames * FRAME_LEN);
    for _ in 0..frames {
        data.extend_from_slice(&FRAME_HEADER);
        data.resize(data.len() + FRAME_LEN - FRAME_HEADER.len(), 0);
    }
    std::fs::write(path, data)
}
