use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Every `.mp3` file under `root`, recursively, in path order.
///
/// The extension check ignores case. Entries that cannot be read are logged
/// and left out.
pub fn scan_audio_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("skipping unreadable entry under {}: {}", root.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_mp3(path))
        .collect();

    files.sort();
    tracing::debug!("found {} MP3 files under {}", files.len(), root.display());
    files
}

fn is_mp3(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp3"))
}
