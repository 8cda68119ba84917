use crate::config::MediaExtensionTable;
use anyhow::{Context, Result};
use log::warn;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 遞迴掃描目錄下所有影片檔案，依完整路徑排序（由小到大）
///
/// 無法讀取掃描根目錄時回傳錯誤；子目錄中的讀取錯誤只記錄警告並略過。
pub fn scan_video_files(
    directory: &Path,
    extension_table: &MediaExtensionTable,
) -> Result<Vec<PathBuf>> {
    let mut video_files = Vec::new();

    for entry in WalkDir::new(directory).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(e)
                    .with_context(|| format!("無法掃描目錄: {}", directory.display()));
            }
            Err(e) => {
                warn!("略過無法讀取的項目: {e}");
                continue;
            }
        };

        if entry.file_type().is_file() && extension_table.is_video_file(entry.path()) {
            video_files.push(entry.into_path());
        }
    }

    video_files.sort();
    Ok(video_files)
}
