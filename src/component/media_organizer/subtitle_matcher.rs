//! 字幕配對模組
//!
//! 在影片所在資料夾（不遞迴）尋找同名字幕

use super::path_planner::PlannedDestination;
use crate::config::MediaExtensionTable;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// 找出與影片同名開頭的字幕檔，依路徑排序
pub fn find_companion_subtitles(
    video_path: &Path,
    extension_table: &MediaExtensionTable,
) -> Result<Vec<PathBuf>> {
    let (Some(directory), Some(base_name)) = (
        video_path.parent(),
        video_path.file_stem().and_then(|stem| stem.to_str()),
    ) else {
        return Ok(Vec::new());
    };

    let entries =
        fs::read_dir(directory).with_context(|| format!("無法讀取目錄: {}", directory.display()))?;

    let mut subtitles: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| extension_table.is_subtitle_file(path))
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(base_name))
        })
        .collect();

    subtitles.sort();
    Ok(subtitles)
}

/// 字幕的目的路徑：目的影片的基本檔名加上字幕在原影片檔名之後的部分
///
/// 例如 `Movie.en.srt` 配合目的影片 `EP1 - Pilot [2025].mkv` 會得到
/// `EP1 - Pilot [2025].en.srt`。剩餘部分不是以 `.` 開頭時只保留副檔名。
#[must_use]
pub fn plan_subtitle_destination(
    subtitle_path: &Path,
    video_path: &Path,
    destination: &PlannedDestination,
) -> PathBuf {
    let subtitle_name = subtitle_path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let video_base_name = video_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();

    let suffix = subtitle_name
        .strip_prefix(video_base_name)
        .filter(|rest| rest.starts_with('.'))
        .map_or_else(
            || {
                subtitle_path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| format!(".{ext}"))
                    .unwrap_or_default()
            },
            str::to_string,
        );

    destination
        .folder
        .join(format!("{}{suffix}", destination.base_name()))
}
