//! 搬移計畫
//!
//! 一支影片與其字幕的來源與目的路徑

use super::path_planner::PlannedDestination;
use super::subtitle_matcher::plan_subtitle_destination;
use log::debug;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFileKind {
    Video,
    Subtitle,
}

/// 檔案系統上的媒體檔案
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub path: PathBuf,
    pub kind: MediaFileKind,
}

impl MediaFile {
    #[must_use]
    pub fn video(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: MediaFileKind::Video,
        }
    }

    #[must_use]
    pub fn subtitle(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: MediaFileKind::Subtitle,
        }
    }
}

/// 單一檔案的搬移步驟
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMove {
    pub source: MediaFile,
    pub target: PathBuf,
}

/// 影片與字幕的完整搬移計畫
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub destination: PlannedDestination,
    pub video: PlannedMove,
    pub subtitles: Vec<PlannedMove>,
}

impl MovePlan {
    /// 建立搬移計畫
    ///
    /// 多個字幕對應到同一目的路徑時只保留一個，以 `<影片檔名>.` 開頭的字幕優先，
    /// 其餘留在原處。
    #[must_use]
    pub fn new(video_path: &Path, destination: PlannedDestination, subtitles: &[PathBuf]) -> Self {
        let video_base_name = video_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        let is_exact_companion = |subtitle: &PathBuf| {
            subtitle
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(|name| name.strip_prefix(video_base_name))
                .is_some_and(|rest| rest.starts_with('.'))
        };

        let mut ordered: Vec<&PathBuf> = subtitles.iter().collect();
        ordered.sort_by_key(|subtitle| !is_exact_companion(*subtitle));

        let mut planned_targets = HashSet::from([destination.path()]);
        let subtitles = ordered
            .into_iter()
            .filter_map(|subtitle| {
                let target = plan_subtitle_destination(subtitle, video_path, &destination);
                if !planned_targets.insert(target.clone()) {
                    debug!("字幕目的路徑重複，留在原處: {}", subtitle.display());
                    return None;
                }
                Some(PlannedMove {
                    source: MediaFile::subtitle(subtitle),
                    target,
                })
            })
            .collect();

        Self {
            video: PlannedMove {
                source: MediaFile::video(video_path),
                target: destination.path(),
            },
            destination,
            subtitles,
        }
    }
}
