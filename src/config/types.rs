use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// 預設的電視劇年份（檔名中沒有首播年份時使用）
pub const DEFAULT_ASSUMED_TV_YEAR: i32 = 2025;

/// 預設的通知逾時秒數
pub const DEFAULT_NOTIFY_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaExtensionTable {
    #[serde(rename = "VIDEO_FILE")]
    pub video_file: Vec<String>,
    #[serde(rename = "SUBTITLE_FILE")]
    pub subtitle_file: Vec<String>,
}

impl MediaExtensionTable {
    #[must_use]
    pub fn video_extensions_set(&self) -> HashSet<String> {
        self.video_file
            .iter()
            .map(|ext| ext.to_lowercase())
            .collect()
    }

    #[must_use]
    pub fn subtitle_extensions_set(&self) -> HashSet<String> {
        self.subtitle_file
            .iter()
            .map(|ext| ext.to_lowercase())
            .collect()
    }

    #[must_use]
    pub fn is_video_file(&self, path: &Path) -> bool {
        has_extension_in(path, &self.video_extensions_set())
    }

    #[must_use]
    pub fn is_subtitle_file(&self, path: &Path) -> bool {
        has_extension_in(path, &self.subtitle_extensions_set())
    }
}

fn has_extension_in(path: &Path, extensions: &HashSet<String>) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.contains(&format!(".{}", ext.to_lowercase())))
}

/// 使用者設定（唯讀，不會寫回檔案）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// 電視劇資料夾與檔名使用的年份
    pub assumed_tv_year: i32,
    /// 通知 webhook 網址
    pub notify_endpoint: Option<String>,
    /// 通知請求逾時秒數
    pub notify_timeout_secs: u64,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            assumed_tv_year: DEFAULT_ASSUMED_TV_YEAR,
            notify_endpoint: None,
            notify_timeout_secs: DEFAULT_NOTIFY_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub extension_table: MediaExtensionTable,
    pub settings: UserSettings,
}

/// 單次整理的執行選項
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrganizerOptions {
    /// 只規劃與記錄，不搬移任何檔案
    pub dry_run: bool,
    /// 是否處理電影
    pub movies: bool,
    /// 是否處理電視劇
    pub tv: bool,
    /// 電視劇使用的年份
    pub assumed_tv_year: i32,
}

impl Default for OrganizerOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            movies: true,
            tv: true,
            assumed_tv_year: DEFAULT_ASSUMED_TV_YEAR,
        }
    }
}
