//! 命令列參數

use crate::config::{OrganizerOptions, UserSettings};
use clap::Parser;
use std::path::PathBuf;

/// 執行完成（包含個別檔案失敗）
pub const EXIT_SUCCESS: u8 = 0;

/// 根目錄或設定檔無效，整理未能開始
pub const EXIT_FATAL: u8 = 1;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    name = "media_organize",
    about = "Organize movies and TV episodes into a normalized library layout"
)]
pub struct Args {
    /// Library root containing media/movies and media/tv
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub root: PathBuf,

    /// Only organize movies
    #[arg(long, conflicts_with = "tv_only")]
    pub movies_only: bool,

    /// Only organize TV episodes
    #[arg(long)]
    pub tv_only: bool,

    /// Preview changes without moving any files
    #[arg(long)]
    pub dry_run: bool,

    /// Webhook URL that receives the run summary
    #[arg(long, alias = "discord-webhook", value_name = "URL")]
    pub notify_endpoint: Option<String>,

    /// Year used in TV show and season folder names
    #[arg(long, value_name = "YEAR")]
    pub tv_year: Option<i32>,

    /// Settings file (defaults to settings.json in the working directory)
    #[arg(short, long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print debug output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 合併命令列參數與設定檔
    #[must_use]
    pub fn organizer_options(&self, settings: &UserSettings) -> OrganizerOptions {
        OrganizerOptions {
            dry_run: self.dry_run,
            movies: !self.tv_only,
            tv: !self.movies_only,
            assumed_tv_year: self.tv_year.unwrap_or(settings.assumed_tv_year),
        }
    }

    /// 命令列優先，其次是設定檔
    #[must_use]
    pub fn notify_endpoint(&self, settings: &UserSettings) -> Option<String> {
        self.notify_endpoint
            .clone()
            .or_else(|| settings.notify_endpoint.clone())
            .filter(|endpoint| !endpoint.trim().is_empty())
    }
}
