//! 媒體整理主模組
//!
//! 掃描電影與影集目錄，解析檔名、規劃目的地，搬移影片與字幕並累計統計

use super::filename_parser::{parse_movie, parse_tv};
use super::move_plan::MovePlan;
use super::path_planner::{PlannedDestination, plan_movie_destination, plan_tv_destination};
use super::run_summary::{FileOutcome, MediaKind, RunReport, RunSummary, SkipReason};
use super::subtitle_matcher::find_companion_subtitles;
use crate::component::notifier::{NoopNotifier, Notification, Notifier};
use crate::config::{MediaExtensionTable, OrganizerOptions};
use crate::tools::{FileMover, FsMover, scan_video_files, validate_directory_readable};
use anyhow::{Result, bail};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// 媒體庫內的電影目錄（相對於根目錄）
pub const MOVIES_SUBDIR: [&str; 2] = ["media", "movies"];

/// 媒體庫內的影集目錄（相對於根目錄）
pub const TV_SUBDIR: [&str; 2] = ["media", "tv"];

/// 媒體整理器
pub struct MediaOrganizer {
    options: OrganizerOptions,
    extension_table: MediaExtensionTable,
    shutdown_signal: Arc<AtomicBool>,
    mover: Box<dyn FileMover>,
    notifier: Box<dyn Notifier>,
    summary: RunSummary,
    interrupted: bool,
    /// 本次執行已規劃的目的路徑（試執行也會累計）
    claimed_targets: HashSet<PathBuf>,
    /// 本次執行已被前面影片帶走的字幕
    claimed_subtitles: HashSet<PathBuf>,
}

impl MediaOrganizer {
    /// 建立新的整理器，預設直接操作檔案系統且不送出通知
    #[must_use]
    pub fn new(
        options: OrganizerOptions,
        extension_table: MediaExtensionTable,
        shutdown_signal: Arc<AtomicBool>,
    ) -> Self {
        Self {
            options,
            extension_table,
            shutdown_signal,
            mover: Box::new(FsMover::new()),
            notifier: Box::new(NoopNotifier),
            summary: RunSummary::default(),
            interrupted: false,
            claimed_targets: HashSet::new(),
            claimed_subtitles: HashSet::new(),
        }
    }

    /// 設定檔案搬移器
    #[must_use]
    pub fn with_mover(mut self, mover: Box<dyn FileMover>) -> Self {
        self.mover = mover;
        self
    }

    /// 設定通知端
    #[must_use]
    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// 目前累計的統計
    #[must_use]
    pub const fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// 電影目錄 `<root>/media/movies`
    #[must_use]
    pub fn movies_root(library_root: &Path) -> PathBuf {
        MOVIES_SUBDIR.iter().fold(library_root.to_path_buf(), |path, part| path.join(part))
    }

    /// 影集目錄 `<root>/media/tv`
    #[must_use]
    pub fn tv_root(library_root: &Path) -> PathBuf {
        TV_SUBDIR.iter().fold(library_root.to_path_buf(), |path, part| path.join(part))
    }

    /// 整理整個媒體庫並送出通知
    ///
    /// 只有根目錄無法讀取時回傳錯誤；單一檔案的失敗記錄在統計中。
    pub fn run(mut self, library_root: &Path) -> Result<RunReport> {
        let start_time = Instant::now();
        validate_directory_readable(library_root)?;

        info!(
            "開始整理媒體庫: {}{}",
            library_root.display(),
            if self.options.dry_run { "（試執行）" } else { "" }
        );

        if self.options.movies {
            let movies_root = Self::movies_root(library_root);
            self.organize_tree(MediaKind::Movie, &movies_root)?;
        }
        if self.options.tv && !self.interrupted {
            let tv_root = Self::tv_root(library_root);
            self.organize_tree(MediaKind::Tv, &tv_root)?;
        }

        let report = RunReport {
            summary: self.summary,
            elapsed: start_time.elapsed(),
            dry_run: self.options.dry_run,
            interrupted: self.interrupted,
        };

        let total_organized = report.summary.total_organized();
        if total_organized > 0 {
            info!("共整理 {total_organized} 個檔案");
        } else {
            info!("沒有需要整理的檔案");
        }
        if report.summary.has_errors() {
            warn!("{} 個檔案處理失敗", report.summary.errors.len());
        }

        if let Err(e) = self.notifier.notify(&Notification::from_report(&report)) {
            error!("通知送出失敗: {e:#}");
        }

        Ok(report)
    }

    /// 整理電影目錄
    pub fn organize_movies(&mut self, movies_root: &Path) -> Result<()> {
        self.organize_tree(MediaKind::Movie, movies_root)
    }

    /// 整理影集目錄
    pub fn organize_tv(&mut self, tv_root: &Path) -> Result<()> {
        self.organize_tree(MediaKind::Tv, tv_root)
    }

    fn organize_tree(&mut self, kind: MediaKind, root: &Path) -> Result<()> {
        if !root.exists() {
            warn!("{}目錄不存在，略過: {}", kind.display_name(), root.display());
            return Ok(());
        }

        info!("掃描{}: {}", kind.display_name(), root.display());
        let videos = scan_video_files(root, &self.extension_table)?;
        info!("找到 {} 個{}檔案", videos.len(), kind.display_name());

        for video in &videos {
            if self.shutdown_signal.load(Ordering::SeqCst) {
                warn!("收到中斷信號，停止處理剩餘檔案");
                self.interrupted = true;
                break;
            }

            match self.organize_file(kind, root, video) {
                Ok(outcome) => self.summary.record(kind, outcome),
                Err(e) => {
                    let message = format!("{}: {e:#}", video.display());
                    error!("處理失敗 {message}");
                    self.summary.record_error(message);
                }
            }
        }

        Ok(())
    }

    /// 整理單一電影檔案
    pub fn organize_movie_file(
        &mut self,
        movies_root: &Path,
        video_path: &Path,
    ) -> Result<FileOutcome> {
        self.organize_file(MediaKind::Movie, movies_root, video_path)
    }

    /// 整理單一影集檔案
    pub fn organize_tv_file(&mut self, tv_root: &Path, video_path: &Path) -> Result<FileOutcome> {
        self.organize_file(MediaKind::Tv, tv_root, video_path)
    }

    fn organize_file(
        &mut self,
        kind: MediaKind,
        root: &Path,
        video_path: &Path,
    ) -> Result<FileOutcome> {
        let Some(file_name) = video_path.file_name().and_then(|name| name.to_str()) else {
            debug!("檔名不是有效的 UTF-8，略過: {}", video_path.display());
            return Ok(FileOutcome::Skipped(SkipReason::Unrecognized));
        };

        let Some((destination, label)) = self.plan_destination(kind, root, file_name) else {
            debug!("無法辨識檔名，略過: {}", video_path.display());
            return Ok(FileOutcome::Skipped(SkipReason::Unrecognized));
        };

        if destination.is_current_location(video_path) {
            debug!("已整理，略過: {}", video_path.display());
            return Ok(FileOutcome::Skipped(SkipReason::AlreadyOrganized));
        }

        let target = destination.path();
        if self.is_target_taken(&target) {
            bail!("目標檔案已存在: {}", target.display());
        }

        let subtitles: Vec<PathBuf> = find_companion_subtitles(video_path, &self.extension_table)?
            .into_iter()
            .filter(|subtitle| !self.claimed_subtitles.contains(subtitle))
            .collect();
        let plan = MovePlan::new(video_path, destination, &subtitles);
        self.check_subtitle_targets(&plan)?;
        self.claim(&plan);

        if self.options.dry_run {
            info!("[試執行] {label} <- {file_name}");
        } else {
            info!("{label} <- {file_name}");
            self.execute(&plan)?;
        }
        for subtitle in &plan.subtitles {
            debug!(
                "  字幕 {} -> {}",
                subtitle.source.path.display(),
                subtitle.target.display()
            );
        }

        Ok(FileOutcome::Organized)
    }

    fn plan_destination(
        &self,
        kind: MediaKind,
        root: &Path,
        file_name: &str,
    ) -> Option<(PlannedDestination, String)> {
        match kind {
            MediaKind::Movie => {
                let identity = parse_movie(file_name)?;
                let label = format!("[{}] [{}]", identity.title, identity.year);
                Some((plan_movie_destination(&identity, root, file_name), label))
            }
            MediaKind::Tv => {
                let identity = parse_tv(file_name)?;
                let label = format!(
                    "[{}] S{:02}E{:02}",
                    identity.show, identity.season, identity.episode
                );
                let destination =
                    plan_tv_destination(&identity, root, self.options.assumed_tv_year, file_name);
                Some((destination, label))
            }
        }
    }

    /// 目的路徑已存在，或已被本次執行先前的檔案佔用
    fn is_target_taken(&self, target: &Path) -> bool {
        target.exists() || self.claimed_targets.contains(target)
    }

    fn check_subtitle_targets(&self, plan: &MovePlan) -> Result<()> {
        for subtitle in &plan.subtitles {
            if self.is_target_taken(&subtitle.target) {
                bail!("字幕目標檔案已存在: {}", subtitle.target.display());
            }
        }
        Ok(())
    }

    fn claim(&mut self, plan: &MovePlan) {
        self.claimed_targets.insert(plan.video.target.clone());
        for subtitle in &plan.subtitles {
            self.claimed_targets.insert(subtitle.target.clone());
            self.claimed_subtitles.insert(subtitle.source.path.clone());
        }
    }

    /// 建立資料夾並搬移影片，再搬移仍存在的字幕
    fn execute(&self, plan: &MovePlan) -> Result<()> {
        self.mover.create_dir_all(&plan.destination.folder)?;
        self.mover
            .move_file(&plan.video.source.path, &plan.video.target)?;

        for subtitle in &plan.subtitles {
            if !subtitle.source.path.exists() {
                debug!("字幕已不存在，略過: {}", subtitle.source.path.display());
                continue;
            }
            self.mover.move_file(&subtitle.source.path, &subtitle.target)?;
        }

        Ok(())
    }
}
