//! 整合測試 - 以暫存目錄建立媒體庫並驗證整理流程

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};
use media_organize::component::media_organizer::{MediaOrganizer, RunSummary};
use media_organize::component::notifier::{Notification, Notifier, Severity};
use media_organize::config::{Config, OrganizerOptions};
use media_organize::tools::{FileMover, FsMover};
use tempfile::TempDir;

/// 對指定檔名模擬權限錯誤，其餘交給真正的檔案系統
struct FailingMover {
    failing_name: String,
    inner: FsMover,
}

impl FileMover for FailingMover {
    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.inner.create_dir_all(path)
    }

    fn move_file(&self, source: &Path, target: &Path) -> Result<()> {
        if source
            .file_name()
            .is_some_and(|name| name == self.failing_name.as_str())
        {
            bail!("Permission denied (os error 13)");
        }
        self.inner.move_file(source, target)
    }
}

/// 記錄收到的通知
#[derive(Clone, Default)]
struct RecordingNotifier {
    received: Arc<Mutex<Vec<Notification>>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) -> Result<()> {
        self.received.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// 建立測試用媒體庫
fn create_library(root: &Path) {
    let movies = root.join("media/movies");
    let tv = root.join("media/tv");

    write_file(&movies.join("The.Matrix.1999.1080p.mkv"), "matrix");
    write_file(&movies.join("The.Matrix.1999.1080p.srt"), "matrix srt");
    write_file(&movies.join("downloads/Heat (1995).mp4"), "heat");
    write_file(&movies.join("Far.Future.2049.mkv"), "future");
    write_file(&movies.join("home_video.avi"), "home");
    write_file(&movies.join("notes.txt"), "not a video");

    write_file(&tv.join("Show.Name.S02E05.Episode.Title.mkv"), "s02e05");
    write_file(&tv.join("Show.Name.S02E05.Episode.Title.srt"), "s02e05 srt");
    write_file(&tv.join("Show.Name.S02E05.Episode.Title.ass"), "s02e05 ass");
    write_file(&tv.join("season3/Show.Name.3x05.mkv"), "3x05");
    write_file(&tv.join("random clip.mp4"), "clip");
}

fn organizer(dry_run: bool) -> MediaOrganizer {
    let options = OrganizerOptions {
        dry_run,
        ..OrganizerOptions::default()
    };
    MediaOrganizer::new(
        options,
        Config::load_embedded_extension_table().unwrap(),
        Arc::new(AtomicBool::new(false)),
    )
}

fn run(root: &Path, dry_run: bool) -> RunSummary {
    organizer(dry_run).run(root).unwrap().summary
}

/// 列出目錄下所有檔案（相對路徑，已排序）
fn list_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().strip_prefix(root).unwrap().to_path_buf())
        .collect();
    files.sort();
    files
}

#[test]
fn test_full_run_layout() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_library(root);

    let summary = run(root, false);

    assert_eq!(summary.movies_organized, 2);
    assert_eq!(summary.movies_skipped, 2);
    assert_eq!(summary.tv_organized, 2);
    assert_eq!(summary.tv_skipped, 1);
    assert!(summary.errors.is_empty());

    let movies = root.join("media/movies");
    assert!(movies.join("[The Matrix] [1999]/The.Matrix.1999.1080p.mkv").exists());
    assert!(movies.join("[The Matrix] [1999]/The.Matrix.1999.1080p.srt").exists());
    assert!(movies.join("[Heat] [1995]/Heat (1995).mp4").exists());
    assert!(movies.join("Far.Future.2049.mkv").exists());
    assert!(movies.join("home_video.avi").exists());

    let show = root.join("media/tv/[Show Name] [2025]");
    assert!(show.join("Season 2 [2025]/EP5 - Episode Title [2025].mkv").exists());
    assert!(show.join("Season 3 [2025]/EP5 - Episode 5 [2025].mkv").exists());
    assert!(root.join("media/tv/random clip.mp4").exists());
}

#[test]
fn test_companion_subtitles_follow_video() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_library(root);

    run(root, false);

    let season = root.join("media/tv/[Show Name] [2025]/Season 2 [2025]");
    assert_eq!(
        fs::read_to_string(season.join("EP5 - Episode Title [2025].srt")).unwrap(),
        "s02e05 srt"
    );
    assert_eq!(
        fs::read_to_string(season.join("EP5 - Episode Title [2025].ass")).unwrap(),
        "s02e05 ass"
    );
    assert!(!root.join("media/tv/Show.Name.S02E05.Episode.Title.srt").exists());
    assert!(!root.join("media/tv/Show.Name.S02E05.Episode.Title.ass").exists());
}

#[test]
fn test_second_run_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_library(root);

    let first = run(root, false);
    assert_eq!(first.total_organized(), 4);
    let files_after_first = list_files(root);

    let second = run(root, false);
    assert_eq!(second.total_organized(), 0);
    assert_eq!(
        second.total_skipped(),
        first.total_organized() + first.total_skipped()
    );
    assert!(second.errors.is_empty());
    assert_eq!(list_files(root), files_after_first);
}

#[test]
fn test_dry_run_matches_real_run_without_mutation() {
    let dry_dir = TempDir::new().unwrap();
    let real_dir = TempDir::new().unwrap();
    create_library(dry_dir.path());
    create_library(real_dir.path());
    let files_before = list_files(dry_dir.path());

    let dry = run(dry_dir.path(), true);
    let real = run(real_dir.path(), false);

    assert_eq!(dry, real);
    assert_eq!(list_files(dry_dir.path()), files_before);
    assert_ne!(list_files(real_dir.path()), files_before);
}

/// 建立兩個資料夾各有一支同名電影的媒體庫
fn create_colliding_library(root: &Path) {
    let movies = root.join("media/movies");
    write_file(&movies.join("a/Heat.1995.mkv"), "heat a");
    write_file(&movies.join("a/Heat.1995.srt"), "heat a srt");
    write_file(&movies.join("b/Heat.1995.mkv"), "heat b");
}

fn errors_relative_to(summary: &RunSummary, root: &Path) -> Vec<String> {
    let root = root.display().to_string();
    summary
        .errors
        .iter()
        .map(|message| message.replace(&root, "<root>"))
        .collect()
}

#[test]
fn test_dry_run_matches_real_run_on_target_collision() {
    let dry_dir = TempDir::new().unwrap();
    let real_dir = TempDir::new().unwrap();
    create_colliding_library(dry_dir.path());
    create_colliding_library(real_dir.path());

    let dry = run(dry_dir.path(), true);
    let real = run(real_dir.path(), false);

    assert_eq!(real.movies_organized, 1);
    assert_eq!(real.errors.len(), 1);
    assert!(real.errors[0].contains("Heat.1995.mkv"));
    assert_eq!(dry.movies_organized, real.movies_organized);
    assert_eq!(dry.movies_skipped, real.movies_skipped);
    assert_eq!(
        errors_relative_to(&dry, dry_dir.path()),
        errors_relative_to(&real, real_dir.path())
    );

    let folder = real_dir.path().join("media/movies/[Heat] [1995]");
    assert_eq!(
        fs::read_to_string(folder.join("Heat.1995.mkv")).unwrap(),
        "heat a"
    );
    assert!(real_dir.path().join("media/movies/b/Heat.1995.mkv").exists());
    assert!(dry_dir.path().join("media/movies/a/Heat.1995.mkv").exists());
}

#[test]
fn test_single_failure_does_not_stop_run() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let movies = root.join("media/movies");
    write_file(&movies.join("Alien.1979.mkv"), "alien");
    write_file(&movies.join("Brazil.1985.mkv"), "brazil");
    write_file(&movies.join("Casablanca.1942.mkv"), "casablanca");

    let report = organizer(false)
        .with_mover(Box::new(FailingMover {
            failing_name: "Brazil.1985.mkv".to_string(),
            inner: FsMover::new(),
        }))
        .run(root)
        .unwrap();

    let summary = report.summary;
    assert_eq!(summary.movies_organized, 2);
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].contains("Brazil.1985.mkv"));
    assert!(summary.errors[0].contains("Permission denied"));

    assert!(movies.join("[Alien] [1979]/Alien.1979.mkv").exists());
    assert!(movies.join("[Casablanca] [1942]/Casablanca.1942.mkv").exists());
    assert!(movies.join("Brazil.1985.mkv").exists());
}

#[test]
fn test_vanished_subtitle_is_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let movies = root.join("media/movies");
    write_file(&movies.join("Alien.1979.mkv"), "alien");
    write_file(&movies.join("Alien.1979.srt"), "srt");

    /// 搬移影片時順便刪除字幕，模擬字幕在規劃後消失
    struct VanishingSubtitleMover {
        subtitle: PathBuf,
    }

    impl FileMover for VanishingSubtitleMover {
        fn create_dir_all(&self, path: &Path) -> Result<()> {
            FsMover::new().create_dir_all(path)
        }

        fn move_file(&self, source: &Path, target: &Path) -> Result<()> {
            if self.subtitle.exists() {
                fs::remove_file(&self.subtitle)?;
            }
            FsMover::new().move_file(source, target)
        }
    }

    let report = organizer(false)
        .with_mover(Box::new(VanishingSubtitleMover {
            subtitle: movies.join("Alien.1979.srt"),
        }))
        .run(root)
        .unwrap();

    assert_eq!(report.summary.movies_organized, 1);
    assert!(report.summary.errors.is_empty());
    assert!(movies.join("[Alien] [1979]/Alien.1979.mkv").exists());
}

#[test]
fn test_movies_only_leaves_tv_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_library(root);

    let options = OrganizerOptions {
        tv: false,
        ..OrganizerOptions::default()
    };
    let report = MediaOrganizer::new(
        options,
        Config::load_embedded_extension_table().unwrap(),
        Arc::new(AtomicBool::new(false)),
    )
    .run(root)
    .unwrap();

    assert_eq!(report.summary.movies_organized, 2);
    assert_eq!(report.summary.tv_organized, 0);
    assert_eq!(report.summary.tv_skipped, 0);
    assert!(root.join("media/tv/Show.Name.S02E05.Episode.Title.mkv").exists());
}

#[test]
fn test_configured_tv_year() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(&root.join("media/tv/Show.1x01.mkv"), "pilot");

    let options = OrganizerOptions {
        assumed_tv_year: 2010,
        ..OrganizerOptions::default()
    };
    MediaOrganizer::new(
        options,
        Config::load_embedded_extension_table().unwrap(),
        Arc::new(AtomicBool::new(false)),
    )
    .run(root)
    .unwrap();

    assert!(
        root.join("media/tv/[Show] [2010]/Season 1 [2010]/EP1 - Episode 1 [2010].mkv")
            .exists()
    );
}

#[test]
fn test_missing_subtrees_are_not_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let summary = run(temp_dir.path(), false);
    assert_eq!(summary, RunSummary::default());
}

#[test]
fn test_notifier_receives_summary() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_library(root);

    let notifier = RecordingNotifier::default();
    organizer(false)
        .with_notifier(Box::new(notifier.clone()))
        .run(root)
        .unwrap();

    let received = notifier.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].title, "Media Organized");
    assert_eq!(received[0].severity, Severity::Success);
    assert!(received[0].body.contains("**Movies**: 2 organized, 2 skipped"));
    assert!(received[0].body.contains("**TV**: 2 organized, 1 skipped"));
    assert!(received[0].body.contains("**Runtime**: "));
}

#[test]
fn test_per_tree_operations_accumulate() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    create_library(root);

    let mut organizer = organizer(false);
    organizer
        .organize_movies(&MediaOrganizer::movies_root(root))
        .unwrap();
    assert_eq!(organizer.summary().movies_organized, 2);
    assert_eq!(organizer.summary().tv_organized, 0);

    organizer.organize_tv(&MediaOrganizer::tv_root(root)).unwrap();
    assert_eq!(organizer.summary().tv_organized, 2);
}
