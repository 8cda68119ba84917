//! 媒體整理元件
//!
//! 依檔名辨識電影與影集，將影片與字幕搬移到正規化的資料夾結構

mod filename_parser;
mod main;
mod move_plan;
mod path_planner;
mod run_summary;
mod subtitle_matcher;

pub use filename_parser::{
    MAX_MOVIE_YEAR, MIN_MOVIE_YEAR, MovieIdentity, MoviePattern, TvIdentity, TvPattern,
    parse_movie, parse_tv,
};
pub use main::{MOVIES_SUBDIR, MediaOrganizer, TV_SUBDIR};
pub use move_plan::{MediaFile, MediaFileKind, MovePlan, PlannedMove};
pub use path_planner::{
    PlannedDestination, movie_folder_name, plan_movie_destination, plan_tv_destination,
};
pub use run_summary::{FileOutcome, MediaKind, RunReport, RunSummary, SkipReason};
pub use subtitle_matcher::{find_companion_subtitles, plan_subtitle_destination};
