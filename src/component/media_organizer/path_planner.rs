//! 目的地路徑規劃模組
//!
//! 依解析出的身分計算正規化的資料夾與檔名

use super::filename_parser::{MovieIdentity, TvIdentity};
use std::path::{Path, PathBuf};

/// 規劃好的目的地
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedDestination {
    /// 目的資料夾
    pub folder: PathBuf,
    /// 目的檔名（含副檔名）
    pub file_name: String,
}

impl PlannedDestination {
    /// 完整的目的路徑
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.folder.join(&self.file_name)
    }

    /// 目的檔名去掉最後一個副檔名
    #[must_use]
    pub fn base_name(&self) -> &str {
        Path::new(&self.file_name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(self.file_name.as_str())
    }

    /// 檔案是否已位於此目的地
    #[must_use]
    pub fn is_current_location(&self, current: &Path) -> bool {
        current.parent() == Some(self.folder.as_path())
            && current
                .file_name()
                .is_some_and(|name| name == self.file_name.as_str())
    }
}

/// `<movies_root>/[<title>] [<year>]/<原始檔名>`
#[must_use]
pub fn plan_movie_destination(
    identity: &MovieIdentity,
    movies_root: &Path,
    file_name: &str,
) -> PlannedDestination {
    PlannedDestination {
        folder: movies_root.join(movie_folder_name(identity)),
        file_name: file_name.to_string(),
    }
}

/// `<tv_root>/[<show>] [<year>]/Season <season> [<year>]/EP<episode> - <title> [<year>]<ext>`
///
/// `assumed_year` 由呼叫端提供，檔名本身沒有首播年份。
#[must_use]
pub fn plan_tv_destination(
    identity: &TvIdentity,
    tv_root: &Path,
    assumed_year: i32,
    file_name: &str,
) -> PlannedDestination {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();

    let folder = tv_root
        .join(format!("[{}] [{assumed_year}]", identity.show))
        .join(format!("Season {} [{assumed_year}]", identity.season));

    PlannedDestination {
        folder,
        file_name: format!(
            "EP{} - {} [{assumed_year}]{extension}",
            identity.episode, identity.episode_title
        ),
    }
}

/// 電影資料夾名稱，例如 `[The Matrix] [1999]`
#[must_use]
pub fn movie_folder_name(identity: &MovieIdentity) -> String {
    format!("[{}] [{}]", identity.title, identity.year)
}
