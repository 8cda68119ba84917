//! 執行結果統計

use std::time::Duration;

/// 媒體類別，由檔案所在的根目錄決定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Movie => "電影",
            Self::Tv => "影集",
        }
    }
}

/// 略過的原因（皆不是錯誤）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 檔名不符合任何樣式
    Unrecognized,
    /// 已位於規劃的目的地
    AlreadyOrganized,
}

/// 單一檔案的處理結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// 已搬移（或試執行時將會搬移）
    Organized,
    Skipped(SkipReason),
}

/// 單次執行的統計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub movies_organized: usize,
    pub movies_skipped: usize,
    pub tv_organized: usize,
    pub tv_skipped: usize,
    /// 依發生順序記錄的錯誤訊息
    pub errors: Vec<String>,
}

impl RunSummary {
    /// 記錄一個檔案的處理結果
    pub fn record(&mut self, kind: MediaKind, outcome: FileOutcome) {
        let counter = match (kind, outcome) {
            (MediaKind::Movie, FileOutcome::Organized) => &mut self.movies_organized,
            (MediaKind::Movie, FileOutcome::Skipped(_)) => &mut self.movies_skipped,
            (MediaKind::Tv, FileOutcome::Organized) => &mut self.tv_organized,
            (MediaKind::Tv, FileOutcome::Skipped(_)) => &mut self.tv_skipped,
        };
        *counter += 1;
    }

    pub fn record_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    #[must_use]
    pub const fn total_organized(&self) -> usize {
        self.movies_organized + self.tv_organized
    }

    #[must_use]
    pub const fn total_skipped(&self) -> usize {
        self.movies_skipped + self.tv_skipped
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// 執行結束後交給通知端的報告
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub summary: RunSummary,
    pub elapsed: Duration,
    pub dry_run: bool,
    /// 是否因中斷信號提前結束
    pub interrupted: bool,
}
