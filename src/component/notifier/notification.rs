//! 通知訊息內容

use crate::component::media_organizer::RunReport;
use crate::tools::format_elapsed;
use std::fmt::Write as _;

/// 內文中最多列出的錯誤數量
pub const MAX_LISTED_ERRORS: usize = 5;

/// 通知嚴重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl Severity {
    /// 嵌入訊息使用的顏色
    #[must_use]
    pub const fn color(self) -> u32 {
        match self {
            Self::Success => 0x00ff00,
            Self::Warning => 0xff9900,
            Self::Error => 0xff0000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub severity: Severity,
}

impl Notification {
    /// 依執行報告產生通知
    #[must_use]
    pub fn from_report(report: &RunReport) -> Self {
        let summary = &report.summary;

        let (title, severity) = if summary.has_errors() {
            ("Media Organized With Errors", Severity::Error)
        } else if summary.total_organized() > 0 {
            ("Media Organized", Severity::Success)
        } else {
            ("No Changes", Severity::Warning)
        };

        let mut title = title.to_string();
        if report.dry_run {
            title.push_str(" (Dry Run)");
        }

        let mut body = String::new();
        if summary.total_organized() == 0 && !summary.has_errors() {
            body.push_str("No new media to organize\n");
        }
        let _ = writeln!(
            body,
            "**Movies**: {} organized, {} skipped",
            summary.movies_organized, summary.movies_skipped
        );
        let _ = writeln!(
            body,
            "**TV**: {} organized, {} skipped",
            summary.tv_organized, summary.tv_skipped
        );

        if summary.has_errors() {
            let _ = writeln!(body, "**Errors**: {}", summary.errors.len());
            for error in summary.errors.iter().take(MAX_LISTED_ERRORS) {
                let _ = writeln!(body, "- {error}");
            }
            if summary.errors.len() > MAX_LISTED_ERRORS {
                let _ = writeln!(
                    body,
                    "…and {} more",
                    summary.errors.len() - MAX_LISTED_ERRORS
                );
            }
        }

        if report.interrupted {
            body.push_str("**Interrupted** before all files were processed\n");
        }
        let _ = write!(body, "**Runtime**: {}", format_elapsed(report.elapsed));

        Self {
            title,
            body,
            severity,
        }
    }
}
