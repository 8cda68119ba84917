//! 執行結果通知元件
//!
//! 整理流程結束後，透過注入的 [`Notifier`] 回報統計

mod discord;
mod notification;

pub use discord::DiscordWebhook;
pub use notification::{MAX_LISTED_ERRORS, Notification, Severity};

use anyhow::Result;

/// 通知送出端
pub trait Notifier {
    fn notify(&self, notification: &Notification) -> Result<()>;
}

/// 未設定通知端點時使用，不做任何事
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notification: &Notification) -> Result<()> {
        Ok(())
    }
}
