//! 檔案搬移工具
//!
//! 以 trait 包裝資料夾建立與檔案搬移，讓整理流程可以注入其他實作

use super::path_validator::ensure_directory_exists;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// 檔案系統變更操作
pub trait FileMover {
    /// 建立資料夾（含父層），已存在時不視為錯誤
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// 將檔案從 `source` 搬移到 `target`
    fn move_file(&self, source: &Path, target: &Path) -> Result<()>;
}

/// 直接操作本機檔案系統的搬移器
#[derive(Debug, Default, Clone, Copy)]
pub struct FsMover;

impl FsMover {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// 複製檔案後刪除原檔案
    fn copy_and_delete(source: &Path, target: &Path) -> Result<()> {
        fs::copy(source, target).with_context(|| {
            format!("複製檔案失敗: {} -> {}", source.display(), target.display())
        })?;

        fs::remove_file(source).with_context(|| format!("刪除原檔案失敗: {}", source.display()))?;

        Ok(())
    }
}

impl FileMover for FsMover {
    fn create_dir_all(&self, path: &Path) -> Result<()> {
        ensure_directory_exists(path)
    }

    fn move_file(&self, source: &Path, target: &Path) -> Result<()> {
        match fs::rename(source, target) {
            Ok(()) => Ok(()),
            Err(e) => {
                // 跨檔案系統時改用複製後刪除
                debug!(
                    "rename 失敗，改用複製: {} -> {} ({e})",
                    source.display(),
                    target.display()
                );
                Self::copy_and_delete(source, target).with_context(|| {
                    format!(
                        "搬移檔案失敗: {} -> {} (原始錯誤: {e})",
                        source.display(),
                        target.display()
                    )
                })
            }
        }
    }
}
