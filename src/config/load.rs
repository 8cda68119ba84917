use crate::config::types::{Config, MediaExtensionTable, UserSettings};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// 編譯時嵌入的媒體副檔名設定（不需要外部檔案）
const MEDIA_EXTENSIONS_JSON: &str = include_str!("../data/media_extensions.json");

/// 預設的設定檔名稱（位於目前工作目錄）
pub const DEFAULT_SETTINGS_FILE: &str = "settings.json";

impl Config {
    /// 載入設定
    ///
    /// 指定的設定檔不存在或格式錯誤時回傳錯誤；
    /// 未指定時讀取工作目錄下的 `settings.json`，不存在則使用預設值。
    pub fn new(settings_path: Option<&Path>) -> Result<Self> {
        let extension_table = Self::load_embedded_extension_table()?;
        let settings = match settings_path {
            Some(path) => Self::load_settings(path)?,
            None => {
                let path = Path::new(DEFAULT_SETTINGS_FILE);
                if path.exists() {
                    Self::load_settings(path)?
                } else {
                    UserSettings::default()
                }
            }
        };

        Ok(Self {
            extension_table,
            settings,
        })
    }

    fn load_settings(path: &Path) -> Result<UserSettings> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }

    /// 從編譯時嵌入的 JSON 載入副檔名表
    pub fn load_embedded_extension_table() -> Result<MediaExtensionTable> {
        serde_json::from_str(MEDIA_EXTENSIONS_JSON).context("無法解析嵌入的副檔名設定")
    }
}
