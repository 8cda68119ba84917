use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

pub fn validate_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("路徑不存在: {}", path.display());
    }
    if !path.is_dir() {
        bail!("路徑不是資料夾: {}", path.display());
    }
    Ok(())
}

/// 確認資料夾存在且可以列出內容
pub fn validate_directory_readable(path: &Path) -> Result<()> {
    validate_directory_exists(path)?;
    fs::read_dir(path).with_context(|| format!("無法讀取目錄: {}", path.display()))?;
    Ok(())
}

/// 建立資料夾（已存在時不視為錯誤）
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.is_dir() {
        fs::create_dir_all(path)
            .with_context(|| format!("無法建立資料夾: {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        assert!(validate_directory_exists(&missing).is_err());
        assert!(validate_directory_readable(&missing).is_err());
    }

    #[test]
    fn test_validate_file_is_not_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        assert!(validate_directory_exists(&file).is_err());
    }

    #[test]
    fn test_ensure_directory_exists_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a/b/c");
        ensure_directory_exists(&nested).unwrap();
        ensure_directory_exists(&nested).unwrap();
        assert!(nested.is_dir());
        validate_directory_readable(&nested).unwrap();
    }
}
