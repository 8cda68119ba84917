use std::time::Duration;

/// 格式化經過時間為人類可讀格式
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_seconds = elapsed.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    let millis = elapsed.subsec_millis();

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else if minutes > 0 {
        format!("{minutes:02}:{secs:02}")
    } else {
        format!("{secs}.{millis:03}s")
    }
}
