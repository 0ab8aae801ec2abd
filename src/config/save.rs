use crate::config::types::{MAX_RECENT_PATHS, UserSettings};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn save_settings(settings: &UserSettings) -> Result<()> {
    // Save to settings.json in the current working directory
    let path = Path::new("settings.json");
    let content = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

    fs::write(path, content)
        .with_context(|| format!("Failed to write settings to {}", path.display()))?;

    Ok(())
}

/// 更新最近使用的路徑
/// 將新路徑加入最前面，去重並限制數量
pub fn add_recent_path(settings: &mut UserSettings, path: &str) {
    // 移除已存在的相同路徑
    settings.recent_paths.retain(|p| p != path);

    // 加入到最前面
    settings.recent_paths.insert(0, path.to_string());

    // 限制數量
    settings.recent_paths.truncate(MAX_RECENT_PATHS);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_recent_path_dedup_and_cap() {
        let mut settings = UserSettings::default();

        add_recent_path(&mut settings, "/a");
        add_recent_path(&mut settings, "/b");
        add_recent_path(&mut settings, "/a");
        assert_eq!(settings.recent_paths, vec!["/a", "/b"]);

        for i in 0..10 {
            add_recent_path(&mut settings, &format!("/p{i}"));
        }
        assert_eq!(settings.recent_paths.len(), MAX_RECENT_PATHS);
        assert_eq!(settings.recent_paths[0], "/p9");
    }
}
