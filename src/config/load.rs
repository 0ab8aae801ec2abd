use crate::config::types::{Config, ImageTypeTable, UserSettings};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// 編譯時嵌入的圖片類型設定（不需要外部檔案）
const IMAGE_TYPE_TABLE_JSON: &str = include_str!("../data/image_file_types.json");

impl Config {
    pub fn new() -> Result<Self> {
        let image_type_table = Self::load_embedded_image_type_table()?;
        let settings = Self::load_settings().unwrap_or_default();

        Ok(Self {
            image_type_table,
            settings,
        })
    }

    fn load_settings() -> Result<UserSettings> {
        let path = Path::new("settings.json");
        if !path.exists() {
            return Ok(UserSettings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }

    /// 從編譯時嵌入的 JSON 載入圖片類型表
    fn load_embedded_image_type_table() -> Result<ImageTypeTable> {
        serde_json::from_str(IMAGE_TYPE_TABLE_JSON).context("無法解析嵌入的圖片類型設定")
    }
}
