use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// 最近使用路徑的保留數量上限
pub const MAX_RECENT_PATHS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageTypeTable {
    #[serde(rename = "IMAGE_FILE")]
    pub image_file: Vec<String>,
}

impl ImageTypeTable {
    #[must_use]
    pub fn image_extensions_set(&self) -> HashSet<String> {
        self.image_file
            .iter()
            .map(|ext| ext.to_lowercase())
            .collect()
    }

    #[must_use]
    pub fn is_image_file(&self, path: &Path) -> bool {
        let image_extensions = self.image_extensions_set();
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| image_extensions.contains(&format!(".{}", ext.to_lowercase())))
    }
}

/// 輸出圖片格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpg,
    Webp,
}

impl OutputFormat {
    /// 輸出檔案使用的副檔名（不含點）
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
            Self::Webp => "webp",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// 使用者設定（存於 settings.json）
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserSettings {
    #[serde(default)]
    pub output_format: OutputFormat,
    /// 批次執行日誌檔的存放資料夾；None 表示不寫日誌檔
    #[serde(default)]
    pub log_dir: Option<String>,
    #[serde(default)]
    pub recent_paths: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub image_type_table: ImageTypeTable,
    pub settings: UserSettings,
}
