use crate::config::OutputFormat;
use std::path::{Path, PathBuf};

/// 單一來源圖片的輸出子資料夾：`{輸出根目錄}/{檔名主幹}`
#[must_use]
pub fn image_output_dir(output_root: &Path, stem: &str) -> PathBuf {
    output_root.join(stem)
}

/// 單一切割輸出的檔案路徑：`{檔名主幹}_part{序號}.{格式}`
#[must_use]
pub fn slice_output_path(
    image_dir: &Path,
    stem: &str,
    index: usize,
    format: OutputFormat,
) -> PathBuf {
    image_dir.join(format!("{stem}_part{index}.{}", format.extension()))
}
