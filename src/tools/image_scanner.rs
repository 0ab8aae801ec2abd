use crate::config::ImageTypeTable;
use anyhow::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct ImageFileInfo {
    pub path: PathBuf,
    pub size: u64,
}

/// 掃描資料夾內所有支援的圖片檔案，依檔名排序
pub fn scan_image_files(
    directory: &Path,
    image_type_table: &ImageTypeTable,
) -> Result<Vec<ImageFileInfo>> {
    let mut image_files: Vec<ImageFileInfo> = WalkDir::new(directory)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| image_type_table.is_image_file(entry.path()))
        .filter_map(|entry| {
            let metadata = entry.metadata().ok()?;
            Some(ImageFileInfo {
                path: entry.into_path(),
                size: metadata.len(),
            })
        })
        .collect();

    image_files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(image_files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn table() -> ImageTypeTable {
        ImageTypeTable {
            image_file: vec![".png".to_string(), ".jpg".to_string()],
        }
    }

    #[test]
    fn test_scan_filters_and_sorts_by_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.png"), b"x").unwrap();
        fs::write(dir.path().join("a.jpg"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("c.png"), b"x").unwrap();

        let files = scan_image_files(dir.path(), &table()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["a.jpg", "b.png", "c.png"]);
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let files = scan_image_files(dir.path(), &table()).unwrap();
        assert!(files.is_empty());
    }
}
