//! 批次執行日誌
//!
//! 每次批次執行建立一個日誌情境，由呼叫端明確建構並以參數傳入
//! 批次處理器，不使用全域單例。訊息同時轉發到 `log` 門面，並在
//! 有設定日誌資料夾時附加寫入該次執行的日誌檔。

use crate::tools::path_validator::ensure_directory_exists;
use anyhow::{Context, Result};
use log::{error, info, warn};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

pub struct RunLog {
    file: Option<Mutex<File>>,
    log_path: Option<PathBuf>,
    started: Instant,
}

impl RunLog {
    /// 建立一次批次執行的日誌情境
    ///
    /// `log_dir` 為 None 時只轉發到 `log` 門面；否則在該資料夾
    /// 建立 `slice_run_{unix 秒}.log` 並附加寫入。
    pub fn create(log_dir: Option<&Path>) -> Result<Self> {
        let (file, log_path) = match log_dir {
            None => (None, None),
            Some(dir) => {
                ensure_directory_exists(dir)?;
                let timestamp = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map_or(0, |d| d.as_secs());
                let path = dir.join(format!("slice_run_{timestamp}.log"));
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .with_context(|| format!("無法建立日誌檔: {}", path.display()))?;
                (Some(Mutex::new(file)), Some(path))
            }
        };

        Ok(Self {
            file,
            log_path,
            started: Instant::now(),
        })
    }

    /// 本次執行的日誌檔路徑（未設定日誌資料夾時為 None）
    #[must_use]
    pub fn log_path(&self) -> Option<&Path> {
        self.log_path.as_deref()
    }

    pub fn info(&self, message: &str) {
        info!("{message}");
        self.append("INFO", message);
    }

    pub fn warn(&self, message: &str) {
        warn!("{message}");
        self.append("WARN", message);
    }

    pub fn error(&self, message: &str) {
        error!("{message}");
        self.append("ERROR", message);
    }

    fn append(&self, level: &str, message: &str) {
        if let Some(file) = &self.file {
            let elapsed = self.started.elapsed().as_secs_f64();
            let mut file = match file.lock() {
                Ok(file) => file,
                Err(poisoned) => poisoned.into_inner(),
            };
            // 寫入失敗只能放棄這一行，不中斷批次
            let _ = writeln!(file, "[+{elapsed:.1}s] [{level}] {message}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_without_log_dir_writes_nothing() {
        let run_log = RunLog::create(None).unwrap();
        run_log.info("僅轉發");
        assert!(run_log.log_path().is_none());
    }

    #[test]
    fn test_log_file_receives_lines() {
        let dir = tempfile::tempdir().unwrap();
        let run_log = RunLog::create(Some(dir.path())).unwrap();

        run_log.info("開始");
        run_log.warn("警告訊息");
        run_log.error("錯誤訊息");

        let path = run_log.log_path().unwrap().to_path_buf();
        drop(run_log);

        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("[INFO] 開始"));
        assert!(content.contains("[WARN] 警告訊息"));
        assert!(content.contains("[ERROR] 錯誤訊息"));
    }

    #[test]
    fn test_creates_log_dir_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        let run_log = RunLog::create(Some(&log_dir)).unwrap();
        assert!(log_dir.is_dir());
        assert!(run_log.log_path().unwrap().starts_with(&log_dir));
    }
}
