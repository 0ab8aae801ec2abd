//! 批次圖片切割主模組
//!
//! 協調資料夾掃描、逐檔切割與輸出的整體流程。
//! 智慧模式只作用於水平切割（沿寬度軸產生左右並排的直條）；
//! 智慧切割的任何失敗都靜默退回均勻切割，不會中斷該檔案。

use super::output_namer::{image_output_dir, slice_output_path};
use crate::config::save::{add_recent_path, save_settings};
use crate::config::{Config, ImageTypeTable, OutputFormat};
use crate::tools::{
    ImageSlice, ImageSlicer, RunLog, SliceError, SliceMode, SmartSplitter,
    ensure_directory_exists, scan_image_files, validate_directory_exists,
};
use anyhow::{Context, Result};
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};
use image::DynamicImage;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// 批次處理結果統計
#[derive(Debug, Default)]
pub struct BatchResult {
    pub processed: Vec<String>,
    pub failed: Vec<String>,
}

/// 批次圖片切割器
pub struct BatchSlicer {
    config: Config,
    shutdown_signal: Arc<AtomicBool>,
}

impl BatchSlicer {
    #[must_use]
    pub const fn new(config: Config, shutdown_signal: Arc<AtomicBool>) -> Self {
        Self {
            config,
            shutdown_signal,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        println!("{}", style("=== 批次圖片切割 ===").cyan().bold());

        let input_dir = self.prompt_input_path()?;
        validate_directory_exists(&input_dir)?;

        let output_dir = self.prompt_output_path()?;
        ensure_directory_exists(&output_dir)?;

        let mode = Self::prompt_mode()?;
        let smart = match mode {
            SliceMode::Horizontal { .. } => Confirm::new()
                .with_prompt("啟用智慧切割（內容感知選擇切割位置）?")
                .default(false)
                .interact()?,
            _ => false,
        };

        println!("{}", style("掃描圖片檔案中...").dim());
        let image_files = scan_image_files(&input_dir, &self.config.image_type_table)?;

        if image_files.is_empty() {
            println!("{}", style("找不到任何圖片檔案").yellow());
            return Ok(());
        }

        println!(
            "{}",
            style(format!("找到 {} 個圖片檔案", image_files.len())).green()
        );

        let log_dir = self.config.settings.log_dir.clone().map(PathBuf::from);
        let run_log = RunLog::create(log_dir.as_deref())?;
        if let Some(path) = run_log.log_path() {
            println!("{}", style(format!("日誌檔: {}", path.display())).dim());
        }

        let result = process_directory(
            &input_dir,
            &output_dir,
            &mode,
            smart,
            self.config.settings.output_format,
            &self.config.image_type_table,
            &run_log,
            &self.shutdown_signal,
        )?;

        if self.shutdown_signal.load(Ordering::SeqCst) {
            println!("{}", style("操作已中斷").yellow());
        }

        add_recent_path(
            &mut self.config.settings,
            &input_dir.to_string_lossy(),
        );
        if let Err(e) = save_settings(&self.config.settings) {
            log::warn!("無法儲存設定: {e}");
        }

        Self::print_summary(&result);
        Ok(())
    }

    fn prompt_input_path(&self) -> Result<PathBuf> {
        let prompt = "請輸入圖片資料夾路徑";
        let path: String = match self.config.settings.recent_paths.first() {
            Some(recent) => Input::new()
                .with_prompt(prompt)
                .default(recent.clone())
                .interact_text()?,
            None => Input::new().with_prompt(prompt).interact_text()?,
        };
        Ok(PathBuf::from(path.trim()))
    }

    fn prompt_output_path(&self) -> Result<PathBuf> {
        let path: String = Input::new()
            .with_prompt("請輸入切割輸出資料夾路徑")
            .interact_text()?;
        Ok(PathBuf::from(path.trim()))
    }

    fn prompt_mode() -> Result<SliceMode> {
        let options = [
            "水平切割（沿寬度軸，左右並排）",
            "垂直切割（沿高度軸，上下堆疊）",
            "網格切割（rows × cols）",
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("請選擇切割模式")
            .items(&options)
            .default(0)
            .interact()?;

        let mode = match selection {
            0 => {
                let n: u32 = Input::new()
                    .with_prompt("請輸入切割數量 n")
                    .default(2)
                    .interact_text()?;
                SliceMode::Horizontal { n }
            }
            1 => {
                let n: u32 = Input::new()
                    .with_prompt("請輸入切割數量 n")
                    .default(2)
                    .interact_text()?;
                SliceMode::Vertical { n }
            }
            2 => {
                let rows: u32 = Input::new()
                    .with_prompt("請輸入列數 rows")
                    .default(2)
                    .interact_text()?;
                let cols: u32 = Input::new()
                    .with_prompt("請輸入欄數 cols")
                    .default(2)
                    .interact_text()?;
                SliceMode::Grid { rows, cols }
            }
            _ => unreachable!(),
        };

        Ok(mode)
    }

    fn print_summary(result: &BatchResult) {
        println!();
        println!("{}", style("=== 批次切割摘要 ===").cyan().bold());
        println!("  成功: {} 個", style(result.processed.len()).green());

        if result.failed.is_empty() {
            return;
        }

        println!("  失敗: {} 個", style(result.failed.len()).red());
        for entry in &result.failed {
            println!("    - {entry}");
        }
    }
}

/// 批次處理一個資料夾內的所有圖片
///
/// 逐檔切割並輸出到 `{輸出根目錄}/{檔名主幹}/` 子資料夾；
/// 單一檔案失敗只記錄不中斷。檔案之間以 rayon 平行處理，
/// 每張來源圖片在自己的呼叫內維持單執行緒；不同檔名主幹
/// 寫入不同子資料夾，輸出路徑不會互相競爭。
#[allow(clippy::too_many_arguments)]
pub fn process_directory(
    input_dir: &Path,
    output_dir: &Path,
    mode: &SliceMode,
    smart: bool,
    output_format: OutputFormat,
    image_type_table: &ImageTypeTable,
    run_log: &RunLog,
    shutdown_signal: &AtomicBool,
) -> Result<BatchResult> {
    validate_directory_exists(input_dir)?;
    ensure_directory_exists(output_dir)?;

    let image_files = scan_image_files(input_dir, image_type_table)?;
    run_log.info(&format!(
        "批次開始 | mode={mode:?} | smart={smart} | files={}",
        image_files.len()
    ));

    let progress_bar = ProgressBar::new(image_files.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .expect("Invalid progress bar template")
            .progress_chars("#>-"),
    );
    progress_bar.set_message("切割中...");

    let result: Mutex<BatchResult> = Mutex::new(BatchResult::default());

    image_files.par_iter().for_each(|file| {
        if shutdown_signal.load(Ordering::SeqCst) {
            return;
        }

        let file_name = file
            .path
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().to_string());

        match process_one(&file.path, output_dir, mode, smart, output_format, run_log) {
            Ok(count) => {
                run_log.info(&format!("完成: {file_name}（{count} 張）"));
                result.lock().unwrap().processed.push(file_name);
            }
            Err(e) => {
                run_log.error(&format!("{file_name} | 錯誤: {e:#}"));
                result
                    .lock()
                    .unwrap()
                    .failed
                    .push(format!("{file_name} | {e:#}"));
            }
        }

        progress_bar.inc(1);
    });

    progress_bar.finish_with_message("完成");

    let result = result.into_inner().unwrap();
    run_log.info("批次結束");
    run_log.info(&format!("成功: {} 個", result.processed.len()));
    run_log.info(&format!("失敗: {} 個", result.failed.len()));

    Ok(result)
}

/// 切割單一圖片檔案並寫出所有子圖，回傳輸出張數
fn process_one(
    path: &Path,
    output_root: &Path,
    mode: &SliceMode,
    smart: bool,
    output_format: OutputFormat,
    run_log: &RunLog,
) -> Result<usize> {
    let stem = path
        .file_stem()
        .map_or_else(|| "image".to_string(), |s| s.to_string_lossy().to_string());

    let image_dir = image_output_dir(output_root, &stem);
    ensure_directory_exists(&image_dir)?;

    let slices = slice_image_file(path, mode, smart, run_log)?;
    let count = slices.len();

    for slice in slices {
        let out_path = slice_output_path(&image_dir, &stem, slice.index, output_format);
        // JPEG 不支援透明通道，輸出前轉成 RGB
        let image = match output_format {
            OutputFormat::Jpg => DynamicImage::ImageRgb8(slice.image.to_rgb8()),
            _ => slice.image,
        };
        image
            .save(&out_path)
            .with_context(|| format!("無法寫入 {}", out_path.display()))?;
    }

    Ok(count)
}

/// 單一檔案的切割策略：智慧優先，失敗靜默退回均勻切割
///
/// 智慧切割只在水平模式嘗試；間距不可行、參數不合或載入失敗
/// 都屬於預期狀況，記一筆警告後改走均勻路徑，不回報為錯誤。
pub fn slice_image_file(
    path: &Path,
    mode: &SliceMode,
    smart: bool,
    run_log: &RunLog,
) -> Result<Vec<ImageSlice>, SliceError> {
    if let SliceMode::Horizontal { n } = *mode {
        if smart {
            match SmartSplitter::open(path).and_then(|splitter| splitter.split(n)) {
                Ok(slices) => return Ok(slices),
                Err(e) => run_log.warn(&format!("智慧切割失敗，改用均勻切割: {e}")),
            }
        }
    }

    ImageSlicer::open(path)?.slice(mode)
}
