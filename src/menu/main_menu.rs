use crate::config::save::save_settings;
use crate::config::types::{Config, OutputFormat};
use crate::menu::handlers::run_batch_slicer;
use anyhow::Result;
use console::{Term, style};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn show_main_menu(
    term: &Term,
    shutdown_signal: &Arc<AtomicBool>,
    config: &mut Config,
) -> Result<bool> {
    term.clear_screen()?;

    println!("{}", style("=== 自動圖片切割系統 ===").cyan().bold());
    println!("{}", style("按 ESC 返回上一層").dim());

    let options = ["批次切割圖片", "設定", "離開"];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("請選擇功能")
        .items(&options)
        .default(0)
        .interact_on_opt(term)?;

    match selection {
        Some(0) => {
            run_batch_slicer(term, shutdown_signal)?;
            // 批次元件可能更新了最近路徑，重新載入設定
            *config = Config::new()?;
            Ok(true)
        }
        Some(1) => {
            show_settings_menu(term, config)?;
            Ok(true)
        }
        Some(2) => Ok(false),
        None => Ok(false), // ESC pressed - exit
        _ => unreachable!(),
    }
}

/// 設定選單
fn show_settings_menu(term: &Term, config: &mut Config) -> Result<()> {
    loop {
        term.clear_screen()?;

        println!("{}", style("=== 設定 ===").cyan().bold());
        println!("{}", style("按 ESC 返回上一層").dim());

        let options = ["輸出格式", "日誌資料夾", "返回"];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("請選擇設定項目")
            .items(&options)
            .default(0)
            .interact_on_opt(term)?;

        match selection {
            Some(0) => show_output_format_menu(term, config)?,
            Some(1) => show_log_dir_menu(term, config)?,
            Some(2) | None => break, // ESC or back
            _ => unreachable!(),
        }
    }

    Ok(())
}

/// 輸出格式設定選單
fn show_output_format_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style("=== 輸出格式 ===").cyan().bold());
    println!("{}", style("按 ESC 返回上一層").dim());

    // 顯示當前設定
    println!(
        "\n{} {}",
        style("目前格式:").dim(),
        config.settings.output_format
    );
    println!();

    let formats = [OutputFormat::Png, OutputFormat::Jpg, OutputFormat::Webp];
    let items: Vec<String> = formats.iter().map(ToString::to_string).collect();

    let default_index = formats
        .iter()
        .position(|&f| f == config.settings.output_format)
        .unwrap_or(0);

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("請選擇輸出格式")
        .items(&items)
        .default(default_index)
        .interact_on_opt(term)?;

    // ESC pressed - return without saving
    let Some(selection) = selection else {
        return Ok(());
    };

    let selected_format = formats[selection];

    if selected_format != config.settings.output_format {
        config.settings.output_format = selected_format;
        save_settings(&config.settings)?;
        println!("\n{} {}", style("已儲存:").green(), selected_format);
        std::thread::sleep(std::time::Duration::from_secs(1));
    }

    Ok(())
}

/// 日誌資料夾設定選單
fn show_log_dir_menu(term: &Term, config: &mut Config) -> Result<()> {
    term.clear_screen()?;

    println!("{}", style("=== 日誌資料夾 ===").cyan().bold());

    // 顯示當前設定
    match &config.settings.log_dir {
        Some(dir) => println!("\n{} {dir}", style("目前日誌資料夾:").dim()),
        None => println!("\n{}", style("目前未寫入日誌檔").dim()),
    }
    println!();

    let input: String = Input::new()
        .with_prompt("請輸入日誌資料夾路徑（留空表示不寫日誌檔）")
        .allow_empty(true)
        .interact_text()?;

    let new_log_dir = {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    };

    if new_log_dir != config.settings.log_dir {
        config.settings.log_dir = new_log_dir;
        save_settings(&config.settings)?;
        println!("\n{}", style("已儲存").green());
        std::thread::sleep(std::time::Duration::from_secs(1));
    }

    Ok(())
}
