use crate::component::BatchSlicer;
use crate::config::Config;
use crate::pause;
use anyhow::Result;
use console::{Term, style};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

pub fn run_batch_slicer(term: &Term, shutdown_signal: &Arc<AtomicBool>) -> Result<()> {
    // 重新載入設定，批次元件寫入的最近路徑才會生效
    let config = Config::new()?;
    let mut slicer = BatchSlicer::new(config, Arc::clone(shutdown_signal));

    if let Err(e) = slicer.run() {
        eprintln!("{} {}", style("錯誤:").red().bold(), e);
    }

    pause(term)?;
    Ok(())
}
