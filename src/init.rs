use env_logger::Env;

/// 初始化程序層級的日誌輸出
///
/// 只在程式啟動時呼叫一次；批次執行層級的日誌檔
/// 由 [`crate::tools::RunLog`] 另外管理。
pub fn init() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}
