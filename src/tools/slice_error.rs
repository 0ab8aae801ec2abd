use thiserror::Error;

/// 切割核心的錯誤分類
///
/// 呼叫端依分類決定處理方式：`InvalidArgument` 直接回報、
/// `InsufficientCandidates` 一律可用均勻切割補救、
/// `Decode` 表示來源圖片無法載入。核心本身不做重試。
#[derive(Debug, Error)]
pub enum SliceError {
    /// 參數與圖片尺寸或模式需求不一致
    #[error("參數錯誤: {0}")]
    InvalidArgument(String),

    /// 內容感知切割找不到足夠的候選切割點
    #[error("找不到足夠的切割點: 需要 {needed} 個，只找到 {found} 個")]
    InsufficientCandidates { needed: usize, found: usize },

    /// 來源圖片無法載入
    #[error("無法載入圖片: {0}")]
    Decode(#[from] image::ImageError),
}
