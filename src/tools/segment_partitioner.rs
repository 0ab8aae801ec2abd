use crate::tools::SliceError;

/// 將一段像素長度均分成 n 個區段
///
/// 餘數由前端開始分配：前 `total % n` 段各多 1 像素，
/// 其餘為 `total / n`。此分配順序是輸出相容性的一部分，不可改變。
///
/// # Errors
/// `n` 為 0 或大於 `total`（無法產生 n 段正長度）時回傳 `InvalidArgument`。
pub fn partition(total: u32, n: u32) -> Result<Vec<u32>, SliceError> {
    if n == 0 {
        return Err(SliceError::InvalidArgument(
            "區段數必須大於 0".to_string(),
        ));
    }
    if n > total {
        return Err(SliceError::InvalidArgument(format!(
            "區段數 {n} 超過像素長度 {total}"
        )));
    }

    let base = total / n;
    let remainder = total % n;

    Ok((0..n)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect())
}
