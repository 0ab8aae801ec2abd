//! 低能量切割欄位的貪婪選取
//!
//! 將能量側寫轉成一組彼此間隔足夠的低能量欄位索引。
//! 純函式，不碰像素資料，能量計算見 [`crate::tools::column_energy`]。

use crate::tools::slice_error::SliceError;

/// 從能量側寫選出 `n - 1` 個彼此間隔至少 `width / n` 欄的低能量欄位
///
/// 依能量由低到高走訪欄位，能量相同時取較小的欄位索引（平坦側寫
/// 因此有確定性的結果）。距離任一邊界不足 `min_gap` 的欄位不列入
/// 候選。回傳值為遞增排序。
///
/// # Errors
/// `n` 不大於 1 或超過欄位數時回傳 `InvalidArgument`；
/// 可接受的候選不足 `n - 1` 個時回傳 `InsufficientCandidates`。
pub fn select_split_columns(profile: &[f32], n: u32) -> Result<Vec<u32>, SliceError> {
    let width = profile.len() as u32;

    if n <= 1 {
        return Err(SliceError::InvalidArgument(
            "內容感知切割需要 n 大於 1".to_string(),
        ));
    }
    if n > width {
        return Err(SliceError::InvalidArgument(format!(
            "區段數 {n} 超過圖片寬度 {width}"
        )));
    }

    let min_gap = width / n;
    let needed = (n - 1) as usize;

    // 能量低者優先，同能量取較小索引
    let mut order: Vec<u32> = (0..width).collect();
    order.sort_by(|&a, &b| {
        profile[a as usize]
            .total_cmp(&profile[b as usize])
            .then(a.cmp(&b))
    });

    let mut accepted: Vec<u32> = Vec::with_capacity(needed);
    for idx in order {
        // 距離邊界不足 min_gap 的欄位不可作為切割點
        if idx < min_gap || idx > width - min_gap {
            continue;
        }

        if accepted
            .iter()
            .all(|&s| idx.abs_diff(s) >= min_gap)
        {
            accepted.push(idx);
        }

        if accepted.len() == needed {
            break;
        }
    }

    if accepted.len() < needed {
        return Err(SliceError::InsufficientCandidates {
            needed,
            found: accepted.len(),
        });
    }

    accepted.sort_unstable();
    Ok(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 含虛擬邊界（0 與 width）在內，相鄰間距必須達到 min_gap
    fn assert_spacing(positions: &[u32], width: u32, n: u32) {
        let min_gap = width / n;
        let mut previous = 0;
        for &p in positions {
            assert!(p - previous >= min_gap, "間距 {previous}..{p} 不足 {min_gap}");
            previous = p;
        }
        assert!(width - previous >= min_gap);
    }

    #[test]
    fn test_flat_profile_deterministic_tie_break() {
        // 全零側寫：同能量取較小索引，結果由 min_gap 完全決定
        let profile = vec![0.0f32; 100];

        assert_eq!(select_split_columns(&profile, 3).unwrap(), vec![33, 66]);
        assert_eq!(select_split_columns(&profile, 4).unwrap(), vec![25, 50, 75]);

        assert_spacing(&[33, 66], 100, 3);
        assert_spacing(&[25, 50, 75], 100, 4);
    }

    #[test]
    fn test_low_energy_valley_is_preferred() {
        // 能量在欄位 47..=52 低谷，其餘偏高
        let mut profile = vec![1.0f32; 100];
        for value in &mut profile[47..=52] {
            *value = 0.01;
        }

        let positions = select_split_columns(&profile, 2).unwrap();
        assert_eq!(positions, vec![50]);
    }

    #[test]
    fn test_result_sorted_with_border_spacing() {
        // 低谷故意以非遞增順序的能量排列，驗證回傳仍為遞增
        let mut profile = vec![0.8f32; 120];
        profile[80] = 0.0;
        profile[40] = 0.1;

        let positions = select_split_columns(&profile, 3).unwrap();
        assert_eq!(positions, vec![40, 80]);
        assert_spacing(&positions, 120, 3);
    }

    #[test]
    fn test_blocked_greedy_fails_with_insufficient_candidates() {
        // 唯一的零能量欄位擋在允許範圍中央，之後找不到間隔足夠的第二點
        let mut profile = vec![1.0f32; 120];
        profile[55] = 0.0;

        // n=3：min_gap=40，先接受 55，第二點需距 55 與兩側邊界都 >= 40，不存在
        let err = select_split_columns(&profile, 3).unwrap_err();
        match err {
            SliceError::InsufficientCandidates { needed, found } => {
                assert_eq!(needed, 2);
                assert_eq!(found, 1);
            }
            other => panic!("預期 InsufficientCandidates，得到 {other:?}"),
        }
    }

    #[test]
    fn test_invalid_arguments() {
        let profile = vec![0.0f32; 10];
        assert!(matches!(
            select_split_columns(&profile, 1),
            Err(SliceError::InvalidArgument(_))
        ));
        assert!(matches!(
            select_split_columns(&profile, 11),
            Err(SliceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_narrow_width_keeps_min_gap() {
        let profile = vec![0.0f32; 8];
        // n=6：min_gap=1，允許範圍 1..=7，需要 5 點
        let positions = select_split_columns(&profile, 6).unwrap();
        assert_eq!(positions, vec![1, 2, 3, 4, 5]);
        assert_spacing(&positions, 8, 6);
    }
}
