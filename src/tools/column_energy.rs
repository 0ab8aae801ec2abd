//! 逐欄視覺能量側寫
//!
//! 灰階化後以 Canny 取得二值邊緣圖，逐欄加總邊緣強度作為
//! 「視覺內容量」的代理指標。

use image::DynamicImage;
use imageproc::edges::canny;

/// Canny 邊緣偵測的滯後閾值
const CANNY_LOW_THRESHOLD: f32 = 50.0;
const CANNY_HIGH_THRESHOLD: f32 = 150.0;

/// 正規化分母的保護值，避免全零側寫除以零
const NORMALIZE_EPSILON: f32 = 1e-6;

/// 計算圖片的逐欄能量側寫
///
/// 回傳每欄一個值的序列，以 `(最大值 + epsilon)` 正規化到 [0, 1]；
/// 全零側寫（平坦圖片）正規化後仍為全零。
#[must_use]
pub fn column_energy_profile(image: &DynamicImage) -> Vec<f32> {
    let gray = image.to_luma8();
    let edges = canny(&gray, CANNY_LOW_THRESHOLD, CANNY_HIGH_THRESHOLD);

    let (width, height) = edges.dimensions();
    let mut energy = vec![0.0f32; width as usize];

    for y in 0..height {
        for x in 0..width {
            energy[x as usize] += f32::from(edges.get_pixel(x, y).0[0]);
        }
    }

    let max = energy.iter().copied().fold(0.0f32, f32::max);
    for value in &mut energy {
        *value /= max + NORMALIZE_EPSILON;
    }

    energy
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn test_flat_image_has_zero_profile() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            64,
            32,
            image::Rgba([200, 200, 200, 255]),
        ));
        let profile = column_energy_profile(&image);

        assert_eq!(profile.len(), 64);
        assert!(profile.iter().all(|&e| e == 0.0));
    }

    #[test]
    fn test_contrast_boundary_registers_energy() {
        // 左半黑、右半白：垂直分界附近應有能量，遠離分界處為零
        let image = DynamicImage::ImageRgba8(RgbaImage::from_fn(64, 32, |x, _| {
            if x < 32 {
                image::Rgba([0, 0, 0, 255])
            } else {
                image::Rgba([255, 255, 255, 255])
            }
        }));
        let profile = column_energy_profile(&image);

        assert_eq!(profile.len(), 64);
        let peak = profile.iter().copied().fold(0.0f32, f32::max);
        assert!(peak > 0.9, "分界處應接近正規化上限");

        // 邊界能量集中在分界附近；圖片左右兩端應保持為零
        assert!(profile[..16].iter().all(|&e| e == 0.0));
        assert!(profile[48..].iter().all(|&e| e == 0.0));
    }

    #[test]
    fn test_profile_values_are_normalized() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_fn(48, 48, |x, _| {
            if (24..26).contains(&x) {
                image::Rgba([0, 0, 0, 255])
            } else {
                image::Rgba([255, 255, 255, 255])
            }
        }));
        let profile = column_energy_profile(&image);

        assert!(profile.iter().all(|&e| (0.0..=1.0).contains(&e)));
    }
}
