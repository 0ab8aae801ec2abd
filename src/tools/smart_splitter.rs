//! 內容感知切割器
//!
//! 沿寬度軸切割，產生左右並排的直條（與均勻切割的
//! `SliceMode::Horizontal` 同一軸向）。切割欄位取在低視覺能量處，
//! 任何失敗都設計為由呼叫端改用均勻切割補救，不應視為致命錯誤。

use crate::tools::column_energy::column_energy_profile;
use crate::tools::image_slicer::{ImageSlice, SliceRegion};
use crate::tools::slice_error::SliceError;
use crate::tools::split_selector::select_split_columns;
use image::{DynamicImage, GenericImageView};
use std::path::Path;

#[derive(Debug)]
pub struct SmartSplitter {
    image: DynamicImage,
    width: u32,
    height: u32,
}

impl SmartSplitter {
    /// 從檔案載入來源圖片
    ///
    /// # Errors
    /// 圖片無法讀取或解碼時回傳 `Decode`。
    pub fn open(path: &Path) -> Result<Self, SliceError> {
        Ok(Self::from_image(image::open(path)?))
    }

    #[must_use]
    pub fn from_image(image: DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            image,
            width,
            height,
        }
    }

    /// 找出 `n - 1` 個內容感知切割欄位
    ///
    /// 回傳遞增排序的欄位索引；每對相鄰索引（含兩側邊界）間距
    /// 至少 `width / n` 欄。
    ///
    /// # Errors
    /// `n` 不大於 1 或超過圖片寬度時回傳 `InvalidArgument`；
    /// 找不到足夠間隔的低能量欄位時回傳 `InsufficientCandidates`。
    pub fn find_split_columns(&self, n: u32) -> Result<Vec<u32>, SliceError> {
        let profile = column_energy_profile(&self.image);
        select_split_columns(&profile, n)
    }

    /// 依內容感知切割欄位裁出 n 條直條
    ///
    /// 裁切區間為 `[0, p1), [p1, p2), …, [p_{n-1}, width)`，全高，
    /// 序號由左至右 1 起算。
    ///
    /// # Errors
    /// 同 [`Self::find_split_columns`]。
    pub fn split(&self, n: u32) -> Result<Vec<ImageSlice>, SliceError> {
        let positions = self.find_split_columns(n)?;

        let mut slices = Vec::with_capacity(n as usize);
        let mut prev_x = 0;

        for (i, x) in positions
            .into_iter()
            .chain(std::iter::once(self.width))
            .enumerate()
        {
            let region = SliceRegion {
                x0: prev_x,
                y0: 0,
                x1: x,
                y1: self.height,
            };
            slices.push(ImageSlice {
                image: self
                    .image
                    .crop_imm(region.x0, region.y0, region.width(), region.height()),
                index: i + 1,
                region,
            });
            prev_x = x;
        }

        Ok(slices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn flat_splitter(width: u32, height: u32) -> SmartSplitter {
        let image = RgbaImage::from_pixel(width, height, image::Rgba([90, 90, 90, 255]));
        SmartSplitter::from_image(DynamicImage::ImageRgba8(image))
    }

    #[test]
    fn test_flat_image_degenerate_profile_branch() {
        // 平坦圖片走「全零側寫」分支：同能量取較小索引，
        // 結果完全由 min_gap 決定
        let splitter = flat_splitter(100, 40);
        assert_eq!(splitter.find_split_columns(3).unwrap(), vec![33, 66]);
    }

    #[test]
    fn test_split_tiles_full_width() {
        let splitter = flat_splitter(100, 40);
        let slices = splitter.split(3).unwrap();

        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].region, SliceRegion { x0: 0, y0: 0, x1: 33, y1: 40 });
        assert_eq!(slices[1].region, SliceRegion { x0: 33, y0: 0, x1: 66, y1: 40 });
        assert_eq!(slices[2].region, SliceRegion { x0: 66, y0: 0, x1: 100, y1: 40 });

        for (i, s) in slices.iter().enumerate() {
            assert_eq!(s.index, i + 1);
            assert_eq!(s.image.width(), s.region.width());
            assert_eq!(s.image.height(), 40);
        }
    }

    #[test]
    fn test_split_prefers_blank_band() {
        // 左右各一塊黑白相間的粗條紋，中央留白：
        // 切割欄位應落在中央的空白帶，而不是條紋區
        let image = DynamicImage::ImageRgba8(RgbaImage::from_fn(90, 30, |x, _| {
            let busy = x < 30 || x >= 60;
            if busy && (x / 5) % 2 == 0 {
                image::Rgba([0, 0, 0, 255])
            } else {
                image::Rgba([255, 255, 255, 255])
            }
        }));
        let splitter = SmartSplitter::from_image(image);

        // n=2：min_gap=45，允許範圍恰為欄位 45，落在空白帶內
        let positions = splitter.find_split_columns(2).unwrap();
        assert_eq!(positions, vec![45]);

        let slices = splitter.split(2).unwrap();
        assert_eq!(slices[0].region.x1, 45);
        assert_eq!(slices[1].region.x0, 45);
    }

    #[test]
    fn test_invalid_segment_counts() {
        let splitter = flat_splitter(20, 20);
        assert!(matches!(
            splitter.find_split_columns(1),
            Err(SliceError::InvalidArgument(_))
        ));
        assert!(matches!(
            splitter.find_split_columns(21),
            Err(SliceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_open_missing_file_is_decode_error() {
        let err = SmartSplitter::open(Path::new("/nonexistent/圖片.png")).unwrap_err();
        assert!(matches!(err, SliceError::Decode(_)));
    }
}
