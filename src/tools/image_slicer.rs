//! 均勻切割引擎
//!
//! 依水平、垂直或網格模式將圖片切成緊密鋪滿原圖的矩形區域，
//! 每個區域裁出一張獨立的子圖。方向慣例：`Horizontal` 沿寬度軸
//! 切割，產生左右並排的直條；`Vertical` 沿高度軸切割，產生上下
//! 堆疊的橫條。

use crate::tools::segment_partitioner::partition;
use crate::tools::slice_error::SliceError;
use image::{DynamicImage, GenericImageView};
use std::path::Path;

/// 切割模式與模式專屬參數
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceMode {
    /// 沿寬度軸切成 n 條左右並排的直條
    Horizontal { n: u32 },
    /// 沿高度軸切成 n 條上下堆疊的橫條
    Vertical { n: u32 },
    /// rows × cols 網格，列優先編號
    Grid { rows: u32, cols: u32 },
}

impl SliceMode {
    /// 從字串介面（設定檔、外部呼叫）解析模式與參數
    ///
    /// # Errors
    /// 模式名稱不支援，或該模式必要的參數缺漏時回傳 `InvalidArgument`。
    pub fn parse(
        mode: &str,
        n: Option<u32>,
        rows: Option<u32>,
        cols: Option<u32>,
    ) -> Result<Self, SliceError> {
        match mode {
            "horizontal" => n
                .map(|n| Self::Horizontal { n })
                .ok_or_else(|| SliceError::InvalidArgument("水平切割需要參數 n".to_string())),
            "vertical" => n
                .map(|n| Self::Vertical { n })
                .ok_or_else(|| SliceError::InvalidArgument("垂直切割需要參數 n".to_string())),
            "grid" => match (rows, cols) {
                (Some(rows), Some(cols)) => Ok(Self::Grid { rows, cols }),
                _ => Err(SliceError::InvalidArgument(
                    "網格切割需要參數 rows 與 cols".to_string(),
                )),
            },
            other => Err(SliceError::InvalidArgument(format!(
                "不支援的切割模式: {other}"
            ))),
        }
    }
}

/// 半開區間矩形 `[x0, x1) × [y0, y1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceRegion {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl SliceRegion {
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.y1 - self.y0
    }
}

/// 一張切割輸出：子圖、1 起算的序號、來源矩形
#[derive(Debug)]
pub struct ImageSlice {
    pub image: DynamicImage,
    pub index: usize,
    pub region: SliceRegion,
}

/// 均勻切割器
///
/// 持有來源圖片；所有切割操作只讀取像素並產生獨立的子圖複本，
/// 不會改動來源。
pub struct ImageSlicer {
    image: DynamicImage,
    width: u32,
    height: u32,
}

impl ImageSlicer {
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

    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// 統一切割入口
    ///
    /// 產出的矩形恰好鋪滿整張圖（無縫隙、無重疊），序號依模式
    /// 由左至右、由上至下或列優先遞增。
    ///
    /// # Errors
    /// 區段數與圖片尺寸不相容時回傳 `InvalidArgument`。
    pub fn slice(&self, mode: &SliceMode) -> Result<Vec<ImageSlice>, SliceError> {
        match *mode {
            SliceMode::Horizontal { n } => self.slice_horizontal(n),
            SliceMode::Vertical { n } => self.slice_vertical(n),
            SliceMode::Grid { rows, cols } => self.slice_grid(rows, cols),
        }
    }

    fn crop(&self, region: SliceRegion, index: usize) -> ImageSlice {
        ImageSlice {
            image: self
                .image
                .crop_imm(region.x0, region.y0, region.width(), region.height()),
            index,
            region,
        }
    }

    fn slice_horizontal(&self, n: u32) -> Result<Vec<ImageSlice>, SliceError> {
        let widths = partition(self.width, n)?;
        let mut slices = Vec::with_capacity(widths.len());

        let mut x = 0;
        for (i, w) in widths.into_iter().enumerate() {
            let region = SliceRegion {
                x0: x,
                y0: 0,
                x1: x + w,
                y1: self.height,
            };
            slices.push(self.crop(region, i + 1));
            x += w;
        }

        Ok(slices)
    }

    fn slice_vertical(&self, n: u32) -> Result<Vec<ImageSlice>, SliceError> {
        let heights = partition(self.height, n)?;
        let mut slices = Vec::with_capacity(heights.len());

        let mut y = 0;
        for (i, h) in heights.into_iter().enumerate() {
            let region = SliceRegion {
                x0: 0,
                y0: y,
                x1: self.width,
                y1: y + h,
            };
            slices.push(self.crop(region, i + 1));
            y += h;
        }

        Ok(slices)
    }

    fn slice_grid(&self, rows: u32, cols: u32) -> Result<Vec<ImageSlice>, SliceError> {
        let row_heights = partition(self.height, rows)?;
        let col_widths = partition(self.width, cols)?;

        let mut slices = Vec::with_capacity(row_heights.len() * col_widths.len());
        let mut index = 1;
        let mut y = 0;

        for rh in row_heights {
            let mut x = 0;
            for &cw in &col_widths {
                let region = SliceRegion {
                    x0: x,
                    y0: y,
                    x1: x + cw,
                    y1: y + rh,
                };
                slices.push(self.crop(region, index));
                index += 1;
                x += cw;
            }
            y += rh;
        }

        Ok(slices)
    }
}
