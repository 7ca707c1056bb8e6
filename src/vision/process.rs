use super::Vision;
use image::imageops::{self, FilterType};
use image::RgbImage;

impl Vision {
    /// 若图像在某一维度上小于目标尺寸，则在该维度两侧各补`目标 - 原始`个零像素；
    /// 否则原样返回。
    pub fn pad_if_needed(image: &RgbImage, height: u32, width: u32) -> RgbImage {
        let pad_x = width.saturating_sub(image.width());
        let pad_y = height.saturating_sub(image.height());
        if pad_x == 0 && pad_y == 0 {
            return image.clone();
        }

        let mut padded = RgbImage::new(image.width() + 2 * pad_x, image.height() + 2 * pad_y);
        imageops::replace(&mut padded, image, pad_x as i64, pad_y as i64);
        padded
    }

    /// 裁剪出以(`left`, `top`)为左上角、大小为`height`x`width`的区域
    pub fn crop(image: &RgbImage, top: u32, left: u32, height: u32, width: u32) -> RgbImage {
        imageops::crop_imm(image, left, top, width, height).to_image()
    }

    /// 调整图像大小，不保留宽高比
    ///
    /// 这里特意用`resize`而不是`reshape`，只为强调其只会改变尺寸，而不会改变通道数。
    pub fn resize_image(image: &RgbImage, height: u32, width: u32, filter: FilterType) -> RgbImage {
        imageops::resize(image, width, height, filter)
    }
}
