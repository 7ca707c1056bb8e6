use super::Tensor;
use crate::errors::TensorError;
use image::{Rgb, RgbImage};

impl Tensor {
    /// 将`RgbImage`转为`[3, H, W]`的图像张量，像素值由[0,255]缩放到[0,1]
    pub fn from_rgb_image(image: &RgbImage) -> Tensor {
        let (width, height) = (image.width() as usize, image.height() as usize);
        let mut tensor = Tensor::zeros(&[3, height, width]);
        for (x, y, pixel) in image.enumerate_pixels() {
            for c in 0..3 {
                tensor[[c, y as usize, x as usize]] = pixel[c] as f32 / 255.0;
            }
        }
        tensor
    }

    /// `from_rgb_image`的逆过程：`[3, H, W]`且值在[0,1]的张量转回`RgbImage`。
    /// 超出[0,1]的值会被截断，四舍五入到最近的整数像素。
    pub fn to_rgb_image(&self) -> Result<RgbImage, TensorError> {
        let (height, width) = self.get_image_size()?;
        if self.shape()[0] != 3 {
            return Err(TensorError::NotAnImage(self.shape().to_vec()));
        }
        let mut image = RgbImage::new(width as u32, height as u32);
        for (x, y, pixel) in image.enumerate_pixels_mut() {
            let mut rgb = [0u8; 3];
            for (c, value) in rgb.iter_mut().enumerate() {
                let v = self[[c, y as usize, x as usize]].clamp(0.0, 1.0);
                *value = (v * 255.0).round() as u8;
            }
            *pixel = Rgb(rgb);
        }
        Ok(image)
    }

    /// 确定是`[C, H, W]`图像张量的情况下，返回该图像的高度和宽度
    pub fn get_image_size(&self) -> Result<(usize, usize), TensorError> {
        match self.shape() {
            &[_, height, width] => Ok((height, width)),
            other => Err(TensorError::NotAnImage(other.to_vec())),
        }
    }
}
