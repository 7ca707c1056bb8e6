//! 样本类型
//!
//! 成对样本的各字段必须一同经过所有变换，以保持空间上的对应关系。

use image::RgbImage;

use super::error::DataError;
use crate::tensor::Tensor;

/// 样本中单个字段的当前形态
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// 3 通道像素网格
    Image(RgbImage),
    /// `[C, H, W]` 图像张量
    Tensor(Tensor),
}

impl Field {
    /// 像素网格的 (高, 宽)；张量字段取其后两维
    pub fn size(&self) -> Result<(u32, u32), DataError> {
        match self {
            Field::Image(image) => Ok((image.height(), image.width())),
            Field::Tensor(tensor) => {
                let (height, width) = tensor.get_image_size()?;
                Ok((height as u32, width as u32))
            }
        }
    }

    pub fn as_image(&self) -> Option<&RgbImage> {
        match self {
            Field::Image(image) => Some(image),
            Field::Tensor(_) => None,
        }
    }

    pub fn as_tensor(&self) -> Option<&Tensor> {
        match self {
            Field::Tensor(tensor) => Some(tensor),
            Field::Image(_) => None,
        }
    }
}

/// 成对样本：`image` 为 A 域图像，`map` 为 B 域图像
#[derive(Debug, Clone, PartialEq)]
pub struct PairedSample {
    pub image: Field,
    pub map: Field,
}

impl PairedSample {
    pub fn new(image: RgbImage, map: RgbImage) -> Self {
        Self {
            image: Field::Image(image),
            map: Field::Image(map),
        }
    }

    /// 按固定顺序遍历所有字段
    pub fn fields(&self) -> [(&'static str, &Field); 2] {
        [("image", &self.image), ("map", &self.map)]
    }

    /// 按固定顺序遍历所有字段的可变引用
    pub fn fields_mut(&mut self) -> [(&'static str, &mut Field); 2] {
        [("image", &mut self.image), ("map", &mut self.map)]
    }

    /// 各字段尺寸一致时返回该 (高, 宽)
    pub fn common_size(&self) -> Result<(u32, u32), DataError> {
        let (height, width) = self.image.size()?;
        let (map_height, map_width) = self.map.size()?;
        if (height, width) != (map_height, map_width) {
            return Err(DataError::ShapeMismatch {
                expected: vec![height as usize, width as usize],
                got: vec![map_height as usize, map_width as usize],
            });
        }
        Ok((height, width))
    }
}

/// 手写数字样本
#[derive(Debug, Clone, PartialEq)]
pub struct DigitSample {
    /// `[1, 28, 28]`
    pub image: Tensor,
    /// `[10]` one-hot
    pub label: Tensor,
}
