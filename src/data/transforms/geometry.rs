//! 几何变换：随机裁剪与步长对齐
//!
//! 两者都只作用于像素网格字段，且同一个样本的所有字段使用同一组几何参数。

use std::sync::{Mutex, PoisonError};

use image::imageops::FilterType;
use image::RgbImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Transform;
use crate::data::error::DataError;
use crate::data::sample::{Field, PairedSample};
use crate::vision::Vision;

fn expect_image<'a>(name: &'static str, field: &'a Field) -> Result<&'a RgbImage, DataError> {
    field.as_image().ok_or(DataError::UnexpectedField {
        field: name,
        expected: "像素网格（请在 ToTensor 之前使用几何变换）",
    })
}

/// 随机裁剪
///
/// 字段小于裁剪尺寸时，先在不足的维度两侧各补 `裁剪尺寸 - 原尺寸` 个零像素；
/// 之后对整个样本只抽取一次裁剪原点，所有字段裁剪同一区域。
pub struct RandomCrop {
    height: u32,
    width: u32,
    rng: Option<Mutex<StdRng>>,
}

impl RandomCrop {
    /// 正方形裁剪
    pub fn new(size: u32) -> Self {
        Self::with_size(size, size)
    }

    /// 指定高、宽的裁剪
    pub fn with_size(height: u32, width: u32) -> Self {
        assert!(
            height > 0 && width > 0,
            "RandomCrop: 裁剪尺寸必须大于 0，得到 {height}x{width}"
        );
        Self {
            height,
            width,
            rng: None,
        }
    }

    /// 使用固定种子，使裁剪位置可复现
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = Some(Mutex::new(StdRng::seed_from_u64(seed)));
        self
    }

    /// 裁剪尺寸 (高, 宽)
    pub fn size(&self) -> (u32, u32) {
        (self.height, self.width)
    }

    /// 在 `[0, max_top] x [0, max_left]` 中均匀抽取裁剪原点 (top, left)
    fn origin(&self, max_top: u32, max_left: u32) -> (u32, u32) {
        match &self.rng {
            Some(rng) => {
                let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
                (rng.gen_range(0..=max_top), rng.gen_range(0..=max_left))
            }
            None => {
                let mut rng = rand::thread_rng();
                (rng.gen_range(0..=max_top), rng.gen_range(0..=max_left))
            }
        }
    }
}

impl Transform<PairedSample> for RandomCrop {
    fn apply(&self, mut sample: PairedSample) -> Result<PairedSample, DataError> {
        sample.common_size()?;

        for (name, field) in sample.fields_mut() {
            let padded = Vision::pad_if_needed(expect_image(name, field)?, self.height, self.width);
            *field = Field::Image(padded);
        }

        let (height, width) = sample.common_size()?;
        let (top, left) = self.origin(height - self.height, width - self.width);

        for (name, field) in sample.fields_mut() {
            let cropped = Vision::crop(
                expect_image(name, field)?,
                top,
                left,
                self.height,
                self.width,
            );
            *field = Field::Image(cropped);
        }
        Ok(sample)
    }
}

/// 步长对齐
///
/// 先按可选的 `down_sample` 缩小，再把高、宽各自向下取整到 `stride` 的整数倍，
/// 最后把所有字段缩放到该尺寸。目标尺寸以 `image` 字段为准。
/// 用于评估阶段满足网络对输入尺寸整除性的要求。
#[derive(Debug, Clone, Copy)]
pub struct StrideAlign {
    stride: u32,
    down_sample: Option<f32>,
    filter: FilterType,
}

impl Default for StrideAlign {
    fn default() -> Self {
        Self::new(16)
    }
}

impl StrideAlign {
    pub fn new(stride: u32) -> Self {
        assert!(stride > 0, "StrideAlign: stride 必须大于 0");
        Self {
            stride,
            down_sample: None,
            filter: FilterType::Triangle,
        }
    }

    /// 对齐前先将尺寸除以 `factor`
    pub fn down_sample(mut self, factor: f32) -> Self {
        assert!(
            factor.is_finite() && factor > 0.0,
            "StrideAlign: down_sample 必须为正数，得到 {factor}"
        );
        self.down_sample = Some(factor);
        self
    }

    /// 缩放所用的插值方式，默认双线性（`Triangle`）
    pub fn filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    /// 计算输入尺寸对齐后的 (高, 宽)
    pub fn target_size(&self, height: u32, width: u32) -> Result<(u32, u32), DataError> {
        let factor = f64::from(self.down_sample.unwrap_or(1.0));
        let stride = f64::from(self.stride);
        let align = |len: u32| ((f64::from(len) / factor / stride).floor() as u32) * self.stride;

        let (target_height, target_width) = (align(height), align(width));
        if target_height == 0 || target_width == 0 {
            return Err(DataError::ImageTooSmall {
                height,
                width,
                stride: self.stride,
            });
        }
        Ok((target_height, target_width))
    }
}

impl Transform<PairedSample> for StrideAlign {
    fn apply(&self, mut sample: PairedSample) -> Result<PairedSample, DataError> {
        let (width, height) = expect_image("image", &sample.image)?.dimensions();
        let (target_height, target_width) = self.target_size(height, width)?;

        for (name, field) in sample.fields_mut() {
            let resized = Vision::resize_image(
                expect_image(name, field)?,
                target_height,
                target_width,
                self.filter,
            );
            *field = Field::Image(resized);
        }
        Ok(sample)
    }
}
