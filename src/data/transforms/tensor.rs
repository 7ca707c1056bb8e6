use super::{Transform, normalize_tensor};
use crate::data::error::DataError;
use crate::data::sample::{DigitSample, Field, PairedSample};
use crate::tensor::Tensor;

/// 把每个像素网格字段转为 `[3, H, W]`、值在 [0,1] 的张量
#[derive(Debug, Clone, Copy, Default)]
pub struct ToTensor;

impl Transform<PairedSample> for ToTensor {
    fn apply(&self, mut sample: PairedSample) -> Result<PairedSample, DataError> {
        for (name, field) in sample.fields_mut() {
            let tensor = match field {
                Field::Image(image) => Tensor::from_rgb_image(image),
                Field::Tensor(_) => {
                    return Err(DataError::UnexpectedField {
                        field: name,
                        expected: "像素网格",
                    });
                }
            };
            *field = Field::Tensor(tensor);
        }
        Ok(sample)
    }
}

/// 逐通道标准化：`(x - mean[c]) / std[c]`，所有字段共用同一组均值和标准差
#[derive(Debug, Clone, PartialEq)]
pub struct Normalize {
    mean: Vec<f32>,
    std: Vec<f32>,
}

impl Normalize {
    /// # Panics
    /// `mean` 为空、与 `std` 长度不一致，或 `std` 中有零值时
    pub fn new(mean: &[f32], std: &[f32]) -> Self {
        assert!(!mean.is_empty(), "Normalize: mean 不能为空");
        assert_eq!(
            mean.len(),
            std.len(),
            "Normalize: mean 与 std 的长度必须一致，得到 {} vs {}",
            mean.len(),
            std.len()
        );
        assert!(
            std.iter().all(|s| *s != 0.0),
            "Normalize: std 中不能有零值"
        );
        Self {
            mean: mean.to_vec(),
            std: std.to_vec(),
        }
    }

    pub fn mean(&self) -> &[f32] {
        &self.mean
    }

    pub fn std(&self) -> &[f32] {
        &self.std
    }
}

impl Transform<PairedSample> for Normalize {
    fn apply(&self, mut sample: PairedSample) -> Result<PairedSample, DataError> {
        for (name, field) in sample.fields_mut() {
            let tensor = match std::mem::replace(field, Field::Tensor(Tensor::zeros(&[0]))) {
                Field::Tensor(tensor) => tensor,
                Field::Image(_) => {
                    return Err(DataError::UnexpectedField {
                        field: name,
                        expected: "张量（请在 Normalize 之前使用 ToTensor）",
                    });
                }
            };
            *field = Field::Tensor(normalize_tensor(tensor, &self.mean, &self.std)?);
        }
        Ok(sample)
    }
}

impl Transform<DigitSample> for Normalize {
    fn apply(&self, mut sample: DigitSample) -> Result<DigitSample, DataError> {
        sample.image = normalize_tensor(sample.image, &self.mean, &self.std)?;
        Ok(sample)
    }
}
