//! 批次拼接
//!
//! 把若干样本沿新增的首维堆叠成一个批次张量。

use super::error::DataError;
use super::sample::{DigitSample, Field, PairedSample};
use crate::tensor::Tensor;

/// 可拼接成批次的样本
pub trait Collate: Sized {
    type Batch: Send;

    fn collate(samples: Vec<Self>) -> Result<Self::Batch, DataError>;
}

/// 成对样本批次
#[derive(Debug, Clone, PartialEq)]
pub struct PairedBatch {
    /// `[N, 3, H, W]`
    pub image: Tensor,
    /// `[N, 3, H, W]`
    pub map: Tensor,
}

impl PairedBatch {
    /// 批次中的样本数
    pub fn len(&self) -> usize {
        self.image.shape()[0]
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 手写数字批次
#[derive(Debug, Clone, PartialEq)]
pub struct DigitBatch {
    /// `[N, 1, 28, 28]`
    pub images: Tensor,
    /// `[N, 10]`
    pub labels: Tensor,
}

impl DigitBatch {
    pub fn len(&self) -> usize {
        self.images.shape()[0]
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn field_tensor<'a>(name: &'static str, field: &'a Field) -> Result<&'a Tensor, DataError> {
    field.as_tensor().ok_or(DataError::UnexpectedField {
        field: name,
        expected: "张量（拼接批次前需要 ToTensor）",
    })
}

impl Collate for PairedSample {
    type Batch = PairedBatch;

    fn collate(samples: Vec<Self>) -> Result<PairedBatch, DataError> {
        let images = samples
            .iter()
            .map(|s| field_tensor("image", &s.image))
            .collect::<Result<Vec<_>, _>>()?;
        let maps = samples
            .iter()
            .map(|s| field_tensor("map", &s.map))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PairedBatch {
            image: Tensor::stack(&images)?,
            map: Tensor::stack(&maps)?,
        })
    }
}

impl Collate for DigitSample {
    type Batch = DigitBatch;

    fn collate(samples: Vec<Self>) -> Result<DigitBatch, DataError> {
        let images: Vec<_> = samples.iter().map(|s| &s.image).collect();
        let labels: Vec<_> = samples.iter().map(|s| &s.label).collect();
        Ok(DigitBatch {
            images: Tensor::stack(&images)?,
            labels: Tensor::stack(&labels)?,
        })
    }
}
