//! 数据变换
//!
//! 每个变换只有一个能力：接收一个样本，返回（可能就地修改过的）样本。
//! 变换链 [`Compose`] 按顺序依次调用各变换，本身也是一个变换。
//!
//! # 使用示例
//!
//! ```ignore
//! let train = Compose::new()
//!     .then(RandomCrop::new(256))
//!     .then(ToTensor)
//!     .then(Normalize::new(&[0.5; 3], &[0.5; 3]));
//! let sample = train.apply(sample)?;
//! ```

use std::fmt;

use ndarray::Axis;

use super::error::DataError;
use crate::tensor::Tensor;

mod geometry;
mod tensor;

pub use geometry::{RandomCrop, StrideAlign};
pub use tensor::{Normalize, ToTensor};

/// 作用于样本 `S` 的变换
pub trait Transform<S>: Send + Sync {
    fn apply(&self, sample: S) -> Result<S, DataError>;
}

/// 任意满足签名的闭包都可以直接作为变换使用
impl<S, F> Transform<S> for F
where
    F: Fn(S) -> Result<S, DataError> + Send + Sync,
{
    fn apply(&self, sample: S) -> Result<S, DataError> {
        self(sample)
    }
}

/// 线性变换链，无分支
pub struct Compose<S> {
    stages: Vec<Box<dyn Transform<S>>>,
}

impl<S> Compose<S> {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// 在链尾追加一个变换
    pub fn then<T: Transform<S> + 'static>(mut self, transform: T) -> Self {
        self.stages.push(Box::new(transform));
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl<S> fmt::Debug for Compose<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compose")
            .field("stages", &self.stages.len())
            .finish()
    }
}

impl<S> Default for Compose<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Transform<S> for Compose<S> {
    fn apply(&self, sample: S) -> Result<S, DataError> {
        self.stages
            .iter()
            .try_fold(sample, |sample, stage| stage.apply(sample))
    }
}

/// 将 0-255 像素值归一化到 0-1
///
/// # 参数
/// - `tensor`: 输入 Tensor，值范围 [0, 255]
///
/// # 返回
/// 归一化后的 Tensor，值范围 [0, 1]
pub fn normalize_pixels(tensor: &Tensor) -> Tensor {
    tensor / 255.0
}

/// 将类别索引转换为 one-hot 编码
///
/// # 参数
/// - `labels`: 类别索引 Tensor，形状 [N] 或 [N, 1]，值为 0..num_classes
/// - `num_classes`: 类别总数
///
/// # 返回
/// one-hot 编码 Tensor，形状 [N, num_classes]；超出范围的索引对应全零行
pub fn one_hot(labels: &Tensor, num_classes: usize) -> Tensor {
    let flat = labels.flatten();
    let n = flat.size();

    let mut data = vec![0.0; n * num_classes];
    for i in 0..n {
        let class_idx = flat[[i]] as usize;
        if class_idx < num_classes {
            data[i * num_classes + class_idx] = 1.0;
        }
    }

    Tensor::new(&data, &[n, num_classes])
}

/// 对 `[C, H, W]` 张量逐通道做 `(x - mean[c]) / std[c]`
pub fn normalize_tensor(tensor: Tensor, mean: &[f32], std: &[f32]) -> Result<Tensor, DataError> {
    map_channels(tensor, mean.len(), |c, x| (x - mean[c]) / std[c])
}

/// [`normalize_tensor`] 的逆变换：逐通道做 `x * std[c] + mean[c]`
pub fn denormalize(tensor: Tensor, mean: &[f32], std: &[f32]) -> Result<Tensor, DataError> {
    map_channels(tensor, mean.len(), |c, x| x * std[c] + mean[c])
}

fn map_channels<F>(mut tensor: Tensor, channels: usize, f: F) -> Result<Tensor, DataError>
where
    F: Fn(usize, f32) -> f32,
{
    // 只比较通道维，高宽任意
    let shape = tensor.shape().to_vec();
    if shape.len() != 3 || shape[0] != channels {
        return Err(DataError::ShapeMismatch {
            expected: vec![channels],
            got: shape,
        });
    }

    for (c, mut plane) in tensor.view_mut().axis_iter_mut(Axis(0)).enumerate() {
        plane.mapv_inplace(|x| f(c, x));
    }
    Ok(tensor)
}
