use super::Tensor;
use crate::errors::TensorError;
use ndarray::{Axis, IxDyn};

impl Tensor {
    pub fn reshape(&self, shape: &[usize]) -> Result<Self, TensorError> {
        let len = self.size();
        let data = self
            .data
            .clone()
            .into_shape(IxDyn(shape))
            .map_err(|_| TensorError::IncompatibleShape {
                len,
                shape: shape.to_vec(),
            })?;
        Ok(Self { data })
    }

    pub fn flatten(&self) -> Self {
        Self::new(&self.to_vec(), &[self.size()])
    }

    /// 在首个维度前新增一维，将多个形状完全相同的张量堆叠起来。
    /// 如：`N`个`[C, H, W]`的张量堆叠后为`[N, C, H, W]`。
    pub fn stack(tensors: &[&Self]) -> Result<Self, TensorError> {
        let first = tensors.first().ok_or(TensorError::EmptyList)?;
        if let Some(other) = tensors.iter().find(|t| !t.is_same_shape(first)) {
            return Err(TensorError::InconsistentShape {
                expected: first.shape().to_vec(),
                got: other.shape().to_vec(),
            });
        }

        let views: Vec<_> = tensors.iter().map(|t| t.data.view()).collect();
        let data = ndarray::stack(Axis(0), &views).map_err(|_| TensorError::InconsistentShape {
            expected: first.shape().to_vec(),
            got: first.shape().to_vec(),
        })?;
        Ok(Self { data })
    }

    /// 取出首个维度上第`index`个子张量（去掉首维）
    pub fn select_first(&self, index: usize) -> Self {
        Self {
            data: self.data.index_axis(Axis(0), index).to_owned(),
        }
    }
}
