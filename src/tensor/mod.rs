use ndarray::{Array, IxDyn};

use crate::errors::TensorError;

mod image;
mod index;
mod ops {
    pub mod div;
    pub mod eq;
}
mod property;
mod shape;


/// 定义张量的结构体。其可以是标量、向量、矩阵或更高维度的数组。
/// 本库中图像张量统一为`[C, H, W]`，批次张量统一为`[N, C, H, W]`。
#[derive(Debug, Clone)]
pub struct Tensor {
    data: Array<f32, IxDyn>,
}

impl Tensor {
    /// 创建一个张量。`data`的长度必须和`shape`中所有元素的乘积相等，否则panic。
    pub fn new(data: &[f32], shape: &[usize]) -> Tensor {
        Self::from_vec(data.to_vec(), shape).unwrap_or_else(|e| panic!("{e}"))
    }

    /// 与`new`相同，但直接接管`Vec`的所有权，避免一次拷贝
    pub fn from_vec(data: Vec<f32>, shape: &[usize]) -> Result<Tensor, TensorError> {
        let len = data.len();
        Array::from_shape_vec(IxDyn(shape), data)
            .map(|data| Tensor { data })
            .map_err(|_| TensorError::IncompatibleShape {
                len,
                shape: shape.to_vec(),
            })
    }

    /// 创建一个全零张量
    pub fn zeros(shape: &[usize]) -> Tensor {
        Tensor {
            data: Array::zeros(IxDyn(shape)),
        }
    }
}
