use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TensorError {
    #[error("张量列表为空")]
    EmptyList,
    #[error("张量形状不一致：期望{expected:?}，实际{got:?}")]
    InconsistentShape { expected: Vec<usize>, got: Vec<usize> },
    #[error("张量形状不兼容：{len}个元素无法组成形状{shape:?}")]
    IncompatibleShape { len: usize, shape: Vec<usize> },
    #[error("形状为{0:?}的张量不是[C, H, W]格式的图像张量")]
    NotAnImage(Vec<usize>),
}
