//! 数据加载错误类型定义

use std::path::PathBuf;
use thiserror::Error;

use crate::errors::TensorError;

/// 数据加载相关错误
#[derive(Debug, Error)]
pub enum DataError {
    /// 文件或目录未找到
    #[error("文件未找到: {0}")]
    FileNotFound(PathBuf),

    /// IO 错误
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 图像解码/编码错误（文件损坏、格式不支持等）
    #[error("图像错误: {0}")]
    Image(#[from] image::ImageError),

    /// 格式错误（如 magic number 不匹配）
    #[error("格式错误: {0}")]
    Format(String),

    /// 索引越界
    #[error("索引越界: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// 形状不匹配
    #[error("形状不匹配: 期望 {expected:?}, 实际 {got:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    /// 张量运算错误
    #[error("张量错误: {0}")]
    Tensor(#[from] TensorError),

    /// 成对目录中的文件数量不一致
    #[error("成对文件数量不一致: A 域 {a} 个, B 域 {b} 个")]
    PairCountMismatch { a: usize, b: usize },

    /// 按文件名配对时，某个文件在另一域中没有同名文件
    #[error("文件 {0} 在另一域中没有同名配对文件")]
    UnpairedFile(PathBuf),

    /// 字段的当前形态不适用于该变换（如对张量做裁剪）
    #[error("字段 `{field}` 应为{expected}")]
    UnexpectedField {
        field: &'static str,
        expected: &'static str,
    },

    /// 图像过小，对齐后的尺寸为零
    #[error("图像尺寸 {height}x{width} 过小，无法按步长 {stride} 对齐")]
    ImageTooSmall {
        height: u32,
        width: u32,
        stride: u32,
    },

    /// 下载错误
    #[error("下载错误: {0}")]
    Download(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 配置文件解析错误
    #[error("配置解析错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 取样线程池构建失败
    #[error("线程池构建失败: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
