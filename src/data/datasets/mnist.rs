//! MNIST 手写数字数据集
//!
//! 支持：
//! - IDX 二进制格式解析（支持 .gz 压缩）
//! - 像素归一化 (0-255 → 0-1)
//! - 标签 one-hot 编码
//! - 缓存目录不存在时自动创建，缺失文件时自动下载（带 MD5 校验）
//! - 逐样本变换链

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tracing::info;

use crate::data::config::DataConfig;
use crate::data::dataloader::DataLoader;
use crate::data::dataset::Dataset;
use crate::data::download;
use crate::data::error::DataError;
use crate::data::sample::DigitSample;
use crate::data::transforms::{Compose, Normalize, Transform, normalize_pixels, one_hot};
use crate::tensor::Tensor;

/// MNIST 下载地址（使用 AWS S3 镜像，原官网 yann.lecun.com 不稳定）
const MNIST_BASE_URL: &str = "https://ossci-datasets.s3.amazonaws.com/mnist/";

/// MNIST 文件信息：(压缩文件名, MD5)
const MNIST_FILES: [(&str, &str); 4] = [
    (
        "train-images-idx3-ubyte.gz",
        "f68b3c2dcbeaaa9fbdd348bbdeb94873",
    ),
    (
        "train-labels-idx1-ubyte.gz",
        "d53e105ee54ea40749a09fcbcd1e9432",
    ),
    (
        "t10k-images-idx3-ubyte.gz",
        "9fb629c4189551a2d022fa330f9573f3",
    ),
    (
        "t10k-labels-idx1-ubyte.gz",
        "ec29112dd5afa0611ce80d1b7f02629c",
    ),
];

/// MNIST 像素（归一化到 [0,1] 后）的全局均值
pub const MNIST_MEAN: [f32; 1] = [0.1307];
/// MNIST 像素（归一化到 [0,1] 后）的全局标准差
pub const MNIST_STD: [f32; 1] = [0.3081];

const IMAGE_SIDE: usize = 28;
const NUM_CLASSES: usize = 10;

/// MNIST 手写数字数据集
///
/// 包含 60,000 个训练样本和 10,000 个测试样本。
/// 每个样本是 28x28 的灰度图像，标签为 0-9。
#[derive(Debug)]
pub struct MnistDataset {
    /// 图像数据 [N, 1, 28, 28]，值在 [0, 1]
    images: Tensor,
    /// 标签数据 [N, 10] (one-hot)
    labels: Tensor,
    /// 样本数量
    len: usize,
    transform: Option<Compose<DigitSample>>,
}

impl MnistDataset {
    /// 完整加载 API
    ///
    /// # 参数
    /// - `root`: 数据目录，None 则使用默认 (~/.cache/pix2pix_data/datasets/mnist)，不存在时会被创建
    /// - `train`: true=训练集(60000), false=测试集(10000)
    /// - `download`: true=自动下载缺失文件
    pub fn load(root: Option<&Path>, train: bool, download: bool) -> Result<Self, DataError> {
        let data_dir = root
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_data_dir().join("mnist"));
        std::fs::create_dir_all(&data_dir)?;

        let (images_file, labels_file) = if train {
            ("train-images-idx3-ubyte", "train-labels-idx1-ubyte")
        } else {
            ("t10k-images-idx3-ubyte", "t10k-labels-idx1-ubyte")
        };

        let images_path = ensure_file(&data_dir, images_file, download)?;
        let labels_path = ensure_file(&data_dir, labels_file, download)?;

        let images_raw = parse_idx_images(&images_path)?;
        let labels_raw = parse_idx_labels(&labels_path)?;

        let len = labels_raw.size();
        if images_raw.shape()[0] != len {
            return Err(DataError::ShapeMismatch {
                expected: vec![len, IMAGE_SIDE * IMAGE_SIDE],
                got: images_raw.shape().to_vec(),
            });
        }

        // 归一化像素值 [0, 255] -> [0, 1]，并重塑为 [N, 1, 28, 28] (NCHW 格式)
        let images = normalize_pixels(&images_raw).reshape(&[len, 1, IMAGE_SIDE, IMAGE_SIDE])?;
        let labels = one_hot(&labels_raw, NUM_CLASSES);

        info!(dir = %data_dir.display(), train, len, "MNIST 加载完成");
        Ok(Self {
            images,
            labels,
            len,
            transform: None,
        })
    }

    /// 便捷 API：加载训练集（默认路径，自动下载）
    pub fn train() -> Result<Self, DataError> {
        Self::load(None, true, true)
    }

    /// 便捷 API：加载测试集（默认路径，自动下载）
    pub fn test() -> Result<Self, DataError> {
        Self::load(None, false, true)
    }

    /// 设置逐样本变换链，`get` 时生效
    pub fn with_transform(mut self, transform: Compose<DigitSample>) -> Self {
        self.transform = Some(transform);
        self
    }

    /// 返回数据集中的样本数量
    pub fn len(&self) -> usize {
        self.len
    }

    /// 数据集是否为空
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 获取第 index 个样本
    ///
    /// - image: [1, 28, 28]（经过变换链）
    /// - label: [10] (one-hot)
    pub fn get(&self, index: usize) -> Result<DigitSample, DataError> {
        if index >= self.len {
            return Err(DataError::IndexOutOfBounds {
                index,
                len: self.len,
            });
        }

        let sample = DigitSample {
            image: self.images.select_first(index),
            label: self.labels.select_first(index),
        };
        match &self.transform {
            Some(transform) => transform.apply(sample),
            None => Ok(sample),
        }
    }
}

impl Dataset for MnistDataset {
    type Item = DigitSample;

    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, index: usize) -> Result<DigitSample, DataError> {
        MnistDataset::get(self, index)
    }
}

/// MNIST 的默认变换链：按全局均值、标准差标准化
pub fn mnist_transform() -> Compose<DigitSample> {
    Compose::new().then(Normalize::new(&MNIST_MEAN, &MNIST_STD))
}

/// 按配置加载 MNIST（`mnist_data_path`，缺失时自动下载）并挂上默认变换链
pub fn mnist_dataset(config: &DataConfig, train: bool) -> Result<MnistDataset, DataError> {
    Ok(MnistDataset::load(Some(config.mnist_data_path.as_path()), train, true)?
        .with_transform(mnist_transform()))
}

/// 按配置构建 MNIST 的批量加载器
///
/// - 训练：`batch_size`，打乱，丢弃末尾不完整批次
/// - 测试：`test_batch_size`，保持顺序，保留末尾批次
pub fn mnist_loader(
    config: &DataConfig,
    train: bool,
) -> Result<DataLoader<MnistDataset>, DataError> {
    config.validate()?;
    let dataset = mnist_dataset(config, train)?;
    Ok(if train {
        DataLoader::for_training(dataset, config)
    } else {
        DataLoader::for_evaluation(dataset, config)
    })
}

/// 获取默认数据目录
pub fn default_data_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pix2pix_data")
        .join("datasets")
}

/// 确保文件存在，必要时下载
fn ensure_file(data_dir: &Path, base_name: &str, download: bool) -> Result<PathBuf, DataError> {
    // 优先检查解压后的文件
    let uncompressed_path = data_dir.join(base_name);
    if uncompressed_path.exists() {
        return Ok(uncompressed_path);
    }

    let gz_name = format!("{base_name}.gz");
    let gz_path = data_dir.join(&gz_name);
    if gz_path.exists() {
        return Ok(gz_path);
    }

    if !download {
        return Err(DataError::FileNotFound(uncompressed_path));
    }

    let md5 = MNIST_FILES
        .iter()
        .find(|(name, _)| *name == gz_name)
        .map(|(_, md5)| *md5);
    download::download_file(&format!("{MNIST_BASE_URL}{gz_name}"), &gz_path, md5)?;
    Ok(gz_path)
}

fn open_maybe_gz(path: &Path) -> Result<Box<dyn Read>, DataError> {
    let file = File::open(path).map_err(|_| DataError::FileNotFound(path.to_path_buf()))?;
    let reader: Box<dyn Read> = if path.extension().is_some_and(|ext| ext == "gz") {
        Box::new(GzDecoder::new(BufReader::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(reader)
}

fn read_u32_be(header: &[u8], offset: usize) -> usize {
    u32::from_be_bytes([
        header[offset],
        header[offset + 1],
        header[offset + 2],
        header[offset + 3],
    ]) as usize
}

/// 读取头部之后的数据体
///
/// 缓冲区大小以实际读到的字节为准，头部声明的数量只作为上限，
/// 读到的字节不足时返回 `DataError::Format`。
fn read_body(reader: Box<dyn Read>, expected: usize, what: &str) -> Result<Vec<u8>, DataError> {
    let mut body = Vec::new();
    reader
        .take(expected as u64)
        .read_to_end(&mut body)
        .map_err(|e| DataError::Format(format!("读取{what}数据失败: {e}")))?;
    if body.len() < expected {
        return Err(DataError::Format(format!(
            "{what}数据被截断: 头部声明 {expected} 字节, 实际 {} 字节",
            body.len()
        )));
    }
    Ok(body)
}

/// 解析 IDX 图像文件
///
/// IDX 格式：
/// - [0-3] magic number (0x00000803 = 2051)
/// - [4-7] number of images
/// - [8-11] number of rows
/// - [12-15] number of columns
/// - [16+] pixel data (unsigned byte)
fn parse_idx_images(path: &Path) -> Result<Tensor, DataError> {
    let mut reader = open_maybe_gz(path)?;
    let mut header = [0u8; 16];
    reader
        .read_exact(&mut header)
        .map_err(|e| DataError::Format(format!("读取头部失败: {e}")))?;

    let magic = read_u32_be(&header, 0);
    if magic != 2051 {
        return Err(DataError::Format(format!(
            "无效的 magic number: {magic} (期望 2051)"
        )));
    }

    let num_images = read_u32_be(&header, 4);
    let num_rows = read_u32_be(&header, 8);
    let num_cols = read_u32_be(&header, 12);
    if num_rows != IMAGE_SIDE || num_cols != IMAGE_SIDE {
        return Err(DataError::Format(format!(
            "无效的图像尺寸: {num_rows}x{num_cols} (期望 28x28)"
        )));
    }

    let pixels = read_body(reader, num_images * IMAGE_SIDE * IMAGE_SIDE, "像素")?;

    let data: Vec<f32> = pixels.into_iter().map(f32::from).collect();
    Ok(Tensor::from_vec(data, &[num_images, IMAGE_SIDE * IMAGE_SIDE])?)
}

/// 解析 IDX 标签文件
///
/// IDX 格式：
/// - [0-3] magic number (0x00000801 = 2049)
/// - [4-7] number of labels
/// - [8+] label data (unsigned byte, 0-9)
fn parse_idx_labels(path: &Path) -> Result<Tensor, DataError> {
    let mut reader = open_maybe_gz(path)?;
    let mut header = [0u8; 8];
    reader
        .read_exact(&mut header)
        .map_err(|e| DataError::Format(format!("读取头部失败: {e}")))?;

    let magic = read_u32_be(&header, 0);
    if magic != 2049 {
        return Err(DataError::Format(format!(
            "无效的 magic number: {magic} (期望 2049)"
        )));
    }

    let num_labels = read_u32_be(&header, 4);
    let labels = read_body(reader, num_labels, "标签")?;

    let data: Vec<f32> = labels.into_iter().map(f32::from).collect();
    Ok(Tensor::from_vec(data, &[num_labels])?)
}
