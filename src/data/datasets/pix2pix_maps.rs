//! pix2pix maps 成对图像数据集
//!
//! 每个样本由 A 域的航拍图（`image`）和 B 域的地图（`map`）组成，
//! 两者按需从磁盘读取（强制转为 RGB），不做缓存。

use std::path::Path;

use tracing::info;

use crate::data::config::DataConfig;
use crate::data::dataloader::DataLoader;
use crate::data::dataset::Dataset;
use crate::data::error::DataError;
use crate::data::pairs::{PairedFileList, PairingMode, Split, list_pairs};
use crate::data::sample::PairedSample;
use crate::data::transforms::{Compose, Normalize, RandomCrop, StrideAlign, ToTensor, Transform};
use crate::vision::Vision;

pub const PIX2PIX_MEAN: [f32; 3] = [0.5, 0.5, 0.5];
pub const PIX2PIX_STD: [f32; 3] = [0.5, 0.5, 0.5];

/// 评估时对齐的步长
pub const EVAL_STRIDE: u32 = 16;

#[derive(Debug)]
pub struct Pix2PixMapsDataset {
    pairs: PairedFileList,
    split: Split,
    transform: Option<Compose<PairedSample>>,
}

impl Pix2PixMapsDataset {
    /// 按位置配对构建数据集
    ///
    /// # 错误
    /// 目录缺失或两域文件数量不一致时立即返回错误
    pub fn new<P: AsRef<Path>>(
        root: P,
        split: Split,
        transform: Option<Compose<PairedSample>>,
    ) -> Result<Self, DataError> {
        Self::with_pairing(root, split, PairingMode::Positional, transform)
    }

    /// 指定配对方式构建数据集
    pub fn with_pairing<P: AsRef<Path>>(
        root: P,
        split: Split,
        mode: PairingMode,
        transform: Option<Compose<PairedSample>>,
    ) -> Result<Self, DataError> {
        let pairs = list_pairs(root.as_ref(), split, mode)?;
        info!(
            root = %root.as_ref().display(),
            %split,
            pairs = pairs.len(),
            "pix2pix maps 数据集构建完成"
        );
        Ok(Self {
            pairs,
            split,
            transform,
        })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn split(&self) -> Split {
        self.split
    }

    pub fn pairs(&self) -> &PairedFileList {
        &self.pairs
    }

    /// 读取第 index 对图像并经过变换链
    pub fn get(&self, index: usize) -> Result<PairedSample, DataError> {
        let (image_path, map_path) = self.pairs.get(index).ok_or(DataError::IndexOutOfBounds {
            index,
            len: self.len(),
        })?;

        let sample = PairedSample::new(
            Vision::load_rgb_image(image_path)?,
            Vision::load_rgb_image(map_path)?,
        );
        match &self.transform {
            Some(transform) => transform.apply(sample),
            None => Ok(sample),
        }
    }
}

impl Dataset for Pix2PixMapsDataset {
    type Item = PairedSample;

    fn len(&self) -> usize {
        self.pairs.len()
    }

    fn get(&self, index: usize) -> Result<PairedSample, DataError> {
        Pix2PixMapsDataset::get(self, index)
    }
}

/// 返回 (训练变换链, 评估变换链)
///
/// - 训练：RandomCrop(crop_size) → ToTensor → Normalize
/// - 评估：StrideAlign(16) → ToTensor → Normalize
pub fn pix2pix_maps_transforms(
    config: &DataConfig,
) -> (Compose<PairedSample>, Compose<PairedSample>) {
    let train = Compose::new()
        .then(RandomCrop::new(config.crop_size))
        .then(ToTensor)
        .then(Normalize::new(&PIX2PIX_MEAN, &PIX2PIX_STD));
    let eval = Compose::new()
        .then(StrideAlign::new(EVAL_STRIDE))
        .then(ToTensor)
        .then(Normalize::new(&PIX2PIX_MEAN, &PIX2PIX_STD));
    (train, eval)
}

/// 按配置构建训练集（train 划分 + 训练变换链）或测试集（test 划分 + 评估变换链）
pub fn pix2pix_maps_dataset(
    config: &DataConfig,
    train: bool,
) -> Result<Pix2PixMapsDataset, DataError> {
    config.validate()?;
    let (train_transform, eval_transform) = pix2pix_maps_transforms(config);
    let (split, transform) = if train {
        (Split::Train, train_transform)
    } else {
        (Split::Test, eval_transform)
    };
    Pix2PixMapsDataset::new(&config.pix2pix_maps_data_path, split, Some(transform))
}

/// 按配置构建批量加载器
///
/// - 训练：`batch_size`，打乱，丢弃末尾不完整批次
/// - 测试：`test_batch_size`，保持顺序，保留末尾批次
pub fn pix2pix_maps_loader(
    config: &DataConfig,
    train: bool,
) -> Result<DataLoader<Pix2PixMapsDataset>, DataError> {
    let dataset = pix2pix_maps_dataset(config, train)?;
    Ok(if train {
        DataLoader::for_training(dataset, config)
    } else {
        DataLoader::for_evaluation(dataset, config)
    })
}
