//! 数据加载模块
//!
//! 提供数据集加载、变换和批处理功能。
//!
//! # 主要组件
//!
//! - [`DataLoader`]: `PyTorch` 风格的数据批量加载器（可多线程取样）
//! - [`Dataset`]: 可按索引访问的数据集抽象
//! - [`MnistDataset`]: MNIST 手写数字数据集（分类任务）
//! - [`Pix2PixMapsDataset`]: pix2pix maps 成对图像数据集（图像翻译任务）
//! - [`transforms`]: 样本变换（随机裁剪、步长对齐、ToTensor、标准化）
//! - [`DataConfig`]: 数据管线配置
//! - [`DataError`]: 数据加载错误类型
//!
//! # 使用示例
//!
//! ```ignore
//! use pix2pix_data::data::{DataConfig, pix2pix_maps_loader};
//!
//! let config = DataConfig::from_json_file("train_config.json")?;
//! let loader = pix2pix_maps_loader(&config, true)?;
//!
//! for batch in loader.iter() {
//!     let batch = batch?;
//!     // batch.image / batch.map: [N, 3, crop_size, crop_size]
//! }
//! ```

pub mod collate;
mod config;
mod dataloader;
pub mod dataset;
pub mod datasets;
pub mod download;
pub mod error;
pub mod pairs;
pub mod sample;
pub mod transforms;

#[cfg(test)]
mod tests;

// Re-exports
pub use collate::{Collate, DigitBatch, PairedBatch};
pub use config::DataConfig;
pub use dataloader::{BatchOf, DataLoader, DataLoaderIterator};
pub use dataset::Dataset;
pub use datasets::{
    EVAL_STRIDE, MNIST_MEAN, MNIST_STD, MnistDataset, PIX2PIX_MEAN, PIX2PIX_STD,
    Pix2PixMapsDataset, default_data_dir, mnist_dataset, mnist_loader, mnist_transform,
    pix2pix_maps_dataset, pix2pix_maps_loader, pix2pix_maps_transforms,
};
pub use error::DataError;
pub use pairs::{PairedFileList, PairingMode, Split, list_pairs};
pub use sample::{DigitSample, Field, PairedSample};
