//! 数据管线配置
//!
//! 训练脚本通常把这些选项和模型超参放在同一个 JSON 文件里，
//! 因此未知字段会被忽略，缺失字段取默认值。

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::datasets::default_data_dir;
use super::error::DataError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// 训练批大小
    pub batch_size: usize,
    /// 评估批大小
    pub test_batch_size: usize,
    /// 训练时随机裁剪的边长
    pub crop_size: u32,
    /// 取样线程数，0 表示在调用线程上取样
    pub prefetch: usize,
    pub mnist_data_path: PathBuf,
    /// 仅作为可识别的选项保留，本库不提供 CIFAR-10 加载器
    pub cifar_10_data_path: PathBuf,
    pub pix2pix_maps_data_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        let root = default_data_dir();
        Self {
            batch_size: 1,
            test_batch_size: 1,
            crop_size: 256,
            prefetch: 0,
            mnist_data_path: root.join("mnist"),
            cifar_10_data_path: root.join("cifar10"),
            pix2pix_maps_data_path: root.join("pix2pix").join("maps"),
        }
    }
}

impl DataConfig {
    /// 从 JSON 字符串解析并校验配置
    pub fn from_json_str(json: &str) -> Result<Self, DataError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件解析并校验配置
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// 检查各尺寸参数是否合法
    pub fn validate(&self) -> Result<(), DataError> {
        if self.batch_size == 0 {
            return Err(DataError::Config("batch_size 必须大于 0".to_string()));
        }
        if self.test_batch_size == 0 {
            return Err(DataError::Config("test_batch_size 必须大于 0".to_string()));
        }
        if self.crop_size == 0 {
            return Err(DataError::Config("crop_size 必须大于 0".to_string()));
        }
        Ok(())
    }
}
