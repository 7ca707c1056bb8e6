//! # pix2pix_data
//!
//! 两条训练管线的数据加载胶水层：
//! - MNIST 手写数字分类数据集：定位/下载原始文件，逐样本变换，分批迭代；
//! - pix2pix maps 成对图像数据集：枚举两个平行目录中一一对应的图像，
//!   按需加载，经成对变换链（随机裁剪/步长对齐/ToTensor/标准化）后分批迭代。
//!

pub mod data;
pub mod errors;
pub mod tensor;
pub mod vision;
