//! 内置数据集
//!
//! - MNIST：手写数字分类
//! - pix2pix maps：航拍图 ↔ 地图的成对图像翻译

mod mnist;
mod pix2pix_maps;

pub use mnist::{
    MNIST_MEAN, MNIST_STD, MnistDataset, default_data_dir, mnist_dataset, mnist_loader,
    mnist_transform,
};
pub use pix2pix_maps::{
    EVAL_STRIDE, PIX2PIX_MEAN, PIX2PIX_STD, Pix2PixMapsDataset, pix2pix_maps_dataset,
    pix2pix_maps_loader, pix2pix_maps_transforms,
};
