/*
 * @Description  : 本模块提供计算机视觉相关的功能。
 *                 在本模块中，不严谨地说，所谓的image/图像是指按`RgbImage`存储的3通道像素网格，
 *                 任何输入（灰度、带透明通道等）在加载时都会被强制转换为RGB。
 */

use std::path::Path;

use image::{ImageResult, RgbImage};

mod process;


pub struct Vision;

impl Vision {
    /// 将本地图像加载为RGB像素网格（无论原图是几通道）
    pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> ImageResult<RgbImage> {
        Ok(image::open(path)?.to_rgb8())
    }

    /// 保存RGB图像到本地，格式由扩展名决定
    pub fn save_image<P: AsRef<Path>>(image: &RgbImage, path: P) -> ImageResult<()> {
        image.save(path)
    }
}
