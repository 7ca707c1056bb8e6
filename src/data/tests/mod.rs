mod config;
mod pairs;
mod pix2pix_maps;

use std::path::Path;

use image::{Rgb, RgbImage};

/// 在 `{root}/{split}A`、`{root}/{split}B` 下按给定文件名写入纯色 jpg
pub(crate) fn write_split(root: &Path, split: &str, a: &[&str], b: &[&str], width: u32, height: u32) {
    for (suffix, names, color) in [("A", a, [200, 40, 40]), ("B", b, [40, 40, 200])] {
        let dir = root.join(format!("{split}{suffix}"));
        std::fs::create_dir_all(&dir).unwrap();
        for name in names {
            RgbImage::from_pixel(width, height, Rgb(color))
                .save(dir.join(name))
                .unwrap();
        }
    }
}

/// 生成 `n` 个形如 `0.jpg`、`1.jpg` 的文件名
pub(crate) fn numbered(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{i}.jpg")).collect()
}

pub(crate) fn as_strs(names: &[String]) -> Vec<&str> {
    names.iter().map(String::as_str).collect()
}
