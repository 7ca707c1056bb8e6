//! 通用下载工具
//!
//! 提供 HTTP 下载和 MD5 校验功能，供各数据集复用。

use std::io::Read;
use std::path::{Path, PathBuf};

use md5::{Digest, Md5};
use tracing::{debug, info};

use super::error::DataError;

/// 下载文件并保存到指定路径
///
/// # 参数
/// - `url`: 下载地址
/// - `dest_path`: 保存路径
/// - `expected_md5`: 可选的 MD5 校验码，提供时会验证下载内容，校验失败不会写盘
pub fn download_file(
    url: &str,
    dest_path: &Path,
    expected_md5: Option<&str>,
) -> Result<(), DataError> {
    info!(url, "开始下载");

    let response = ureq::get(url)
        .call()
        .map_err(|e| DataError::Download(format!("HTTP 请求失败: {e}")))?;

    if response.status() != 200 {
        return Err(DataError::Download(format!(
            "HTTP 状态码: {}",
            response.status()
        )));
    }

    let mut bytes = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut bytes)
        .map_err(|e| DataError::Download(format!("读取响应失败: {e}")))?;

    if let Some(expected) = expected_md5 {
        verify_md5(&bytes, expected)?;
        debug!(md5 = expected, "MD5 校验通过");
    }

    write_atomic(dest_path, &bytes)?;

    info!(path = %dest_path.display(), bytes = bytes.len(), "下载完成");
    Ok(())
}

/// 先写入同目录下的 `.part` 临时文件，再重命名到目标路径，
/// 中途失败时目标路径不会出现不完整的文件
pub fn write_atomic(dest_path: &Path, bytes: &[u8]) -> Result<(), DataError> {
    let mut part_name = dest_path.as_os_str().to_os_string();
    part_name.push(".part");
    let part_path = PathBuf::from(part_name);

    if let Err(e) = std::fs::write(&part_path, bytes) {
        let _ = std::fs::remove_file(&part_path);
        return Err(e.into());
    }
    std::fs::rename(&part_path, dest_path)?;
    Ok(())
}

/// 校验数据的 MD5，不一致时返回 `DataError::Download`
pub fn verify_md5(data: &[u8], expected: &str) -> Result<(), DataError> {
    let actual = compute_md5(data);
    if actual != expected {
        return Err(DataError::Download(format!(
            "MD5 校验失败: 期望 {expected}, 实际 {actual}"
        )));
    }
    Ok(())
}

/// 计算数据的 MD5 校验码
pub fn compute_md5(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("{:x}", result)
}
