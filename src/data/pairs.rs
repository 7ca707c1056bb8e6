//! 成对文件枚举
//!
//! 目录约定：`{root}/{split}A/*.jpg` 与 `{root}/{split}B/*.jpg`，
//! A 域为原图（如航拍图），B 域为对应的目标图（如地图）。

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use super::error::DataError;

/// 成对图像所用的文件扩展名（区分大小写，与 shell 通配一致）
const PAIR_EXTENSION: &str = "jpg";

/// 数据划分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Split {
    Train,
    Test,
}

impl Split {
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Split {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train" => Ok(Split::Train),
            "test" => Ok(Split::Test),
            other => Err(DataError::Config(format!(
                "未知的数据划分 `{other}`，只能是 train 或 test"
            ))),
        }
    }
}

/// A、B 两域文件的配对方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairingMode {
    /// 两个目录各自按路径排序后，同一位置的文件互为一对
    #[default]
    Positional,
    /// 按去掉扩展名的文件名配对，任何一方多出的文件都视为错误
    ByStem,
}

/// 已配对的文件列表，`a[i]` 与 `b[i]` 互为一对
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairedFileList {
    a: Vec<PathBuf>,
    b: Vec<PathBuf>,
}

impl PairedFileList {
    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }

    /// A 域文件（按配对顺序）
    pub fn a(&self) -> &[PathBuf] {
        &self.a
    }

    /// B 域文件（按配对顺序）
    pub fn b(&self) -> &[PathBuf] {
        &self.b
    }

    /// 第 `index` 对文件
    pub fn get(&self, index: usize) -> Option<(&Path, &Path)> {
        Some((self.a.get(index)?.as_path(), self.b.get(index)?.as_path()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Path)> {
        self.a
            .iter()
            .zip(self.b.iter())
            .map(|(a, b)| (a.as_path(), b.as_path()))
    }
}

/// 枚举 `root` 下某一划分的成对文件
///
/// # 错误
/// - `root` 或 `{split}A`/`{split}B` 目录不存在：`DataError::FileNotFound`
/// - 按位置配对且两域数量不一致：`DataError::PairCountMismatch`
/// - 按文件名配对且存在落单文件：`DataError::UnpairedFile`
pub fn list_pairs<P: AsRef<Path>>(
    root: P,
    split: Split,
    mode: PairingMode,
) -> Result<PairedFileList, DataError> {
    let root = root.as_ref();
    if !root.is_dir() {
        return Err(DataError::FileNotFound(root.to_path_buf()));
    }

    let a = list_images(&root.join(format!("{split}A")))?;
    let b = list_images(&root.join(format!("{split}B")))?;

    let pairs = match mode {
        PairingMode::Positional => {
            if a.len() != b.len() {
                return Err(DataError::PairCountMismatch {
                    a: a.len(),
                    b: b.len(),
                });
            }
            PairedFileList { a, b }
        }
        PairingMode::ByStem => pair_by_stem(a, b)?,
    };

    for (a, b) in pairs.iter() {
        debug!(a = %a.display(), b = %b.display(), "配对");
    }
    Ok(pairs)
}

/// 列出目录下所有扩展名为 `jpg` 的非隐藏文件，按路径字典序排列
fn list_images(dir: &Path) -> Result<Vec<PathBuf>, DataError> {
    if !dir.is_dir() {
        return Err(DataError::FileNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        // 与 shell 通配一致，跳过隐藏文件
        let hidden = path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with('.'));
        let matches = !hidden
            && path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext == PAIR_EXTENSION);
        if matches {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn pair_by_stem(a: Vec<PathBuf>, b: Vec<PathBuf>) -> Result<PairedFileList, DataError> {
    let mut b_by_stem: BTreeMap<_, _> = b
        .into_iter()
        .map(|path| (path.file_stem().map(|s| s.to_os_string()), path))
        .collect();

    let mut paired_a = Vec::with_capacity(a.len());
    let mut paired_b = Vec::with_capacity(a.len());
    for path in a {
        let stem = path.file_stem().map(|s| s.to_os_string());
        match b_by_stem.remove(&stem) {
            Some(partner) => {
                paired_a.push(path);
                paired_b.push(partner);
            }
            None => return Err(DataError::UnpairedFile(path)),
        }
    }
    if let Some((_, leftover)) = b_by_stem.into_iter().next() {
        return Err(DataError::UnpairedFile(leftover));
    }

    Ok(PairedFileList {
        a: paired_a,
        b: paired_b,
    })
}
