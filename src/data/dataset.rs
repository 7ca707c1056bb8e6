//! 数据集抽象

use super::error::DataError;

/// 可按索引随机访问的数据集
///
/// 实现者需要是 `Send + Sync` 的，以便 [`DataLoader`](super::DataLoader)
/// 在多个取样线程间共享同一个数据集。
pub trait Dataset: Send + Sync {
    type Item: Send;

    /// 样本数量
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 获取第 index 个样本，越界时返回 `DataError::IndexOutOfBounds`
    fn get(&self, index: usize) -> Result<Self::Item, DataError>;
}
