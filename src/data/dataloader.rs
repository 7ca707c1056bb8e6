/*
 * @Description  : DataLoader - PyTorch 风格的数据批量加载器
 *
 * 提供统一的数据迭代 API，支持：
 * - 自动分批 (batch_size)
 * - 随机打乱 (shuffle)
 * - 丢弃不完整批次 (drop_last)
 * - 多线程取样 (num_workers)
 */

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::collate::Collate;
use super::config::DataConfig;
use super::dataset::Dataset;
use super::error::DataError;

/// 批次类型的简写
pub type BatchOf<D> = <<D as Dataset>::Item as Collate>::Batch;

/// DataLoader - PyTorch 风格的数据批量加载器
///
/// # 示例
/// ```ignore
/// let loader = DataLoader::new(dataset, 32)
///     .shuffle(true)
///     .drop_last(true)
///     .num_workers(4);
///
/// for batch in loader.iter() {
///     let batch = batch?;
///     model.forward(&batch.image)?;
/// }
/// ```
pub struct DataLoader<D: Dataset> {
    dataset: D,
    batch_size: usize,
    shuffle: bool,
    drop_last: bool,
    seed: Option<u64>,
    num_workers: usize,
}

impl<D> DataLoader<D>
where
    D: Dataset,
    D::Item: Collate,
{
    /// 创建新的 DataLoader
    ///
    /// # 参数
    /// - `dataset`: 数据集
    /// - `batch_size`: 批大小
    pub fn new(dataset: D, batch_size: usize) -> Self {
        assert!(batch_size > 0, "DataLoader: batch_size 必须大于 0");
        Self {
            dataset,
            batch_size,
            shuffle: false,
            drop_last: false,
            seed: None,
            num_workers: 0,
        }
    }

    /// 训练配置：`batch_size`、打乱、丢弃末尾不完整批次、`prefetch` 个取样线程
    pub fn for_training(dataset: D, config: &DataConfig) -> Self {
        Self::new(dataset, config.batch_size)
            .shuffle(true)
            .drop_last(true)
            .num_workers(config.prefetch)
    }

    /// 评估配置：`test_batch_size`、保持顺序、保留末尾不完整批次、`prefetch` 个取样线程
    pub fn for_evaluation(dataset: D, config: &DataConfig) -> Self {
        Self::new(dataset, config.test_batch_size)
            .shuffle(false)
            .drop_last(false)
            .num_workers(config.prefetch)
    }

    /// 设置是否打乱数据
    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// 设置是否丢弃最后一个不完整的批次
    pub fn drop_last(mut self, drop_last: bool) -> Self {
        self.drop_last = drop_last;
        self
    }

    /// 设置随机种子（用于 shuffle）
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// 设置取样线程数，0 表示在调用线程上顺序取样
    pub fn num_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers;
        self
    }

    /// 获取批次数量
    pub fn num_batches(&self) -> usize {
        let n = self.dataset.len();
        if self.drop_last {
            n / self.batch_size
        } else {
            n.div_ceil(self.batch_size)
        }
    }

    /// 获取数据集大小
    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    /// 检查是否为空
    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    /// 创建迭代器，每次迭代都会重新打乱（若开启 shuffle）
    pub fn iter(&self) -> DataLoaderIterator<'_, D> {
        let n = self.dataset.len();
        let mut indices: Vec<usize> = (0..n).collect();

        if self.shuffle {
            if let Some(seed) = self.seed {
                let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
                indices.shuffle(&mut rng);
            } else {
                let mut rng = rand::thread_rng();
                indices.shuffle(&mut rng);
            }
        }

        let (pool, pending_error) = match self.num_workers {
            0 => (None, None),
            workers => match ThreadPoolBuilder::new().num_threads(workers).build() {
                Ok(pool) => (Some(pool), None),
                Err(e) => (None, Some(DataError::from(e))),
            },
        };

        DataLoaderIterator {
            loader: self,
            indices,
            current_batch: 0,
            pool,
            pending_error,
            finished: false,
        }
    }
}

/// DataLoader 迭代器
///
/// 任何一次取样失败都会以 `Err` 的形式返回，之后迭代结束。
pub struct DataLoaderIterator<'a, D: Dataset> {
    loader: &'a DataLoader<D>,
    indices: Vec<usize>,
    current_batch: usize,
    pool: Option<ThreadPool>,
    pending_error: Option<DataError>,
    finished: bool,
}

impl<'a, D> DataLoaderIterator<'a, D>
where
    D: Dataset,
    D::Item: Collate,
{
    fn fetch(&self, batch_indices: &[usize]) -> Result<Vec<D::Item>, DataError> {
        let dataset = &self.loader.dataset;
        match &self.pool {
            Some(pool) => pool.install(|| {
                batch_indices
                    .par_iter()
                    .map(|&index| dataset.get(index))
                    .collect()
            }),
            None => batch_indices
                .iter()
                .map(|&index| dataset.get(index))
                .collect(),
        }
    }
}

impl<'a, D> Iterator for DataLoaderIterator<'a, D>
where
    D: Dataset,
    D::Item: Collate,
{
    type Item = Result<BatchOf<D>, DataError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if let Some(e) = self.pending_error.take() {
            self.finished = true;
            return Some(Err(e));
        }

        let n = self.indices.len();
        let batch_size = self.loader.batch_size;
        let start = self.current_batch * batch_size;

        // 检查是否还有数据
        if start >= n {
            return None;
        }

        let end = (start + batch_size).min(n);

        // 如果 drop_last 且批次不完整，则跳过
        if self.loader.drop_last && end - start < batch_size {
            return None;
        }

        self.current_batch += 1;

        let batch = self
            .fetch(&self.indices[start..end])
            .and_then(<D::Item as Collate>::collate);
        if batch.is_err() {
            self.finished = true;
        }
        Some(batch)
    }
}
