//! pix2pix maps 数据集单元测试

use approx::assert_abs_diff_eq;

use super::{as_strs, numbered, write_split};
use crate::data::{
    DataConfig, DataError, DataLoader, Field, Pix2PixMapsDataset, Split, pix2pix_maps_dataset,
    pix2pix_maps_loader, pix2pix_maps_transforms,
};

fn config_for(root: &std::path::Path, crop_size: u32, batch_size: usize) -> DataConfig {
    DataConfig {
        batch_size,
        test_batch_size: batch_size,
        crop_size,
        pix2pix_maps_data_path: root.to_path_buf(),
        ..DataConfig::default()
    }
}

#[test]
fn test_dataset_raw_samples() {
    let dir = tempfile::tempdir().unwrap();
    let names = numbered(3);
    write_split(dir.path(), "train", &as_strs(&names), &as_strs(&names), 40, 30);

    let dataset = Pix2PixMapsDataset::new(dir.path(), Split::Train, None).unwrap();
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.split(), Split::Train);

    let sample = dataset.get(1).unwrap();
    let image = sample.image.as_image().unwrap();
    assert_eq!(image.dimensions(), (40, 30));
    assert_eq!(sample.common_size().unwrap(), (30, 40));
    // A 域写入的是偏红的纯色
    assert!(image.get_pixel(5, 5)[0] > image.get_pixel(5, 5)[2]);
    let map = sample.map.as_image().unwrap();
    assert!(map.get_pixel(5, 5)[2] > map.get_pixel(5, 5)[0]);
}

#[test]
fn test_dataset_count_mismatch_fails_at_construction() {
    let dir = tempfile::tempdir().unwrap();
    let a = numbered(4);
    let b = numbered(3);
    write_split(dir.path(), "train", &as_strs(&a), &as_strs(&b), 8, 8);

    let err = Pix2PixMapsDataset::new(dir.path(), Split::Train, None).unwrap_err();
    assert!(matches!(err, DataError::PairCountMismatch { a: 4, b: 3 }));
}

#[test]
fn test_dataset_index_out_of_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let names = numbered(2);
    write_split(dir.path(), "test", &as_strs(&names), &as_strs(&names), 8, 8);

    let dataset = Pix2PixMapsDataset::new(dir.path(), Split::Test, None).unwrap();
    assert!(matches!(
        dataset.get(2),
        Err(DataError::IndexOutOfBounds { index: 2, len: 2 })
    ));
}

#[test]
fn test_dataset_corrupt_image() {
    let dir = tempfile::tempdir().unwrap();
    let names = numbered(2);
    write_split(dir.path(), "train", &as_strs(&names), &as_strs(&names), 8, 8);
    std::fs::write(dir.path().join("trainB").join("1.jpg"), b"not a jpeg").unwrap();

    let dataset = Pix2PixMapsDataset::new(dir.path(), Split::Train, None).unwrap();
    assert!(dataset.get(0).is_ok());
    assert!(matches!(dataset.get(1), Err(DataError::Image(_))));
}

#[test]
fn test_training_transform_chain() {
    let dir = tempfile::tempdir().unwrap();
    let names = numbered(1);
    write_split(dir.path(), "train", &as_strs(&names), &as_strs(&names), 48, 40);

    let config = config_for(dir.path(), 32, 1);
    let (train, _) = pix2pix_maps_transforms(&config);
    let dataset = Pix2PixMapsDataset::new(dir.path(), Split::Train, Some(train)).unwrap();

    let sample = dataset.get(0).unwrap();
    for (_, field) in sample.fields() {
        let Field::Tensor(tensor) = field else {
            panic!("变换链之后应为张量");
        };
        assert_eq!(tensor.shape(), &[3, 32, 32]);
        // 标准化到 [-1, 1]
        assert!(tensor.to_vec().iter().all(|v| (-1.0..=1.0).contains(v)));
    }
    let image = sample.image.as_tensor().unwrap();
    assert_abs_diff_eq!(image[[0, 0, 0]], 200.0 / 255.0 * 2.0 - 1.0, epsilon = 0.05);
}

#[test]
fn test_evaluation_aligns_to_stride() {
    let dir = tempfile::tempdir().unwrap();
    let names = numbered(2);
    write_split(dir.path(), "test", &as_strs(&names), &as_strs(&names), 70, 50);

    let config = config_for(dir.path(), 256, 2);
    let dataset = pix2pix_maps_dataset(&config, false).unwrap();
    assert_eq!(dataset.split(), Split::Test);

    let sample = dataset.get(0).unwrap();
    // 50 → 48，70 → 64
    assert_eq!(sample.image.as_tensor().unwrap().shape(), &[3, 48, 64]);
    assert_eq!(sample.map.as_tensor().unwrap().shape(), &[3, 48, 64]);
}

#[test]
fn test_loader_drop_last_and_shapes() {
    let dir = tempfile::tempdir().unwrap();
    let names = numbered(5);
    write_split(dir.path(), "train", &as_strs(&names), &as_strs(&names), 24, 24);
    write_split(dir.path(), "test", &as_strs(&names), &as_strs(&names), 32, 32);

    let config = config_for(dir.path(), 16, 2);

    let train = pix2pix_maps_loader(&config, true).unwrap();
    let batches: Vec<_> = train.iter().map(Result::unwrap).collect();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches.iter().map(|b| b.len()).sum::<usize>(), 4);
    for batch in &batches {
        assert_eq!(batch.image.shape(), &[2, 3, 16, 16]);
        assert_eq!(batch.map.shape(), &[2, 3, 16, 16]);
    }

    let test = pix2pix_maps_loader(&config, false).unwrap();
    let batches: Vec<_> = test.iter().map(Result::unwrap).collect();
    assert_eq!(batches.len(), 3);
    assert_eq!(batches.iter().map(|b| b.len()).sum::<usize>(), 5);
    assert_eq!(batches[2].image.shape(), &[1, 3, 32, 32]);
}

#[test]
fn test_loader_with_workers_matches_sequential() {
    let dir = tempfile::tempdir().unwrap();
    let names = numbered(4);
    write_split(dir.path(), "test", &as_strs(&names), &as_strs(&names), 32, 32);

    let config = config_for(dir.path(), 16, 2);
    let sequential: Vec<_> = pix2pix_maps_loader(&config, false)
        .unwrap()
        .iter()
        .map(Result::unwrap)
        .collect();

    let dataset = pix2pix_maps_dataset(&config, false).unwrap();
    let parallel: Vec<_> = DataLoader::new(dataset, 2)
        .num_workers(2)
        .iter()
        .map(Result::unwrap)
        .collect();

    assert_eq!(sequential, parallel);
}

#[test]
fn test_loader_rejects_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), 0, 2);
    assert!(matches!(
        pix2pix_maps_loader(&config, true),
        Err(DataError::Config(_))
    ));
}

#[test]
fn test_loader_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir.path().join("missing"), 16, 2);
    assert!(matches!(
        pix2pix_maps_loader(&config, true),
        Err(DataError::FileNotFound(_))
    ));
}
