//! 成对文件枚举单元测试

use crate::data::DataError;
use crate::data::pairs::{PairingMode, Split, list_pairs};

use super::{as_strs, numbered, write_split};

#[test]
fn test_list_pairs_sorted_and_equal_length() {
    let dir = tempfile::tempdir().unwrap();
    // 故意乱序写入
    let names = ["3.jpg", "1.jpg", "2.jpg", "10.jpg"];
    write_split(dir.path(), "train", &names, &names, 4, 4);

    let pairs = list_pairs(dir.path(), Split::Train, PairingMode::Positional).unwrap();
    assert_eq!(pairs.len(), 4);
    assert_eq!(pairs.a().len(), pairs.b().len());

    // 按字节比较："." 小于 "0"，所以 1.jpg 排在 10.jpg 之前
    let file_names: Vec<_> = pairs
        .a()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(file_names, ["1.jpg", "10.jpg", "2.jpg", "3.jpg"]);

    for (a, b) in pairs.iter() {
        assert_eq!(a.file_name(), b.file_name());
        assert!(a.parent().unwrap().ends_with("trainA"));
        assert!(b.parent().unwrap().ends_with("trainB"));
    }
}

#[test]
fn test_list_pairs_ignores_other_extensions() {
    let dir = tempfile::tempdir().unwrap();
    write_split(dir.path(), "test", &["a.jpg", "b.png", "c.JPG"], &["a.jpg"], 4, 4);

    let pairs = list_pairs(dir.path(), Split::Test, PairingMode::Positional).unwrap();
    assert_eq!(pairs.len(), 1);
}

#[test]
fn test_list_pairs_skips_hidden_files() {
    let dir = tempfile::tempdir().unwrap();
    write_split(dir.path(), "train", &["a.jpg", ".x.jpg"], &["a.jpg"], 4, 4);

    let pairs = list_pairs(dir.path(), Split::Train, PairingMode::Positional).unwrap();
    assert_eq!(pairs.len(), 1);
    assert!(pairs.a()[0].ends_with("a.jpg"));
}

#[test]
fn test_list_pairs_count_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let a = numbered(4);
    let b = numbered(3);
    write_split(dir.path(), "train", &as_strs(&a), &as_strs(&b), 4, 4);

    let err = list_pairs(dir.path(), Split::Train, PairingMode::Positional).unwrap_err();
    assert!(matches!(err, DataError::PairCountMismatch { a: 4, b: 3 }));
}

#[test]
fn test_list_pairs_missing_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let err = list_pairs(dir.path().join("nope"), Split::Train, PairingMode::Positional)
        .unwrap_err();
    assert!(matches!(err, DataError::FileNotFound(_)));

    // 只有 train 划分时，test 划分不存在
    write_split(dir.path(), "train", &["0.jpg"], &["0.jpg"], 4, 4);
    let err = list_pairs(dir.path(), Split::Test, PairingMode::Positional).unwrap_err();
    assert!(matches!(err, DataError::FileNotFound(p) if p.ends_with("testA")));
}

#[test]
fn test_list_pairs_by_stem() {
    let dir = tempfile::tempdir().unwrap();
    write_split(
        dir.path(),
        "train",
        &["x_1.jpg", "x_2.jpg"],
        &["x_2.jpg", "x_1.jpg"],
        4,
        4,
    );
    let pairs = list_pairs(dir.path(), Split::Train, PairingMode::ByStem).unwrap();
    assert_eq!(pairs.len(), 2);
    for (a, b) in pairs.iter() {
        assert_eq!(a.file_stem(), b.file_stem());
    }
}

#[test]
fn test_list_pairs_by_stem_unpaired() {
    let dir = tempfile::tempdir().unwrap();
    write_split(dir.path(), "train", &["1.jpg", "2.jpg"], &["1.jpg", "3.jpg"], 4, 4);

    // 按位置配对时数量一致即可通过
    assert!(list_pairs(dir.path(), Split::Train, PairingMode::Positional).is_ok());

    let err = list_pairs(dir.path(), Split::Train, PairingMode::ByStem).unwrap_err();
    assert!(matches!(err, DataError::UnpairedFile(p) if p.ends_with("2.jpg")));
}

#[test]
fn test_split_parse() {
    assert_eq!("train".parse::<Split>().unwrap(), Split::Train);
    assert_eq!("test".parse::<Split>().unwrap(), Split::Test);
    assert!("val".parse::<Split>().is_err());
    assert_eq!(Split::Test.to_string(), "test");
}
