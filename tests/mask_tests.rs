//! End-to-end tests: certification file on disk → LumiMask → queries.

use std::io::Write;

use lumi_mask::{load_file, load_str, DataFormatError, LumiMask, LumiRange};
use tempfile::NamedTempFile;

fn write_cert_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("creating temp file");
    file.write_all(contents.as_bytes()).expect("writing temp file");
    file
}

#[test]
fn round_trip_from_file() {
    let file = write_cert_file(r#"{"123": [[10, 20], [30, 40]]}"#);
    let mask = load_file(file.path()).expect("loading certification file");

    for lumi in [10, 15, 20, 30, 40] {
        assert!(mask.is_certified(123, lumi), "run 123 lumi {lumi}");
    }
    for lumi in [9, 21, 29, 41] {
        assert!(!mask.is_certified(123, lumi), "run 123 lumi {lumi}");
    }
    for lumi in 0..50 {
        assert!(!mask.is_certified(124, lumi), "run 124 lumi {lumi}");
    }
}

#[test]
fn batch_query_matches_scalar_over_a_bulk_table() {
    let file = write_cert_file(
        r#"{
            "314472": [[1, 228], [230, 310]],
            "314473": [[1, 952]],
            "315000": [[50, 60]]
        }"#,
    );
    let mask = load_file(file.path()).unwrap();

    // A bulk event table: clustered by run with a few stragglers
    let mut runs = Vec::new();
    let mut lumis = Vec::new();
    for run in [314472u32, 314473, 314999, 315000] {
        for lumi in (0..1200).step_by(7) {
            runs.push(run);
            lumis.push(lumi);
        }
    }
    runs.push(314472);
    lumis.push(229);

    let batch = mask.is_certified_many(&runs, &lumis);
    assert_eq!(batch.len(), runs.len());
    for (i, (&run, &lumi)) in runs.iter().zip(&lumis).enumerate() {
        assert_eq!(
            batch[i],
            mask.is_certified(run, lumi),
            "row {i}: run {run} lumi {lumi}"
        );
    }

    let indices = mask.certified_indices(&runs, &lumis);
    assert!(indices.iter().all(|&i| batch[i]));
    assert_eq!(indices.len(), batch.iter().filter(|&&ok| ok).count());
}

#[test]
fn adjacent_input_intervals_act_as_one_merged_range() {
    let file = write_cert_file(r#"{"9": [[1, 5], [6, 9]]}"#);
    let mask = load_file(file.path()).unwrap();

    // 5 → 6 crosses the seam between the two input intervals
    for lumi in 1..=9 {
        assert!(mask.is_certified(9, lumi), "lumi {lumi}");
    }
    assert!(!mask.is_certified(9, 0));
    assert!(!mask.is_certified(9, 10));
    assert_eq!(mask.ranges(9).unwrap(), &[LumiRange(1, 9)]);
}

#[test]
fn reversed_interval_in_file_fails_construction() {
    let file = write_cert_file(r#"{"123": [[20, 10]]}"#);
    let err = load_file(file.path()).unwrap_err();
    assert!(matches!(
        err,
        DataFormatError::Interval { run: 123, start: 20, end: 10 }
    ));
}

#[test]
fn malformed_json_fails_construction() {
    let file = write_cert_file(r#"{"123": [[10, 20], [30]]}"#);
    assert!(matches!(
        load_file(file.path()).unwrap_err(),
        DataFormatError::Json(_)
    ));
}

#[test]
fn missing_path_fails_construction() {
    let err = load_file(std::path::Path::new("/definitely/not/here.json")).unwrap_err();
    match err {
        DataFormatError::Io { path, .. } => {
            assert_eq!(path, std::path::PathBuf::from("/definitely/not/here.json"));
        }
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn mask_is_shareable_across_threads() {
    let mask: LumiMask = load_str(r#"{"5": [[1, 100]]}"#).unwrap();

    std::thread::scope(|scope| {
        for offset in 0u32..4 {
            let mask = &mask;
            scope.spawn(move || {
                for lumi in 1..=100 {
                    assert!(mask.is_certified(5, lumi));
                    assert!(!mask.is_certified(6 + offset, lumi));
                }
            });
        }
    });
}
