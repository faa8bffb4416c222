//! Batch extraction over injected data sources

use feature_engine::{build_batch, FailurePolicy, FeatureConfig, FeatureError};
use std::path::PathBuf;
use trajectory::{DataSource, JsonFileSource, RowLayout, TrajectoryRecord};

fn record(rows: &[[f64; 2]], label: &str) -> TrajectoryRecord {
    TrajectoryRecord::from_rows(rows.iter().map(|r| r.to_vec()).collect()).with_meta("label", label)
}

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_batch_preserves_order() {
    let t1 = record(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 0.0]], "slow");
    let t2 = record(&[[0.0, 0.0], [5.0, 0.0], [10.0, 0.0], [15.0, 0.0]], "fast");

    let vectors = build_batch(&[t1, t2], &FeatureConfig::default()).unwrap();

    assert_eq!(vectors.len(), 2);
    assert_eq!(vectors[0].record_index, Some(0));
    assert_eq!(vectors[1].record_index, Some(1));
    assert_eq!(vectors[0].value("distance"), Some(3.0));
    assert_eq!(vectors[1].value("distance"), Some(15.0));
}

#[test]
fn test_source_records_to_vectors() {
    let records: Vec<TrajectoryRecord> = vec![
        record(&[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]], "loop"),
        record(&[[2.0, 2.0], [3.0, 3.0], [4.0, 4.0], [5.0, 5.0], [6.0, 6.0]], "diagonal"),
    ];
    let selected = records.get_selected_data().unwrap();
    let vectors = build_batch(&selected, &FeatureConfig::default()).unwrap();
    assert_eq!(vectors.len(), 2);
    // two right turns of 90 degrees
    let turn = vectors[0].value("turning_angle_mean").unwrap();
    assert!((turn + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn test_json_file_end_to_end() {
    let contents = r#"[
        {"traj_data": [[0, 0, 0], [2, 0, 1], [4, 0, 2], [4, 0, 4]], "label": "car"},
        {"traj_data": [[0, 0, 0], [0, 1, 1]], "label": "too short for jerk"},
        {"label": "no trajectory"}
    ]"#;
    let path = temp_file("trajectories.json", contents);

    let source = JsonFileSource::new(&path);
    let records = source.get_selected_data().unwrap();
    assert_eq!(records.len(), 3);

    let config = FeatureConfig {
        layout: RowLayout::Xyt,
        failure_policy: FailurePolicy::Skip,
        ..Default::default()
    };
    let vectors = build_batch(&records, &config).unwrap();
    assert_eq!(vectors.len(), 1);
    assert_eq!(vectors[0].record_index, Some(0));
    // velocities [2, 2, 0]: one stop, one change above threshold
    assert_eq!(vectors[0].value("stop_rate"), Some(1.0 / 3.0));
    assert_eq!(vectors[0].value("velocity_change_rate"), Some(0.5));

    let aborted = build_batch(&records, &FeatureConfig { failure_policy: FailurePolicy::Abort, ..config });
    assert!(matches!(aborted, Err(FeatureError::Record { index: 1, .. })));

    std::fs::remove_file(path).ok();
}
