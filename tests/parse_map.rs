//! End-to-end tests for the map parsing pipeline, driving the public API
//! over real files on disk.

use std::io::Write;
use std::path::{Path, PathBuf};

use maplab::{parse_map_file, MapParseError};

fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[test]
fn valid_csv_parses_to_consistent_grid() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "test.csv",
        "RPM,Load,Timing\n\
         1000,20,3.0\n2000,20,4.0\n3000,20,5.0\n\
         1000,40,5.0\n2000,40,6.0\n3000,40,7.0\n",
    );

    let grid = parse_map_file(&path).unwrap();

    assert_eq!(grid.x.len(), grid.y.len());
    assert_eq!(grid.y.len(), grid.z.len());
    for i in 0..grid.rows() {
        assert_eq!(grid.x[i].len(), grid.cols());
        assert_eq!(grid.y[i].len(), grid.cols());
        assert_eq!(grid.z[i].len(), grid.cols());
    }

    // Axes recovered from the meshes are strictly ascending.
    for window in grid.x[0].windows(2) {
        assert!(window[0] < window[1]);
    }
    let first_col: Vec<f64> = grid.y.iter().map(|row| row[0]).collect();
    for window in first_col.windows(2) {
        assert!(window[0] < window[1]);
    }

    assert_eq!(grid.z[0], vec![3.0, 4.0, 5.0]);
    assert_eq!(grid.z[1], vec![5.0, 6.0, 7.0]);
}

#[test]
fn duplicate_pairs_are_averaged() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "dup.csv",
        "RPM,Load,Timing\n\
         1000,20,3.0\n1000,20,5.0\n1000,20,7.0\n\
         2000,30,4.0\n2000,30,6.0\n",
    );

    let grid = parse_map_file(&path).unwrap();
    let rpm_idx = grid.rpm_axis.iter().position(|&v| v == 1000.0).unwrap();
    let load_idx = grid.load_axis.iter().position(|&v| v == 20.0).unwrap();
    assert!((grid.z[load_idx][rpm_idx] - 5.0).abs() < 1e-12);
}

#[test]
fn rows_with_blank_cells_leave_gaps_that_get_filled() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "gaps.csv",
        "RPM,Load,Timing\n\
         1000,20,3.0\n2000,20,4.0\n3000,20,\n4000,20,6.0\n\
         1000,40,5.0\n2000,40,\n3000,40,7.0\n4000,40,8.0\n",
    );

    let grid = parse_map_file(&path).unwrap();
    assert_eq!(grid.rows(), 2);
    assert_eq!(grid.cols(), 4);
    for row in &grid.z {
        for &cell in row {
            assert!(cell.is_finite());
        }
    }
}

#[test]
fn sparse_coverage_is_interpolated_densely() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "sparse.csv",
        "RPM,Load,Timing\n\
         1000,20,3.0\n3000,20,5.0\n5000,20,7.0\n\
         1000,60,7.0\n3000,60,9.0\n5000,60,11.0\n\
         3000,40,7.0\n",
    );

    let grid = parse_map_file(&path).unwrap();
    assert_eq!(grid.rows(), 3);
    assert_eq!(grid.cols(), 3);
    for row in &grid.z {
        for &cell in row {
            assert!(cell.is_finite());
        }
    }
}

#[test]
fn missing_file_is_not_found() {
    let err = parse_map_file(Path::new("nonexistent_map.csv")).unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("file not found"));
}

#[test]
fn empty_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "empty.csv", "");
    let err = parse_map_file(&path).unwrap_err();
    assert!(matches!(err, MapParseError::EmptyInput { .. }));
}

#[test]
fn missing_columns_are_reported_by_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "wrong.csv", "X,Y,Z\n1,4,7\n2,5,8\n");
    let err = parse_map_file(&path).unwrap_err();
    match err {
        MapParseError::MissingColumns { missing, .. } => {
            assert_eq!(missing, vec!["RPM", "Load", "Timing"]);
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn all_non_numeric_rows_fail() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "text.csv",
        "RPM,Load,Timing\nabc,xyz,one\ndef,uvw,two\nghi,rst,three\n",
    );
    let err = parse_map_file(&path).unwrap_err();
    assert!(matches!(err, MapParseError::NoValidData));
}

#[test]
fn ragged_rows_fail_structurally() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "ragged.csv", "RPM,Load,Timing\n1000,20\n2000\n");
    let err = parse_map_file(&path).unwrap_err();
    assert!(matches!(err, MapParseError::Unexpected { .. }));
}

#[test]
fn single_row_gives_one_by_one_grid() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "single.csv", "RPM,Load,Timing\n1000,20,3.0\n");
    let grid = parse_map_file(&path).unwrap();
    assert_eq!(grid.rows(), 1);
    assert_eq!(grid.cols(), 1);
    assert_eq!(grid.z[0][0], 3.0);
}

#[test]
fn too_few_known_points_fail_interpolation() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "two_points.csv",
        "RPM,Load,Timing\n1000,20,3.0\n2000,40,5.0\n",
    );
    let err = parse_map_file(&path).unwrap_err();
    assert!(matches!(err, MapParseError::InsufficientData { known: 2 }));
}

#[test]
fn extra_columns_do_not_change_the_grid() {
    let dir = tempfile::tempdir().unwrap();
    let plain = write_csv(
        dir.path(),
        "plain.csv",
        "RPM,Load,Timing\n1000,20,3.0\n2000,20,4.0\n1000,40,5.0\n2000,40,6.0\n",
    );
    let extra = write_csv(
        dir.path(),
        "extra.csv",
        "RPM,Load,Timing,Notes\n1000,20,3.0,a\n2000,20,4.0,b\n1000,40,5.0,c\n2000,40,6.0,d\n",
    );

    let plain_grid = parse_map_file(&plain).unwrap();
    let extra_grid = parse_map_file(&extra).unwrap();
    assert_eq!(plain_grid, extra_grid);
}

#[test]
fn repeated_parses_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "repeat.csv",
        "RPM,Load,Timing\n\
         1000,20,3.1\n3000,20,5.2\n5000,20,7.3\n\
         2000,40,6.4\n4000,60,9.5\n1000,60,7.6\n",
    );

    let first = parse_map_file(&path).unwrap();
    let second = parse_map_file(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn summary_matches_grid_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "summary.csv",
        "RPM,Load,Timing\n1000,20,3.0\n2000,20,4.0\n1000,40,5.0\n2000,40,6.0\n",
    );

    let grid = parse_map_file(&path).unwrap();
    let summary = grid.summary();
    assert_eq!(summary.shape.rows, grid.rows());
    assert_eq!(summary.shape.cols, grid.cols());
    assert_eq!(summary.z_grid_flat.len(), grid.rows() * grid.cols());
    assert_eq!(summary.total_points, summary.z_grid_flat.len());

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["z_grid_flat"].as_array().unwrap().len(), 4);
}

#[test]
fn generated_style_map_round_trips_exactly() {
    // Same surface the mock generator writes: Timing = RPM/1000 + Load/10.
    let dir = tempfile::tempdir().unwrap();
    let mut content = String::from("RPM,Load,Timing\n");
    for load in [20, 40, 60, 80, 100] {
        for rpm in (1000..=6000).step_by(1000) {
            let timing = rpm as f64 / 1000.0 + load as f64 / 10.0;
            content.push_str(&format!("{rpm},{load},{timing}\n"));
        }
    }
    let path = write_csv(dir.path(), "stock_map.csv", &content);

    let grid = parse_map_file(&path).unwrap();
    assert_eq!(grid.rows(), 5);
    assert_eq!(grid.cols(), 6);
    for (i, &load) in grid.load_axis.iter().enumerate() {
        for (j, &rpm) in grid.rpm_axis.iter().enumerate() {
            assert_eq!(grid.z[i][j], rpm / 1000.0 + load / 10.0);
        }
    }
}
