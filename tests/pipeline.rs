use rankviz::bounds::Bounds;
use rankviz::matrix::{assemble, scaling_series, shared_axes, AxisComponent};
use rankviz::plot::{self, HeatmapOptions, HeatmapPanel, ScaleKind, ScalingOptions};
use rankviz::results::{extract_output_path, ResultSet};
use std::fs;
use std::path::PathBuf;

fn write_artifact(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn stdout_marker_to_dense_matrix() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = write_artifact(
        &dir,
        "run.json",
        r#"[["(128, 4096)", 0.5], ["(256, 4096)", 0.25]]"#,
    );

    let stdout = format!(
        "running sweep...\nWriting output to: {}\ndone\n",
        artifact.display()
    );
    let path = extract_output_path(&stdout).unwrap();
    let set = ResultSet::from_path(&path).unwrap();

    let (axis1, axis2) = shared_axes(&[&set]);
    assert_eq!(axis1.values(), &[128.0, 256.0]);
    assert_eq!(axis2.values(), &[4096.0]);

    let matrix = assemble(&set, &axis1, &axis2).unwrap();
    assert_eq!((matrix.rows(), matrix.cols()), (2, 1));
    assert_eq!(matrix.get(0, 0), 0.5);
    assert_eq!(matrix.get(1, 0), 0.25);
}

#[test]
fn object_and_pair_artifacts_assemble_identically() {
    let dir = tempfile::tempdir().unwrap();
    let pairs = write_artifact(&dir, "pairs.json", r#"[["(2, 10)", 1.0], ["(4, 10)", 2.0]]"#);
    let map = write_artifact(&dir, "map.json", r#"{"(2, 10)": 1.0, "(4, 10)": 2.0}"#);

    let pair_set = ResultSet::from_path(&pairs).unwrap();
    let map_set = ResultSet::from_path(&map).unwrap();
    assert_eq!(pair_set, map_set);

    let (axis1, axis2) = shared_axes(&[&pair_set]);
    assert_eq!(
        assemble(&pair_set, &axis1, &axis2).unwrap(),
        assemble(&map_set, &axis1, &axis2).unwrap()
    );
}

#[test]
fn malformed_key_aborts_assembly() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = write_artifact(&dir, "bad.json", r#"[["128,4096", 0.5]]"#);
    assert!(ResultSet::from_path(&artifact).is_err());
}

#[test]
fn two_result_sets_share_one_scale() {
    let dir = tempfile::tempdir().unwrap();
    let length = write_artifact(
        &dir,
        "length.json",
        r#"[["(128, 1024)", 0.1], ["(256, 1024)", 0.5]]"#,
    );
    let operation = write_artifact(
        &dir,
        "operation.json",
        r#"[["(128, 1024)", 0.2], ["(256, 1024)", 0.9]]"#,
    );

    let length_set = ResultSet::from_path(&length).unwrap();
    let operation_set = ResultSet::from_path(&operation).unwrap();

    let bounds = Bounds::from_result_sets(&[&length_set, &operation_set]).unwrap();
    assert_eq!((bounds.min(), bounds.max()), (0.1, 0.9));

    // Both panels render against the shared axes and bounds.
    let (axis1, axis2) = shared_axes(&[&length_set, &operation_set]);
    let length_matrix = assemble(&length_set, &axis1, &axis2).unwrap();
    let operation_matrix = assemble(&operation_set, &axis1, &axis2).unwrap();

    let svg = dir.path().join("dual.svg");
    plot::render_heatmaps(
        &svg,
        &[
            HeatmapPanel {
                matrix: &length_matrix,
                title: Some("length heuristic"),
            },
            HeatmapPanel {
                matrix: &operation_matrix,
                title: Some("operation heuristic"),
            },
        ],
        &axis1,
        &axis2,
        &HeatmapOptions {
            bounds,
            scale: ScaleKind::Log,
            show_colorbar: true,
            x_label: "prefill",
            y_label: "operations",
            value_label: "Average Rank Error",
        },
    )
    .unwrap();

    assert!(fs::metadata(&svg).unwrap().len() > 0);
}

#[test]
fn scaling_artifact_renders_sorted_curve() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = write_artifact(
        &dir,
        "scaling.json",
        r#"[["(8, 1000)", 4.0], ["(2, 1000)", 1.5], ["(4, 1000)", 2.5]]"#,
    );

    let set = ResultSet::from_path(&artifact).unwrap();
    let series = scaling_series(&set, AxisComponent::First);
    assert_eq!(series, vec![(2.0, 1.5), (4.0, 2.5), (8.0, 4.0)]);

    let svg = dir.path().join("scaling.svg");
    plot::render_scaling(
        &svg,
        &series,
        &ScalingOptions {
            title: "Operation Heuristic Scalability",
            x_label: "partial queues",
            value_label: "Average Rank Error",
            color_label: "dark-blue",
        },
    )
    .unwrap();

    assert!(fs::metadata(&svg).unwrap().len() > 0);
}

#[test]
fn log_scale_rejects_non_positive_bounds() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = write_artifact(&dir, "zero.json", r#"[["(2, 10)", 0.0], ["(4, 10)", 1.0]]"#);
    let set = ResultSet::from_path(&artifact).unwrap();

    let (axis1, axis2) = shared_axes(&[&set]);
    let matrix = assemble(&set, &axis1, &axis2).unwrap();
    let bounds = Bounds::from_result_sets(&[&set]).unwrap();

    let svg = dir.path().join("zero.svg");
    let result = plot::render_heatmaps(
        &svg,
        &[HeatmapPanel {
            matrix: &matrix,
            title: None,
        }],
        &axis1,
        &axis2,
        &HeatmapOptions {
            bounds,
            scale: ScaleKind::Log,
            show_colorbar: false,
            x_label: "prefill",
            y_label: "operations",
            value_label: "Average Rank Error",
        },
    );
    assert!(result.is_err());
}
