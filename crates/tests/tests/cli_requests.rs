//! YAML requests run through the CLI command layer.

use rigmath_expr::EngineConfig;
use rigmath_tools::commands::{frame, transport};

#[test]
fn test_frame_request_emits_matrices() {
    let request: frame::FrameRequest = serde_yaml::from_str(
        r#"
points:
  - [0, 0, 0]
  - [1, 0, 0]
  - [2, 1, 0]
  - [3, 1, 0]
upHints: [0, 0, 1]
aimAxis: x
upAxis: y
"#,
    )
    .unwrap();
    let report = frame::run(&request, &EngineConfig::default()).unwrap();
    assert_eq!(report.aims.len(), 4);
    let matrices = report.matrices.unwrap();
    assert_eq!(matrices.len(), 4);
    assert_eq!(&matrices[2][12..15], &[2.0, 1.0, 0.0]);
}

#[test]
fn test_bidirectional_request_uses_config_unwind() {
    let config = EngineConfig::from_yaml_str("unwind: positive\n").unwrap();
    let request: transport::TransportRequest = serde_yaml::from_str(
        r#"
tangents: [[0, 1, 0], [0, 1, 0], [0, 1, 0]]
direction: bidirectional
start: [1, 0, 0]
end: [0, 0, 1]
"#,
    )
    .unwrap();
    let report = transport::run(&request, &config).unwrap();
    assert_eq!(report.normals.len(), 3);
    assert_eq!(report.normals[0], [1.0, 0.0, 0.0]);
    // Positive unwinding takes the long way from +x to +z around +y.
    let mid = report.normals[1];
    assert!((mid[0] + std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
    assert!((mid[2] + std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
}
