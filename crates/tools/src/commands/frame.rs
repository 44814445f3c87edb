//! `frame`: cross-product framing of a polyline.

use rigmath_expr::EngineConfig;
use rigmath_functions::{Axis, UpHints, aiming_matrices, framed_aim_and_up};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Framing request.
///
/// ```yaml
/// points: [[0, 0, 0], [1, 0, 0], [2, 1, 0]]
/// upHints: [0, 0, 1]
/// aimAxis: y
/// upAxis: z
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameRequest {
    pub points: Vec<[f64; 3]>,
    #[serde(default)]
    pub up_hints: UpHints,
    /// With `up_axis`, also emit one aiming matrix per point.
    pub aim_axis: Option<Axis>,
    pub up_axis: Option<Axis>,
}

/// Framing result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameReport {
    pub aims: Vec<[f64; 3]>,
    pub ups: Vec<[f64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrices: Option<Vec<[f64; 16]>>,
}

pub fn run(request: &FrameRequest, config: &EngineConfig) -> anyhow::Result<FrameReport> {
    let frames = framed_aim_and_up(&request.points, &request.up_hints, config.tolerance)?;
    let matrices = match (request.aim_axis, request.up_axis) {
        (Some(aim), Some(up)) => Some(aiming_matrices(
            &request.points,
            aim,
            up,
            &request.up_hints,
            config.tolerance,
        )?),
        (None, None) => None,
        _ => anyhow::bail!("aimAxis and upAxis must be given together"),
    };
    info!(points = frames.len(), "framed polyline");
    Ok(FrameReport {
        aims: frames.aims,
        ups: frames.ups,
        matrices,
    })
}
