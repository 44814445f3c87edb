//! `transport`: parallel transport along concrete tangents.

use rigmath_expr::{EngineConfig, GraphBuilder, Input};
use rigmath_foundation::UnwindMode;
use rigmath_functions::{bidirectional_parallel_transport, parallel_transport, parallel_transport_backward};
use rigmath_graph::NullGraph;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Transport direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
    Bidirectional,
}

/// Transport request.
///
/// ```yaml
/// tangents: [[1, 0, 0], [1, 1, 0], [0, 1, 0]]
/// direction: bidirectional
/// start: [0, 0, 1]
/// end: [0, 0, 1]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportRequest {
    pub tangents: Vec<[f64; 3]>,
    #[serde(default)]
    pub direction: Direction,
    /// Required for forward and bidirectional transport.
    pub start: Option<[f64; 3]>,
    /// Required for backward and bidirectional transport.
    pub end: Option<[f64; 3]>,
    pub ratios: Option<Vec<f64>>,
    /// Defaults to the configured unwinding.
    pub unwind: Option<UnwindMode>,
}

/// Transport result, one normal per tangent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportReport {
    pub normals: Vec<[f64; 3]>,
}

pub fn run(request: &TransportRequest, config: &EngineConfig) -> anyhow::Result<TransportReport> {
    let mut host = NullGraph;
    let mut b = GraphBuilder::with_config(&mut host, config.clone());
    let tangents: Vec<Input> = request.tangents.iter().map(|t| Input::from(*t)).collect();

    let start = || {
        request
            .start
            .ok_or_else(|| anyhow::anyhow!("{:?} transport needs a start normal", request.direction))
    };
    let end = || {
        request
            .end
            .ok_or_else(|| anyhow::anyhow!("{:?} transport needs an end normal", request.direction))
    };

    let normals = match request.direction {
        Direction::Forward => parallel_transport(&mut b, start()?, &tangents)?,
        Direction::Backward => parallel_transport_backward(&mut b, end()?, &tangents)?,
        Direction::Bidirectional => bidirectional_parallel_transport(
            &mut b,
            start()?,
            end()?,
            &tangents,
            request.ratios.as_deref(),
            request.unwind.unwrap_or(config.unwind),
        )?,
    };

    let normals = normals
        .iter()
        .map(|n| {
            n.as_triple()
                .ok_or_else(|| anyhow::anyhow!("transport produced a non-triple result"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    info!(samples = normals.len(), direction = ?request.direction, "transported normals");
    Ok(TransportReport { normals })
}
