//! Integration test harness for rigmath.
//!
//! Live operations are recorded into a [`MemoryGraph`]; the [`Evaluator`]
//! then computes what a host would produce on the recorded nodes, so live
//! results can be compared with the concrete path on the same inputs.

use std::cell::RefCell;
use std::collections::HashMap;

use rigmath_expr::{EngineConfig, GraphBuilder, Operand};
use rigmath_foundation::{
    Channel, Comparison, IDENTITY, UnwindMode, Value, matrix_ops, quat_ops, vector_ops,
};
use rigmath_graph::{
    ATTRIBUTE_NODE, ATTRIBUTE_VALUE, LiveHandle, MemoryGraph, NodeId, NodeRecord, PortRef,
};
use rigmath_recipe_registry::Slot;
use rigmath_recipe_registry::ports::{
    add_double_linear, angle_between, axis_angle_to_quat, blend_colors, blend_two_attr, choice,
    compose_matrix, condition, distance_between, four_by_four_matrix, matrix, mult_double_linear,
    multiply_divide, pick_matrix, plus_minus_average, point_matrix_mult, quat, vector_product,
};
use thiserror::Error;
use tracing::trace;

/// Failure to evaluate a recorded graph.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("unknown node '{0}'")]
    UnknownNode(NodeId),

    #[error("no evaluation rule for node type '{node_type}' (port {port})")]
    Unsupported { node_type: String, port: PortRef },

    #[error("{port}: {reason}")]
    BadInput { port: PortRef, reason: String },
}

/// Numeric evaluation of [`MemoryGraph`] nodes.
pub struct Evaluator<'g> {
    graph: &'g MemoryGraph,
    overrides: HashMap<NodeId, Value>,
    cache: RefCell<HashMap<PortRef, Vec<f64>>>,
}

impl<'g> Evaluator<'g> {
    pub fn new(graph: &'g MemoryGraph) -> Self {
        Self {
            graph,
            overrides: HashMap::new(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Evaluate as if the declared attribute behind `handle` held `value`.
    pub fn with_value(mut self, handle: &LiveHandle, value: Value) -> Self {
        self.overrides.insert(handle.port().node.clone(), value);
        self.cache.borrow_mut().clear();
        self
    }

    /// Value of an operand. Concrete operands evaluate to themselves.
    pub fn evaluate(&self, operand: &Operand) -> Result<Value, EvalError> {
        let handle = match operand {
            Operand::Concrete(v) => return Ok(*v),
            Operand::Live(h) => h,
        };
        let lanes = self.port(handle.port())?;
        Value::from_components(handle.kind(), &lanes).ok_or_else(|| EvalError::BadInput {
            port: handle.port().clone(),
            reason: format!("{} lanes for a {}", lanes.len(), handle.kind()),
        })
    }

    /// Lanes produced at an output port.
    pub fn port(&self, port: &PortRef) -> Result<Vec<f64>, EvalError> {
        if let Some(hit) = self.cache.borrow().get(port) {
            return Ok(hit.clone());
        }
        let lanes = self.compute(port)?;
        trace!(%port, ?lanes, "evaluated");
        self.cache.borrow_mut().insert(port.clone(), lanes.clone());
        Ok(lanes)
    }

    fn record(&self, node: &NodeId) -> Result<&'g NodeRecord, EvalError> {
        self.graph
            .node(node)
            .ok_or_else(|| EvalError::UnknownNode(node.clone()))
    }

    /// Connected or static value of one input port.
    fn bound(&self, node: &NodeId, port: &str) -> Result<Option<Vec<f64>>, EvalError> {
        let dest = node.port(port);
        if let Some(source) = self.graph.source_of(&dest) {
            return self.port(source).map(Some);
        }
        Ok(self
            .graph
            .static_of(&dest)
            .map(|s| s.as_value().components().to_vec()))
    }

    /// Value of a slot: the whole port, else its lanes, else the host
    /// default (identity for matrices, zeros otherwise).
    fn slot(&self, node: &NodeId, slot: &Slot) -> Result<Vec<f64>, EvalError> {
        if let Some(v) = self.bound(node, slot.port)? {
            return Ok(v);
        }
        let width = slot.dimension.len();
        if !slot.lanes.is_empty() {
            let mut out = vec![0.0; width];
            for (lane, port) in out.iter_mut().zip(slot.lanes) {
                if let Some(v) = self.bound(node, port)? {
                    *lane = v.first().copied().unwrap_or(0.0);
                }
            }
            return Ok(out);
        }
        Ok(if width == 16 {
            IDENTITY.to_vec()
        } else {
            vec![0.0; width]
        })
    }

    fn scalar(&self, node: &NodeId, slot: &Slot) -> Result<f64, EvalError> {
        Ok(self.slot(node, slot)?.first().copied().unwrap_or(0.0))
    }

    fn triple(&self, node: &NodeId, slot: &Slot) -> Result<[f64; 3], EvalError> {
        fixed(&node.port(slot.port), self.slot(node, slot)?)
    }

    fn quat(&self, node: &NodeId, slot: &Slot) -> Result<[f64; 4], EvalError> {
        fixed(&node.port(slot.port), self.slot(node, slot)?)
    }

    fn matrix_at(&self, node: &NodeId, port: &str) -> Result<[f64; 16], EvalError> {
        match self.bound(node, port)? {
            Some(v) => fixed(&node.port(port), v),
            None => Ok(IDENTITY),
        }
    }

    fn int(&self, node: &NodeId, port: &str) -> Result<i64, EvalError> {
        Ok(self
            .graph
            .static_of(&node.port(port))
            .and_then(|s| s.as_int())
            .unwrap_or(0))
    }

    fn flag(&self, node: &NodeId, port: &str, default: bool) -> bool {
        self.graph
            .static_of(&node.port(port))
            .and_then(|s| s.as_bool())
            .unwrap_or(default)
    }

    /// Sorted indices of a multi-input array such as `matrixIn[i]`.
    fn indices(record: &NodeRecord, prefix: &str) -> Vec<usize> {
        let mut found: Vec<usize> = record
            .inputs
            .keys()
            .chain(record.statics.keys())
            .filter_map(|k| {
                let rest = k.strip_prefix(prefix)?.strip_prefix('[')?;
                rest.split(']').next()?.parse().ok()
            })
            .collect();
        found.sort_unstable();
        found.dedup();
        found
    }

    fn compute(&self, port: &PortRef) -> Result<Vec<f64>, EvalError> {
        if let Some((compound, lane)) = port.split_lane() {
            let lanes = self.port(&compound)?;
            return lanes
                .get(lane)
                .map(|v| vec![*v])
                .ok_or_else(|| EvalError::BadInput {
                    port: port.clone(),
                    reason: format!("no lane {lane} in {} lanes", lanes.len()),
                });
        }
        let node = &port.node;
        let record = self.record(node)?;
        let out = match record.node_type.as_str() {
            ATTRIBUTE_NODE => match self.overrides.get(node) {
                Some(v) => v.components().to_vec(),
                None => self
                    .bound(node, ATTRIBUTE_VALUE)?
                    .unwrap_or_default(),
            },
            add_double_linear::NODE => {
                let a = self.scalar(node, &add_double_linear::INPUT1)?;
                let b = self.scalar(node, &add_double_linear::INPUT2)?;
                vec![a + b]
            }
            mult_double_linear::NODE => {
                let a = self.scalar(node, &mult_double_linear::INPUT1)?;
                let b = self.scalar(node, &mult_double_linear::INPUT2)?;
                vec![a * b]
            }
            plus_minus_average::NODE => self.plus_minus_average(record, port)?,
            multiply_divide::NODE => {
                let a = self.triple(node, &multiply_divide::INPUT1)?;
                let b = self.triple(node, &multiply_divide::INPUT2)?;
                let op = self.int(node, multiply_divide::OPERATION)?;
                let lanes: Vec<f64> = a
                    .iter()
                    .zip(b)
                    .map(|(x, y)| match op {
                        multiply_divide::DIVIDE => x / y,
                        multiply_divide::POWER => x.powf(y),
                        _ => x * y,
                    })
                    .collect();
                lanes
            }
            n if n == quat::ADD || n == quat::SUB || n == quat::PROD => {
                let a = self.quat(node, &quat::INPUT1)?;
                let b = self.quat(node, &quat::INPUT2)?;
                let q = match n {
                    quat::ADD => quat_ops::add(a, b),
                    quat::SUB => quat_ops::sub(a, b),
                    _ => quat_ops::mul(a, b),
                };
                q.to_vec()
            }
            quat::NEGATE => quat_ops::negate(self.quat(node, &quat::INPUT)?).to_vec(),
            quat::INVERT => {
                let q = self.quat(node, &quat::INPUT)?;
                quat_ops::inverse(q)
                    .ok_or_else(|| EvalError::BadInput {
                        port: node.port(quat::INPUT.port),
                        reason: "zero quaternion".to_string(),
                    })?
                    .to_vec()
            }
            quat::SLERP => {
                let a = self.quat(node, &quat::INPUT1)?;
                let b = self.quat(node, &quat::INPUT2)?;
                let t = self.scalar(node, &quat::INPUT_T)?;
                let mode = UnwindMode::from_index(self.int(node, quat::ANGLE_INTERPOLATION)?)
                    .unwrap_or_default();
                quat_ops::slerp(a, b, t, mode).to_vec()
            }
            matrix::ADD => {
                let mut sum = [0.0; 16];
                for i in Self::indices(record, "matrixIn") {
                    sum = matrix_ops::add(&sum, &self.matrix_at(node, &matrix::matrix_in(i))?);
                }
                sum.to_vec()
            }
            matrix::MULT => {
                let mut product = IDENTITY;
                for i in Self::indices(record, "matrixIn") {
                    product = matrix_ops::mul(&product, &self.matrix_at(node, &matrix::matrix_in(i))?);
                }
                product.to_vec()
            }
            matrix::INVERSE => {
                let m = self.matrix_at(node, matrix::INVERSE_INPUT.port)?;
                matrix_ops::inverse(&m)
                    .ok_or_else(|| EvalError::BadInput {
                        port: node.port(matrix::INVERSE_INPUT.port),
                        reason: "singular matrix".to_string(),
                    })?
                    .to_vec()
            }
            point_matrix_mult::NODE => {
                let p = self.triple(node, &point_matrix_mult::IN_POINT)?;
                let m = self.matrix_at(node, point_matrix_mult::IN_MATRIX.port)?;
                if self.flag(node, point_matrix_mult::VECTOR_MULTIPLY, false) {
                    matrix_ops::transform_vector(p, &m).to_vec()
                } else {
                    matrix_ops::transform_point(p, &m).to_vec()
                }
            }
            vector_product::NODE => {
                let a = self.triple(node, &vector_product::INPUT1)?;
                let b = self.triple(node, &vector_product::INPUT2)?;
                let mut v = match self.int(node, vector_product::OPERATION)? {
                    vector_product::DOT => [vector_ops::dot(a, b); 3],
                    vector_product::CROSS => vector_ops::cross(a, b),
                    vector_product::VECTOR_MATRIX => matrix_ops::transform_vector(
                        a,
                        &self.matrix_at(node, vector_product::MATRIX.port)?,
                    ),
                    vector_product::POINT_MATRIX => matrix_ops::transform_point(
                        a,
                        &self.matrix_at(node, vector_product::MATRIX.port)?,
                    ),
                    _ => a,
                };
                if self.flag(node, vector_product::NORMALIZE_OUTPUT, false) {
                    v = vector_ops::normalize(v);
                }
                v.to_vec()
            }
            four_by_four_matrix::NODE => {
                let mut m = IDENTITY;
                for (i, lane) in m.iter_mut().enumerate() {
                    if let Some(v) = self.bound(node, &four_by_four_matrix::field(i / 4, i % 4))? {
                        *lane = v.first().copied().unwrap_or(0.0);
                    }
                }
                m.to_vec()
            }
            angle_between::NODE => {
                let a = self.triple(node, &angle_between::VECTOR1)?;
                let b = self.triple(node, &angle_between::VECTOR2)?;
                vec![vector_ops::angle_between(a, b)]
            }
            distance_between::NODE => {
                let a = self.triple(node, &distance_between::POINT1)?;
                let b = self.triple(node, &distance_between::POINT2)?;
                vec![vector_ops::length(vector_ops::sub(a, b))]
            }
            axis_angle_to_quat::NODE => {
                let axis = self.triple(node, &axis_angle_to_quat::INPUT_AXIS)?;
                let angle = self.scalar(node, &axis_angle_to_quat::INPUT_ANGLE)?;
                quat_ops::from_axis_angle(axis, angle).to_vec()
            }
            compose_matrix::NODE => {
                quat_ops::to_matrix(self.quat(node, &compose_matrix::INPUT_QUAT)?).to_vec()
            }
            condition::NODE => {
                let op = self.int(node, condition::OPERATION)?;
                let cmp = Comparison::from_index(op).ok_or_else(|| EvalError::BadInput {
                    port: node.port(condition::OPERATION),
                    reason: format!("unknown comparison {op}"),
                })?;
                let a = self.scalar(node, &condition::FIRST_TERM)?;
                let b = self.scalar(node, &condition::SECOND_TERM)?;
                let slot = if cmp.test(a, b) {
                    &condition::IF_TRUE
                } else {
                    &condition::IF_FALSE
                };
                vec![self.scalar(node, slot)?]
            }
            choice::NODE => {
                let selector = self.scalar(node, &choice::SELECTOR)?.round();
                let options = Self::indices(record, "input");
                let index = options
                    .iter()
                    .copied()
                    .find(|i| *i as f64 == selector)
                    .ok_or_else(|| EvalError::BadInput {
                        port: node.port(choice::SELECTOR.port),
                        reason: format!("no input at index {selector}"),
                    })?;
                self.bound(node, &choice::input(index))?.unwrap_or_default()
            }
            blend_two_attr::NODE => {
                let a = self.scalar(node, &blend_two_attr::INPUT0)?;
                let b = self.scalar(node, &blend_two_attr::INPUT1)?;
                let w = self.scalar(node, &blend_two_attr::BLENDER)?;
                vec![a + (b - a) * w]
            }
            blend_colors::NODE => {
                let c1 = self.triple(node, &blend_colors::COLOR1)?;
                let c2 = self.triple(node, &blend_colors::COLOR2)?;
                let w = self.scalar(node, &blend_colors::BLENDER)?;
                vector_ops::lerp(c2, c1, w).to_vec()
            }
            pick_matrix::NODE => {
                let m = self.matrix_at(node, pick_matrix::INPUT.port)?;
                let channels: Vec<Channel> = [
                    (Channel::Scale, pick_matrix::USE_SCALE),
                    (Channel::Shear, pick_matrix::USE_SHEAR),
                    (Channel::Rotate, pick_matrix::USE_ROTATE),
                    (Channel::Translate, pick_matrix::USE_TRANSLATE),
                ]
                .into_iter()
                .filter(|(_, flag)| self.flag(node, flag, true))
                .map(|(channel, _)| channel)
                .collect();
                matrix_ops::filter_channels(&m, &channels).to_vec()
            }
            other => {
                return Err(EvalError::Unsupported {
                    node_type: other.to_string(),
                    port: port.clone(),
                });
            }
        };
        Ok(out)
    }

    fn plus_minus_average(&self, record: &NodeRecord, port: &PortRef) -> Result<Vec<f64>, EvalError> {
        let node = &port.node;
        let (prefix, slots, width): (&str, [Slot; 2], usize) = match port.port.as_str() {
            plus_minus_average::OUTPUT2D => (
                "input2D",
                [plus_minus_average::INPUT2D_0, plus_minus_average::INPUT2D_1],
                2,
            ),
            plus_minus_average::OUTPUT3D => (
                "input3D",
                [plus_minus_average::INPUT3D_0, plus_minus_average::INPUT3D_1],
                3,
            ),
            _ => (
                "input1D",
                [plus_minus_average::INPUT1D_0, plus_minus_average::INPUT1D_1],
                1,
            ),
        };
        let subtract =
            self.int(node, plus_minus_average::OPERATION)? == plus_minus_average::SUBTRACT;
        let mut acc: Option<Vec<f64>> = None;
        for i in Self::indices(record, prefix) {
            let Some(slot) = slots.get(i) else {
                continue;
            };
            let v = self.slot(node, slot)?;
            acc = Some(match acc {
                None => v,
                Some(a) => a
                    .iter()
                    .zip(&v)
                    .map(|(x, y)| if subtract { x - y } else { x + y })
                    .collect(),
            });
        }
        Ok(acc.unwrap_or_else(|| vec![0.0; width]))
    }
}

fn fixed<const N: usize>(port: &PortRef, lanes: Vec<f64>) -> Result<[f64; N], EvalError> {
    let len = lanes.len();
    lanes.try_into().map_err(|_| EvalError::BadInput {
        port: port.clone(),
        reason: format!("expected {N} lanes, got {len}"),
    })
}

/// Test harness: a recording host plus the configuration builders use.
pub struct TestHarness {
    graph: MemoryGraph,
    config: EngineConfig,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            graph: MemoryGraph::new(),
            config,
        }
    }

    /// Declare a host attribute.
    pub fn declare(&mut self, name: &str, value: Value) -> LiveHandle {
        self.graph.declare(name, value)
    }

    /// Run `f` against a fresh builder on the harness graph.
    ///
    /// # Panics
    ///
    /// Panics if `f` fails.
    pub fn build<T>(&mut self, f: impl FnOnce(&mut GraphBuilder<'_>) -> rigmath_expr::Result<T>) -> T {
        let mut builder = GraphBuilder::with_config(&mut self.graph, self.config.clone());
        match f(&mut builder) {
            Ok(v) => v,
            Err(e) => panic!("build failed: {e}"),
        }
    }

    /// Evaluate an operand against the recorded graph.
    ///
    /// # Panics
    ///
    /// Panics if evaluation fails.
    pub fn eval(&self, operand: &Operand) -> Value {
        match Evaluator::new(&self.graph).evaluate(operand) {
            Ok(v) => v,
            Err(e) => panic!("evaluation failed: {e}"),
        }
    }

    /// Evaluator over the recorded graph, for attribute overrides.
    pub fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(&self.graph)
    }

    pub fn graph(&self) -> &MemoryGraph {
        &self.graph
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Lane-wise comparison with an absolute tolerance.
pub fn approx(a: &Value, b: &Value, tolerance: f64) -> bool {
    a.components().len() == b.components().len()
        && a
            .components()
            .iter()
            .zip(b.components())
            .all(|(x, y)| (x - y).abs() <= tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_override() {
        let mut h = TestHarness::new();
        let x = h.declare("ctl.tx", Value::Scalar(2.0));
        let doubled = h.build(|b| b.mul(&x, 3.0));
        assert_eq!(h.eval(&doubled), Value::Scalar(6.0));
        let moved = h
            .evaluator()
            .with_value(&x, Value::Scalar(5.0))
            .evaluate(&doubled)
            .unwrap();
        assert_eq!(moved, Value::Scalar(15.0));
    }

    #[test]
    fn test_lane_ports_read_one_component() {
        let mut h = TestHarness::new();
        let p = h.declare("loc.translate", Value::Point([1.0, 2.0, 3.0]));
        let z = p.port().lane(2).unwrap();
        assert_eq!(h.evaluator().port(&z).unwrap(), vec![3.0]);
        let w = p.port().lane(3).unwrap();
        assert!(matches!(
            h.evaluator().port(&w),
            Err(EvalError::BadInput { .. })
        ));
    }

    #[test]
    fn test_unknown_node_type() {
        let mut graph = MemoryGraph::new();
        let id = rigmath_graph::HostGraph::create_node(&mut graph, "mystery", "m").unwrap();
        let err = Evaluator::new(&graph).port(&id.port("out")).unwrap_err();
        assert!(matches!(err, EvalError::Unsupported { .. }));
    }
}
