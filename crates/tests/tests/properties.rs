//! End-to-end properties of classification, chains, picks, framing and
//! transport.

use rigmath_expr::{GraphBuilder, Input, Operand};
use rigmath_foundation::{Channel, Dimension, IDENTITY, Value, matrix_ops, quat_ops, vector_ops};
use rigmath_functions::{
    Channels, UpHints, bidirectional_parallel_transport, framed_aim_and_up, parallel_transport,
    pick,
};
use rigmath_graph::NullGraph;
use rigmath_tests::{TestHarness, approx};

fn sample_matrix() -> [f64; 16] {
    let s = matrix_ops::from_scale([2.0, 1.0, 0.5]);
    let h = matrix_ops::from_shear([0.2, 0.0, -0.1]);
    let r = quat_ops::to_matrix(quat_ops::from_axis_angle([1.0, 1.0, 0.0], 0.6));
    let t = matrix_ops::from_translation([0.0, 4.0, -1.0]);
    matrix_ops::mul(&matrix_ops::mul(&matrix_ops::mul(&s, &h), &r), &t)
}

#[test]
fn test_classification_dimensions() {
    let mut host = NullGraph;
    let b = GraphBuilder::new(&mut host);
    let five = b.classify(5.0).unwrap();
    assert_eq!(five.dimension, Dimension::One);
    assert!(!five.is_live);
    assert_eq!(b.classify([0.0, 1.0, 0.0]).unwrap().dimension, Dimension::Three);
    assert_eq!(b.classify(IDENTITY).unwrap().dimension, Dimension::Sixteen);
}

#[test]
fn test_vector_times_matrix_is_row_vector_product() {
    let mut host = NullGraph;
    let mut b = GraphBuilder::new(&mut host);
    let m = sample_matrix();
    let v = [1.0, -2.0, 0.5];
    let out = b.mul(v, m).unwrap().as_triple().unwrap();
    let manual: Vec<f64> = (0..3)
        .map(|col| (0..3).map(|row| v[row] * m[row * 4 + col]).sum())
        .collect();
    for (x, y) in out.iter().zip(&manual) {
        assert!((x - y).abs() < 1e-12);
    }
}

#[test]
fn test_live_and_concrete_keeps_live_dimension() {
    let mut h = TestHarness::new();
    let live = h.declare("ctl.translate", Value::Vector([1.0, 2.0, 3.0]));
    let out = h.build(|b| b.add(&live, [1.0, 1.0, 1.0]));
    assert!(out.is_live());
    assert_eq!(out.dimension(), Dimension::Three);
}

#[test]
fn test_single_item_chain_is_passthrough() {
    let mut h = TestHarness::new();
    let live = h.declare("ctl.worldMatrix", Value::Matrix(sample_matrix()));
    let out = h.build(|b| b.mult_matrices(vec![Input::from(&live)]));
    assert_eq!(out, Operand::Live(live));
    assert_eq!(h.graph().operator_node_count(), 0);
}

#[test]
fn test_chain_folds_concrete_runs() {
    let mut h = TestHarness::new();
    let a = matrix_ops::from_translation([1.0, 2.0, 3.0]);
    let c = matrix_ops::from_scale([3.0, 3.0, 3.0]);
    let live = h.declare("ctl.worldMatrix", Value::Matrix(IDENTITY));
    let out = h.build(|b| {
        b.mult_matrices(vec![a.into(), c.into(), (&live).into(), c.into()])
    });
    assert!(out.is_live());
    assert_eq!(h.graph().operator_node_count(), 1);
    let expected = matrix_ops::mul(&matrix_ops::mul(&a, &c), &c);
    assert!(approx(&h.eval(&out), &Value::Matrix(expected), 1e-12));
}

#[test]
fn test_pick_all_channels() {
    let mut host = NullGraph;
    let mut b = GraphBuilder::new(&mut host);
    let m = sample_matrix();
    let out = pick(&mut b, m, Channels::ALL, None).unwrap();
    assert_eq!(out.as_matrix(), Some(m));
}

#[test]
fn test_single_channel_picks_reproduce_matrix() {
    let mut host = NullGraph;
    let mut b = GraphBuilder::new(&mut host);
    let m = sample_matrix();
    let parts: Vec<Input> = Channel::CANONICAL
        .into_iter()
        .map(|c| Input::from(pick(&mut b, m, Channels::only(c), None).unwrap()))
        .collect();
    let product = b.mult_matrices(parts).unwrap().as_matrix().unwrap();
    assert!(approx(&Value::Matrix(product), &Value::Matrix(m), 1e-9));
}

#[test]
fn test_colinear_framing_follows_hint() {
    let points = [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 2.0, 0.0]];
    let hint = [3.0, 0.0, 4.0];
    let frames = framed_aim_and_up(&points, &UpHints::Single(hint), 1e-7).unwrap();
    let expected = vector_ops::normalize(hint);
    for up in frames.ups {
        assert!(vector_ops::length(vector_ops::sub(up, expected)) < 1e-6);
    }
}

#[test]
fn test_transport_stays_perpendicular() {
    let mut host = NullGraph;
    let mut b = GraphBuilder::new(&mut host);
    let tangents: Vec<Input> = (0..7)
        .map(|i| {
            let a = i as f64 * 0.5;
            Input::from([a.cos(), 0.4, a.sin()])
        })
        .collect();
    let normals = parallel_transport(&mut b, [0.0, 1.0, 0.0], &tangents).unwrap();
    for (n, t) in normals.iter().zip(&tangents) {
        let n = n.as_triple().unwrap();
        let t = vector_ops::normalize(b.operand(t).unwrap().as_triple().unwrap());
        assert!(vector_ops::dot(n, t).abs() < 1e-5);
    }
}

#[test]
fn test_bidirectional_equals_forward_on_straight_line() {
    let mut host = NullGraph;
    let mut b = GraphBuilder::new(&mut host);
    let tangents = vec![Input::from([0.0, 0.0, 2.0]); 5];
    let start = [0.0, 1.0, 0.0];
    let unwind = b.config().unwind;
    let forward = parallel_transport(&mut b, start, &tangents).unwrap();
    let both =
        bidirectional_parallel_transport(&mut b, start, start, &tangents, None, unwind).unwrap();
    for (f, x) in forward.iter().zip(&both) {
        assert!(approx(
            f.as_value().unwrap(),
            x.as_value().unwrap(),
            1e-9
        ));
    }
}
