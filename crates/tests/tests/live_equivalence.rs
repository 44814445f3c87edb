//! Live fragments evaluate to the same numbers as the concrete path.
//!
//! Each test declares host attributes, builds the operation once on live
//! handles and once on their values, and compares the evaluated graph with
//! the concrete result.

use rigmath_expr::{GraphBuilder, Input, Operand};
use rigmath_foundation::{Channel, IDENTITY, Operator, UnwindMode, Value, matrix_ops, quat_ops};
use rigmath_functions::{
    Axis, Channels, MatrixRows, VectorBlend, blend, blend_vectors, create_matrix,
    create_scale_matrix, matrix_axis, matrix_translation, normalize_axes, parallel_transport, pick,
};
use rigmath_graph::NullGraph;
use rigmath_tests::{TestHarness, approx};

const EPS: f64 = 1e-9;

fn concrete(f: impl FnOnce(&mut GraphBuilder<'_>) -> rigmath_expr::Result<Operand>) -> Value {
    let mut host = NullGraph;
    let mut b = GraphBuilder::new(&mut host);
    match f(&mut b) {
        Ok(Operand::Concrete(v)) => v,
        Ok(Operand::Live(h)) => panic!("expected a concrete result, got {h}"),
        Err(e) => panic!("concrete build failed: {e}"),
    }
}

fn sample_matrix() -> [f64; 16] {
    let r = quat_ops::to_matrix(quat_ops::from_axis_angle([0.2, 1.0, 0.3], 0.7));
    let s = matrix_ops::from_scale([1.5, 2.0, 0.5]);
    let t = matrix_ops::from_translation([3.0, -2.0, 1.0]);
    matrix_ops::mul(&matrix_ops::mul(&s, &r), &t)
}

#[test]
fn test_binary_operators_match() {
    let cases: Vec<(Operator, Value, Value)> = vec![
        (Operator::Add, Value::Scalar(1.5), Value::Scalar(-4.0)),
        (Operator::Sub, Value::Scalar(1.5), Value::Scalar(-4.0)),
        (Operator::Mul, Value::Scalar(1.5), Value::Scalar(-4.0)),
        (Operator::Div, Value::Scalar(1.5), Value::Scalar(-4.0)),
        (Operator::Pow, Value::Scalar(1.5), Value::Scalar(2.0)),
        (Operator::Add, Value::Vec2([1.0, 2.0]), Value::Vec2([0.5, -3.0])),
        (Operator::Sub, Value::Vec2([1.0, 2.0]), Value::Vec2([0.5, -3.0])),
        (Operator::Add, Value::Vector([1.0, 2.0, 3.0]), Value::Vector([-1.0, 0.5, 2.0])),
        (Operator::Sub, Value::Vector([1.0, 2.0, 3.0]), Value::Vector([-1.0, 0.5, 2.0])),
        (Operator::Mul, Value::Vector([1.0, 2.0, 3.0]), Value::Vector([-1.0, 0.5, 2.0])),
        (Operator::Div, Value::Vector([1.0, 2.0, 3.0]), Value::Vector([-1.0, 0.5, 2.0])),
        (Operator::Pow, Value::Vector([1.0, 2.0, 3.0]), Value::Vector([2.0, 0.5, 2.0])),
        (Operator::Mul, Value::Vector([1.0, 2.0, 3.0]), Value::Scalar(2.5)),
        (Operator::Cross, Value::Vector([1.0, 2.0, 3.0]), Value::Vector([-1.0, 0.5, 2.0])),
        (Operator::Dot, Value::Vector([1.0, 2.0, 3.0]), Value::Vector([-1.0, 0.5, 2.0])),
        (Operator::AngleBetween, Value::Vector([1.0, 0.0, 0.0]), Value::Vector([1.0, 1.0, 0.0])),
        (Operator::Mul, Value::Vector([1.0, 2.0, 3.0]), Value::Matrix(sample_matrix())),
        (Operator::Mul, Value::Point([1.0, 2.0, 3.0]), Value::Matrix(sample_matrix())),
        (Operator::PointMatrixMul, Value::Point([1.0, 2.0, 3.0]), Value::Matrix(sample_matrix())),
        (Operator::Add, Value::Matrix(sample_matrix()), Value::Matrix(IDENTITY)),
        (Operator::Mul, Value::Matrix(sample_matrix()), Value::Matrix(sample_matrix())),
        (
            Operator::Mul,
            Value::Quat(quat_ops::from_axis_angle([0.0, 1.0, 0.0], 0.5)),
            Value::Quat(quat_ops::from_axis_angle([1.0, 0.0, 0.0], 1.1)),
        ),
    ];

    for (op, a, b) in cases {
        let mut h = TestHarness::new();
        let la = h.declare("in.a", a);
        let lb = h.declare("in.b", b);
        let live = h.build(|g| g.binary(op, &la, &lb));
        assert!(live.is_live(), "{op:?} on two live operands");
        let expected = concrete(|g| g.binary(op, a, b));
        let got = h.eval(&live);
        assert!(approx(&got, &expected, EPS), "{op:?}: {got:?} vs {expected:?}");
    }
}

#[test]
fn test_mixed_operands_match() {
    let mut h = TestHarness::new();
    let v = Value::Vector([0.5, -1.0, 2.0]);
    let lv = h.declare("ctl.offset", v);
    let m = sample_matrix();

    let scaled = h.build(|g| g.mul(3.0, &lv));
    assert_eq!(scaled.dimension(), rigmath_foundation::Dimension::Three);
    assert!(approx(&h.eval(&scaled), &concrete(|g| g.mul(3.0, v)), EPS));

    let moved = h.build(|g| g.point_matrix_mul(&lv, m));
    assert!(approx(
        &h.eval(&moved),
        &concrete(|g| g.point_matrix_mul(v, m)),
        EPS
    ));

    let negated = h.build(|g| g.neg(&lv));
    assert!(approx(&h.eval(&negated), &concrete(|g| g.neg(v)), EPS));

    let length = h.build(|g| g.length(&lv));
    assert!(approx(&h.eval(&length), &concrete(|g| g.length(v)), EPS));

    let normal = h.build(|g| g.normal(&lv));
    assert!(approx(&h.eval(&normal), &concrete(|g| g.normal(v)), EPS));
}

#[test]
fn test_points_and_vectors_transform_differently() {
    let shift = matrix_ops::from_translation([10.0, 0.0, 0.0]);
    let mut h = TestHarness::new();
    let point = h.declare("ctl.translate", Value::Point([1.0, 2.0, 3.0]));
    let vector = h.declare("ctl.offset", Value::Vector([1.0, 2.0, 3.0]));
    let matrix = h.declare("ctl.worldMatrix", Value::Matrix(shift));

    let moved = h.build(|g| g.mul(&point, shift));
    assert_eq!(h.eval(&moved), Value::Point([11.0, 2.0, 3.0]));
    let both_live = h.build(|g| g.mul(&point, &matrix));
    assert_eq!(h.eval(&both_live), Value::Point([11.0, 2.0, 3.0]));
    let direction = h.build(|g| g.mul(&vector, &matrix));
    assert_eq!(h.eval(&direction), Value::Vector([1.0, 2.0, 3.0]));
    let explicit = h.build(|g| g.point_matrix_mul(&point, &matrix));
    assert_eq!(h.eval(&explicit), Value::Point([11.0, 2.0, 3.0]));

    assert_eq!(
        concrete(|g| g.mul(Value::Point([1.0, 2.0, 3.0]), shift)),
        Value::Point([11.0, 2.0, 3.0])
    );
    assert_eq!(
        concrete(|g| g.mul(Value::Vector([1.0, 2.0, 3.0]), shift)),
        Value::Vector([1.0, 2.0, 3.0])
    );
}

#[test]
fn test_live_inverse_matches() {
    let mut h = TestHarness::new();
    let m = sample_matrix();
    let lm = h.declare("ctl.worldMatrix", Value::Matrix(m));
    let inv = h.build(|g| g.inverse(&lm));
    assert!(approx(&h.eval(&inv), &concrete(|g| g.inverse(m)), EPS));
}

#[test]
fn test_live_fragment_tracks_its_inputs() {
    let mut h = TestHarness::new();
    let x = h.declare("ctl.tx", Value::Scalar(1.0));
    let y = h.declare("ctl.ty", Value::Scalar(2.0));
    let sum = h.build(|g| {
        let s = g.add(&x, &y)?;
        g.mul(s, 10.0)
    });
    let moved = h
        .evaluator()
        .with_value(&y, Value::Scalar(-4.0))
        .evaluate(&sum)
        .unwrap();
    assert_eq!(moved, Value::Scalar(-30.0));
}

#[test]
fn test_chain_matches_product() {
    let mut h = TestHarness::new();
    let a = matrix_ops::from_translation([1.0, 0.0, 0.0]);
    let b = sample_matrix();
    let c = matrix_ops::from_scale([2.0, 2.0, 2.0]);
    let lb = h.declare("ctl.worldMatrix", Value::Matrix(b));
    let live = h.build(|g| g.mult_matrices(vec![a.into(), (&lb).into(), c.into()]));
    assert_eq!(h.graph().count_of_type("multMatrix"), 1);
    let expected = matrix_ops::mul(&matrix_ops::mul(&a, &b), &c);
    assert!(approx(&h.eval(&live), &Value::Matrix(expected), EPS));
}

#[test]
fn test_pick_matches() {
    let m = sample_matrix();
    let other = matrix_ops::from_translation([0.0, 5.0, 0.0]);
    for channels in [
        Channels::only(Channel::Rotate),
        Channels::only(Channel::Scale).with(Channel::Translate),
        Channels::only(Channel::Shear).with(Channel::Rotate),
    ] {
        let mut h = TestHarness::new();
        let lm = h.declare("ctl.worldMatrix", Value::Matrix(m));
        let lo = h.declare("ref.worldMatrix", Value::Matrix(other));
        let live = h.build(|g| pick(g, &lm, channels, Some((&lo).into())));
        let expected = concrete(|g| pick(g, m, channels, Some(other.into())));
        assert!(approx(&h.eval(&live), &expected, EPS), "{channels:?}");
    }
}

#[test]
fn test_blends_match() {
    let mut h = TestHarness::new();
    let w = h.declare("ctl.weight", Value::Scalar(0.3));
    let a = Value::Vector([1.0, 0.0, 0.0]);
    let b = Value::Vector([0.0, 2.0, 0.0]);
    let la = h.declare("ctl.a", a);
    let lb = h.declare("ctl.b", b);

    let linear = h.build(|g| blend(g, &la, &lb, &w));
    assert!(approx(&h.eval(&linear), &concrete(|g| blend(g, a, b, 0.3)), EPS));

    let qa = quat_ops::from_axis_angle([0.0, 0.0, 1.0], 0.2);
    let qb = quat_ops::from_axis_angle([0.0, 0.0, 1.0], 1.4);
    let lqa = h.declare("ctl.qa", Value::Quat(qa));
    let lqb = h.declare("ctl.qb", Value::Quat(qb));
    let slerped = h.build(|g| blend(g, &lqa, &lqb, &w));
    let expected = concrete(|g| blend(g, Value::Quat(qa), Value::Quat(qb), 0.3));
    assert!(approx(&h.eval(&slerped), &expected, EPS));

    let options = VectorBlend::around([0.0, 0.0, 1.0]).unwind(UnwindMode::Shortest);
    let angular = h.build(|g| blend_vectors(g, &la, &lb, &w, &options));
    let expected = concrete(|g| blend_vectors(g, a, b, 0.3, &options));
    assert!(approx(&h.eval(&angular), &expected, 1e-7));
}

#[test]
fn test_transport_matches() {
    let tangents = [
        [1.0, 0.0, 0.0],
        [1.0, 0.4, 0.1],
        [0.6, 1.0, 0.3],
        [0.0, 1.0, 0.6],
        [-0.4, 0.8, 1.0],
    ];
    let mut h = TestHarness::new();
    let live_tangents: Vec<Input> = tangents
        .iter()
        .enumerate()
        .map(|(i, t)| h.declare(&format!("crv.tangent{i}"), Value::Vector(*t)).into())
        .collect();
    let live = h.build(|g| parallel_transport(g, [0.0, 0.0, 1.0], &live_tangents));

    let mut host = NullGraph;
    let mut g = GraphBuilder::new(&mut host);
    let concrete_tangents: Vec<Input> = tangents.iter().map(|t| (*t).into()).collect();
    let expected = parallel_transport(&mut g, [0.0, 0.0, 1.0], &concrete_tangents).unwrap();

    for (l, c) in live.iter().zip(&expected) {
        let c = c.as_value().copied().unwrap();
        assert!(approx(&h.eval(l), &c, 1e-7), "{:?} vs {c:?}", h.eval(l));
    }
}

#[test]
fn test_matrix_construction_matches() {
    let aim = Value::Vector([0.2, 1.0, 0.4]);
    let up = Value::Vector([1.0, 0.1, -0.3]);
    let side = Value::Vector([0.0, 0.3, 2.0]);
    let origin = Value::Point([4.0, -1.0, 2.0]);
    let mut h = TestHarness::new();
    let live_aim = h.declare("ctl.aim", aim);
    let live_up = h.declare("ctl.up", up);
    let live_origin = h.declare("ctl.translate", origin);

    let orthogonal = |a: Input, u: Input, t: Input| {
        MatrixRows::orthogonal(Axis::Y, a, Axis::NegX, u)
            .preserve_second_length()
            .third_length(1.5)
            .translate(t)
    };
    let live = h.build(|g| {
        create_matrix(g, &orthogonal((&live_aim).into(), (&live_up).into(), (&live_origin).into()))
    });
    assert_eq!(h.graph().count_of_type("fourByFourMatrix"), 1);
    let expected = concrete(|g| create_matrix(g, &orthogonal(aim.into(), up.into(), origin.into())));
    assert!(approx(&h.eval(&live), &expected, EPS));

    let direct = |a: Input| {
        MatrixRows::direct([(Axis::Z, a), (Axis::X, up.into()), (Axis::Y, side.into())])
    };
    let live = h.build(|g| create_matrix(g, &direct((&live_aim).into())));
    let expected = concrete(|g| create_matrix(g, &direct(aim.into())));
    assert!(approx(&h.eval(&live), &expected, EPS));
}

#[test]
fn test_scale_matrix_matches() {
    let mut h = TestHarness::new();
    let uniform = h.declare("ctl.globalScale", Value::Scalar(2.5));
    let per_axis = h.declare("ctl.scale", Value::Vector([1.0, 2.0, 3.0]));

    let live = h.build(|g| create_scale_matrix(g, &uniform));
    assert_eq!(h.eval(&live), Value::Matrix(matrix_ops::from_scale([2.5; 3])));
    let live = h.build(|g| create_scale_matrix(g, &per_axis));
    assert_eq!(h.eval(&live), Value::Matrix(matrix_ops::from_scale([1.0, 2.0, 3.0])));
}

#[test]
fn test_matrix_extraction_matches() {
    let m = sample_matrix();
    let mut h = TestHarness::new();
    let lm = h.declare("ctl.worldMatrix", Value::Matrix(m));

    for (axis, normalize) in [(Axis::X, false), (Axis::NegY, true), (Axis::Z, false)] {
        let live = h.build(|g| matrix_axis(g, &lm, axis, normalize));
        let expected = concrete(|g| matrix_axis(g, m, axis, normalize));
        assert!(approx(&h.eval(&live), &expected, EPS), "{axis}");
    }

    let live = h.build(|g| matrix_translation(g, &lm));
    assert_eq!(h.eval(&live), Value::Point(matrix_ops::translation(&m)));

    let live = h.build(|g| normalize_axes(g, &lm));
    let expected = concrete(|g| normalize_axes(g, m));
    assert!(approx(&h.eval(&live), &expected, EPS));
}

#[test]
fn test_projection_matches() {
    let v = Value::Vector([2.0, -1.0, 3.0]);
    let onto = Value::Vector([0.5, 0.5, 0.0]);
    let mut h = TestHarness::new();
    let lv = h.declare("ctl.offset", v);
    let live = h.build(|g| g.project_onto(&lv, onto));
    let expected = concrete(|g| g.project_onto(v, onto));
    assert!(approx(&h.eval(&live), &expected, EPS));
}
