//! Node recipes for every live operator.
//!
//! Scalars paired with wider operands bind through lane broadcast, so most
//! recipes accept `{1, n}` on both sides; the scalar-only recipe for the
//! same operator is more specific and wins for `1 ∘ 1`.

use linkme::distributed_slice;
use rigmath_foundation::{Dimension, Operator, UnaryOp, UnitType};
use rigmath_recipe_registry::ports::{
    add_double_linear, angle_between, axis_angle_to_quat, compose_matrix, distance_between, matrix,
    mult_double_linear, multiply_divide, plus_minus_average, point_matrix_mult, quat,
    vector_product,
};
use rigmath_recipe_registry::{DimSet, Output, Owner, RECIPES, Recipe, Setting};

const D1_2: DimSet = DimSet::D1.with(Dimension::Two);
const D1_3: DimSet = DimSet::D1.with(Dimension::Three);
const D1_4: DimSet = DimSet::D1.with(Dimension::Four);

// Addition

#[distributed_slice(RECIPES)]
static ADD_SCALAR: Recipe = Recipe::binary(
    Operator::Add,
    DimSet::D1,
    DimSet::D1,
    Owner::Lhs,
    add_double_linear::NODE,
    add_double_linear::INPUT1,
    add_double_linear::INPUT2,
    Output::new(add_double_linear::OUTPUT, Dimension::One),
);

#[distributed_slice(RECIPES)]
static ADD_2D: Recipe = Recipe::binary(
    Operator::Add,
    D1_2,
    D1_2,
    Owner::Lhs,
    plus_minus_average::NODE,
    plus_minus_average::INPUT2D_0,
    plus_minus_average::INPUT2D_1,
    Output::new(plus_minus_average::OUTPUT2D, Dimension::Two),
)
.with_settings(&[(plus_minus_average::OPERATION, Setting::Int(plus_minus_average::SUM))]);

#[distributed_slice(RECIPES)]
static ADD_3D: Recipe = Recipe::binary(
    Operator::Add,
    D1_3,
    D1_3,
    Owner::Lhs,
    plus_minus_average::NODE,
    plus_minus_average::INPUT3D_0,
    plus_minus_average::INPUT3D_1,
    Output::new(plus_minus_average::OUTPUT3D, Dimension::Three),
)
.with_settings(&[(plus_minus_average::OPERATION, Setting::Int(plus_minus_average::SUM))]);

#[distributed_slice(RECIPES)]
static ADD_QUAT: Recipe = Recipe::binary(
    Operator::Add,
    D1_4,
    D1_4,
    Owner::Lhs,
    quat::ADD,
    quat::INPUT1,
    quat::INPUT2,
    Output::new(quat::OUTPUT, Dimension::Four),
);

#[distributed_slice(RECIPES)]
static ADD_MATRIX: Recipe = Recipe::binary(
    Operator::Add,
    DimSet::D16,
    DimSet::D16,
    Owner::Lhs,
    matrix::ADD,
    matrix::MATRIX_IN_0,
    matrix::MATRIX_IN_1,
    Output::new(matrix::MATRIX_SUM, Dimension::Sixteen),
);

// Subtraction

#[distributed_slice(RECIPES)]
static SUB_SCALAR: Recipe = Recipe::binary(
    Operator::Sub,
    DimSet::D1,
    DimSet::D1,
    Owner::Lhs,
    plus_minus_average::NODE,
    plus_minus_average::INPUT1D_0,
    plus_minus_average::INPUT1D_1,
    Output::new(plus_minus_average::OUTPUT1D, Dimension::One),
)
.with_settings(&[(
    plus_minus_average::OPERATION,
    Setting::Int(plus_minus_average::SUBTRACT),
)]);

#[distributed_slice(RECIPES)]
static SUB_2D: Recipe = Recipe::binary(
    Operator::Sub,
    D1_2,
    D1_2,
    Owner::Lhs,
    plus_minus_average::NODE,
    plus_minus_average::INPUT2D_0,
    plus_minus_average::INPUT2D_1,
    Output::new(plus_minus_average::OUTPUT2D, Dimension::Two),
)
.with_settings(&[(
    plus_minus_average::OPERATION,
    Setting::Int(plus_minus_average::SUBTRACT),
)]);

#[distributed_slice(RECIPES)]
static SUB_3D: Recipe = Recipe::binary(
    Operator::Sub,
    D1_3,
    D1_3,
    Owner::Lhs,
    plus_minus_average::NODE,
    plus_minus_average::INPUT3D_0,
    plus_minus_average::INPUT3D_1,
    Output::new(plus_minus_average::OUTPUT3D, Dimension::Three),
)
.with_settings(&[(
    plus_minus_average::OPERATION,
    Setting::Int(plus_minus_average::SUBTRACT),
)]);

#[distributed_slice(RECIPES)]
static SUB_QUAT: Recipe = Recipe::binary(
    Operator::Sub,
    D1_4,
    D1_4,
    Owner::Lhs,
    quat::SUB,
    quat::INPUT1,
    quat::INPUT2,
    Output::new(quat::OUTPUT, Dimension::Four),
);

// Multiplication

#[distributed_slice(RECIPES)]
static MUL_SCALAR: Recipe = Recipe::binary(
    Operator::Mul,
    DimSet::D1,
    DimSet::D1,
    Owner::Lhs,
    mult_double_linear::NODE,
    mult_double_linear::INPUT1,
    mult_double_linear::INPUT2,
    Output::new(mult_double_linear::OUTPUT, Dimension::One),
);

#[distributed_slice(RECIPES)]
static MUL_3D: Recipe = Recipe::binary(
    Operator::Mul,
    D1_3,
    D1_3,
    Owner::Lhs,
    multiply_divide::NODE,
    multiply_divide::INPUT1,
    multiply_divide::INPUT2,
    Output::new(multiply_divide::OUTPUT, Dimension::Three),
)
.with_settings(&[(
    multiply_divide::OPERATION,
    Setting::Int(multiply_divide::MULTIPLY),
)]);

// Triples do not know about matrices; the matrix side provides the product.
#[distributed_slice(RECIPES)]
static MUL_TRIPLE_MATRIX: Recipe = Recipe::binary(
    Operator::Mul,
    DimSet::D3,
    DimSet::D16,
    Owner::Rhs,
    point_matrix_mult::NODE,
    point_matrix_mult::IN_POINT,
    point_matrix_mult::IN_MATRIX,
    Output::new(point_matrix_mult::OUTPUT, Dimension::Three),
)
.with_settings(&[(point_matrix_mult::VECTOR_MULTIPLY, Setting::Bool(true))]);

#[distributed_slice(RECIPES)]
static MUL_MATRIX: Recipe = Recipe::binary(
    Operator::Mul,
    DimSet::D16,
    DimSet::D16,
    Owner::Lhs,
    matrix::MULT,
    matrix::MATRIX_IN_0,
    matrix::MATRIX_IN_1,
    Output::new(matrix::MATRIX_SUM, Dimension::Sixteen),
);

#[distributed_slice(RECIPES)]
static MUL_QUAT: Recipe = Recipe::binary(
    Operator::Mul,
    DimSet::D4,
    DimSet::D4,
    Owner::Lhs,
    quat::PROD,
    quat::INPUT1,
    quat::INPUT2,
    Output::new(quat::OUTPUT, Dimension::Four),
);

// Division and power

#[distributed_slice(RECIPES)]
static DIV_SCALAR: Recipe = Recipe::binary(
    Operator::Div,
    DimSet::D1,
    DimSet::D1,
    Owner::Lhs,
    multiply_divide::NODE,
    multiply_divide::INPUT1X,
    multiply_divide::INPUT2X,
    Output::new(multiply_divide::OUTPUT_X, Dimension::One),
)
.with_settings(&[(multiply_divide::OPERATION, Setting::Int(multiply_divide::DIVIDE))]);

#[distributed_slice(RECIPES)]
static DIV_3D: Recipe = Recipe::binary(
    Operator::Div,
    D1_3,
    D1_3,
    Owner::Lhs,
    multiply_divide::NODE,
    multiply_divide::INPUT1,
    multiply_divide::INPUT2,
    Output::new(multiply_divide::OUTPUT, Dimension::Three),
)
.with_settings(&[(multiply_divide::OPERATION, Setting::Int(multiply_divide::DIVIDE))]);

#[distributed_slice(RECIPES)]
static POW_SCALAR: Recipe = Recipe::binary(
    Operator::Pow,
    DimSet::D1,
    DimSet::D1,
    Owner::Lhs,
    multiply_divide::NODE,
    multiply_divide::INPUT1X,
    multiply_divide::INPUT2X,
    Output::new(multiply_divide::OUTPUT_X, Dimension::One),
)
.with_settings(&[(multiply_divide::OPERATION, Setting::Int(multiply_divide::POWER))]);

#[distributed_slice(RECIPES)]
static POW_3D: Recipe = Recipe::binary(
    Operator::Pow,
    D1_3,
    D1_3,
    Owner::Lhs,
    multiply_divide::NODE,
    multiply_divide::INPUT1,
    multiply_divide::INPUT2,
    Output::new(multiply_divide::OUTPUT, Dimension::Three),
)
.with_settings(&[(multiply_divide::OPERATION, Setting::Int(multiply_divide::POWER))]);

// Geometry

#[distributed_slice(RECIPES)]
static POINT_MATRIX: Recipe = Recipe::binary(
    Operator::PointMatrixMul,
    DimSet::D3,
    DimSet::D16,
    Owner::Lhs,
    point_matrix_mult::NODE,
    point_matrix_mult::IN_POINT,
    point_matrix_mult::IN_MATRIX,
    Output::new(point_matrix_mult::OUTPUT, Dimension::Three),
)
.with_settings(&[(point_matrix_mult::VECTOR_MULTIPLY, Setting::Bool(false))]);

#[distributed_slice(RECIPES)]
static CROSS: Recipe = Recipe::binary(
    Operator::Cross,
    DimSet::D3,
    DimSet::D3,
    Owner::Lhs,
    vector_product::NODE,
    vector_product::INPUT1,
    vector_product::INPUT2,
    Output::new(vector_product::OUTPUT, Dimension::Three),
)
.with_settings(&[
    (vector_product::OPERATION, Setting::Int(vector_product::CROSS)),
    (vector_product::NORMALIZE_OUTPUT, Setting::Bool(false)),
]);

#[distributed_slice(RECIPES)]
static DOT: Recipe = Recipe::binary(
    Operator::Dot,
    DimSet::D3,
    DimSet::D3,
    Owner::Lhs,
    vector_product::NODE,
    vector_product::INPUT1,
    vector_product::INPUT2,
    Output::new(vector_product::OUTPUT_X, Dimension::One),
)
.with_settings(&[
    (vector_product::OPERATION, Setting::Int(vector_product::DOT)),
    (vector_product::NORMALIZE_OUTPUT, Setting::Bool(false)),
]);

#[distributed_slice(RECIPES)]
static ANGLE_BETWEEN: Recipe = Recipe::binary(
    Operator::AngleBetween,
    DimSet::D3,
    DimSet::D3,
    Owner::Lhs,
    angle_between::NODE,
    angle_between::VECTOR1,
    angle_between::VECTOR2,
    Output::with_unit(angle_between::ANGLE, Dimension::One, UnitType::Angle),
);

// The angle is a distinct scalar input, not a broadcast lane.
#[distributed_slice(RECIPES)]
static AXIS_ANGLE: Recipe = Recipe::binary(
    Operator::AxisAngle,
    DimSet::D3,
    DimSet::D1,
    Owner::Lhs,
    axis_angle_to_quat::NODE,
    axis_angle_to_quat::INPUT_AXIS,
    axis_angle_to_quat::INPUT_ANGLE,
    Output::new(axis_angle_to_quat::OUTPUT, Dimension::Four),
);

// Unary

#[distributed_slice(RECIPES)]
static NEG_SCALAR: Recipe = Recipe::unary(
    UnaryOp::Neg,
    DimSet::D1,
    mult_double_linear::NODE,
    mult_double_linear::INPUT1,
    Output::new(mult_double_linear::OUTPUT, Dimension::One),
)
.with_settings(&[(mult_double_linear::INPUT2.port, Setting::Float(-1.0))]);

#[distributed_slice(RECIPES)]
static NEG_2D: Recipe = Recipe::unary(
    UnaryOp::Neg,
    DimSet::D2,
    plus_minus_average::NODE,
    plus_minus_average::INPUT2D_1,
    Output::new(plus_minus_average::OUTPUT2D, Dimension::Two),
)
.with_settings(&[
    (
        plus_minus_average::OPERATION,
        Setting::Int(plus_minus_average::SUBTRACT),
    ),
    (plus_minus_average::INPUT2D_0.port, Setting::Pair([0.0, 0.0])),
]);

#[distributed_slice(RECIPES)]
static NEG_3D: Recipe = Recipe::unary(
    UnaryOp::Neg,
    DimSet::D3,
    multiply_divide::NODE,
    multiply_divide::INPUT1,
    Output::new(multiply_divide::OUTPUT, Dimension::Three),
)
.with_settings(&[
    (
        multiply_divide::OPERATION,
        Setting::Int(multiply_divide::MULTIPLY),
    ),
    (multiply_divide::INPUT2.port, Setting::Triple([-1.0, -1.0, -1.0])),
]);

#[distributed_slice(RECIPES)]
static NEG_QUAT: Recipe = Recipe::unary(
    UnaryOp::Neg,
    DimSet::D4,
    quat::NEGATE,
    quat::INPUT,
    Output::new(quat::OUTPUT, Dimension::Four),
);

#[distributed_slice(RECIPES)]
static INVERSE_MATRIX: Recipe = Recipe::unary(
    UnaryOp::Inverse,
    DimSet::D16,
    matrix::INVERSE,
    matrix::INVERSE_INPUT,
    Output::new(matrix::INVERSE_OUTPUT, Dimension::Sixteen),
);

#[distributed_slice(RECIPES)]
static INVERSE_QUAT: Recipe = Recipe::unary(
    UnaryOp::Inverse,
    DimSet::D4,
    quat::INVERT,
    quat::INPUT,
    Output::new(quat::OUTPUT, Dimension::Four),
);

#[distributed_slice(RECIPES)]
static LENGTH: Recipe = Recipe::unary(
    UnaryOp::Length,
    DimSet::D3,
    distance_between::NODE,
    distance_between::POINT1,
    Output::new(distance_between::DISTANCE, Dimension::One),
)
.with_settings(&[(distance_between::POINT2.port, Setting::Triple([0.0, 0.0, 0.0]))]);

#[distributed_slice(RECIPES)]
static NORMALIZE: Recipe = Recipe::unary(
    UnaryOp::Normalize,
    DimSet::D3,
    vector_product::NODE,
    vector_product::INPUT1,
    Output::new(vector_product::OUTPUT, Dimension::Three),
)
.with_settings(&[
    (
        vector_product::OPERATION,
        Setting::Int(vector_product::NO_OPERATION),
    ),
    (vector_product::NORMALIZE_OUTPUT, Setting::Bool(true)),
]);

#[distributed_slice(RECIPES)]
static QUAT_TO_MATRIX: Recipe = Recipe::unary(
    UnaryOp::QuatToMatrix,
    DimSet::D4,
    compose_matrix::NODE,
    compose_matrix::INPUT_QUAT,
    Output::new(compose_matrix::OUTPUT, Dimension::Sixteen),
)
.with_settings(&[(compose_matrix::USE_EULER_ROTATION, Setting::Bool(false))]);
