//! Host node types and their ports.
//!
//! One module per node type. Both the recipes and anything that reads a
//! synthesized graph back (evaluators, inspectors) name ports through these
//! constants.

use crate::Slot;
use rigmath_foundation::Dimension;

/// `addDoubleLinear`: scalar sum.
pub mod add_double_linear {
    use super::*;
    pub const NODE: &str = "addDoubleLinear";
    pub const INPUT1: Slot = Slot::scalar("input1");
    pub const INPUT2: Slot = Slot::scalar("input2");
    pub const OUTPUT: &str = "output";
}

/// `multDoubleLinear`: scalar product.
pub mod mult_double_linear {
    use super::*;
    pub const NODE: &str = "multDoubleLinear";
    pub const INPUT1: Slot = Slot::scalar("input1");
    pub const INPUT2: Slot = Slot::scalar("input2");
    pub const OUTPUT: &str = "output";
}

/// `plusMinusAverage`: sum or difference of 1D, 2D or 3D inputs.
pub mod plus_minus_average {
    use super::*;
    pub const NODE: &str = "plusMinusAverage";
    pub const OPERATION: &str = "operation";
    pub const SUM: i64 = 1;
    pub const SUBTRACT: i64 = 2;
    pub const INPUT1D_0: Slot = Slot::scalar("input1D[0]");
    pub const INPUT1D_1: Slot = Slot::scalar("input1D[1]");
    pub const INPUT2D_0: Slot = Slot::lanes(
        "input2D[0]",
        Dimension::Two,
        &["input2D[0].input2Dx", "input2D[0].input2Dy"],
    );
    pub const INPUT2D_1: Slot = Slot::lanes(
        "input2D[1]",
        Dimension::Two,
        &["input2D[1].input2Dx", "input2D[1].input2Dy"],
    );
    pub const INPUT3D_0: Slot = Slot::lanes(
        "input3D[0]",
        Dimension::Three,
        &[
            "input3D[0].input3Dx",
            "input3D[0].input3Dy",
            "input3D[0].input3Dz",
        ],
    );
    pub const INPUT3D_1: Slot = Slot::lanes(
        "input3D[1]",
        Dimension::Three,
        &[
            "input3D[1].input3Dx",
            "input3D[1].input3Dy",
            "input3D[1].input3Dz",
        ],
    );
    pub const OUTPUT1D: &str = "output1D";
    pub const OUTPUT2D: &str = "output2D";
    pub const OUTPUT3D: &str = "output3D";
}

/// `multiplyDivide`: lane-wise product, quotient or power.
pub mod multiply_divide {
    use super::*;
    pub const NODE: &str = "multiplyDivide";
    pub const OPERATION: &str = "operation";
    pub const MULTIPLY: i64 = 1;
    pub const DIVIDE: i64 = 2;
    pub const POWER: i64 = 3;
    pub const INPUT1: Slot = Slot::lanes(
        "input1",
        Dimension::Three,
        &["input1X", "input1Y", "input1Z"],
    );
    pub const INPUT2: Slot = Slot::lanes(
        "input2",
        Dimension::Three,
        &["input2X", "input2Y", "input2Z"],
    );
    pub const INPUT1X: Slot = Slot::scalar("input1X");
    pub const INPUT2X: Slot = Slot::scalar("input2X");
    pub const OUTPUT: &str = "output";
    pub const OUTPUT_X: &str = "outputX";
}

/// Quaternion nodes (`quatAdd`, `quatSub`, `quatProd`, `quatNegate`,
/// `quatInvert`, `quatSlerp`).
pub mod quat {
    use super::*;
    pub const ADD: &str = "quatAdd";
    pub const SUB: &str = "quatSub";
    pub const PROD: &str = "quatProd";
    pub const NEGATE: &str = "quatNegate";
    pub const INVERT: &str = "quatInvert";
    pub const SLERP: &str = "quatSlerp";
    pub const INPUT1: Slot = Slot::lanes(
        "input1Quat",
        Dimension::Four,
        &["input1QuatX", "input1QuatY", "input1QuatZ", "input1QuatW"],
    );
    pub const INPUT2: Slot = Slot::lanes(
        "input2Quat",
        Dimension::Four,
        &["input2QuatX", "input2QuatY", "input2QuatZ", "input2QuatW"],
    );
    pub const INPUT: Slot = Slot::exact("inputQuat", Dimension::Four);
    pub const INPUT_T: Slot = Slot::scalar("inputT");
    pub const ANGLE_INTERPOLATION: &str = "angleInterpolation";
    pub const OUTPUT: &str = "outputQuat";
}

/// Matrix nodes (`addMatrix`, `multMatrix`, `inverseMatrix`).
pub mod matrix {
    use super::*;
    pub const ADD: &str = "addMatrix";
    pub const MULT: &str = "multMatrix";
    pub const INVERSE: &str = "inverseMatrix";
    pub const MATRIX_IN_0: Slot = Slot::exact("matrixIn[0]", Dimension::Sixteen);
    pub const MATRIX_IN_1: Slot = Slot::exact("matrixIn[1]", Dimension::Sixteen);
    pub const MATRIX_SUM: &str = "matrixSum";
    pub const INVERSE_INPUT: Slot = Slot::exact("inputMatrix", Dimension::Sixteen);
    pub const INVERSE_OUTPUT: &str = "outputMatrix";

    /// Element `index` of the multi-input `matrixIn` array.
    pub fn matrix_in(index: usize) -> String {
        format!("matrixIn[{index}]")
    }

    /// Index of a `matrixIn[i]` port name.
    pub fn matrix_in_index(port: &str) -> Option<usize> {
        port.strip_prefix("matrixIn[")?.strip_suffix(']')?.parse().ok()
    }
}

/// `pointMatrixMult`: triple times matrix, as point or direction.
pub mod point_matrix_mult {
    use super::*;
    pub const NODE: &str = "pointMatrixMult";
    pub const IN_POINT: Slot = Slot::lanes(
        "inPoint",
        Dimension::Three,
        &["inPointX", "inPointY", "inPointZ"],
    );
    pub const IN_MATRIX: Slot = Slot::exact("inMatrix", Dimension::Sixteen);
    pub const VECTOR_MULTIPLY: &str = "vectorMultiply";
    pub const OUTPUT: &str = "output";
}

/// `vectorProduct`: dot, cross, normalize, or a matrix transform of
/// `input1`.
pub mod vector_product {
    use super::*;
    pub const NODE: &str = "vectorProduct";
    pub const OPERATION: &str = "operation";
    pub const NO_OPERATION: i64 = 0;
    pub const DOT: i64 = 1;
    pub const CROSS: i64 = 2;
    pub const VECTOR_MATRIX: i64 = 3;
    pub const POINT_MATRIX: i64 = 4;
    pub const INPUT1: Slot = Slot::lanes(
        "input1",
        Dimension::Three,
        &["input1X", "input1Y", "input1Z"],
    );
    pub const INPUT2: Slot = Slot::lanes(
        "input2",
        Dimension::Three,
        &["input2X", "input2Y", "input2Z"],
    );
    pub const MATRIX: Slot = Slot::exact("matrix", Dimension::Sixteen);
    pub const NORMALIZE_OUTPUT: &str = "normalizeOutput";
    pub const OUTPUT: &str = "output";
    pub const OUTPUT_X: &str = "outputX";
}

/// `fourByFourMatrix`: a matrix assembled from scalar fields. Unset fields
/// hold the identity.
pub mod four_by_four_matrix {
    pub const NODE: &str = "fourByFourMatrix";
    /// Fields of the x, y and z axis rows and the translation row.
    pub const ROWS: [[&str; 3]; 4] = [
        ["in00", "in01", "in02"],
        ["in10", "in11", "in12"],
        ["in20", "in21", "in22"],
        ["in30", "in31", "in32"],
    ];
    /// Diagonal fields of the axis rows.
    pub const DIAGONAL: [&str; 3] = ["in00", "in11", "in22"];
    pub const OUTPUT: &str = "output";

    /// Field at `row`, `column`.
    pub fn field(row: usize, column: usize) -> String {
        format!("in{row}{column}")
    }
}

/// `angleBetween`: unsigned angle between two triples.
pub mod angle_between {
    use super::*;
    pub const NODE: &str = "angleBetween";
    pub const VECTOR1: Slot = Slot::exact("vector1", Dimension::Three);
    pub const VECTOR2: Slot = Slot::exact("vector2", Dimension::Three);
    pub const ANGLE: &str = "angle";
}

/// `distanceBetween`: length of `point1 - point2`.
pub mod distance_between {
    use super::*;
    pub const NODE: &str = "distanceBetween";
    pub const POINT1: Slot = Slot::exact("point1", Dimension::Three);
    pub const POINT2: Slot = Slot::exact("point2", Dimension::Three);
    pub const DISTANCE: &str = "distance";
}

/// `axisAngleToQuat`.
pub mod axis_angle_to_quat {
    use super::*;
    pub const NODE: &str = "axisAngleToQuat";
    pub const INPUT_AXIS: Slot = Slot::exact("inputAxis", Dimension::Three);
    pub const INPUT_ANGLE: Slot = Slot::scalar("inputAngle");
    pub const OUTPUT: &str = "outputQuat";
}

/// `composeMatrix`, used here for quaternion rotation only.
pub mod compose_matrix {
    use super::*;
    pub const NODE: &str = "composeMatrix";
    pub const INPUT_QUAT: Slot = Slot::exact("inputQuat", Dimension::Four);
    pub const USE_EULER_ROTATION: &str = "useEulerRotation";
    pub const OUTPUT: &str = "outputMatrix";
}

/// `condition`: select between two scalars by comparing two others.
pub mod condition {
    use super::*;
    pub const NODE: &str = "condition";
    pub const OPERATION: &str = "operation";
    pub const FIRST_TERM: Slot = Slot::scalar("firstTerm");
    pub const SECOND_TERM: Slot = Slot::scalar("secondTerm");
    pub const IF_TRUE: Slot = Slot::scalar("colorIfTrueR");
    pub const IF_FALSE: Slot = Slot::scalar("colorIfFalseR");
    pub const OUTPUT: &str = "outColorR";
}

/// `choice`: pick one of several inputs by index.
pub mod choice {
    use super::*;
    pub const NODE: &str = "choice";
    pub const SELECTOR: Slot = Slot::scalar("selector");
    pub const OUTPUT: &str = "output";

    /// Element `index` of the multi-input `input` array.
    pub fn input(index: usize) -> String {
        format!("input[{index}]")
    }
}

/// `blendTwoAttr`: scalar linear blend.
pub mod blend_two_attr {
    use super::*;
    pub const NODE: &str = "blendTwoAttr";
    pub const INPUT0: Slot = Slot::scalar("input[0]");
    pub const INPUT1: Slot = Slot::scalar("input[1]");
    pub const BLENDER: Slot = Slot::scalar("attributesBlender");
    pub const OUTPUT: &str = "output";
}

/// `blendColors`: triple linear blend, `color1 * blender + color2 * (1 - blender)`.
pub mod blend_colors {
    use super::*;
    pub const NODE: &str = "blendColors";
    pub const COLOR1: Slot = Slot::lanes(
        "color1",
        Dimension::Three,
        &["color1R", "color1G", "color1B"],
    );
    pub const COLOR2: Slot = Slot::lanes(
        "color2",
        Dimension::Three,
        &["color2R", "color2G", "color2B"],
    );
    pub const BLENDER: Slot = Slot::scalar("blender");
    pub const OUTPUT: &str = "output";
}

/// `pickMatrix`: keep selected channels of a matrix.
pub mod pick_matrix {
    use super::*;
    pub const NODE: &str = "pickMatrix";
    pub const INPUT: Slot = Slot::exact("inputMatrix", Dimension::Sixteen);
    pub const USE_SCALE: &str = "useScale";
    pub const USE_SHEAR: &str = "useShear";
    pub const USE_ROTATE: &str = "useRotate";
    pub const USE_TRANSLATE: &str = "useTranslate";
    pub const OUTPUT: &str = "outputMatrix";
}
