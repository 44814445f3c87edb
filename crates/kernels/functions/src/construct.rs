//! Matrix construction and axis extraction.
//!
//! [`aim_matrix`] builds orthonormal frames from numbers. The remaining
//! functions work on operands: rows made from concrete values yield a
//! concrete matrix, and any live row makes a `fourByFourMatrix` node.
//! Axis and translation extraction reads a live matrix through one
//! `vectorProduct` node.

use std::fmt;
use std::str::FromStr;

use rigmath_expr::{Error, GraphBuilder, Input, Operand, Result};
use rigmath_foundation::{Dimension, Kind, UnitType, Value, matrix_ops, vector_ops};
use rigmath_recipe_registry::ports::{four_by_four_matrix, vector_product};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A signed basis axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// `+x`
    #[serde(rename = "x")]
    X,
    /// `+y`
    #[serde(rename = "y")]
    Y,
    /// `+z`
    #[serde(rename = "z")]
    Z,
    /// `-x`
    #[serde(rename = "-x")]
    NegX,
    /// `-y`
    #[serde(rename = "-y")]
    NegY,
    /// `-z`
    #[serde(rename = "-z")]
    NegZ,
}

impl Axis {
    /// Row index of the axis (0, 1 or 2).
    pub fn index(self) -> usize {
        match self {
            Axis::X | Axis::NegX => 0,
            Axis::Y | Axis::NegY => 1,
            Axis::Z | Axis::NegZ => 2,
        }
    }

    /// `1.0` or `-1.0`.
    pub fn sign(self) -> f64 {
        match self {
            Axis::X | Axis::Y | Axis::Z => 1.0,
            Axis::NegX | Axis::NegY | Axis::NegZ => -1.0,
        }
    }

    /// Signed unit vector.
    pub fn unit(self) -> [f64; 3] {
        let mut v = [0.0; 3];
        v[self.index()] = self.sign();
        v
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
            Axis::NegX => "-x",
            Axis::NegY => "-y",
            Axis::NegZ => "-z",
        };
        f.write_str(s)
    }
}

impl FromStr for Axis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" | "+x" => Ok(Axis::X),
            "y" | "+y" => Ok(Axis::Y),
            "z" | "+z" => Ok(Axis::Z),
            "-x" => Ok(Axis::NegX),
            "-y" => Ok(Axis::NegY),
            "-z" => Ok(Axis::NegZ),
            _ => Err(Error::TypeClassification {
                found: format!("axis {s:?}"),
                reason: "expected x, y, z, -x, -y or -z",
            }),
        }
    }
}

/// Orthonormal, right-handed matrix whose `aim_axis` points along `aim` and
/// whose `up_axis` is as close to `up` as possible, translated to
/// `translation`.
///
/// `up` is re-orthogonalized against `aim`. When it is parallel to `aim` an
/// arbitrary perpendicular is used instead.
pub fn aim_matrix(
    aim_axis: Axis,
    aim: [f64; 3],
    up_axis: Axis,
    up: [f64; 3],
    translation: [f64; 3],
) -> Result<[f64; 16]> {
    let (i, j) = (aim_axis.index(), up_axis.index());
    if i == j {
        return Err(Error::TypeClassification {
            found: format!("aim axis {aim_axis} and up axis {up_axis}"),
            reason: "aim and up must use different axes",
        });
    }
    let k = 3 - i - j;

    let aim_dir = vector_ops::normalize(aim);
    let up_dir = vector_ops::try_normalize(vector_ops::reject(up, aim_dir), vector_ops::EPSILON)
        .unwrap_or_else(|| vector_ops::normalize(vector_ops::any_perpendicular(aim_dir)));

    let mut rows = [[0.0; 3]; 3];
    rows[i] = vector_ops::scale(aim_dir, aim_axis.sign());
    rows[j] = vector_ops::scale(up_dir, up_axis.sign());
    rows[k] = if (j + 3 - i) % 3 == 1 {
        vector_ops::cross(rows[i], rows[j])
    } else {
        vector_ops::cross(rows[j], rows[i])
    };

    Ok(matrix_ops::from_rows(rows[0], rows[1], rows[2], translation))
}

/// Rows for [`create_matrix`].
///
/// With no axis rows the matrix is the identity. Two rows build an
/// orthogonal matrix: the first vector is kept and the second is
/// re-orthogonalized against it. Three rows are used as given, which may
/// produce shear.
#[derive(Debug, Clone, Default)]
pub struct MatrixRows {
    rows: Vec<(Axis, Input)>,
    translate: Option<Input>,
    preserve_second_length: bool,
    third_length: Option<Input>,
}

impl MatrixRows {
    /// Identity rows.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Orthogonal rows from a primary and a secondary vector.
    pub fn orthogonal(
        first_axis: Axis,
        first: impl Into<Input>,
        second_axis: Axis,
        second: impl Into<Input>,
    ) -> Self {
        Self {
            rows: vec![(first_axis, first.into()), (second_axis, second.into())],
            ..Self::default()
        }
    }

    /// Three rows used directly.
    pub fn direct(rows: [(Axis, Input); 3]) -> Self {
        Self {
            rows: rows.into(),
            ..Self::default()
        }
    }

    /// Translation row.
    pub fn translate(mut self, translate: impl Into<Input>) -> Self {
        self.translate = Some(translate.into());
        self
    }

    /// Keep the second vector's length through orthogonal construction.
    pub fn preserve_second_length(mut self) -> Self {
        self.preserve_second_length = true;
        self
    }

    /// Length of the third row.
    pub fn third_length(mut self, length: impl Into<Input>) -> Self {
        self.third_length = Some(length.into());
        self
    }
}

fn triple(b: &GraphBuilder<'_>, input: &Input, what: &'static str) -> Result<Operand> {
    let operand = b.operand(input)?;
    if operand.dimension() != Dimension::Three {
        return Err(Error::TypeClassification {
            found: operand.kind().to_string(),
            reason: what,
        });
    }
    Ok(operand)
}

fn signed(b: &mut GraphBuilder<'_>, axis: Axis, v: Operand) -> Result<Operand> {
    if axis.sign() < 0.0 { b.neg(v) } else { Ok(v) }
}

fn with_length(b: &mut GraphBuilder<'_>, v: &Operand, length: &Input) -> Result<Operand> {
    let length = b.operand(length)?;
    let n = b.normal(v)?;
    b.mul(n, length)
}

fn distinct(axes: &[Axis]) -> Result<()> {
    for (i, a) in axes.iter().enumerate() {
        if let Some(b) = axes[i + 1..].iter().find(|b| b.index() == a.index()) {
            return Err(Error::TypeClassification {
                found: format!("axes {a} and {b}"),
                reason: "matrix rows must use different axes",
            });
        }
    }
    Ok(())
}

/// Build a matrix from axis rows and an optional translation.
#[instrument(skip_all, fields(rows = spec.rows.len()))]
pub fn create_matrix(b: &mut GraphBuilder<'_>, spec: &MatrixRows) -> Result<Operand> {
    let mut rows: [Operand; 4] = [
        Value::Vector(Axis::X.unit()).into(),
        Value::Vector(Axis::Y.unit()).into(),
        Value::Vector(Axis::Z.unit()).into(),
        Value::Point([0.0; 3]).into(),
    ];

    match spec.rows.as_slice() {
        [] => {
            if let Some(length) = &spec.third_length {
                rows[2] = with_length(b, &rows[2].clone(), length)?;
            }
        }
        [(a1, v1), (a2, v2)] => {
            distinct(&[*a1, *a2])?;
            let first = triple(b, v1, "matrix rows must be triples")?;
            let first = signed(b, *a1, first)?;
            let second = triple(b, v2, "matrix rows must be triples")?;
            let second = signed(b, *a2, second)?;

            let (i, j) = (a1.index(), a2.index());
            let (mut third, orthogonal) = if (j + 3 - i) % 3 == 1 {
                let third = b.cross(&first, &second)?;
                let orthogonal = b.cross(&third, &first)?;
                (third, orthogonal)
            } else {
                let third = b.cross(&second, &first)?;
                let orthogonal = b.cross(&first, &third)?;
                (third, orthogonal)
            };
            let second = if spec.preserve_second_length {
                let length = b.length(&second)?;
                with_length(b, &orthogonal, &Input::Operand(length))?
            } else {
                orthogonal
            };
            if let Some(length) = &spec.third_length {
                third = with_length(b, &third, length)?;
            }
            rows[i] = first;
            rows[j] = second;
            rows[3 - i - j] = third;
        }
        [(a1, v1), (a2, v2), (a3, v3)] => {
            distinct(&[*a1, *a2, *a3])?;
            for (n, (axis, v)) in [(a1, v1), (a2, v2), (a3, v3)].into_iter().enumerate() {
                let v = triple(b, v, "matrix rows must be triples")?;
                let mut v = signed(b, *axis, v)?;
                if let (2, Some(length)) = (n, &spec.third_length) {
                    v = with_length(b, &v, length)?;
                }
                rows[axis.index()] = v;
            }
        }
        other => {
            return Err(Error::TypeClassification {
                found: format!("{} axis rows", other.len()),
                reason: "a matrix takes zero, two or three axis rows",
            });
        }
    }

    if let Some(t) = &spec.translate {
        rows[3] = triple(b, t, "translation must be a triple")?;
    }
    assemble(b, &rows)
}

/// One matrix from four row operands.
fn assemble(b: &mut GraphBuilder<'_>, rows: &[Operand; 4]) -> Result<Operand> {
    if let [Some(x), Some(y), Some(z), Some(t)] = rows.each_ref().map(Operand::as_triple) {
        return Ok(Operand::Concrete(Value::Matrix(matrix_ops::from_rows(x, y, z, t))));
    }
    let node = b.create_node(four_by_four_matrix::NODE)?;
    for (row, fields) in rows.iter().zip(four_by_four_matrix::ROWS) {
        b.bind_lanes(&node, &fields, row)?;
    }
    b.output(&node, four_by_four_matrix::OUTPUT, Kind::Matrix, UnitType::None)
}

/// Scale matrix from one uniform factor or a per-axis triple.
pub fn create_scale_matrix(b: &mut GraphBuilder<'_>, factors: impl Into<Input>) -> Result<Operand> {
    let factors = b.operand(factors)?;
    match (factors.dimension(), factors.as_value()) {
        (Dimension::One, Some(v)) => {
            let s = v.components()[0];
            Ok(Operand::Concrete(Value::Matrix(matrix_ops::from_scale([s; 3]))))
        }
        (Dimension::Three, Some(v)) => {
            let s = v.as_triple().unwrap_or([1.0; 3]);
            Ok(Operand::Concrete(Value::Matrix(matrix_ops::from_scale(s))))
        }
        (Dimension::One | Dimension::Three, None) => {
            let node = b.create_node(four_by_four_matrix::NODE)?;
            b.bind_lanes(&node, &four_by_four_matrix::DIAGONAL, &factors)?;
            b.output(&node, four_by_four_matrix::OUTPUT, Kind::Matrix, UnitType::None)
        }
        _ => Err(Error::TypeClassification {
            found: factors.kind().to_string(),
            reason: "scale factors must be a scalar or a triple",
        }),
    }
}

fn matrix_operand(b: &GraphBuilder<'_>, m: Input) -> Result<Operand> {
    let m = b.operand(m)?;
    if m.dimension() != Dimension::Sixteen {
        return Err(Error::TypeClassification {
            found: m.kind().to_string(),
            reason: "expected a matrix",
        });
    }
    Ok(m)
}

fn vector_matrix_product(
    b: &mut GraphBuilder<'_>,
    m: &Operand,
    operation: i64,
    input: [f64; 3],
    normalize: bool,
    kind: Kind,
) -> Result<Operand> {
    let node = b.create_node(vector_product::NODE)?;
    b.set_static(&node, vector_product::OPERATION, operation)?;
    b.set_static(&node, vector_product::INPUT1.port, Value::Vector(input))?;
    if normalize {
        b.set_static(&node, vector_product::NORMALIZE_OUTPUT, true)?;
    }
    b.bind(&node, &vector_product::MATRIX, m)?;
    b.output(&node, vector_product::OUTPUT, kind, UnitType::None)
}

/// The row of `m` for `axis`, negated for negative axes.
pub fn matrix_axis(
    b: &mut GraphBuilder<'_>,
    m: impl Into<Input>,
    axis: Axis,
    normalize: bool,
) -> Result<Operand> {
    let m = matrix_operand(b, m.into())?;
    if let Some(m) = m.as_matrix() {
        let mut row = vector_ops::scale(matrix_ops::axis(&m, axis.index()), axis.sign());
        if normalize {
            row = vector_ops::normalize(row);
        }
        return Ok(Operand::Concrete(Value::Vector(row)));
    }
    vector_matrix_product(b, &m, vector_product::VECTOR_MATRIX, axis.unit(), normalize, Kind::Vector)
}

/// The translation row of `m`, as a point.
pub fn matrix_translation(b: &mut GraphBuilder<'_>, m: impl Into<Input>) -> Result<Operand> {
    let m = matrix_operand(b, m.into())?;
    if let Some(m) = m.as_matrix() {
        return Ok(Operand::Concrete(Value::Point(matrix_ops::translation(&m))));
    }
    vector_matrix_product(b, &m, vector_product::POINT_MATRIX, [0.0; 3], false, Kind::Point)
}

/// `m` with unit-length axis rows and its translation kept.
pub fn normalize_axes(b: &mut GraphBuilder<'_>, m: impl Into<Input>) -> Result<Operand> {
    let m = matrix_operand(b, m.into())?;
    let rows = [
        matrix_axis(b, &m, Axis::X, true)?,
        matrix_axis(b, &m, Axis::Y, true)?,
        matrix_axis(b, &m, Axis::Z, true)?,
        matrix_translation(b, &m)?,
    ];
    assemble(b, &rows)
}
