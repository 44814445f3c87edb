//! Matrix chain reduction.

use rigmath_foundation::{IDENTITY, Kind, Operator, UnitType, Value, matrix_ops};
use rigmath_recipe_registry::ports::matrix;
use tracing::{debug, instrument};

use crate::builder::GraphBuilder;
use crate::classify::Input;
use crate::error::{Error, Result};
use crate::operand::Operand;

impl GraphBuilder<'_> {
    /// Product of `items` in order (`items[0] · items[1] · ...`).
    ///
    /// Consecutive concrete matrices are multiplied directly. When anything
    /// live remains, the remaining factors feed a single `multMatrix` node.
    /// An empty list yields identity and a single factor is returned as-is.
    #[instrument(skip_all, fields(len = items.len()))]
    pub fn mult_matrices(&mut self, items: Vec<Input>) -> Result<Operand> {
        let mut factors: Vec<Operand> = Vec::with_capacity(items.len());
        for item in items {
            let operand = self.operand(item)?;
            if operand.kind() != Kind::Matrix {
                return Err(Error::unsupported(
                    Operator::Mul,
                    Kind::Matrix,
                    Some(operand.kind()),
                ));
            }
            if let (Some(Operand::Concrete(Value::Matrix(acc))), Some(m)) =
                (factors.last_mut(), operand.as_matrix())
            {
                *acc = matrix_ops::mul(acc, &m);
                continue;
            }
            factors.push(operand);
        }

        match factors.len() {
            0 => return Ok(Operand::Concrete(Value::Matrix(IDENTITY))),
            1 => return Ok(factors.remove(0)),
            _ => {}
        }

        debug!(factors = factors.len(), "chaining matrices");
        let node = self.create_node(matrix::MULT)?;
        for (i, factor) in factors.iter().enumerate() {
            self.bind_port(&node, &matrix::matrix_in(i), factor)?;
        }
        self.output(&node, matrix::MATRIX_SUM, Kind::Matrix, UnitType::None)
    }
}
