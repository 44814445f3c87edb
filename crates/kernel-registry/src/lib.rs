//! Node Recipe Registry.
//!
//! A recipe tells the expression compiler how to realize one operator as a
//! single host graph node when at least one operand is live: which node type
//! to create, which slots the operands bind to, which static settings to
//! apply and which output port carries the result.
//!
//! # Architecture
//!
//! The registry uses [`linkme::distributed_slice`] for compile-time registration:
//!
//! 1. Crates register recipes with `#[distributed_slice(RECIPES)]` statics
//! 2. At link time, all registrations are collected into [`RECIPES`]
//! 3. At runtime, [`lookup`] finds the recipe for an operator and operand
//!    dimensions
//!
//! Registration order is unspecified, so lookup prefers the most specific
//! match (the recipe accepting the fewest dimensions) rather than the first.
//!
//! # Ownership
//!
//! Each recipe is owned by one side of the operation. The compiler asks for a
//! recipe owned by the left operand first and falls back to one owned by the
//! right operand (a reflected recipe), mirroring operator overloading where
//! the right operand gets a second chance.
//!
//! # Example Registration
//!
//! ```ignore
//! use linkme::distributed_slice;
//! use rigmath_recipe_registry::{DimSet, Output, Owner, RECIPES, Recipe, ports};
//!
//! #[distributed_slice(RECIPES)]
//! static ADD_SCALAR: Recipe = Recipe::binary(
//!     Operator::Add, DimSet::D1, DimSet::D1, Owner::Lhs,
//!     ports::add_double_linear::NODE,
//!     ports::add_double_linear::INPUT1, ports::add_double_linear::INPUT2,
//!     Output::new(ports::add_double_linear::OUTPUT, Dimension::One),
//! );
//! ```

pub mod ports;

pub use linkme;

use linkme::distributed_slice;
use rigmath_foundation::{Dimension, OpKey, Operator, UnaryOp, UnitType};

/// Set of operand dimensions a recipe accepts on one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DimSet(u8);

impl DimSet {
    /// Accepts nothing; used as the right side of unary recipes.
    pub const EMPTY: DimSet = DimSet(0);
    /// Scalars only.
    pub const D1: DimSet = DimSet::of(Dimension::One);
    /// 2D only.
    pub const D2: DimSet = DimSet::of(Dimension::Two);
    /// Triples only.
    pub const D3: DimSet = DimSet::of(Dimension::Three);
    /// Quaternions only.
    pub const D4: DimSet = DimSet::of(Dimension::Four);
    /// Matrices only.
    pub const D16: DimSet = DimSet::of(Dimension::Sixteen);

    /// Set containing a single dimension.
    pub const fn of(dimension: Dimension) -> Self {
        DimSet(dimension.bit())
    }

    /// This set plus `dimension`.
    pub const fn with(self, dimension: Dimension) -> Self {
        DimSet(self.0 | dimension.bit())
    }

    /// Whether `dimension` is accepted.
    pub const fn contains(self, dimension: Dimension) -> bool {
        self.0 & dimension.bit() != 0
    }

    /// Number of accepted dimensions.
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Whether the set accepts nothing.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Which operand provides a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    /// Forward recipe, provided by the left operand.
    Lhs,
    /// Reflected recipe, provided by the right operand.
    Rhs,
}

/// An input slot on a node.
///
/// A slot has a nominal dimension. Operands of that dimension bind to `port`
/// directly. A scalar operand bound to a multi-lane slot is replicated into
/// each of `lanes`; slots without lanes accept only their own dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// Compound port name.
    pub port: &'static str,
    /// Nominal dimension.
    pub dimension: Dimension,
    /// Per-lane child ports used for scalar broadcast.
    pub lanes: &'static [&'static str],
}

impl Slot {
    /// Scalar slot.
    pub const fn scalar(port: &'static str) -> Self {
        Slot {
            port,
            dimension: Dimension::One,
            lanes: &[],
        }
    }

    /// Slot that accepts exactly `dimension`.
    pub const fn exact(port: &'static str, dimension: Dimension) -> Self {
        Slot {
            port,
            dimension,
            lanes: &[],
        }
    }

    /// Multi-lane slot that also accepts a broadcast scalar.
    pub const fn lanes(
        port: &'static str,
        dimension: Dimension,
        lanes: &'static [&'static str],
    ) -> Self {
        Slot {
            port,
            dimension,
            lanes,
        }
    }

    /// Whether a scalar can be replicated across this slot.
    pub fn broadcasts(&self) -> bool {
        self.dimension != Dimension::One && self.lanes.len() == self.dimension.len()
    }

    /// Whether an operand of `dimension` can bind here.
    pub fn accepts(&self, dimension: Dimension) -> bool {
        dimension == self.dimension || (dimension == Dimension::One && self.broadcasts())
    }
}

/// Output port of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Output {
    /// Port name.
    pub port: &'static str,
    /// Dimension of the value on the port.
    pub dimension: Dimension,
    /// Unit of the value on the port.
    pub unit: UnitType,
}

impl Output {
    /// Unitless output.
    pub const fn new(port: &'static str, dimension: Dimension) -> Self {
        Output {
            port,
            dimension,
            unit: UnitType::None,
        }
    }

    /// Output carrying a unit.
    pub const fn with_unit(port: &'static str, dimension: Dimension, unit: UnitType) -> Self {
        Output {
            port,
            dimension,
            unit,
        }
    }
}

/// A static node setting applied when the node is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Setting {
    /// Boolean attribute.
    Bool(bool),
    /// Integer or enum attribute.
    Int(i64),
    /// Scalar attribute.
    Float(f64),
    /// Two-lane attribute.
    Pair([f64; 2]),
    /// Three-lane attribute.
    Triple([f64; 3]),
}

/// Descriptor for one operator realized as one node.
#[derive(Debug)]
pub struct Recipe {
    /// Operator implemented.
    pub key: OpKey,
    /// Accepted left operand dimensions.
    pub lhs: DimSet,
    /// Accepted right operand dimensions; empty for unary recipes.
    pub rhs: DimSet,
    /// Side providing the recipe.
    pub owner: Owner,
    /// Host node type.
    pub node: &'static str,
    /// Slot for the left operand.
    pub lhs_slot: Slot,
    /// Slot for the right operand.
    pub rhs_slot: Option<Slot>,
    /// Result port.
    pub output: Output,
    /// Static settings applied before binding operands.
    pub settings: &'static [(&'static str, Setting)],
}

impl Recipe {
    /// Binary recipe without settings.
    #[allow(clippy::too_many_arguments)]
    pub const fn binary(
        op: Operator,
        lhs: DimSet,
        rhs: DimSet,
        owner: Owner,
        node: &'static str,
        lhs_slot: Slot,
        rhs_slot: Slot,
        output: Output,
    ) -> Self {
        Recipe {
            key: OpKey::Binary(op),
            lhs,
            rhs,
            owner,
            node,
            lhs_slot,
            rhs_slot: Some(rhs_slot),
            output,
            settings: &[],
        }
    }

    /// Unary recipe without settings.
    pub const fn unary(
        op: UnaryOp,
        operand: DimSet,
        node: &'static str,
        slot: Slot,
        output: Output,
    ) -> Self {
        Recipe {
            key: OpKey::Unary(op),
            lhs: operand,
            rhs: DimSet::EMPTY,
            owner: Owner::Lhs,
            node,
            lhs_slot: slot,
            rhs_slot: None,
            output,
            settings: &[],
        }
    }

    /// Same recipe with static settings.
    pub const fn with_settings(mut self, settings: &'static [(&'static str, Setting)]) -> Self {
        self.settings = settings;
        self
    }

    /// Whether this recipe accepts the given operator and dimensions.
    pub fn matches(&self, key: OpKey, lhs: Dimension, rhs: Option<Dimension>, owner: Owner) -> bool {
        self.key == key
            && self.owner == owner
            && self.lhs.contains(lhs)
            && match rhs {
                Some(d) => self.rhs.contains(d),
                None => self.rhs.is_empty(),
            }
    }

    fn specificity(&self) -> u32 {
        self.lhs.len() + self.rhs.len()
    }
}

/// Distributed slice collecting all recipe registrations.
#[distributed_slice]
pub static RECIPES: [Recipe];

/// Find the recipe for an operator, operand dimensions and owning side.
pub fn lookup(
    key: OpKey,
    lhs: Dimension,
    rhs: Option<Dimension>,
    owner: Owner,
) -> Option<&'static Recipe> {
    RECIPES
        .iter()
        .filter(|r| r.matches(key, lhs, rhs, owner))
        .min_by_key(|r| r.specificity())
}

/// All recipes registered for an operator.
pub fn recipes_for(key: OpKey) -> impl Iterator<Item = &'static Recipe> {
    RECIPES.iter().filter(move |r| r.key == key)
}
