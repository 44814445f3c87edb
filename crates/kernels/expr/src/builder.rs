//! The graph builder: the context every operation runs in.
//!
//! A [`GraphBuilder`] borrows the host graph mutably for its lifetime and
//! owns the engine configuration and the naming stack. Operations either
//! compute concretely without touching the host, or call the node
//! primitives here (create, set static, bind, read output) to synthesize a
//! fragment.

use rigmath_foundation::{Kind, OpKey, UnitType, binary_result, unary_result};
use rigmath_graph::{HostGraph, NodeId, Static};
use rigmath_recipe_registry::{Recipe, Setting, Slot};
use tracing::{debug, trace};

use crate::classify::{Classified, ClassifyOptions, Input, classify};
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::naming::NameStack;
use crate::operand::Operand;

/// Expression context bound to one host graph.
pub struct GraphBuilder<'g> {
    host: &'g mut dyn HostGraph,
    config: EngineConfig,
    names: NameStack,
    created: usize,
}

impl<'g> GraphBuilder<'g> {
    /// Builder with default configuration.
    pub fn new(host: &'g mut dyn HostGraph) -> Self {
        Self::with_config(host, EngineConfig::default())
    }

    /// Builder with explicit configuration.
    pub fn with_config(host: &'g mut dyn HostGraph, config: EngineConfig) -> Self {
        let names = NameStack::new(config.naming.clone());
        Self {
            host,
            config,
            names,
            created: 0,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Degeneracy threshold.
    pub fn tolerance(&self) -> f64 {
        self.config.tolerance
    }

    /// Nodes created through this builder.
    pub fn nodes_created(&self) -> usize {
        self.created
    }

    /// The naming stack.
    pub fn names_mut(&mut self) -> &mut NameStack {
        &mut self.names
    }

    /// Run `f` with `segment` pushed onto the naming stack.
    ///
    /// The segment is popped whether or not `f` succeeds.
    pub fn scoped<T>(
        &mut self,
        segment: impl Into<String>,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.names.push(segment);
        let result = f(self);
        self.names.pop();
        result
    }

    /// The host graph.
    pub fn host(&self) -> &dyn HostGraph {
        &*self.host
    }

    /// Classify an input with no unit context.
    pub fn classify(&self, input: impl Into<Input>) -> Result<Classified> {
        let options = ClassifyOptions {
            angle: false,
            angle_unit: self.config.angle_unit,
        };
        classify(input.into(), &*self.host, options)
    }

    /// Classify an input as an angle (scalar) or euler rotation (triple).
    pub fn classify_angle(&self, input: impl Into<Input>) -> Result<Classified> {
        let options = ClassifyOptions {
            angle: true,
            angle_unit: self.config.angle_unit,
        };
        classify(input.into(), &*self.host, options)
    }

    /// Classify and keep only the operand.
    pub fn operand(&self, input: impl Into<Input>) -> Result<Operand> {
        Ok(self.classify(input)?.operand)
    }

    /// Allocate a node named from the current scope.
    pub fn create_node(&mut self, node_type: &str) -> Result<NodeId> {
        let name = self.names.next(node_type);
        let id = self.host.create_node(node_type, &name)?;
        self.created += 1;
        debug!(node = %id, node_type, "created node");
        Ok(id)
    }

    /// Write a constant onto a node input.
    pub fn set_static(&mut self, node: &NodeId, port: &str, value: impl Into<Static>) -> Result<()> {
        let value = value.into();
        trace!(node = %node, port, ?value, "set static input");
        self.host.set_static_input(&node.port(port), value)?;
        Ok(())
    }

    /// Bind an operand to a port of its own dimension: concrete values are
    /// written as statics, live handles are connected.
    pub fn bind_port(&mut self, node: &NodeId, port: &str, operand: &Operand) -> Result<()> {
        match operand {
            Operand::Concrete(v) => self.set_static(node, port, *v),
            Operand::Live(h) => {
                let dest = node.port(port);
                trace!(source = %h.port(), dest = %dest, "connect");
                self.host.connect(h.port(), &dest)?;
                Ok(())
            }
        }
    }

    /// Bind an operand to a slot, replicating a scalar across the slot's
    /// lanes when the slot is wider.
    pub fn bind(&mut self, node: &NodeId, slot: &Slot, operand: &Operand) -> Result<()> {
        let dimension = operand.dimension();
        if dimension == slot.dimension {
            return self.bind_port(node, slot.port, operand);
        }
        if !slot.accepts(dimension) {
            return Err(Error::TypeClassification {
                found: format!("{} operand for {}.{}", operand.kind(), node, slot.port),
                reason: "dimension does not fit the input slot",
            });
        }
        for lane in slot.lanes {
            self.bind_port(node, lane, operand)?;
        }
        Ok(())
    }

    /// Bind an operand across scalar `ports`, one lane each. A scalar is
    /// written to every port; a live compound is connected lane by lane.
    pub fn bind_lanes(&mut self, node: &NodeId, ports: &[&str], operand: &Operand) -> Result<()> {
        let width = operand.dimension().len();
        if width != 1 && width != ports.len() {
            return Err(Error::TypeClassification {
                found: format!("{} operand for {} fields of {}", operand.kind(), ports.len(), node),
                reason: "lane count does not match the fields",
            });
        }
        for (i, port) in ports.iter().enumerate() {
            match operand {
                Operand::Concrete(v) => {
                    let lane = if width == 1 { v.components()[0] } else { v.components()[i] };
                    self.set_static(node, port, lane)?;
                }
                Operand::Live(h) if width == 1 => {
                    self.host.connect(h.port(), &node.port(*port))?;
                }
                Operand::Live(h) => {
                    let source = self.host.lane(h.port(), i)?;
                    trace!(source = %source, dest = %node.port(*port), "connect lane");
                    self.host.connect(&source, &node.port(*port))?;
                }
            }
        }
        Ok(())
    }

    /// Live handle on a node output.
    pub fn output(&self, node: &NodeId, port: &str, kind: Kind, unit: UnitType) -> Result<Operand> {
        let port = self.host.output(node, port)?;
        Ok(Operand::Live(rigmath_graph::LiveHandle::new(port, kind, unit)))
    }

    /// Realize `recipe` as one node fed by the operands.
    pub(crate) fn synthesize(
        &mut self,
        recipe: &Recipe,
        lhs: &Operand,
        rhs: Option<&Operand>,
    ) -> Result<Operand> {
        let node = self.create_node(recipe.node)?;
        for (port, setting) in recipe.settings {
            self.set_static(&node, port, setting_value(*setting))?;
        }
        self.bind(&node, &recipe.lhs_slot, lhs)?;
        if let (Some(slot), Some(rhs)) = (recipe.rhs_slot.as_ref(), rhs) {
            self.bind(&node, slot, rhs)?;
        }

        let inferred = match (recipe.key, rhs) {
            (OpKey::Binary(op), Some(rhs)) => binary_result(op, lhs.kind(), rhs.kind()).kind(),
            (OpKey::Unary(op), None) => unary_result(op, lhs.kind()).kind(),
            _ => None,
        };
        let kind = inferred
            .filter(|k| k.dimension() == recipe.output.dimension)
            .unwrap_or(Kind::for_dimension(recipe.output.dimension));
        self.output(&node, recipe.output.port, kind, recipe.output.unit)
    }
}

fn setting_value(setting: Setting) -> Static {
    use rigmath_foundation::Value;

    match setting {
        Setting::Bool(b) => Static::Bool(b),
        Setting::Int(i) => Static::Int(i),
        Setting::Float(v) => Static::Value(Value::Scalar(v)),
        Setting::Pair(v) => Static::Value(Value::Vec2(v)),
        Setting::Triple(v) => Static::Value(Value::Vector(v)),
    }
}
