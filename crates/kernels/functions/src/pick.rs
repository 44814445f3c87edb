//! Channel-selective matrix filtering.
//!
//! [`pick`] keeps some channels of a primary matrix and takes the rest from
//! a default matrix. Channels are walked in canonical order
//! (scale, shear, rotate, translate) and grouped into maximal runs that share
//! a source, so the number of filter results is bounded by the number of
//! source changes rather than the number of channels.

use rigmath_expr::{Error, GraphBuilder, Input, Operand, Result};
use rigmath_foundation::{Channel, IDENTITY, Kind, UnitType, Value, matrix_ops};
use rigmath_recipe_registry::ports::pick_matrix;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Channel flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Channels {
    /// Axis lengths.
    pub scale: bool,
    /// Shear.
    pub shear: bool,
    /// Rotation.
    pub rotate: bool,
    /// Translation.
    pub translate: bool,
}

impl Channels {
    /// Every channel.
    pub const ALL: Channels = Channels {
        scale: true,
        shear: true,
        rotate: true,
        translate: true,
    };

    /// No channel.
    pub const NONE: Channels = Channels {
        scale: false,
        shear: false,
        rotate: false,
        translate: false,
    };

    /// Just `channel`.
    pub fn only(channel: Channel) -> Self {
        Channels::NONE.with(channel)
    }

    /// This set plus `channel`.
    pub fn with(mut self, channel: Channel) -> Self {
        match channel {
            Channel::Scale => self.scale = true,
            Channel::Shear => self.shear = true,
            Channel::Rotate => self.rotate = true,
            Channel::Translate => self.translate = true,
        }
        self
    }

    /// Whether `channel` is selected.
    pub fn contains(&self, channel: Channel) -> bool {
        match channel {
            Channel::Scale => self.scale,
            Channel::Shear => self.shear,
            Channel::Rotate => self.rotate,
            Channel::Translate => self.translate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Primary,
    Default,
}

/// Group the canonical channels into runs by source.
fn runs(channels: Channels, has_default: bool) -> Vec<(Source, Vec<Channel>)> {
    let mut out: Vec<(Source, Vec<Channel>)> = Vec::new();
    for channel in Channel::CANONICAL {
        let source = if channels.contains(channel) {
            Source::Primary
        } else if has_default {
            Source::Default
        } else {
            continue;
        };
        match out.last_mut() {
            Some((s, run)) if *s == source => run.push(channel),
            _ => out.push((source, vec![channel])),
        }
    }
    out
}

/// Compose `channels` of `source` with the remaining channels of `default`.
///
/// Without a default the unselected channels are identity. Concrete sources
/// are decomposed directly; each live run becomes one `pickMatrix` node. Run
/// results are multiplied in canonical order.
#[instrument(skip_all, fields(channels = ?channels))]
pub fn pick(
    b: &mut GraphBuilder<'_>,
    source: impl Into<Input>,
    channels: Channels,
    default: Option<Input>,
) -> Result<Operand> {
    let source = matrix_operand(b, source.into())?;
    let default = default.map(|d| matrix_operand(b, d)).transpose()?;

    if channels == Channels::ALL {
        return Ok(source);
    }
    if channels == Channels::NONE {
        return Ok(default.unwrap_or(Operand::Concrete(Value::Matrix(IDENTITY))));
    }

    let runs = runs(channels, default.is_some());
    debug!(runs = runs.len(), "picking matrix channels");

    let mut factors = Vec::with_capacity(runs.len());
    for (which, run) in runs {
        let matrix = match (which, default.as_ref()) {
            (Source::Default, Some(d)) => d,
            _ => &source,
        };
        factors.push(Input::Operand(filter_run(b, matrix, &run)?));
    }
    b.mult_matrices(factors)
}

fn matrix_operand(b: &GraphBuilder<'_>, input: Input) -> Result<Operand> {
    let operand = b.operand(input)?;
    if operand.kind() != Kind::Matrix {
        return Err(Error::TypeClassification {
            found: operand.kind().to_string(),
            reason: "channel filtering needs a matrix",
        });
    }
    Ok(operand)
}

fn filter_run(b: &mut GraphBuilder<'_>, matrix: &Operand, run: &[Channel]) -> Result<Operand> {
    if let Some(m) = matrix.as_matrix() {
        return Ok(Operand::Concrete(Value::Matrix(matrix_ops::filter_channels(
            &m, run,
        ))));
    }
    let node = b.create_node(pick_matrix::NODE)?;
    b.bind(&node, &pick_matrix::INPUT, matrix)?;
    for (channel, port) in [
        (Channel::Scale, pick_matrix::USE_SCALE),
        (Channel::Shear, pick_matrix::USE_SHEAR),
        (Channel::Rotate, pick_matrix::USE_ROTATE),
        (Channel::Translate, pick_matrix::USE_TRANSLATE),
    ] {
        b.set_static(&node, port, run.contains(&channel))?;
    }
    b.output(&node, pick_matrix::OUTPUT, Kind::Matrix, UnitType::None)
}
