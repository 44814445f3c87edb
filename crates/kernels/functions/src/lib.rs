//! rigmath Rigging Functions
//!
//! Higher-level operations composed from the expression compiler. Each
//! function takes a [`GraphBuilder`](rigmath_expr::GraphBuilder) and works on
//! concrete values, live host outputs, or a mix of both.
//!
//! - [`pick`]: channel-selective matrix filtering
//! - [`blend`]: linear, angle-aware and spherical blending
//! - [`construct`]: matrix construction and axis extraction
//! - [`framing`]: cross-product framing of polylines
//! - [`transport`]: forward, backward and bidirectional parallel transport
//! - [`interpolate`]: gap filling and ratio helpers

pub mod blend;
pub mod construct;
pub mod framing;
pub mod interpolate;
pub mod pick;
pub mod transport;

pub use blend::{VectorBlend, blend, blend_quaternions, blend_vectors};
pub use construct::{
    Axis, MatrixRows, aim_matrix, create_matrix, create_scale_matrix, matrix_axis,
    matrix_translation, normalize_axes,
};
pub use framing::{Frames, UpHints, aim_vectors_from_points, aiming_matrices, framed_aim_and_up};
pub use interpolate::{
    LinearInterpolator, Lerp, arc_length_ratios, blend_nones, chase_nones, deflip_vectors,
    float_range,
};
pub use pick::{Channels, pick};
pub use transport::{bidirectional_parallel_transport, parallel_transport, parallel_transport_backward};
