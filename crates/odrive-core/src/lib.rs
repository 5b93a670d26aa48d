#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Geometry primitives for OpenDRIVE road networks.
//!
//! - [`Geometry`]: one plan-view segment of a reference line (line, arc,
//!   spiral, cubic, parametric cubic), evaluated by segment-local distance
//! - [`CubicPolynomial`]: the `a + b·ds + c·ds² + d·ds³` record shape shared by
//!   widths, elevations and lane offsets
//! - [`math`]: vectors, poses, boxes and segment distance

mod curve;
pub mod math;
mod polynomial;


pub use curve::{Curve, DirectedPoint, Geometry, ParamRange};
pub use math::{BoundingBox, Location, Rotation, Transform, Vector2};
pub use polynomial::CubicPolynomial;
