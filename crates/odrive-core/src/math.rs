//! Planar and spatial primitives shared by curves and the road network.
//!
//! All angles are radians. The frame is OpenDRIVE's inertial frame:
//! x east, y north, z up, heading counter-clockwise from x.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::Serialize;

/// Clamp `value` into `[min, max]`.
///
/// Unlike `f64::clamp`, a degenerate interval (`min > max`) returns `min`
/// instead of panicking.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max.max(min)
    } else {
        value
    }
}

/// Rotate `(x, y)` counter-clockwise by `angle`.
pub fn rotate(angle: f64, x: f64, y: f64) -> Vector2 {
    let (sin_a, cos_a) = angle.sin_cos();
    Vector2::new(x * cos_a - y * sin_a, y * cos_a + x * sin_a)
}

// ============================================================================
// Vectors
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// A point (or displacement) in 3D.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// Projection onto the XY plane.
    pub fn xy(self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }
}

impl Add for Location {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Location {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Location {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Location {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Location {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

// ============================================================================
// Poses
// ============================================================================

/// Orientation as intrinsic yaw (heading), pitch and roll, in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rotation {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl Rotation {
    pub const fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Unit vector pointing along the heading, tilted by pitch.
    pub fn forward_vector(&self) -> Location {
        let (sp, cp) = self.pitch.sin_cos();
        let (sy, cy) = self.yaw.sin_cos();
        Location::new(cp * cy, cp * sy, sp)
    }

    /// Unit vector pointing to the right of the heading, in the XY plane.
    pub fn right_vector(&self) -> Location {
        let (sy, cy) = self.yaw.sin_cos();
        Location::new(sy, -cy, 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Transform {
    pub location: Location,
    pub rotation: Rotation,
}

impl Transform {
    pub const fn new(location: Location, rotation: Rotation) -> Self {
        Self { location, rotation }
    }
}

/// Axis-aligned box stored as centre plus half-extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BoundingBox {
    pub location: Location,
    pub extent: Location,
}

impl BoundingBox {
    pub fn from_min_max(min: Location, max: Location) -> Self {
        Self {
            location: (min + max) * 0.5,
            extent: (max - min) * 0.5,
        }
    }

    /// Smallest box containing every point, or `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Location>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                Location::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                Location::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
            )
        });
        Some(Self::from_min_max(min, max))
    }

    pub fn min(&self) -> Location {
        self.location - self.extent
    }

    pub fn max(&self) -> Location {
        self.location + self.extent
    }

    /// Containment test in the XY plane.
    pub fn contains_xy(&self, p: Vector2) -> bool {
        let (min, max) = (self.min(), self.max());
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
    }
}

// ============================================================================
// Segments
// ============================================================================

/// Euclidean distance between point `p` and segment `a..b`.
pub fn point_segment_distance(p: Vector2, a: Vector2, b: Vector2) -> f64 {
    let ab = b - a;
    let len2 = ab.dot(ab);
    if len2 == 0.0 {
        return p.distance(a);
    }
    let t = clamp((p - a).dot(ab) / len2, 0.0, 1.0);
    p.distance(a + ab * t)
}

/// Whether segments `a0..a1` and `b0..b1` share at least one point.
pub fn segments_intersect(a0: Vector2, a1: Vector2, b0: Vector2, b1: Vector2) -> bool {
    let d1 = (a1 - a0).cross(b0 - a0);
    let d2 = (a1 - a0).cross(b1 - a0);
    let d3 = (b1 - b0).cross(a0 - b0);
    let d4 = (b1 - b0).cross(a1 - b0);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    // Collinear or touching cases reduce to endpoint-on-segment checks.
    point_segment_distance(b0, a0, a1) == 0.0
        || point_segment_distance(b1, a0, a1) == 0.0
        || point_segment_distance(a0, b0, b1) == 0.0
        || point_segment_distance(a1, b0, b1) == 0.0
}

/// Minimum distance between segments `a0..a1` and `b0..b1` (zero when they cross).
pub fn segment_distance(a0: Vector2, a1: Vector2, b0: Vector2, b1: Vector2) -> f64 {
    if segments_intersect(a0, a1, b0, b1) {
        return 0.0;
    }
    point_segment_distance(a0, b0, b1)
        .min(point_segment_distance(a1, b0, b1))
        .min(point_segment_distance(b0, a0, a1))
        .min(point_segment_distance(b1, a0, a1))
}
