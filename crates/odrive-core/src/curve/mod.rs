//! Reference-line geometry segments.
//!
//! A road's reference line is a sequence of segments, each starting at its
//! own `s` with a start pose `(x, y, hdg)` and a `length`. Evaluation takes a
//! segment-local distance and returns the point and heading on the curve.

mod sampled;
mod spiral;


use serde::Serialize;

use crate::math::{Location, Vector2, clamp, rotate};
use crate::polynomial::CubicPolynomial;
use sampled::SampleTable;

/// A point on a curve together with its heading and slope.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DirectedPoint {
    pub location: Location,
    pub tangent: f64,
    pub pitch: f64,
}

impl DirectedPoint {
    pub fn new(location: Location, tangent: f64) -> Self {
        Self {
            location,
            tangent,
            pitch: 0.0,
        }
    }

    /// Move the point sideways; positive offsets go to the right of the heading.
    pub fn apply_lateral_offset(&mut self, offset: f64) {
        let (sin_t, cos_t) = self.tangent.sin_cos();
        self.location.x += offset * sin_t;
        self.location.y -= offset * cos_t;
    }
}

/// How the `p` parameter of a parametric cubic is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParamRange {
    /// `p` runs over `[0, 1]`.
    #[default]
    Normalized,
    /// `p` runs over `[0, length]`.
    ArcLength,
}

impl ParamRange {
    pub fn from_attribute(value: &str) -> Self {
        if value == "arcLength" {
            Self::ArcLength
        } else {
            Self::Normalized
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Curve {
    Line,
    Arc {
        curvature: f64,
    },
    Spiral {
        curv_start: f64,
        curv_end: f64,
    },
    Poly3 {
        poly: CubicPolynomial,
        #[serde(skip)]
        table: SampleTable,
    },
    ParamPoly3 {
        u: CubicPolynomial,
        v: CubicPolynomial,
        p_range: ParamRange,
        #[serde(skip)]
        table: SampleTable,
    },
}

impl Curve {
    pub fn name(&self) -> &'static str {
        match self {
            Curve::Line => "line",
            Curve::Arc { .. } => "arc",
            Curve::Spiral { .. } => "spiral",
            Curve::Poly3 { .. } => "poly3",
            Curve::ParamPoly3 { .. } => "paramPoly3",
        }
    }
}

/// One segment of a road's plan view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geometry {
    s: f64,
    length: f64,
    heading: f64,
    start: Vector2,
    curve: Curve,
}

impl Geometry {
    pub fn line(s: f64, x: f64, y: f64, heading: f64, length: f64) -> Self {
        Self::with_curve(s, x, y, heading, length, Curve::Line)
    }

    pub fn arc(s: f64, x: f64, y: f64, heading: f64, length: f64, curvature: f64) -> Self {
        Self::with_curve(s, x, y, heading, length, Curve::Arc { curvature })
    }

    pub fn spiral(
        s: f64,
        x: f64,
        y: f64,
        heading: f64,
        length: f64,
        curv_start: f64,
        curv_end: f64,
    ) -> Self {
        let curve = Curve::Spiral {
            curv_start,
            curv_end,
        };
        Self::with_curve(s, x, y, heading, length, curve)
    }

    pub fn poly3(s: f64, x: f64, y: f64, heading: f64, length: f64, poly: CubicPolynomial) -> Self {
        let table = SampleTable::poly3(&poly, length);
        Self::with_curve(s, x, y, heading, length, Curve::Poly3 { poly, table })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn param_poly3(
        s: f64,
        x: f64,
        y: f64,
        heading: f64,
        length: f64,
        u: CubicPolynomial,
        v: CubicPolynomial,
        p_range: ParamRange,
    ) -> Self {
        let table = SampleTable::param_poly3(&u, &v, length, p_range == ParamRange::ArcLength);
        let curve = Curve::ParamPoly3 {
            u,
            v,
            p_range,
            table,
        };
        Self::with_curve(s, x, y, heading, length, curve)
    }

    fn with_curve(s: f64, x: f64, y: f64, heading: f64, length: f64, curve: Curve) -> Self {
        Self {
            s,
            length,
            heading,
            start: Vector2::new(x, y),
            curve,
        }
    }

    /// Road coordinate where this segment starts.
    pub fn s(&self) -> f64 {
        self.s
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn start(&self) -> Vector2 {
        self.start
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Road coordinate where this segment ends.
    pub fn end(&self) -> f64 {
        self.s + self.length
    }

    /// Point at segment-local distance `dist`, clamped into `[0, length]`.
    pub fn pos_from_dist(&self, dist: f64) -> DirectedPoint {
        let dist = clamp(dist, 0.0, self.length);
        let origin = Location::new(self.start.x, self.start.y, 0.0);

        match &self.curve {
            Curve::Line => self.line_at(origin, dist),
            Curve::Arc { curvature } => self.arc_at(origin, dist, *curvature),
            Curve::Spiral {
                curv_start,
                curv_end,
            } => self.spiral_at(origin, dist, *curv_start, *curv_end),
            Curve::Poly3 { table, .. } => {
                let p = table.interpolate(dist);
                self.local_at(origin, p.u, p.v, p.dv.atan())
            }
            Curve::ParamPoly3 { table, .. } => {
                let p = table.interpolate(dist);
                self.local_at(origin, p.u, p.v, p.dv.atan2(p.du))
            }
        }
    }

    fn line_at(&self, origin: Location, dist: f64) -> DirectedPoint {
        let (sin_h, cos_h) = self.heading.sin_cos();
        let location = origin + Location::new(dist * cos_h, dist * sin_h, 0.0);
        DirectedPoint::new(location, self.heading)
    }

    fn arc_at(&self, origin: Location, dist: f64, curvature: f64) -> DirectedPoint {
        if curvature == 0.0 {
            return self.line_at(origin, dist);
        }
        let radius = 1.0 / curvature;
        let normal = |h: f64| {
            let (sin_n, cos_n) = (h + std::f64::consts::FRAC_PI_2).sin_cos();
            Location::new(radius * cos_n, radius * sin_n, 0.0)
        };

        let tangent = self.heading + dist * curvature;
        let location = origin + normal(self.heading) - normal(tangent);
        DirectedPoint::new(location, tangent)
    }

    fn spiral_at(&self, origin: Location, dist: f64, start: f64, end: f64) -> DirectedPoint {
        let curve_dot = (end - start) / self.length;
        if curve_dot == 0.0 || !curve_dot.is_finite() {
            return self.arc_at(origin, dist, start);
        }

        let s_o = start / curve_dot;
        let (x_o, y_o, t_o) = spiral::odr_spiral(s_o, curve_dot);
        let (x, y, t) = spiral::odr_spiral(s_o + dist, curve_dot);

        let offset = rotate(self.heading - t_o, x - x_o, y - y_o);
        let location = origin + Location::new(offset.x, offset.y, 0.0);
        DirectedPoint::new(location, self.heading + t - t_o)
    }

    fn local_at(&self, origin: Location, u: f64, v: f64, tangent: f64) -> DirectedPoint {
        let offset = rotate(self.heading, u, v);
        let location = origin + Location::new(offset.x, offset.y, 0.0);
        DirectedPoint::new(location, self.heading + tangent)
    }
}
