//! Arc-length tables for cubic curves.
//!
//! Cubic reference lines have no closed-form arc length, so they are sampled
//! once at construction and evaluated by interpolating between samples.

use crate::polynomial::CubicPolynomial;

const POLY3_STEP: f64 = 0.3;
const PARAM_POLY3_STEP: f64 = 0.5;
const PARAM_POLY3_MIN_INTERVALS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Sample {
    pub s: f64,
    pub u: f64,
    pub v: f64,
    pub du: f64,
    pub dv: f64,
}

/// Local `(u, v, du, dv)` interpolated at arc length `s`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Interpolated {
    pub u: f64,
    pub v: f64,
    pub du: f64,
    pub dv: f64,
}

/// Samples ordered by arc length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleTable {
    samples: Vec<Sample>,
}

impl SampleTable {
    /// `v(u)` sampled at a fixed `u` step until arc length covers `length`.
    pub(crate) fn poly3(poly: &CubicPolynomial, length: f64) -> Self {
        let sample = |u: f64, s: f64| Sample {
            s,
            u,
            v: poly.evaluate(u),
            du: 1.0,
            dv: poly.tangent(u),
        };

        let mut samples = vec![sample(0.0, 0.0)];
        let mut s = 0.0;
        let mut u = 0.0;
        while s < length + POLY3_STEP {
            u += POLY3_STEP;
            let last = samples[samples.len() - 1];
            let next = sample(u, s);
            s += (next.u - last.u).hypot(next.v - last.v);
            samples.push(Sample { s, ..next });
        }

        Self { samples }
    }

    /// `(u(p), v(p))` sampled over the whole parameter range.
    pub(crate) fn param_poly3(
        u_poly: &CubicPolynomial,
        v_poly: &CubicPolynomial,
        length: f64,
        p_is_arc_length: bool,
    ) -> Self {
        let intervals = ((length / PARAM_POLY3_STEP) as usize).max(PARAM_POLY3_MIN_INTERVALS);
        let mut delta_p = 1.0 / intervals as f64;
        if p_is_arc_length {
            delta_p *= length;
        }

        let sample = |p: f64, s: f64| Sample {
            s,
            u: u_poly.evaluate(p),
            v: v_poly.evaluate(p),
            du: u_poly.tangent(p),
            dv: v_poly.tangent(p),
        };

        let mut samples = Vec::with_capacity(intervals + 1);
        samples.push(sample(0.0, 0.0));
        let mut s = 0.0;
        for i in 1..=intervals {
            let last = samples[samples.len() - 1];
            let next = sample(delta_p * i as f64, s);
            s += (next.u - last.u).hypot(next.v - last.v);
            samples.push(Sample { s, ..next });
        }

        Self { samples }
    }

    pub(crate) fn interpolate(&self, s: f64) -> Interpolated {
        let n = self.samples.len();
        if n < 2 {
            let only = self.samples.first().copied().unwrap_or(Sample {
                s: 0.0,
                u: 0.0,
                v: 0.0,
                du: 1.0,
                dv: 0.0,
            });
            return Interpolated {
                u: only.u,
                v: only.v,
                du: only.du,
                dv: only.dv,
            };
        }

        let upper = self.samples.partition_point(|p| p.s < s).clamp(1, n - 1);
        let (a, b) = (self.samples[upper - 1], self.samples[upper]);
        let span = b.s - a.s;
        let rate = if span > 0.0 { (b.s - s) / span } else { 1.0 };
        let lerp = |x: f64, y: f64| rate * x + (1.0 - rate) * y;

        Interpolated {
            u: lerp(a.u, b.u),
            v: lerp(a.v, b.v),
            du: lerp(a.du, b.du),
            dv: lerp(a.dv, b.dv),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.samples.len()
    }
}
