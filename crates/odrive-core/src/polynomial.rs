use serde::Serialize;

/// `a + b·ds + c·ds² + d·ds³` with `ds = x - s`.
///
/// OpenDRIVE records (width, elevation, lane offset, ...) define their
/// polynomial relative to the record's own start `s`, while every query in
/// the map uses the absolute road coordinate. Storing the start keeps that
/// translation in one place.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CubicPolynomial {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub s: f64,
}

impl CubicPolynomial {
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self::with_offset(a, b, c, d, 0.0)
    }

    pub const fn with_offset(a: f64, b: f64, c: f64, d: f64, s: f64) -> Self {
        Self { a, b, c, d, s }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let ds = x - self.s;
        self.a + ds * (self.b + ds * (self.c + ds * self.d))
    }

    /// First derivative at `x`.
    pub fn tangent(&self, x: f64) -> f64 {
        let ds = x - self.s;
        self.b + ds * (2.0 * self.c + ds * 3.0 * self.d)
    }

    pub fn is_linear(&self) -> bool {
        self.c == 0.0 && self.d == 0.0
    }
}
