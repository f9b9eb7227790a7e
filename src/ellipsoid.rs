/// Reference ellipsoid parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis (metres)
    pub a: f64,
    /// Semi-minor axis (metres)
    pub b: f64,
    /// Flattening (dimensionless)
    pub f: f64,
}

impl Ellipsoid {
    pub const fn new(a: f64, b: f64, f: f64) -> Self {
        Self { a, b, f }
    }

    /// First eccentricity squared: (a² - b²) / a²
    pub fn e2(&self) -> f64 {
        (self.a * self.a - self.b * self.b) / (self.a * self.a)
    }

    /// Second eccentricity squared: (a² - b²) / b²
    pub fn ep2(&self) -> f64 {
        (self.a * self.a - self.b * self.b) / (self.b * self.b)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        GRS80
    }
}

/// The ellipsoid every track is measured on. The semi-minor axis and the
/// flattening are taken verbatim rather than derived from each other.
pub const GRS80: Ellipsoid = Ellipsoid::new(6_378_137.0, 6_356_752.314_140_347, 1.0 / 298.257_223_563);
