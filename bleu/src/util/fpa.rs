///Wrapper around the [`float_cmp::approx_eq!()`] macro for easy comparison of floats with a certain tolerance.
///Two FPAs are considered equal if they are within a certain tolerance of each other.
#[derive(Debug, Clone, Copy)]
pub struct FPA(pub f64);

impl FPA {
    /// Equality within an absolute `tolerance` instead of the default margin
    pub fn eq_within(self, other: impl Into<FPA>, tolerance: f64) -> bool {
        float_cmp::approx_eq!(f64, self.0, other.into().0, epsilon = tolerance)
    }

    /// Rounds up to the next integer, unless the value is within `tolerance` above its floor.
    /// Used to turn fractional LP bounds into valid integer heights.
    pub fn ceil_within(self, tolerance: f64) -> usize {
        let floor = self.0.floor();
        match FPA(floor).eq_within(self, tolerance) {
            true => floor.max(0.0) as usize,
            false => (floor + 1.0).max(0.0) as usize,
        }
    }
}

impl<T> From<T> for FPA
where
    T: Into<f64>,
{
    fn from(n: T) -> Self {
        FPA(n.into())
    }
}
