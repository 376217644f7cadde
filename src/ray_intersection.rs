use nalgebra::{Point3, Vector3};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
    /// Furthest distance, in world units, at which a hit still counts
    pub max_distance: f64,
}

impl Ray {
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self {
            origin,
            direction,
            max_distance: f64::INFINITY,
        }
    }

    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = max_distance;
        self
    }

    pub fn at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction * t
    }

    /// Picks the smallest strictly positive ray parameter that stays within
    /// `max_distance`.
    pub fn nearest_hit<I>(&self, roots: I) -> Option<f64>
    where
        I: IntoIterator<Item = f64>,
    {
        let max_t = self.max_distance / self.direction.norm();

        roots
            .into_iter()
            .filter(|&t| t > 0.0 && t <= max_t)
            .reduce(f64::min)
    }
}
