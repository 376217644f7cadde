use super::Shape;
use crate::core::Material;
use crate::ray_intersection::Ray;
use crate::utils::solve_quartic;
use anyhow::ensure;
use nalgebra::{Point3, Unit, Vector3};
use serde::Deserialize;

/// A torus lying in the local xz plane, with its hole along the y axis.
///
/// `radius` is the distance from the center to the middle of the tube and
/// `tube_radius` the radius of the tube's cross section. The surface is the zero
/// set of `(|X|² - R² - r²)² - 4R²(r² - X_y²)`, X being relative to the center.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Donut {
    radius: f64,
    tube_radius: f64,
    position: Point3<f64>,
    pub material: Material,
}

impl Default for Donut {
    fn default() -> Self {
        Self {
            radius: 1.0,
            tube_radius: 0.5,
            position: Point3::origin(),
            material: Material::default(),
        }
    }
}

impl Donut {
    pub fn new(radius: f64, tube_radius: f64, position: Point3<f64>, material: Material) -> Self {
        Self {
            radius,
            tube_radius,
            position,
            material,
        }
    }

    pub fn get_radius(&self) -> f64 {
        self.radius
    }

    pub fn get_tube_radius(&self) -> f64 {
        self.tube_radius
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.radius > 0.0 && self.tube_radius > 0.0,
            "donut radii must be positive, got {} and {}",
            self.radius,
            self.tube_radius
        );

        self.material.validate()
    }

    /// Coefficients of the torus equation along `ray`, lowest degree first.
    fn quartic_coefficients(&self, ray: &Ray) -> [f64; 5] {
        let o = ray.origin - self.position;
        let d = ray.direction;

        let sq_radius = self.radius * self.radius;
        let sq_tube_radius = self.tube_radius * self.tube_radius;

        let sum_d_sqrd = d.magnitude_squared();
        let e = o.magnitude_squared() - sq_radius - sq_tube_radius;
        let f = o.dot(&d);
        let four_a_sqrd = 4.0 * sq_radius;

        [
            e * e - four_a_sqrd * (sq_tube_radius - o.y * o.y),
            4.0 * f * e + 2.0 * four_a_sqrd * o.y * d.y,
            2.0 * sum_d_sqrd * e + 4.0 * f * f + four_a_sqrd * d.y * d.y,
            4.0 * sum_d_sqrd * f,
            sum_d_sqrd * sum_d_sqrd,
        ]
    }
}

impl Shape for Donut {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let roots = solve_quartic(&self.quartic_coefficients(ray));
        ray.nearest_hit(roots.iter())
    }

    fn normal_at(&self, point: &Point3<f64>) -> Option<Unit<Vector3<f64>>> {
        let p = point - self.position;
        let sq_radius = self.radius * self.radius;
        let param_squared = sq_radius + self.tube_radius * self.tube_radius;
        let s = p.magnitude_squared() - param_squared;

        let gradient = Vector3::new(
            4.0 * p.x * s,
            4.0 * p.y * s + 8.0 * sq_radius * p.y,
            4.0 * p.z * s,
        );

        Unit::try_new(gradient, 0.0)
    }

    fn get_material(&self) -> &Material {
        &self.material
    }

    fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    fn get_position(&self) -> Point3<f64> {
        self.position
    }

    fn set_position(&mut self, position: Point3<f64>) {
        self.position = position;
    }
}
