use super::Shape;
use crate::core::Material;
use crate::ray_intersection::Ray;
use crate::utils::quadratic;
use anyhow::ensure;
use nalgebra::{Point3, Unit, Vector3};
use serde::Deserialize;

/// Smallest strictly positive hit of `ray` on the sphere |P - center|² = radius².
pub(super) fn intersect_sphere(center: &Point3<f64>, radius: f64, ray: &Ray) -> Option<f64> {
    let hypot = ray.origin - center;
    let a = ray.direction.magnitude_squared();
    let b = 2.0 * hypot.dot(&ray.direction);
    let c = hypot.magnitude_squared() - radius * radius;

    let (t0, t1) = quadratic(a, b, c)?;
    ray.nearest_hit([t0, t1])
}

pub(super) fn sphere_normal(center: &Point3<f64>, point: &Point3<f64>) -> Option<Unit<Vector3<f64>>> {
    Unit::try_new(point - center, 0.0)
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Sphere {
    radius: f64,
    position: Point3<f64>,
    pub material: Material,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            radius: 1.0,
            position: Point3::origin(),
            material: Material::default(),
        }
    }
}

impl Sphere {
    pub fn new(radius: f64, position: Point3<f64>, material: Material) -> Self {
        Self {
            radius,
            position,
            material,
        }
    }

    pub fn get_radius(&self) -> f64 {
        self.radius
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.radius > 0.0,
            "sphere radius must be positive, got {}",
            self.radius
        );

        self.material.validate()
    }
}

impl Shape for Sphere {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        intersect_sphere(&self.position, self.radius, ray)
    }

    fn normal_at(&self, point: &Point3<f64>) -> Option<Unit<Vector3<f64>>> {
        sphere_normal(&self.position, point)
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
