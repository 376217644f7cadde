use super::sphere::{intersect_sphere, sphere_normal};
use super::Shape;
use crate::core::Material;
use crate::ray_intersection::Ray;
use anyhow::ensure;
use nalgebra::{Point3, Unit, Vector3};
use num_traits::identities::Zero;
use serde::Deserialize;

/// A sphere with a mass and a velocity, moved between frames by [`crate::motion`].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Planet {
    radius: f64,
    position: Point3<f64>,
    pub material: Material,
    mass: f64,
    pub velocity: Vector3<f64>,
}

impl Default for Planet {
    fn default() -> Self {
        Self {
            radius: 1.0,
            position: Point3::origin(),
            material: Material::default(),
            mass: 1.0,
            velocity: Vector3::zero(),
        }
    }
}

impl Planet {
    pub fn new(radius: f64, position: Point3<f64>, material: Material, mass: f64) -> Self {
        Self {
            radius,
            position,
            material,
            mass,
            velocity: Vector3::zero(),
        }
    }

    pub fn with_velocity(mut self, velocity: Vector3<f64>) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn get_radius(&self) -> f64 {
        self.radius
    }

    pub fn get_mass(&self) -> f64 {
        self.mass
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.radius > 0.0,
            "planet radius must be positive, got {}",
            self.radius
        );
        ensure!(
            self.mass > 0.0,
            "planet mass must be positive, got {}",
            self.mass
        );

        self.material.validate()
    }
}

impl Shape for Planet {
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

#[cfg(test)]
mod test {
    use super::*;
    use crate::primitives::Sphere;

    #[test]
    fn it_intersects_like_a_sphere() {
        let position = Point3::new(2.0, 0.0, 3.0);
        let planet = Planet::new(1.0, position, Material::default(), 1000.0);
        let sphere = Sphere::new(1.0, position, Material::default());

        let ray = Ray::new(Point3::origin(), Vector3::new(0.5, 0.0, 1.0));
        let hit_point = planet.intersection(&ray);
        assert!(hit_point.is_some());
        assert_eq!(hit_point, sphere.intersection(&ray));

        let hit_point = hit_point.unwrap();
        assert_eq!(planet.normal_at(&hit_point), sphere.normal_at(&hit_point));
    }

    #[test]
    fn it_rejects_massless_planets() {
        let planet = Planet::new(1.0, Point3::origin(), Material::default(), 0.0);
        assert!(planet.validate().is_err());
    }
}
