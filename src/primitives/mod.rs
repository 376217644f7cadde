mod donut;
mod planet;
mod sphere;

use crate::core::Material;
use crate::ray_intersection::Ray;
use nalgebra::{Point3, Unit, Vector3};
use serde::Deserialize;
use std::fmt::Debug;
use std::marker::{Send, Sync};

pub use donut::*;
pub use planet::*;
pub use sphere::*;

/// An implicit surface that can be ray traced and shaded.
pub trait Shape: Send + Sync + Debug {
    /// Ray parameter of the nearest strictly positive hit within the ray's
    /// max distance.
    fn intersect(&self, ray: &Ray) -> Option<f64>;

    fn intersection(&self, ray: &Ray) -> Option<Point3<f64>> {
        self.intersect(ray).map(|t| ray.at(t))
    }

    /// Unit normal at a point on the surface, `None` where it is degenerate.
    fn normal_at(&self, point: &Point3<f64>) -> Option<Unit<Vector3<f64>>>;

    fn get_material(&self) -> &Material;
    fn set_material(&mut self, material: Material);

    fn get_position(&self) -> Point3<f64>;
    fn set_position(&mut self, position: Point3<f64>);
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, tag = "type", rename_all = "lowercase")]
pub enum Object3D {
    Sphere(Box<Sphere>),
    Donut(Box<Donut>),
    Planet(Box<Planet>),
}

impl Object3D {
    pub fn as_shape(&self) -> &dyn Shape {
        match self {
            Object3D::Sphere(sphere) => sphere.as_ref(),
            Object3D::Donut(donut) => donut.as_ref(),
            Object3D::Planet(planet) => planet.as_ref(),
        }
    }

    pub fn as_shape_mut(&mut self) -> &mut dyn Shape {
        match self {
            Object3D::Sphere(sphere) => sphere.as_mut(),
            Object3D::Donut(donut) => donut.as_mut(),
            Object3D::Planet(planet) => planet.as_mut(),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        match self {
            Object3D::Sphere(sphere) => sphere.validate(),
            Object3D::Donut(donut) => donut.validate(),
            Object3D::Planet(planet) => planet.validate(),
        }
    }
}

impl From<Sphere> for Object3D {
    fn from(sphere: Sphere) -> Self {
        Object3D::Sphere(Box::new(sphere))
    }
}

impl From<Donut> for Object3D {
    fn from(donut: Donut) -> Self {
        Object3D::Donut(Box::new(donut))
    }
}

impl From<Planet> for Object3D {
    fn from(planet: Planet) -> Self {
        Object3D::Planet(Box::new(planet))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_deserializes_tagged_objects() {
        let objects: Vec<Object3D> = serde_json::from_value(json!([
            { "type": "sphere", "radius": 2, "position": [0, 0, 3] },
            { "type": "donut", "tube_radius": 0.25 },
            { "type": "planet", "mass": 200, "velocity": [0.025, 0.025, 0.025] }
        ]))
        .unwrap();

        assert!(matches!(objects[0], Object3D::Sphere(_)));
        assert!(matches!(objects[1], Object3D::Donut(_)));
        assert!(matches!(objects[2], Object3D::Planet(_)));
        assert_eq!(objects[0].as_shape().get_position(), Point3::new(0.0, 0.0, 3.0));
        for object in &objects {
            assert!(object.validate().is_ok());
        }
    }

    #[test]
    fn it_rejects_unknown_object_types() {
        let object = serde_json::from_value::<Object3D>(json!({ "type": "cube", "size": 1 }));
        assert!(object.is_err());
    }

    #[test]
    fn it_updates_shapes_through_the_trait() {
        let mut object = Object3D::from(Donut::default());
        let material = Material {
            ambient: 0.5,
            ..Material::default()
        };

        let shape = object.as_shape_mut();
        shape.set_position(Point3::new(1.0, 2.0, 3.0));
        shape.set_material(material);

        assert_eq!(object.as_shape().get_position(), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(object.as_shape().get_material(), &material);
    }
}
