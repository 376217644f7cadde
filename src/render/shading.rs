//! Phong shading of a single hit point by a single point light.

use crate::core::Material;
use crate::lights::PointLight;
use crate::utils;
use nalgebra::{Point3, Unit, Vector3};

/// Scalar light intensity in `[0, 1]` received at `hit_point` from `light`.
///
/// Combines ambient, diffuse and specular terms of `material` and attenuates the
/// sum with the inverse square law. A light on the far side of the surface gives
/// exactly zero, ambient term included.
pub fn light_intensity(
    material: &Material,
    hit_point: &Point3<f64>,
    normal: &Unit<Vector3<f64>>,
    light: &PointLight,
    viewer: &Point3<f64>,
) -> f64 {
    let light_dir = match Unit::try_new(light.get_position() - hit_point, 0.0) {
        Some(light_dir) => light_dir,
        None => return 0.0,
    };

    let angle = normal.dot(&light_dir.into_inner());
    if angle < 0.0 {
        return 0.0;
    }

    let specular = Unit::try_new(viewer - hit_point, 0.0).map_or(0.0, |view_dir| {
        let reflection = utils::mirror(&light_dir, normal);
        reflection.dot(&view_dir.into_inner()).max(0.0).powf(material.shininess)
    });

    let intensity =
        material.ambient + material.diffuse * angle + material.specular * specular;

    (intensity * light.inverse_square_law(hit_point)).min(1.0)
}

/// Color added to the pixel by `light`: the material color filtered by the light
/// color, scaled by [`light_intensity`].
pub fn light_contribution(
    material: &Material,
    hit_point: &Point3<f64>,
    normal: &Unit<Vector3<f64>>,
    light: &PointLight,
    viewer: &Point3<f64>,
) -> Vector3<f64> {
    let intensity = light_intensity(material, hit_point, normal, light, viewer);
    material.color.component_mul(&light.get_color()) * intensity
}
