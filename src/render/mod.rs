mod camera;
mod raytracing_scene;
mod scene;
pub mod shading;

use anyhow::ensure;
use nalgebra::{Point3, Unit, Vector3};
use serde::Deserialize;

pub use camera::RaytracingCamera;
pub use raytracing_scene::RaytracingScene;
pub use scene::Scene;

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Camera {
    pub fov: f64,
    pub position: Point3<f64>,
    pub target: Point3<f64>,
    pub up: Unit<Vector3<f64>>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov: 90.0,
            position: Point3::origin(),
            target: Point3::from([0.5, 0.0, 1.0]),
            up: Vector3::y_axis(),
        }
    }
}

impl Camera {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.fov > 0.0 && self.fov < 180.0,
            "camera fov must be between 0 and 180 degrees, got {}",
            self.fov
        );
        ensure!(
            self.position != self.target,
            "camera position and target must differ"
        );
        ensure!(
            (self.target - self.position)
                .normalize()
                .cross(&self.up.into_inner())
                .norm()
                > 1e-9,
            "camera up vector must not be parallel to the view direction"
        );

        Ok(())
    }
}

/// How the colors of several shapes hit by the same ray end up in the pixel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compositing {
    /// Only the closest shape along the ray is shaded
    Nearest,
    /// Every shape hit by the ray adds its shading, occluded or not
    Additive,
}

impl Default for Compositing {
    fn default() -> Self {
        Compositing::Nearest
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub max_distance: f64,
    pub compositing: Compositing,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            max_distance: 1000.0,
            compositing: Compositing::default(),
        }
    }
}

impl RenderOptions {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "image size must be positive, got {}x{}",
            self.width,
            self.height
        );
        ensure!(
            self.max_distance > 0.0,
            "max distance must be positive, got {}",
            self.max_distance
        );

        Ok(())
    }
}
