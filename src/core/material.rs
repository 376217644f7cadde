use anyhow::ensure;
use nalgebra::Vector3;
use serde::Deserialize;

#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Material {
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,
    pub color: Vector3<f64>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: 0.1,
            diffuse: 0.7,
            specular: 0.2,
            shininess: 30.0,
            color: Vector3::from([1.0; 3]),
        }
    }
}

impl Material {
    pub fn new(
        ambient: f64,
        diffuse: f64,
        specular: f64,
        shininess: f64,
        color: Vector3<f64>,
    ) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
            color,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.ambient >= 0.0 && self.diffuse >= 0.0 && self.specular >= 0.0,
            "material coefficients must not be negative: {:?}",
            self
        );
        ensure!(
            self.shininess > 0.0,
            "material shininess must be positive, got {}",
            self.shininess
        );

        Ok(())
    }
}
