use anyhow::ensure;
use nalgebra::{Point3, Vector3};
use serde::Deserialize;

#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PointLight {
    position: Point3<f64>,
    intensity: f64,
    color: Vector3<f64>,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            position: Point3::origin(),
            intensity: 10.0,
            color: Vector3::from([1.0; 3]),
        }
    }
}

impl PointLight {
    pub fn new(position: Point3<f64>, intensity: f64, color: Vector3<f64>) -> Self {
        Self {
            position,
            intensity,
            color,
        }
    }

    pub fn get_position(&self) -> Point3<f64> {
        self.position
    }

    pub fn get_color(&self) -> Vector3<f64> {
        self.color
    }

    /// Light intensity reaching `point`, falling off with the squared distance.
    pub fn inverse_square_law(&self, point: &Point3<f64>) -> f64 {
        self.intensity / nalgebra::distance_squared(&self.position, point)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.intensity > 0.0,
            "light intensity must be positive, got {}",
            self.intensity
        );

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn it_attenuates_with_the_squared_distance() {
        let light = PointLight::new(Point3::origin(), 8.0, Vector3::from([1.0; 3]));

        assert_eq!(light.inverse_square_law(&Point3::new(1.0, 0.0, 0.0)), 8.0);
        assert_eq!(light.inverse_square_law(&Point3::new(0.0, 2.0, 0.0)), 2.0);
        assert_eq!(light.inverse_square_law(&Point3::new(0.0, 0.0, -4.0)), 0.5);
    }

    #[test]
    fn it_deserializes_lights() {
        let light: PointLight = serde_json::from_value(json!({
            "position": [-3, 0, 0],
            "intensity": 5,
            "color": [1, 0, 0]
        }))
        .unwrap();

        assert_eq!(
            light,
            PointLight::new(Point3::new(-3.0, 0.0, 0.0), 5.0, Vector3::from([1.0, 0.0, 0.0]))
        );
        assert!(light.validate().is_ok());
    }

    #[test]
    fn it_rejects_dark_lights() {
        let light: PointLight = serde_json::from_value(json!({ "intensity": 0 })).unwrap();
        assert!(light.validate().is_err());
    }
}
