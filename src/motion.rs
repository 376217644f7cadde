//! Newtonian gravity between planets, stepped once per frame before rendering.

use crate::primitives::{Object3D, Planet, Shape};
use anyhow::ensure;
use itertools::Itertools;
use nalgebra::Vector3;
use num_traits::identities::Zero;
use serde::Deserialize;

const MIN_DISTANCE_SQUARED: f64 = 1e-18;

#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionOptions {
    pub gravitational_constant: f64,
    pub time_step: f64,
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self {
            gravitational_constant: 6.674_30e-6,
            time_step: 1.0,
        }
    }
}

impl MotionOptions {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.gravitational_constant >= 0.0,
            "gravitational constant must not be negative, got {}",
            self.gravitational_constant
        );
        ensure!(
            self.time_step > 0.0,
            "time step must be positive, got {}",
            self.time_step
        );

        Ok(())
    }
}

/// Accelerates every planet toward every other one, then moves them.
///
/// Accelerations only depend on the positions at the start of the step, so the
/// order of `objects` does not matter. Other shapes are left untouched.
pub fn step(objects: &mut [Object3D], options: &MotionOptions) {
    let mut planets: Vec<&mut Planet> = objects
        .iter_mut()
        .filter_map(|object| match object {
            Object3D::Planet(planet) => Some(planet.as_mut()),
            _ => None,
        })
        .collect();

    let mut accelerations = vec![Vector3::zero(); planets.len()];
    for (i, j) in (0..planets.len()).tuple_combinations() {
        let offset = planets[j].get_position() - planets[i].get_position();
        let distance_squared = offset.magnitude_squared();
        if distance_squared < MIN_DISTANCE_SQUARED {
            continue;
        }

        let direction = offset / distance_squared.sqrt();
        let pull = options.gravitational_constant / distance_squared;
        accelerations[i] += direction * pull * planets[j].get_mass();
        accelerations[j] -= direction * pull * planets[i].get_mass();
    }

    let dt = options.time_step;
    for (planet, acceleration) in planets.iter_mut().zip(accelerations) {
        planet.velocity += acceleration * dt;
        let position = planet.get_position() + planet.velocity * dt;
        planet.set_position(position);
    }
}
