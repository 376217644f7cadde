#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::many_single_char_names,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::similar_names,
    clippy::wildcard_imports
)]

mod core;
mod lights;
pub mod motion;
mod primitives;
mod ray_intersection;
mod render;
pub mod utils;

pub use crate::core::Material;
pub use crate::lights::PointLight;
pub use crate::motion::MotionOptions;
pub use crate::primitives::{Donut, Object3D, Planet, Shape, Sphere};
pub use crate::ray_intersection::Ray;
pub use crate::render::shading;
pub use crate::render::{
    Camera, Compositing, RaytracingCamera, RaytracingScene, RenderOptions, Scene,
};
