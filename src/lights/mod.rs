mod point;

pub use point::PointLight;
