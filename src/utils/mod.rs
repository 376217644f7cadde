mod polynomial;
mod rays;

use nalgebra::Vector3;
use num_traits::Float;

pub use polynomial::{
    quadratic, solve_cubic, solve_linear, solve_quadratic, solve_quartic, Roots,
};
pub use rays::{mirror, reflect};

const ALPHA_BIT_MASK: u32 = 255 << 24;

/// Packs a color with channels in `[0, 1]` as `0xAARRGGBB` with full alpha.
pub fn to_argb_u32(rgb: Vector3<f64>) -> u32 {
    let rgb = clamp_color(rgb);
    let r = (rgb.x * 255.0) as u32;
    let g = (rgb.y * 255.0) as u32;
    let b = (rgb.z * 255.0) as u32;
    ALPHA_BIT_MASK | r << 16 | g << 8 | b
}

pub fn from_argb_u32(argb: u32) -> [u8; 4] {
    let [a, r, g, b] = argb.to_be_bytes();
    [r, g, b, a]
}

pub fn clamp_color(color: Vector3<f64>) -> Vector3<f64> {
    color.map(|c| c.clamp(0.0, 1.0))
}

pub fn remap_value<F: Float>(num: F, domain: (F, F), range: (F, F)) -> F {
    assert!(domain.0 < domain.1, "domain values must be of the form (min, max) - range values can be swapped for this behavior");

    (num - domain.0) * (range.1 - range.0) / (domain.1 - domain.0) + range.0
}
