use super::Camera;
use crate::ray_intersection::Ray;
use crate::utils;
use nalgebra::{Matrix4, Point3, Vector3};

#[derive(Debug)]
pub struct RaytracingCamera {
    fov: f64,
    width: u32,
    height: u32,
    position: Point3<f64>,
    camera_to_world: Matrix4<f64>,
}

impl RaytracingCamera {
    pub fn new(camera: &Camera, width: u32, height: u32) -> Self {
        let camera_to_world =
            Matrix4::look_at_rh(&camera.position, &camera.target, &camera.up).transpose();

        Self {
            fov: camera.fov,
            width,
            height,
            position: camera.position,
            camera_to_world,
        }
    }

    pub fn get_width(&self) -> u32 {
        self.width
    }

    pub fn get_height(&self) -> u32 {
        self.height
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    pub fn set_height(&mut self, height: u32) {
        self.height = height;
    }

    /// Builds the ray going from the camera through the center of pixel `(x, y)`.
    pub fn shoot_ray(&self, x: u32, y: u32, max_distance: f64) -> Ray {
        debug_assert!(x < self.width && y < self.height);

        let (width, height) = (f64::from(self.width), f64::from(self.height));
        let aspect = width / height;
        let fov = (self.fov.to_radians() / 2.0).tan();

        let (x, y) = (
            utils::remap_value(f64::from(x) + 0.5, (0.0, width), (-1.0, 1.0)),
            utils::remap_value(f64::from(y) + 0.5, (0.0, height), (1.0, -1.0)),
        );

        // Apply fov and scale to aspect ratio
        let (x, y) = if width < height {
            (x * aspect, y)
        } else {
            (x, y / aspect)
        };
        let (x, y) = (x * fov, y * fov);

        let direction = Vector3::from([x, y, -1.0]).normalize();
        let direction = (self.camera_to_world * direction.to_homogeneous()).xyz();

        Ray::new(self.position, direction).with_max_distance(max_distance)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use more_asserts::{assert_gt, assert_lt};

    fn camera() -> Camera {
        Camera {
            fov: 90.0,
            position: Point3::origin(),
            target: Point3::new(0.0, 0.0, 1.0),
            up: Vector3::y_axis(),
        }
    }

    #[test]
    fn it_looks_at_the_target_through_the_center_pixel() {
        let camera = RaytracingCamera::new(&camera(), 3, 3);
        let ray = camera.shoot_ray(1, 1, 1000.0);

        assert_eq!(ray.origin, Point3::origin());
        assert_eq!(ray.max_distance, 1000.0);
        assert_lt!((ray.direction - Vector3::z()).norm(), 1e-12);
    }

    #[test]
    fn it_shoots_unit_rays_across_the_screen() {
        let camera = RaytracingCamera::new(&camera(), 4, 2);
        for (x, y) in [(0, 0), (3, 0), (0, 1), (3, 1)] {
            let ray = camera.shoot_ray(x, y, 10.0);
            assert_lt!((ray.direction.norm() - 1.0).abs(), 1e-12);
            assert_gt!(ray.direction.z, 0.0);
        }
    }

    #[test]
    fn it_maps_screen_corners_to_directions() {
        let camera = RaytracingCamera::new(&camera(), 2, 2);

        let top_left = camera.shoot_ray(0, 0, 10.0).direction;
        assert_gt!(top_left.y, 0.0);
        let bottom_right = camera.shoot_ray(1, 1, 10.0).direction;
        assert_lt!(bottom_right.y, 0.0);
        assert_lt!((top_left.x + bottom_right.x).abs(), 1e-12);
    }

    #[test]
    fn it_follows_resizes() {
        let mut camera = RaytracingCamera::new(&camera(), 2, 2);
        let before = camera.shoot_ray(0, 0, 10.0).direction;

        camera.set_width(4);
        camera.set_height(4);
        assert_eq!(camera.get_width(), 4);
        assert_eq!(camera.get_height(), 4);

        let after = camera.shoot_ray(0, 0, 10.0).direction;
        assert_gt!((before - after).norm(), 1e-3);
    }
}
