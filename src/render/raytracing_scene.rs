use super::shading;
use super::{Camera, Compositing, RaytracingCamera, RenderOptions};
use crate::lights::PointLight;
use crate::motion::{self, MotionOptions};
use crate::primitives::{Object3D, Shape};
use crate::ray_intersection::Ray;
use crate::utils;
use anyhow::Context;
use image::{Rgba, RgbaImage};
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use log::{debug, info};
use minifb::{Key, Window, WindowOptions};
use nalgebra::Vector3;
use num_traits::identities::Zero;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct RaytracingScene {
    pub render_options: RenderOptions,
    camera: RaytracingCamera,
    lights: Vec<PointLight>,
    objects: Vec<Object3D>,
    motion: MotionOptions,
}

impl RaytracingScene {
    pub fn new(
        render_options: RenderOptions,
        camera: &Camera,
        lights: Vec<PointLight>,
        objects: Vec<Object3D>,
        motion: MotionOptions,
    ) -> Self {
        let camera = RaytracingCamera::new(camera, render_options.width, render_options.height);

        Self {
            render_options,
            camera,
            lights,
            objects,
            motion,
        }
    }

    pub fn get_width(&self) -> u32 {
        self.render_options.width
    }

    pub fn get_height(&self) -> u32 {
        self.render_options.height
    }

    pub fn get_num_objects(&self) -> usize {
        self.objects.len()
    }

    pub fn shapes(&self) -> impl Iterator<Item = &dyn Shape> {
        self.objects.iter().map(Object3D::as_shape)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.render_options.width = width;
        self.render_options.height = height;
        self.camera.set_width(width);
        self.camera.set_height(height);
    }

    /// Advances the planets by one motion step.
    pub fn step_motion(&mut self) {
        motion::step(&mut self.objects, &self.motion);
    }

    /// Sum of every light's contribution at the hit `t` on `shape`.
    fn shade(&self, shape: &dyn Shape, ray: &Ray, t: f64) -> Vector3<f64> {
        let hit_point = ray.at(t);
        let normal = match shape.normal_at(&hit_point) {
            Some(normal) => normal,
            None => return Vector3::zero(),
        };

        let material = shape.get_material();
        self.lights.iter().fold(Vector3::zero(), |color, light| {
            color + shading::light_contribution(material, &hit_point, &normal, light, &ray.origin)
        })
    }

    pub fn get_color(&self, ray: &Ray) -> Vector3<f64> {
        let hits = self
            .shapes()
            .filter_map(|shape| shape.intersect(ray).map(|t| (shape, t)));

        let color = match self.render_options.compositing {
            Compositing::Nearest => hits
                .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
                .map_or_else(Vector3::zero, |(shape, t)| self.shade(shape, ray, t)),
            Compositing::Additive => hits.fold(Vector3::zero(), |color, (shape, t)| {
                color + self.shade(shape, ray, t)
            }),
        };

        utils::clamp_color(color)
    }

    pub fn screen_raycast(&self, x: u32, y: u32) -> Vector3<f64> {
        let ray = self
            .camera
            .shoot_ray(x, y, self.render_options.max_distance);
        self.get_color(&ray)
    }

    fn render_row(&self, y: usize, row: &mut [u32]) {
        for (x, pixel) in row.iter_mut().enumerate() {
            *pixel = utils::to_argb_u32(self.screen_raycast(x as u32, y as u32));
        }
    }

    /// Renders one frame into a row-major ARGB buffer of `width * height` pixels.
    ///
    /// # Panics
    ///
    /// Will panic if the buffer size does not match the render size
    pub fn render_frame(&self, buffer: &mut [u32]) {
        let width = self.get_width() as usize;
        let height = self.get_height() as usize;
        assert_eq!(buffer.len(), width * height, "buffer does not match render size");

        buffer
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| self.render_row(y, row));
    }

    fn build_progress_bar(&self) -> ProgressBar {
        let height = self.get_height();

        let progress = ProgressBar::new(height.into());
        progress.set_draw_delta((height / 100).max(1).into());
        progress.set_style(ProgressStyle::default_bar().template(
            "[{elapsed_precise} elapsed] [{eta_precise} left] {bar:40} {pos}/{len} rows",
        ));

        progress
    }

    pub fn raytrace_to_image(&self, use_progress: bool) -> (RgbaImage, Duration) {
        let width = self.get_width() as usize;
        let height = self.get_height() as usize;
        let mut buffer = vec![0; width * height];

        let start = Instant::now();
        let rows = buffer.par_chunks_mut(width).enumerate();
        if use_progress {
            let progress = self.build_progress_bar();
            rows.progress_with(progress.clone())
                .for_each(|(y, row)| self.render_row(y, row));
            progress.finish();
        } else {
            rows.for_each(|(y, row)| self.render_row(y, row));
        }
        let duration = start.elapsed();

        let image = RgbaImage::from_fn(self.get_width(), self.get_height(), |x, y| {
            Rgba(utils::from_argb_u32(buffer[y as usize * width + x as usize]))
        });

        (image, duration)
    }

    /// Opens a resizable window and animates the scene until it is closed or
    /// escape is pressed. Every frame advances the motion step, then renders.
    pub fn raytrace_to_window(mut self) -> anyhow::Result<()> {
        let mut width = self.get_width() as usize;
        let mut height = self.get_height() as usize;

        let mut window = Window::new(
            "implicit-raytrace - press escape to exit",
            width,
            height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )
        .context("failed to open window")?;
        window.limit_update_rate(Some(Duration::from_micros(16600)));

        let mut buffer: Vec<u32> = vec![0; width * height];
        let mut frames: u64 = 0;
        let start = Instant::now();

        while window.is_open() && !window.is_key_down(Key::Escape) {
            let (new_width, new_height) = window.get_size();
            if new_width > 0 && new_height > 0 && (new_width, new_height) != (width, height) {
                debug!("resizing to {}x{}", new_width, new_height);
                width = new_width;
                height = new_height;
                self.resize(width as u32, height as u32);
                buffer.resize(width * height, 0);
            }

            self.step_motion();
            self.render_frame(&mut buffer);
            window
                .update_with_buffer(&buffer, width, height)
                .context("failed to present frame")?;
            frames += 1;
        }

        let elapsed = start.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            info!(
                "rendered {} frames in {:.2}s ({:.1} fps)",
                frames,
                elapsed,
                frames as f64 / elapsed
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::Material;
    use crate::primitives::{Planet, Sphere};
    use crate::render::Scene;
    use more_asserts::assert_lt;
    use nalgebra::Point3;

    fn scene(width: u32, height: u32, compositing: Compositing) -> Scene {
        let camera = Camera {
            target: Point3::new(0.0, 0.0, 1.0),
            ..Camera::default()
        };

        Scene::new(
            RenderOptions {
                width,
                height,
                compositing,
                ..RenderOptions::default()
            },
            camera,
        )
    }

    fn flat(color: [f64; 3]) -> Material {
        Material::new(0.5, 0.0, 0.0, 1.0, Vector3::from(color))
    }

    fn two_spheres(compositing: Compositing) -> RaytracingScene {
        let mut scene = scene(1, 1, compositing);
        scene.add_light(PointLight::new(
            Point3::origin(),
            4.0,
            Vector3::from([1.0; 3]),
        ));
        scene.add_object(Sphere::new(1.0, Point3::new(0.0, 0.0, 6.0), flat([0.0, 1.0, 0.0])).into());
        scene.add_object(Sphere::new(1.0, Point3::new(0.0, 0.0, 3.0), flat([1.0, 0.0, 0.0])).into());

        scene.build_raytracing_scene()
    }

    #[test]
    fn it_shades_the_nearest_shape() {
        let scene = two_spheres(Compositing::Nearest);
        let color = scene.screen_raycast(0, 0);

        assert_lt!((color - Vector3::from([0.5, 0.0, 0.0])).norm(), 1e-9);
    }

    #[test]
    fn it_adds_every_shape_hit() {
        let scene = two_spheres(Compositing::Additive);
        let color = scene.screen_raycast(0, 0);

        assert_lt!((color - Vector3::from([0.5, 0.08, 0.0])).norm(), 1e-9);
    }

    #[test]
    fn it_stops_at_the_max_distance() {
        let mut scene = scene(1, 1, Compositing::Nearest);
        scene.render_options.max_distance = 1.5;
        scene.add_light(PointLight::default());
        scene.add_object(Sphere::new(1.0, Point3::new(0.0, 0.0, 3.0), flat([1.0; 3])).into());
        let scene = scene.build_raytracing_scene();

        assert_eq!(scene.screen_raycast(0, 0), Vector3::zero());
    }

    #[test]
    fn it_clamps_pixel_colors() {
        let mut scene = scene(1, 1, Compositing::Additive);
        for _ in 0..3 {
            scene.add_light(PointLight::new(
                Point3::origin(),
                100.0,
                Vector3::from([1.0; 3]),
            ));
        }
        scene.add_object(Sphere::new(1.0, Point3::new(0.0, 0.0, 3.0), flat([1.0; 3])).into());
        let scene = scene.build_raytracing_scene();

        assert_eq!(scene.screen_raycast(0, 0), Vector3::from([1.0; 3]));
    }

    #[test]
    fn it_renders_an_empty_scene_black() {
        let scene = scene(4, 3, Compositing::Nearest).build_raytracing_scene();
        let mut buffer = vec![0; 12];
        scene.render_frame(&mut buffer);

        assert!(buffer.iter().all(|&pixel| pixel == 0xFF00_0000));
    }

    #[test]
    fn it_writes_hits_into_the_frame_buffer() {
        let scene = two_spheres(Compositing::Nearest);
        let mut buffer = vec![0; 1];
        scene.render_frame(&mut buffer);

        assert_eq!(buffer[0], utils::to_argb_u32(Vector3::from([0.5, 0.0, 0.0])));
    }

    #[test]
    #[should_panic]
    fn it_rejects_mismatched_buffers() {
        let scene = scene(4, 3, Compositing::Nearest).build_raytracing_scene();
        let mut buffer = vec![0; 4];
        scene.render_frame(&mut buffer);
    }

    #[test]
    fn it_resizes_the_render() {
        let mut scene = scene(4, 3, Compositing::Nearest).build_raytracing_scene();
        scene.resize(8, 2);
        assert_eq!(scene.get_width(), 8);
        assert_eq!(scene.get_height(), 2);

        let mut buffer = vec![0; 16];
        scene.render_frame(&mut buffer);
    }

    #[test]
    fn it_moves_planets_between_frames() {
        let mut scene = scene(1, 1, Compositing::Nearest);
        scene.add_object(Planet::new(1.0, Point3::new(0.0, 0.0, 3.0), Material::default(), 200.0).into());
        scene.add_object(Planet::new(1.0, Point3::new(2.0, 0.0, 3.0), Material::default(), 1000.0).into());
        let mut scene = scene.build_raytracing_scene();

        scene.step_motion();
        let positions: Vec<Point3<f64>> = scene.shapes().map(|shape| shape.get_position()).collect();
        assert_lt!(0.0, positions[0].x);
        assert_lt!(positions[1].x, 2.0);
    }

    #[test]
    fn it_raytraces_to_an_image() {
        let scene = two_spheres(Compositing::Nearest);
        let (image, _) = scene.raytrace_to_image(false);

        assert_eq!(image.dimensions(), (1, 1));
        assert_eq!(image.get_pixel(0, 0).0, [127, 0, 0, 255]);
    }
}
