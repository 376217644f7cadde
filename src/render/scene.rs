use super::raytracing_scene::RaytracingScene;
use super::{Camera, Compositing, RenderOptions};
use crate::lights::PointLight;
use crate::motion::MotionOptions;
use crate::primitives::Object3D;
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Everything needed to render: image settings, camera, lights, shapes and
/// the parameters of the motion step.
#[derive(Debug, Default, Deserialize)]
#[serde(from = "SceneFile")]
pub struct Scene {
    pub render_options: RenderOptions,
    pub motion: MotionOptions,
    camera: Camera,
    lights: Vec<PointLight>,
    objects: Vec<Object3D>,
}

/// On-disk layout of a scene: render options sit at the top level.
#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SceneFile {
    width: u32,
    height: u32,
    max_distance: f64,
    compositing: Compositing,
    motion: MotionOptions,
    camera: Camera,
    lights: Vec<PointLight>,
    objects: Vec<Object3D>,
}

impl Default for SceneFile {
    fn default() -> Self {
        let render_options = RenderOptions::default();

        Self {
            width: render_options.width,
            height: render_options.height,
            max_distance: render_options.max_distance,
            compositing: render_options.compositing,
            motion: MotionOptions::default(),
            camera: Camera::default(),
            lights: Vec::new(),
            objects: Vec::new(),
        }
    }
}

impl From<SceneFile> for Scene {
    fn from(file: SceneFile) -> Self {
        Self {
            render_options: RenderOptions {
                width: file.width,
                height: file.height,
                max_distance: file.max_distance,
                compositing: file.compositing,
            },
            motion: file.motion,
            camera: file.camera,
            lights: file.lights,
            objects: file.objects,
        }
    }
}

impl Scene {
    pub fn new(render_options: RenderOptions, camera: Camera) -> Self {
        Self {
            render_options,
            camera,
            ..Scene::default()
        }
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scene file {}", path.display()))?;
        let scene = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse scene file {}", path.display()))?;

        Ok(scene)
    }

    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn add_object(&mut self, object: Object3D) {
        self.objects.push(object);
    }

    pub fn get_num_lights(&self) -> usize {
        self.lights.len()
    }

    pub fn get_num_objects(&self) -> usize {
        self.objects.len()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.render_options.validate()?;
        self.camera.validate()?;
        self.motion.validate().context("invalid motion options")?;

        for (index, light) in self.lights.iter().enumerate() {
            light
                .validate()
                .with_context(|| format!("invalid light at index {}", index))?;
        }
        for (index, object) in self.objects.iter().enumerate() {
            object
                .validate()
                .with_context(|| format!("invalid object at index {}", index))?;
        }

        Ok(())
    }

    pub fn build_raytracing_scene(self) -> RaytracingScene {
        RaytracingScene::new(
            self.render_options,
            &self.camera,
            self.lights,
            self.objects,
            self.motion,
        )
    }
}
