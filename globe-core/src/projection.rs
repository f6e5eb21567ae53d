/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

use crate::config::GlobeConfig;

/// Layout size of the canvas in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Width over height, or 1 when either side is zero
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        return 1.0;
    }
    width as f32 / height as f32
}

/// Perspective camera looking at the globe
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn globe(config: &GlobeConfig) -> Self {
        Self {
            position: config.camera_position,
            target: Point3::origin(),
            up: Vector3::y(),
            fov: config.fov_degrees.to_radians(),
            aspect: 1.0,
            near: config.near,
            far: config.far,
        }
    }

    /// Match the aspect ratio to the canvas layout size
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = aspect_ratio(viewport.width, viewport.height);
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::globe(&GlobeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::default();
        assert!((camera.fov - 40f32.to_radians()).abs() < 1e-6);
        assert!((camera.position.z - 3.2).abs() < 1e-6);
        assert_eq!(camera.aspect, 1.0);
    }

    #[test]
    fn test_aspect_follows_viewport() {
        let mut camera = Camera::default();
        camera.set_viewport(Viewport::new(800, 600));
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_sized_viewport_defaults_aspect() {
        assert_eq!(aspect_ratio(640, 0), 1.0);
        assert_eq!(aspect_ratio(0, 480), 1.0);
        assert_eq!(aspect_ratio(0, 0), 1.0);
    }

    #[test]
    fn test_origin_projects_to_center() {
        let mut camera = Camera::default();
        camera.set_viewport(Viewport::new(1024, 512));
        let clip = camera.view_projection().transform_point(&Point3::origin());
        assert!(clip.x.abs() < 1e-6);
        assert!(clip.y.abs() < 1e-6);
        assert!(clip.z > -1.0 && clip.z < 1.0);
    }
}
