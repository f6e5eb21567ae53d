/// Default page contract and scene constants
use nalgebra::Point3;

/// Night-side earth texture with permissive CORS
pub const NIGHT_TEXTURE_URL: &str =
    "https://unpkg.com/three-globe@2.32.1/example/img/earth-night.jpg";

/// Settings for the rotating globe.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeConfig {
    pub canvas_id: String,
    pub texture_url: String,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub camera_position: Point3<f32>,
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    /// Radians added to the y rotation every frame
    pub rotation_step: f32,
    /// Initial x rotation of the mesh
    pub tilt: f32,
    /// Horizontal offset applied to the whole scene
    pub scene_offset_x: f32,
    pub base_color: u32,
    pub roughness: f32,
    pub metalness: f32,
    pub ambient_color: u32,
    pub ambient_intensity: f32,
    pub sun_color: u32,
    pub sun_intensity: f32,
    pub sun_position: Point3<f32>,
}

impl GlobeConfig {
    pub fn with_canvas_id(mut self, id: impl Into<String>) -> Self {
        self.canvas_id = id.into();
        self
    }

    pub fn with_texture_url(mut self, url: impl Into<String>) -> Self {
        self.texture_url = url.into();
        self
    }

    pub fn with_rotation_step(mut self, step: f32) -> Self {
        self.rotation_step = step;
        self
    }
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            canvas_id: "globe-canvas".to_string(),
            texture_url: NIGHT_TEXTURE_URL.to_string(),
            fov_degrees: 40.0,
            near: 0.1,
            far: 100.0,
            camera_position: Point3::new(0.0, 0.0, 3.2),
            radius: 1.0,
            width_segments: 64,
            height_segments: 64,
            rotation_step: 0.0009,
            tilt: 0.25,
            scene_offset_x: 0.35,
            base_color: 0x0e131a,
            roughness: 1.0,
            metalness: 0.0,
            ambient_color: 0xffffff,
            ambient_intensity: 0.65,
            sun_color: 0xffffff,
            sun_intensity: 0.6,
            sun_position: Point3::new(-2.0, 1.0, 2.0),
        }
    }
}

/// Element ids and selectors the menu looks up on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuConfig {
    pub overlay_id: String,
    pub trigger_id: String,
    pub closer_selector: String,
    pub focusable_selector: String,
}

impl MenuConfig {
    pub fn with_overlay_id(mut self, id: impl Into<String>) -> Self {
        self.overlay_id = id.into();
        self
    }

    pub fn with_trigger_id(mut self, id: impl Into<String>) -> Self {
        self.trigger_id = id.into();
        self
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            overlay_id: "site-menu".to_string(),
            trigger_id: "menu-toggle".to_string(),
            closer_selector: "[data-menu-close]".to_string(),
            focusable_selector: "a[href], button:not([disabled]), input:not([disabled]), \
                                 select:not([disabled]), textarea:not([disabled]), \
                                 [tabindex]:not([tabindex=\"-1\"])"
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_globe_config() {
        let config = GlobeConfig::default();
        assert_eq!(config.canvas_id, "globe-canvas");
        assert_eq!(config.texture_url, NIGHT_TEXTURE_URL);
        assert!((config.camera_position.z - 3.2).abs() < 1e-6);
        assert_eq!(config.width_segments, 64);
    }

    #[test]
    fn test_builders_override_fields() {
        let config = GlobeConfig::default()
            .with_canvas_id("hero")
            .with_texture_url("https://example.test/night.jpg")
            .with_rotation_step(0.5);
        assert_eq!(config.canvas_id, "hero");
        assert_eq!(config.texture_url, "https://example.test/night.jpg");
        assert_eq!(config.rotation_step, 0.5);

        let menu = MenuConfig::default().with_overlay_id("nav").with_trigger_id("burger");
        assert_eq!(menu.overlay_id, "nav");
        assert_eq!(menu.trigger_id, "burger");
    }
}
