/// Scene description handed to render backends each frame
use nalgebra::{Matrix4, Point3, Vector3};
use std::f32::consts::FRAC_1_PI;

use crate::config::GlobeConfig;
use crate::geometry::Mesh;
use crate::projection::{Camera, Viewport};
use crate::transform::{RotationState, Transform};

/// Linear RGB color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Decode a `0xRRGGBB` sRGB hex value into linear space
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Handle to a texture owned by a render backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Where the globe's albedo comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Surface {
    Flat(Color),
    Textured(TextureId),
}

/// Physically based surface description
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardMaterial {
    pub surface: Surface,
    pub roughness: f32,
    pub metalness: f32,
}

impl StandardMaterial {
    pub fn flat(color: Color, roughness: f32, metalness: f32) -> Self {
        Self {
            surface: Surface::Flat(color),
            roughness,
            metalness,
        }
    }

    /// Same finish, albedo taken from a texture
    pub fn with_map(&self, texture: TextureId) -> Self {
        Self {
            surface: Surface::Textured(texture),
            ..*self
        }
    }

    pub fn is_textured(&self) -> bool {
        matches!(self.surface, Surface::Textured(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

/// Light placed at `position` inside the scene, aimed at the world origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Point3<f32>,
}

/// Light terms for a Lambert shader, with the 1/π diffuse BRDF folded in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingLights {
    pub ambient: Color,
    pub sun: Color,
    /// Unit vector from the surface towards the sun
    pub sun_direction: Vector3<f32>,
}

/// The globe scene: one mesh, two lights, one camera
#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: Camera,
    pub mesh: Mesh,
    pub material: StandardMaterial,
    pub rotation: RotationState,
    pub offset: Vector3<f32>,
    pub ambient: AmbientLight,
    pub sun: DirectionalLight,
}

impl Scene {
    pub fn new(config: &GlobeConfig) -> Self {
        Self {
            camera: Camera::globe(config),
            mesh: Mesh::sphere(config.radius, config.width_segments, config.height_segments),
            material: StandardMaterial::flat(
                Color::from_hex(config.base_color),
                config.roughness,
                config.metalness,
            ),
            rotation: RotationState::new(config.tilt, 0.0, 0.0),
            offset: Vector3::new(config.scene_offset_x, 0.0, 0.0),
            ambient: AmbientLight {
                color: Color::from_hex(config.ambient_color),
                intensity: config.ambient_intensity,
            },
            sun: DirectionalLight {
                color: Color::from_hex(config.sun_color),
                intensity: config.sun_intensity,
                position: config.sun_position,
            },
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.camera.set_viewport(viewport);
    }

    pub fn set_material(&mut self, material: StandardMaterial) {
        self.material = material;
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        Transform::model_matrix(&self.offset, &self.rotation)
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.camera.view_projection()
    }

    /// The sun moves with the scene offset while its target stays at the
    /// world origin, so the offset tilts the light direction.
    pub fn shading_lights(&self) -> ShadingLights {
        let sun_world = self.sun.position.coords + self.offset;
        ShadingLights {
            ambient: self.ambient.color.scaled(self.ambient.intensity * FRAC_1_PI),
            sun: self.sun.color.scaled(self.sun.intensity * FRAC_1_PI),
            sun_direction: sun_world.normalize(),
        }
    }
}
