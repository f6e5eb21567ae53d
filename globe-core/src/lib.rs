/// Globe Core Library - host-independent logic for the night globe widget
///
/// This library holds everything that does not touch a browser: the sphere
/// geometry, camera and transforms, the scene model, the globe controller
/// with its texture slot and frame driver seam, and the overlay menu state
/// machine with its wiring guard. Hosts plug in through the `RenderBackend`,
/// `GlobeHost`, `TextureLoader`, `FrameDriver` and `MenuDom` traits.

pub mod config;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod globe;
pub mod menu;
pub mod projection;
pub mod scene;
pub mod texture;
pub mod transform;
pub mod wiring;

// Re-export commonly used types
pub use config::{GlobeConfig, MenuConfig};
pub use driver::{FrameDriver, FrameSink, ManualDriver};
pub use error::{GlobeError, TextureError};
pub use geometry::{Mesh, Vertex};
pub use globe::{mount, request_texture, GlobeHost, GlobeMount, GlobeRenderer, RenderBackend};
pub use menu::{Key, KeyOutcome, KeyPress, MenuController, MenuDom, MenuState};
pub use projection::{aspect_ratio, Camera, Viewport};
pub use scene::{Color, Scene, ShadingLights, StandardMaterial, Surface, TextureId};
pub use texture::{TextureCallback, TextureLoader, TextureOutcome, TextureSlot};
pub use transform::{RotationState, Transform};
pub use wiring::{Phase, WireOnce, WireState};
