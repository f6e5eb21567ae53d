/// The rotating globe controller and its host seams
use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};

use crate::config::GlobeConfig;
use crate::driver::FrameSink;
use crate::error::{GlobeError, TextureError};
use crate::geometry::Mesh;
use crate::projection::Viewport;
use crate::scene::{Scene, TextureId};
use crate::texture::{TextureLoader, TextureOutcome, TextureSlot};

/// Drawing surface bound to one canvas
pub trait RenderBackend {
    /// Decoded image type the host hands back from texture loads
    type Image;

    /// Current layout size of the canvas
    fn layout_size(&self) -> Viewport;

    /// Resize the drawing buffer
    fn set_size(&mut self, viewport: Viewport);

    fn upload_mesh(&mut self, mesh: &Mesh) -> Result<(), GlobeError>;

    /// Upload an sRGB-encoded color image
    fn upload_texture(&mut self, image: &Self::Image) -> Result<TextureId, GlobeError>;

    fn render(&mut self, scene: &Scene);
}

/// Page environment able to bind a backend to a canvas
pub trait GlobeHost {
    type Backend: RenderBackend;

    /// `Ok(None)` means the page has no such canvas
    fn attach(&mut self, canvas_id: &str) -> Result<Option<Self::Backend>, GlobeError>;
}

/// Result of trying to bring up the globe on a page
pub enum GlobeMount<B> {
    /// No canvas on this page; nothing to do
    NoCanvas,
    /// 3D is not possible here; the page's CSS fallback shows instead
    Unavailable(GlobeError),
    Available(GlobeRenderer<B>),
}

impl<B> GlobeMount<B> {
    pub fn is_available(&self) -> bool {
        matches!(self, GlobeMount::Available(_))
    }

    pub fn into_renderer(self) -> Option<GlobeRenderer<B>> {
        match self {
            GlobeMount::Available(renderer) => Some(renderer),
            _ => None,
        }
    }
}

/// Capability check: attach to the canvas and build the scene, or fall back
pub fn mount<H: GlobeHost>(host: &mut H, config: &GlobeConfig) -> GlobeMount<H::Backend> {
    let backend = match host.attach(&config.canvas_id) {
        Ok(Some(backend)) => backend,
        Ok(None) => {
            debug!("No #{} canvas on this page", config.canvas_id);
            return GlobeMount::NoCanvas;
        }
        Err(e) => {
            warn!("WebGL init failed; using CSS fallback: {}", e);
            return GlobeMount::Unavailable(e);
        }
    };

    match GlobeRenderer::new(backend, config) {
        Ok(renderer) => {
            info!("Globe mounted on #{}", config.canvas_id);
            GlobeMount::Available(renderer)
        }
        Err(e) => {
            warn!("WebGL init failed; using CSS fallback: {}", e);
            GlobeMount::Unavailable(e)
        }
    }
}

/// Owns the scene and drives one backend
pub struct GlobeRenderer<B> {
    backend: B,
    scene: Scene,
    rotation_step: f32,
    texture: TextureSlot,
}

impl<B: RenderBackend> GlobeRenderer<B> {
    /// Build the scene with its default material and size it to the canvas
    pub fn new(mut backend: B, config: &GlobeConfig) -> Result<Self, GlobeError> {
        let scene = Scene::new(config);
        backend.upload_mesh(&scene.mesh)?;

        let mut renderer = Self {
            backend,
            scene,
            rotation_step: config.rotation_step,
            texture: TextureSlot::Pending,
        };
        renderer.resize();
        Ok(renderer)
    }

    /// Re-read the canvas layout size into the drawing buffer and camera
    pub fn resize(&mut self) {
        let viewport = self.backend.layout_size();
        self.backend.set_size(viewport);
        self.scene.set_viewport(viewport);
    }

    /// Advance the spin by one step and redraw
    pub fn tick(&mut self) {
        self.scene.rotation.spin_y(self.rotation_step);
        self.backend.render(&self.scene);
    }

    /// Apply the outcome of the texture request.
    ///
    /// Only the first result counts. A failed load or upload leaves the
    /// default material in place for good.
    pub fn apply_texture(&mut self, result: Result<B::Image, TextureError>) -> TextureOutcome {
        if !self.texture.is_pending() {
            debug!("Texture result arrived after the slot settled; ignoring");
            return TextureOutcome::Ignored;
        }

        let uploaded = result.and_then(|image| {
            self.backend.upload_texture(&image).map_err(TextureError::from)
        });

        match uploaded {
            Ok(id) => {
                let textured = self.scene.material.with_map(id);
                self.scene.set_material(textured);
                self.texture.settle(TextureSlot::Applied(id));
                debug!("Night texture applied");
                TextureOutcome::Applied(id)
            }
            Err(e) => {
                self.texture.settle(TextureSlot::Failed);
                debug!("Keeping default globe material: {}", e);
                TextureOutcome::KeptDefault
            }
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn texture_state(&self) -> TextureSlot {
        self.texture
    }
}

impl<B: RenderBackend> FrameSink for GlobeRenderer<B> {
    fn on_frame(&mut self, _timestamp_ms: f64) {
        self.tick();
    }
}

/// Issue the single texture request and route its result into `globe`
pub fn request_texture<B, L>(globe: &Rc<RefCell<GlobeRenderer<B>>>, loader: &L, url: &str)
where
    B: RenderBackend + 'static,
    L: TextureLoader<Image = B::Image>,
{
    let target = Rc::downgrade(globe);
    loader.load(
        url,
        Box::new(move |result: Result<B::Image, TextureError>| {
            if let Some(globe) = target.upgrade() {
                globe.borrow_mut().apply_texture(result);
            }
        }),
    );
}
