/// Brings the globe up on a page
use std::cell::RefCell;
use std::rc::Rc;

use globe_core::{
    mount, request_texture, FrameDriver, GlobeConfig, GlobeError, GlobeHost, GlobeRenderer,
};
use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlCanvasElement, Window};

use crate::driver::AnimationFrameLoop;
use crate::gl::WebGlBackend;
use crate::loader::ImageLoader;

type WebGlobe = Rc<RefCell<GlobeRenderer<WebGlBackend>>>;

/// Finds the canvas in a document and binds WebGL2 to it
pub struct PageHost {
    document: Document,
}

impl PageHost {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl GlobeHost for PageHost {
    type Backend = WebGlBackend;

    fn attach(&mut self, canvas_id: &str) -> Result<Option<WebGlBackend>, GlobeError> {
        let Some(element) = self.document.get_element_by_id(canvas_id) else {
            return Ok(None);
        };
        let canvas = element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| GlobeError::Dom(format!("#{} is not a canvas", canvas_id)))?;
        WebGlBackend::new(canvas).map(Some)
    }
}

/// Mount the globe, then start resizing, texture loading and the frame loop.
///
/// Every failure here ends in a console warning and a static page.
pub fn start(window: &Window, document: &Document, config: &GlobeConfig) {
    let mut host = PageHost::new(document.clone());
    let Some(renderer) = mount(&mut host, config).into_renderer() else {
        return;
    };
    let globe: WebGlobe = Rc::new(RefCell::new(renderer));

    if let Err(e) = watch_resize(window, &globe) {
        warn!("Globe resize listener not installed: {:?}", e);
    }

    request_texture(&globe, &ImageLoader, &config.texture_url);

    let mut driver = AnimationFrameLoop::new(window.clone());
    if let Err(e) = driver.start(globe) {
        warn!("Globe animation not started: {}", e);
    }
}

fn watch_resize(window: &Window, globe: &WebGlobe) -> Result<(), JsValue> {
    let globe = globe.clone();
    let on_resize = Closure::<dyn FnMut()>::new(move || globe.borrow_mut().resize());
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();
    Ok(())
}
