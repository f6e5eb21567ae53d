/// Globe Web - WASM entry point for the night globe widget
///
/// On load this mounts the rotating globe on `#globe-canvas` (WebGL2, with a
/// silent fallback to the page's CSS) and wires the overlay menu.

pub mod driver;
pub mod gl;
pub mod globe;
pub mod loader;
pub mod menu;

use globe_core::{GlobeConfig, MenuConfig};
use wasm_bindgen::prelude::*;

pub use driver::AnimationFrameLoop;
pub use gl::WebGlBackend;
pub use globe::PageHost;
pub use loader::ImageLoader;
pub use menu::DomMenu;

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Fails only if a logger is already installed
    console_log::init_with_level(log::Level::Info).ok();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;

    globe::start(&window, &document, &GlobeConfig::default());
    menu::install(&document, MenuConfig::default())
}
