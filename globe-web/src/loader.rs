/// Texture loading through `HtmlImageElement`
use std::cell::RefCell;
use std::rc::Rc;

use globe_core::{TextureCallback, TextureError, TextureLoader};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;

/// Fetches images as anonymous CORS requests so WebGL may sample them
pub struct ImageLoader;

impl TextureLoader for ImageLoader {
    type Image = HtmlImageElement;

    fn load(&self, url: &str, done: TextureCallback<HtmlImageElement>) {
        let failure = || TextureError::LoadFailed {
            url: url.to_string(),
        };
        let image = match HtmlImageElement::new() {
            Ok(image) => image,
            Err(_) => return done(Err(failure())),
        };
        image.set_cross_origin(Some("anonymous"));

        // onload and onerror share the callback; whichever fires first takes it
        let done = Rc::new(RefCell::new(Some(done)));

        let onload = {
            let done = done.clone();
            let loaded = image.clone();
            Closure::once_into_js(move || {
                let callback = done.borrow_mut().take();
                if let Some(callback) = callback {
                    callback(Ok(loaded));
                }
            })
        };
        let onerror = {
            let error = failure();
            Closure::once_into_js(move || {
                let callback = done.borrow_mut().take();
                if let Some(callback) = callback {
                    callback(Err(error));
                }
            })
        };

        image.set_onload(Some(onload.unchecked_ref()));
        image.set_onerror(Some(onerror.unchecked_ref()));
        image.set_src(url);
    }
}
