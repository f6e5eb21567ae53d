/// DOM bindings for the overlay menu
use std::cell::RefCell;
use std::rc::Rc;

use globe_core::{
    Key, KeyOutcome, KeyPress, MenuConfig, MenuController, MenuDom, Phase, WireOnce, WireState,
};
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, Document, Element, EventTarget, HtmlElement,
    KeyboardEvent, MouseEvent,
};

/// Live page elements behind the menu state machine
pub struct DomMenu {
    document: Document,
    overlay: HtmlElement,
    trigger: HtmlElement,
    focusable_selector: String,
}

impl MenuDom for DomMenu {
    type Element = Element;

    fn active_element(&self) -> Option<Element> {
        self.document.active_element()
    }

    fn focus(&mut self, element: &Element) {
        if let Some(element) = element.dyn_ref::<HtmlElement>() {
            if let Err(e) = element.focus() {
                debug!("Focus failed: {:?}", e);
            }
        }
    }

    fn focusables(&self) -> Vec<Element> {
        let Ok(nodes) = self.overlay.query_selector_all(&self.focusable_selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn set_overlay_hidden(&mut self, hidden: bool) {
        self.overlay.set_hidden(hidden);
    }

    fn set_trigger_expanded(&mut self, expanded: bool) {
        let value = if expanded { "true" } else { "false" };
        if let Err(e) = self.trigger.set_attribute("aria-expanded", value) {
            debug!("aria-expanded not updated: {:?}", e);
        }
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        let Some(body) = self.document.body() else {
            return;
        };
        let style = body.style();
        let result = if locked {
            style.set_property("overflow", "hidden")
        } else {
            style.remove_property("overflow").map(|_| ())
        };
        if let Err(e) = result {
            debug!("Scroll lock not updated: {:?}", e);
        }
    }
}

/// Elements that must exist before listeners can be attached
struct MenuElements {
    overlay: HtmlElement,
    trigger: HtmlElement,
    closers: Vec<Element>,
}

fn lookup(document: &Document, config: &MenuConfig) -> Option<MenuElements> {
    let overlay = document
        .get_element_by_id(&config.overlay_id)?
        .dyn_into::<HtmlElement>()
        .ok()?;
    let trigger = document
        .get_element_by_id(&config.trigger_id)?
        .dyn_into::<HtmlElement>()
        .ok()?;

    let closers = match overlay.query_selector_all(&config.closer_selector) {
        Ok(nodes) => (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect(),
        Err(_) => Vec::new(),
    };

    Some(MenuElements {
        overlay,
        trigger,
        closers,
    })
}

fn on_click<F>(target: &EventTarget, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    let listener = Closure::<dyn FnMut(MouseEvent)>::new(handler);
    target.add_event_listener_with_callback("click", listener.as_ref().unchecked_ref())?;
    listener.forget();
    Ok(())
}

fn wire(document: &Document, config: &MenuConfig, elements: MenuElements) -> Result<(), JsValue> {
    let MenuElements {
        overlay,
        trigger,
        closers,
    } = elements;

    let menu = Rc::new(RefCell::new(MenuController::new(DomMenu {
        document: document.clone(),
        overlay: overlay.clone(),
        trigger: trigger.clone(),
        focusable_selector: config.focusable_selector.clone(),
    })));

    {
        let menu = menu.clone();
        on_click(&trigger, move |event| {
            event.prevent_default();
            menu.borrow_mut().toggle();
        })?;
    }

    for closer in &closers {
        let menu = menu.clone();
        on_click(closer, move |_| menu.borrow_mut().activate_closer())?;
    }

    {
        let menu = menu.clone();
        let backdrop: EventTarget = overlay.clone().into();
        on_click(&overlay, move |event| {
            let on_backdrop = event.target().is_some_and(|target| target == backdrop);
            menu.borrow_mut().click_overlay(on_backdrop);
        })?;
    }

    let on_key = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        let press = KeyPress::new(Key::from_name(&event.key()), event.shift_key());
        if menu.borrow_mut().key_down(press) == KeyOutcome::Handled {
            event.prevent_default();
        }
    });
    document.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
    on_key.forget();

    Ok(())
}

fn attempt(
    guard: &mut WireOnce,
    document: &Document,
    config: &MenuConfig,
    phase: Phase,
) -> WireState {
    guard.attempt(
        phase,
        || lookup(document, config),
        |elements| {
            if let Err(e) = wire(document, config, elements) {
                warn!("Menu listeners not installed: {:?}", e);
            }
        },
    )
}

/// Wire the menu now, or once more after the document has loaded
pub fn install(document: &Document, config: MenuConfig) -> Result<(), JsValue> {
    let mut guard = WireOnce::new();
    let phase = match document.ready_state().as_str() {
        "loading" => Phase::ScriptRun,
        _ => Phase::DocumentLoaded,
    };

    if attempt(&mut guard, document, &config, phase) != WireState::Deferred {
        return Ok(());
    }

    let doc = document.clone();
    let retry = Closure::once_into_js(move || {
        let state = attempt(&mut guard, &doc, &config, Phase::DocumentLoaded);
        if state == WireState::Inactive {
            debug!("No menu on this page");
        }
    });
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    document.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        retry.unchecked_ref(),
        &options,
    )
}
