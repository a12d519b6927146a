//! Browser binding: DOM surface, listener wiring and the JS-facing constructor.
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use tracing::warn;
use wasm_bindgen::{closure::Closure, prelude::*, JsCast};
use web_sys::{window, Document, Element, HtmlElement, KeyboardEvent, MouseEvent, Window};

use crate::controller::{CloseOrigin, Controller, Key, Surface};
use crate::markup::ACTIVE_CLASS;
use crate::{LightboxConfig, LightboxError};

type SharedController = Rc<RefCell<Controller<DomSurface>>>;
type WeakController = Weak<RefCell<Controller<DomSurface>>>;

fn js_error_message(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn with_controller(controller: &WeakController, f: impl FnOnce(&mut Controller<DomSurface>)) {
    let Some(controller) = controller.upgrade() else {
        return;
    };
    let Ok(mut controller) = controller.try_borrow_mut() else {
        warn!("lightbox busy, event dropped");
        return;
    };
    f(&mut controller);
}

pub struct DomOverlay {
    element: HtmlElement,
    on_click: Closure<dyn FnMut(MouseEvent)>,
}

/// [`Surface`] over the page's document.
pub struct DomSurface {
    document: Document,
    controller: WeakController,
}

impl DomSurface {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            controller: Weak::new(),
        }
    }

    fn bind(&mut self, controller: WeakController) {
        self.controller = controller;
    }
}

impl Surface for DomSurface {
    type Trigger = Element;
    type Overlay = DomOverlay;
    type Timer = Timeout;

    fn query(&mut self, selector: &str) -> Result<Vec<Element>, LightboxError> {
        let nodes = self
            .document
            .query_selector_all(selector)
            .map_err(|err| LightboxError::Selector {
                selector: selector.to_string(),
                reason: js_error_message(&err),
            })?;
        Ok((0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    fn attribute(&self, trigger: &Element, name: &str) -> Option<String> {
        trigger.get_attribute(name)
    }

    fn set_attribute(&mut self, trigger: &Element, name: &str, value: &str) {
        if let Err(err) = trigger.set_attribute(name, value) {
            warn!(name, "could not set attribute: {}", js_error_message(&err));
        }
    }

    fn create_overlay(&mut self, class_name: &str) -> Option<DomOverlay> {
        let element: HtmlElement = self.document.create_element("div").ok()?.dyn_into().ok()?;
        element.set_class_name(class_name);

        let controller = self.controller.clone();
        let on_click = Closure::wrap(Box::new(move |event: MouseEvent| {
            let class_attr = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|target| target.get_attribute("class"))
                .unwrap_or_default();
            with_controller(&controller, |controller| {
                let click = controller.classify_click(&class_attr);
                controller.overlay_click(click);
            });
        }) as Box<dyn FnMut(MouseEvent)>);
        element
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .ok()?;
        self.document.body()?.append_child(&element).ok()?;

        Some(DomOverlay { element, on_click })
    }

    fn set_content(&mut self, overlay: &DomOverlay, markup: &str) {
        overlay.element.set_inner_html(markup);
    }

    fn force_layout(&mut self, overlay: &DomOverlay) {
        let _ = overlay.element.offset_width();
    }

    fn set_active(&mut self, overlay: &DomOverlay, active: bool) {
        let classes = overlay.element.class_list();
        let result = if active {
            classes.add_1(ACTIVE_CLASS)
        } else {
            classes.remove_1(ACTIVE_CLASS)
        };
        if let Err(err) = result {
            warn!(active, "could not toggle overlay: {}", js_error_message(&err));
        }
    }

    fn remove_overlay(&mut self, overlay: DomOverlay) {
        let _ = overlay
            .element
            .remove_event_listener_with_callback("click", overlay.on_click.as_ref().unchecked_ref());
        overlay.element.remove();
    }

    fn schedule_removal(&mut self, delay_ms: u32, generation: u64) -> Timeout {
        let controller = self.controller.clone();
        Timeout::new(delay_ms, move || {
            with_controller(&controller, |controller| {
                controller.finish_removal(generation);
            });
        })
    }
}

/// A lightbox bound to the current page. Dropping it unbinds every listener
/// and removes the overlay.
pub struct Lightbox {
    controller: SharedController,
    window: Window,
    triggers: Vec<(Element, Closure<dyn FnMut(MouseEvent)>)>,
    on_keydown: Closure<dyn FnMut(KeyboardEvent)>,
}

impl Lightbox {
    pub fn attach(config: LightboxConfig) -> Result<Self, LightboxError> {
        let window = window().ok_or(LightboxError::NoDocument)?;
        let document = window.document().ok_or(LightboxError::NoDocument)?;

        let controller = Rc::new(RefCell::new(Controller::new(
            config,
            DomSurface::new(document),
        )?));
        controller
            .borrow_mut()
            .surface_mut()
            .bind(Rc::downgrade(&controller));

        let triggers = controller
            .borrow()
            .triggers()
            .iter()
            .enumerate()
            .map(|(position, element)| {
                let weak = Rc::downgrade(&controller);
                let on_click = Closure::wrap(Box::new(move |event: MouseEvent| {
                    event.prevent_default();
                    with_controller(&weak, |controller| controller.open(position));
                }) as Box<dyn FnMut(MouseEvent)>);
                if let Err(err) = element
                    .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
                {
                    warn!(position, "could not bind trigger: {}", js_error_message(&err));
                }
                (element.clone(), on_click)
            })
            .collect();

        let weak = Rc::downgrade(&controller);
        let on_keydown = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            let key = Key::from_name(&event.key());
            if key != Key::Other {
                with_controller(&weak, |controller| controller.key_down(key));
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);
        let lightbox = Self {
            controller,
            window,
            triggers,
            on_keydown,
        };
        lightbox
            .window
            .add_event_listener_with_callback("keydown", lightbox.on_keydown.as_ref().unchecked_ref())
            .map_err(|err| LightboxError::Listener {
                event: "keydown",
                reason: js_error_message(&err),
            })?;
        Ok(lightbox)
    }

    pub fn open_by_index(&self, index: i64) {
        with_controller(&Rc::downgrade(&self.controller), |c| c.open_by_index(index));
    }

    pub fn close(&self) -> bool {
        let mut closed = false;
        with_controller(&Rc::downgrade(&self.controller), |c| {
            closed = c.close(CloseOrigin::Api);
        });
        closed
    }

    pub fn current_index(&self) -> i64 {
        self.controller.borrow().current_index()
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    pub fn destroy(self) {
        drop(self);
    }
}

impl Drop for Lightbox {
    fn drop(&mut self) {
        for (element, on_click) in &self.triggers {
            let _ = element
                .remove_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        }
        let _ = self
            .window
            .remove_event_listener_with_callback("keydown", self.on_keydown.as_ref().unchecked_ref());
        if let Ok(mut controller) = self.controller.try_borrow_mut() {
            controller.teardown();
        }
    }
}

fn config_from_js(options: &JsValue) -> Result<LightboxConfig, LightboxError> {
    if options.is_undefined() || options.is_null() {
        return Ok(LightboxConfig::default());
    }
    let json: String = js_sys::JSON::stringify(options)
        .map(String::from)
        .unwrap_or_default();
    LightboxConfig::from_json(&json)
}

/// `new Lightbox({ selector: '.lightbox' })` from JavaScript.
#[wasm_bindgen(js_name = Lightbox)]
pub struct JsLightbox {
    inner: Option<Lightbox>,
}

#[wasm_bindgen(js_class = Lightbox)]
impl JsLightbox {
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<JsLightbox, JsError> {
        let config = config_from_js(&options)?;
        Ok(Self {
            inner: Some(Lightbox::attach(config)?),
        })
    }

    #[wasm_bindgen(js_name = openByIndex)]
    pub fn open_by_index(&self, index: i32) {
        if let Some(lightbox) = &self.inner {
            lightbox.open_by_index(i64::from(index));
        }
    }

    pub fn close(&self) -> bool {
        self.inner.as_ref().is_some_and(Lightbox::close)
    }

    #[wasm_bindgen(getter, js_name = currentIndex)]
    pub fn current_index(&self) -> i32 {
        self.inner
            .as_ref()
            .map_or(-1, |lightbox| lightbox.current_index() as i32)
    }

    pub fn destroy(&mut self) {
        self.inner.take();
    }
}
