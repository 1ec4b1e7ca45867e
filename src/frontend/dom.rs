use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, Document, Element, Event, EventTarget, HtmlElement};

use crate::telemetry::{log_event, LogLevel};
use crate::tilt::Rect;

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

pub fn by_id_as<T: JsCast>(id: &str) -> Option<T> {
    by_id(id)?.dyn_into::<T>().ok()
}

pub fn query(selector: &str) -> Option<Element> {
    document()?.query_selector(selector).ok().flatten()
}

pub fn query_html(selector: &str) -> Option<HtmlElement> {
    query(selector)?.dyn_into::<HtmlElement>().ok()
}

pub fn query_all(selector: &str) -> Vec<Element> {
    let Some(nodes) = document().and_then(|document| document.query_selector_all(selector).ok())
    else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query_all_html(selector: &str) -> Vec<HtmlElement> {
    query_all(selector)
        .into_iter()
        .filter_map(|element| element.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn query_within(parent: &Element, selector: &str) -> Option<Element> {
    parent.query_selector(selector).ok().flatten()
}

pub fn body() -> Option<HtmlElement> {
    document()?.body()
}

pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element.style().set_property(property, value);
    }
}

pub fn add_class(element: &Element, class: &str) {
    let _ = element.class_list().add_1(class);
}

pub fn remove_class(element: &Element, class: &str) {
    let _ = element.class_list().remove_1(class);
}

pub fn set_class(element: &Element, class: &str, enabled: bool) {
    if enabled {
        add_class(element, class);
    } else {
        remove_class(element, class);
    }
}

pub fn has_class(element: &Element, class: &str) -> bool {
    element.class_list().contains(class)
}

pub fn bounding_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

pub fn viewport_size() -> (f64, f64) {
    let Some(win) = window() else {
        return (1280.0, 720.0);
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

/// Attaches a listener for the lifetime of the page.
pub fn listen<E, F>(target: &EventTarget, event: &str, mut handler: F)
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let callback = Closure::<dyn FnMut(Event)>::new(move |raw: Event| {
        if let Ok(event) = raw.dyn_into::<E>() {
            handler(event);
        }
    });

    if target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .is_err()
    {
        log_event(
            LogLevel::Warn,
            "listener_rejected",
            serde_json::json!({ "event": event }),
        );
        return;
    }
    callback.forget();
}

/// Runs `frame` on every animation frame until it returns `false`.
pub fn animation_loop<F>(mut frame: F)
where
    F: FnMut(f64) -> bool + 'static,
{
    let slot: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let handle = slot.clone();

    *slot.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
        if frame(timestamp) {
            if let Some(callback) = handle.borrow().as_ref() {
                request_frame(callback);
            }
            return;
        }

        // The closure owns `handle`, so emptying the slot breaks the cycle. It
        // is still running here, so the drop waits for the next task.
        if let Some(finished) = handle.borrow_mut().take() {
            let _ = Timeout::new(0, move || drop(finished)).forget();
        }
    }));

    if let Some(callback) = slot.borrow().as_ref() {
        request_frame(callback);
    }
}

fn request_frame(callback: &Closure<dyn FnMut(f64)>) {
    if let Some(win) = window() {
        let _ = win.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

pub fn missing(feature: &str, selector: &str) {
    log_event(
        LogLevel::Debug,
        "feature_skipped",
        serde_json::json!({ "feature": feature, "missing": selector }),
    );
}
