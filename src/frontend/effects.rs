use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Element, Event, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    MouseEvent,
};

use super::dom;
use crate::config::{self, TypingTimings};
use crate::reveal::{RevealTracker, REVEAL_CLASS, REVEAL_SELECTOR, REVEAL_THRESHOLD};
use crate::telemetry::{log_event, LogLevel};
use crate::tilt::{card_tilt, card_transform, CARD_RESET, CARD_SELECTOR};
use crate::typing::TypingLoop;

const TYPING_SELECTOR: &str = ".typing-text";
const TYPING_WORDS_ATTRIBUTE: &str = "data-words";

pub fn install_reveal() {
    let elements = dom::query_all(REVEAL_SELECTOR);
    if elements.is_empty() {
        dom::missing("reveal", REVEAL_SELECTOR);
        return;
    }

    let tracker = Rc::new(RefCell::new(RevealTracker::new(elements.len())));
    let watched = Rc::new(elements);

    let callback = {
        let watched = watched.clone();
        Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    let Some(index) = watched.iter().position(|element| *element == target) else {
                        continue;
                    };

                    if tracker.borrow_mut().observe(
                        index,
                        entry.is_intersecting(),
                        entry.intersection_ratio(),
                    ) {
                        dom::add_class(&target, REVEAL_CLASS);
                        observer.unobserve(&target);
                    }
                }
            },
        )
    };

    let options = IntersectionObserverInit::new();
    options.set_root_margin("0px");
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));

    let Ok(observer) =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
    else {
        log_event(LogLevel::Warn, "reveal_observer_unavailable", serde_json::json!({}));
        return;
    };
    callback.forget();

    for element in watched.iter() {
        observer.observe(element);
    }
}

fn typing_words(element: &Element) -> Vec<String> {
    element
        .get_attribute(TYPING_WORDS_ATTRIBUTE)
        .and_then(|raw| serde_json::from_str::<Vec<String>>(&raw).ok())
        .filter(|words| !words.is_empty())
        .unwrap_or_else(config::typing_words)
}

pub fn install_typing() {
    let Some(element) = dom::query(TYPING_SELECTOR) else {
        dom::missing("typing", TYPING_SELECTOR);
        return;
    };
    let Some(mut typing) = TypingLoop::new(typing_words(&element), TypingTimings::default()) else {
        return;
    };

    spawn_local(async move {
        loop {
            let frame = typing.tick();
            element.set_text_content(Some(&frame.text));
            TimeoutFuture::new(frame.next_delay_ms).await;
        }
    });
}

pub fn install_tilt() {
    for card in dom::query_all(CARD_SELECTOR) {
        let target = card.clone();
        dom::listen::<MouseEvent, _>(&card, "mousemove", move |event| {
            let tilt = card_tilt(
                &dom::bounding_rect(&target),
                f64::from(event.client_x()),
                f64::from(event.client_y()),
            );
            dom::set_style(&target, "transform", &card_transform(tilt));
        });

        let target = card.clone();
        dom::listen::<Event, _>(&card, "mouseleave", move |_| {
            dom::set_style(&target, "transform", CARD_RESET);
        });
    }
}
