use js_sys::{Function, Reflect};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, Element, Event, Storage};

use super::dom;
use crate::telemetry::{log_event, LogLevel};
use crate::theme::{
    active_controls, persist_theme, restore_theme, PreferenceStore, Theme, THEME_ATTRIBUTE,
    THEME_CONTROL_SELECTOR,
};

const ACTIVE_CLASS: &str = "active";

struct LocalStore;

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

impl PreferenceStore for LocalStore {
    fn load(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn save(&self, key: &str, value: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.set_item(key, value);
        }
    }
}

fn apply_theme(theme: Theme) {
    if let Some(root) = dom::document().and_then(|document| document.document_element()) {
        let _ = root.set_attribute(THEME_ATTRIBUTE, theme.as_str());
    }
}

fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn apply_theme_with_transition(theme: Theme) {
    if prefers_reduced_motion() {
        apply_theme(theme);
        return;
    }

    let Some(document) = dom::document() else {
        apply_theme(theme);
        return;
    };

    let document_js: JsValue = document.into();
    let Ok(start_view_transition) =
        Reflect::get(&document_js, &JsValue::from_str("startViewTransition"))
    else {
        apply_theme(theme);
        return;
    };

    let Some(start_view_transition) = start_view_transition.dyn_ref::<Function>() else {
        apply_theme(theme);
        return;
    };

    // The browser calls this after we return, so ownership moves to JS.
    let callback = Closure::once_into_js(move || apply_theme(theme));

    if start_view_transition.call1(&document_js, &callback).is_err() {
        apply_theme(theme);
    }
}

fn mark_active(controls: &[Element], theme: Theme) {
    let identifiers: Vec<Option<String>> = controls
        .iter()
        .map(|control| control.get_attribute(THEME_ATTRIBUTE))
        .collect();

    for (control, active) in controls.iter().zip(active_controls(&identifiers, theme)) {
        dom::set_class(control, ACTIVE_CLASS, active);
    }
}

pub fn install() {
    let controls = dom::query_all(THEME_CONTROL_SELECTOR);
    let theme = restore_theme(&LocalStore);
    apply_theme(theme);
    mark_active(&controls, theme);

    for control in &controls {
        let target = control.clone();
        let all = controls.clone();
        dom::listen::<Event, _>(control, "click", move |_| {
            let requested = target.get_attribute(THEME_ATTRIBUTE);
            let Some(theme) = requested.as_deref().and_then(Theme::from_str) else {
                log_event(
                    LogLevel::Debug,
                    "theme_unknown",
                    serde_json::json!({ "requested": requested }),
                );
                return;
            };

            apply_theme_with_transition(theme);
            persist_theme(&LocalStore, theme);
            mark_active(&all, theme);
        });
    }
}
