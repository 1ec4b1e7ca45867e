use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, Document};
use yew::prelude::*;

use super::dom;
use super::navigation::BACK_TO_TOP_ID;
use crate::particles::{self, Particle, PARTICLE_COUNT};
use crate::scroll::ScrollChrome;

const NAVBAR_SELECTOR: &str = ".navbar";

/// Decorations the host page did not ship with and we render instead.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct MissingDecorations {
    pub noise: bool,
    pub mesh: bool,
    pub cursor_dot: bool,
    pub cursor_outline: bool,
}

impl MissingDecorations {
    pub fn detect(document: &Document) -> Self {
        let absent = |selector: &str| document.query_selector(selector).ok().flatten().is_none();

        Self {
            noise: absent(".noise-overlay"),
            mesh: absent(".mesh-gradient"),
            cursor_dot: absent(".cursor-dot"),
            cursor_outline: absent(".cursor-outline"),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct AmbientProps {
    pub missing: MissingDecorations,
}

fn measure_scroll() -> ScrollChrome {
    let scroll_y = window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0);
    let root = dom::document().and_then(|document| document.document_element());
    let body_top = dom::body().map(|body| body.scroll_top()).unwrap_or(0);

    let (root_top, scroll_height, client_height) = root
        .map(|root| (root.scroll_top(), root.scroll_height(), root.client_height()))
        .unwrap_or((0, 0, 0));
    let scroll_top = if body_top != 0 { body_top } else { root_top };

    ScrollChrome::measure(
        scroll_y,
        f64::from(scroll_top),
        f64::from(scroll_height),
        f64::from(client_height),
    )
}

fn apply_host_chrome(chrome: &ScrollChrome) {
    if let Some(navbar) = dom::query(NAVBAR_SELECTOR) {
        dom::set_class(&navbar, "scrolled", chrome.navbar_scrolled);
    }
    if let Some(button) = dom::by_id(BACK_TO_TOP_ID) {
        dom::set_class(&button, "show", chrome.back_to_top_visible);
    }
}

#[function_component(Ambient)]
pub fn ambient(props: &AmbientProps) -> Html {
    let particles = use_state(|| particles::generate(PARTICLE_COUNT, js_sys::Math::random));
    let chrome = use_state(measure_scroll);

    {
        let chrome = chrome.clone();
        use_effect_with((), move |_| {
            let destructor: Box<dyn FnOnce()> = if let Some(win) = window() {
                let callback = Closure::<dyn Fn()>::new(move || {
                    chrome.set(measure_scroll());
                });
                let _ = win
                    .add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref());

                Box::new(move || {
                    if let Some(win) = window() {
                        let _ = win.remove_event_listener_with_callback(
                            "scroll",
                            callback.as_ref().unchecked_ref(),
                        );
                    }
                })
            } else {
                Box::new(|| ())
            };

            move || destructor()
        });
    }

    {
        let current = *chrome;
        use_effect_with(current, |chrome| {
            apply_host_chrome(chrome);
            || ()
        });
    }

    let missing = props.missing;
    let progress_style = format!("width: {}%;", chrome.progress_percent);

    html! {
        <>
            if missing.mesh {
                <div class="mesh-gradient"></div>
            }
            if missing.noise {
                <div class="noise-overlay"></div>
            }
            <div class="page-progress" style={progress_style}></div>
            <div class="particles-container" aria-hidden="true">
                { for particles.iter().map(render_particle) }
            </div>
            if missing.cursor_dot {
                <div class="cursor-dot"></div>
            }
            if missing.cursor_outline {
                <div class="cursor-outline"></div>
            }
        </>
    }
}

fn render_particle(particle: &Particle) -> Html {
    html! { <div class="particle" style={particle.style()}></div> }
}

pub fn mount(document: &Document) {
    let missing = MissingDecorations::detect(document);
    let (Some(body), Ok(root)) = (document.body(), document.create_element("div")) else {
        dom::missing("ambient", "body");
        return;
    };
    root.set_class_name("fx-ambient");
    let _ = body.prepend_with_node_1(&root);

    yew::Renderer::<Ambient>::with_root_and_props(root, AmbientProps { missing }).render();
}
