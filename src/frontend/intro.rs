use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use web_sys::{Element, Event, HtmlElement, MouseEvent};

use super::dom;
use crate::config::IntroTimings;
use crate::intro::{
    active_section_transform, orb_translation, pointer_offset, split_title, stack_class,
    IntroCommand, IntroSequencer, Schedule, Transition, Wake,
};
use crate::telemetry::{log_event, LogLevel};
use crate::tilt::{mini_card_transform, MINI_CARD_SELECTOR};

const OVERLAY_ID: &str = "intro-overlay";
const SECTION_SELECTOR: &str = ".intro-section";
const SKIP_BUTTON_ID: &str = "skipIntro";
const ORB_SELECTOR: &str = ".intro-orb";
const PROGRESS_FILL_ID: &str = "intro-progress-bar";
const TITLE_SELECTOR: &str = ".intro-title span";
const FLARE_CLASS: &str = "cursor-flare";
const SECTION_STATE_CLASSES: [&str; 5] = [
    "active",
    "exiting",
    "stack-under-1",
    "stack-under-2",
    "stack-under-3",
];

struct IntroDom {
    overlay: HtmlElement,
    sections: Vec<HtmlElement>,
    orbs: Vec<HtmlElement>,
    progress_fill: Option<HtmlElement>,
}

impl IntroDom {
    fn section(&self, index: usize) -> Option<&HtmlElement> {
        self.sections.get(index)
    }

    fn set_progress(&self, percent: f64) {
        if let Some(fill) = &self.progress_fill {
            dom::set_style(fill, "width", &format!("{percent}%"));
        }
    }

    fn run(&self, command: &IntroCommand) {
        match command {
            IntroCommand::ResetProgress => self.set_progress(0.0),
            IntroCommand::Stack { index, depth } => {
                if let Some(section) = self.section(*index) {
                    for class in SECTION_STATE_CLASSES {
                        dom::remove_class(section, class);
                    }
                    dom::add_class(section, stack_class(*depth));
                }
            }
            IntroCommand::Reveal { index, z_index } => {
                if let Some(section) = self.section(*index) {
                    dom::set_style(section, "display", "block");
                    dom::set_style(section, "z-index", &z_index.to_string());
                }
            }
            IntroCommand::Accent { index, accent } => {
                if let Some(title) = self
                    .section(*index)
                    .and_then(|section| dom::query_within(section, TITLE_SELECTOR))
                {
                    dom::set_style(&title, "background-image", accent.gradient);
                    dom::set_style(&title, "-webkit-background-clip", "text");
                    dom::set_style(&title, "background-clip", "text");
                    dom::set_style(&title, "-webkit-text-fill-color", "transparent");
                    dom::set_style(&title, "color", "transparent");
                }
                dom::set_style(&self.overlay, "transition", "background 2s ease");
                dom::set_style(&self.overlay, "background", &accent.overlay_background());
            }
            IntroCommand::Activate { index } => {
                if let Some(section) = self.section(*index) {
                    dom::add_class(section, "active");
                }
            }
            IntroCommand::TrackProgress { .. } => {}
            IntroCommand::Exit(style) => {
                for (property, value) in style.style_properties() {
                    dom::set_style(&self.overlay, property, value);
                }
            }
            IntroCommand::Hide => {
                dom::add_class(&self.overlay, "hidden-overlay");
                dom::set_style(&self.overlay, "display", "none");
                if let Some(body) = dom::body() {
                    dom::remove_class(&body, "intro-active");
                }
            }
        }
    }

    fn active_section(&self) -> Option<&HtmlElement> {
        self.sections
            .iter()
            .find(|section| dom::has_class(section, "active"))
    }
}

struct IntroRuntime {
    sequencer: IntroSequencer,
    dom: IntroDom,
    pending: Option<Timeout>,
}

type SharedIntro = Rc<RefCell<IntroRuntime>>;

pub fn install() {
    let Some(overlay) = dom::by_id_as::<HtmlElement>(OVERLAY_ID) else {
        dom::missing("intro", OVERLAY_ID);
        return;
    };
    let sections = dom::query_all_html(SECTION_SELECTOR);
    let Some(sequencer) = IntroSequencer::new(sections.len(), IntroTimings::from_build_env()) else {
        dom::missing("intro", SECTION_SELECTOR);
        return;
    };

    for section in &sections {
        prepare_section(section);
    }

    let runtime: SharedIntro = Rc::new(RefCell::new(IntroRuntime {
        sequencer,
        dom: IntroDom {
            overlay: overlay.clone(),
            sections,
            orbs: dom::query_all_html(ORB_SELECTOR),
            progress_fill: dom::by_id_as::<HtmlElement>(PROGRESS_FILL_ID),
        },
        pending: None,
    }));

    if let Some(button) = dom::by_id(SKIP_BUTTON_ID) {
        let handle = runtime.clone();
        dom::listen::<Event, _>(&button, "click", move |_| skip(&handle));
    }

    {
        let handle = runtime.clone();
        dom::listen::<MouseEvent, _>(&overlay, "mousemove", move |event| {
            parallax(&handle, event);
        });
    }

    if let Some(document) = dom::document() {
        dom::listen::<MouseEvent, _>(&document, "mousemove", |event| {
            tilt_mini_cards(&event);
        });
    }

    let first = runtime.borrow_mut().sequencer.start();
    apply(&runtime, first);
}

fn prepare_section(section: &HtmlElement) {
    if let Some(title) = dom::query_within(section, TITLE_SELECTOR) {
        if dom::query_within(&title, ".char").is_none() {
            split_title_into_chars(&title);
        }
    }

    if let Some(document) = dom::document() {
        if let Ok(flare) = document.create_element("div") {
            dom::add_class(&flare, FLARE_CLASS);
            let _ = section.prepend_with_node_1(&flare);
        }
    }

    if dom::has_class(section, "active") {
        dom::set_style(section, "display", "block");
    }
}

fn split_title_into_chars(title: &Element) {
    let Some(document) = dom::document() else {
        return;
    };
    let text = title.text_content().unwrap_or_default();
    title.set_text_content(Some(""));

    for character in split_title(&text) {
        let Ok(span) = document.create_element("span") else {
            continue;
        };
        span.set_text_content(Some(&character.text));
        dom::add_class(&span, "char");
        dom::set_style(&span, "transition-delay", &format!("{}s", character.delay_seconds));
        let _ = title.append_child(&span);
    }
}

fn apply(runtime: &SharedIntro, transition: Transition) {
    let Transition { commands, next } = transition;
    let mut tracked = Vec::new();

    {
        let runtime = runtime.borrow();
        for command in &commands {
            if let IntroCommand::TrackProgress { index } = command {
                tracked.push(*index);
            }
            runtime.dom.run(command);
        }
    }

    for index in tracked {
        track_progress(runtime, index);
    }
    if let Some(next) = next {
        schedule(runtime, next);
    }
}

fn schedule(runtime: &SharedIntro, next: Schedule) {
    let handle = runtime.clone();
    let timeout = Timeout::new(next.after_ms, move || wake(&handle, next.wake));
    runtime.borrow_mut().pending = Some(timeout);
}

fn wake(runtime: &SharedIntro, wake: Wake) {
    let transition = {
        let mut runtime = runtime.borrow_mut();
        // This timer is the one firing; release it without clearing.
        if let Some(fired) = runtime.pending.take() {
            let _ = fired.forget();
        }
        runtime.sequencer.wake(wake)
    };

    if transition.commands.contains(&IntroCommand::Hide) {
        log_event(LogLevel::Debug, "intro_hidden", serde_json::json!({}));
    }
    apply(runtime, transition);
}

fn skip(runtime: &SharedIntro) {
    let transition = {
        let mut runtime = runtime.borrow_mut();
        let section = runtime.sequencer.current_index();
        let transition = runtime.sequencer.skip();
        if transition.next.is_some() {
            // Dropping the handle clears the pending timer.
            runtime.pending = None;
            log_event(
                LogLevel::Info,
                "intro_skipped",
                serde_json::json!({ "section": section }),
            );
        }
        transition
    };

    apply(runtime, transition);
}

fn track_progress(runtime: &SharedIntro, index: usize) {
    let handle = Rc::downgrade(runtime);
    let mut started_at: Option<f64> = None;

    dom::animation_loop(move |timestamp| {
        let Some(runtime) = handle.upgrade() else {
            return false;
        };
        let runtime = runtime.borrow();
        let started = *started_at.get_or_insert(timestamp);
        let elapsed = timestamp - started;

        let Some(percent) = runtime.sequencer.progress(index, elapsed) else {
            return false;
        };
        runtime.dom.set_progress(percent);
        elapsed < f64::from(runtime.sequencer.timings().section_ms)
    });
}

fn parallax(runtime: &SharedIntro, event: MouseEvent) {
    let runtime = runtime.borrow();
    if !runtime.sequencer.accepts_pointer() {
        return;
    }

    let client_x = f64::from(event.client_x());
    let client_y = f64::from(event.client_y());
    let offset = pointer_offset(client_x, client_y, dom::viewport_size());

    for (index, orb) in runtime.dom.orbs.iter().enumerate() {
        dom::set_style(orb, "transform", &orb_translation(offset, index));
    }

    let Some(section) = runtime.dom.active_section() else {
        return;
    };
    dom::set_style(section, "transform", &active_section_transform(offset));

    if let Some(flare) = dom::query_within(section, &format!(".{FLARE_CLASS}")) {
        let rect = dom::bounding_rect(section);
        dom::set_style(&flare, "left", &format!("{}px", client_x - rect.left));
        dom::set_style(&flare, "top", &format!("{}px", client_y - rect.top));
    }
}

fn tilt_mini_cards(event: &MouseEvent) {
    let x = f64::from(event.client_x());
    let y = f64::from(event.client_y());

    for card in dom::query_all(MINI_CARD_SELECTOR) {
        if let Some(transform) = mini_card_transform(&dom::bounding_rect(&card), x, y) {
            dom::set_style(&card, "transform", &transform);
        }
    }
}
