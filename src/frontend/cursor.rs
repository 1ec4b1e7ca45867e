use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{window, Event, HtmlElement, MouseEvent};

use super::dom;
use crate::cursor::{
    magnet_transform, EasedFollower, Point, INTERACTIVE_SELECTOR, MAGNET_RESET, MAGNET_SELECTOR,
};

const DOT_SELECTOR: &str = ".cursor-dot";
const OUTLINE_SELECTOR: &str = ".cursor-outline";
const HOVER_CLASS: &str = "hover";

/// Cursor elements may be injected after startup, so each is looked up
/// again until found.
#[derive(Default)]
struct CursorElements {
    dot: Option<HtmlElement>,
    outline: Option<HtmlElement>,
}

impl CursorElements {
    fn dot(&mut self) -> Option<&HtmlElement> {
        if self.dot.is_none() {
            self.dot = dom::query_html(DOT_SELECTOR);
        }
        self.dot.as_ref()
    }

    fn outline(&mut self) -> Option<&HtmlElement> {
        if self.outline.is_none() {
            self.outline = dom::query_html(OUTLINE_SELECTOR);
        }
        self.outline.as_ref()
    }
}

#[derive(Default)]
struct CursorState {
    follower: EasedFollower,
    elements: CursorElements,
}

fn place(element: &HtmlElement, point: Point) {
    dom::set_style(element, "left", &format!("{}px", point.x));
    dom::set_style(element, "top", &format!("{}px", point.y));
}

pub fn install() {
    let Some(win) = window() else {
        return;
    };
    let state = Rc::new(RefCell::new(CursorState::default()));

    {
        let state = state.clone();
        dom::listen::<MouseEvent, _>(&win, "mousemove", move |event| {
            let mut state = state.borrow_mut();
            let CursorState { follower, elements } = &mut *state;
            let pointer =
                follower.move_pointer(f64::from(event.client_x()), f64::from(event.client_y()));
            if let Some(dot) = elements.dot() {
                place(dot, pointer);
            }
        });
    }

    {
        let state = state.clone();
        dom::animation_loop(move |_| {
            let mut state = state.borrow_mut();
            let CursorState { follower, elements } = &mut *state;
            let outline = follower.step();
            if let Some(element) = elements.outline() {
                place(element, outline);
            }
            true
        });
    }

    bind_hovers(&state);
    bind_magnets();
}

fn bind_hovers(state: &Rc<RefCell<CursorState>>) {
    for element in dom::query_all(INTERACTIVE_SELECTOR) {
        let enter = state.clone();
        dom::listen::<Event, _>(&element, "mouseenter", move |_| {
            if let Some(outline) = enter.borrow_mut().elements.outline() {
                dom::add_class(outline, HOVER_CLASS);
            }
        });

        let leave = state.clone();
        dom::listen::<Event, _>(&element, "mouseleave", move |_| {
            if let Some(outline) = leave.borrow_mut().elements.outline() {
                dom::remove_class(outline, HOVER_CLASS);
            }
        });
    }
}

fn bind_magnets() {
    for magnet in dom::query_all(MAGNET_SELECTOR) {
        let target = magnet.clone();
        dom::listen::<MouseEvent, _>(&magnet, "mousemove", move |event| {
            let (dx, dy) = dom::bounding_rect(&target)
                .offset_from_center(f64::from(event.client_x()), f64::from(event.client_y()));
            dom::set_style(&target, "transform", &magnet_transform(dx, dy));
        });

        let target = magnet.clone();
        dom::listen::<Event, _>(&magnet, "mouseleave", move |_| {
            dom::set_style(&target, "transform", MAGNET_RESET);
        });
    }
}
