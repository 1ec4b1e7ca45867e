use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{window, Element, Event, Node, ScrollBehavior, ScrollIntoViewOptions, ScrollToOptions};

use super::dom;
use crate::fab::{FabMenu, FAB_BUTTON_ID, FAB_MENU_ID};
use crate::tabs::{select_tab, PANE_SELECTOR, TAB_LANG_ATTRIBUTE, TAB_SELECTOR};

pub const BACK_TO_TOP_ID: &str = "back-to-top";
const FOOTER_LINK_SELECTOR: &str = ".footer-links a";
const ACTIVE_CLASS: &str = "active";

pub fn install_tabs() {
    let tabs = dom::query_all(TAB_SELECTOR);
    if tabs.is_empty() {
        return;
    }
    let langs: Vec<Option<String>> = tabs
        .iter()
        .map(|tab| tab.get_attribute(TAB_LANG_ATTRIBUTE))
        .collect();

    for (position, tab) in tabs.iter().enumerate() {
        let tabs = tabs.clone();
        let langs = langs.clone();
        dom::listen::<Event, _>(tab, "click", move |_| {
            let Some(selection) = select_tab(&langs, position) else {
                return;
            };

            for tab in &tabs {
                dom::remove_class(tab, ACTIVE_CLASS);
            }
            for pane in dom::query_all(PANE_SELECTOR) {
                dom::remove_class(&pane, ACTIVE_CLASS);
            }

            if let Some(tab) = tabs.get(selection.active_tab) {
                dom::add_class(tab, ACTIVE_CLASS);
            }
            if let Some(pane) = selection.pane_id.as_deref().and_then(dom::by_id) {
                dom::add_class(&pane, ACTIVE_CLASS);
            }
        });
    }
}

fn render_fab(button: &Element, menu: &Element, state: FabMenu) {
    dom::set_class(button, ACTIVE_CLASS, state.is_open());
    dom::set_class(menu, ACTIVE_CLASS, state.is_open());

    if let Some(icon) = dom::query_within(button, "i") {
        let (add, remove) = state.icon_swap();
        dom::remove_class(&icon, remove);
        dom::add_class(&icon, add);
    }
}

pub fn install_fab() {
    let (Some(button), Some(menu)) = (dom::by_id(FAB_BUTTON_ID), dom::by_id(FAB_MENU_ID)) else {
        return;
    };
    let state = Rc::new(Cell::new(FabMenu::default()));

    {
        let state = state.clone();
        let (target, menu) = (button.clone(), menu.clone());
        dom::listen::<Event, _>(&button, "click", move |_| {
            let mut next = state.get();
            next.toggle();
            state.set(next);
            render_fab(&target, &menu, next);
        });
    }

    if let Some(document) = dom::document() {
        dom::listen::<Event, _>(&document, "click", move |event| {
            let target = event.target().and_then(|target| target.dyn_into::<Node>().ok());
            let inside = button.contains(target.as_ref()) || menu.contains(target.as_ref());

            let mut next = state.get();
            if next.click_outside(inside) {
                state.set(next);
                render_fab(&button, &menu, next);
            }
        });
    }
}

pub fn install_back_to_top() {
    let Some(button) = dom::by_id(BACK_TO_TOP_ID) else {
        return;
    };

    dom::listen::<Event, _>(&button, "click", |_| {
        if let Some(win) = window() {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Smooth);
            win.scroll_to_with_scroll_to_options(&options);
        }
    });
}

pub fn install_footer_links() {
    for anchor in dom::query_all(FOOTER_LINK_SELECTOR) {
        let link = anchor.clone();
        dom::listen::<Event, _>(&anchor, "click", move |event| {
            let Some(target) = link
                .get_attribute("href")
                .filter(|href| href.starts_with('#') && href.len() > 1)
                .and_then(|href| dom::query(&href))
            else {
                return;
            };

            event.prevent_default();
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        });
    }
}
