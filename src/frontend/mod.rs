mod ambient;
mod contact;
mod cursor;
mod dom;
mod effects;
mod intro;
mod navigation;
mod theme;

use crate::config;
use crate::telemetry::{self, log_event, LogLevel};

pub fn run() {
    telemetry::init(config::log_level());

    let Some(document) = dom::document() else {
        return;
    };

    intro::install();
    ambient::mount(&document);
    effects::install_reveal();
    effects::install_typing();
    cursor::install();
    effects::install_tilt();
    theme::install();
    navigation::install_tabs();
    navigation::install_fab();
    navigation::install_back_to_top();
    navigation::install_footer_links();
    contact::install();

    log_event(LogLevel::Debug, "page_effects_ready", serde_json::json!({}));
}
