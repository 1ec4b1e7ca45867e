pub const NAVBAR_SCROLLED_AFTER_PX: f64 = 50.0;
pub const BACK_TO_TOP_AFTER_PX: f64 = 500.0;

pub fn navbar_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAVBAR_SCROLLED_AFTER_PX
}

pub fn back_to_top_visible(scroll_y: f64) -> bool {
    scroll_y > BACK_TO_TOP_AFTER_PX
}

/// Share of the document scrolled, in percent. Pages that do not scroll
/// report zero.
pub fn page_progress(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if scrollable <= 0.0 {
        return 0.0;
    }

    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollChrome {
    pub navbar_scrolled: bool,
    pub back_to_top_visible: bool,
    pub progress_percent: f64,
}

impl ScrollChrome {
    pub fn measure(scroll_y: f64, scroll_top: f64, scroll_height: f64, client_height: f64) -> Self {
        Self {
            navbar_scrolled: navbar_scrolled(scroll_y),
            back_to_top_visible: back_to_top_visible(scroll_y),
            progress_percent: page_progress(scroll_top, scroll_height, client_height),
        }
    }
}
