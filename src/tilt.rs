pub const CARD_SELECTOR: &str =
    ".project-card-glass, .skill-card, .glass-card, .contact-card, .featured-card";
pub const MINI_CARD_SELECTOR: &str = ".mini-project-card, .social-pill";

pub const CARD_TILT_DIVISOR: f64 = 10.0;
pub const MINI_CARD_TILT_DIVISOR: f64 = 5.0;
pub const CARD_RESET: &str = "perspective(1000px) rotateX(0deg) rotateY(0deg) scale(1)";

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Strict containment; points on the edge are outside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x > self.left && x < self.right() && y > self.top && y < self.bottom()
    }

    /// Pointer offset from the rectangle's center.
    pub fn offset_from_center(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x - self.left - self.width / 2.0,
            y - self.top - self.height / 2.0,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

pub fn card_tilt(rect: &Rect, x: f64, y: f64) -> Tilt {
    let (dx, dy) = rect.offset_from_center(x, y);
    Tilt {
        rotate_x: dy / CARD_TILT_DIVISOR,
        rotate_y: -dx / CARD_TILT_DIVISOR,
    }
}

pub fn card_transform(tilt: Tilt) -> String {
    format!(
        "perspective(1000px) rotateX({}deg) rotateY({}deg) scale(1.02)",
        tilt.rotate_x, tilt.rotate_y
    )
}

/// Tilt for intro mini cards; only applies while the pointer is inside.
pub fn mini_card_transform(rect: &Rect, x: f64, y: f64) -> Option<String> {
    if !rect.contains(x, y) {
        return None;
    }

    let (dx, dy) = rect.offset_from_center(x, y);
    Some(format!(
        "perspective(1000px) rotateX({}deg) rotateY({}deg) scale(1.1)",
        -dy / MINI_CARD_TILT_DIVISOR,
        dx / MINI_CARD_TILT_DIVISOR
    ))
}
