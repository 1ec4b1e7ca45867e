pub const FOLLOW_FACTOR: f64 = 0.15;
pub const MAGNET_STRENGTH: f64 = 0.3;

pub const INTERACTIVE_SELECTOR: &str =
    "a, button, .btn, .project-card-glass, .skill-card, .contact-card, .back-btn, .btn-github, .btn-demo";
pub const MAGNET_SELECTOR: &str = ".btn, .logo";

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A dot that tracks the pointer exactly and an outline that trails it.
#[derive(Clone, Copy, Debug, Default)]
pub struct EasedFollower {
    pointer: Point,
    outline: Point,
}

impl EasedFollower {
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    pub fn outline(&self) -> Point {
        self.outline
    }

    pub fn move_pointer(&mut self, x: f64, y: f64) -> Point {
        self.pointer = Point::new(x, y);
        self.pointer
    }

    /// Advances the outline one frame toward the pointer.
    pub fn step(&mut self) -> Point {
        self.outline.x += (self.pointer.x - self.outline.x) * FOLLOW_FACTOR;
        self.outline.y += (self.pointer.y - self.outline.y) * FOLLOW_FACTOR;
        self.outline
    }
}

pub fn magnet_transform(offset_x: f64, offset_y: f64) -> String {
    format!(
        "translate({}px, {}px) scale(1.05)",
        offset_x * MAGNET_STRENGTH,
        offset_y * MAGNET_STRENGTH
    )
}

pub const MAGNET_RESET: &str = "translate(0px, 0px) scale(1)";
