pub const PARTICLE_COUNT: usize = 15;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub size_px: f64,
    pub left_percent: f64,
    pub duration_seconds: f64,
    pub delay_seconds: f64,
}

impl Particle {
    /// Draws one particle from four unit-interval samples.
    pub fn from_samples(mut sample: impl FnMut() -> f64) -> Self {
        Self {
            size_px: unit(sample()) * 20.0 + 10.0,
            left_percent: unit(sample()) * 100.0,
            duration_seconds: unit(sample()) * 15.0 + 10.0,
            delay_seconds: unit(sample()) * 5.0,
        }
    }

    pub fn style(&self) -> String {
        format!(
            "width: {size}px; height: {size}px; left: {left}%; top: 100%; animation-duration: {duration}s; animation-delay: {delay}s;",
            size = self.size_px,
            left = self.left_percent,
            duration = self.duration_seconds,
            delay = self.delay_seconds,
        )
    }
}

pub fn generate(count: usize, mut sample: impl FnMut() -> f64) -> Vec<Particle> {
    (0..count).map(|_| Particle::from_samples(&mut sample)).collect()
}

fn unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
