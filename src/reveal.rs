pub const REVEAL_SELECTOR: &str = ".hidden";
pub const REVEAL_CLASS: &str = "show";
pub const REVEAL_THRESHOLD: f64 = 0.1;
// Browsers report ratios just under the threshold they fired for.
const RATIO_TOLERANCE: f64 = 1e-3;

/// Tracks which watched elements have been revealed. Reveals are one-way.
#[derive(Debug)]
pub struct RevealTracker {
    revealed: Vec<bool>,
}

impl RevealTracker {
    pub fn new(count: usize) -> Self {
        Self {
            revealed: vec![false; count],
        }
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|revealed| **revealed).count()
    }

    /// Records an intersection report. Returns `true` only the first time
    /// the element crosses the threshold; the caller then marks it and stops
    /// observing it.
    pub fn observe(&mut self, index: usize, intersecting: bool, ratio: f64) -> bool {
        let Some(slot) = self.revealed.get_mut(index) else {
            return false;
        };
        if *slot || !intersecting || ratio + RATIO_TOLERANCE < REVEAL_THRESHOLD {
            return false;
        }

        *slot = true;
        true
    }
}
