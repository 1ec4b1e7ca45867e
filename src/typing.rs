use crate::config::TypingTimings;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingFrame {
    pub text: String,
    pub next_delay_ms: u32,
}

/// Types and deletes a rotating list of words, one character per tick.
#[derive(Debug)]
pub struct TypingLoop {
    words: Vec<Vec<char>>,
    timings: TypingTimings,
    word_index: usize,
    offset: usize,
    deleting: bool,
}

impl TypingLoop {
    pub fn new(words: Vec<String>, timings: TypingTimings) -> Option<Self> {
        if words.is_empty() {
            return None;
        }

        Some(Self {
            words: words.iter().map(|word| word.chars().collect()).collect(),
            timings,
            word_index: 0,
            offset: 0,
            deleting: false,
        })
    }

    pub fn word_index(&self) -> usize {
        self.word_index
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn tick(&mut self) -> TypingFrame {
        let word = &self.words[self.word_index];

        if self.deleting {
            self.offset = self.offset.saturating_sub(1);
        } else if self.offset < word.len() {
            self.offset += 1;
        }
        let text: String = word[..self.offset].iter().collect();

        let next_delay_ms = if !self.deleting && self.offset == word.len() {
            self.deleting = true;
            self.timings.hold_ms
        } else if self.deleting && self.offset == 0 {
            self.deleting = false;
            self.word_index = (self.word_index + 1) % self.words.len();
            self.timings.pause_ms
        } else if self.deleting {
            self.timings.delete_ms
        } else {
            self.timings.type_ms
        };

        TypingFrame { text, next_delay_ms }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|word| word.to_string()).collect()
    }

    #[test]
    fn empty_word_list_disables_loop() {
        assert!(TypingLoop::new(Vec::new(), TypingTimings::default()).is_none());
    }

    #[test]
    fn types_holds_deletes_and_pauses() {
        let mut typing =
            TypingLoop::new(words(&["abc", "xy"]), TypingTimings::default()).expect("words exist");

        let frames: Vec<TypingFrame> = (0..7).map(|_| typing.tick()).collect();
        let texts: Vec<&str> = frames.iter().map(|frame| frame.text.as_str()).collect();
        let delays: Vec<u32> = frames.iter().map(|frame| frame.next_delay_ms).collect();

        assert_eq!(texts, vec!["a", "ab", "abc", "ab", "a", "", "x"]);
        assert_eq!(delays, vec![200, 200, 2_000, 100, 100, 500, 200]);
        assert_eq!(typing.word_index(), 1);
    }

    #[test]
    fn offset_stays_within_current_word() {
        let list = words(&["Java Enthusiast", "Problem Solver", "ü", ""]);
        let mut typing =
            TypingLoop::new(list.clone(), TypingTimings::default()).expect("words exist");

        for _ in 0..500 {
            let index = typing.word_index();
            let frame = typing.tick();
            let source: String = list[index].clone();

            assert!(frame.text.chars().count() <= source.chars().count());
            assert!(source.starts_with(&frame.text));
            assert!(typing.offset() <= typing.words[typing.word_index()].len());
        }
    }

    #[test]
    fn full_cycle_builds_next_word() {
        let list = words(&["one", "two", "three"]);
        let mut typing =
            TypingLoop::new(list.clone(), TypingTimings::default()).expect("words exist");

        for start in 0..list.len() {
            while typing.word_index() == start {
                typing.tick();
            }
            let next = (start + 1) % list.len();
            let frame = typing.tick();

            assert!(list[next].starts_with(&frame.text));
            assert_eq!(frame.text.chars().count(), 1);
        }
    }
}
