//! Intro overlay sequencing.
//!
//! The sequencer is a state machine with one expected wake-up at a time.
//! The host schedules exactly one timer per [`Transition`] and feeds the
//! wake back in; anything that does not match the expectation is ignored,
//! which is how skip cancels the chain.

use crate::config::IntroTimings;

pub const SECTION_BASE_Z_INDEX: usize = 10;
pub const MAX_STACK_DEPTH: usize = 3;
pub const ORB_PARALLAX_FACTOR: f64 = 40.0;
pub const SECTION_TILT_DEGREES: f64 = 15.0;
pub const TITLE_CHAR_DELAY_SECONDS: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Accent {
    pub gradient: &'static str,
    pub glow: (u8, u8, u8),
}

impl Accent {
    pub fn overlay_background(&self) -> String {
        let (r, g, b) = self.glow;
        format!("radial-gradient(ellipse at center, rgba({r}, {g}, {b}, 0.15) 0%, #0a0a0f 100%)")
    }
}

pub const ACCENTS: [Accent; 5] = [
    Accent {
        gradient: "linear-gradient(135deg, #8b5cf6 0%, #ec4899 100%)",
        glow: (139, 92, 246),
    },
    Accent {
        gradient: "linear-gradient(135deg, #3b82f6 0%, #06b6d4 100%)",
        glow: (59, 130, 246),
    },
    Accent {
        gradient: "linear-gradient(135deg, #10b981 0%, #14b8a6 100%)",
        glow: (16, 185, 129),
    },
    Accent {
        gradient: "linear-gradient(135deg, #f59e0b 0%, #f97316 100%)",
        glow: (245, 158, 11),
    },
    Accent {
        gradient: "linear-gradient(135deg, #ec4899 0%, #8b5cf6 100%)",
        glow: (236, 72, 153),
    },
];

pub fn accent_for(index: usize) -> &'static Accent {
    &ACCENTS[index % ACCENTS.len()]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitStyle {
    Complete,
    Skip,
}

impl ExitStyle {
    pub fn style_properties(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Complete => &[
                ("transition", "all 1.5s cubic-bezier(0.23, 1, 0.32, 1)"),
                ("transform", "scale(1.2)"),
                ("opacity", "0"),
            ],
            Self::Skip => &[
                ("transition", "all 1s cubic-bezier(0.23, 1, 0.32, 1)"),
                ("transform", "scale(1.5) translateZ(1000px)"),
                ("opacity", "0"),
                ("filter", "blur(20px)"),
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wake {
    Advance,
    Activate,
    Finish,
    Hide,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schedule {
    pub after_ms: u32,
    pub wake: Wake,
}

#[derive(Clone, Debug, PartialEq)]
pub enum IntroCommand {
    ResetProgress,
    Stack { index: usize, depth: usize },
    Reveal { index: usize, z_index: usize },
    Accent { index: usize, accent: &'static Accent },
    Activate { index: usize },
    TrackProgress { index: usize },
    Exit(ExitStyle),
    Hide,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transition {
    pub commands: Vec<IntroCommand>,
    pub next: Option<Schedule>,
}

impl Transition {
    fn idle() -> Self {
        Self::default()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Pending,
    Showing { index: usize },
    Exiting(ExitStyle),
    Hidden,
}

#[derive(Debug)]
pub struct IntroSequencer {
    total: usize,
    timings: IntroTimings,
    phase: Phase,
    expecting: Option<Wake>,
    skipped: bool,
}

impl IntroSequencer {
    /// Returns `None` when there is nothing to show.
    pub fn new(total: usize, timings: IntroTimings) -> Option<Self> {
        (total > 0).then_some(Self {
            total,
            timings,
            phase: Phase::Pending,
            expecting: None,
            skipped: false,
        })
    }

    pub fn timings(&self) -> IntroTimings {
        self.timings
    }

    pub fn is_skipped(&self) -> bool {
        self.skipped
    }

    pub fn is_hidden(&self) -> bool {
        self.phase == Phase::Hidden
    }

    /// Pointer effects only run while the overlay is still in play.
    pub fn accepts_pointer(&self) -> bool {
        !self.skipped && self.phase != Phase::Hidden
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            Phase::Showing { index } => Some(index),
            _ => None,
        }
    }

    pub fn start(&mut self) -> Transition {
        if self.phase != Phase::Pending || self.expecting.is_some() {
            return Transition::idle();
        }

        self.await_wake(self.timings.start_delay_ms, Wake::Advance, Vec::new())
    }

    pub fn wake(&mut self, wake: Wake) -> Transition {
        if self.expecting != Some(wake) {
            return Transition::idle();
        }
        self.expecting = None;

        match wake {
            Wake::Advance => self.advance(),
            Wake::Activate => self.activate(),
            Wake::Finish => {
                self.phase = Phase::Exiting(ExitStyle::Complete);
                self.await_wake(
                    self.timings.exit_ms,
                    Wake::Hide,
                    vec![IntroCommand::Exit(ExitStyle::Complete)],
                )
            }
            Wake::Hide => {
                self.phase = Phase::Hidden;
                Transition {
                    commands: vec![IntroCommand::Hide],
                    next: None,
                }
            }
        }
    }

    pub fn skip(&mut self) -> Transition {
        // A running natural exit is cut short; a fast exit already in flight is left alone.
        if self.skipped || matches!(self.phase, Phase::Exiting(ExitStyle::Skip) | Phase::Hidden) {
            return Transition::idle();
        }

        self.skipped = true;
        self.phase = Phase::Exiting(ExitStyle::Skip);
        self.await_wake(
            self.timings.skip_exit_ms,
            Wake::Hide,
            vec![IntroCommand::Exit(ExitStyle::Skip)],
        )
    }

    /// Progress percentage for `index` after `elapsed_ms` of its window, or
    /// `None` once that window is no longer live.
    pub fn progress(&self, index: usize, elapsed_ms: f64) -> Option<f64> {
        if self.skipped || self.current_index() != Some(index) {
            return None;
        }

        Some(progress_percent(elapsed_ms, self.timings.section_ms))
    }

    fn advance(&mut self) -> Transition {
        let index = match self.phase {
            Phase::Pending => 0,
            Phase::Showing { index } => index + 1,
            _ => return Transition::idle(),
        };
        if index >= self.total {
            return Transition::idle();
        }
        self.phase = Phase::Showing { index };

        let mut commands = vec![IntroCommand::ResetProgress];
        commands.extend((0..index).map(|earlier| IntroCommand::Stack {
            index: earlier,
            depth: (index - earlier).min(MAX_STACK_DEPTH),
        }));
        commands.push(IntroCommand::Reveal {
            index,
            z_index: SECTION_BASE_Z_INDEX + index,
        });
        commands.push(IntroCommand::Accent {
            index,
            accent: accent_for(index),
        });

        self.await_wake(self.timings.activation_delay_ms, Wake::Activate, commands)
    }

    fn activate(&mut self) -> Transition {
        let Phase::Showing { index } = self.phase else {
            return Transition::idle();
        };
        let commands = vec![
            IntroCommand::Activate { index },
            IntroCommand::TrackProgress { index },
        ];
        let activation = self.timings.activation_delay_ms;

        if index + 1 < self.total {
            let hold = (self.timings.section_ms + self.timings.gap_ms).saturating_sub(activation);
            self.await_wake(hold, Wake::Advance, commands)
        } else {
            let hold = self.timings.section_ms.saturating_sub(activation);
            self.await_wake(hold, Wake::Finish, commands)
        }
    }

    fn await_wake(
        &mut self,
        after_ms: u32,
        wake: Wake,
        commands: Vec<IntroCommand>,
    ) -> Transition {
        self.expecting = Some(wake);
        Transition {
            commands,
            next: Some(Schedule { after_ms, wake }),
        }
    }
}

pub fn progress_percent(elapsed_ms: f64, section_ms: u32) -> f64 {
    if section_ms == 0 {
        return 100.0;
    }

    (elapsed_ms.max(0.0) / f64::from(section_ms) * 100.0).min(100.0)
}

pub fn stack_class(depth: usize) -> &'static str {
    match depth {
        0 | 1 => "stack-under-1",
        2 => "stack-under-2",
        _ => "stack-under-3",
    }
}

/// Pointer offset from the viewport center as fractions in [-0.5, 0.5].
pub fn pointer_offset(client_x: f64, client_y: f64, viewport: (f64, f64)) -> (f64, f64) {
    let (width, height) = viewport;
    if width <= 0.0 || height <= 0.0 {
        return (0.0, 0.0);
    }

    (client_x / width - 0.5, client_y / height - 0.5)
}

pub fn orb_translation(offset: (f64, f64), orb_index: usize) -> String {
    let factor = (orb_index + 1) as f64 * ORB_PARALLAX_FACTOR;
    format!("translate({}px, {}px)", offset.0 * factor, offset.1 * factor)
}

pub fn active_section_transform(offset: (f64, f64)) -> String {
    format!(
        "translate(-50%, -50%) scale(1) rotateX({}deg) rotateY({}deg)",
        -offset.1 * SECTION_TILT_DEGREES,
        offset.0 * SECTION_TILT_DEGREES
    )
}

#[derive(Clone, Debug, PartialEq)]
pub struct TitleChar {
    pub text: String,
    pub delay_seconds: f64,
}

/// Splits a title into per-character spans, keeping spaces visible.
pub fn split_title(text: &str) -> Vec<TitleChar> {
    text.trim()
        .chars()
        .enumerate()
        .map(|(position, character)| TitleChar {
            text: if character == ' ' {
                '\u{00A0}'.to_string()
            } else {
                character.to_string()
            },
            delay_seconds: position as f64 * TITLE_CHAR_DELAY_SECONDS,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(sequencer: &mut IntroSequencer) -> Vec<IntroCommand> {
        let mut commands = Vec::new();
        let mut transition = sequencer.start();

        while let Some(next) = transition.next {
            commands.extend(transition.commands);
            transition = sequencer.wake(next.wake);
        }
        commands.extend(transition.commands);
        commands
    }

    fn revealed(commands: &[IntroCommand]) -> Vec<usize> {
        commands
            .iter()
            .filter_map(|command| match command {
                IntroCommand::Reveal { index, .. } => Some(*index),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn empty_intro_is_not_constructed() {
        assert!(IntroSequencer::new(0, IntroTimings::default()).is_none());
    }

    #[test]
    fn every_section_is_revealed_once_in_order_before_hide() {
        for total in 1..=7 {
            let mut sequencer =
                IntroSequencer::new(total, IntroTimings::default()).expect("sections exist");
            let commands = run_to_end(&mut sequencer);

            assert_eq!(revealed(&commands), (0..total).collect::<Vec<_>>());
            assert_eq!(commands.last(), Some(&IntroCommand::Hide));
            assert!(sequencer.is_hidden());
            assert!(!sequencer.is_skipped());
        }
    }

    #[test]
    fn natural_run_uses_complete_exit() {
        let mut sequencer =
            IntroSequencer::new(2, IntroTimings::default()).expect("sections exist");
        let commands = run_to_end(&mut sequencer);

        assert!(commands.contains(&IntroCommand::Exit(ExitStyle::Complete)));
        assert!(!commands.contains(&IntroCommand::Exit(ExitStyle::Skip)));
    }

    #[test]
    fn schedule_follows_section_timing() {
        let timings = IntroTimings::default();
        let mut sequencer = IntroSequencer::new(2, timings).expect("sections exist");

        let start = sequencer.start().next.expect("start schedules advance");
        assert_eq!(start, Schedule { after_ms: 100, wake: Wake::Advance });

        let reveal = sequencer.wake(Wake::Advance).next.expect("reveal schedules activation");
        assert_eq!(reveal, Schedule { after_ms: 50, wake: Wake::Activate });

        let hold = sequencer.wake(Wake::Activate).next.expect("activation schedules advance");
        assert_eq!(hold, Schedule { after_ms: 1_650, wake: Wake::Advance });

        sequencer.wake(Wake::Advance);
        let last = sequencer.wake(Wake::Activate).next.expect("last section schedules finish");
        assert_eq!(last, Schedule { after_ms: 1_150, wake: Wake::Finish });

        let exit = sequencer.wake(Wake::Finish).next.expect("finish schedules hide");
        assert_eq!(exit, Schedule { after_ms: 1_500, wake: Wake::Hide });
    }

    #[test]
    fn earlier_sections_are_stacked_by_depth() {
        let mut sequencer =
            IntroSequencer::new(5, IntroTimings::default()).expect("sections exist");
        sequencer.start();
        for _ in 0..4 {
            sequencer.wake(Wake::Advance);
            sequencer.wake(Wake::Activate);
        }
        let transition = sequencer.wake(Wake::Advance);

        let stacks: Vec<(usize, usize)> = transition
            .commands
            .iter()
            .filter_map(|command| match command {
                IntroCommand::Stack { index, depth } => Some((*index, *depth)),
                _ => None,
            })
            .collect();
        assert_eq!(stacks, vec![(0, 3), (1, 3), (2, 2), (3, 1)]);
        assert_eq!(transition.commands.first(), Some(&IntroCommand::ResetProgress));
        assert!(transition.commands.contains(&IntroCommand::Reveal { index: 4, z_index: 14 }));
    }

    #[test]
    fn accent_cycles_through_palette() {
        assert_eq!(accent_for(0), &ACCENTS[0]);
        assert_eq!(accent_for(5), &ACCENTS[0]);
        assert_eq!(accent_for(7), &ACCENTS[2]);
        assert_eq!(
            ACCENTS[1].overlay_background(),
            "radial-gradient(ellipse at center, rgba(59, 130, 246, 0.15) 0%, #0a0a0f 100%)"
        );
    }

    #[test]
    fn skip_stops_further_reveals_at_any_point() {
        let total = 4;
        let mut steps = 0;

        loop {
            let mut sequencer =
                IntroSequencer::new(total, IntroTimings::default()).expect("sections exist");
            let mut transition = sequencer.start();
            for _ in 0..steps {
                match transition.next {
                    Some(next) => transition = sequencer.wake(next.wake),
                    None => break,
                }
            }
            let pending = transition.next;
            if sequencer.is_hidden() {
                break;
            }

            let skip = sequencer.skip();
            assert_eq!(skip.commands, vec![IntroCommand::Exit(ExitStyle::Skip)]);
            assert_eq!(
                skip.next,
                Some(Schedule { after_ms: 1_000, wake: Wake::Hide }),
                "hide is scheduled within the fast exit"
            );

            if let Some(stale) = pending {
                if stale.wake != Wake::Hide {
                    assert_eq!(sequencer.wake(stale.wake), Transition::default());
                }
            }
            let hide = sequencer.wake(Wake::Hide);
            assert_eq!(hide.commands, vec![IntroCommand::Hide]);
            assert!(revealed(&hide.commands).is_empty());
            assert!(sequencer.is_hidden());

            steps += 1;
        }

        assert!(steps > total, "skip was exercised across the whole sequence");
    }

    #[test]
    fn skip_is_idempotent() {
        let mut sequencer =
            IntroSequencer::new(3, IntroTimings::default()).expect("sections exist");
        sequencer.start();
        sequencer.wake(Wake::Advance);

        assert!(sequencer.skip().next.is_some());
        assert_eq!(sequencer.skip(), Transition::default());
        assert!(!sequencer.accepts_pointer());
    }

    #[test]
    fn skip_during_natural_exit_hides_within_fast_exit() {
        let timings = IntroTimings::default();
        let mut sequencer = IntroSequencer::new(1, timings).expect("sections exist");
        sequencer.start();
        sequencer.wake(Wake::Advance);
        sequencer.wake(Wake::Activate);
        let natural = sequencer.wake(Wake::Finish).next.expect("finish schedules hide");
        assert_eq!(natural.after_ms, timings.exit_ms);

        let skip = sequencer.skip();
        assert_eq!(skip.commands, vec![IntroCommand::Exit(ExitStyle::Skip)]);
        let hide = skip.next.expect("skip reschedules hide");
        assert_eq!(hide.wake, Wake::Hide);
        assert!(hide.after_ms <= timings.skip_exit_ms);
        assert!(sequencer.is_skipped());

        assert_eq!(sequencer.skip(), Transition::default());
        assert_eq!(sequencer.wake(Wake::Hide).commands, vec![IntroCommand::Hide]);
        assert!(sequencer.is_hidden());
        assert_eq!(sequencer.skip(), Transition::default());
    }

    #[test]
    fn progress_is_monotonic_and_resets_per_section() {
        let mut sequencer =
            IntroSequencer::new(2, IntroTimings::default()).expect("sections exist");
        sequencer.start();
        sequencer.wake(Wake::Advance);
        sequencer.wake(Wake::Activate);

        let mut last = -1.0;
        for frame in 0..90 {
            let value = sequencer
                .progress(0, f64::from(frame) * 16.0)
                .expect("first section is live");
            assert!(value >= last);
            assert!((0.0..=100.0).contains(&value));
            last = value;
        }
        assert_eq!(last, 100.0);

        sequencer.wake(Wake::Advance);
        assert_eq!(sequencer.progress(0, 100.0), None, "old window stops updating");
        assert_eq!(sequencer.progress(1, 0.0), Some(0.0));
    }

    #[test]
    fn progress_stops_after_skip() {
        let mut sequencer =
            IntroSequencer::new(2, IntroTimings::default()).expect("sections exist");
        sequencer.start();
        sequencer.wake(Wake::Advance);
        sequencer.wake(Wake::Activate);
        assert!(sequencer.progress(0, 300.0).is_some());

        sequencer.skip();
        assert_eq!(sequencer.progress(0, 400.0), None);
    }

    #[test]
    fn stack_classes_cap_at_three() {
        assert_eq!(stack_class(1), "stack-under-1");
        assert_eq!(stack_class(2), "stack-under-2");
        assert_eq!(stack_class(9), "stack-under-3");
    }

    #[test]
    fn parallax_scales_with_orb_index() {
        let offset = pointer_offset(960.0, 270.0, (1_280.0, 720.0));
        assert_eq!(offset, (0.25, -0.125));
        assert_eq!(orb_translation(offset, 0), "translate(10px, -5px)");
        assert_eq!(orb_translation(offset, 1), "translate(20px, -10px)");
        assert_eq!(pointer_offset(10.0, 10.0, (0.0, 720.0)), (0.0, 0.0));
    }

    #[test]
    fn title_split_keeps_spaces_and_staggers() {
        let chars = split_title(" Hi there ");

        assert_eq!(chars.len(), 8);
        assert_eq!(chars[2].text, "\u{00A0}");
        assert_eq!(chars[0].delay_seconds, 0.0);
        assert!((chars[3].delay_seconds - 0.15).abs() < 1e-9);
    }
}
