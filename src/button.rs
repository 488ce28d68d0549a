//! Button debouncing and press classification.
//!
//! Each physical button is polled once per fast tick (~10 ms). [`Debouncer`]
//! filters mechanical bounce by requiring the raw level to hold for two
//! consecutive ticks before a transition is reported; [`Button`] layers
//! press timing on top, classifying each press as short or long on release
//! and latching the result until the mode controller consumes it.

use crate::time::TimeInstant;
use crate::types::PressKind;

/// Trait for abstracting a digital input line.
///
/// Buttons are wired active-low with a pull-up: the line reads high while
/// released and low while held.
pub trait DigitalInput {
    /// Reads the instantaneous line level. `true` is high (released).
    fn is_high(&self) -> bool;
}

/// Debounced edge events, reported once per committed transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Debounced high-to-low transition: the button went down.
    Pressed,
    /// Debounced low-to-high transition: the button came up.
    Released,
}

/// Stable-count debouncer for one switch.
///
/// A raw level that differs from the debounced level must be observed on at
/// least 2 consecutive [`update`](Debouncer::update) calls before the
/// debounced level follows it; shorter excursions are discarded as bounce.
/// The `fell`/`rose` flags fire exactly once per committed transition and
/// are valid until the next update.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    debounced: bool,
    candidate: bool,
    stable_ticks: u8,
    fell: bool,
    rose: bool,
}

/// Consecutive matching raw samples required to commit a transition.
const STABLE_TICKS: u8 = 2;

impl Debouncer {
    /// Creates a debouncer settled at the given level (`true` = high).
    pub fn new(initial_level: bool) -> Self {
        Self {
            debounced: initial_level,
            candidate: initial_level,
            stable_ticks: 0,
            fell: false,
            rose: false,
        }
    }

    /// Consumes the latest raw sample. Call once per fast tick.
    pub fn update(&mut self, raw_level: bool) {
        self.fell = false;
        self.rose = false;

        if raw_level == self.debounced {
            // Settled; forget any partial excursion.
            self.candidate = raw_level;
            self.stable_ticks = 0;
            return;
        }

        if raw_level == self.candidate {
            self.stable_ticks += 1;
        } else {
            self.candidate = raw_level;
            self.stable_ticks = 1;
        }

        if self.stable_ticks >= STABLE_TICKS {
            self.debounced = raw_level;
            self.stable_ticks = 0;
            if raw_level {
                self.rose = true;
            } else {
                self.fell = true;
            }
        }
    }

    /// True exactly once after a committed high-to-low transition.
    pub fn fell(&self) -> bool {
        self.fell
    }

    /// True exactly once after a committed low-to-high transition.
    pub fn rose(&self) -> bool {
        self.rose
    }

    /// The current debounced level (`true` = high).
    pub fn level(&self) -> bool {
        self.debounced
    }
}

/// One debounced pushbutton with press-duration classification.
///
/// `poll` must be called every fast tick. On a debounced fall the press
/// start time is recorded; on the matching rise the press duration is
/// classified against the long-press threshold and latched. The latch holds
/// a single classification: a rapid second press before the latch is
/// consumed replaces the first.
pub struct Button<B: DigitalInput, I: TimeInstant> {
    input: B,
    debouncer: Debouncer,
    long_press_ms: u64,
    press_start: Option<I>,
    latched: Option<PressKind>,
}

impl<B: DigitalInput, I: TimeInstant> Button<B, I> {
    /// Wraps an input line, assuming the button starts released.
    pub fn new(input: B, long_press_ms: u64) -> Self {
        Self {
            input,
            debouncer: Debouncer::new(true),
            long_press_ms,
            press_start: None,
            latched: None,
        }
    }

    /// Samples and debounces the line. Call once per fast tick.
    ///
    /// Returns the debounced edge observed this tick, if any, so the caller
    /// can echo the press visually. A release with no recorded press start
    /// (possible if the button was held at power-up) is reported as an edge
    /// but produces no classification.
    pub fn poll(&mut self, now: I) -> Option<Edge> {
        self.debouncer.update(self.input.is_high());

        if self.debouncer.fell() {
            self.press_start = Some(now);
            return Some(Edge::Pressed);
        }

        if self.debouncer.rose() {
            if let Some(start) = self.press_start.take() {
                let duration = now.millis_since(start);
                self.latched = Some(if duration < self.long_press_ms {
                    PressKind::Short
                } else {
                    PressKind::Long
                });
            }
            return Some(Edge::Released);
        }

        None
    }

    /// Takes the latched press classification, if one is pending.
    pub fn take_press(&mut self) -> Option<PressKind> {
        self.latched.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use std::cell::Cell;
    use std::rc::Rc;

    // Mock instant counting milliseconds.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct TestInstant(u64);

    impl TimeInstant for TestInstant {
        fn millis_since(&self, earlier: Self) -> u64 {
            self.0 - earlier.0
        }
    }

    // Mock line whose level the test controls through a shared handle.
    #[derive(Clone)]
    struct TestLine(Rc<Cell<bool>>);

    impl TestLine {
        fn released() -> Self {
            TestLine(Rc::new(Cell::new(true)))
        }

        fn set_pressed(&self, pressed: bool) {
            self.0.set(!pressed);
        }
    }

    impl DigitalInput for TestLine {
        fn is_high(&self) -> bool {
            self.0.get()
        }
    }

    const LONG_PRESS_MS: u64 = 750;
    const TICK_MS: u64 = 10;

    /// Polls `button` for `ticks` fast ticks starting at `*t`, advancing
    /// `*t` by 10 ms per tick. Returns the last edge observed.
    fn run_ticks(
        button: &mut Button<TestLine, TestInstant>,
        t: &mut u64,
        ticks: u64,
    ) -> Option<Edge> {
        let mut last = None;
        for _ in 0..ticks {
            if let Some(edge) = button.poll(TestInstant(*t)) {
                last = Some(edge);
            }
            *t += TICK_MS;
        }
        last
    }

    #[test]
    fn single_tick_glitch_is_ignored() {
        let mut debouncer = Debouncer::new(true);
        debouncer.update(false);
        assert!(!debouncer.fell());
        debouncer.update(true);
        assert!(!debouncer.fell());
        assert!(debouncer.level());
    }

    #[test]
    fn transition_commits_after_two_stable_ticks() {
        let mut debouncer = Debouncer::new(true);
        debouncer.update(false);
        assert!(!debouncer.fell());
        debouncer.update(false);
        assert!(debouncer.fell());
        assert!(!debouncer.level());
        // One-shot: the flag clears on the next update.
        debouncer.update(false);
        assert!(!debouncer.fell());
    }

    #[test]
    fn bounce_during_transition_restarts_the_count() {
        let mut debouncer = Debouncer::new(true);
        debouncer.update(false);
        debouncer.update(true); // settles back, excursion forgotten
        debouncer.update(false);
        assert!(!debouncer.fell());
        debouncer.update(false);
        assert!(debouncer.fell());
    }

    #[test]
    fn half_second_press_classifies_short() {
        let line = TestLine::released();
        let mut button = Button::new(line.clone(), LONG_PRESS_MS);
        let mut t = 0;

        line.set_pressed(true);
        assert_eq!(run_ticks(&mut button, &mut t, 2), Some(Edge::Pressed));
        run_ticks(&mut button, &mut t, 48); // held
        line.set_pressed(false);
        assert_eq!(run_ticks(&mut button, &mut t, 2), Some(Edge::Released));

        // Fell committed at t=10, rose at t=510: 500 ms down.
        assert_eq!(button.take_press(), Some(PressKind::Short));
    }

    #[test]
    fn one_second_press_classifies_long() {
        let line = TestLine::released();
        let mut button = Button::new(line.clone(), LONG_PRESS_MS);
        let mut t = 0;

        line.set_pressed(true);
        run_ticks(&mut button, &mut t, 2);
        run_ticks(&mut button, &mut t, 98);
        line.set_pressed(false);
        run_ticks(&mut button, &mut t, 2);

        assert_eq!(button.take_press(), Some(PressKind::Long));
    }

    #[test]
    fn threshold_duration_classifies_long() {
        let line = TestLine::released();
        let mut button = Button::new(line.clone(), LONG_PRESS_MS);
        let mut t = 0;

        line.set_pressed(true);
        run_ticks(&mut button, &mut t, 2); // fell at t=10
        run_ticks(&mut button, &mut t, 73);
        line.set_pressed(false);
        run_ticks(&mut button, &mut t, 2); // rose at t=760: exactly 750 ms

        assert_eq!(button.take_press(), Some(PressKind::Long));
    }

    #[test]
    fn classification_is_consumed_exactly_once() {
        let line = TestLine::released();
        let mut button = Button::new(line.clone(), LONG_PRESS_MS);
        let mut t = 0;

        line.set_pressed(true);
        run_ticks(&mut button, &mut t, 2);
        line.set_pressed(false);
        run_ticks(&mut button, &mut t, 2);

        assert!(button.take_press().is_some());
        assert_eq!(button.take_press(), None);
    }

    #[test]
    fn newer_press_replaces_unconsumed_latch() {
        let line = TestLine::released();
        let mut button = Button::new(line.clone(), LONG_PRESS_MS);
        let mut t = 0;

        // Long press, never consumed.
        line.set_pressed(true);
        run_ticks(&mut button, &mut t, 2);
        run_ticks(&mut button, &mut t, 98);
        line.set_pressed(false);
        run_ticks(&mut button, &mut t, 2);

        // Quick second press before the slow tick reads the latch.
        line.set_pressed(true);
        run_ticks(&mut button, &mut t, 2);
        line.set_pressed(false);
        run_ticks(&mut button, &mut t, 2);

        assert_eq!(button.take_press(), Some(PressKind::Short));
        assert_eq!(button.take_press(), None);
    }

    #[test]
    fn release_without_press_start_produces_no_classification() {
        // Button held at power-up: the debouncer starts settled low, so the
        // release is the first edge ever seen and there is no press start.
        let held = TestLine::released();
        held.set_pressed(true);
        let mut held_button = Button::new(held.clone(), LONG_PRESS_MS);
        held_button.debouncer = Debouncer::new(false);
        held.set_pressed(false);
        let mut t2 = 0;
        assert_eq!(
            run_ticks(&mut held_button, &mut t2, 2),
            Some(Edge::Released)
        );
        assert_eq!(held_button.take_press(), None);
    }
}
