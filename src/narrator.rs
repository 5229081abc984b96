//! Philosophy narrator: pointer input -> ripple cycle -> quote rotation
//!
//! A small state machine around the wave simulator. One accepted pointer
//! event runs `Idle -> Animating -> SwapDelay -> TextOut -> TextIn -> Idle`;
//! input arriving anywhere past `Idle` is dropped, never queued. A fail-safe
//! tick counter bounds the lockout if the completion signal never arrives.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec2;

use crate::sim::WaveSimulator;

/// Pause between the wave set draining and the text leaving (UX pacing)
pub const SWAP_DELAY_TICKS: u32 = 31;
/// Leave animation length (0.5 s at the nominal delta)
pub const TEXT_OUT_TICKS: u32 = 31;
/// Enter animation length (0.7 s)
pub const TEXT_IN_TICKS: u32 = 44;
/// Reduced-motion acknowledgment dot lifetime (0.3 s)
pub const INDICATOR_TICKS: u32 = 19;

/// Upper bound on one wave's lifetime in ticks (life decays 0.25/s at the
/// nominal delta)
const MAX_WAVE_TICKS: u32 = 250;
/// Forced return to Idle when the completion signal is withheld: worst-case
/// wave lifetime plus the full text transition plus ~2 s of slack
pub const FAILSAFE_TICKS: u32 =
    MAX_WAVE_TICKS + SWAP_DELAY_TICKS + TEXT_OUT_TICKS + TEXT_IN_TICKS + 120;

/// External display collaborator: the text-bearing element plus the
/// reduced-motion acknowledgment dot.
pub trait QuoteDisplay {
    /// Replace the displayed string immediately, no animation.
    fn show_quote(&mut self, text: &str);
    /// Start the leave animation on the current quote.
    fn begin_exit(&mut self);
    /// Swap the displayed string to `text` and start the enter animation.
    fn begin_entry(&mut self, text: &str);
    /// Show the static acknowledgment dot at a surface-local position.
    fn show_indicator(&mut self, pos: Vec2);
    fn hide_indicator(&mut self);
}

/// Transition phases. `busy` is derived: anything but `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarratorPhase {
    Idle,
    /// Waves in flight; the simulator is ticked from here
    Animating,
    /// Cycle finished, waiting out the pacing delay
    SwapDelay,
    /// Current quote animating out
    TextOut,
    /// Next quote animating in
    TextIn,
}

/// Binds pointer input to the wave simulator and a rotating quote display.
pub struct PhilosophyNarrator<D: QuoteDisplay> {
    sim: WaveSimulator,
    display: D,
    quotes: Vec<String>,
    current_index: usize,
    pending_index: usize,
    phase: NarratorPhase,
    phase_ticks: u32,
    failsafe_ticks: u32,
    indicator_ticks: u32,
    reduced_motion: bool,
    cycle_done: Rc<Cell<bool>>,
}

impl<D: QuoteDisplay> PhilosophyNarrator<D> {
    /// Wire the narrator to a simulator and display. The completion listener
    /// is registered here, before any trigger can run.
    pub fn new(mut sim: WaveSimulator, mut display: D, quotes: Vec<String>, reduced_motion: bool) -> Self {
        let cycle_done = Rc::new(Cell::new(false));
        let flag = Rc::clone(&cycle_done);
        sim.set_cycle_listener(Box::new(move || flag.set(true)));

        if let Some(first) = quotes.first() {
            display.show_quote(first);
        }

        Self {
            sim,
            display,
            quotes,
            current_index: 0,
            pending_index: 0,
            phase: NarratorPhase::Idle,
            phase_ticks: 0,
            failsafe_ticks: 0,
            indicator_ticks: 0,
            reduced_motion,
            cycle_done,
        }
    }

    /// Accept or drop a pointer event at surface-local coordinates.
    pub fn pointer_event(&mut self, pos: Vec2) {
        if self.is_busy() {
            log::trace!("pointer dropped: transition in progress");
            return;
        }

        if self.reduced_motion {
            // No waves, no multi-step animation: acknowledge and swap at once
            self.display.show_indicator(pos);
            self.indicator_ticks = INDICATOR_TICKS;
            self.advance_quote_now();
            return;
        }

        if self.sim.trigger(pos.x, pos.y) {
            self.phase = NarratorPhase::Animating;
            self.failsafe_ticks = FAILSAFE_TICKS;
        }
    }

    /// Advance one frame: the simulator while animating, then the text
    /// transition counters.
    pub fn tick(&mut self) {
        if self.indicator_ticks > 0 {
            self.indicator_ticks -= 1;
            if self.indicator_ticks == 0 {
                self.display.hide_indicator();
            }
        }

        match self.phase {
            NarratorPhase::Idle => {}
            NarratorPhase::Animating => {
                self.sim.tick();
                if self.cycle_done.replace(false) {
                    if self.quotes.is_empty() {
                        self.finish();
                    } else {
                        self.phase = NarratorPhase::SwapDelay;
                        self.phase_ticks = SWAP_DELAY_TICKS;
                    }
                }
            }
            NarratorPhase::SwapDelay => {
                self.phase_ticks -= 1;
                if self.phase_ticks == 0 {
                    self.display.begin_exit();
                    self.phase = NarratorPhase::TextOut;
                    self.phase_ticks = TEXT_OUT_TICKS;
                }
            }
            NarratorPhase::TextOut => {
                self.phase_ticks -= 1;
                if self.phase_ticks == 0 {
                    self.pending_index = (self.current_index + 1) % self.quotes.len();
                    self.display.begin_entry(&self.quotes[self.pending_index]);
                    self.phase = NarratorPhase::TextIn;
                    self.phase_ticks = TEXT_IN_TICKS;
                }
            }
            NarratorPhase::TextIn => {
                self.phase_ticks -= 1;
                if self.phase_ticks == 0 {
                    self.current_index = self.pending_index;
                    self.finish();
                }
            }
        }

        if self.phase != NarratorPhase::Idle && self.failsafe_ticks > 0 {
            self.failsafe_ticks -= 1;
            if self.failsafe_ticks == 0 {
                log::warn!("philosophy transition fail-safe fired, resetting");
                self.force_idle();
            }
        }
    }

    /// Whether the narrator needs further frames (transition or indicator).
    pub fn active(&self) -> bool {
        self.is_busy() || self.indicator_ticks > 0
    }

    /// True strictly between pointer accept and transition completion.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.phase != NarratorPhase::Idle
    }

    pub fn phase(&self) -> NarratorPhase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_quote(&self) -> Option<&str> {
        self.quotes.get(self.current_index).map(String::as_str)
    }

    pub fn simulator(&self) -> &WaveSimulator {
        &self.sim
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Forward a surface resize to the simulator.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.sim.resize(width, height);
    }

    fn finish(&mut self) {
        self.phase = NarratorPhase::Idle;
        self.phase_ticks = 0;
        self.failsafe_ticks = 0;
    }

    /// Fail-safe landing: empty the wave set, drop any half-done transition,
    /// and put the current quote back so the display never sticks mid-swap.
    fn force_idle(&mut self) {
        self.sim.reset();
        self.cycle_done.set(false);
        if let Some(quote) = self.quotes.get(self.current_index) {
            self.display.show_quote(quote);
        }
        self.finish();
    }

    /// Reduced-motion path: swap text and advance the index in one step.
    fn advance_quote_now(&mut self) {
        if self.quotes.is_empty() {
            return;
        }
        self.current_index = (self.current_index + 1) % self.quotes.len();
        self.display.show_quote(&self.quotes[self.current_index]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{WaveSimulator, WaveTuning};

    #[derive(Default)]
    struct RecordingDisplay {
        shown: Vec<String>,
        exits: u32,
        entries: Vec<String>,
        indicators: Vec<Vec2>,
        indicator_hides: u32,
    }

    impl QuoteDisplay for RecordingDisplay {
        fn show_quote(&mut self, text: &str) {
            self.shown.push(text.to_string());
        }
        fn begin_exit(&mut self) {
            self.exits += 1;
        }
        fn begin_entry(&mut self, text: &str) {
            self.entries.push(text.to_string());
        }
        fn show_indicator(&mut self, pos: Vec2) {
            self.indicators.push(pos);
        }
        fn hide_indicator(&mut self) {
            self.indicator_hides += 1;
        }
    }

    fn quotes(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Quote {i}.")).collect()
    }

    fn narrator(n_quotes: usize) -> PhilosophyNarrator<RecordingDisplay> {
        let sim = WaveSimulator::new(400.0, 300.0, 42);
        PhilosophyNarrator::new(sim, RecordingDisplay::default(), quotes(n_quotes), false)
    }

    fn run_full_cycle(narrator: &mut PhilosophyNarrator<RecordingDisplay>) {
        narrator.pointer_event(Vec2::new(100.0, 50.0));
        assert!(narrator.is_busy());
        let mut guard = 0u32;
        while narrator.is_busy() {
            narrator.tick();
            guard += 1;
            assert!(guard < FAILSAFE_TICKS, "cycle did not finish naturally");
        }
    }

    #[test]
    fn test_initial_display_matches_index() {
        let n = narrator(3);
        assert_eq!(n.current_index(), 0);
        assert_eq!(n.display().shown, vec!["Quote 0.".to_string()]);
        assert_eq!(n.current_quote(), Some("Quote 0."));
    }

    #[test]
    fn test_rotation_is_total_cyclic_order() {
        let mut n = narrator(3);
        for expected in [1usize, 2, 0] {
            run_full_cycle(&mut n);
            assert_eq!(n.current_index(), expected);
            // The entering text is always the quote the index lands on
            assert_eq!(n.display().entries.last().unwrap(), &format!("Quote {expected}."));
        }
        assert_eq!(n.current_index(), 0);
        assert_eq!(n.display().exits, 3);
    }

    #[test]
    fn test_busy_rejects_pointer_input() {
        let mut n = narrator(3);
        n.pointer_event(Vec2::new(100.0, 50.0));
        assert_eq!(n.simulator().waves().len(), 1);

        // During wave animation
        n.tick();
        n.pointer_event(Vec2::new(300.0, 200.0));
        assert_eq!(n.simulator().waves().len(), 1);

        // During the text transition
        while n.phase() != NarratorPhase::TextIn {
            n.tick();
        }
        n.pointer_event(Vec2::new(300.0, 200.0));
        assert!(n.simulator().waves().is_empty());
        assert_eq!(n.display().entries.len(), 1);
    }

    #[test]
    fn test_reduced_motion_swaps_without_waves() {
        let sim = WaveSimulator::new(400.0, 300.0, 42);
        let mut n = PhilosophyNarrator::new(sim, RecordingDisplay::default(), quotes(3), true);

        n.pointer_event(Vec2::new(100.0, 50.0));
        assert!(n.simulator().waves().is_empty());
        assert!(!n.simulator().is_animating());
        assert_eq!(n.current_index(), 1);
        assert_eq!(n.display().indicators, vec![Vec2::new(100.0, 50.0)]);
        assert_eq!(n.display().entries.len(), 0);
        assert_eq!(n.display().exits, 0);
        // Initial show plus exactly one swap
        assert_eq!(n.display().shown.len(), 2);

        // The dot goes away on its own
        assert!(n.active());
        for _ in 0..INDICATOR_TICKS {
            n.tick();
        }
        assert_eq!(n.display().indicator_hides, 1);
        assert!(!n.active());
    }

    #[test]
    fn test_failsafe_bounds_lockout() {
        // Frozen tuning: the wave never decays, so completion never fires
        let tuning = WaveTuning {
            speed_base: 0.0,
            speed_jitter: 0.0,
            life_decay: 0.0,
            ..WaveTuning::default()
        };
        let sim = WaveSimulator::with_tuning(400.0, 300.0, 42, tuning);
        let mut n = PhilosophyNarrator::new(sim, RecordingDisplay::default(), quotes(3), false);

        n.pointer_event(Vec2::new(100.0, 50.0));
        assert!(n.is_busy());

        for _ in 0..FAILSAFE_TICKS {
            n.tick();
        }
        assert!(!n.is_busy());
        assert!(n.simulator().waves().is_empty());
        assert!(!n.simulator().is_animating());

        // Input works again after the reset
        n.pointer_event(Vec2::new(100.0, 50.0));
        assert!(n.is_busy());
    }

    #[test]
    fn test_empty_quote_list_still_ripples() {
        let mut n = narrator(0);
        n.pointer_event(Vec2::new(100.0, 50.0));
        assert!(n.is_busy());
        let mut guard = 0u32;
        while n.is_busy() {
            n.tick();
            guard += 1;
            assert!(guard < FAILSAFE_TICKS);
        }
        // No text traffic at all
        assert!(n.display().shown.is_empty());
        assert_eq!(n.display().exits, 0);
        assert!(n.display().entries.is_empty());
    }

    #[test]
    fn test_single_quote_rotates_onto_itself() {
        let mut n = narrator(1);
        run_full_cycle(&mut n);
        assert_eq!(n.current_index(), 0);
        assert_eq!(n.display().entries, vec!["Quote 0.".to_string()]);
    }

    #[test]
    fn test_transition_timing() {
        let mut n = narrator(2);
        n.pointer_event(Vec2::new(100.0, 50.0));

        // Drain the wave cycle
        let mut wave_ticks = 0u32;
        while n.phase() == NarratorPhase::Animating {
            n.tick();
            wave_ticks += 1;
        }
        assert!(wave_ticks <= MAX_WAVE_TICKS + 1);
        assert_eq!(n.phase(), NarratorPhase::SwapDelay);

        for _ in 0..SWAP_DELAY_TICKS {
            assert_eq!(n.display().exits, 0);
            n.tick();
        }
        assert_eq!(n.phase(), NarratorPhase::TextOut);
        assert_eq!(n.display().exits, 1);

        for _ in 0..TEXT_OUT_TICKS {
            assert!(n.display().entries.is_empty());
            n.tick();
        }
        assert_eq!(n.phase(), NarratorPhase::TextIn);
        // Index advances only at completion
        assert_eq!(n.current_index(), 0);

        for _ in 0..TEXT_IN_TICKS {
            n.tick();
        }
        assert_eq!(n.phase(), NarratorPhase::Idle);
        assert_eq!(n.current_index(), 1);
    }
}
