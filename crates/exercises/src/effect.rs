// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Delayed effect
//!
//! A button that, some time after being clicked, swaps an element between
//! its _highlight_ and _shrink_ looks.

use std::time::Duration;

use log::{debug, trace};

use crate::store::{Signal, Store};
use crate::timer::Scheduler;
use crate::Error;

/// How long after a click the effect flips.
pub const EFFECT_DELAY: Duration = Duration::from_millis(1500);

pub const CLASS_A: &str = "test-class-a";
pub const CLASS_B: &str = "test-class-b";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectState {
    pub highlight_active: bool,
    pub shrink_active: bool,
    pub class_a: &'static str,
    pub class_b: &'static str,
}

impl Default for EffectState {
    fn default() -> Self {
        EffectState {
            highlight_active: true,
            shrink_active: false,
            class_a: CLASS_A,
            class_b: CLASS_B,
        }
    }
}

/// The two states reachable by toggling from the default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// `(highlight, shrink) == (true, false)`
    Highlighted,
    /// `(highlight, shrink) == (false, true)`
    Shrunk,
}

impl EffectState {
    /// `None` if the flags were set by hand into a combination toggling can't reach.
    pub fn phase(&self) -> Option<Phase> {
        match (self.highlight_active, self.shrink_active) {
            (true, false) => Some(Phase::Highlighted),
            (false, true) => Some(Phase::Shrunk),
            _ => None,
        }
    }

    /// Classes for the effect element, one per active flag.
    pub fn effect_classes(&self) -> &'static str {
        match (self.highlight_active, self.shrink_active) {
            (true, false) => "highlight",
            (false, true) => "shrink",
            (true, true) => "highlight shrink",
            (false, false) => "",
        }
    }
}

/// Negate both flags in one step.
pub fn toggle(state: &mut EffectState) {
    state.highlight_active = !state.highlight_active;
    state.shrink_active = !state.shrink_active;
}

/// A mounted delayed effect toggle.
pub struct EffectToggle<T> {
    store: Store<EffectState>,
    scheduler: T,
    delay: Duration,
}

impl<T: Scheduler> EffectToggle<T> {
    pub fn new(scheduler: T) -> Self {
        EffectToggle {
            store: Store::default(),
            scheduler,
            delay: EFFECT_DELAY,
        }
    }

    /// Use a delay other than [`EFFECT_DELAY`].
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// The observable state of this widget, subscribe to it to render.
    pub fn store(&self) -> &Store<EffectState> {
        &self.store
    }

    pub fn state(&self) -> Result<EffectState, Error> {
        self.store.get()
    }

    /// Schedule one toggle, [`delay`](EffectToggle::delay) from now.
    ///
    /// The deferred task only holds a [`Signal`], so it flips whatever the
    /// flags are when it fires. Every call schedules its own toggle.
    pub fn start_effect(&self) {
        let signal = self.store.signal();

        trace!("effect toggle scheduled in {:?}", self.delay);

        self.scheduler
            .schedule(self.delay, Box::new(move || fire(&signal)));
    }
}

fn fire(signal: &Signal<EffectState>) {
    match signal.update(toggle) {
        Ok(()) => trace!("effect toggled"),
        Err(err) => debug!("effect toggle dropped: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::timer::TimerQueue;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn flags(toggle: &EffectToggle<TimerQueue>) -> (bool, bool) {
        let state = toggle.state().unwrap();

        (state.highlight_active, state.shrink_active)
    }

    #[test]
    fn initial_state() {
        let state = EffectState::default();

        assert_eq!(state.phase(), Some(Phase::Highlighted));
        assert_eq!(state.effect_classes(), "highlight");
        assert_eq!((state.class_a, state.class_b), ("test-class-a", "test-class-b"));
    }

    #[test]
    fn toggles_after_delay() {
        let timers = TimerQueue::new();
        let effect = EffectToggle::new(timers.clone());

        effect.start_effect();

        timers.advance(ms(1499));
        assert_eq!(flags(&effect), (true, false));

        timers.advance(ms(1));
        assert_eq!(flags(&effect), (false, true));
        assert_eq!(effect.state().unwrap().effect_classes(), "shrink");

        effect.start_effect();
        timers.advance(EFFECT_DELAY);
        assert_eq!(flags(&effect), (true, false));
    }

    #[test]
    fn overlapping_calls_each_toggle() {
        let timers = TimerQueue::new();
        let effect = EffectToggle::new(timers.clone());

        effect.start_effect();
        timers.advance(ms(500));
        effect.start_effect();

        // First call fires at 1500ms, second at 2000ms.
        timers.advance(ms(1000));
        assert_eq!(flags(&effect), (false, true));

        timers.advance(ms(499));
        assert_eq!(flags(&effect), (false, true));

        timers.advance(ms(1));
        assert_eq!(flags(&effect), (true, false));
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn toggle_reads_state_at_fire_time() {
        let timers = TimerQueue::new();
        let effect = EffectToggle::new(timers.clone());

        effect.start_effect();

        // Someone else changes the flags while the toggle is pending.
        effect
            .store()
            .update(|state| {
                state.highlight_active = false;
                state.shrink_active = false;
            })
            .unwrap();

        timers.run_until_idle();

        assert_eq!(flags(&effect), (true, true));
        assert_eq!(effect.state().unwrap().effect_classes(), "highlight shrink");
        assert_eq!(effect.state().unwrap().phase(), None);
    }

    #[test]
    fn subscribers_see_each_toggle() {
        let timers = TimerQueue::new();
        let effect = EffectToggle::new(timers.clone());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let out = seen.clone();
        effect
            .store()
            .subscribe(move |state| out.borrow_mut().push(state.phase()))
            .unwrap();

        for _ in 0..3 {
            effect.start_effect();
        }
        assert!(seen.borrow().is_empty());

        assert_eq!(timers.run_until_idle(), 3);
        assert_eq!(
            &*seen.borrow(),
            &[Some(Phase::Shrunk), Some(Phase::Highlighted), Some(Phase::Shrunk)]
        );
    }

    #[test]
    fn labels_never_change() {
        let timers = TimerQueue::new();
        let effect = EffectToggle::new(timers.clone());

        for _ in 0..5 {
            effect.start_effect();
            timers.advance(ms(700));
        }
        timers.run_until_idle();

        let state = effect.state().unwrap();
        assert_eq!(state.class_a, CLASS_A);
        assert_eq!(state.class_b, CLASS_B);
    }

    #[test]
    fn custom_delay() {
        let timers = TimerQueue::new();
        let effect = EffectToggle::new(&timers).with_delay(ms(10));

        effect.start_effect();
        timers.advance(ms(10));

        assert_eq!(effect.delay(), ms(10));
        assert_eq!(effect.state().unwrap().phase(), Some(Phase::Shrunk));
    }

    #[test]
    fn toggle_after_teardown_is_dropped() {
        let timers = TimerQueue::new();
        let effect = EffectToggle::new(timers.clone());

        effect.start_effect();
        drop(effect);

        assert_eq!(timers.run_until_idle(), 1);
    }
}
