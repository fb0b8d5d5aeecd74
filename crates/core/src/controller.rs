use crate::effect::{AudioSink, Effects, Notifier};
use crate::event::Event;
use crate::session::{Outcome, Session, Store};
use crate::time::Clock;

/// Single owner of a [`Store`] plus the collaborators it talks to.
///
/// Front ends push events in; the controller stamps them with the clock,
/// applies them and runs the returned effects.
pub struct Controller<A, N, C> {
    store: Store,
    effects: Effects<A, N>,
    clock: C,
}

impl<A: AudioSink, N: Notifier, C: Clock> Controller<A, N, C> {
    pub fn new(store: Store, audio: A, notifier: N, clock: C) -> Self {
        Self {
            store,
            effects: Effects::new(audio, notifier),
            clock,
        }
    }

    pub fn dispatch(&mut self, event: Event) -> Outcome {
        let now = self.clock.now_ms();
        let outcome = self.store.apply(event, now);
        self.effects.run(&outcome.effects);
        outcome
    }

    /// Milliseconds until the next flash ends, or `None` with nothing pending.
    pub fn next_wakeup_in(&self) -> Option<u64> {
        let now = self.clock.now_ms();
        self.store
            .next_flash_deadline()
            .map(|deadline| deadline.saturating_sub(now))
    }

    pub fn session(&self) -> &Session {
        self.store.session()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn audio(&self) -> &A {
        &self.effects.audio
    }

    pub fn notifier(&self) -> &N {
        &self.effects.notifier
    }
}
