//! The interaction state store.
//!
//! [`Session`] is the plain state a renderer reads. [`Store`] owns it together
//! with the color PRNG and the flash schedule, and is the only thing allowed to
//! change it. Every operation returns an [`Outcome`] describing the score change
//! and the side effects the caller should run.
//!
//! Bad input never fails loudly: an out-of-range index or a second pop of the
//! same bubble leaves the state alone and comes back as `applied: false`.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::config::{ConfigError, FidgetConfig, SLIDER_MAX, SLIDER_MIN};
use crate::effect::Effect;
use crate::event::Event;
use crate::palette::Palette;
use crate::prng::Prng;
use crate::schedule::FlashSchedule;
use crate::widget::{Bubble, ColorButton, Toggle};

const DEFAULT_SEED: u64 = 0xB0_2E_D7_13;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreDelta {
    Add(u64),
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub applied: bool,
    pub score_delta: ScoreDelta,
    pub effects: Vec<Effect>,
}

impl Outcome {
    fn rejected() -> Self {
        Self {
            applied: false,
            score_delta: ScoreDelta::Add(0),
            effects: Vec::new(),
        }
    }

    fn applied(score_delta: ScoreDelta, effects: Vec<Effect>) -> Self {
        Self {
            applied: true,
            score_delta,
            effects,
        }
    }
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Session {
    score: u64,
    sound_enabled: bool,
    slider_value: u8,
    bubbles: Vec<Bubble>,
    lights: Vec<Toggle>,
    switches: Vec<Toggle>,
    color_buttons: Vec<ColorButton>,
    /// Color buttons inside their flash window. Mirrors `ColorButton::clicked`.
    animating: BTreeSet<usize>,
}

impl Session {
    pub fn new(cfg: &FidgetConfig, rng: &mut Prng) -> Self {
        Self {
            score: 0,
            sound_enabled: true,
            slider_value: cfg.slider_default.min(SLIDER_MAX),
            bubbles: (0..cfg.bubble_count).map(Bubble::new).collect(),
            lights: (0..cfg.light_count).map(|_| Toggle::new(rng)).collect(),
            switches: (0..cfg.switch_count).map(|_| Toggle::new(rng)).collect(),
            color_buttons: (0..cfg.color_button_count)
                .map(|_| ColorButton::new(rng))
                .collect(),
            animating: BTreeSet::new(),
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn slider_value(&self) -> u8 {
        self.slider_value
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn lights(&self) -> &[Toggle] {
        &self.lights
    }

    pub fn switches(&self) -> &[Toggle] {
        &self.switches
    }

    pub fn color_buttons(&self) -> &[ColorButton] {
        &self.color_buttons
    }

    pub fn animating(&self) -> &BTreeSet<usize> {
        &self.animating
    }

    pub fn is_animating(&self, index: usize) -> bool {
        self.animating.contains(&index)
    }

    pub fn unpopped_count(&self) -> usize {
        self.bubbles.iter().filter(|b| !b.popped).count()
    }

    pub fn lights_on_count(&self) -> usize {
        self.lights.iter().filter(|l| l.is_on).count()
    }

    pub fn switches_on_count(&self) -> usize {
        self.switches.iter().filter(|s| s.is_on).count()
    }

    fn award(&mut self, points: u64) -> ScoreDelta {
        self.score = self.score.saturating_add(points);
        ScoreDelta::Add(points)
    }
}

#[derive(Debug, Clone)]
pub struct Store {
    config: FidgetConfig,
    session: Session,
    rng: Prng,
    flashes: FlashSchedule,
}

impl Store {
    pub fn new(config: FidgetConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = Prng::new(config.seed.unwrap_or(DEFAULT_SEED));
        let session = Session::new(&config, &mut rng);
        Ok(Self {
            config,
            session,
            rng,
            flashes: FlashSchedule::new(),
        })
    }

    /// Default-sized store with a fixed color seed.
    pub fn seeded(seed: u64) -> Self {
        let config = FidgetConfig::default().with_seed(seed);
        let mut rng = Prng::new(seed);
        let session = Session::new(&config, &mut rng);
        Self {
            config,
            session,
            rng,
            flashes: FlashSchedule::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &FidgetConfig {
        &self.config
    }

    /// Earliest pending flash clear, if any.
    pub fn next_flash_deadline(&self) -> Option<u64> {
        self.flashes.next_deadline()
    }

    pub fn apply(&mut self, event: Event, now_ms: u64) -> Outcome {
        match event {
            Event::PopBubble(id) => self.pop_bubble(id),
            Event::ResetBubbles => self.reset_bubbles(),
            Event::ToggleLight(i) => self.toggle_light(i),
            Event::ToggleSwitch(i) => self.toggle_switch(i),
            Event::ClickColorButton(i) => self.click_color_button(i, now_ms),
            Event::SetSlider(v) => self.set_slider_value(v),
            Event::ToggleSound => self.toggle_sound(),
            Event::Tick => self.advance(now_ms),
        }
    }

    pub fn pop_bubble(&mut self, id: usize) -> Outcome {
        let Some(bubble) = self.session.bubbles.get_mut(id) else {
            trace!(id, "pop ignored: no such bubble");
            return Outcome::rejected();
        };
        if bubble.popped {
            trace!(id, "pop ignored: already popped");
            return Outcome::rejected();
        }
        bubble.popped = true;

        let delta = self.session.award(1);
        let mut effects = self.sound();
        effects.push(self.toast("Pop! +1", self.config.quick_toast_ms));
        debug!(id, score = self.session.score, "bubble popped");
        Outcome::applied(delta, effects)
    }

    pub fn reset_bubbles(&mut self) -> Outcome {
        for bubble in &mut self.session.bubbles {
            bubble.popped = false;
        }
        self.session.score = 0;
        debug!("bubble wrap reset");
        Outcome::applied(
            ScoreDelta::Reset,
            vec![self.toast("Bubble wrap reset!", self.config.reset_toast_ms)],
        )
    }

    pub fn toggle_light(&mut self, index: usize) -> Outcome {
        let Some(light) = self.session.lights.get_mut(index) else {
            trace!(index, "light toggle ignored: out of range");
            return Outcome::rejected();
        };
        let is_on = light.flip(&mut self.rng);

        let delta = self.session.award(2);
        let mut effects = self.sound();
        let message = if is_on { "Light ON! +2" } else { "Light OFF! +2" };
        effects.push(self.toast(message, self.config.quick_toast_ms));
        debug!(index, is_on, score = self.session.score, "light toggled");
        Outcome::applied(delta, effects)
    }

    pub fn toggle_switch(&mut self, index: usize) -> Outcome {
        let Some(switch) = self.session.switches.get_mut(index) else {
            trace!(index, "switch toggle ignored: out of range");
            return Outcome::rejected();
        };
        let is_on = switch.flip(&mut self.rng);

        let delta = self.session.award(1);
        debug!(index, is_on, score = self.session.score, "switch toggled");
        Outcome::applied(delta, self.sound())
    }

    /// Recolor and highlight a button, queueing a clear at `now_ms + flash_ms`.
    /// Earlier clicks keep their own clears, so a re-click can be cut short by
    /// the first click's timer.
    pub fn click_color_button(&mut self, index: usize, now_ms: u64) -> Outcome {
        if index >= self.session.color_buttons.len() {
            trace!(index, "color click ignored: out of range");
            return Outcome::rejected();
        }
        // Clears that were due before this click land first.
        self.clear_due(now_ms);
        let button = &mut self.session.color_buttons[index];
        button.color = Palette::random(&mut self.rng);
        button.clicked = true;
        self.session.animating.insert(index);
        self.flashes
            .schedule(index, now_ms.saturating_add(self.config.flash_ms));

        let delta = self.session.award(1);
        debug!(index, score = self.session.score, "color button clicked");
        Outcome::applied(delta, self.sound())
    }

    /// Out-of-range input is clamped to 0..=100; every change still scores.
    pub fn set_slider_value(&mut self, value: i64) -> Outcome {
        let clamped = value.clamp(SLIDER_MIN as i64, SLIDER_MAX as i64) as u8;
        if clamped as i64 != value {
            trace!(value, clamped, "slider value clamped");
        }
        self.session.slider_value = clamped;

        let delta = self.session.award(1);
        debug!(value = clamped, score = self.session.score, "slider moved");
        Outcome::applied(delta, Vec::new())
    }

    pub fn toggle_sound(&mut self) -> Outcome {
        self.session.sound_enabled = !self.session.sound_enabled;
        debug!(enabled = self.session.sound_enabled, "sound toggled");
        Outcome::applied(ScoreDelta::Add(0), Vec::new())
    }

    /// End the flash for every button whose window has closed. The color picked
    /// by the click stays. Safe to call at any time, any number of times.
    pub fn advance(&mut self, now_ms: u64) -> Outcome {
        if self.clear_due(now_ms) {
            Outcome::applied(ScoreDelta::Add(0), Vec::new())
        } else {
            Outcome::rejected()
        }
    }

    fn clear_due(&mut self, now_ms: u64) -> bool {
        let due = self.flashes.drain_due(now_ms);
        if due.is_empty() {
            return false;
        }
        for &index in &due {
            if let Some(button) = self.session.color_buttons.get_mut(index) {
                button.clicked = false;
            }
            self.session.animating.remove(&index);
        }
        debug!(?due, now_ms, "color flashes cleared");
        true
    }

    fn sound(&self) -> Vec<Effect> {
        if self.session.sound_enabled {
            vec![Effect::PlaySound {
                volume: self.config.sound_volume,
            }]
        } else {
            Vec::new()
        }
    }

    fn toast(&self, message: &str, duration_ms: u32) -> Effect {
        Effect::Notify {
            message: message.to_string(),
            duration_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PaletteColor;
    use proptest::prelude::*;

    fn store() -> Store {
        Store::seeded(42)
    }

    fn flags_match_animating(s: &Session) -> bool {
        s.color_buttons()
            .iter()
            .enumerate()
            .all(|(i, b)| b.clicked == s.is_animating(i))
    }

    #[test]
    fn initial_session_matches_the_toy() {
        let s = store();
        let session = s.session();
        assert_eq!(session.score(), 0);
        assert!(session.sound_enabled());
        assert_eq!(session.slider_value(), 50);
        assert_eq!(session.bubbles().len(), 60);
        assert_eq!(session.lights().len(), 12);
        assert_eq!(session.switches().len(), 8);
        assert_eq!(session.color_buttons().len(), 8);

        assert!(session.bubbles().iter().enumerate().all(|(i, b)| b.id == i && !b.popped));
        assert!(session.lights().iter().all(|l| !l.is_on));
        assert!(session.switches().iter().all(|l| !l.is_on));
        assert!(session.animating().is_empty());
        assert!(flags_match_animating(session));
    }

    #[test]
    fn pop_is_one_way_and_scores_once() {
        let mut s = store();
        let out = s.pop_bubble(7);
        assert!(out.applied);
        assert_eq!(out.score_delta, ScoreDelta::Add(1));
        assert!(s.session().bubbles()[7].popped);
        assert_eq!(s.session().score(), 1);
        assert_eq!(s.session().unpopped_count(), 59);

        let again = s.pop_bubble(7);
        assert!(!again.applied);
        assert!(again.effects.is_empty());
        assert_eq!(s.session().score(), 1);
        assert!(s.session().bubbles()[7].popped);
    }

    #[test]
    fn pop_emits_sound_and_toast() {
        let mut s = store();
        let out = s.pop_bubble(0);
        assert_eq!(
            out.effects,
            vec![
                Effect::PlaySound { volume: 0.1 },
                Effect::Notify {
                    message: "Pop! +1".to_string(),
                    duration_ms: 500
                },
            ]
        );
    }

    #[test]
    fn reset_restores_bubbles_and_zeroes_score() {
        let mut s = store();
        for id in [0, 5, 59] {
            s.pop_bubble(id);
        }
        s.toggle_switch(2);
        s.set_slider_value(90);
        assert_eq!(s.session().score(), 5);

        let out = s.reset_bubbles();
        assert_eq!(out.score_delta, ScoreDelta::Reset);
        assert_eq!(s.session().score(), 0);
        assert_eq!(s.session().unpopped_count(), 60);
        assert!(s.session().switches()[2].is_on);
        assert_eq!(s.session().slider_value(), 90);
        assert_eq!(
            out.effects,
            vec![Effect::Notify {
                message: "Bubble wrap reset!".to_string(),
                duration_ms: 4000
            }]
        );
    }

    #[test]
    fn reset_on_fresh_session_is_harmless() {
        let mut s = store();
        let out = s.reset_bubbles();
        assert!(out.applied);
        assert_eq!(s.session().score(), 0);
    }

    #[test]
    fn light_toggle_flips_recolors_and_scores_two() {
        let mut s = store();
        let out = s.toggle_light(3);
        assert_eq!(out.score_delta, ScoreDelta::Add(2));
        assert!(s.session().lights()[3].is_on);
        assert!(PaletteColor::all().contains(&s.session().lights()[3].color));
        assert_eq!(s.session().lights_on_count(), 1);
        assert!(out.effects.contains(&Effect::Notify {
            message: "Light ON! +2".to_string(),
            duration_ms: 500
        }));

        let out = s.toggle_light(3);
        assert!(!s.session().lights()[3].is_on);
        assert_eq!(s.session().score(), 4);
        assert!(out.effects.contains(&Effect::Notify {
            message: "Light OFF! +2".to_string(),
            duration_ms: 500
        }));
    }

    #[test]
    fn switches_are_independent_of_lights() {
        let mut s = store();
        let out = s.toggle_switch(3);
        assert_eq!(out.score_delta, ScoreDelta::Add(1));
        assert_eq!(out.effects, vec![Effect::PlaySound { volume: 0.1 }]);
        assert!(s.session().switches()[3].is_on);
        assert!(!s.session().lights()[3].is_on);
        assert_eq!(s.session().switches_on_count(), 1);

        s.toggle_switch(3);
        assert!(!s.session().switches()[3].is_on);
        assert_eq!(s.session().score(), 2);
    }

    #[test]
    fn out_of_range_indices_are_ignored() {
        let mut s = store();
        let before = s.session().clone();

        for out in [
            s.pop_bubble(60),
            s.toggle_light(12),
            s.toggle_switch(8),
            s.click_color_button(8, 0),
            s.pop_bubble(usize::MAX),
        ] {
            assert!(!out.applied);
            assert!(out.effects.is_empty());
            assert_eq!(out.score_delta, ScoreDelta::Add(0));
        }

        assert_eq!(s.session().score(), 0);
        assert_eq!(s.session().lights(), before.lights());
        assert_eq!(s.session().switches(), before.switches());
        assert_eq!(s.session().color_buttons(), before.color_buttons());
        assert!(s.next_flash_deadline().is_none());
    }

    #[test]
    fn color_flash_clears_after_window_and_keeps_color() {
        let mut s = store();
        let out = s.click_color_button(2, 1_000);
        assert_eq!(out.score_delta, ScoreDelta::Add(1));
        let color = s.session().color_buttons()[2].color;
        assert!(s.session().color_buttons()[2].clicked);
        assert!(s.session().is_animating(2));
        assert_eq!(s.next_flash_deadline(), Some(1_200));

        assert!(!s.advance(1_199).applied);
        assert!(s.session().color_buttons()[2].clicked);

        assert!(s.advance(1_200).applied);
        assert!(!s.session().color_buttons()[2].clicked);
        assert!(!s.session().is_animating(2));
        assert_eq!(s.session().color_buttons()[2].color, color);
        assert!(flags_match_animating(s.session()));

        // Idempotent.
        assert!(!s.advance(5_000).applied);
        assert!(!s.session().color_buttons()[2].clicked);
    }

    #[test]
    fn first_clicks_clear_ends_a_reclicked_flash() {
        let mut s = store();
        s.click_color_button(0, 0);
        s.click_color_button(0, 150);
        assert_eq!(s.session().score(), 2);
        assert_eq!(s.next_flash_deadline(), Some(200));

        assert!(s.advance(200).applied);
        assert!(!s.session().color_buttons()[0].clicked);
        assert!(!s.session().is_animating(0));
        assert!(flags_match_animating(s.session()));

        // The second click's clear still fires, on an already clear button.
        assert_eq!(s.next_flash_deadline(), Some(350));
        s.advance(350);
        assert!(!s.session().color_buttons()[0].clicked);
        assert!(flags_match_animating(s.session()));
        assert_eq!(s.next_flash_deadline(), None);
    }

    #[test]
    fn late_click_lands_after_an_overdue_clear() {
        let mut s = store();
        s.click_color_button(5, 0);
        // No tick between: the clear due at 200 must not wipe the click at 250.
        s.click_color_button(5, 250);
        assert!(s.session().color_buttons()[5].clicked);
        assert!(s.session().is_animating(5));
        assert_eq!(s.next_flash_deadline(), Some(450));

        s.advance(449);
        assert!(s.session().is_animating(5));
        s.advance(450);
        assert!(!s.session().color_buttons()[5].clicked);
        assert!(flags_match_animating(s.session()));
    }

    #[test]
    fn flashes_on_different_buttons_expire_independently() {
        let mut s = store();
        s.click_color_button(1, 0);
        s.click_color_button(4, 100);

        s.advance(200);
        assert!(!s.session().is_animating(1));
        assert!(s.session().is_animating(4));
        assert!(flags_match_animating(s.session()));

        s.advance(300);
        assert!(s.session().animating().is_empty());
    }

    #[test]
    fn slider_sets_and_clamps() {
        let mut s = store();
        let out = s.set_slider_value(75);
        assert_eq!(out.score_delta, ScoreDelta::Add(1));
        assert!(out.effects.is_empty());
        assert_eq!(s.session().slider_value(), 75);

        s.set_slider_value(0);
        assert_eq!(s.session().slider_value(), 0);
        s.set_slider_value(100);
        assert_eq!(s.session().slider_value(), 100);

        s.set_slider_value(250);
        assert_eq!(s.session().slider_value(), 100);
        s.set_slider_value(-3);
        assert_eq!(s.session().slider_value(), 0);
        assert_eq!(s.session().score(), 5);
    }

    #[test]
    fn muted_session_emits_no_sound() {
        let mut s = store();
        let out = s.toggle_sound();
        assert_eq!(out.score_delta, ScoreDelta::Add(0));
        assert!(!s.session().sound_enabled());
        assert_eq!(s.session().score(), 0);

        let pop = s.pop_bubble(1);
        assert_eq!(
            pop.effects,
            vec![Effect::Notify {
                message: "Pop! +1".to_string(),
                duration_ms: 500
            }]
        );
        assert!(s.toggle_switch(0).effects.is_empty());
        assert!(s.click_color_button(0, 0).effects.is_empty());

        s.toggle_sound();
        assert!(s.session().sound_enabled());
    }

    #[test]
    fn score_only_decreases_on_reset() {
        let mut s = store();
        let events = [
            Event::PopBubble(1),
            Event::ToggleLight(0),
            Event::ToggleSound,
            Event::SetSlider(10),
            Event::PopBubble(1),
            Event::ClickColorButton(3),
            Event::Tick,
            Event::ToggleSwitch(7),
            Event::ToggleLight(99),
        ];
        let mut last = 0;
        for (t, e) in events.into_iter().enumerate() {
            s.apply(e, t as u64 * 50);
            assert!(s.session().score() >= last);
            last = s.session().score();
        }
        assert_eq!(last, 1 + 2 + 1 + 1 + 1);
    }

    #[test]
    fn same_seed_gives_same_colors() {
        let a = Store::seeded(9);
        let b = Store::seeded(9);
        assert_eq!(a.session().lights(), b.session().lights());
        assert_eq!(a.session().color_buttons(), b.session().color_buttons());
    }

    #[test]
    fn new_validates_config() {
        let bad = FidgetConfig {
            bubble_count: 0,
            ..FidgetConfig::default()
        };
        assert!(Store::new(bad).is_err());

        let small = FidgetConfig {
            bubble_count: 4,
            light_count: 2,
            ..FidgetConfig::default()
        };
        let s = Store::new(small).unwrap();
        assert_eq!(s.session().bubbles().len(), 4);
        assert_eq!(s.session().lights().len(), 2);
    }

    fn arb_event() -> impl Strategy<Value = Event> {
        // Index ranges run past every collection so rejected input is covered too.
        prop_oneof![
            (0usize..70).prop_map(Event::PopBubble),
            Just(Event::ResetBubbles),
            (0usize..16).prop_map(Event::ToggleLight),
            (0usize..12).prop_map(Event::ToggleSwitch),
            (0usize..12).prop_map(Event::ClickColorButton),
            (-50i64..200).prop_map(Event::SetSlider),
            Just(Event::ToggleSound),
            Just(Event::Tick),
        ]
    }

    proptest! {
        #[test]
        fn invariants_hold_for_any_event_sequence(
            seed in any::<u64>(),
            steps in proptest::collection::vec((arb_event(), 0u64..400), 0..64)
        ) {
            let mut s = Store::seeded(seed);
            let mut now = 0u64;
            let mut last_score = 0u64;

            for (event, gap) in steps {
                now += gap;
                s.apply(event, now);
                let session = s.session();

                if event == Event::ResetBubbles {
                    prop_assert_eq!(session.score(), 0);
                } else {
                    prop_assert!(session.score() >= last_score, "score dropped on {:?}", event);
                }
                last_score = session.score();

                prop_assert!(flags_match_animating(session));
                prop_assert!(session.animating().iter().all(|&i| i < session.color_buttons().len()));

                prop_assert_eq!(session.bubbles().len(), 60);
                prop_assert_eq!(session.lights().len(), 12);
                prop_assert_eq!(session.switches().len(), 8);
                prop_assert_eq!(session.color_buttons().len(), 8);

                let palette = PaletteColor::all();
                prop_assert!(session.lights().iter().all(|l| palette.contains(&l.color)));
                prop_assert!(session.switches().iter().all(|w| palette.contains(&w.color)));
                prop_assert!(session.color_buttons().iter().all(|b| palette.contains(&b.color)));
                prop_assert!(session.slider_value() <= 100);
            }
        }
    }
}
