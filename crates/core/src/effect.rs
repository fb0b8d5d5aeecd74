//! Side effects as data.
//!
//! Transitions never talk to audio or notification backends directly. They return
//! a list of [`Effect`]s and the caller runs them through [`Effects`], which hands
//! them to the UI-specific sinks.

use std::cell::RefCell;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Effect {
    /// Play the click sound. Only emitted while sound is enabled.
    PlaySound { volume: f32 },
    /// Show a short-lived message.
    Notify { message: String, duration_ms: u32 },
}

/// Fire-and-forget audio output.
///
/// Playback can fail (autoplay policies, missing device); implementations
/// swallow that themselves and never report it back.
pub trait AudioSink {
    fn play(&self, volume: f32);
}

/// Fire-and-forget toast output. Display failures are the sink's problem.
pub trait Notifier {
    fn notify(&self, message: &str, duration_ms: u32);
}

impl<T: AudioSink + ?Sized> AudioSink for &T {
    fn play(&self, volume: f32) {
        (**self).play(volume)
    }
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn notify(&self, message: &str, duration_ms: u32) {
        (**self).notify(message, duration_ms)
    }
}

/// Runs effects against a pair of sinks.
pub struct Effects<A, N> {
    pub audio: A,
    pub notifier: N,
}

impl<A: AudioSink, N: Notifier> Effects<A, N> {
    pub fn new(audio: A, notifier: N) -> Self {
        Self { audio, notifier }
    }

    pub fn run(&self, effects: &[Effect]) {
        for effect in effects {
            match effect {
                Effect::PlaySound { volume } => self.audio.play(*volume),
                Effect::Notify {
                    message,
                    duration_ms,
                } => self.notifier.notify(message, *duration_ms),
            }
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&self, _volume: f32) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _message: &str, _duration_ms: u32) {}
}

/// Counts play requests.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    plays: RefCell<Vec<f32>>,
}

impl RecordingAudio {
    pub fn plays(&self) -> usize {
        self.plays.borrow().len()
    }

    pub fn volumes(&self) -> Vec<f32> {
        self.plays.borrow().clone()
    }
}

impl AudioSink for RecordingAudio {
    fn play(&self, volume: f32) {
        self.plays.borrow_mut().push(volume);
    }
}

/// Keeps every message it was asked to show.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<(String, u32)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().iter().map(|(m, _)| m.clone()).collect()
    }

    pub fn last(&self) -> Option<(String, u32)> {
        self.messages.borrow().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, duration_ms: u32) {
        self.messages
            .borrow_mut()
            .push((message.to_string(), duration_ms));
    }
}
