//! # fidget
//!
//! The interaction state store behind the "Boring Time" fidget toy: bubble wrap,
//! toggle lights, magic switches, color buttons and a slider, each interaction
//! bumping a score.
//!
//! The crate has no UI. Front ends read a [`session::Session`], push
//! [`event::Event`]s into a [`session::Store`] (or a [`controller::Controller`])
//! and run the returned [`effect::Effect`]s against their own audio and toast
//! backends.
//!
//! ## Quick Start
//!
//! ```
//! use fidget::prelude::*;
//!
//! let mut store = Store::seeded(7);
//! store.pop_bubble(0);
//! store.toggle_light(3);
//! assert_eq!(store.session().score(), 3);
//!
//! store.click_color_button(1, 0);
//! store.advance(200);
//! assert!(!store.session().color_buttons()[1].clicked);
//!
//! store.reset_bubbles();
//! assert_eq!(store.session().score(), 0);
//! assert!(store.session().lights()[3].is_on);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): config loading from JSON and session snapshots
//!
//! ## Modules
//!
//! - [`session`]: state and transitions
//! - [`controller`]: clock + effect wiring around a store
//! - [`effect`]: side effects as data, audio/toast sink traits
//! - [`schedule`]: color-button flash deadlines
//! - [`config`]: collection sizes, timings, validation

pub mod config;
pub mod controller;
pub mod effect;
pub mod event;
pub mod palette;
pub mod prng;
pub mod schedule;
pub mod session;
pub mod time;
pub mod widget;

/// Prelude module for convenient imports.
///
/// ```
/// use fidget::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{ConfigError, FidgetConfig};
    pub use crate::controller::Controller;
    pub use crate::effect::{AudioSink, Effect, Effects, Notifier, NullAudio, NullNotifier};
    pub use crate::event::{Event, EventParseError};
    pub use crate::palette::{Palette, PaletteColor};
    pub use crate::session::{Outcome, ScoreDelta, Session, Store};
    pub use crate::time::{Clock, ManualClock, SystemClock};
    pub use crate::widget::{Bubble, ColorButton, Toggle};
}
