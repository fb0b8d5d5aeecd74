//! UI models and labels that should be available on both wasm and native.
//!
//! Keeping these out of the wasm-only `web` module allows us to unit-test the
//! page inventory and header texts on the host.

use fidget::session::Session;

pub const APP_TITLE: &str = "⏰ Boring Time";
pub const FOOTER_HINT: &str = "Click anywhere to score points and kill boredom!";
pub const SLIDER_GRADIENT: &str =
    "linear-gradient(to right, #ff6b6b 0%, #4ecdc4 25%, #45b7d1 50%, #96ceb4 75%, #feca57 100%)";

/// Neutral fill for widgets that are off or popped.
pub const OFF_FILL: &str = "#9ca3af";
pub const BUBBLE_FILL: &str = "#60a5fa";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    BubbleWrap,
    LightSwitch,
    MagicSwitches,
    ColorButtons,
    Slider,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Section::BubbleWrap => "Bubble Wrap",
            Section::LightSwitch => "Light Switch",
            Section::MagicSwitches => "Magic Switches",
            Section::ColorButtons => "Color Buttons",
            Section::Slider => "Boredom Slider",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Section::BubbleWrap => "⚪",
            Section::LightSwitch => "💡",
            Section::MagicSwitches => "⭐",
            Section::ColorButtons => "❤️",
            Section::Slider => "🎚️",
        }
    }

    pub fn hint(self) -> Option<&'static str> {
        match self {
            Section::LightSwitch => Some("Click to turn lights on/off! Colors change randomly!"),
            Section::MagicSwitches => Some("Magic switches with random colors!"),
            Section::ColorButtons => Some("Colors change with every click!"),
            Section::BubbleWrap | Section::Slider => None,
        }
    }

    /// Grid columns on a wide screen.
    pub fn columns(self) -> u32 {
        match self {
            Section::BubbleWrap => 10,
            Section::LightSwitch | Section::MagicSwitches | Section::ColorButtons => 4,
            Section::Slider => 1,
        }
    }

    /// Heading text, including the live counters some sections show.
    pub fn heading(self, session: &Session) -> String {
        match self {
            Section::BubbleWrap => format!(
                "{} ({}/{})",
                self.label(),
                session.unpopped_count(),
                session.bubbles().len()
            ),
            Section::LightSwitch => format!(
                "{} ({}/{})",
                self.label(),
                session.lights_on_count(),
                session.lights().len()
            ),
            Section::Slider => format!("{} - Current: {}", self.label(), session.slider_value()),
            Section::MagicSwitches | Section::ColorButtons => self.label().to_string(),
        }
    }

    /// The four widget panels, in page order. The slider sits below them.
    pub fn panels() -> &'static [Section] {
        &[
            Section::BubbleWrap,
            Section::LightSwitch,
            Section::MagicSwitches,
            Section::ColorButtons,
        ]
    }

    pub fn all() -> &'static [Section] {
        &[
            Section::BubbleWrap,
            Section::LightSwitch,
            Section::MagicSwitches,
            Section::ColorButtons,
            Section::Slider,
        ]
    }
}

pub fn score_label(score: u64) -> String {
    format!("Score: {score}")
}

pub fn footer_line(score: u64) -> String {
    format!("🎉 You've clicked {score} times! Keep going!")
}

pub fn sound_icon(enabled: bool) -> &'static str {
    if enabled {
        "🔊"
    } else {
        "🔇"
    }
}

/// Glow for a lit toggle, as a CSS `box-shadow`. `alpha_hex` is appended to the color.
pub fn glow(color_hex: &str, radius_px: u32, alpha_hex: &str) -> String {
    format!("0 0 {radius_px}px {color_hex}{alpha_hex}")
}
