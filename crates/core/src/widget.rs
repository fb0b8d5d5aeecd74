use crate::palette::{Palette, PaletteColor};
use crate::prng::Prng;

/// One cell of bubble wrap. Popping is one-way; only a full reset un-pops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Bubble {
    pub id: usize,
    pub popped: bool,
}

impl Bubble {
    pub fn new(id: usize) -> Self {
        Self { id, popped: false }
    }
}

/// An on/off widget that picks a fresh color on every flip. Lights and magic
/// switches share this shape but live in separate collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Toggle {
    pub is_on: bool,
    pub color: PaletteColor,
}

impl Toggle {
    pub fn new(rng: &mut Prng) -> Self {
        Self {
            is_on: false,
            color: Palette::random(rng),
        }
    }

    /// Flip, recolor, and return the new on/off state.
    pub fn flip(&mut self, rng: &mut Prng) -> bool {
        self.is_on = !self.is_on;
        self.color = Palette::random(rng);
        self.is_on
    }
}

/// A button that recolors on click and stays highlighted for the flash window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColorButton {
    pub color: PaletteColor,
    pub clicked: bool,
}

impl ColorButton {
    pub fn new(rng: &mut Prng) -> Self {
        Self {
            color: Palette::random(rng),
            clicked: false,
        }
    }
}
