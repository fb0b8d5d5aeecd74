use crate::prng::Prng;

/// One of the seven fixed colors every light, switch and color button draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PaletteColor {
    #[default]
    Coral,
    Turquoise,
    Sky,
    Sage,
    Sunflower,
    Orchid,
    Azure,
}

impl PaletteColor {
    pub fn all() -> &'static [PaletteColor] {
        &[
            PaletteColor::Coral,
            PaletteColor::Turquoise,
            PaletteColor::Sky,
            PaletteColor::Sage,
            PaletteColor::Sunflower,
            PaletteColor::Orchid,
            PaletteColor::Azure,
        ]
    }

    pub fn hex(self) -> &'static str {
        match self {
            PaletteColor::Coral => "#ff6b6b",
            PaletteColor::Turquoise => "#4ecdc4",
            PaletteColor::Sky => "#45b7d1",
            PaletteColor::Sage => "#96ceb4",
            PaletteColor::Sunflower => "#feca57",
            PaletteColor::Orchid => "#ff9ff3",
            PaletteColor::Azure => "#54a0ff",
        }
    }
}

impl std::fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hex())
    }
}

pub struct Palette;

impl Palette {
    /// Uniform pick. Each call is independent; repeating the previous color is allowed.
    pub fn random(rng: &mut Prng) -> PaletteColor {
        let all = PaletteColor::all();
        all[rng.gen_range_usize(0, all.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_seven_distinct_colors() {
        let all = PaletteColor::all();
        assert_eq!(all.len(), 7);

        let mut hexes: Vec<&'static str> = all.iter().copied().map(PaletteColor::hex).collect();
        hexes.sort_unstable();
        hexes.dedup();
        assert_eq!(hexes.len(), 7);
    }

    #[test]
    fn hex_is_css_ready() {
        for &c in PaletteColor::all() {
            let hex = c.hex();
            assert_eq!(hex.len(), 7);
            assert!(hex.starts_with('#'));
            assert!(hex[1..].chars().all(|ch| ch.is_ascii_hexdigit() && !ch.is_ascii_uppercase()));
            assert_eq!(c.to_string(), hex);
        }
    }

    #[test]
    fn random_pick_covers_the_palette() {
        let mut rng = Prng::new(2026);
        let mut seen = [false; 7];
        for _ in 0..500 {
            let c = Palette::random(&mut rng);
            let i = PaletteColor::all().iter().position(|&x| x == c).unwrap();
            seen[i] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
