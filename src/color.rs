use eframe::egui::Color32;
use palette::{Darken, FromColor, Hsl, Srgb};

use crate::data::model::PokeType;

// ---------------------------------------------------------------------------
// Fixed colours
// ---------------------------------------------------------------------------

const fn hex(rgb: u32) -> Srgb<u8> {
    Srgb::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

/// Fill for the height / weight bars.
pub const MEASURE_BAR: Srgb<u8> = hex(0x4B0082); // indigo
/// Scatter markers.
pub const SCATTER_POINT: Srgb<u8> = hex(0x87CEEB); // skyblue
/// Regression line.
pub const REGRESSION_LINE: Srgb<u8> = hex(0xFF0000);

/// In-game colour of each elemental type.
///
/// Exhaustive over [`PokeType`]; adding a type will not compile until it is
/// given a colour here.
pub const fn type_color(ptype: PokeType) -> Srgb<u8> {
    match ptype {
        PokeType::Normal => hex(0xA8A878),
        PokeType::Fire => hex(0xF08030),
        PokeType::Water => hex(0x6890F0),
        PokeType::Electric => hex(0xF8D030),
        PokeType::Grass => hex(0x78C850),
        PokeType::Ice => hex(0x98D8D8),
        PokeType::Fighting => hex(0xC03028),
        PokeType::Poison => hex(0xA040A0),
        PokeType::Ground => hex(0xE0C068),
        PokeType::Flying => hex(0xA890F0),
        PokeType::Psychic => hex(0xF85888),
        PokeType::Bug => hex(0xA8B820),
        PokeType::Rock => hex(0xB8A038),
        PokeType::Ghost => hex(0x705898),
        PokeType::Dark => hex(0x705848),
        PokeType::Dragon => hex(0x7038F8),
        PokeType::Steel => hex(0xB8B8D0),
        PokeType::Fairy => hex(0xEE99AC),
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn to_color32(c: Srgb<u8>) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

/// A darker shade of `c`, used for bar outlines.
pub fn outline(c: Srgb<u8>) -> Srgb<u8> {
    let hsl: Hsl = Hsl::from_color(c.into_format::<f32>());
    let rgb: Srgb = Srgb::from_color(hsl.darken(0.3));
    rgb.into_format()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn hex_splits_channels() {
        assert_eq!(hex(0xF08030), Srgb::new(0xF0, 0x80, 0x30));
        assert_eq!(to_color32(MEASURE_BAR), Color32::from_rgb(0x4B, 0x00, 0x82));
    }

    #[test]
    fn every_type_has_a_distinct_colour() {
        let colours: BTreeSet<(u8, u8, u8)> = PokeType::ALL
            .into_iter()
            .map(|t| type_color(t).into_components())
            .collect();
        assert_eq!(colours.len(), PokeType::ALL.len());
    }

    #[test]
    fn outline_is_darker() {
        for t in PokeType::ALL {
            let base = type_color(t);
            let dark = outline(base);
            let sum = |c: Srgb<u8>| c.red as u32 + c.green as u32 + c.blue as u32;
            assert!(sum(dark) < sum(base), "{t}");
        }
    }
}
