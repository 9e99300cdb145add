//! Color definitions for the tooltip card

use image::Rgba;

use crate::item::{Element, Rarity};

/// Convert RGB values to an opaque color
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}

// Card background
pub const BACKGROUND: Rgba<u8> = rgb(0x00, 0x00, 0x00);

// Text colors
pub const GREY: Rgba<u8> = rgb(0x7f, 0x7f, 0x7f);
pub const WHITE: Rgba<u8> = rgb(0xff, 0xff, 0xff);
pub const ENCHANT: Rgba<u8> = rgb(0xb4, 0xb4, 0xff);
pub const AFFIX: Rgba<u8> = rgb(0x88, 0x88, 0xff);
pub const CORRUPTED: Rgba<u8> = rgb(0xd2, 0x00, 0x00);

// Rarity name colors
pub const NORMAL: Rgba<u8> = rgb(0xc8, 0xc8, 0xc8);
pub const MAGIC: Rgba<u8> = rgb(0x88, 0x88, 0xff);
pub const RARE: Rgba<u8> = rgb(0xff, 0xff, 0x77);
pub const UNIQUE: Rgba<u8> = rgb(0xaf, 0x60, 0x25);
pub const UNIQUE_NAME: Rgba<u8> = rgb(0xee, 0x68, 0x1d);
pub const CURRENCY: Rgba<u8> = rgb(0xaa, 0x9e, 0x82);
pub const QUEST: Rgba<u8> = rgb(0x4a, 0xe6, 0x3a);

// Elemental damage colors
pub const FIRE: Rgba<u8> = rgb(0x96, 0x00, 0x00);
pub const COLD: Rgba<u8> = rgb(0x36, 0x64, 0x92);
pub const LIGHTNING: Rgba<u8> = rgb(0xff, 0xd7, 0x00);

/// Item name color for a rarity. Unique names use a brighter shade than the
/// unique body color used elsewhere on the card.
pub fn name_color(rarity: Rarity) -> Rgba<u8> {
    match rarity {
        Rarity::Normal => NORMAL,
        Rarity::Magic => MAGIC,
        Rarity::Rare => RARE,
        Rarity::Unique => UNIQUE_NAME,
        Rarity::Currency => CURRENCY,
        Rarity::Quest => QUEST,
    }
}

/// Value color for an elemental damage range.
pub fn element_color(element: Element) -> Rgba<u8> {
    match element {
        Element::Fire => FIRE,
        Element::Cold => COLD,
        Element::Lightning => LIGHTNING,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_name_override() {
        assert_eq!(name_color(Rarity::Unique), UNIQUE_NAME);
        assert_ne!(name_color(Rarity::Unique), UNIQUE);
        assert_eq!(name_color(Rarity::Magic), MAGIC);
    }
}
