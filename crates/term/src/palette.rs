//! Tile color table.

use crate::fb::{CellStyle, Rgb};

pub const BOARD_BG: Rgb = Rgb::hex("#bbada0");
pub const EMPTY_BG: Rgb = Rgb::hex("#cdc1b4");
pub const DARK_TEXT: Rgb = Rgb::hex("#776e65");
pub const LIGHT_TEXT: Rgb = Rgb::hex("#f9f6f2");
/// Background for tiles above 2048
pub const SUPER_TILE: Rgb = Rgb::hex("#3c3a32");

const TILE_COLORS: [Rgb; 11] = [
    Rgb::hex("#eee4da"),
    Rgb::hex("#ede0c8"),
    Rgb::hex("#f2b179"),
    Rgb::hex("#f59563"),
    Rgb::hex("#f67c5f"),
    Rgb::hex("#f65e3b"),
    Rgb::hex("#edcf72"),
    Rgb::hex("#edcc61"),
    Rgb::hex("#edc850"),
    Rgb::hex("#edc53f"),
    Rgb::hex("#edc22e"),
];

/// Background color for a tile value. Zero is the empty cell color.
pub fn tile_color(value: u32) -> Rgb {
    if value == 0 {
        return EMPTY_BG;
    }
    // 2 -> 0, 4 -> 1, ... 2048 -> 10
    let exp = value.trailing_zeros() as usize;
    if value.is_power_of_two() && (1..=TILE_COLORS.len()).contains(&exp) {
        TILE_COLORS[exp - 1]
    } else {
        SUPER_TILE
    }
}

pub fn text_color(value: u32) -> Rgb {
    if value <= 4 {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}

pub fn tile_style(value: u32, bold: bool) -> CellStyle {
    CellStyle {
        fg: text_color(value),
        bg: tile_color(value),
        bold,
        dim: false,
    }
}
