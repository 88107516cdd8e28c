//! Theme constants and colors for the practice UI.

use gpui::{Rgba, rgb};

use crate::domain::{Difficulty, Tone};

// Layout constants
pub const BOARD_PADDING: f32 = 20.0;
pub const PIECE_SCALE: f32 = 0.98; // piece size relative to square
pub const GHOST_OPACITY: f32 = 0.4;
pub const MIN_SQUARE_SIZE: f32 = 30.0;

// Initial panel sizes
pub const INITIAL_LEFT_PANEL: f32 = 540.0;
pub const INITIAL_RIGHT_PANEL: f32 = 320.0;

// Board colors
pub const LIGHT_SQUARE: u32 = 0xEFD9B5;
pub const DARK_SQUARE: u32 = 0xB48764;
pub const LAST_MOVE_LIGHT: u32 = 0xF5E98C;
pub const LAST_MOVE_DARK: u32 = 0xD1B94F;

// Panel colors
pub const PANEL_BG: u32 = 0x2a2a2a;
pub const MOVE_LIST_BG: u32 = 0x1e1e1e;
pub const BORDER_COLOR: u32 = 0x4a4a4a;
pub const TEXT_PRIMARY: u32 = 0xffffff;
pub const TEXT_SECONDARY: u32 = 0x888888;
pub const ACCENT: u32 = 0xfbbf24;

// Feedback colors
pub const MESSAGE_SUCCESS: u32 = 0x4ade80;
pub const MESSAGE_ERROR: u32 = 0xf87171;
pub const MESSAGE_INFO: u32 = 0xcbd5e1;

/// Get the color for a board square based on its position
pub fn square_color(row: usize, col: usize, highlighted: bool) -> Rgba {
    match ((row + col) % 2 == 0, highlighted) {
        (true, false) => rgb(LIGHT_SQUARE),
        (false, false) => rgb(DARK_SQUARE),
        (true, true) => rgb(LAST_MOVE_LIGHT),
        (false, true) => rgb(LAST_MOVE_DARK),
    }
}

pub fn tone_color(tone: Tone) -> Rgba {
    match tone {
        Tone::Info => rgb(MESSAGE_INFO),
        Tone::Success => rgb(MESSAGE_SUCCESS),
        Tone::Error => rgb(MESSAGE_ERROR),
    }
}

/// Badge color per difficulty tier: green, yellow, red
pub fn difficulty_color(difficulty: Difficulty) -> Rgba {
    match difficulty {
        Difficulty::Beginner => rgb(0x4ade80),
        Difficulty::Intermediate => rgb(0xfacc15),
        Difficulty::Advanced => rgb(0xf87171),
    }
}
