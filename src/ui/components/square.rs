//! Square rendering component.

use crate::domain::Piece;
use crate::ui::components::render_piece;
use crate::ui::theme::{GHOST_OPACITY, square_color};
use gpui::{div, prelude::*, px};

/// What one board square shows
#[derive(Clone, Copy, Debug)]
pub struct SquareView {
    pub row: usize,
    pub col: usize,
    pub piece: Option<Piece>,
    /// The piece is being dragged away from this square
    pub is_being_dragged: bool,
    /// Part of the last ply played
    pub is_last_move: bool,
}

/// Render a single board square with optional piece
pub fn render_square(square: SquareView, square_size: f32, piece_size: f32) -> impl IntoElement {
    // ghost piece on the original square while dragging
    let opacity = if square.is_being_dragged {
        GHOST_OPACITY
    } else {
        1.0
    };

    div()
        .flex_shrink_0() // never shrink - maintain aspect ratio
        .size(px(square_size))
        .bg(square_color(square.row, square.col, square.is_last_move))
        .flex()
        .items_center()
        .justify_center()
        .when_some(square.piece, |el, p| {
            el.child(render_piece(p, piece_size, opacity))
        })
}
