//! Move list panel - the plies played since the last reset, in numbered pairs.

use gpui::{App, Div, Entity, div, prelude::*, px, rgb};

use crate::models::GameModel;
use crate::ui::display::move_pairs;
use crate::ui::theme::{BOARD_PADDING, BORDER_COLOR, MOVE_LIST_BG, TEXT_PRIMARY, TEXT_SECONDARY};

/// Render the move list panel for a given game model.
pub fn render_move_list_panel(model: &Entity<GameModel>, cx: &App) -> Div {
    let game = model.read(cx);
    let pairs = move_pairs(game.trainer().history());

    let moves_content = if pairs.is_empty() {
        div()
            .text_sm()
            .text_color(rgb(TEXT_SECONDARY))
            .child("No moves yet")
    } else {
        div().flex().flex_col().gap_1().children(pairs.into_iter().map(|pair| {
            div()
                .flex()
                .items_center()
                .gap_2()
                .py_1()
                .child(
                    div()
                        .text_color(rgb(TEXT_SECONDARY))
                        .text_sm()
                        .w(px(40.0))
                        .child(format!("{}.", pair.move_num)),
                )
                .child(
                    div()
                        .text_color(rgb(TEXT_PRIMARY))
                        .text_sm()
                        .flex_1()
                        .child(pair.white),
                )
                .when_some(pair.black, |el, black| {
                    el.child(
                        div()
                            .text_color(rgb(TEXT_PRIMARY))
                            .text_sm()
                            .flex_1()
                            .child(black),
                    )
                })
        }))
    };

    let move_list = div()
        .flex_1()
        .min_h_0()
        .flex()
        .flex_col()
        .bg(rgb(MOVE_LIST_BG))
        .border_1()
        .border_color(rgb(BORDER_COLOR))
        .rounded_md()
        .overflow_hidden()
        // Header (fixed)
        .child(
            div()
                .p_4()
                .pb_2()
                .text_color(rgb(TEXT_PRIMARY))
                .border_b_1()
                .border_color(rgb(BORDER_COLOR))
                .child("Move History"),
        )
        // Scrollable moves content
        .child(
            div()
                .id("move-list-scroll")
                .flex_1()
                .overflow_y_scroll()
                .p_4()
                .pt_2()
                .child(moves_content),
        );

    div()
        .flex_1()
        .min_h_0()
        .flex()
        .flex_col()
        .px(px(BOARD_PADDING))
        .pb(px(BOARD_PADDING))
        .child(move_list)
}
