//! Practice pane - opening picker, start/reset controls and session feedback.

use gpui::{App, Div, Entity, SharedString, div, prelude::*, px, rgb};
use gpui_component::button::{Button, ButtonVariants};

use crate::domain::PracticeStatus;
use crate::models::GameModel;
use crate::ui::display::{opening_list, progress};
use crate::ui::theme::{
    ACCENT, BOARD_PADDING, BORDER_COLOR, MESSAGE_ERROR, MOVE_LIST_BG, TEXT_PRIMARY,
    TEXT_SECONDARY, difficulty_color, tone_color,
};
use crate::ui::view_models::{OpeningDisplay, ProgressDisplay};

const OPENING_HOVER_BG: u32 = 0x3a3a3a;
const OPENING_SELECTED_BG: u32 = 0x4a6da7;
const PROGRESS_TRACK: u32 = 0x3a3a3a;
const PROGRESS_BAR_WIDTH: f32 = 200.0;

/// Render the practice pane for a given game model.
pub fn render_practice_pane(model: &Entity<GameModel>, cx: &App) -> Div {
    let game = model.read(cx);
    let openings = opening_list(game);
    let progress = progress(game);
    let notice = game.notice().map(str::to_string);
    let has_selection = game.selected_opening().is_some();

    let model_start = model.clone();
    let start_button = Button::new("start-practice")
        .label(if progress.status == PracticeStatus::NotStarted {
            "Start Practice"
        } else {
            "Restart"
        })
        .primary()
        .compact()
        .on_click(move |_, _, cx| {
            model_start.update(cx, |game, cx| {
                game.start_practice();
                cx.notify();
            });
        });

    let model_reset = model.clone();
    let reset_button = Button::new("reset-practice")
        .label("Reset Practice")
        .danger()
        .compact()
        .on_click(move |_, _, cx| {
            model_reset.update(cx, |game, cx| {
                game.reset_practice();
                cx.notify();
            });
        });
    let show_reset = has_selection || progress.status != PracticeStatus::NotStarted;

    let pane = div()
        .flex_shrink_0()
        .flex()
        .flex_col()
        .bg(rgb(MOVE_LIST_BG))
        .border_1()
        .border_color(rgb(BORDER_COLOR))
        .rounded_md()
        .overflow_hidden()
        // Header with title and controls
        .child(
            div()
                .flex()
                .items_center()
                .justify_between()
                .px_4()
                .py_2()
                .border_b_1()
                .border_color(rgb(BORDER_COLOR))
                .child(
                    div()
                        .text_color(rgb(TEXT_PRIMARY))
                        .font_weight(gpui::FontWeight::SEMIBOLD)
                        .child("Practice"),
                )
                .child(
                    div()
                        .flex()
                        .gap_2()
                        .child(start_button)
                        .when(show_reset, |el| el.child(reset_button)),
                ),
        )
        .child(render_opening_list(model, openings))
        .child(render_progress(&progress))
        .when_some(notice, |el, notice| {
            el.child(
                div()
                    .px_4()
                    .pb_3()
                    .text_sm()
                    .text_color(rgb(MESSAGE_ERROR))
                    .child(notice),
            )
        });

    div()
        .flex_shrink_0()
        .flex()
        .flex_col()
        .p(px(BOARD_PADDING))
        .child(pane)
}

/// Clickable list of openings with difficulty badges
fn render_opening_list(model: &Entity<GameModel>, openings: Vec<OpeningDisplay>) -> Div {
    div()
        .flex()
        .flex_col()
        .gap_px()
        .px_2()
        .py_2()
        .border_b_1()
        .border_color(rgb(BORDER_COLOR))
        .children(openings.into_iter().map(|opening| {
            let model_select = model.clone();
            let id = opening.id.clone();
            div()
                .id(SharedString::from(format!("opening-{}", opening.id)))
                .flex()
                .items_center()
                .justify_between()
                .px_2()
                .py_1()
                .rounded(px(3.0))
                .cursor_pointer()
                .when(opening.is_selected, |el| el.bg(rgb(OPENING_SELECTED_BG)))
                .when(!opening.is_selected, |el| {
                    el.hover(|s| s.bg(rgb(OPENING_HOVER_BG)))
                })
                .on_click(move |_ev, _window, cx| {
                    model_select.update(cx, |game, cx| {
                        game.select_opening(&id);
                        cx.notify();
                    });
                })
                .child(
                    div()
                        .text_sm()
                        .text_color(rgb(TEXT_PRIMARY))
                        .child(opening.name),
                )
                .child(
                    div()
                        .flex()
                        .items_center()
                        .gap_2()
                        .child(
                            div()
                                .text_xs()
                                .text_color(rgb(TEXT_SECONDARY))
                                .child(format!("{} plies", opening.ply_count)),
                        )
                        .child(
                            div()
                                .px_1()
                                .rounded(px(3.0))
                                .border_1()
                                .border_color(difficulty_color(opening.difficulty))
                                .text_xs()
                                .text_color(difficulty_color(opening.difficulty))
                                .child(opening.difficulty.to_string()),
                        ),
                )
        }))
}

/// Session status, progress bar, expected move and the feedback message
fn render_progress(progress: &ProgressDisplay) -> Div {
    let Some(name) = progress.opening_name.clone() else {
        return div()
            .px_4()
            .py_3()
            .text_sm()
            .text_color(rgb(TEXT_SECONDARY))
            .child("Free play. Select an opening and start practice.")
            .when_some(progress.board_state.clone(), |el, state| {
                el.child(div().text_color(rgb(ACCENT)).child(state))
            });
    };

    let bar_fill = PROGRESS_BAR_WIDTH * progress.fraction();
    let turn_text = match progress.status {
        PracticeStatus::InProgress if progress.awaiting_reply => {
            Some("Opponent is replying...".to_string())
        }
        PracticeStatus::InProgress => progress
            .expected
            .as_ref()
            .map(|m| format!("Your move: {m}")),
        _ => None,
    };

    div()
        .flex()
        .flex_col()
        .gap_2()
        .px_4()
        .py_3()
        // Opening name and status
        .child(
            div()
                .flex()
                .items_center()
                .justify_between()
                .child(
                    div()
                        .text_color(rgb(ACCENT))
                        .font_weight(gpui::FontWeight::SEMIBOLD)
                        .child(name),
                )
                .child(
                    div()
                        .text_xs()
                        .text_color(rgb(TEXT_SECONDARY))
                        .child(progress.status.to_string()),
                ),
        )
        // Progress bar
        .child(
            div()
                .flex()
                .items_center()
                .gap_2()
                .child(
                    div()
                        .w(px(PROGRESS_BAR_WIDTH))
                        .h(px(6.0))
                        .rounded(px(3.0))
                        .bg(rgb(PROGRESS_TRACK))
                        .child(
                            div()
                                .w(px(bar_fill))
                                .h_full()
                                .rounded(px(3.0))
                                .bg(rgb(ACCENT)),
                        ),
                )
                .child(
                    div()
                        .text_xs()
                        .text_color(rgb(TEXT_SECONDARY))
                        .child(progress.progress_text()),
                ),
        )
        .when_some(turn_text, |el, text| {
            el.child(div().text_sm().text_color(rgb(TEXT_PRIMARY)).child(text))
        })
        .when_some(progress.message.clone(), |el, message| {
            el.child(
                div()
                    .px_2()
                    .py_1()
                    .rounded(px(4.0))
                    .border_1()
                    .border_color(tone_color(message.tone))
                    .text_sm()
                    .text_color(tone_color(message.tone))
                    .child(message.text),
            )
        })
        .when_some(progress.board_state.clone(), |el, state| {
            el.child(div().text_sm().text_color(rgb(ACCENT)).child(state))
        })
}
