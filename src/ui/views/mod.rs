mod board_view;
mod move_list;
mod practice_pane;

pub use board_view::ChessBoardView;
pub use move_list::render_move_list_panel;
pub use practice_pane::render_practice_pane;
