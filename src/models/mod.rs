mod game;

pub use game::{DragState, GameModel};
