//! View models for the practice pane and move list.
//!
//! Display-ready copies of trainer state. They live in the UI layer, not the
//! domain layer.

use crate::domain::{Difficulty, PracticeMessage, PracticeStatus};

/// One numbered row of the move list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovePairDisplay {
    pub move_num: usize,
    pub white: String,
    pub black: Option<String>,
}

/// One entry of the opening picker
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpeningDisplay {
    pub id: String,
    pub name: String,
    pub difficulty: Difficulty,
    pub ply_count: usize,
    pub is_selected: bool,
}

/// Everything the practice pane shows about the running session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressDisplay {
    pub opening_name: Option<String>,
    pub status: PracticeStatus,
    pub cursor: usize,
    pub total: usize,
    pub expected: Option<String>,
    pub awaiting_reply: bool,
    pub message: Option<PracticeMessage>,
    /// Check / mate / stalemate line, if any
    pub board_state: Option<String>,
}

impl ProgressDisplay {
    pub fn progress_text(&self) -> String {
        format!("{} / {} moves", self.cursor, self.total)
    }

    /// Fraction of the line done, 0.0 ..= 1.0
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.cursor as f32 / self.total as f32
        }
    }
}
