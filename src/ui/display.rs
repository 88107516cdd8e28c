//! Display generation for the practice pane and move list.
//!
//! This module transforms game state into display-ready view models.
//! It lives in the UI layer and depends on domain + models, not vice versa.

use crate::models::GameModel;
use crate::ui::view_models::{MovePairDisplay, OpeningDisplay, ProgressDisplay};

/// Group played notation into numbered white/black pairs.
pub fn move_pairs(history: &[String]) -> Vec<MovePairDisplay> {
    history
        .chunks(2)
        .enumerate()
        .map(|(i, chunk)| MovePairDisplay {
            move_num: i + 1,
            white: chunk[0].clone(),
            black: chunk.get(1).cloned(),
        })
        .collect()
}

/// The catalogue ordered by difficulty, with the current selection marked.
pub fn opening_list(game: &GameModel) -> Vec<OpeningDisplay> {
    let selected = game.selected_opening().map(|o| o.id.as_str());
    game.catalogue()
        .by_difficulty()
        .into_iter()
        .map(|o| OpeningDisplay {
            id: o.id.clone(),
            name: o.name.clone(),
            difficulty: o.difficulty,
            ply_count: o.ply_count(),
            is_selected: selected == Some(o.id.as_str()),
        })
        .collect()
}

/// Session progress and feedback for the practice pane.
pub fn progress(game: &GameModel) -> ProgressDisplay {
    let trainer = game.trainer();
    let session = trainer.session();

    ProgressDisplay {
        opening_name: session.map(|s| s.opening_name().to_string()),
        status: trainer.status(),
        cursor: trainer.cursor(),
        total: session.map_or(0, |s| s.len()),
        expected: trainer.expected_move().map(str::to_string),
        awaiting_reply: trainer.reply_pending(),
        message: trainer.message().cloned(),
        board_state: trainer.board_state().describe(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Catalogue, PracticeStatus};
    use std::time::Duration;

    fn model() -> GameModel {
        GameModel::new(Catalogue::builtin().unwrap(), Duration::from_millis(300))
    }

    #[test]
    fn test_move_pairs() {
        let history: Vec<String> = ["e4", "e5", "Nf3"].iter().map(|s| s.to_string()).collect();
        let pairs = move_pairs(&history);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].white, "e4");
        assert_eq!(pairs[0].black.as_deref(), Some("e5"));
        assert_eq!(pairs[1].move_num, 2);
        assert_eq!(pairs[1].black, None);
        assert!(move_pairs(&[]).is_empty());
    }

    #[test]
    fn test_opening_list_marks_selection() {
        let mut game = model();
        assert!(game.select_opening("ruy-lopez"));
        assert!(!game.select_opening("no-such-opening"));

        let list = opening_list(&game);
        assert_eq!(list.len(), 8);
        assert_eq!(list.iter().filter(|o| o.is_selected).count(), 1);
        assert!(list.iter().any(|o| o.id == "ruy-lopez" && o.is_selected));
        assert!(list.windows(2).all(|w| w[0].difficulty <= w[1].difficulty));
    }

    #[test]
    fn test_progress_before_and_after_start() {
        let mut game = model();
        let idle = progress(&game);
        assert_eq!(idle.status, PracticeStatus::NotStarted);
        assert_eq!(idle.total, 0);
        assert_eq!(idle.fraction(), 0.0);

        game.start_practice();
        assert_eq!(
            game.notice(),
            Some("Please select an opening to start practice.")
        );

        game.select_opening("queens-gambit");
        game.start_practice();
        let running = progress(&game);
        assert_eq!(running.status, PracticeStatus::InProgress);
        assert_eq!(running.opening_name.as_deref(), Some("Queen's Gambit"));
        assert_eq!(running.progress_text(), "0 / 3 moves");
        assert_eq!(running.expected.as_deref(), Some("d4"));

        game.reset_practice();
        let reset = progress(&game);
        assert_eq!(reset.status, PracticeStatus::NotStarted);
        assert!(reset.message.is_none());
        assert!(game.selected_opening().is_none());
    }
}
