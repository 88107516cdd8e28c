//! Game state model - the application layer around the opening trainer.

use std::time::Duration;

use gpui::{AsyncApp, Context, Task, WeakEntity};
use shakmaty::Position;
use tracing::{debug, warn};

use crate::domain::{Catalogue, MoveOutcome, Opening, Piece, Trainer, shakmaty_to_piece, to_square};
use crate::ui::BoardLayout;

/// State for a piece being dragged
#[derive(Clone, Copy, Debug)]
pub struct DragState {
    pub piece: Piece,
    pub from_row: usize,
    pub from_col: usize,
    /// Mouse position relative to window
    pub mouse_x: f32,
    pub mouse_y: f32,
}

/// The main model: trainer, opening choice and board interaction state
pub struct GameModel {
    trainer: Trainer,
    catalogue: Catalogue,
    /// Opening chosen in the practice pane, not necessarily started
    selected_opening: Option<String>,
    /// Shown when there is no trainer message, e.g. "select an opening"
    notice: Option<String>,
    /// Pause before the book reply so the user's move renders first
    reply_delay: Duration,
    /// Drag state for piece movement
    pub drag_state: Option<DragState>,
    /// Layout derived from the measured board panel
    pub layout: BoardLayout,
    /// Pending book reply; dropping it cancels the reply
    _reply_task: Option<Task<()>>,
}

impl GameModel {
    pub fn new(catalogue: Catalogue, reply_delay: Duration) -> Self {
        Self {
            trainer: Trainer::new(),
            catalogue,
            selected_opening: None,
            notice: None,
            reply_delay,
            drag_state: None,
            layout: BoardLayout::default(),
            _reply_task: None,
        }
    }

    pub fn trainer(&self) -> &Trainer {
        &self.trainer
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn selected_opening(&self) -> Option<&Opening> {
        self.selected_opening
            .as_deref()
            .and_then(|id| self.catalogue.get(id))
    }

    /// Choose an opening to practise. Returns false for an unknown id.
    pub fn select_opening(&mut self, id: &str) -> bool {
        if self.catalogue.get(id).is_none() {
            return false;
        }
        self.selected_opening = Some(id.to_string());
        self.notice = None;
        true
    }

    /// Start practising the selected opening from the initial position
    pub fn start_practice(&mut self) {
        self._reply_task = None;
        self.drag_state = None;

        let Some(opening) = self.selected_opening().cloned() else {
            self.notice = Some("Please select an opening to start practice.".to_string());
            return;
        };
        match self.trainer.start_practice(&opening) {
            Ok(()) => self.notice = None,
            Err(e) => {
                warn!(error = %e, "cannot start practice");
                self.notice = Some(e.to_string());
            }
        }
    }

    /// Drop the session and selection, back to a fresh board
    pub fn reset_practice(&mut self) {
        self._reply_task = None;
        self.drag_state = None;
        self.trainer.reset();
        self.selected_opening = None;
        self.notice = None;
    }

    /// Get piece at row/col from the current position
    pub fn piece_at(&self, row: usize, col: usize) -> Option<Piece> {
        let sq = to_square(row, col);
        self.trainer
            .position()
            .board()
            .piece_at(sq)
            .map(shakmaty_to_piece)
    }

    /// Whether a piece may be picked up. Finished sessions still allow a drag
    /// so the drop can report that the session is over.
    pub fn can_drag(&self, piece: Piece) -> bool {
        let finished = self
            .trainer
            .session()
            .is_some_and(|session| session.is_finished());
        piece.color == self.trainer.turn() && (self.trainer.accepts_input() || finished)
    }

    /// Whether a square was part of the last ply
    pub fn is_last_move_square(&self, row: usize, col: usize) -> bool {
        let sq = to_square(row, col);
        self.trainer
            .last_move()
            .is_some_and(|(from, to)| from == sq || to == sq)
    }

    /// Forward a drop gesture to the trainer. A rejected move leaves the
    /// board as it was; the trainer's message says why.
    pub fn try_move(&mut self, from: (usize, usize), to: (usize, usize), cx: &mut Context<Self>) {
        let outcome = self
            .trainer
            .submit_move(to_square(from.0, from.1), to_square(to.0, to.1));
        debug!(?outcome, "move submitted");

        if let MoveOutcome::Accepted { .. } = outcome {
            self.schedule_book_reply(cx);
        }
    }

    fn schedule_book_reply(&mut self, cx: &mut Context<Self>) {
        let delay = self.reply_delay;
        let task = cx.spawn(
            async move |weak_entity: WeakEntity<GameModel>, cx: &mut AsyncApp| {
                cx.background_executor().timer(delay).await;
                let _ = weak_entity.update(cx, |game, cx| {
                    let outcome = game.trainer.play_book_reply();
                    debug!(?outcome, "book reply");
                    cx.notify();
                });
            },
        );
        self._reply_task = Some(task);
    }
}
