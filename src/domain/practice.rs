//! Opening practice: a session cursor over an opening line, and the trainer
//! that drives it against the current position.
//!
//! The user plays the side that moves first in the line. After each correct
//! move the trainer schedules the scripted ("book") reply; the caller decides
//! when to play it via [`Trainer::play_book_reply`].

use derive_more::Display;
use shakmaty::{Chess, Position, Square};
use tracing::{debug, info, instrument, warn};

use crate::domain::chess::{
    BoardState, PieceColor, find_legal_move, find_move_by_notation, move_squares, notation,
    notation_matches,
};
use crate::domain::opening::{Opening, OpeningError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display)]
pub enum PracticeStatus {
    #[default]
    #[display("Not started")]
    NotStarted,
    #[display("In progress")]
    InProgress,
    Completed,
    Failed,
}

/// Progress through one opening line
#[derive(Clone, Debug)]
pub struct PracticeSession {
    opening_id: String,
    opening_name: String,
    moves: Vec<String>,
    /// Index of the next expected move; never exceeds `moves.len()`
    cursor: usize,
    status: PracticeStatus,
}

impl PracticeSession {
    pub fn new(opening: &Opening) -> Result<Self, OpeningError> {
        Ok(Self {
            opening_id: opening.id.clone(),
            opening_name: opening.name.clone(),
            moves: opening.line()?,
            cursor: 0,
            status: PracticeStatus::NotStarted,
        })
    }

    pub fn start(&mut self) {
        if self.status == PracticeStatus::NotStarted {
            self.status = PracticeStatus::InProgress;
        }
    }

    pub fn opening_id(&self) -> &str {
        &self.opening_id
    }

    pub fn opening_name(&self) -> &str {
        &self.opening_name
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn status(&self) -> PracticeStatus {
        self.status
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self.status,
            PracticeStatus::Completed | PracticeStatus::Failed
        )
    }

    /// The notation expected at the cursor, while the session is running
    pub fn expected_move(&self) -> Option<&str> {
        if self.status != PracticeStatus::InProgress {
            return None;
        }
        self.moves.get(self.cursor).map(String::as_str)
    }

    fn advance(&mut self) {
        if self.status != PracticeStatus::InProgress {
            return;
        }
        self.cursor = (self.cursor + 1).min(self.moves.len());
        if self.cursor == self.moves.len() {
            self.status = PracticeStatus::Completed;
        }
    }

    fn fail(&mut self) {
        if self.status == PracticeStatus::InProgress {
            self.status = PracticeStatus::Failed;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Error,
}

/// Inline feedback line shown next to the board
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PracticeMessage {
    pub text: String,
    pub tone: Tone,
}

impl PracticeMessage {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Info,
        }
    }

    fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Success,
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Error,
        }
    }
}

/// Why a move attempt was refused. The position is unchanged in every case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Not a legal move in the current position
    Illegal,
    /// Legal, but not the move of the line
    Unexpected { expected: String, played: String },
    /// The scripted reply has not been played yet
    AwaitingReply,
    /// The session is completed or failed
    SessionOver,
}

/// Result of feeding a move (or a scheduled reply) to the trainer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Free play move, no session active
    Played { notation: String },
    /// Correct move, the book reply is now pending
    Accepted { notation: String },
    /// Scripted reply played, the user is to move
    BookReply { notation: String },
    /// The line is finished
    Completed,
    /// The scripted reply could not be played; the board was reset
    Failed,
    Rejected(Rejection),
    /// Nothing to do
    Idle,
}

/// Owns the position and the practice session layered on top of it.
#[derive(Clone, Debug, Default)]
pub struct Trainer {
    position: Chess,
    session: Option<PracticeSession>,
    message: Option<PracticeMessage>,
    /// Notation of every ply played since the last reset
    history: Vec<String>,
    /// From/to squares of the most recent ply, for highlighting
    last_move: Option<(Square, Square)>,
    reply_pending: bool,
}

impl Trainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    pub fn session(&self) -> Option<&PracticeSession> {
        self.session.as_ref()
    }

    pub fn status(&self) -> PracticeStatus {
        self.session
            .as_ref()
            .map_or(PracticeStatus::NotStarted, PracticeSession::status)
    }

    pub fn cursor(&self) -> usize {
        self.session.as_ref().map_or(0, PracticeSession::cursor)
    }

    pub fn expected_move(&self) -> Option<&str> {
        self.session.as_ref().and_then(PracticeSession::expected_move)
    }

    pub fn message(&self) -> Option<&PracticeMessage> {
        self.message.as_ref()
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn last_move(&self) -> Option<(Square, Square)> {
        self.last_move
    }

    pub fn reply_pending(&self) -> bool {
        self.reply_pending
    }

    pub fn board_state(&self) -> BoardState {
        BoardState::of(&self.position)
    }

    pub fn turn(&self) -> PieceColor {
        self.position.turn().into()
    }

    /// Whether the user may pick up pieces right now
    pub fn accepts_input(&self) -> bool {
        match &self.session {
            None => !self.board_state().is_game_over(),
            Some(session) => session.status() == PracticeStatus::InProgress && !self.reply_pending,
        }
    }

    /// Reset the board and begin practising `opening`.
    #[instrument(skip(self, opening), fields(id = %opening.id))]
    pub fn start_practice(&mut self, opening: &Opening) -> Result<(), OpeningError> {
        let mut session = PracticeSession::new(opening)?;
        session.start();

        self.position = Chess::default();
        self.history.clear();
        self.last_move = None;
        self.reply_pending = false;
        self.message = session
            .expected_move()
            .map(|first| PracticeMessage::info(format!("Make the first move: {first}")));
        self.session = Some(session);

        info!(name = %opening.name, "practice started");
        Ok(())
    }

    /// Back to the initial position with no session and no message.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.position = Chess::default();
        self.session = None;
        self.message = None;
        self.history.clear();
        self.last_move = None;
        self.reply_pending = false;
    }

    /// Feed a from/to gesture from the board.
    #[instrument(skip(self))]
    pub fn submit_move(&mut self, from: Square, to: Square) -> MoveOutcome {
        let Some(session) = self.session.as_mut() else {
            return self.free_play(from, to);
        };

        if session.is_finished() {
            self.message = Some(PracticeMessage::error(
                "Practice session ended. Please reset to try again.",
            ));
            return MoveOutcome::Rejected(Rejection::SessionOver);
        }
        if self.reply_pending {
            return MoveOutcome::Rejected(Rejection::AwaitingReply);
        }
        let Some(expected) = session.expected_move().map(str::to_string) else {
            return MoveOutcome::Rejected(Rejection::SessionOver);
        };

        let Some(m) = find_legal_move(&self.position, from, to) else {
            debug!("illegal move");
            self.message = Some(PracticeMessage::error("Invalid move. Try again."));
            return MoveOutcome::Rejected(Rejection::Illegal);
        };

        let played = notation(&self.position, &m);
        let squares = move_squares(&m);
        if !notation_matches(&played, &expected) {
            debug!(%played, %expected, "unexpected move");
            self.message = Some(PracticeMessage::error(format!(
                "Incorrect move. Expected {expected}. Try again."
            )));
            return MoveOutcome::Rejected(Rejection::Unexpected { expected, played });
        }

        let Ok(next) = self.position.clone().play(m) else {
            self.message = Some(PracticeMessage::error("Invalid move. Try again."));
            return MoveOutcome::Rejected(Rejection::Illegal);
        };
        self.position = next;
        self.history.push(played.clone());
        self.last_move = squares;
        session.advance();
        debug!(cursor = session.cursor(), %played, "move accepted");

        if session.status() == PracticeStatus::Completed {
            self.message = Some(PracticeMessage::success(
                "Congratulations! You completed the opening!",
            ));
            info!(id = session.opening_id(), "opening completed");
            return MoveOutcome::Completed;
        }

        self.reply_pending = true;
        self.message = Some(PracticeMessage::success("Correct move!"));
        MoveOutcome::Accepted { notation: played }
    }

    /// Play the scripted reply scheduled by the last accepted move.
    ///
    /// If the line's next notation is not legal here the session fails and
    /// the board goes back to the initial position.
    #[instrument(skip(self))]
    pub fn play_book_reply(&mut self) -> MoveOutcome {
        if !self.reply_pending {
            return MoveOutcome::Idle;
        }
        self.reply_pending = false;

        let Some(session) = self.session.as_mut() else {
            return MoveOutcome::Idle;
        };
        let Some(expected) = session.expected_move().map(str::to_string) else {
            return MoveOutcome::Idle;
        };

        let reply = find_move_by_notation(&self.position, &expected).and_then(|m| {
            let played = notation(&self.position, &m);
            let squares = move_squares(&m);
            self.position
                .clone()
                .play(m)
                .ok()
                .map(|next| (next, played, squares))
        });

        let Some((next, played, squares)) = reply else {
            warn!(
                id = session.opening_id(),
                %expected,
                cursor = session.cursor(),
                "book reply not legal, failing session"
            );
            session.fail();
            self.position = Chess::default();
            self.history.clear();
            self.last_move = None;
            self.message = Some(PracticeMessage::error(
                "Error: Computer could not make expected move. Resetting practice.",
            ));
            return MoveOutcome::Failed;
        };

        self.position = next;
        self.history.push(played.clone());
        self.last_move = squares;
        session.advance();
        debug!(cursor = session.cursor(), %played, "book reply played");

        if session.status() == PracticeStatus::Completed {
            self.message = Some(PracticeMessage::success(
                "Congratulations! You completed the opening!",
            ));
            info!(id = session.opening_id(), "opening completed");
            return MoveOutcome::Completed;
        }

        if let Some(next_move) = session.expected_move() {
            self.message = Some(PracticeMessage::info(format!(
                "Make your next move: {next_move}"
            )));
        }
        MoveOutcome::BookReply { notation: played }
    }

    fn free_play(&mut self, from: Square, to: Square) -> MoveOutcome {
        let Some(m) = find_legal_move(&self.position, from, to) else {
            return MoveOutcome::Rejected(Rejection::Illegal);
        };
        let played = notation(&self.position, &m);
        let squares = move_squares(&m);
        match self.position.clone().play(m) {
            Ok(next) => {
                self.position = next;
                self.history.push(played.clone());
                self.last_move = squares;
                MoveOutcome::Played { notation: played }
            }
            Err(_) => MoveOutcome::Rejected(Rejection::Illegal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::opening::{Catalogue, Difficulty};

    fn queens_gambit() -> Opening {
        Opening::new("queens-gambit", "Queen's Gambit", Difficulty::Beginner, "1.d4 d5 2.c4")
    }

    fn is_initial(position: &Chess) -> bool {
        position.board() == Chess::default().board() && position.turn() == shakmaty::Color::White
    }

    /// Play the user's expected move by its squares, as the board would.
    fn play_expected(trainer: &mut Trainer) -> MoveOutcome {
        let expected = trainer.expected_move().unwrap().to_string();
        let m = find_move_by_notation(trainer.position(), &expected).unwrap();
        let (from, to) = move_squares(&m).unwrap();
        trainer.submit_move(from, to)
    }

    #[test]
    fn test_queens_gambit_walkthrough() {
        let mut trainer = Trainer::new();
        assert_eq!(trainer.status(), PracticeStatus::NotStarted);

        trainer.start_practice(&queens_gambit()).unwrap();
        assert_eq!(trainer.status(), PracticeStatus::InProgress);
        assert_eq!(trainer.message().unwrap().text, "Make the first move: d4");

        let outcome = trainer.submit_move(Square::D2, Square::D4);
        assert_eq!(
            outcome,
            MoveOutcome::Accepted {
                notation: "d4".to_string()
            }
        );
        assert_eq!(trainer.cursor(), 1);
        assert!(trainer.reply_pending());
        assert!(!trainer.accepts_input());

        let outcome = trainer.play_book_reply();
        assert_eq!(
            outcome,
            MoveOutcome::BookReply {
                notation: "d5".to_string()
            }
        );
        assert_eq!(trainer.cursor(), 2);
        assert_eq!(trainer.last_move(), Some((Square::D7, Square::D5)));
        assert_eq!(trainer.message().unwrap().text, "Make your next move: c4");

        assert_eq!(trainer.submit_move(Square::C2, Square::C4), MoveOutcome::Completed);
        assert_eq!(trainer.cursor(), 3);
        assert_eq!(trainer.status(), PracticeStatus::Completed);
        assert_eq!(trainer.history(), &["d4", "d5", "c4"]);
        assert_eq!(trainer.message().unwrap().tone, Tone::Success);
    }

    #[test]
    fn test_wrong_first_move_is_rejected() {
        let mut trainer = Trainer::new();
        trainer.start_practice(&queens_gambit()).unwrap();
        let before = trainer.position().clone();

        let outcome = trainer.submit_move(Square::E2, Square::E4);
        assert_eq!(
            outcome,
            MoveOutcome::Rejected(Rejection::Unexpected {
                expected: "d4".to_string(),
                played: "e4".to_string(),
            })
        );
        assert_eq!(trainer.cursor(), 0);
        assert_eq!(trainer.status(), PracticeStatus::InProgress);
        assert_eq!(trainer.position().board(), before.board());
        assert!(trainer.history().is_empty());
        assert_eq!(
            trainer.message().unwrap().text,
            "Incorrect move. Expected d4. Try again."
        );
    }

    #[test]
    fn test_illegal_move_is_rejected() {
        let mut trainer = Trainer::new();
        trainer.start_practice(&queens_gambit()).unwrap();

        let outcome = trainer.submit_move(Square::D2, Square::D5);
        assert_eq!(outcome, MoveOutcome::Rejected(Rejection::Illegal));
        assert_eq!(trainer.cursor(), 0);
        assert!(is_initial(trainer.position()));
        assert_eq!(trainer.message().unwrap().text, "Invalid move. Try again.");
    }

    #[test]
    fn test_wrong_move_after_book_reply_is_rejected() {
        let mut trainer = Trainer::new();
        trainer.start_practice(&queens_gambit()).unwrap();
        trainer.submit_move(Square::D2, Square::D4);
        trainer.play_book_reply();
        let before = trainer.position().clone();

        let outcome = trainer.submit_move(Square::G1, Square::F3);
        assert!(matches!(
            outcome,
            MoveOutcome::Rejected(Rejection::Unexpected { ref expected, .. }) if expected == "c4"
        ));
        assert_eq!(trainer.cursor(), 2);
        assert_eq!(trainer.status(), PracticeStatus::InProgress);
        assert_eq!(trainer.position().board(), before.board());
        assert_eq!(trainer.position().turn(), before.turn());
        assert_eq!(trainer.history(), &["d4", "d5"]);
        assert_eq!(trainer.last_move(), Some((Square::D7, Square::D5)));

        // An illegal move mid-line changes nothing either
        let outcome = trainer.submit_move(Square::C2, Square::C5);
        assert_eq!(outcome, MoveOutcome::Rejected(Rejection::Illegal));
        assert_eq!(trainer.cursor(), 2);
        assert_eq!(trainer.position().board(), before.board());
        assert_eq!(trainer.expected_move(), Some("c4"));

        assert_eq!(trainer.submit_move(Square::C2, Square::C4), MoveOutcome::Completed);
    }

    #[test]
    fn test_move_while_reply_pending_is_rejected() {
        let mut trainer = Trainer::new();
        trainer.start_practice(&queens_gambit()).unwrap();
        trainer.submit_move(Square::D2, Square::D4);

        let outcome = trainer.submit_move(Square::D7, Square::D5);
        assert_eq!(outcome, MoveOutcome::Rejected(Rejection::AwaitingReply));
        assert_eq!(trainer.cursor(), 1);
    }

    #[test]
    fn test_every_builtin_opening_completes() {
        let catalogue = Catalogue::builtin().unwrap();
        for opening in catalogue.iter() {
            let mut trainer = Trainer::new();
            trainer.start_practice(opening).unwrap();

            let mut last_cursor = 0;
            while trainer.status() == PracticeStatus::InProgress {
                let outcome = if trainer.reply_pending() {
                    trainer.play_book_reply()
                } else {
                    play_expected(&mut trainer)
                };
                assert!(
                    !matches!(outcome, MoveOutcome::Rejected(_) | MoveOutcome::Failed),
                    "{}: {outcome:?}",
                    opening.id
                );
                assert!(trainer.cursor() >= last_cursor);
                assert!(trainer.cursor() <= opening.ply_count());
                last_cursor = trainer.cursor();
            }

            assert_eq!(trainer.status(), PracticeStatus::Completed, "{}", opening.id);
            assert_eq!(trainer.cursor(), opening.ply_count());
        }
    }

    #[test]
    fn test_single_move_opening_completes_on_user_move() {
        let mut trainer = Trainer::new();
        let english = Opening::new("english", "English Opening", Difficulty::Beginner, "1.c4");
        trainer.start_practice(&english).unwrap();

        assert_eq!(trainer.submit_move(Square::C2, Square::C4), MoveOutcome::Completed);
        assert!(!trainer.reply_pending());
        assert_eq!(trainer.play_book_reply(), MoveOutcome::Idle);
    }

    #[test]
    fn test_unplayable_book_reply_fails_session() {
        let mut trainer = Trainer::new();
        let broken = Opening::new("broken", "Broken", Difficulty::Beginner, "1.d4 Nd5 2.c4");
        trainer.start_practice(&broken).unwrap();

        trainer.submit_move(Square::D2, Square::D4);
        assert_eq!(trainer.play_book_reply(), MoveOutcome::Failed);
        assert_eq!(trainer.status(), PracticeStatus::Failed);
        assert!(is_initial(trainer.position()));
        assert_eq!(trainer.cursor(), 1);
        assert_eq!(trainer.message().unwrap().tone, Tone::Error);

        // finished sessions refuse further input until reset
        assert_eq!(
            trainer.submit_move(Square::D2, Square::D4),
            MoveOutcome::Rejected(Rejection::SessionOver)
        );
        assert_eq!(
            trainer.message().unwrap().text,
            "Practice session ended. Please reset to try again."
        );
    }

    #[test]
    fn test_reset_returns_to_not_started() {
        let mut trainer = Trainer::new();
        trainer.start_practice(&queens_gambit()).unwrap();
        trainer.submit_move(Square::D2, Square::D4);

        trainer.reset();
        assert_eq!(trainer.status(), PracticeStatus::NotStarted);
        assert_eq!(trainer.cursor(), 0);
        assert!(trainer.message().is_none());
        assert!(trainer.last_move().is_none());
        assert!(trainer.history().is_empty());
        assert!(is_initial(trainer.position()));

        // a reply scheduled before the reset does nothing
        assert_eq!(trainer.play_book_reply(), MoveOutcome::Idle);
    }

    #[test]
    fn test_free_play_without_session() {
        let mut trainer = Trainer::new();
        let moves = [
            (Square::F2, Square::F3),
            (Square::E7, Square::E5),
            (Square::G2, Square::G4),
            (Square::D8, Square::H4),
        ];
        for (from, to) in moves {
            assert!(matches!(
                trainer.submit_move(from, to),
                MoveOutcome::Played { .. }
            ));
        }
        assert_eq!(trainer.history(), &["f3", "e5", "g4", "Qh4"]);
        assert_eq!(
            trainer.board_state(),
            BoardState::Checkmate {
                winner: PieceColor::Black
            }
        );
        assert!(!trainer.accepts_input());
        assert!(trainer.message().is_none());
    }

    #[test]
    fn test_free_play_rejects_wrong_side() {
        let mut trainer = Trainer::new();
        assert_eq!(
            trainer.submit_move(Square::E7, Square::E5),
            MoveOutcome::Rejected(Rejection::Illegal)
        );
        assert_eq!(trainer.turn(), PieceColor::White);
    }

    #[test]
    fn test_restart_discards_previous_progress() {
        let mut trainer = Trainer::new();
        trainer.start_practice(&queens_gambit()).unwrap();
        trainer.submit_move(Square::D2, Square::D4);

        let french = Opening::new("french", "French Defense", Difficulty::Intermediate, "1.e4 e6");
        trainer.start_practice(&french).unwrap();
        assert_eq!(trainer.cursor(), 0);
        assert!(!trainer.reply_pending());
        assert_eq!(trainer.session().unwrap().opening_id(), "french");
        assert!(is_initial(trainer.position()));
    }
}
