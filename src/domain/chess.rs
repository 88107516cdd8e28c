//! Pure chess domain types and the glue around the shakmaty rules oracle.
//! No GPUI dependencies - this is the domain layer.

use derive_more::Display;
use shakmaty::san::{San, SanPlus};
use shakmaty::{Chess, Color as SColor, File, Move, Position, Rank, Role, Square};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Display)]
pub enum PieceColor {
    White,
    Black,
}

impl From<SColor> for PieceColor {
    fn from(color: SColor) -> Self {
        match color {
            SColor::White => PieceColor::White,
            SColor::Black => PieceColor::Black,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
}

impl Piece {
    pub fn svg_path(&self) -> &'static str {
        match (self.kind, self.color) {
            (PieceKind::Pawn, PieceColor::White) => "assets/pawn-white.svg",
            (PieceKind::Pawn, PieceColor::Black) => "assets/pawn-black.svg",
            (PieceKind::Rook, PieceColor::White) => "assets/rook-white.svg",
            (PieceKind::Rook, PieceColor::Black) => "assets/rook-black.svg",
            (PieceKind::Knight, PieceColor::White) => "assets/knight-white.svg",
            (PieceKind::Knight, PieceColor::Black) => "assets/knight-black.svg",
            (PieceKind::Bishop, PieceColor::White) => "assets/bishop-white.svg",
            (PieceKind::Bishop, PieceColor::Black) => "assets/bishop-black.svg",
            (PieceKind::Queen, PieceColor::White) => "assets/queen-white.svg",
            (PieceKind::Queen, PieceColor::Black) => "assets/queen-black.svg",
            (PieceKind::King, PieceColor::White) => "assets/king-white.svg",
            (PieceKind::King, PieceColor::Black) => "assets/king-black.svg",
        }
    }
}

/// Convert row/col (0-indexed, row 0 = rank 8) to shakmaty Square
pub fn to_square(row: usize, col: usize) -> Square {
    let file = File::new(col as u32);
    let rank = Rank::new(7 - row as u32); // row 0 = rank 8, row 7 = rank 1
    Square::from_coords(file, rank)
}

/// Convert shakmaty piece to our domain Piece
pub fn shakmaty_to_piece(piece: shakmaty::Piece) -> Piece {
    let kind = match piece.role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    };
    Piece {
        kind,
        color: piece.color.into(),
    }
}

/// The from/to pair a user gestures for a move.
///
/// Castling is entered as the king moving to the g or c file, not onto its rook.
pub fn move_squares(m: &Move) -> Option<(Square, Square)> {
    match m {
        Move::Normal { from, to, .. } => Some((*from, *to)),
        Move::EnPassant { from, to } => Some((*from, *to)),
        Move::Castle { king, rook } => {
            let king_dest = if rook.file() == File::H {
                Square::from_coords(File::G, rook.rank())
            } else {
                Square::from_coords(File::C, rook.rank())
            };
            Some((*king, king_dest))
        }
        Move::Put { .. } => None,
    }
}

/// Find the legal move matching a from/to gesture in `position`.
///
/// Pawns reaching the last rank promote to a queen.
pub fn find_legal_move(position: &Chess, from: Square, to: Square) -> Option<Move> {
    let legal = position.legal_moves();
    let m = legal
        .iter()
        .find(|m| move_squares(m) == Some((from, to)))?;

    // auto-promote to queen
    let m = match m {
        Move::Normal {
            role: Role::Pawn,
            from,
            to,
            capture,
            promotion: Some(_),
        } => Move::Normal {
            role: Role::Pawn,
            from: *from,
            to: *to,
            capture: *capture,
            promotion: Some(Role::Queen),
        },
        _ => m.clone(),
    };
    Some(m)
}

/// Standard algebraic notation of a move, without check suffix
pub fn notation(position: &Chess, m: &Move) -> String {
    San::from_move(position, m.clone()).to_string()
}

/// Canonical form of a notation string: suffixes like `+` and `#` dropped.
/// Returns `None` for text that is not SAN at all.
pub fn normalize_notation(san: &str) -> Option<String> {
    san.parse::<SanPlus>().ok().map(|s| s.san.to_string())
}

/// Whether a played notation is the expected one, ignoring check markers
pub fn notation_matches(played: &str, expected: &str) -> bool {
    match (normalize_notation(played), normalize_notation(expected)) {
        (Some(played), Some(expected)) => played == expected,
        _ => false,
    }
}

/// Look up a legal move by its notation among the legal moves of `position`.
pub fn find_move_by_notation(position: &Chess, san: &str) -> Option<Move> {
    let expected = normalize_notation(san)?;
    position
        .legal_moves()
        .iter()
        .find(|m| notation(position, m) == expected)
        .cloned()
}

/// Terminal and check conditions of a position, as reported by the rules oracle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardState {
    Ongoing,
    Check,
    Checkmate { winner: PieceColor },
    Stalemate,
    InsufficientMaterial,
}

impl BoardState {
    pub fn of(position: &Chess) -> Self {
        if position.is_checkmate() {
            BoardState::Checkmate {
                winner: position.turn().other().into(),
            }
        } else if position.is_stalemate() {
            BoardState::Stalemate
        } else if position.is_insufficient_material() {
            BoardState::InsufficientMaterial
        } else if position.is_check() {
            BoardState::Check
        } else {
            BoardState::Ongoing
        }
    }

    pub fn is_game_over(&self) -> bool {
        !matches!(self, BoardState::Ongoing | BoardState::Check)
    }

    pub fn describe(&self) -> Option<String> {
        match self {
            BoardState::Ongoing => None,
            BoardState::Check => Some("Check".to_string()),
            BoardState::Checkmate { winner } => Some(format!("Checkmate - {winner} wins")),
            BoardState::Stalemate => Some("Stalemate".to_string()),
            BoardState::InsufficientMaterial => Some("Draw by insufficient material".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::CastlingMode;
    use shakmaty::fen::Fen;

    fn from_fen(fen: &str) -> Chess {
        fen.parse::<Fen>()
            .unwrap()
            .into_position(CastlingMode::Standard)
            .unwrap()
    }

    #[test]
    fn test_to_square_orientation() {
        assert_eq!(to_square(0, 0), Square::A8);
        assert_eq!(to_square(7, 7), Square::H1);
        assert_eq!(to_square(6, 4), Square::E2);
    }

    #[test]
    fn test_find_legal_move() {
        let pos = Chess::default();
        let m = find_legal_move(&pos, Square::G1, Square::F3).unwrap();
        assert_eq!(notation(&pos, &m), "Nf3");
        assert!(find_legal_move(&pos, Square::E2, Square::E5).is_none());
        assert!(find_legal_move(&pos, Square::E7, Square::E5).is_none()); // not black's turn
    }

    #[test]
    fn test_castling_gesture() {
        let pos = from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let short = find_legal_move(&pos, Square::E1, Square::G1).unwrap();
        assert_eq!(notation(&pos, &short), "O-O");
        let long = find_legal_move(&pos, Square::E1, Square::C1).unwrap();
        assert_eq!(notation(&pos, &long), "O-O-O");
    }

    #[test]
    fn test_promotion_defaults_to_queen() {
        let pos = from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1");
        let m = find_legal_move(&pos, Square::E7, Square::E8).unwrap();
        assert_eq!(m.promotion(), Some(Role::Queen));
    }

    #[test]
    fn test_notation_matching_ignores_check_marks() {
        assert!(notation_matches("Bb5", "Bb5+"));
        assert!(notation_matches("Qh4", "Qh4#"));
        assert!(!notation_matches("e4", "d4"));
        assert!(!notation_matches("e4", "not-a-move"));
    }

    #[test]
    fn test_find_move_by_notation() {
        let pos = Chess::default();
        let m = find_move_by_notation(&pos, "d4").unwrap();
        assert_eq!(move_squares(&m), Some((Square::D2, Square::D4)));
        assert!(find_move_by_notation(&pos, "Nd5").is_none());
    }

    #[test]
    fn test_board_state_checkmate() {
        let pos = from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert_eq!(
            BoardState::of(&pos),
            BoardState::Checkmate {
                winner: PieceColor::Black
            }
        );
        assert!(BoardState::of(&pos).is_game_over());
    }

    #[test]
    fn test_board_state_stalemate_and_check() {
        let stalemate = from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert_eq!(BoardState::of(&stalemate), BoardState::Stalemate);

        let check = from_fen("4k3/8/8/8/8/8/8/4R1K1 b - - 0 1");
        assert_eq!(BoardState::of(&check), BoardState::Check);
        assert!(!BoardState::of(&check).is_game_over());

        let bare_kings = from_fen("4k3/8/8/8/8/8/8/6K1 w - - 0 1");
        assert_eq!(BoardState::of(&bare_kings), BoardState::InsufficientMaterial);
    }
}
