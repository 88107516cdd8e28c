pub mod chess;
pub mod opening;
pub mod practice;

pub use chess::{Piece, shakmaty_to_piece, to_square};
pub use opening::{Catalogue, CatalogueFile, Difficulty, Opening};
pub use practice::{MoveOutcome, PracticeMessage, PracticeStatus, Tone, Trainer};
