//! Opening catalogue: named lines the trainer replays against the user.
//!
//! Pure domain module with no GPUI dependencies.

use std::fs;
use std::path::{Path, PathBuf};

use derive_more::{Display, Error};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use shakmaty::san::SanPlus;
use shakmaty::{Chess, Position};
use tracing::{debug, instrument};

/// Catalogue shipped with the binary
const BUILTIN_CATALOGUE: &str = include_str!("../../openings.toml");

/// Game termination markers that may trail a movetext
const RESULT_TOKENS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// How hard an opening is to learn. Ordered from easiest to hardest.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
    JsonSchema,
)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// A named opening line
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Opening {
    /// Stable identifier, e.g. `queens-gambit`
    pub id: String,
    /// Display name
    pub name: String,
    pub difficulty: Difficulty,
    /// PGN-like movetext, e.g. `1.d4 d5 2.c4`
    pub moves: String,
}

/// Problems with the line of a single opening
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum OpeningError {
    #[display("opening {id} has no moves")]
    EmptyLine { id: String },
    #[display("opening {id}: '{token}' is not valid notation")]
    InvalidNotation { id: String, token: String },
    #[display("opening {id}: {notation} is not legal at ply {ply}")]
    IllegalMove {
        id: String,
        ply: usize,
        notation: String,
    },
}

/// Failures while loading a catalogue
#[derive(Debug, Display, Error)]
pub enum CatalogueError {
    #[display("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[display("failed to parse catalogue: {source}")]
    Parse { source: toml::de::Error },
    #[display("duplicate opening id {id}")]
    DuplicateId { id: String },
    #[display("{source}")]
    Opening { source: OpeningError },
}

/// Split PGN-like movetext into SAN tokens.
///
/// Move numbers (`1.`, `12.`, `3...`) are dropped whether or not they are
/// glued to the following move, as are trailing game results. Castling
/// written with zeros (`0-0`, `0-0-0`) is rewritten to `O-O` / `O-O-O`.
pub fn parse_opening_moves(movetext: &str) -> Vec<String> {
    movetext
        .split_whitespace()
        .filter(|token| !RESULT_TOKENS.contains(token))
        .map(strip_move_number)
        .filter(|token| !token.is_empty())
        .map(|token| {
            if token.starts_with("0-0") {
                token.replace('0', "O")
            } else {
                token.to_string()
            }
        })
        .collect()
}

/// Drop a leading move number. Digits only count as one when a dot follows.
fn strip_move_number(token: &str) -> &str {
    let rest = token.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() < token.len() && rest.starts_with('.') {
        rest.trim_start_matches('.')
    } else {
        token
    }
}

impl Opening {
    #[cfg(test)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        difficulty: Difficulty,
        moves: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            difficulty,
            moves: moves.into(),
        }
    }

    /// Parsed SAN tokens of the line. Every token must at least be
    /// well-formed notation; legality is checked by [`Opening::verify`].
    pub fn line(&self) -> Result<Vec<String>, OpeningError> {
        let tokens = parse_opening_moves(&self.moves);
        if tokens.is_empty() {
            return Err(OpeningError::EmptyLine {
                id: self.id.clone(),
            });
        }
        if let Some(bad) = tokens.iter().find(|t| t.parse::<SanPlus>().is_err()) {
            return Err(OpeningError::InvalidNotation {
                id: self.id.clone(),
                token: bad.clone(),
            });
        }
        Ok(tokens)
    }

    /// Replay the whole line from the initial position.
    #[instrument(skip(self), fields(id = %self.id))]
    pub fn verify(&self) -> Result<(), OpeningError> {
        let mut position = Chess::default();
        for (i, token) in self.line()?.into_iter().enumerate() {
            let illegal = || OpeningError::IllegalMove {
                id: self.id.clone(),
                ply: i + 1,
                notation: token.clone(),
            };
            let san: SanPlus = token.parse().map_err(|_| illegal())?;
            let m = san.san.to_move(&position).map_err(|_| illegal())?;
            position = position.play(m).map_err(|_| illegal())?;
        }
        debug!("line verified");
        Ok(())
    }

    /// Number of plies in the line (0 if the line does not parse)
    pub fn ply_count(&self) -> usize {
        self.line().map_or(0, |line| line.len())
    }
}

/// On-disk catalogue layout: a list of `[[opening]]` tables.
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct CatalogueFile {
    #[serde(rename = "opening", default)]
    pub openings: Vec<Opening>,
}

/// The set of openings the user can choose from, in file order
#[derive(Clone, Debug, Default)]
pub struct Catalogue {
    openings: Vec<Opening>,
}

impl Catalogue {
    /// Build a catalogue, rejecting duplicate ids and malformed notation.
    pub fn new(openings: Vec<Opening>) -> Result<Self, CatalogueError> {
        for (i, opening) in openings.iter().enumerate() {
            if openings[..i].iter().any(|o| o.id == opening.id) {
                return Err(CatalogueError::DuplicateId {
                    id: opening.id.clone(),
                });
            }
            opening
                .line()
                .map_err(|source| CatalogueError::Opening { source })?;
        }
        Ok(Self { openings })
    }

    /// The catalogue compiled into the binary
    pub fn builtin() -> Result<Self, CatalogueError> {
        Self::from_toml_str(BUILTIN_CATALOGUE)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, CatalogueError> {
        let file: CatalogueFile =
            toml::from_str(source).map_err(|source| CatalogueError::Parse { source })?;
        Self::new(file.openings)
    }

    #[instrument]
    pub fn load(path: &Path) -> Result<Self, CatalogueError> {
        let source = fs::read_to_string(path).map_err(|source| CatalogueError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalogue = Self::from_toml_str(&source)?;
        debug!(count = catalogue.len(), "catalogue loaded");
        Ok(catalogue)
    }

    pub fn get(&self, id: &str) -> Option<&Opening> {
        self.iter().find(|o| o.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Opening> {
        self.openings.iter()
    }

    pub fn len(&self) -> usize {
        self.openings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.openings.is_empty()
    }

    /// Openings sorted from Beginner to Advanced, file order within a tier
    pub fn by_difficulty(&self) -> Vec<&Opening> {
        let mut sorted: Vec<&Opening> = self.iter().collect();
        sorted.sort_by_key(|o| o.difficulty);
        sorted
    }

    /// Every opening whose line does not replay legally
    pub fn verify_all(&self) -> Vec<OpeningError> {
        self.iter().filter_map(|o| o.verify().err())
            .collect()
    }
}
