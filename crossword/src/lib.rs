//! This crate is meant to be used as the foundation for a crossword construction and
//! solving app. It provides no UI itself, but see `crosstui` for an example of how you
//! can use it to produce a crossword app.
//!
//! The heart of it is [run] derivation: given a [Grid] of [Cell]s, work out the across
//! and down words, number them, and keep the clue text attached to them as the grid
//! changes (see [hint::merge_hints]). The [session] types wrap that up with a cursor
//! and keyboard handling for building, editing and solving puzzles.

use serde::{Deserialize, Serialize};
use std::ops::Not;

pub mod cell;
pub mod controller;
pub mod dictionary;
mod error;
pub mod grid;
pub mod hint;
pub mod input;
pub mod puzzle;
pub mod run;
pub mod search;
pub mod session;
pub mod share;
pub mod store;

pub use cell::Cell;
pub use error::{Error, Result};
pub use grid::{Grid, Pos};
pub use hint::{Hint, Hints};
pub use puzzle::Puzzle;
pub use run::Run;

use Direction::{Across, Down};

/// The two crossword directions: `Across` and `Down`
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  Across,
  Down,
}

impl Not for Direction {
  type Output = Self;
  fn not(self) -> Self {
    match self {
      Across => Down,
      Down => Across,
    }
  }
}

/// Indicates how a particular square should look. For instance, [Standard](Self::Standard)
/// might map to white, [Cursor](Self::Cursor) to yellow, and [Word](Self::Word) to gray.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SquareStyle {
  /// Default styling
  Standard,
  /// The cursor is positioned on this square.
  Cursor,
  /// The cursor is not on this square, but the word indicated by the cursor includes this square.
  Word,
}
