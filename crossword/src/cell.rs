use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::fmt::Display;

/// A square in a crossword grid. Exactly one of these states applies at a time.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Cell {
  /// A square where a letter could be entered, but that is currently empty.
  #[default]
  Empty,
  /// A black square where nothing can be entered. Not part of any word.
  Blocked,
  /// A letter entered by the author or solver.
  User { value: char },
  /// A tentative letter, entered by the solver in pencil mode.
  Draft { value: char },
  /// A letter filled in by a reveal. `corrected` is set when the square held a
  /// different letter before the reveal.
  #[serde(alias = "corrected")]
  Revealed {
    value: char,
    #[serde(default)]
    corrected: bool,
  },
  /// A letter that a check found to disagree with the solution.
  Wrong { value: char },
}

/// How a square is painted.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CellColor {
  Black,
  White,
}

impl Cell {
  /// Whether this is [Cell::Blocked].
  pub fn is_blocked(&self) -> bool {
    *self == Self::Blocked
  }

  /// Whether this is [Cell::Empty].
  pub fn is_empty(&self) -> bool {
    *self == Self::Empty
  }

  /// Whether this is not a blocked square, i.e. a square that belongs to words.
  pub fn is_white(&self) -> bool {
    !self.is_blocked()
  }

  /// The letter written in this square, if any.
  pub fn letter(&self) -> Option<char> {
    match *self {
      Self::Empty | Self::Blocked => None,
      Self::User { value }
      | Self::Draft { value }
      | Self::Revealed { value, .. }
      | Self::Wrong { value } => Some(value),
    }
  }

  pub fn color(&self) -> CellColor {
    match self {
      Self::Blocked => CellColor::Black,
      _ => CellColor::White,
    }
  }
}

impl Debug for Cell {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self.letter() {
      Some(c) => write!(f, "{}", c),
      None if self.is_blocked() => write!(f, "■"),
      None => write!(f, " "),
    }
  }
}

impl Display for Cell {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{:?}", self)
  }
}

/// Fixture notation: `.` is blocked, `-` is empty, anything else is a user letter.
impl From<char> for Cell {
  fn from(value: char) -> Self {
    match value {
      '.' => Self::Blocked,
      '-' => Self::Empty,
      c => Self::User { value: c },
    }
  }
}
