use thiserror::Error;

use crate::{Pos, Run};

/// The errors that may be produced by functions in this crate.
#[derive(Debug, Error)]
pub enum Error {
  /// No puzzle is stored under the given slug.
  #[error("no puzzle stored under '{0}'")]
  NotFound(String),
  /// The slug cannot be used as a storage key (empty, or looks like a path).
  #[error("invalid puzzle slug '{0}'")]
  InvalidSlug(String),
  /// The rows of a grid do not all have the same length.
  #[error("grid rows have unequal lengths")]
  RaggedGrid,
  /// A stored run is not a straight span from `start` forward to `end`.
  #[error("run from {start} to {end} is not a row or column span")]
  InvalidRun { start: Pos, end: Pos },
  /// A word search was attempted over a run containing a blocked square.
  #[error("selection {0} cannot be searched over")]
  UnsearchableRun(Run),
  /// A share string could not be turned back into a puzzle.
  #[error("could not decode shared puzzle: {0}")]
  Decode(String),
  /// An [I/O error](std::io::Error) occurred.
  #[error(transparent)]
  Io(#[from] std::io::Error),
  /// A stored puzzle could not be (de)serialized.
  #[error(transparent)]
  Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
