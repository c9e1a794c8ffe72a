use serde::{Deserialize, Serialize};

use crate::{Grid, Hints};

/// A crossword as it is stored and shared: the filled-in grid, which doubles as the
/// solution, plus its clues.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
  pub cells: Grid,
  pub hints: Hints,
}

impl Puzzle {
  /// A puzzle for `cells` with a blank clue for every run.
  pub fn new(cells: Grid) -> Self {
    let hints = Hints::derive(&cells);
    Self { cells, hints }
  }

  /// A blank puzzle of the given size.
  pub fn blank(rows: usize, cols: usize) -> Self {
    Self::new(Grid::new(rows, cols))
  }
}
