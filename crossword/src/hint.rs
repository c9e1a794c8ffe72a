//! Clues attached to runs, crossword numbering, and carrying clue text across grid
//! edits.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::Direction::{self, Across, Down};
use crate::run::{Run, Runs, compute_runs};
use crate::{Grid, Pos};

/// Clue text bound to a run, with the run's crossword number.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Hint {
  pub text: String,
  pub run: Run,
  pub direction: Direction,
  /// The crossword number printed in the run's first square, starting at 1.
  pub index: usize,
}

/// All the hints of a puzzle. `across` is ordered by (row, col) of each run's start,
/// `down` by (col, row).
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Hints {
  pub across: Vec<Hint>,
  pub down: Vec<Hint>,
}

/// Mapping from the first square of a run to its crossword number.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Numbering(BTreeMap<Pos, usize>);

impl Numbering {
  /// The number of the given run.
  pub fn number_of(&self, run: &Run) -> Option<usize> {
    self.0.get(&run.start).copied()
  }

  /// The number printed in the square at `pos`, if a run starts there.
  pub fn number_at(&self, pos: Pos) -> Option<usize> {
    self.0.get(&pos).copied()
  }
}

/// Numbers runs the usual crossword way: walking start squares in row-major order,
/// each distinct start square gets the next number, shared by an across and a down
/// run that begin on it.
pub fn assign_numbers(across: &[Run], down: &[Run]) -> Numbering {
  let mut starts: Vec<Pos> = across.iter().chain(down).map(|run| run.start).collect();
  starts.sort();

  let mut numbers = BTreeMap::new();
  let mut counter = 0;
  let mut previous = None;
  for start in starts {
    if previous != Some(start) {
      counter += 1;
      numbers.insert(start, counter);
    }
    previous = Some(start);
  }
  Numbering(numbers)
}

/// Builds the hints for freshly computed `runs`, keeping the text of every old hint
/// whose run still exists with the same start and end. Hints for runs that vanished
/// are dropped; new runs get empty text. The result is renumbered from scratch.
pub fn merge_hints(old: &Hints, runs: &Runs) -> Hints {
  let numbering = assign_numbers(&runs.across, &runs.down);

  let merge = |old: &[Hint], runs: &[Run], direction: Direction| -> Vec<Hint> {
    let kept: HashMap<Run, &str> = old.iter().map(|hint| (hint.run, hint.text.as_str())).collect();

    let mut hints: Vec<Hint> = runs
      .iter()
      .map(|run| Hint {
        text: kept.get(run).map(|text| text.to_string()).unwrap_or_default(),
        run: *run,
        direction,
        index: numbering.number_of(run).unwrap_or_default(),
      })
      .collect();

    match direction {
      Across => hints.sort_by_key(|hint| (hint.run.start.row, hint.run.start.col)),
      Down => hints.sort_by_key(|hint| (hint.run.start.col, hint.run.start.row)),
    }
    hints
  };

  let hints = Hints {
    across: merge(&old.across, &runs.across, Across),
    down: merge(&old.down, &runs.down, Down),
  };
  debug!(
    "merged hints: {} across, {} down",
    hints.across.len(),
    hints.down.len()
  );
  hints
}

impl Hints {
  /// Hints with empty text for every run of `grid`.
  pub fn derive(grid: &Grid) -> Self {
    merge_hints(&Self::default(), &compute_runs(grid))
  }

  pub fn get(&self, direction: Direction) -> &[Hint] {
    match direction {
      Across => &self.across,
      Down => &self.down,
    }
  }

  pub fn get_mut(&mut self, direction: Direction) -> &mut Vec<Hint> {
    match direction {
      Across => &mut self.across,
      Down => &mut self.down,
    }
  }

  /// The hint in `direction` whose run covers `pos`.
  pub fn at(&self, direction: Direction, pos: Pos) -> Option<&Hint> {
    self.get(direction).iter().find(|hint| hint.run.contains(pos))
  }

  /// The crossword number printed in the square at `pos`, if any run starts there.
  pub fn number_at(&self, pos: Pos) -> Option<usize> {
    self
      .across
      .iter()
      .chain(&self.down)
      .find(|hint| hint.run.start == pos)
      .map(|hint| hint.index)
  }
}
