//! Finding the word slots ("runs") of a grid.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::{Error, Grid, Pos, Result};

/// Spans shorter than this are not words, and are never numbered.
pub const MIN_RUN_LENGTH: usize = 2;

/// An inclusive, axis-aligned span of squares along one row or one column.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RunSpan")]
pub struct Run {
  pub start: Pos,
  pub end: Pos,
}

/// A run as stored, before it is checked.
#[derive(Deserialize)]
struct RunSpan {
  start: Pos,
  end: Pos,
}

impl TryFrom<RunSpan> for Run {
  type Error = Error;
  fn try_from(span: RunSpan) -> Result<Self> {
    Self::try_new(span.start, span.end)
  }
}

impl Run {
  pub fn new(start: Pos, end: Pos) -> Self {
    debug_assert!(start.row <= end.row && start.col <= end.col);
    debug_assert!(start.row == end.row || start.col == end.col);
    Self { start, end }
  }

  /// Like [new](Self::new), but fails with [Error::InvalidRun] unless `start` and
  /// `end` are on one row or column with `start` first.
  pub fn try_new(start: Pos, end: Pos) -> Result<Self> {
    let ordered = start.row <= end.row && start.col <= end.col;
    let straight = start.row == end.row || start.col == end.col;
    if !(ordered && straight) {
      return Err(Error::InvalidRun { start, end });
    }
    Ok(Self { start, end })
  }

  /// The number of squares in this run.
  pub fn len(&self) -> usize {
    (self.end.row - self.start.row).max(self.end.col - self.start.col) + 1
  }

  /// Whether `pos` is one of the squares of this run.
  pub fn contains(&self, pos: Pos) -> bool {
    (self.start.row..=self.end.row).contains(&pos.row)
      && (self.start.col..=self.end.col).contains(&pos.col)
  }

  /// The positions of the squares of this run, in reading order.
  pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
    let Run { start, end } = *self;
    (start.row..=end.row)
      .flat_map(move |row| (start.col..=end.col).map(move |col| Pos { row, col }))
  }
}

impl Display for Run {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}-{}", self.start, self.end)
  }
}

/// All the runs of a grid. Across runs are in row-major order of their start
/// square, down runs in column-major order.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Runs {
  pub across: Vec<Run>,
  pub down: Vec<Run>,
}

/// Scans `grid` for every maximal stretch of non-blocked squares that is at least
/// [MIN_RUN_LENGTH] long, across and down.
pub fn compute_runs(grid: &Grid) -> Runs {
  let dims = grid.dimensions();

  let mut across = Vec::new();
  for row in 0..dims.rows {
    scan_line(dims.cols, |col| Pos { row, col }, grid, &mut across);
  }

  let mut down = Vec::new();
  for col in 0..dims.cols {
    scan_line(dims.rows, |row| Pos { row, col }, grid, &mut down);
  }

  Runs { across, down }
}

/// Splits one line of `len` squares on blocked squares, pushing every span that is
/// long enough onto `runs`. `at` maps an offset along the line to a grid position.
fn scan_line(len: usize, at: impl Fn(usize) -> Pos, grid: &Grid, runs: &mut Vec<Run>) {
  let mut span_start = None;

  // One step past the end, so a span touching the edge gets closed.
  for i in 0..=len {
    let open = i < len && grid.get(at(i)).is_white();
    match (span_start, open) {
      (None, true) => span_start = Some(i),
      (Some(start), false) => {
        if i - start >= MIN_RUN_LENGTH {
          runs.push(Run::new(at(start), at(i - 1)));
        }
        span_start = None;
      }
      _ => {}
    }
  }
}
