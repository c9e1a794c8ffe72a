use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::fmt::Display;

use crate::{Cell, Error, Result};

/// A position in a grid. Rows and columns are 0-indexed; the derived ordering is
/// row-major.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Pos {
  pub row: usize,
  pub col: usize,
}

impl Pos {
  pub const fn new(row: usize, col: usize) -> Self {
    Self { row, col }
  }
}

impl Display for Pos {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "({}, {})", self.row, self.col)
  }
}

/// The size of a grid.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Dimensions {
  pub rows: usize,
  pub cols: usize,
}

/// A line through the grid: a whole row, or a whole column.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Axis {
  Row,
  Col,
}

/// Clamps `value` into `[0, bound - 1]`. A zero bound clamps to 0.
pub fn clamp(value: isize, bound: usize) -> usize {
  let max = bound.saturating_sub(1);
  value.clamp(0, max as isize) as usize
}

/// A rectangular grid of cells, stored row by row.
#[derive(Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct Grid(Vec<Vec<Cell>>);

impl Grid {
  /// Creates a grid of empty cells.
  pub fn new(rows: usize, cols: usize) -> Self {
    Self(vec![vec![Cell::Empty; cols]; rows])
  }

  /// Creates a grid from rows of cells, which must all have the same length.
  pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self> {
    if let Some(first) = rows.first() {
      if rows.iter().any(|row| row.len() != first.len()) {
        return Err(Error::RaggedGrid);
      }
    }
    Ok(Self(rows))
  }

  /// Creates a grid from a textual picture, one line per row. Surrounding
  /// whitespace on each line is ignored. See [Cell]'s `From<char>` for the notation.
  pub fn parse(picture: &str) -> Result<Self> {
    let rows = picture
      .lines()
      .map(str::trim)
      .filter(|line| !line.is_empty())
      .map(|line| line.chars().map(Cell::from).collect())
      .collect();
    Self::from_rows(rows)
  }

  pub fn dimensions(&self) -> Dimensions {
    Dimensions {
      rows: self.height(),
      cols: self.width(),
    }
  }

  /// The width of this grid, or 0 if it has no rows.
  pub fn width(&self) -> usize {
    self.0.first().map_or(0, Vec::len)
  }

  /// The height of this grid.
  pub fn height(&self) -> usize {
    self.0.len()
  }

  pub fn rows(&self) -> &[Vec<Cell>] {
    &self.0
  }

  /// Whether `pos` lies inside the grid.
  pub fn contains(&self, pos: Pos) -> bool {
    pos.row < self.height() && pos.col < self.width()
  }

  /// An iterator over all the positions of this grid, from left to right and top to bottom.
  pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
    let Dimensions { rows, cols } = self.dimensions();
    (0..rows).flat_map(move |row| (0..cols).map(move |col| Pos { row, col }))
  }

  /// Returns the [Cell] at the given [Pos]. Panics if `pos` is outside the grid.
  pub fn get(&self, pos: Pos) -> Cell {
    self.0[pos.row][pos.col]
  }

  /// Returns the [Cell] at the given [Pos], or `None` if `pos` is outside the grid.
  pub fn try_get(&self, pos: Pos) -> Option<Cell> {
    self.0.get(pos.row).and_then(|row| row.get(pos.col)).copied()
  }

  /// Whether the square at `pos` is blocked. Positions outside the grid count as
  /// blocked, the way the edge of the paper ends a word.
  pub fn is_blocked_at(&self, pos: Pos) -> bool {
    self.try_get(pos).is_none_or(|cell| cell.is_blocked())
  }

  /// Overwrites the cell at `pos`. Returns `false` and leaves the grid untouched if
  /// `pos` is outside the grid.
  pub fn set(&mut self, pos: Pos, cell: Cell) -> bool {
    match self.0.get_mut(pos.row).and_then(|row| row.get_mut(pos.col)) {
      Some(slot) => {
        *slot = cell;
        true
      }
      None => false,
    }
  }

  /// Index of the first non-blocked cell on row `index` (for [Axis::Row]) or column
  /// `index` (for [Axis::Col]), or `None` if every cell on that line is blocked or
  /// the line does not exist.
  pub fn find_first_non_blocked(&self, axis: Axis, index: usize) -> Option<usize> {
    match axis {
      Axis::Row => self.0.get(index)?.iter().position(Cell::is_white),
      Axis::Col => {
        if index >= self.width() {
          return None;
        }
        self.0.iter().position(|row| row[index].is_white())
      }
    }
  }

  /// Whether every non-blocked square has a letter in it.
  pub fn is_filled(&self) -> bool {
    !self.0.iter().flatten().any(Cell::is_empty)
  }
}

impl TryFrom<Vec<Vec<Cell>>> for Grid {
  type Error = Error;
  fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self> {
    Self::from_rows(rows)
  }
}

impl From<Grid> for Vec<Vec<Cell>> {
  fn from(grid: Grid) -> Self {
    grid.0
  }
}

impl Debug for Grid {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for row in &self.0 {
      for cell in row {
        write!(f, "{}", cell)?;
      }
      writeln!(f)?;
    }
    Ok(())
  }
}

impl Display for Grid {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "\n{:?}", self)
  }
}
