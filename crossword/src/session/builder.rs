use log::error;

use crate::controller::Controller;
use crate::session::Session;
use crate::{Cell, Grid, Pos, Puzzle};

/// Lays out a grid: which squares are blocked, and what letters go where. Clues are
/// left to the [Editor](crate::session::Editor).
#[derive(Debug, Clone)]
pub struct Builder {
  grid: Grid,
  controller: Controller,
}

impl Default for Builder {
  fn default() -> Self {
    Self::new(Grid::new(5, 5))
  }
}

impl Builder {
  pub fn new(grid: Grid) -> Self {
    let controller = Controller::new(&grid);
    Self { grid, controller }
  }

  /// Blocks the square under the cursor, or unblocks it if it already is.
  pub fn toggle_blocked(&mut self) {
    let cursor = self.controller.cursor();
    let cell = match self.grid.try_get(cursor) {
      Some(Cell::Blocked) => Cell::Empty,
      Some(_) => Cell::Blocked,
      None => return,
    };
    self.set_cell(cursor, cell);
  }

  /// Empties the square under the cursor.
  pub fn clear(&mut self) {
    self.set_cell(self.controller.cursor(), Cell::Empty);
  }

  /// The finished layout, with a blank clue for every run.
  pub fn into_puzzle(self) -> Puzzle {
    Puzzle::new(self.grid)
  }
}

impl Session for Builder {
  fn grid(&self) -> &Grid {
    &self.grid
  }

  fn controller(&self) -> Controller {
    self.controller
  }

  fn replace_controller(&mut self, controller: Controller) {
    self.controller = controller;
  }

  fn set_cell(&mut self, pos: Pos, cell: Cell) {
    if !self.grid.set(pos, cell) {
      error!("invalid cell coordinates: {pos}");
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Direction::{Across, Down};
  use crate::SquareStyle;
  use crate::input::{Input, Movement};

  #[test]
  fn typing_advances() {
    let mut builder = Builder::default();
    builder.handle_input(Input::Value('A'));
    assert_eq!(builder.grid().get(Pos::new(0, 0)), Cell::User { value: 'A' });
    assert_eq!(builder.controller(), Controller::at(Pos::new(0, 1), Across));

    builder.handle_input(Input::Delete);
    assert_eq!(builder.grid().get(Pos::new(0, 1)), Cell::Empty);
    assert_eq!(builder.controller().cursor(), Pos::new(0, 0));
  }

  #[test]
  fn blocking() {
    let mut builder = Builder::default();
    builder.toggle_blocked();
    assert!(builder.grid().get(Pos::new(0, 0)).is_blocked());

    // Typing into a blocked square is refused, and the cursor stays put.
    builder.handle_input(Input::Value('A'));
    assert!(builder.grid().get(Pos::new(0, 0)).is_blocked());
    assert_eq!(builder.controller().cursor(), Pos::new(0, 0));

    builder.toggle_blocked();
    assert_eq!(builder.grid().get(Pos::new(0, 0)), Cell::Empty);
  }

  #[test]
  fn moving_and_clicking() {
    let mut builder = Builder::default();
    builder.handle_input(Input::Movement(Movement::Down));
    assert_eq!(builder.controller(), Controller::at(Pos::new(0, 0), Down));
    builder.handle_input(Input::Movement(Movement::Down));
    assert_eq!(builder.controller(), Controller::at(Pos::new(1, 0), Down));

    builder.click(Pos::new(3, 3));
    assert_eq!(builder.controller(), Controller::at(Pos::new(3, 3), Down));
    builder.click(Pos::new(3, 3));
    assert_eq!(builder.controller(), Controller::at(Pos::new(3, 3), Across));

    builder.click(Pos::new(9, 9));
    assert_eq!(builder.controller(), Controller::at(Pos::new(3, 3), Across));
  }

  #[test]
  fn square_styles() {
    let mut builder = Builder::new(Grid::parse("---\n-.-\n---").unwrap());
    builder.click(Pos::new(1, 0));
    builder.click(Pos::new(1, 0));
    assert_eq!(builder.controller(), Controller::at(Pos::new(1, 0), Down));

    assert_eq!(builder.square_style(Pos::new(1, 0)), SquareStyle::Cursor);
    assert_eq!(builder.square_style(Pos::new(0, 0)), SquareStyle::Word);
    assert_eq!(builder.square_style(Pos::new(2, 0)), SquareStyle::Word);
    assert_eq!(builder.square_style(Pos::new(1, 2)), SquareStyle::Standard);
  }

  #[test]
  fn out_of_range_writes_are_dropped() {
    let mut builder = Builder::default();
    builder.set_cell(Pos::new(5, 0), Cell::Blocked);
    assert_eq!(builder.grid(), &Grid::new(5, 5));

    builder.clear();
    let puzzle = builder.into_puzzle();
    assert_eq!(puzzle.hints.across.len(), 5);
    assert_eq!(puzzle.hints.down.len(), 5);
  }
}
