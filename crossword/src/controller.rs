use crate::Direction::{self, Across, Down};
use crate::grid::{Axis, clamp};
use crate::{Grid, Pos, Run};

/// A movement relative to the current typing direction.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DirectionalCommand {
  /// One square forward along the current direction.
  Next,
  /// One square back along the current direction.
  Prev,
  /// Toggle between across and down.
  Switch,
  /// Jump to the start of the next line.
  NextRun,
  /// Same as [NextRun](Self::NextRun): line skips only go forward.
  PrevRun,
}

/// Represents the position of the user's currently-highlighted square, and the
/// `Direction` of the word they are currently entering. Values are replaced, never
/// edited: every movement returns a new `Controller`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Controller {
  cursor: Pos,
  direction: Direction,
}

impl Controller {
  /// A controller on the first non-blocked square of `grid`, typing across.
  pub fn new(grid: &Grid) -> Self {
    let cursor = grid
      .positions()
      .find(|&pos| grid.get(pos).is_white())
      .unwrap_or_default();
    Self {
      cursor,
      direction: Across,
    }
  }

  /// A controller at exactly the given position and direction.
  pub fn at(cursor: Pos, direction: Direction) -> Self {
    Self { cursor, direction }
  }

  pub fn cursor(&self) -> Pos {
    self.cursor
  }

  pub fn direction(&self) -> Direction {
    self.direction
  }

  /// Applies a movement. Single steps are clamped to the grid and do not skip
  /// blocked squares.
  #[must_use]
  pub fn transition(self, grid: &Grid, command: DirectionalCommand) -> Self {
    match command {
      DirectionalCommand::Switch => Self {
        direction: !self.direction,
        ..self
      },
      DirectionalCommand::Next => self.step(grid, 1),
      DirectionalCommand::Prev => self.step(grid, -1),
      DirectionalCommand::NextRun | DirectionalCommand::PrevRun => self.skip_line(grid),
    }
  }

  fn step(self, grid: &Grid, delta: isize) -> Self {
    let Pos { row, col } = self.cursor;
    let cursor = match self.direction {
      Across => Pos {
        row,
        col: clamp(col as isize + delta, grid.width()),
      },
      Down => Pos {
        row: clamp(row as isize + delta, grid.height()),
        col,
      },
    };
    Self { cursor, ..self }
  }

  /// Moves to the first open square of the next row (across) or column (down). From
  /// the last line, wraps to the first line of the other direction and switches to it.
  fn skip_line(self, grid: &Grid) -> Self {
    match self.direction {
      Across => {
        if self.cursor.row + 1 >= grid.height() {
          let row = grid.find_first_non_blocked(Axis::Col, 0).unwrap_or(0);
          return Self::at(Pos { row, col: 0 }, Down);
        }
        let row = self.cursor.row + 1;
        let col = grid.find_first_non_blocked(Axis::Row, row).unwrap_or(0);
        Self::at(Pos { row, col }, Across)
      }
      Down => {
        if self.cursor.col + 1 >= grid.width() {
          let col = grid.find_first_non_blocked(Axis::Row, 0).unwrap_or(0);
          return Self::at(Pos { row: 0, col }, Across);
        }
        let col = self.cursor.col + 1;
        let row = grid.find_first_non_blocked(Axis::Col, col).unwrap_or(0);
        Self::at(Pos { row, col }, Down)
      }
    }
  }

  /// Moves the cursor to `pos` with the given direction. Selecting the square the
  /// cursor is already on toggles the direction instead.
  #[must_use]
  pub fn select(self, pos: Pos, direction: Direction) -> Self {
    if pos == self.cursor {
      Self {
        direction: !self.direction,
        ..self
      }
    } else {
      Self::at(pos, direction)
    }
  }

  /// A pointer click on `pos`: like [select](Self::select), keeping the direction.
  #[must_use]
  pub fn click(self, pos: Pos) -> Self {
    self.select(pos, self.direction)
  }

  /// The run the cursor is in, along the current direction. On a blocked square this
  /// is the whole row or column. `None` if the cursor is outside the grid.
  pub fn cursor_run(&self, grid: &Grid) -> Option<Run> {
    if !grid.contains(self.cursor) {
      return None;
    }
    let Pos { row, col } = self.cursor;

    if grid.get(self.cursor).is_blocked() {
      let run = match self.direction {
        Across => Run::new(Pos { row, col: 0 }, Pos::new(row, grid.width() - 1)),
        Down => Run::new(Pos { row: 0, col }, Pos::new(grid.height() - 1, col)),
      };
      return Some(run);
    }

    let run = match self.direction {
      Across => {
        let mut start = col;
        while start > 0 && !grid.is_blocked_at(Pos::new(row, start - 1)) {
          start -= 1;
        }
        let mut end = col;
        while !grid.is_blocked_at(Pos::new(row, end + 1)) {
          end += 1;
        }
        Run::new(Pos::new(row, start), Pos::new(row, end))
      }
      Down => {
        let mut start = row;
        while start > 0 && !grid.is_blocked_at(Pos::new(start - 1, col)) {
          start -= 1;
        }
        let mut end = row;
        while !grid.is_blocked_at(Pos::new(end + 1, col)) {
          end += 1;
        }
        Run::new(Pos::new(start, col), Pos::new(end, col))
      }
    };
    Some(run)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Cell;
  use crate::tests::arb_grid;
  use DirectionalCommand::*;
  use proptest::prelude::*;

  fn basic_grid() -> Grid {
    #[rustfmt::skip]
    let grid = Grid::parse("
      .---
      --.-
      ----
    ").unwrap();
    grid
  }

  #[test]
  fn starts_on_first_open_square() {
    let controller = Controller::new(&basic_grid());
    assert_eq!(controller, Controller::at(Pos::new(0, 1), Across));
    assert_eq!(Controller::new(&Grid::default()).cursor(), Pos::new(0, 0));
  }

  #[test]
  fn steps_are_clamped() {
    let grid = Grid::new(5, 5);
    let mut controller = Controller::at(Pos::new(0, 3), Across);
    controller = controller.transition(&grid, Next);
    assert_eq!(controller.cursor(), Pos::new(0, 4));
    for _ in 0..3 {
      controller = controller.transition(&grid, Next);
      assert_eq!(controller.cursor(), Pos::new(0, 4));
    }

    let controller = Controller::at(Pos::new(0, 0), Down).transition(&grid, Prev);
    assert_eq!(controller.cursor(), Pos::new(0, 0));
    let controller = controller.transition(&grid, Next);
    assert_eq!(controller, Controller::at(Pos::new(1, 0), Down));
  }

  #[test]
  fn steps_do_not_skip_blocked_squares() {
    let controller = Controller::at(Pos::new(1, 1), Across).transition(&basic_grid(), Next);
    assert_eq!(controller.cursor(), Pos::new(1, 2));
  }

  #[test]
  fn switch_keeps_cursor() {
    let controller = Controller::at(Pos::new(1, 1), Across).transition(&basic_grid(), Switch);
    assert_eq!(controller, Controller::at(Pos::new(1, 1), Down));
  }

  #[test]
  fn line_skips_wrap_into_the_other_direction() {
    let grid = basic_grid();

    let controller = Controller::at(Pos::new(0, 2), Across).transition(&grid, NextRun);
    assert_eq!(controller, Controller::at(Pos::new(1, 0), Across));
    let controller = controller.transition(&grid, NextRun);
    assert_eq!(controller, Controller::at(Pos::new(2, 0), Across));

    // From the last row we go to the top of column 0, now typing down. Its first
    // open square is on row 1.
    let controller = controller.transition(&grid, NextRun);
    assert_eq!(controller, Controller::at(Pos::new(1, 0), Down));

    let controller = controller.transition(&grid, PrevRun);
    assert_eq!(controller, Controller::at(Pos::new(0, 1), Down));
    let controller = Controller::at(Pos::new(2, 3), Down).transition(&grid, NextRun);
    assert_eq!(controller, Controller::at(Pos::new(0, 1), Across));
  }

  #[test]
  fn clicking() {
    let controller = Controller::at(Pos::new(1, 1), Across);
    assert_eq!(
      controller.click(Pos::new(1, 1)),
      Controller::at(Pos::new(1, 1), Down)
    );
    assert_eq!(
      controller.click(Pos::new(2, 3)),
      Controller::at(Pos::new(2, 3), Across)
    );
    assert_eq!(
      controller.select(Pos::new(2, 3), Down),
      Controller::at(Pos::new(2, 3), Down)
    );
  }

  #[test]
  fn cursor_runs() {
    let grid = basic_grid();

    let run = Controller::at(Pos::new(1, 1), Across).cursor_run(&grid);
    assert_eq!(run, Some(Run::new(Pos::new(1, 0), Pos::new(1, 1))));

    let run = Controller::at(Pos::new(2, 2), Down).cursor_run(&grid);
    assert_eq!(run, Some(Run::new(Pos::new(2, 2), Pos::new(2, 2))));

    let run = Controller::at(Pos::new(1, 3), Down).cursor_run(&grid);
    assert_eq!(run, Some(Run::new(Pos::new(0, 3), Pos::new(2, 3))));

    // Blocked squares highlight the whole line.
    let run = Controller::at(Pos::new(1, 2), Across).cursor_run(&grid);
    assert_eq!(run, Some(Run::new(Pos::new(1, 0), Pos::new(1, 3))));
    let run = Controller::at(Pos::new(0, 0), Down).cursor_run(&grid);
    assert_eq!(run, Some(Run::new(Pos::new(0, 0), Pos::new(2, 0))));

    assert_eq!(Controller::at(Pos::new(3, 0), Across).cursor_run(&grid), None);
  }

  #[test]
  fn cursor_run_of_a_lone_square() {
    let mut grid = Grid::new(1, 3);
    grid.set(Pos::new(0, 1), Cell::Blocked);
    let run = Controller::at(Pos::new(0, 2), Across).cursor_run(&grid);
    assert_eq!(run, Some(Run::new(Pos::new(0, 2), Pos::new(0, 2))));
  }

  fn arb_command() -> impl Strategy<Value = DirectionalCommand> {
    prop_oneof![Just(Next), Just(Prev), Just(Switch), Just(NextRun), Just(PrevRun)]
  }

  proptest! {
    #[test]
    fn movement_stays_on_the_grid(
      grid in arb_grid(),
      row in any::<usize>(),
      col in any::<usize>(),
      down in any::<bool>(),
      commands in prop::collection::vec(arb_command(), 0..40),
    ) {
      prop_assume!(grid.height() > 0 && grid.width() > 0);
      let start = Pos::new(row % grid.height(), col % grid.width());
      let mut controller = Controller::at(start, if down { Down } else { Across });
      for command in commands {
        controller = controller.transition(&grid, command);
        prop_assert!(grid.contains(controller.cursor()), "{command:?} left {controller:?}");
        prop_assert!(controller.cursor_run(&grid).is_some());
      }
    }
  }
}
