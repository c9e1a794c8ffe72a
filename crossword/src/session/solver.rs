use log::{error, info};

use crate::controller::Controller;
use crate::hint::{Hint, Hints};
use crate::session::Session;
use crate::{Cell, Grid, Pos, Puzzle};

/// Which squares a check or reveal covers.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Scope {
  /// The square under the cursor.
  Cell,
  /// The run under the cursor.
  Word,
  /// Every square.
  Puzzle,
}

/// Solves a puzzle: the solver types into an attempt grid shaped like the solution,
/// and can check or reveal squares against it.
#[derive(Debug, Clone)]
pub struct Solver {
  solution: Puzzle,
  attempt: Grid,
  controller: Controller,
  pencil: bool,
  completed: bool,
}

fn same_letter(a: char, b: char) -> bool {
  a.eq_ignore_ascii_case(&b)
}

impl Solver {
  pub fn new(solution: Puzzle) -> Self {
    let mut attempt = solution.cells.clone();
    for pos in attempt.positions() {
      if attempt.get(pos).is_white() {
        attempt.set(pos, Cell::Empty);
      }
    }
    let controller = Controller::new(&attempt);
    Self {
      solution,
      attempt,
      controller,
      pencil: false,
      completed: false,
    }
  }

  pub fn attempt(&self) -> &Grid {
    &self.attempt
  }

  pub fn solution(&self) -> &Puzzle {
    &self.solution
  }

  pub fn hints(&self) -> &Hints {
    &self.solution.hints
  }

  pub fn current_hint(&self) -> Option<&Hint> {
    self
      .solution
      .hints
      .at(self.controller.direction(), self.controller.cursor())
  }

  pub fn is_pencil(&self) -> bool {
    self.pencil
  }

  /// Switches between writing letters in ink and in pencil.
  pub fn toggle_pencil(&mut self) {
    self.pencil = !self.pencil;
  }

  /// Whether every letter of the solution has been entered, and none is marked wrong.
  pub fn is_completed(&self) -> bool {
    self.completed
  }

  fn scope_positions(&self, scope: Scope) -> Vec<Pos> {
    match scope {
      Scope::Cell => {
        let cursor = self.controller.cursor();
        if self.attempt.contains(cursor) {
          vec![cursor]
        } else {
          Vec::new()
        }
      }
      Scope::Word => self
        .cursor_run()
        .map(|run| run.positions().collect())
        .unwrap_or_default(),
      Scope::Puzzle => self.attempt.positions().collect(),
    }
  }

  /// Marks every entered letter in `scope` that disagrees with the solution as wrong.
  pub fn check(&mut self, scope: Scope) {
    let mut wrong = 0;
    for pos in self.scope_positions(scope) {
      let Some(entered) = self.attempt.get(pos).letter() else {
        continue;
      };
      let expected = self.solution.cells.get(pos).letter();
      if expected.is_none_or(|expected| !same_letter(entered, expected)) {
        self.set_cell(pos, Cell::Wrong { value: entered });
        wrong += 1;
      }
    }
    info!("check of {scope:?} found {wrong} wrong squares");
  }

  /// Writes the solution's letters into `scope`.
  pub fn reveal(&mut self, scope: Scope) {
    for pos in self.scope_positions(scope) {
      let Some(answer) = self.solution.cells.get(pos).letter() else {
        continue;
      };
      let current = self.attempt.get(pos);
      if matches!(current, Cell::Revealed { .. }) {
        continue;
      }
      let corrected = current
        .letter()
        .is_some_and(|entered| !same_letter(entered, answer));
      self.set_cell(
        pos,
        Cell::Revealed {
          value: answer,
          corrected,
        },
      );
    }
  }

  fn compute_completed(&self) -> bool {
    let mut letters = 0;
    for pos in self.solution.cells.positions() {
      let Some(answer) = self.solution.cells.get(pos).letter() else {
        continue;
      };
      letters += 1;
      match self.attempt.get(pos) {
        Cell::Wrong { .. } => return false,
        cell => {
          if !cell.letter().is_some_and(|entered| same_letter(entered, answer)) {
            return false;
          }
        }
      }
    }
    letters > 0
  }
}

impl Session for Solver {
  fn grid(&self) -> &Grid {
    &self.attempt
  }

  fn controller(&self) -> Controller {
    self.controller
  }

  fn replace_controller(&mut self, controller: Controller) {
    self.controller = controller;
  }

  fn set_cell(&mut self, pos: Pos, cell: Cell) {
    if !self.attempt.set(pos, cell) {
      error!("invalid cell coordinates: {pos}");
      return;
    }
    let completed = self.compute_completed();
    if completed && !self.completed {
      info!("puzzle completed");
    }
    self.completed = completed;
  }

  fn entry(&self, letter: char) -> Cell {
    let value = letter.to_ascii_uppercase();
    if self.pencil {
      Cell::Draft { value }
    } else {
      Cell::User { value }
    }
  }

  fn may_enter(&self, pos: Pos) -> bool {
    !self.attempt.is_blocked_at(pos)
  }
}
