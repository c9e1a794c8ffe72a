//! Interactive puzzle sessions: a grid, a cursor, and the rules for changing them.
//!
//! Each session type owns its grid and [Controller]. Frontends feed it [Input]s and
//! clicks and read back the grid, the cursor and the hints to draw.

use log::warn;

use crate::controller::{Controller, DirectionalCommand};
use crate::input::Input;
use crate::{Cell, Grid, Pos, Run, SquareStyle};

mod builder;
mod editor;
mod solver;

pub use builder::Builder;
pub use editor::Editor;
pub use solver::{Scope, Solver};

/// Behavior shared by the builder, editor and solver.
pub trait Session {
  /// The grid the user is typing into.
  fn grid(&self) -> &Grid;

  fn controller(&self) -> Controller;

  /// Replaces the controller. Only called by the provided methods once a move has
  /// been accepted.
  fn replace_controller(&mut self, controller: Controller);

  /// Writes a cell. Positions outside the grid are logged and ignored.
  fn set_cell(&mut self, pos: Pos, cell: Cell);

  /// The cell written when the user types `letter`.
  fn entry(&self, letter: char) -> Cell {
    Cell::User {
      value: letter.to_ascii_uppercase(),
    }
  }

  /// Whether the cursor may move onto `pos`.
  fn may_enter(&self, _pos: Pos) -> bool {
    true
  }

  /// Applies a key press. Typing or deleting on a blocked square does nothing;
  /// otherwise the cursor then advances (typing) or backs up (deleting).
  fn handle_input(&mut self, input: Input) {
    let controller = self.controller();
    let cursor = controller.cursor();

    let next = match input {
      Input::Movement(movement) => {
        controller.transition(self.grid(), movement.command(controller.direction()))
      }
      Input::Value(letter) => {
        if self.grid().is_blocked_at(cursor) {
          return;
        }
        let cell = self.entry(letter);
        self.set_cell(cursor, cell);
        controller.transition(self.grid(), DirectionalCommand::Next)
      }
      Input::Delete => {
        if self.grid().is_blocked_at(cursor) {
          return;
        }
        self.set_cell(cursor, Cell::Empty);
        controller.transition(self.grid(), DirectionalCommand::Prev)
      }
    };

    if self.may_enter(next.cursor()) {
      self.replace_controller(next);
    }
  }

  /// A click on a square. Clicking the cursor's own square switches direction.
  fn click(&mut self, pos: Pos) {
    if !self.grid().contains(pos) {
      warn!("ignoring click outside the grid at {pos}");
      return;
    }
    let next = self.controller().click(pos);
    if self.may_enter(next.cursor()) {
      self.replace_controller(next);
    }
  }

  /// The run under the cursor, in the typing direction.
  fn cursor_run(&self) -> Option<Run> {
    self.controller().cursor_run(self.grid())
  }

  /// Determines how a particular square should be styled.
  fn square_style(&self, pos: Pos) -> SquareStyle {
    if pos == self.controller().cursor() {
      SquareStyle::Cursor
    } else if self.cursor_run().is_some_and(|run| run.contains(pos)) {
      SquareStyle::Word
    } else {
      SquareStyle::Standard
    }
  }
}
