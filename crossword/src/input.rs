//! Code for interpreting keyboard input.

use crate::Direction::{self, Across, Down};
use crate::controller::DirectionalCommand;

/// A key, as far as a crossword cares about it. Frontends map their own key events
/// onto this.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Key {
  Up,
  Down,
  Left,
  Right,
  Tab,
  Enter,
  Backspace,
  Char(char),
  /// Any key that has no meaning in a crossword.
  Other,
}

/// A key press along with the modifiers that matter for deciding whether the key is
/// meant for the grid at all.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyInput {
  pub key: Key,
  pub ctrl: bool,
  pub meta: bool,
}

impl From<Key> for KeyInput {
  fn from(key: Key) -> Self {
    Self {
      key,
      ctrl: false,
      meta: false,
    }
  }
}

/// A raw movement, before it is interpreted against the typing direction.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Movement {
  Up,
  Down,
  Left,
  Right,
  /// Tab or Enter: jump to the next line.
  LineSkip,
  /// Space.
  Skip,
}

/// What a key press asks of the grid.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Input {
  Movement(Movement),
  /// Write this character into the current square.
  Value(char),
  /// Clear the current square.
  Delete,
}

/// Turns a key press into an [Input]. Returns `None` for keys the grid should not
/// capture, including anything pressed with Ctrl or Meta held, so that shortcuts
/// reach whoever else is listening.
pub fn translate_key(input: KeyInput) -> Option<Input> {
  if input.ctrl || input.meta {
    return None;
  }

  let input = match input.key {
    Key::Backspace => Input::Delete,
    Key::Up => Input::Movement(Movement::Up),
    Key::Down => Input::Movement(Movement::Down),
    Key::Left => Input::Movement(Movement::Left),
    Key::Right => Input::Movement(Movement::Right),
    Key::Tab | Key::Enter => Input::Movement(Movement::LineSkip),
    Key::Char(' ') => Input::Movement(Movement::Skip),
    Key::Char(c) if !c.is_control() => Input::Value(c),
    Key::Char(_) | Key::Other => return None,
  };
  Some(input)
}

impl Movement {
  /// Interprets this movement relative to the typing direction. Moving along the
  /// direction steps; moving across it (or pressing space) switches direction.
  pub fn command(self, direction: Direction) -> DirectionalCommand {
    match (direction, self) {
      (_, Self::LineSkip) => DirectionalCommand::NextRun,
      (Across, Self::Left) | (Down, Self::Up) => DirectionalCommand::Prev,
      (Across, Self::Right) | (Down, Self::Down) => DirectionalCommand::Next,
      (Across, Self::Up | Self::Down) | (Down, Self::Left | Self::Right) => {
        DirectionalCommand::Switch
      }
      (_, Self::Skip) => DirectionalCommand::Switch,
    }
  }
}
