use log::{debug, error, warn};

use crate::controller::Controller;
use crate::dictionary::{Dictionary, Pattern};
use crate::hint::{Hint, Hints, merge_hints};
use crate::run::compute_runs;
use crate::search::WordSearch;
use crate::session::Session;
use crate::{Cell, Direction, Grid, Pos, Puzzle};

/// Edits a puzzle's grid and clues together. Every change to the grid re-derives
/// the runs and carries clue text over to the runs that survived.
#[derive(Debug, Clone)]
pub struct Editor {
  puzzle: Puzzle,
  controller: Controller,
  search: WordSearch,
}

impl Editor {
  pub fn new(puzzle: Puzzle) -> Self {
    let controller = Controller::new(&puzzle.cells);
    Self {
      puzzle,
      controller,
      search: WordSearch::Idle,
    }
  }

  pub fn puzzle(&self) -> &Puzzle {
    &self.puzzle
  }

  pub fn into_puzzle(self) -> Puzzle {
    self.puzzle
  }

  pub fn hints(&self) -> &Hints {
    &self.puzzle.hints
  }

  /// The hint being typed into: the one under the cursor in the typing direction.
  pub fn current_hint(&self) -> Option<&Hint> {
    self
      .puzzle
      .hints
      .at(self.controller.direction(), self.controller.cursor())
  }

  /// Writes several cells, then re-derives the hints once.
  fn write_cells(&mut self, cells: impl IntoIterator<Item = (Pos, Cell)>) {
    let mut changed = false;
    for (pos, cell) in cells {
      if self.puzzle.cells.set(pos, cell) {
        changed = true;
      } else {
        error!("invalid cell coordinates: {pos}");
      }
    }
    if changed {
      self.puzzle.hints = merge_hints(&self.puzzle.hints, &compute_runs(&self.puzzle.cells));
      // Results were computed for the old letters.
      self.search = WordSearch::Idle;
    }
  }

  /// Moves the cursor. A search over some other run is dropped.
  fn move_to(&mut self, controller: Controller) {
    self.controller = controller;
    if self.search.run().is_some() && self.search.run() != self.cursor_run() {
      self.search = WordSearch::Idle;
    }
  }

  /// Sets the text of the `index`th hint in `direction`. An index past the end is
  /// logged and ignored.
  pub fn set_hint(&mut self, direction: Direction, index: usize, text: impl Into<String>) {
    match self.puzzle.hints.get_mut(direction).get_mut(index) {
      Some(hint) => hint.text = text.into(),
      None => error!("invalid {direction:?} hint index: {index}"),
    }
  }

  /// Puts the cursor on the first square of the `index`th hint in `direction`.
  pub fn focus_hint(&mut self, direction: Direction, index: usize) {
    match self.puzzle.hints.get(direction).get(index) {
      Some(hint) => {
        let controller = Controller::at(hint.run.start, direction);
        self.move_to(controller);
      }
      None => error!("invalid {direction:?} hint index: {index}"),
    }
  }

  /// Blocks the square under the cursor, or unblocks it if it already is.
  pub fn toggle_blocked(&mut self) {
    let cursor = self.controller.cursor();
    let cell = match self.puzzle.cells.try_get(cursor) {
      Some(Cell::Blocked) => Cell::Empty,
      Some(_) => Cell::Blocked,
      None => return,
    };
    self.set_cell(cursor, cell);
  }

  /// Empties every open square of the run under the cursor. On a blocked square
  /// that is the whole line, and its blocked squares stay blocked.
  pub fn clear_run(&mut self) {
    let Some(run) = self.cursor_run() else {
      return;
    };
    let grid = &self.puzzle.cells;
    let open: Vec<Pos> = run.positions().filter(|&pos| !grid.is_blocked_at(pos)).collect();
    self.write_cells(open.into_iter().map(|pos| (pos, Cell::Empty)));
  }

  pub fn search(&self) -> &WordSearch {
    &self.search
  }

  /// First half of a word search: records what to look for in the run under the
  /// cursor. Until [complete_search](Self::complete_search) runs, the search
  /// reports that it is in progress.
  pub fn begin_search(&mut self) {
    self.search = match self.cursor_run() {
      Some(run) => WordSearch::begin(&self.puzzle.cells, &run),
      None => WordSearch::Idle,
    };
  }

  /// Second half of a word search: looks the pattern up in `dictionary`.
  pub fn complete_search(&mut self, dictionary: &Dictionary) {
    self.search = std::mem::take(&mut self.search).complete(dictionary);
    if let Ok(words) = self.search.words() {
      debug!("search found {} words", words.len());
    }
  }

  /// Writes `word` into the run under the cursor. A word that does not fit the run
  /// (wrong length, disagreeing with letters already there, or crossing a blocked
  /// square) is logged and ignored.
  pub fn apply_word(&mut self, word: &str) {
    let Some(run) = self.cursor_run() else {
      return;
    };
    let pattern = match Pattern::from_run(&self.puzzle.cells, &run) {
      Ok(pattern) => pattern,
      Err(e) => {
        warn!("not writing '{word}': {e}");
        return;
      }
    };
    if !pattern.matches(word) {
      warn!("word '{word}' does not fit {pattern} in run {run}");
      return;
    }
    let letters = word.chars().map(|c| Cell::User {
      value: c.to_ascii_uppercase(),
    });
    self.write_cells(run.positions().zip(letters));
  }
}

impl Session for Editor {
  fn grid(&self) -> &Grid {
    &self.puzzle.cells
  }

  fn controller(&self) -> Controller {
    self.controller
  }

  fn replace_controller(&mut self, controller: Controller) {
    self.move_to(controller);
  }

  fn set_cell(&mut self, pos: Pos, cell: Cell) {
    self.write_cells([(pos, cell)]);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Direction::{Across, Down};
  use crate::Run;
  use crate::dictionary::split_lines;
  use crate::input::{Input, Movement};

  fn editor() -> Editor {
    Editor::new(Puzzle::blank(5, 5))
  }

  #[test]
  fn typing_keeps_clues() {
    let mut editor = editor();
    editor.set_hint(Across, 0, "First row");
    editor.set_hint(Down, 4, "Last column");

    editor.handle_input(Input::Value('a'));
    assert_eq!(
      editor.grid().get(Pos::new(0, 0)),
      Cell::User { value: 'A' }
    );
    assert_eq!(editor.controller().cursor(), Pos::new(0, 1));
    assert_eq!(editor.hints().across[0].text, "First row");
    assert_eq!(editor.hints().down[4].text, "Last column");
  }

  #[test]
  fn blocking_drops_broken_clues() {
    let mut editor = editor();
    editor.set_hint(Across, 2, "Middle row");
    editor.set_hint(Across, 3, "Fourth row");

    editor.click(Pos::new(2, 2));
    editor.toggle_blocked();

    let texts: Vec<_> = editor.hints().across.iter().map(|h| h.text.as_str()).collect();
    assert_eq!(texts, vec!["", "", "", "", "Fourth row", ""]);
    let numbers: Vec<_> = editor.hints().across.iter().map(|h| h.index).collect();
    assert_eq!(numbers, vec![1, 6, 7, 8, 9, 11]);
  }

  #[test]
  fn bad_hint_indices_are_ignored() {
    let mut editor = editor();
    let before = editor.puzzle().clone();
    editor.set_hint(Across, 5, "Nope");
    editor.focus_hint(Down, 99);
    assert_eq!(editor.puzzle(), &before);
    assert_eq!(editor.controller(), Controller::at(Pos::new(0, 0), Across));
  }

  #[test]
  fn focusing_a_hint() {
    let mut editor = editor();
    editor.focus_hint(Down, 3);
    assert_eq!(editor.controller(), Controller::at(Pos::new(0, 3), Down));
    assert_eq!(
      editor.current_hint().unwrap().run,
      Run::new(Pos::new(0, 3), Pos::new(4, 3))
    );
  }

  #[test]
  fn search_and_apply() {
    let dict = Dictionary::new("Test", split_lines("hello\nhelps\nworld\nhi"));
    let mut editor = editor();
    editor.handle_input(Input::Value('h'));
    editor.handle_input(Input::Value('e'));
    editor.handle_input(Input::Value('l'));

    editor.begin_search();
    assert!(editor.search().is_searching());
    editor.complete_search(&dict);
    assert_eq!(editor.search().words().unwrap(), ["hello", "helps"]);

    editor.apply_word("helps");
    let row: String = (0..5)
      .filter_map(|col| editor.grid().get(Pos::new(0, col)).letter())
      .collect();
    assert_eq!(row, "HELPS");

    // Wrong length: nothing changes.
    editor.apply_word("hi");
    assert_eq!(editor.grid().get(Pos::new(0, 0)), Cell::User { value: 'H' });
  }

  #[test]
  fn searching_a_blocked_line() {
    let mut editor = editor();
    editor.toggle_blocked();
    editor.begin_search();
    assert!(matches!(editor.search(), WordSearch::Unsearchable(_)));
    editor.complete_search(&Dictionary::example());
    assert!(editor.search().words().is_err());
  }

  #[test]
  fn clearing_a_run() {
    let mut editor = editor();
    editor.apply_word("abcde");
    editor.handle_input(Input::Movement(Movement::Down));
    editor.apply_word("avwxy");
    assert_eq!(editor.grid().get(Pos::new(4, 0)), Cell::User { value: 'Y' });

    editor.clear_run();
    assert_eq!(editor.grid().get(Pos::new(0, 0)), Cell::Empty);
    assert_eq!(editor.grid().get(Pos::new(0, 1)), Cell::User { value: 'B' });
    assert_eq!(editor.grid().get(Pos::new(4, 0)), Cell::Empty);
  }

  fn three_by_three_with_block() -> Editor {
    let mut editor = Editor::new(Puzzle::blank(3, 3));
    editor.set_hint(Down, 0, "Left");
    editor.set_hint(Down, 2, "Right");
    editor.click(Pos::new(0, 1));
    editor.toggle_blocked();
    editor
  }

  #[test]
  fn clearing_from_a_blocked_square_keeps_blocks() {
    let mut editor = three_by_three_with_block();
    editor.set_cell(Pos::new(0, 0), Cell::User { value: 'C' });
    editor.clear_run();

    assert!(editor.grid().get(Pos::new(0, 1)).is_blocked());
    assert_eq!(editor.grid().get(Pos::new(0, 0)), Cell::Empty);
    assert_eq!(editor.hints().down[0].text, "Left");
    assert_eq!(editor.hints().down[2].text, "Right");
  }

  #[test]
  fn words_never_cover_blocked_squares() {
    let mut editor = three_by_three_with_block();
    let before = editor.puzzle().clone();
    editor.apply_word("cat");
    assert_eq!(editor.puzzle(), &before);
  }

  #[test]
  fn words_must_agree_with_letters_already_there() {
    let mut editor = editor();
    editor.apply_word("crane");
    let before = editor.puzzle().clone();
    editor.apply_word("plane");
    assert_eq!(editor.puzzle(), &before);
    editor.apply_word("CRANE");
    assert_eq!(editor.puzzle(), &before);
  }

  #[test]
  fn search_results_belong_to_their_run() {
    let dict = Dictionary::new("Test", split_lines("cat\ncot\nzoo"));
    let mut editor = Editor::new(Puzzle::blank(3, 3));
    editor.handle_input(Input::Value('c'));
    editor.focus_hint(Across, 0);
    editor.begin_search();
    editor.complete_search(&dict);
    assert_eq!(editor.search().words().unwrap(), ["cat", "cot"]);

    // Moving within the run keeps the results.
    editor.handle_input(Input::Movement(Movement::Right));
    assert!(matches!(editor.search(), WordSearch::Done { .. }));

    // Moving to another run drops them.
    editor.handle_input(Input::Movement(Movement::LineSkip));
    assert_eq!(editor.search(), &WordSearch::Idle);
    editor.handle_input(Input::Value('z'));
    editor.focus_hint(Across, 1);

    // A stale candidate can't overwrite what's typed there.
    editor.apply_word("cat");
    assert_eq!(editor.grid().get(Pos::new(1, 0)), Cell::User { value: 'Z' });
    assert_eq!(editor.grid().get(Pos::new(1, 1)), Cell::Empty);
  }

  #[test]
  fn editing_the_grid_drops_search_results() {
    let dict = Dictionary::new("Test", split_lines("cat"));
    let mut editor = Editor::new(Puzzle::blank(3, 3));
    editor.begin_search();
    editor.complete_search(&dict);
    assert_eq!(editor.search().words().unwrap(), ["cat"]);

    editor.handle_input(Input::Value('x'));
    assert_eq!(editor.search(), &WordSearch::Idle);
  }
}
