use crate::dictionary::{Dictionary, Pattern};
use crate::{Error, Grid, Result, Run};

/// Progress of a word search over one run. Searching happens in two steps so a
/// frontend can show that a search is running before the (slow) lookup happens:
/// [begin](WordSearch::begin) moves to `Searching` right away, and
/// [complete](WordSearch::complete) does the lookup.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub enum WordSearch {
  /// No search has been asked for.
  #[default]
  Idle,
  /// The pattern is known, the lookup hasn't run yet.
  Searching { run: Run, pattern: Pattern },
  /// The words that fit `run` as it was when the search began.
  Done { run: Run, words: Vec<String> },
  /// The selected run covers a blocked square, so there is nothing to search for.
  Unsearchable(Run),
}

impl WordSearch {
  /// Starts a search for words that fit `run` as it is currently filled in.
  pub fn begin(grid: &Grid, run: &Run) -> Self {
    match Pattern::from_run(grid, run) {
      Ok(pattern) => Self::Searching { run: *run, pattern },
      Err(_) => Self::Unsearchable(*run),
    }
  }

  /// Runs the lookup of a pending search. Any other state is returned as is, so a
  /// search that was replaced or already finished is not run twice.
  #[must_use]
  pub fn complete(self, dictionary: &Dictionary) -> Self {
    match self {
      Self::Searching { run, pattern } => Self::Done {
        run,
        words: dictionary.search(&pattern),
      },
      other => other,
    }
  }

  /// The words found, once the search is done.
  pub fn words(&self) -> Result<&[String]> {
    match self {
      Self::Done { words, .. } => Ok(words.as_slice()),
      Self::Unsearchable(run) => Err(Error::UnsearchableRun(*run)),
      _ => Ok(&[]),
    }
  }

  pub fn is_searching(&self) -> bool {
    matches!(self, Self::Searching { .. })
  }

  /// The run being searched, if any.
  pub fn run(&self) -> Option<Run> {
    match self {
      Self::Idle => None,
      Self::Searching { run, .. } | Self::Done { run, .. } | Self::Unsearchable(run) => Some(*run),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Pos;
  use crate::dictionary::split_lines;

  #[test]
  fn two_phases() {
    let dict = Dictionary::new("Test", split_lines("tea\nten\ntoe"));
    let grid = Grid::parse("T-E").unwrap();
    let run = Run::new(Pos::new(0, 0), Pos::new(0, 2));

    let search = WordSearch::begin(&grid, &run);
    assert!(search.is_searching());
    assert_eq!(search.words().unwrap(), &[] as &[String]);

    let search = search.complete(&dict);
    assert_eq!(
      search,
      WordSearch::Done {
        run,
        words: vec!["toe".to_string()]
      }
    );
    assert_eq!(search.run(), Some(run));

    // Completing again does nothing.
    assert_eq!(search.clone().complete(&dict), search);
  }

  #[test]
  fn unsearchable() {
    let grid = Grid::parse("T.E").unwrap();
    let run = Run::new(Pos::new(0, 0), Pos::new(0, 2));

    let search = WordSearch::begin(&grid, &run).complete(&Dictionary::example());
    assert_eq!(search, WordSearch::Unsearchable(run));
    assert!(matches!(search.words(), Err(Error::UnsearchableRun(_))));
  }
}
