//! Word lists, and finding the words that fit a partly filled run.

use log::{debug, info};
use std::collections::HashMap;

use crate::{Error, Grid, Result, Run};

/// Name of the word list that is always available.
pub const EXAMPLE: &str = "Example";

const EXAMPLE_WORDS: &str = include_str!("../assets/words.txt");

/// Splits uploaded text into words: one per line, trimmed, lowercased, with blank
/// lines dropped.
pub fn split_lines(contents: &str) -> Vec<String> {
  contents
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .map(str::to_lowercase)
    .collect()
}

/// A named word list, grouped by word length for quick lookup.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
  name: String,
  words_by_length: HashMap<usize, Vec<String>>,
}

impl Dictionary {
  pub fn new(name: impl Into<String>, words: impl IntoIterator<Item = String>) -> Self {
    let mut words_by_length: HashMap<usize, Vec<String>> = HashMap::new();
    for word in words {
      words_by_length
        .entry(word.chars().count())
        .or_default()
        .push(word);
    }
    Self {
      name: name.into(),
      words_by_length,
    }
  }

  /// The built-in word list.
  pub fn example() -> Self {
    Self::new(EXAMPLE, split_lines(EXAMPLE_WORDS))
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// All words with exactly `len` characters.
  pub fn words_of_length(&self, len: usize) -> &[String] {
    self
      .words_by_length
      .get(&len)
      .map(Vec::as_slice)
      .unwrap_or_default()
  }

  /// Total number of words.
  pub fn len(&self) -> usize {
    self.words_by_length.values().map(Vec::len).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Every word matching `pattern`, in list order.
  pub fn search(&self, pattern: &Pattern) -> Vec<String> {
    let words: Vec<String> = self
      .words_of_length(pattern.len())
      .iter()
      .filter(|word| pattern.matches(word))
      .cloned()
      .collect();
    debug!(
      "{} words in '{}' match {}",
      words.len(),
      self.name,
      pattern
    );
    words
  }
}

/// A fixed-length word shape: known letters, and wildcards for empty squares.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Pattern(Vec<Option<char>>);

impl Pattern {
  /// The shape of `run` as currently filled in. Fails with
  /// [Error::UnsearchableRun] if the run covers a blocked square.
  pub fn from_run(grid: &Grid, run: &Run) -> Result<Self> {
    let mut slots = Vec::with_capacity(run.len());
    for pos in run.positions() {
      let cell = grid.try_get(pos).ok_or(Error::UnsearchableRun(*run))?;
      if cell.is_blocked() {
        return Err(Error::UnsearchableRun(*run));
      }
      slots.push(cell.letter().map(|c| c.to_ascii_lowercase()));
    }
    Ok(Self(slots))
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Whether `word` has this shape. Comparison is done in lowercase.
  pub fn matches(&self, word: &str) -> bool {
    let mut chars = word.chars();
    for slot in &self.0 {
      match (slot, chars.next()) {
        (_, None) => return false,
        (Some(expected), Some(c)) if *expected != c.to_ascii_lowercase() => return false,
        _ => {}
      }
    }
    chars.next().is_none()
  }
}

impl std::fmt::Display for Pattern {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for slot in &self.0 {
      write!(f, "{}", slot.unwrap_or('.'))?;
    }
    Ok(())
  }
}

/// The word lists a user has to choose from. The example list is always there.
#[derive(Debug, Clone)]
pub struct DictionaryLibrary {
  dictionaries: Vec<Dictionary>,
}

impl Default for DictionaryLibrary {
  fn default() -> Self {
    Self {
      dictionaries: vec![Dictionary::example()],
    }
  }
}

impl DictionaryLibrary {
  /// Names of the available word lists, example first. Never empty.
  pub fn list(&self) -> Vec<&str> {
    self.dictionaries.iter().map(Dictionary::name).collect()
  }

  pub fn get(&self, name: &str) -> Option<&Dictionary> {
    self.dictionaries.iter().find(|dict| dict.name == name)
  }

  /// Adds a word list from the text of an uploaded file, one word per line.
  /// Uploading under a name that already exists replaces that list.
  pub fn upload(&mut self, contents: &str, name: &str) {
    let dictionary = Dictionary::new(name, split_lines(contents));
    info!("added dictionary '{}' with {} words", name, dictionary.len());
    match self.dictionaries.iter_mut().find(|dict| dict.name == name) {
      Some(existing) => *existing = dictionary,
      None => self.dictionaries.push(dictionary),
    }
  }
}
