//! Saving and loading puzzles by slug.

use log::info;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Puzzle, Result};

/// Somewhere puzzles can be kept, keyed by a short name.
pub trait PuzzleStore {
  /// Stores `puzzle` under `slug`, replacing whatever was there.
  fn save(&mut self, slug: &str, puzzle: &Puzzle) -> Result<()>;

  /// Fetches the puzzle stored under `slug`, failing with [Error::NotFound] if
  /// there is none.
  fn load(&self, slug: &str) -> Result<Puzzle>;

  /// Every slug that has a puzzle stored under it, sorted.
  fn list(&self) -> Result<Vec<String>>;
}

/// Rejects slugs that would escape or confuse a directory of files.
fn check_slug(slug: &str) -> Result<()> {
  if slug.is_empty() || slug.starts_with('.') || slug.contains(['/', '\\']) {
    return Err(Error::InvalidSlug(slug.to_string()));
  }
  Ok(())
}

/// Keeps each puzzle as `<slug>.json` in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
  dir: PathBuf,
}

impl FileStore {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  fn path(&self, slug: &str) -> PathBuf {
    self.dir.join(format!("{slug}.json"))
  }
}

impl PuzzleStore for FileStore {
  fn save(&mut self, slug: &str, puzzle: &Puzzle) -> Result<()> {
    check_slug(slug)?;
    fs::create_dir_all(&self.dir)?;
    let path = self.path(slug);
    fs::write(&path, serde_json::to_string(puzzle)?)?;
    info!("saved puzzle '{}' to {}", slug, path.display());
    Ok(())
  }

  fn load(&self, slug: &str) -> Result<Puzzle> {
    check_slug(slug)?;
    let path = self.path(slug);
    let json = match fs::read_to_string(&path) {
      Ok(json) => json,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
        return Err(Error::NotFound(slug.to_string()));
      }
      Err(e) => return Err(e.into()),
    };
    let puzzle = serde_json::from_str(&json)?;
    info!("loaded puzzle '{}' from {}", slug, path.display());
    Ok(puzzle)
  }

  fn list(&self) -> Result<Vec<String>> {
    if !self.dir.exists() {
      return Ok(Vec::new());
    }

    let mut slugs = Vec::new();
    for entry in fs::read_dir(&self.dir)? {
      let path = entry?.path();
      // Skip anything that isn't ours, like .DS_Store.
      if path.extension().is_some_and(|ext| ext == "json") {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
          slugs.push(stem.to_string());
        }
      }
    }
    slugs.sort();
    Ok(slugs)
  }
}

/// Keeps puzzles in memory, for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  puzzles: BTreeMap<String, Puzzle>,
}

impl PuzzleStore for MemoryStore {
  fn save(&mut self, slug: &str, puzzle: &Puzzle) -> Result<()> {
    check_slug(slug)?;
    self.puzzles.insert(slug.to_string(), puzzle.clone());
    Ok(())
  }

  fn load(&self, slug: &str) -> Result<Puzzle> {
    self
      .puzzles
      .get(slug)
      .cloned()
      .ok_or_else(|| Error::NotFound(slug.to_string()))
  }

  fn list(&self) -> Result<Vec<String>> {
    Ok(self.puzzles.keys().cloned().collect())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{Cell, Pos};

  fn sample() -> Puzzle {
    let mut puzzle = Puzzle::blank(3, 3);
    puzzle.cells.set(Pos::new(1, 1), Cell::Blocked);
    puzzle.cells.set(Pos::new(0, 0), Cell::User { value: 'C' });
    puzzle = Puzzle::new(puzzle.cells);
    puzzle.hints.across[0].text = "Feline".to_string();
    puzzle
  }

  fn exercise(store: &mut impl PuzzleStore) {
    assert!(matches!(store.load("cat"), Err(Error::NotFound(slug)) if slug == "cat"));
    assert_eq!(store.list().unwrap(), Vec::<String>::new());

    store.save("cat", &sample()).unwrap();
    store.save("blank", &Puzzle::blank(2, 2)).unwrap();
    assert_eq!(store.load("cat").unwrap(), sample());
    assert_eq!(store.list().unwrap(), vec!["blank", "cat"]);

    // Saving again overwrites.
    store.save("cat", &Puzzle::blank(1, 1)).unwrap();
    assert_eq!(store.load("cat").unwrap(), Puzzle::blank(1, 1));

    assert!(matches!(store.save("../cat", &sample()), Err(Error::InvalidSlug(_))));
    assert!(matches!(store.save("", &sample()), Err(Error::InvalidSlug(_))));
  }

  #[test]
  fn memory_store() {
    exercise(&mut MemoryStore::default());
  }

  #[test]
  fn file_store() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path().join("puzzles"));
    exercise(&mut store);

    fs::write(store.dir().join(".DS_Store"), b"junk").unwrap();
    fs::write(store.dir().join("notes.txt"), b"junk").unwrap();
    assert_eq!(store.list().unwrap(), vec!["blank", "cat"]);
  }

  #[test]
  fn corrupt_file_is_a_json_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bad.json"), "{").unwrap();
    let store = FileStore::new(dir.path());
    assert!(matches!(store.load("bad"), Err(Error::Json(_))));
  }
}
