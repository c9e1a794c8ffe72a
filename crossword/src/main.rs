use clap::{Parser, Subcommand};
use crossword::Direction::{Across, Down};
use crossword::controller::Controller;
use crossword::dictionary::{DictionaryLibrary, EXAMPLE};
use crossword::session::{Editor, Session};
use crossword::store::{FileStore, PuzzleStore};
use crossword::{Error, Pos, Puzzle, share};
use log::info;
use std::fs;
use std::path::PathBuf;

/// A simple CLI for working with stored puzzles
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
  /// Directory holding one JSON file per puzzle.
  #[arg(long, env = "CROSSWORD_DATA_DIR", default_value = "data")]
  data_dir: PathBuf,

  /// Extra word list to search, as NAME=PATH. May be repeated.
  #[arg(long = "dictionary", value_name = "NAME=PATH", value_parser = parse_dictionary_arg)]
  dictionaries: Vec<(String, PathBuf)>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Print the slugs of all stored puzzles.
  List,
  /// Store a blank puzzle.
  New {
    slug: String,
    #[arg(long, default_value_t = 15)]
    rows: usize,
    #[arg(long, default_value_t = 15)]
    cols: usize,
  },
  /// Print a puzzle's grid and clues.
  Show { slug: String },
  /// Print the share string of a puzzle.
  Share { slug: String },
  /// Decode a share string and store the puzzle under `slug`.
  Import { encoded: String, slug: String },
  /// List the words that fit the run through a square.
  Search {
    slug: String,
    #[arg(long)]
    row: usize,
    #[arg(long)]
    col: usize,
    /// Search the down run instead of the across one.
    #[arg(long)]
    down: bool,
    /// Word list to search.
    #[arg(long = "in", default_value = EXAMPLE)]
    dictionary: String,
  },
}

fn parse_dictionary_arg(arg: &str) -> Result<(String, PathBuf), String> {
  match arg.split_once('=') {
    Some((name, path)) if !name.is_empty() && !path.is_empty() => {
      Ok((name.to_string(), PathBuf::from(path)))
    }
    _ => Err(format!("expected NAME=PATH, got '{arg}'")),
  }
}

fn print_puzzle(puzzle: &Puzzle) {
  println!("{}", puzzle.cells);
  for (title, hints) in [("Across", &puzzle.hints.across), ("Down", &puzzle.hints.down)] {
    println!("{title}");
    for hint in hints {
      println!("  {:>3}. {}  [{}]", hint.index, hint.text, hint.run);
    }
  }
}

fn main() -> Result<(), Error> {
  env_logger::init();
  let cli = Cli::parse();
  let mut store = FileStore::new(&cli.data_dir);

  match cli.command {
    Command::List => {
      for slug in store.list()? {
        println!("{slug}");
      }
    }
    Command::New { slug, rows, cols } => {
      store.save(&slug, &Puzzle::blank(rows, cols))?;
      println!("Created {rows}x{cols} puzzle '{slug}'");
    }
    Command::Show { slug } => print_puzzle(&store.load(&slug)?),
    Command::Share { slug } => println!("{}", share::encode(&store.load(&slug)?)?),
    Command::Import { encoded, slug } => {
      let puzzle = share::decode(&encoded)?;
      store.save(&slug, &puzzle)?;
      println!("Imported '{slug}'");
    }
    Command::Search {
      slug,
      row,
      col,
      down,
      dictionary,
    } => {
      let mut library = DictionaryLibrary::default();
      for (name, path) in &cli.dictionaries {
        library.upload(&fs::read_to_string(path)?, name);
      }
      let Some(dictionary) = library.get(&dictionary) else {
        eprintln!(
          "No dictionary named '{dictionary}'. Available: {}",
          library.list().join(", ")
        );
        std::process::exit(1);
      };

      let pos = Pos::new(row, col);
      let mut editor = Editor::new(store.load(&slug)?);
      if !editor.grid().contains(pos) {
        eprintln!("{pos} is outside the grid");
        std::process::exit(1);
      }
      editor.replace_controller(Controller::at(pos, if down { Down } else { Across }));
      editor.begin_search();
      editor.complete_search(dictionary);
      let words = editor.search().words()?;
      info!("{} candidates in '{}'", words.len(), dictionary.name());
      for word in words {
        println!("{word}");
      }
    }
  }

  Ok(())
}
