use std::fs::{self, File};
use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossword::dictionary::{DictionaryLibrary, EXAMPLE};
use crossword::input::{Key, KeyInput, translate_key};
use crossword::search::WordSearch;
use crossword::session::{Editor, Scope, Session, Solver};
use crossword::store::{FileStore, PuzzleStore};
use crossword::{Cell, Direction, Error, Hint, Hints, Pos, Puzzle, SquareStyle, share};
use log::{error, info};
use ratatui::{
  DefaultTerminal, Frame,
  buffer::Buffer,
  layout::{Constraint, Flex, Layout, Rect},
  style::{Color, Modifier, Style, Stylize},
  text::Line,
  widgets::{Block, Padding, Paragraph, Widget, Wrap},
};
use ratatui_macros::line;

const SQUARE_WIDTH: u16 = 5;
const SQUARE_HEIGHT: u16 = 2;
const BLANK_SIZE: usize = 15;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
  /// Directory holding one JSON file per puzzle.
  #[arg(long, env = "CROSSWORD_DATA_DIR", default_value = "data")]
  data_dir: PathBuf,

  /// Extra word list for the editor's search, as NAME=PATH. May be repeated.
  #[arg(long = "dictionary", value_name = "NAME=PATH", value_parser = parse_dictionary_arg)]
  dictionaries: Vec<(String, PathBuf)>,

  /// Word list the editor searches.
  #[arg(long = "in", default_value = EXAMPLE)]
  search_in: String,

  /// Write log messages to this file.
  #[arg(long)]
  log_file: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Edit the grid and clues of a stored puzzle, starting a blank one if needed.
  Edit { slug: String },
  /// Solve a stored puzzle.
  Solve { slug: String },
  /// Solve a puzzle from a share string.
  Share { encoded: String },
}

fn parse_dictionary_arg(arg: &str) -> Result<(String, PathBuf), String> {
  match arg.split_once('=') {
    Some((name, path)) if !name.is_empty() && !path.is_empty() => {
      Ok((name.to_string(), PathBuf::from(path)))
    }
    _ => Err(format!("expected NAME=PATH, got '{arg}'")),
  }
}

fn main() -> io::Result<()> {
  let cli = Cli::parse();

  if let Some(path) = &cli.log_file {
    let file = File::create(path)?;
    env_logger::Builder::from_default_env()
      .target(env_logger::Target::Pipe(Box::new(file)))
      .init();
  }

  let store = FileStore::new(&cli.data_dir);
  let mut library = DictionaryLibrary::default();
  for (name, path) in &cli.dictionaries {
    library.upload(&fs::read_to_string(path)?, name);
  }
  if library.get(&cli.search_in).is_none() {
    println!(
      "No dictionary named '{}'. Available: {}",
      cli.search_in,
      library.list().join(", ")
    );
    std::process::exit(1);
  }

  let screen = match cli.command {
    Command::Edit { slug } => {
      let puzzle = match store.load(&slug) {
        Ok(puzzle) => puzzle,
        Err(Error::NotFound(_)) => Puzzle::blank(BLANK_SIZE, BLANK_SIZE),
        Err(e) => exit_with(&e),
      };
      Screen::Editor {
        editor: Editor::new(puzzle),
        slug,
      }
    }
    Command::Solve { slug } => {
      let puzzle = store.load(&slug).unwrap_or_else(|e| exit_with(&e));
      Screen::Solver(Solver::new(puzzle))
    }
    Command::Share { encoded } => {
      let puzzle = share::decode(&encoded).unwrap_or_else(|e| exit_with(&e));
      Screen::Solver(Solver::new(puzzle))
    }
  };

  let app = App::new(screen, store, library, cli.search_in);
  let terminal = ratatui::init();
  let result = app.run(terminal);
  ratatui::restore();
  result
}

fn exit_with(e: &Error) -> ! {
  println!("{e}");
  std::process::exit(1);
}

/// The colors of an open square.
fn square_style(value: SquareStyle) -> Style {
  let base_style = match value {
    SquareStyle::Standard => Style::new().bg(Color::White),
    SquareStyle::Cursor => Style::new().bg(Color::LightRed),
    SquareStyle::Word => Style::new().bg(Color::LightYellow),
  };
  base_style.fg(Color::Black).add_modifier(Modifier::BOLD)
}

/// What the user is working on.
#[derive(Debug)]
enum Screen {
  Editor { editor: Editor, slug: String },
  Solver(Solver),
}

impl Screen {
  fn session(&self) -> &dyn Session {
    match self {
      Self::Editor { editor, .. } => editor,
      Self::Solver(solver) => solver,
    }
  }

  fn session_mut(&mut self) -> &mut dyn Session {
    match self {
      Self::Editor { editor, .. } => editor,
      Self::Solver(solver) => solver,
    }
  }

  fn hints(&self) -> &Hints {
    match self {
      Self::Editor { editor, .. } => editor.hints(),
      Self::Solver(solver) => solver.hints(),
    }
  }

  fn current_hint(&self) -> Option<&Hint> {
    match self {
      Self::Editor { editor, .. } => editor.current_hint(),
      Self::Solver(solver) => solver.current_hint(),
    }
  }
}

#[derive(Debug)]
pub struct App {
  screen: Screen,
  store: FileStore,
  library: DictionaryLibrary,
  /// Name of the word list to search.
  search_in: String,
  /// Clue text being typed, while editing a clue.
  clue_draft: Option<String>,
  status: String,
  running: bool,
}

impl App {
  fn new(screen: Screen, store: FileStore, library: DictionaryLibrary, search_in: String) -> Self {
    Self {
      screen,
      store,
      library,
      search_in,
      clue_draft: None,
      status: String::new(),
      running: true,
    }
  }

  pub fn run(mut self, mut terminal: DefaultTerminal) -> io::Result<()> {
    self.running = true;
    while self.running {
      terminal.draw(|frame| self.draw(frame))?;
      // A search that was just started has been drawn as such; now do the lookup.
      if self.complete_search() {
        continue;
      }
      self.handle_crossterm_events()?;
    }
    Ok(())
  }

  fn draw(&self, frame: &mut Frame) {
    frame.render_widget(self, frame.area());
  }

  /// Reads the crossterm events and updates the state of [`App`].
  fn handle_crossterm_events(&mut self) -> io::Result<()> {
    match event::read()? {
      Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
      _ => {}
    }
    Ok(())
  }

  /// Handles the key events and updates the state of [`App`].
  fn on_key_event(&mut self, key: KeyEvent) {
    if self.clue_draft.is_some() {
      self.on_clue_key(key);
      return;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
      KeyCode::Esc => return self.quit(),
      KeyCode::Char('c') if ctrl => return self.quit(),
      KeyCode::Char('s') if ctrl => return self.save(),
      _ => {}
    }

    let handled = match &mut self.screen {
      Screen::Editor { editor, .. } => match key.code {
        KeyCode::Char('b') if ctrl => {
          editor.toggle_blocked();
          true
        }
        KeyCode::Char('x') if ctrl => {
          editor.clear_run();
          true
        }
        KeyCode::Char('f') if ctrl => {
          editor.begin_search();
          true
        }
        KeyCode::Char('e') if ctrl => {
          self.clue_draft = editor.current_hint().map(|hint| hint.text.clone());
          true
        }
        KeyCode::Char(c @ '1'..='9') if alt => {
          let choice = c as usize - '1' as usize;
          let word = editor
            .search()
            .words()
            .ok()
            .and_then(|words| words.get(choice).cloned());
          if let Some(word) = word {
            editor.apply_word(&word);
          }
          true
        }
        _ => false,
      },
      Screen::Solver(solver) => match key.code {
        KeyCode::Char('k') if ctrl => {
          solver.check(Scope::Word);
          true
        }
        KeyCode::Char('r') if ctrl => {
          solver.reveal(Scope::Word);
          true
        }
        KeyCode::Char('p') if ctrl => {
          solver.toggle_pencil();
          true
        }
        _ => false,
      },
    };

    if !handled {
      if let Some(input) = translate_key(key_input(key)) {
        self.screen.session_mut().handle_input(input);
      }
    }
  }

  fn on_clue_key(&mut self, key: KeyEvent) {
    let Some(draft) = &mut self.clue_draft else {
      return;
    };
    match key.code {
      KeyCode::Esc => self.clue_draft = None,
      KeyCode::Enter => {
        let text = std::mem::take(draft);
        self.clue_draft = None;
        if let Screen::Editor { editor, .. } = &mut self.screen {
          if let Some((direction, index)) = current_hint_index(editor) {
            editor.set_hint(direction, index, text);
          }
        }
      }
      KeyCode::Backspace => {
        draft.pop();
      }
      KeyCode::Char(c) => draft.push(c),
      _ => {}
    }
  }

  /// Runs the lookup for a search started by the last key press. Returns whether
  /// there was one.
  fn complete_search(&mut self) -> bool {
    let Screen::Editor { editor, .. } = &mut self.screen else {
      return false;
    };
    if !editor.search().is_searching() {
      return false;
    }
    match self.library.get(&self.search_in) {
      Some(dictionary) => editor.complete_search(dictionary),
      None => error!("no dictionary named '{}'", self.search_in),
    }
    true
  }

  fn save(&mut self) {
    let Screen::Editor { editor, slug } = &self.screen else {
      return;
    };
    self.status = match self.store.save(slug, editor.puzzle()) {
      Ok(()) => {
        info!("saved '{slug}'");
        format!("Saved '{slug}'")
      }
      Err(e) => {
        error!("saving '{slug}' failed: {e}");
        format!("Save failed: {e}")
      }
    };
  }

  /// Set running to false to quit the application.
  fn quit(&mut self) {
    self.running = false;
  }

  fn render_square(&self, pos: Pos, square_area: Rect, buf: &mut Buffer) {
    let session = self.screen.session();
    let cell = session.grid().get(pos);
    if cell.is_blocked() {
      Block::new()
        .style(Style::new().bg(Color::Black))
        .render(square_area, buf);
      return;
    }

    let style = square_style(session.square_style(pos));
    let letter_style = match cell {
      Cell::Draft { .. } => Style::new().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
      Cell::Wrong { .. } => Style::new().fg(Color::Red),
      Cell::Revealed {
        corrected: true, ..
      } => Style::new().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
      Cell::Revealed { .. } => Style::new().fg(Color::Blue),
      _ => Style::new(),
    };
    let number = self
      .screen
      .hints()
      .number_at(pos)
      .map(|n| n.to_string())
      .unwrap_or_default();
    let letter = cell.letter().map(String::from).unwrap_or_default();

    Paragraph::new(vec![
      Line::from(number).left_aligned().dim(),
      Line::styled(letter, letter_style).centered(),
    ])
    .block(Block::new().style(style))
    .render(square_area, buf);
  }

  fn clue_lines(&self) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    if let Some(hint) = self.screen.current_hint() {
      let text = self.clue_draft.as_deref().unwrap_or(&hint.text);
      lines.push(line![
        format!("{}{} ", hint.index, direction_letter(hint.direction)).bold(),
        text
      ]);
    }
    if self.clue_draft.is_some() {
      lines.push(Line::from("Enter to keep, Esc to cancel").italic());
    }

    match &self.screen {
      Screen::Editor { editor, .. } => {
        lines.push(Line::default());
        match editor.search() {
          WordSearch::Idle => {}
          WordSearch::Searching { pattern, .. } => {
            lines.push(line!["Searching for ", pattern.to_string()])
          }
          WordSearch::Done { words, .. } if words.is_empty() => {
            lines.push(Line::from("No matches"))
          }
          WordSearch::Done { words, .. } => {
            for (i, word) in words.iter().take(9).enumerate() {
              lines.push(line![format!("Alt-{} ", i + 1).dim(), word.as_str()]);
            }
            if words.len() > 9 {
              lines.push(Line::from(format!("...and {} more", words.len() - 9)).dim());
            }
          }
          WordSearch::Unsearchable(_) => {
            lines.push(Line::from("Can't search across a blocked square").red())
          }
        }
      }
      Screen::Solver(solver) => {
        if solver.is_pencil() {
          lines.push(Line::from("Pencil").italic());
        }
        if solver.is_completed() {
          lines.push(Line::default());
          lines.push(Line::from("Solved!").bold().green());
        }
      }
    }
    lines
  }
}

fn direction_letter(direction: Direction) -> char {
  match direction {
    Direction::Across => 'A',
    Direction::Down => 'D',
  }
}

/// The position of the editor's current hint within its direction's list.
fn current_hint_index(editor: &Editor) -> Option<(Direction, usize)> {
  let hint = editor.current_hint()?;
  let index = editor
    .hints()
    .get(hint.direction)
    .iter()
    .position(|h| h.run == hint.run)?;
  Some((hint.direction, index))
}

fn key_input(key: KeyEvent) -> KeyInput {
  let key_code = match key.code {
    KeyCode::Up => Key::Up,
    KeyCode::Down => Key::Down,
    KeyCode::Left => Key::Left,
    KeyCode::Right => Key::Right,
    KeyCode::Tab => Key::Tab,
    KeyCode::Enter => Key::Enter,
    KeyCode::Backspace => Key::Backspace,
    KeyCode::Char(c) => Key::Char(c),
    _ => Key::Other,
  };
  KeyInput {
    key: key_code,
    ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
    meta: key
      .modifiers
      .intersects(KeyModifiers::ALT | KeyModifiers::META | KeyModifiers::SUPER),
  }
}

impl Widget for &App {
  fn render(self, area: Rect, buf: &mut Buffer) {
    let [title_area, main_area, help_area] = Layout::vertical([
      Constraint::Length(2),
      Constraint::Percentage(100),
      Constraint::Length(1),
    ])
    .areas(area);

    let (mode, help) = match &self.screen {
      Screen::Editor { slug, .. } => (
        format!("editing {slug}"),
        "^B block  ^X clear word  ^F search  ^E edit clue  ^S save  Esc quit",
      ),
      Screen::Solver(_) => (
        "solving".to_string(),
        "^K check word  ^R reveal word  ^P pencil  Esc quit",
      ),
    };
    line!["Ratatui Crossword".bold().blue(), ": ".bold(), mode.bold()]
      .centered()
      .render(title_area, buf);
    let help_line = if self.status.is_empty() {
      Line::from(help).dim()
    } else {
      line![self.status.as_str(), "  ", help.dim()]
    };
    help_line.centered().render(help_area, buf);

    let [puzzle_area, clue_area] =
      Layout::horizontal([Constraint::Percentage(100), Constraint::Length(45)]).areas(main_area);

    let grid = self.screen.session().grid();
    let grid_width = u16::try_from(grid.width()).unwrap_or(u16::MAX);
    let grid_height = u16::try_from(grid.height()).unwrap_or(u16::MAX);
    let puzzle_area = center(
      puzzle_area,
      Constraint::Length(grid_width.saturating_mul(SQUARE_WIDTH + 1)),
      Constraint::Length(grid_height.saturating_mul(SQUARE_HEIGHT + 1)),
    );

    let mut square_area = Rect {
      x: puzzle_area.x,
      y: puzzle_area.y,
      width: SQUARE_WIDTH,
      height: SQUARE_HEIGHT,
    };
    for row in 0..grid.height() {
      for col in 0..grid.width() {
        let square_rect = square_area.intersection(puzzle_area);
        if !square_rect.is_empty() {
          self.render_square(Pos::new(row, col), square_rect, buf);
        }
        square_area.x = square_area.x.saturating_add(SQUARE_WIDTH + 1);
      }
      square_area.x = puzzle_area.x;
      square_area.y = square_area.y.saturating_add(SQUARE_HEIGHT + 1);
    }

    Paragraph::new(self.clue_lines())
      .wrap(Wrap { trim: true })
      .block(
        Block::bordered()
          .title(Line::from("Current clue").centered())
          .padding(Padding::uniform(1)),
      )
      .render(clue_area, buf);
  }
}

/// https://ratatui.rs/recipes/layout/center-a-widget/
fn center(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
  let [area] = Layout::horizontal([horizontal])
    .flex(Flex::Center)
    .areas(area);
  let [area] = Layout::vertical([vertical]).flex(Flex::Center).areas(area);
  area
}
