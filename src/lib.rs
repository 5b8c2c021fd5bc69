pub mod card;
pub mod error;
pub mod container;
pub mod transfer;
pub mod board;
pub mod history;
pub mod layout;
pub mod session;
pub mod deals;
pub mod canonical_decks;
pub mod display;

use std::env;
use std::io::{self, BufRead, Write};

use tracing::{info, warn, Level};

pub use crate::board::{Board, ContainerId};
pub use crate::card::{Card, Rank, Suit};
pub use crate::container::{Container, ContainerKind};
pub use crate::error::{DealError, MoveError};
pub use crate::layout::{Layout, Point};
pub use crate::session::{Event, GameSession, SessionConfig};

use crate::deals::DeckSpec;
use crate::display::print_board;

/// Where the starting deck comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeckSource {
    /// Built-in LCG shuffle.
    Seed(u32),
    /// PySolFC game number or seed string.
    Deal(String),
    /// Explicit bracketed index list.
    Deck(String),
    /// Canonical deal won by a single move.
    Demo,
    /// Built-in shuffle with a seed drawn at startup.
    Random,
}

impl DeckSource {
    pub fn resolve(&self) -> Result<DeckSpec, DealError> {
        match self {
            DeckSource::Seed(seed) => Ok(deals::deck_from_seed(*seed)),
            DeckSource::Deal(s) => deals::deck_from_pysol_seed_str(s),
            DeckSource::Deck(s) => Ok(DeckSpec {
                label: "explicit deck".to_string(),
                deck: deals::parse_bracketed_deck_list(s)?,
            }),
            DeckSource::Demo => Ok(DeckSpec {
                label: "demo".to_string(),
                deck: canonical_decks::promotion_ladder_deck(),
            }),
            DeckSource::Random => Ok(deals::deck_from_seed(rand::random::<u32>())),
        }
    }
}

/// Command-line settings for the binary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliOptions {
    pub source: DeckSource,
    pub level: Level,
}

impl Default for CliOptions {
    fn default() -> Self {
        CliOptions {
            source: DeckSource::Random,
            level: Level::INFO,
        }
    }
}

/// Very small hand-rolled argument parser. Unknown or malformed arguments
/// are reported on stderr and otherwise ignored.
pub fn parse_args<I>(args: I) -> CliOptions
where
    I: IntoIterator<Item = String>,
{
    let mut opts = CliOptions::default();
    for arg in args {
        if arg == "--trace" {
            opts.level = Level::TRACE;
        } else if arg == "--quiet" {
            opts.level = Level::WARN;
        } else if arg == "--demo" {
            opts.source = DeckSource::Demo;
        } else if let Some(rest) = arg.strip_prefix("--seed=") {
            match rest.parse::<u32>() {
                Ok(v) => opts.source = DeckSource::Seed(v),
                Err(_) => eprintln!("Warning: could not parse seed from '{}'; ignoring", rest),
            }
        } else if let Some(rest) = arg.strip_prefix("--deal=") {
            opts.source = DeckSource::Deal(rest.to_string());
        } else if let Some(rest) = arg.strip_prefix("--deck=") {
            opts.source = DeckSource::Deck(rest.to_string());
        } else {
            eprintln!(
                "Warning: unrecognized argument '{}'; supported: --seed=<u32>, --deal=<n|msN>, \
                 --deck=[i,...], --demo, --trace, --quiet",
                arg
            );
        }
    }
    opts
}

/// One line of terminal input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Forward an event to the session as-is.
    Event(Event),
    /// Primary click at a board position.
    Click(Point),
    /// Secondary press at a board position.
    PeekAt(Point),
    Show,
    Help,
    Quit,
}

const HELP: &str = "\
commands:
  s <pile>      select a pile (r1-r4, f1-f4, t1-t8; '-' for nothing)
  c <x> <y>     click at a board position
  p <x> <y>     peek at a board position
  P <pile> <y>  peek into a pile at a vertical offset
  x             release peeks
  u / r         undo / redo
  show          redraw the board
  q             quit";

fn parse_pile(s: &str) -> Result<ContainerId, String> {
    ContainerId::from_name(s).ok_or_else(|| format!("unknown pile '{s}'"))
}

fn parse_coord(s: Option<&str>) -> Result<f32, String> {
    let s = s.ok_or_else(|| "missing coordinate".to_string())?;
    s.parse::<f32>()
        .map_err(|_| format!("could not parse '{s}' as a coordinate"))
}

/// Parse a terminal command line. `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let command = match head {
        "s" => match words.next() {
            Some("-") => Command::Event(Event::PrimarySelect(None)),
            Some(name) => Command::Event(Event::PrimarySelect(Some(parse_pile(name)?))),
            None => return Err("usage: s <pile>".to_string()),
        },
        "c" | "p" => {
            let x = parse_coord(words.next())?;
            let y = parse_coord(words.next())?;
            let position = Point::new(x, y);
            if head == "c" {
                Command::Click(position)
            } else {
                Command::PeekAt(position)
            }
        }
        "P" => {
            let pile = parse_pile(words.next().ok_or("usage: P <pile> <y>")?)?;
            let y = parse_coord(words.next())?;
            Command::Event(Event::SecondaryPeek(pile, Point::new(0.0, y)))
        }
        "x" => Command::Event(Event::SecondaryRelease),
        "u" => Command::Event(Event::Undo),
        "r" => Command::Event(Event::Redo),
        "show" => Command::Show,
        "h" | "help" | "?" => Command::Help,
        "q" | "quit" => Command::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(command))
}

/// Write the input prompt. Returns false if it could not be written.
fn prompt<W: Write>(out: &mut W) -> bool {
    if let Err(e) = out.write_all(b"> ").and_then(|()| out.flush()) {
        warn!(%e, "could not write the prompt");
        return false;
    }
    true
}

/// Entry point for the `freecell` binary.
///
/// Parses the command line, deals the chosen deck, then reads commands from
/// stdin until `q` or end of input, redrawing the board after every
/// command that changed something.
///
/// Example:
///   cargo run -- --deal=ms11982
pub fn run() {
    let opts = parse_args(env::args().skip(1));

    // A second subscriber (e.g. under a test harness) is not an error.
    let _ = tracing_subscriber::fmt()
        .with_max_level(opts.level)
        .with_writer(io::stderr)
        .try_init();

    let spec = match opts.source.resolve() {
        Ok(spec) => spec,
        Err(e) => {
            eprintln!("Error: {e}");
            return;
        }
    };
    let mut session = match GameSession::initialize(&spec.deck) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            return;
        }
    };
    info!(deal = %spec.label, "freecell starting");

    println!("Deal: {}  (type 'help' for commands)", spec.label);
    println!();
    print_board(&session.snapshot_for_render());

    let stdin = io::stdin();
    let mut out = io::stdout();
    loop {
        prompt(&mut out);

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(%e, "could not read input");
                break;
            }
        }

        let command = match parse_command(&line) {
            Ok(Some(c)) => c,
            Ok(None) => continue,
            Err(msg) => {
                println!("{msg}");
                continue;
            }
        };

        let was_won = session.is_won();
        let changed = match command {
            Command::Event(event) => session.dispatch(event),
            Command::Click(position) => session.click_at(position),
            Command::PeekAt(position) => session.peek_at(position),
            Command::Show => true,
            Command::Help => {
                println!("{HELP}");
                false
            }
            Command::Quit => break,
        };

        if changed {
            print_board(&session.snapshot_for_render());
        }
        if session.is_won() && !was_won {
            println!("Congrats !");
        }
    }
}
