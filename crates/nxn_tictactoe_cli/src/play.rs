//! Line-oriented game loop.
//!
//! Reads `x y` moves, `new`, `help` or `quit` from the input and renders the
//! board after every change. Moves are refused once the game is won or cats.

use anyhow::{Context, Result, bail};
use nxn_tictactoe::{GameEngine, GameState, WinPatternCatalog};
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument};

/// One parsed line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Take the space at column `x`, row `y`.
    Move {
        /// Column.
        x: usize,
        /// Row.
        y: usize,
    },
    /// Start another game with the same players.
    NewGame,
    /// Show the command summary.
    Help,
    /// Leave the loop.
    Quit,
}

const HELP: &str = "Commands: <column> <row> | new | help | quit";

/// Parses a line such as `1 2`, `1,2`, `new` or `quit`.
pub fn parse_input(line: &str) -> Result<Input> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "new" | "n" => return Ok(Input::NewGame),
        "help" | "h" | "?" => return Ok(Input::Help),
        "quit" | "q" | "exit" => return Ok(Input::Quit),
        _ => {}
    }

    let parts: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    let [x, y] = parts.as_slice() else {
        bail!("expected two numbers, got `{}`", line);
    };
    let x = x.parse().with_context(|| format!("bad column `{}`", x))?;
    let y = y.parse().with_context(|| format!("bad row `{}`", y))?;
    Ok(Input::Move { x, y })
}

/// Renders the board from its row-major values, bracketing winning spaces.
pub fn render(engine: &GameEngine) -> String {
    let size = engine.board_size();
    let mut out = String::from("  ");
    for col in 0..size {
        out.push_str(&format!(" {} ", col % 10));
    }
    for (i, value) in engine.board_values().enumerate() {
        let (x, y) = (i % size, i / size);
        if x == 0 {
            out.push_str(&format!("\n{} ", y % 10));
        }
        let symbol = value.symbol();
        if engine.is_winning_space(x, y) {
            out.push_str(&format!("[{}]", symbol));
        } else {
            out.push_str(&format!(" {} ", symbol));
        }
    }
    out.push('\n');
    out
}

fn status(engine: &GameEngine) -> String {
    let current = engine.current_player();
    match engine.current_game_state() {
        GameState::Won(label) => format!(
            "{} wins with {}! {} has {} win(s). Type `new` to play again.",
            current.name(),
            label,
            current.name(),
            current.total_wins()
        ),
        GameState::Cats => "Cats game. Type `new` to play again.".to_string(),
        GameState::New | GameState::InPlay => format!(
            "{} ({}) to move.",
            current.name(),
            current.marker().symbol()
        ),
    }
}

/// Runs the game loop until `quit` or end of input.
#[instrument(skip_all, fields(size = engine.board_size()))]
pub fn run<R: BufRead, W: Write>(engine: &mut GameEngine, input: R, mut out: W) -> Result<()> {
    writeln!(out, "{}", HELP)?;
    write!(out, "{}", render(engine))?;
    writeln!(out, "{}", status(engine))?;

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let parsed = match parse_input(&line) {
            Ok(parsed) => parsed,
            Err(e) => {
                writeln!(out, "{:#}. {}", e, HELP)?;
                continue;
            }
        };
        debug!(?parsed, "Input");

        match parsed {
            Input::Quit => break,
            Input::Help => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            Input::NewGame => engine.new_game(),
            Input::Move { x, y } => {
                if engine.current_game_state().is_terminal() {
                    writeln!(out, "The game is over. Type `new` to play again.")?;
                    continue;
                }
                if let Err(e) = engine.make_move(x, y) {
                    writeln!(out, "Move refused: {} ({})", e.kind(), e.message)?;
                    continue;
                }
            }
        }

        write!(out, "{}", render(engine))?;
        writeln!(out, "{}", status(engine))?;
    }

    info!(
        player1_wins = engine.player1().total_wins(),
        player2_wins = engine.player2().total_wins(),
        "Session ended"
    );
    Ok(())
}

/// Writes every winning segment with its coordinates, in catalog order.
pub fn list_segments<W: Write>(catalog: &WinPatternCatalog, mut out: W) -> Result<()> {
    for segment in catalog.all_segments() {
        let coordinates: Vec<String> = segment
            .coordinates()
            .iter()
            .map(ToString::to_string)
            .collect();
        writeln!(out, "{:<16} {}", segment.label(), coordinates.join(" "))?;
    }
    let flags = catalog.flags();
    writeln!(
        out,
        "{} segments on a {n}x{n} board (diamonds: {}, squares: {})",
        catalog.all_segments().len(),
        if flags.include_diamonds { "on" } else { "off" },
        if flags.include_squares { "on" } else { "off" },
        n = catalog.board_size()
    )?;
    Ok(())
}
