use std::io::{self, BufRead, Read, Stdout, Write};

use log::warn;

use crate::core::{Board, Coord, Placement, RulesError, ShipType, Shot, ShotLog, ShotOutcome};

use super::{Player, PlayerError};

/// Reads the process's stdin one line at a time.
///
/// Each refill takes the global stdin lock only for a single line, so
/// several players can share the terminal without stealing each other's
/// buffered input.
#[derive(Default)]
pub struct StdinLines {
    buf: Vec<u8>,
    pos: usize,
}

impl Read for StdinLines {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let n = {
            let available = self.fill_buf()?;
            let n = available.len().min(out.len());
            out[..n].copy_from_slice(&available[..n]);
            n
        };
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for StdinLines {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.pos >= self.buf.len() {
            let mut line = String::new();
            io::stdin().read_line(&mut line)?;
            self.buf = line.into_bytes();
            self.pos = 0;
        }
        Ok(&self.buf[self.pos..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = (self.pos + amt).min(self.buf.len());
    }
}

/// Line-oriented prompt over any reader/writer pair.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl Prompt<StdinLines, Stdout> {
    /// Prompt on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(StdinLines::default(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `message` and read one trimmed line.
    pub fn ask(&mut self, message: &str) -> Result<String, PlayerError> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PlayerError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    /// Ask until `parse` accepts the answer.
    pub fn ask_until<T>(
        &mut self,
        message: &str,
        mut parse: impl FnMut(&str) -> Option<T>,
    ) -> Result<T, PlayerError> {
        loop {
            let line = self.ask(message)?;
            if let Some(value) = parse(&line) {
                return Ok(value);
            }
        }
    }

    pub fn say(&mut self, message: &str) -> Result<(), PlayerError> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }
}

fn render_header(out: &mut impl Write, size: usize) -> io::Result<()> {
    write!(out, "   ")?;
    for c in 0..size {
        write!(out, "{:>3}", c)?;
    }
    writeln!(out)
}

/// Write the player's own board with ships revealed.
pub fn render_board(out: &mut impl Write, board: &Board) -> io::Result<()> {
    render_header(out, board.size())?;
    for r in 0..board.size() {
        write!(out, "{:>3}", r)?;
        for c in 0..board.size() {
            let ch = if board[Coord::new(r, c)].is_ship() { 'S' } else { '.' };
            write!(out, "{:>3}", ch)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Write the player's view of the opponent: hits, misses and unknown water.
pub fn render_shots(out: &mut impl Write, shots: &ShotLog) -> io::Result<()> {
    render_header(out, shots.board_size())?;
    for r in 0..shots.board_size() {
        write!(out, "{:>3}", r)?;
        for c in 0..shots.board_size() {
            let ch = match shots.get(Coord::new(r, c)) {
                Some(Shot::Hit) => 'X',
                Some(Shot::Miss) => 'o',
                None => '.',
            };
            write!(out, "{:>3}", ch)?;
        }
        writeln!(out)?;
    }
    writeln!(out, "   Legend: X=Hit  o=Miss  .=Unknown")
}

/// Interactive player reading decisions from a terminal.
///
/// Placements look like `0,0,h` or `1 2 v`; shots look like `3, 4`.
pub struct CliPlayer<R, W> {
    name: String,
    prompt: Prompt<R, W>,
}

impl CliPlayer<StdinLines, Stdout> {
    pub fn stdio(name: impl Into<String>) -> Self {
        Self::new(name, Prompt::stdio())
    }
}

impl<R: BufRead, W: Write> CliPlayer<R, W> {
    pub fn new(name: impl Into<String>, prompt: Prompt<R, W>) -> Self {
        Self {
            name: name.into(),
            prompt,
        }
    }

    pub fn prompt(&mut self) -> &mut Prompt<R, W> {
        &mut self.prompt
    }
}

impl<R: BufRead, W: Write> Player for CliPlayer<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn place_ship(&mut self, ship: &ShipType) -> Result<Placement, PlayerError> {
        let message = format!(
            "Enter placement for {} (length {}) - format: row,col,orientation (e.g., '0,0,h' or '1 2 v'): ",
            ship.name(),
            ship.length()
        );
        loop {
            let line = self.prompt.ask(&message)?;
            match line.parse::<Placement>() {
                Ok(placement) => return Ok(placement),
                Err(err) => {
                    warn!("{}: {}", self.name, err);
                    self.prompt.say(
                        "Invalid format. Please enter row, column, and orientation (h/v).",
                    )?;
                }
            }
        }
    }

    fn make_move(&mut self, shots: &ShotLog) -> Result<Coord, PlayerError> {
        render_shots(self.prompt.output(), shots)?;
        let line = self
            .prompt
            .ask("Enter coordinates (input like \"row, col\") to shoot at: ")?;
        Ok(line.parse::<Coord>()?)
    }

    fn show_board(&mut self, board: &Board) {
        if let Err(err) = render_board(self.prompt.output(), board) {
            warn!("{}: could not show board: {}", self.name, err);
        }
    }

    fn handle_rejection(&mut self, error: &RulesError) {
        let message = format!("Rejected: {}. Please try again.", error);
        if let Err(err) = self.prompt.say(&message) {
            warn!("{}: could not report rejection: {}", self.name, err);
        }
    }

    fn handle_shot_result(&mut self, coord: Coord, outcome: &ShotOutcome) {
        let message = match outcome {
            ShotOutcome::Hit => format!("Your shot at {} hit!", coord),
            ShotOutcome::Miss => format!("Your shot at {} missed.", coord),
            ShotOutcome::Sunk(name) => format!("Your shot at {} sunk the {}!", coord, name),
        };
        if let Err(err) = self.prompt.say(&message) {
            warn!("{}: could not report shot result: {}", self.name, err);
        }
    }
}
