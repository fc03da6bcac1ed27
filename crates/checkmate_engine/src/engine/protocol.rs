//! UCI command parsing
//!
//! Lines are split on whitespace. Leading tokens that are not a known
//! command word are skipped, so `junk isready` is read as `isready`. Lines
//! without any known command yield `None`.
//!
//! # Supported Commands
//!
//! | Command      | Arguments                                                     |
//! |--------------|---------------------------------------------------------------|
//! | `uci`        |                                                               |
//! | `isready`    |                                                               |
//! | `ucinewgame` |                                                               |
//! | `position`   | `startpos` or `fen <6 fields>`, then optional `moves <m>...` |
//! | `go`         | `wtime`, `btime`, `winc`, `binc`, `ponder`, `infinite`       |
//! | `stop`       |                                                               |
//! | `setoption`  | ignored                                                       |
//! | `register`   | ignored                                                       |
//! | `quit`       |                                                               |

use tracing::warn;

use crate::types::Color;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PositionBase {
    StartPos,
    /// The six FEN fields joined by single spaces
    Fen(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionCommand {
    pub base: PositionBase,
    /// Raw move tokens, validated when applied
    pub moves: Vec<String>,
}

/// Parameters of a `go` command
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GoParams {
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
    pub ponder: bool,
    pub infinite: bool,
}

impl GoParams {
    /// Remaining clock of `side` in milliseconds, if the GUI sent one
    pub fn remaining(&self, side: Color) -> Option<u64> {
        match side {
            Color::White => self.wtime,
            Color::Black => self.btime,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Uci,
    IsReady,
    UciNewGame,
    Position(PositionCommand),
    Go(GoParams),
    Stop,
    SetOption,
    Register,
    Quit,
}

/// Parse one protocol line
pub fn parse_command(line: &str) -> Option<Command> {
    let mut tokens = line.split_whitespace();

    while let Some(word) = tokens.next() {
        let command = match word {
            "uci" => Command::Uci,
            "isready" => Command::IsReady,
            "ucinewgame" => Command::UciNewGame,
            "position" => Command::Position(parse_position(&mut tokens)?),
            "go" => Command::Go(parse_go(&mut tokens)),
            "stop" => Command::Stop,
            "setoption" => Command::SetOption,
            "register" => Command::Register,
            "quit" => Command::Quit,
            _ => continue,
        };
        return Some(command);
    }

    None
}

fn parse_position<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> Option<PositionCommand> {
    let base = match tokens.next() {
        Some("startpos") => PositionBase::StartPos,
        Some("fen") => {
            let fields: Vec<&str> = tokens.by_ref().take(6).collect();
            if fields.len() < 6 {
                warn!("[UCI] position fen needs 6 fields, got {}; ignored", fields.len());
                return None;
            }
            PositionBase::Fen(fields.join(" "))
        }
        other => {
            warn!("[UCI] position without startpos or fen ({:?}); ignored", other);
            return None;
        }
    };

    let moves = match tokens.next() {
        Some("moves") => tokens.map(str::to_string).collect(),
        _ => Vec::new(),
    };

    Some(PositionCommand { base, moves })
}

fn parse_go<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> GoParams {
    let mut go = GoParams::default();

    while let Some(token) = tokens.next() {
        let slot = match token {
            "searchmoves" => break,
            "ponder" => {
                go.ponder = true;
                continue;
            }
            "infinite" => {
                go.infinite = true;
                continue;
            }
            "wtime" => &mut go.wtime,
            "btime" => &mut go.btime,
            "winc" => &mut go.winc,
            "binc" => &mut go.binc,
            _ => {
                // unknown parameters carry one value
                tokens.next();
                continue;
            }
        };

        match tokens.next() {
            Some(value) => *slot = Some(parse_millis(value)),
            None => break,
        }
    }

    go
}

/// Clock values may be negative when a GUI overshoots; they clamp to 0
fn parse_millis(value: &str) -> u64 {
    value.parse::<i64>().map(|v| v.max(0) as u64).unwrap_or(0)
}
