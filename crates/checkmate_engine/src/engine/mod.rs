//! # UCI Engine - Pondering State Machine
//!
//! ## Overview
//!
//! [`Engine`] drives the whole program: it reads protocol lines, keeps the
//! real game position, runs searches, and decides when a search result is
//! played, kept waiting, or thrown away.
//!
//! All mutable engine state lives in one [`EngineContext`]. While a search
//! runs, the [`Searcher`] borrows that context through the [`SearchControl`]
//! trait, so commands are handled *inside* the search at its poll points:
//!
//! ```text
//!   stdin thread --channel--> LineSource --poll--> CommandQueue --> handle()
//!                                              ^                      |
//!                                              |              Cancellation flags
//!                                          Searcher <-----------------+
//! ```
//!
//! ## The Predict-and-Ponder Cycle
//!
//! 1. `go` arrives: search the real position on our own time.
//! 2. The search completes: print `bestmove`, play it on the real position,
//!    and if the search also predicted the opponent's reply, start searching
//!    the position after that reply (pondering).
//! 3. The opponent's move arrives as a `position` command:
//!    - **ponder hit**: it is the predicted move, the running search simply
//!      continues, now on our own time;
//!    - **misprediction**: the running search is discarded and a new one
//!      starts on the corrected position.
//! 4. `go` arrives: after a ponder hit the search is stopped and its result
//!    played right away.
//!
//! `bestmove` is never printed before the `go` for the current position has
//! arrived. A search that completes earlier waits for it.

mod config;
mod intake;
mod protocol;
mod state;

pub use config::EngineConfig;
pub use intake::{forward_lines, spawn_stdin_reader, ChannelSource, CommandQueue, LineSource, LineStatus};
pub use protocol::{parse_command, Command, GoParams, PositionBase, PositionCommand};
pub use state::EngineState;

use std::io::Write;

use tracing::{debug, info, warn};

use crate::board::Position;
use crate::error::{EngineError, EngineResult};
use crate::move_gen::{apply_move, legal_moves};
use crate::notation::resolve_move;
use crate::search::{
    Cancellation, CompletedDepth, DeepeningOutcome, SearchControl, Searcher,
};
use crate::types::Move;

/// Counters kept for diagnostics and tests
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub searches: u32,
    pub commits: u32,
    pub ponder_hits: u32,
    pub mispredictions: u32,
}

/// Everything the engine owns, borrowed by the searcher at poll points
pub struct EngineContext<S, W> {
    config: EngineConfig,
    source: S,
    out: W,
    queue: CommandQueue,
    /// The game position as the GUI last described it, plus our own moves
    real: Position,
    state: EngineState,
    cancel: Cancellation,
    /// `stop` accepted for the current own-time search; survives a restart
    stop_requested: bool,
    /// Opponent reply the current ponder search assumes
    predicted: Option<Move>,
    /// Position the current ponder search started from
    ponder_root: Option<Position>,
    ponder_hit: bool,
    /// Own-time search started without its `go`
    awaiting_go: bool,
    go: GoParams,
    /// End of input seen; lines already queued are still handled
    closed: bool,
    quit: bool,
    stats: EngineStats,
}

impl<S: LineSource, W: Write> EngineContext<S, W> {
    fn emit(&mut self, line: &str) -> EngineResult<()> {
        writeln!(self.out, "{line}")?;
        self.out.flush()?;
        debug!("> {line}");
        Ok(())
    }

    fn set_state(&mut self, state: EngineState) {
        if self.state != state {
            debug!("[ENGINE] state = {state}");
        }
        self.state = state;
    }

    fn request_quit(&mut self) {
        self.quit = true;
        self.cancel.raise(Cancellation::DISCARD);
    }

    fn enqueue(&mut self, line: String) -> EngineResult<()> {
        debug!("< {line}");
        self.queue.push(line)
    }

    fn mark_closed(&mut self) {
        if !self.closed {
            debug!("[ENGINE] input closed");
            self.closed = true;
        }
    }

    /// Block for the next line; `false` once input is closed
    fn wait_for_input(&mut self) -> EngineResult<bool> {
        match self.source.wait_line() {
            Some(line) => {
                self.enqueue(line)?;
                self.pull_available()?;
                Ok(true)
            }
            None => {
                self.mark_closed();
                Ok(false)
            }
        }
    }

    /// Move every line that is already available into the queue
    fn pull_available(&mut self) -> EngineResult<()> {
        loop {
            match self.source.try_line() {
                LineStatus::Ready(line) => self.enqueue(line)?,
                LineStatus::Pending => return Ok(()),
                LineStatus::Closed => {
                    self.mark_closed();
                    return Ok(());
                }
            }
        }
    }

    /// Handle queued commands in order
    ///
    /// With `until_search`, stops right after a command that starts a
    /// search; the remaining lines are handled at that search's poll points.
    fn process_queue(&mut self, until_search: bool) -> EngineResult<()> {
        while let Some(line) = self.queue.pop() {
            match parse_command(&line) {
                Some(command) => self.handle(command)?,
                None => debug!("[UCI] ignored '{line}'"),
            }
            if self.quit || (until_search && self.state.is_thinking()) {
                break;
            }
        }
        Ok(())
    }

    fn handle(&mut self, command: Command) -> EngineResult<()> {
        match command {
            Command::Uci => {
                let name = format!("id name {}", self.config.name);
                let author = format!("id author {}", self.config.author);
                self.emit(&name)?;
                self.emit(&author)?;
                self.emit("uciok")?;
            }
            Command::IsReady => self.emit("readyok")?,
            Command::UciNewGame => {
                if self.state == EngineState::WaitingForGo {
                    self.real = Position::startpos();
                    self.clear_prediction();
                } else {
                    debug!("[UCI] ucinewgame ignored while {}", self.state);
                }
            }
            Command::Position(command) => self.handle_position(&command)?,
            Command::Go(params) => self.handle_go(params)?,
            Command::Stop => {
                if self.state == EngineState::ThinkingOnOwnTime && !self.awaiting_go {
                    self.stop_requested = true;
                    self.cancel.raise(Cancellation::STOP);
                } else {
                    debug!("[UCI] stop ignored while {}", self.state);
                }
            }
            Command::SetOption | Command::Register => {}
            Command::Quit => self.request_quit(),
        }
        Ok(())
    }

    /// Build the position a `position` command describes, skipping bad moves
    fn build_position(command: &PositionCommand) -> Option<(Position, Option<Move>)> {
        let mut pos = match &command.base {
            PositionBase::StartPos => Position::startpos(),
            PositionBase::Fen(fen) => match Position::from_fen(fen) {
                Ok(pos) => pos,
                Err(e) => {
                    warn!("[UCI] {e}; position ignored");
                    return None;
                }
            },
        };

        let mut last_move = None;
        for token in &command.moves {
            match resolve_move(&pos, token) {
                Ok(mv) => {
                    apply_move(&mut pos, mv);
                    last_move = Some(mv);
                }
                Err(e) => warn!("[UCI] skipping move: {e}"),
            }
        }

        pos.update_game_over();
        Some((pos, last_move))
    }

    fn handle_position(&mut self, command: &PositionCommand) -> EngineResult<()> {
        let Some((position, last_move)) = Self::build_position(command) else {
            return Ok(());
        };

        match self.state {
            EngineState::WaitingForGo => {
                self.real = position;
            }
            EngineState::ThinkingOnOwnTime => {
                return Err(EngineError::UnexpectedTransition {
                    state: self.state.to_string(),
                    event: "position".to_string(),
                });
            }
            EngineState::ThinkingOnOpponentTime => {
                let hit = last_move.is_some()
                    && last_move == self.predicted
                    && self
                        .ponder_root
                        .is_some_and(|root| root.same_state(&position));

                self.real = position;
                self.awaiting_go = true;
                if hit {
                    info!("[ENGINE] ponder hit");
                    self.ponder_hit = true;
                    self.stats.ponder_hits += 1;
                } else {
                    info!("[ENGINE] opponent move was not predicted, restarting");
                    self.stats.mispredictions += 1;
                    self.cancel.raise(Cancellation::DISCARD);
                }
                self.set_state(EngineState::ThinkingOnOwnTime);
            }
        }
        Ok(())
    }

    fn handle_go(&mut self, params: GoParams) -> EngineResult<()> {
        match self.state {
            EngineState::WaitingForGo => {
                self.go = params;
                if self.real.game_over {
                    self.emit("info string game over")?;
                    self.emit("bestmove 0000")?;
                } else {
                    self.awaiting_go = false;
                    self.ponder_hit = false;
                    self.stop_requested = false;
                    self.set_state(EngineState::ThinkingOnOwnTime);
                }
            }
            EngineState::ThinkingOnOwnTime => {
                self.go = params;
                if self.awaiting_go {
                    self.awaiting_go = false;
                    if self.ponder_hit {
                        // the pondered result is ready, play it now
                        self.cancel.raise(Cancellation::STOP);
                    }
                } else {
                    debug!("[UCI] go ignored, already thinking");
                }
            }
            EngineState::ThinkingOnOpponentTime => {
                return Err(EngineError::UnexpectedTransition {
                    state: self.state.to_string(),
                    event: "go".to_string(),
                });
            }
        }
        Ok(())
    }

    fn clear_prediction(&mut self) {
        self.predicted = None;
        self.ponder_root = None;
        self.ponder_hit = false;
    }

    fn search_root(&self) -> Position {
        match self.state {
            EngineState::ThinkingOnOpponentTime => self.ponder_root.unwrap_or(self.real),
            _ => self.real,
        }
    }

    /// Block on input until the finished search may be played or is void
    fn park(&mut self) -> EngineResult<()> {
        debug!("[ENGINE] search finished early, waiting for input");
        loop {
            self.process_queue(false)?;
            if self.quit || self.cancel.discard || !(self.state.is_pondering() || self.awaiting_go) {
                return Ok(());
            }
            if self.closed || !self.wait_for_input()? {
                self.request_quit();
            }
        }
    }

    /// Play the result of an own-time search and start pondering
    fn commit(&mut self, done: &CompletedDepth) -> EngineResult<()> {
        self.ponder_hit = false;
        self.stop_requested = false;

        let Some(best) = done.result.best_move else {
            self.emit("info string game over")?;
            self.emit("bestmove 0000")?;
            self.clear_prediction();
            self.set_state(EngineState::WaitingForGo);
            return Ok(());
        };

        self.emit(&format!("bestmove {best}"))?;
        apply_move(&mut self.real, best);
        self.real.update_game_over();
        self.stats.commits += 1;
        info!(
            depth = done.depth,
            score = %done.result.score,
            "[ENGINE] played {best}"
        );

        match done.result.reply {
            Some(reply) if !self.real.game_over => {
                if !legal_moves(&self.real).contains(&reply) {
                    return Err(EngineError::IllegalPrediction { mv: reply });
                }
                self.emit(&format!("info string predicted opponent move {reply}"))?;

                let mut ponder_root = self.real;
                apply_move(&mut ponder_root, reply);
                self.predicted = Some(reply);
                self.ponder_root = Some(ponder_root);
                self.set_state(EngineState::ThinkingOnOpponentTime);
            }
            _ => {
                self.clear_prediction();
                self.set_state(EngineState::WaitingForGo);
            }
        }
        Ok(())
    }
}

impl<S: LineSource, W: Write> SearchControl for EngineContext<S, W> {
    fn poll(&mut self) -> EngineResult<Cancellation> {
        self.pull_available()?;
        self.process_queue(false)?;
        // an own-time search with its `go` still finishes and plays
        let committing = self.state == EngineState::ThinkingOnOwnTime && !self.awaiting_go;
        if self.closed && !self.quit && !committing {
            self.request_quit();
        }
        Ok(self.cancel)
    }

    fn report(&mut self, completed: &CompletedDepth) -> EngineResult<()> {
        let mut line = format!(
            "info depth {} score {} nodes {} time {}",
            completed.depth,
            completed.result.score.uci(),
            completed.nodes,
            completed.elapsed.as_millis()
        );
        if let Some(best) = completed.result.best_move {
            line.push_str(&format!(" pv {best}"));
            if let Some(reply) = completed.result.reply {
                line.push_str(&format!(" {reply}"));
            }
        }
        self.emit(&line)
    }

    fn depth_limit(&self) -> Option<u32> {
        match self.state {
            EngineState::ThinkingOnOwnTime => Some(
                self.config
                    .own_time_depth(&self.go, self.real.side_to_move),
            ),
            EngineState::ThinkingOnOpponentTime => None,
            EngineState::WaitingForGo => Some(self.config.max_depth),
        }
    }
}

pub struct Engine<S: LineSource, W: Write> {
    ctx: EngineContext<S, W>,
}

impl<S: LineSource, W: Write> Engine<S, W> {
    /// # Errors
    ///
    /// [`EngineError::Config`] if the configuration does not validate.
    pub fn new(config: EngineConfig, source: S, out: W) -> EngineResult<Self> {
        config.validate()?;
        let queue = CommandQueue::new(config.queue_capacity);
        Ok(Engine {
            ctx: EngineContext {
                config,
                source,
                out,
                queue,
                real: Position::startpos(),
                state: EngineState::WaitingForGo,
                cancel: Cancellation::NONE,
                stop_requested: false,
                predicted: None,
                ponder_root: None,
                ponder_hit: false,
                awaiting_go: false,
                go: GoParams::default(),
                closed: false,
                quit: false,
                stats: EngineStats::default(),
            },
        })
    }

    pub fn state(&self) -> EngineState {
        self.ctx.state
    }

    /// The real game position
    pub fn position(&self) -> &Position {
        &self.ctx.real
    }

    pub fn stats(&self) -> EngineStats {
        self.ctx.stats
    }

    pub fn config(&self) -> &EngineConfig {
        &self.ctx.config
    }

    pub fn into_output(self) -> W {
        self.ctx.out
    }

    /// Run until `quit` or end of input
    ///
    /// # Errors
    ///
    /// Invariant violations, queue overflow and output failures end the
    /// loop with an error.
    pub fn run(&mut self) -> EngineResult<()> {
        info!("[ENGINE] {} started", self.ctx.config.name);

        while !self.ctx.quit {
            if self.ctx.state.is_thinking() {
                self.think()?;
                continue;
            }

            self.ctx.process_queue(true)?;
            if self.ctx.quit || self.ctx.state.is_thinking() {
                continue;
            }

            // the queue is drained at this point
            if self.ctx.closed || !self.ctx.wait_for_input()? {
                self.ctx.request_quit();
            }
        }

        info!("[ENGINE] quit");
        Ok(())
    }

    /// Search until the engine is idle again
    fn think(&mut self) -> EngineResult<()> {
        while self.ctx.state.is_thinking() && !self.ctx.quit {
            let root = self.ctx.search_root();
            let limits = self.ctx.config.limits();
            self.ctx.cancel = if self.ctx.stop_requested {
                Cancellation::STOP
            } else {
                Cancellation::NONE
            };
            self.ctx.stats.searches += 1;
            debug!("[ENGINE] searching while {}", self.ctx.state);

            let outcome = Searcher::new(root, &mut self.ctx, limits).deepen()?;
            if self.ctx.quit {
                break;
            }

            match outcome {
                DeepeningOutcome::Discarded => {
                    debug!("[ENGINE] search discarded");
                }
                DeepeningOutcome::Completed(done) => {
                    if self.ctx.state.is_pondering() || self.ctx.awaiting_go {
                        self.ctx.park()?;
                        if self.ctx.quit || self.ctx.cancel.discard {
                            continue;
                        }
                    }
                    self.ctx.commit(&done)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, PieceKind, Square};
    use std::collections::VecDeque;

    /// Hands out fixed lines, then reports closed input
    struct VecSource(VecDeque<String>);

    impl VecSource {
        fn new(lines: &[&str]) -> Self {
            VecSource(lines.iter().map(|l| l.to_string()).collect())
        }
    }

    impl LineSource for VecSource {
        fn try_line(&mut self) -> LineStatus {
            match self.0.pop_front() {
                Some(line) => LineStatus::Ready(line),
                None => LineStatus::Closed,
            }
        }

        fn wait_line(&mut self) -> Option<String> {
            self.0.pop_front()
        }
    }

    fn test_config() -> EngineConfig {
        EngineConfig {
            min_depth: 1,
            max_depth: 2,
            poll_interval: 1,
            max_quiescence_depth: 2,
            ..EngineConfig::default()
        }
    }

    fn run(lines: &[&str]) -> (EngineResult<()>, Engine<VecSource, Vec<u8>>) {
        let mut engine = Engine::new(test_config(), VecSource::new(lines), Vec::new()).unwrap();
        let result = engine.run();
        (result, engine)
    }

    fn output(engine: Engine<VecSource, Vec<u8>>) -> Vec<String> {
        String::from_utf8(engine.into_output())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_handshake() {
        let (result, engine) = run(&["uci", "isready", "quit"]);
        assert!(result.is_ok());
        assert_eq!(
            output(engine),
            vec![
                "id name checkmate.exe",
                "id author amel-fou mapatenk mwijnsma",
                "uciok",
                "readyok"
            ]
        );
    }

    #[test]
    fn test_position_skips_bad_moves() {
        let (result, engine) = run(&["position startpos moves e2e4 zz99 e2e5 e7e5", "quit"]);
        assert!(result.is_ok());
        let mut expected = Position::startpos();
        for token in ["e2e4", "e7e5"] {
            let mv = resolve_move(&expected, token).unwrap();
            apply_move(&mut expected, mv);
        }
        assert!(engine.position().same_state(&expected));
        assert_eq!(engine.state(), EngineState::WaitingForGo);
    }

    #[test]
    fn test_invalid_fen_keeps_previous_position() {
        let (result, engine) = run(&[
            "position startpos moves d2d4",
            "position fen 4k3/8/8/8/8/8/8/4K3 x - - 0 1",
            "quit",
        ]);
        assert!(result.is_ok());
        let d4 = Square::parse("d4").unwrap();
        assert_eq!(
            engine.position().piece_at(d4).map(|p| p.kind),
            Some(PieceKind::Pawn)
        );
        assert_eq!(engine.position().side_to_move, Color::Black);
    }

    #[test]
    fn test_go_on_finished_game_answers_null_move() {
        let (result, engine) = run(&[
            "position fen rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
            "go",
            "quit",
        ]);
        assert!(result.is_ok());
        let lines = output(engine);
        assert!(lines.contains(&"bestmove 0000".to_string()));
    }

    #[test]
    fn test_position_while_thinking_is_fatal() {
        let (result, _) = run(&["position startpos", "go", "position startpos"]);
        assert!(matches!(
            result,
            Err(EngineError::UnexpectedTransition { .. })
        ));
    }

    #[test]
    fn test_queue_overflow_is_fatal() {
        let mut config = test_config();
        config.queue_capacity = 2;
        let source = VecSource::new(&["isready", "isready", "isready"]);
        let mut engine = Engine::new(config, source, Vec::new()).unwrap();
        assert!(matches!(
            engine.run(),
            Err(EngineError::QueueOverflow { capacity: 2 })
        ));
    }

    #[test]
    fn test_end_of_input_quits() {
        let (result, engine) = run(&["isready"]);
        assert!(result.is_ok());
        assert_eq!(output(engine), vec!["readyok"]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig {
            min_depth: 0,
            ..EngineConfig::default()
        };
        assert!(Engine::new(config, VecSource::new(&[]), Vec::new()).is_err());
    }
}
