//! Integration tests for the pondering state machine
//!
//! Each test drives a real [`Engine`] with a scripted line source. The script
//! can hold back input until the engine has written something (a
//! `bestmove`, a number of `info depth` lines), which makes the interleaving
//! of commands and searches deterministic on a single thread.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::rc::Rc;

use checkmate_engine::engine::{Engine, EngineConfig, EngineState, LineSource, LineStatus};
use checkmate_engine::move_gen::{apply_move, legal_moves};
use checkmate_engine::notation::resolve_move;
use checkmate_engine::{EngineError, Position};

/// Output buffer shared between the engine and the script
#[derive(Clone, Default)]
struct SharedOutput(Rc<RefCell<Vec<u8>>>);

impl SharedOutput {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    fn lines(&self) -> Vec<String> {
        self.text().lines().map(str::to_string).collect()
    }

    fn count(&self, prefix: &str) -> usize {
        self.lines().iter().filter(|l| l.starts_with(prefix)).count()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

type Responder = Box<dyn FnOnce(&[String]) -> Vec<String>>;

enum Step {
    Line(String),
    /// Hold back until at least `count` output lines start with the prefix
    WaitFor(&'static str, usize),
    /// Compute further lines from the output so far
    Respond(Responder),
}

struct ScriptedSource {
    steps: VecDeque<Step>,
    output: SharedOutput,
}

impl ScriptedSource {
    /// Advance past satisfied waits and responders; `None` when blocked
    fn next_line(&mut self) -> Option<Option<String>> {
        loop {
            match self.steps.pop_front() {
                None => return Some(None),
                Some(Step::Line(line)) => return Some(Some(line)),
                Some(Step::WaitFor(prefix, count)) => {
                    if self.output.count(prefix) < count {
                        self.steps.push_front(Step::WaitFor(prefix, count));
                        return None;
                    }
                }
                Some(Step::Respond(respond)) => {
                    let lines = respond(self.output.lines().as_slice());
                    for line in lines.into_iter().rev() {
                        self.steps.push_front(Step::Line(line));
                    }
                }
            }
        }
    }
}

impl LineSource for ScriptedSource {
    fn try_line(&mut self) -> LineStatus {
        match self.next_line() {
            Some(Some(line)) => LineStatus::Ready(line),
            Some(None) => LineStatus::Closed,
            None => LineStatus::Pending,
        }
    }

    fn wait_line(&mut self) -> Option<String> {
        match self.next_line() {
            Some(line) => line,
            None => panic!("script blocked while the engine waits for input"),
        }
    }
}

fn line(text: &str) -> Step {
    Step::Line(text.to_string())
}

fn config() -> EngineConfig {
    EngineConfig {
        min_depth: 1,
        max_depth: 2,
        poll_interval: 1,
        max_quiescence_depth: 2,
        ..EngineConfig::default()
    }
}

fn engine(
    config: EngineConfig,
    steps: Vec<Step>,
) -> (Engine<ScriptedSource, SharedOutput>, SharedOutput) {
    let output = SharedOutput::default();
    let source = ScriptedSource {
        steps: steps.into(),
        output: output.clone(),
    };
    let engine = Engine::new(config, source, output.clone()).unwrap();
    (engine, output)
}

/// Moves following `prefix` on lines that start with it
fn tokens_after(lines: &[String], prefix: &str) -> Vec<String> {
    lines
        .iter()
        .filter_map(|l| l.strip_prefix(prefix))
        .map(|rest| rest.trim().to_string())
        .collect()
}

fn position_after(moves: &[&str]) -> Position {
    let mut pos = Position::startpos();
    for token in moves {
        let mv = resolve_move(&pos, token).unwrap();
        apply_move(&mut pos, mv);
    }
    pos
}

/// Our first move and an opponent reply other than the predicted one
fn unpredicted_reply(lines: &[String]) -> (String, String) {
    let ours = tokens_after(lines, "bestmove ")[0].clone();
    let reply = tokens_after(lines, "info string predicted opponent move ")[0].clone();
    let after = position_after(&[ours.as_str()]);
    let other = legal_moves(&after)
        .into_iter()
        .map(|mv| mv.to_string())
        .find(|mv| *mv != reply)
        .unwrap();
    (ours, other)
}

#[test]
fn test_uci_handshake() {
    //! `uci` and `isready` answer immediately while idle

    let (mut engine, output) = engine(config(), vec![line("uci"), line("isready"), line("quit")]);
    engine.run().unwrap();

    assert_eq!(
        output.lines(),
        vec![
            "id name checkmate.exe",
            "id author amel-fou mapatenk mwijnsma",
            "uciok",
            "readyok"
        ]
    );
    assert_eq!(engine.state(), EngineState::WaitingForGo);
}

#[test]
fn test_go_plays_legal_move_and_predicts_reply() {
    //! A search on own time reports every depth, plays a legal move and
    //! starts pondering on the predicted reply

    let (mut engine, output) = engine(
        config(),
        vec![
            line("position startpos"),
            line("go wtime 60000 btime 60000"),
            Step::WaitFor("bestmove", 1),
            line("quit"),
        ],
    );
    engine.run().unwrap();

    let lines = output.lines();
    assert_eq!(output.count("info depth 1 "), 1);
    assert_eq!(output.count("info depth 2 "), 1);

    let played = tokens_after(&lines, "bestmove ");
    assert_eq!(played.len(), 1);
    let start = Position::startpos();
    let mv = resolve_move(&start, &played[0]).unwrap();
    assert!(legal_moves(&start).contains(&mv));

    let predicted = tokens_after(&lines, "info string predicted opponent move ");
    assert_eq!(predicted.len(), 1);
    let after = position_after(&[played[0].as_str()]);
    assert!(resolve_move(&after, &predicted[0]).is_ok());

    // the real position holds our move, the reply is only searched
    assert!(engine.position().same_state(&after));
    assert_eq!(engine.state(), EngineState::ThinkingOnOpponentTime);
    assert_eq!(engine.stats().commits, 1);
}

#[test]
fn test_ponder_hit_keeps_search_running() {
    //! When the opponent plays the predicted move, the ponder search becomes
    //! the own-time search and is played once `go` arrives

    let (mut engine, output) = engine(
        config(),
        vec![
            line("position startpos"),
            line("go"),
            Step::WaitFor("bestmove", 1),
            Step::Respond(Box::new(|lines: &[String]| {
                let ours = tokens_after(lines, "bestmove ")[0].clone();
                let reply = tokens_after(lines, "info string predicted opponent move ")[0].clone();
                vec![
                    format!("position startpos moves {ours} {reply}"),
                    "go".to_string(),
                ]
            })),
            Step::WaitFor("bestmove", 2),
            line("quit"),
        ],
    );
    engine.run().unwrap();

    let stats = engine.stats();
    assert_eq!(stats.ponder_hits, 1);
    assert_eq!(stats.mispredictions, 0);
    assert_eq!(stats.commits, 2);

    // only one search ran for our second move: the ponder search
    assert_eq!(stats.searches, 3);

    let lines = output.lines();
    let played = tokens_after(&lines, "bestmove ");
    let predicted = tokens_after(&lines, "info string predicted opponent move ");
    let pos = position_after(&[played[0].as_str(), predicted[0].as_str()]);
    assert!(resolve_move(&pos, &played[1]).is_ok());
}

#[test]
fn test_misprediction_restarts_on_real_position() {
    //! An unexpected reply discards the ponder search and searches the
    //! corrected position

    let (mut engine, output) = engine(
        config(),
        vec![
            line("position startpos"),
            line("go"),
            Step::WaitFor("bestmove", 1),
            Step::Respond(Box::new(|lines: &[String]| {
                let (ours, other) = unpredicted_reply(lines);
                vec![
                    format!("position startpos moves {ours} {other}"),
                    "go".to_string(),
                ]
            })),
            Step::WaitFor("bestmove", 2),
            line("quit"),
        ],
    );
    engine.run().unwrap();

    let stats = engine.stats();
    assert_eq!(stats.mispredictions, 1);
    assert_eq!(stats.ponder_hits, 0);
    assert_eq!(stats.commits, 2);
    assert_eq!(output.count("bestmove "), 2);

    // the second move answers the reply the GUI actually sent
    let lines = output.lines();
    let (ours, other) = unpredicted_reply(&lines);
    let played = tokens_after(&lines, "bestmove ");
    let corrected = position_after(&[ours.as_str(), other.as_str()]);
    assert!(resolve_move(&corrected, &played[1]).is_ok());
    assert!(engine
        .position()
        .same_state(&position_after(&[ours.as_str(), other.as_str(), played[1].as_str()])));
}

#[test]
fn test_early_result_waits_for_go() {
    //! A restarted search that finishes before `go` holds its move back

    let (mut engine, output) = engine(
        config(),
        vec![
            line("position startpos"),
            line("go"),
            Step::WaitFor("bestmove", 1),
            Step::Respond(Box::new(|lines: &[String]| {
                let (ours, other) = unpredicted_reply(lines);
                vec![format!("position startpos moves {ours} {other}")]
            })),
            // two depths of the first search, two of the restarted one
            Step::WaitFor("info depth", 4),
            Step::Respond(Box::new(|lines: &[String]| {
                assert_eq!(tokens_after(lines, "bestmove ").len(), 1);
                vec!["go".to_string()]
            })),
            Step::WaitFor("bestmove", 2),
            line("quit"),
        ],
    );
    engine.run().unwrap();

    assert_eq!(engine.stats().mispredictions, 1);
    assert_eq!(output.count("bestmove "), 2);
}

#[test]
fn test_stop_plays_minimum_depth_result() {
    //! `stop` never interrupts the minimum depth

    let mut config = config();
    config.max_depth = 3;
    let (mut engine, output) = engine(
        config,
        vec![
            line("position startpos"),
            line("go"),
            line("stop"),
            Step::WaitFor("bestmove", 1),
            line("quit"),
        ],
    );
    engine.run().unwrap();

    assert_eq!(output.count("info depth 1 "), 1);
    assert_eq!(output.count("info depth 2 "), 0);
    assert_eq!(output.count("bestmove "), 1);
}

#[test]
fn test_stop_after_misprediction_applies_to_restart() {
    //! A `stop` that arrives together with the corrected position and its
    //! `go` still cuts the restarted search at the minimum depth

    let mut config = config();
    config.max_depth = 3;
    let (mut engine, output) = engine(
        config,
        vec![
            line("position startpos"),
            line("go"),
            Step::WaitFor("bestmove", 1),
            Step::Respond(Box::new(|lines: &[String]| {
                let (ours, other) = unpredicted_reply(lines);
                vec![
                    format!("position startpos moves {ours} {other}"),
                    "go".to_string(),
                    "stop".to_string(),
                ]
            })),
            Step::WaitFor("bestmove", 2),
            line("quit"),
        ],
    );
    engine.run().unwrap();

    assert_eq!(engine.stats().mispredictions, 1);
    assert_eq!(output.count("bestmove "), 2);
    // three depths for the first move, one for the stopped restart
    assert_eq!(output.count("info depth"), 4);
    assert_eq!(output.count("info depth 1 "), 2);
}

#[test]
fn test_finished_game_answers_null_move() {
    //! `go` on a checkmated position answers without searching

    let (mut engine, output) = engine(
        config(),
        vec![
            line("position startpos moves f2f3 e7e5 g2g4 d8h4"),
            line("go"),
            line("quit"),
        ],
    );
    engine.run().unwrap();

    assert!(engine.position().game_over);
    assert_eq!(output.count("bestmove 0000"), 1);
    assert_eq!(engine.stats().searches, 0);
}

#[test]
fn test_mating_move_ends_game_without_pondering() {
    //! After a mating move there is nothing to ponder on

    let (mut engine, output) = engine(
        config(),
        vec![
            line("position fen 6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1"),
            line("go"),
            Step::WaitFor("bestmove", 1),
            line("isready"),
            Step::WaitFor("readyok", 1),
            line("quit"),
        ],
    );
    engine.run().unwrap();

    assert_eq!(tokens_after(&output.lines(), "bestmove "), vec!["a1a8"]);
    assert_eq!(output.count("info string predicted"), 0);
    assert!(engine.position().game_over);
    assert_eq!(engine.state(), EngineState::WaitingForGo);
}

#[test]
fn test_illegal_moves_in_position_are_skipped() {
    //! Bad move tokens are dropped, the rest of the list still applies

    let (mut engine, _output) = engine(
        config(),
        vec![
            line("position startpos moves e2e4 e2e4 e7e5 g1f3 x"),
            line("quit"),
        ],
    );
    engine.run().unwrap();

    assert!(engine
        .position()
        .same_state(&position_after(&["e2e4", "e7e5", "g1f3"])));
}

#[test]
fn test_go_while_pondering_is_fatal() {
    //! A `go` without the opponent's move leaves the protocol

    let (mut engine, _output) = engine(
        config(),
        vec![
            line("position startpos"),
            line("go"),
            Step::WaitFor("bestmove", 1),
            line("go"),
        ],
    );

    assert!(matches!(
        engine.run(),
        Err(EngineError::UnexpectedTransition { .. })
    ));
}

#[test]
fn test_queue_overflow_is_fatal() {
    //! More pending lines than the queue holds ends the engine

    let mut config = config();
    config.queue_capacity = 2;
    let (mut engine, _output) = engine(
        config,
        vec![line("isready"), line("isready"), line("isready"), line("quit")],
    );

    assert!(matches!(
        engine.run(),
        Err(EngineError::QueueOverflow { capacity: 2 })
    ));
}

#[test]
fn test_end_of_input_while_pondering_quits() {
    //! Closed input ends the session quietly

    let (mut engine, output) = engine(
        config(),
        vec![
            line("position startpos"),
            line("go"),
            Step::WaitFor("bestmove", 1),
        ],
    );
    engine.run().unwrap();

    assert_eq!(output.count("bestmove "), 1);
}

#[test]
fn test_end_of_input_after_go_still_plays() {
    //! Input closing during an own-time search lets it finish and commit

    let (mut engine, output) = engine(config(), vec![line("position startpos"), line("go")]);
    engine.run().unwrap();

    assert_eq!(output.count("info depth 2 "), 1);
    assert_eq!(output.count("bestmove "), 1);
    assert_eq!(engine.stats().commits, 1);
}
