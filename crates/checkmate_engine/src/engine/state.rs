//! Engine states
//!
//! ```text
//!   WaitingForGo --go--> ThinkingOnOwnTime --commit--> ThinkingOnOpponentTime
//!        ^                  ^        |                     |        |
//!        |                  |        +--commit, no reply---+        |
//!        +------------------|-----------------------------+         |
//!                           +--position (hit or mispredict)---------+
//! ```
//!
//! The engine is pondering exactly when it is in `ThinkingOnOpponentTime`.

use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EngineState {
    /// Idle until the GUI asks for a move
    #[default]
    WaitingForGo,
    /// Searching the real position for our own move
    ThinkingOnOwnTime,
    /// Searching the position after the predicted reply
    ThinkingOnOpponentTime,
}

impl EngineState {
    pub fn is_pondering(self) -> bool {
        self == EngineState::ThinkingOnOpponentTime
    }

    pub fn is_thinking(self) -> bool {
        self != EngineState::WaitingForGo
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EngineState::WaitingForGo => "waiting for go",
            EngineState::ThinkingOnOwnTime => "thinking on own time",
            EngineState::ThinkingOnOpponentTime => "thinking on opponent time",
        };
        f.write_str(name)
    }
}
