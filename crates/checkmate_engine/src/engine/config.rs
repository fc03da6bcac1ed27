//! Engine configuration
//!
//! [`EngineConfig`] holds identification strings and the search parameters.
//! It can be loaded from a JSON file in which every field is optional:
//!
//! ```json
//! { "min_depth": 3, "max_depth": 7, "poll_interval": 256 }
//! ```
//!
//! Missing fields take the defaults below. A configuration is validated
//! before the engine accepts it.
//!
//! # Time Threshold
//!
//! The only time management is a threshold: when the side to move reports a
//! remaining clock below `low_time_ms`, searches on own time stop after
//! `min_depth` instead of `max_depth`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::protocol::GoParams;
use crate::constants::{
    DEFAULT_LOW_TIME_MS, DEFAULT_MAX_DEPTH, DEFAULT_MAX_QUIESCENCE_DEPTH, DEFAULT_MIN_DEPTH,
    DEFAULT_POLL_INTERVAL, DEFAULT_QUEUE_CAPACITY, ENGINE_AUTHOR, ENGINE_NAME, MAX_PLY,
};
use crate::error::{EngineError, EngineResult};
use crate::search::SearchLimits;
use crate::types::Color;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Reported in `id name`
    pub name: String,
    /// Reported in `id author`
    pub author: String,
    pub min_depth: u32,
    pub max_depth: u32,
    /// Pending protocol lines before intake overflows
    pub queue_capacity: usize,
    /// Nodes between poll points
    pub poll_interval: u64,
    pub max_quiescence_depth: u32,
    /// Clock (ms) under which own-time searches stop at `min_depth`
    pub low_time_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            name: ENGINE_NAME.to_string(),
            author: ENGINE_AUTHOR.to_string(),
            min_depth: DEFAULT_MIN_DEPTH,
            max_depth: DEFAULT_MAX_DEPTH,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_quiescence_depth: DEFAULT_MAX_QUIESCENCE_DEPTH,
            low_time_ms: DEFAULT_LOW_TIME_MS,
        }
    }
}

impl EngineConfig {
    /// Load and validate a JSON configuration file
    ///
    /// # Errors
    ///
    /// I/O and JSON errors are passed through; invalid values yield
    /// [`EngineError::Config`].
    pub fn load(path: &Path) -> EngineResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        info!("[CONFIG] Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Check the invariants the search relies on
    pub fn validate(&self) -> EngineResult<()> {
        let fail = |message: String| Err(EngineError::Config { message });

        if self.min_depth == 0 {
            return fail("min_depth must be at least 1".to_string());
        }
        if self.min_depth > self.max_depth {
            return fail(format!(
                "min_depth ({}) exceeds max_depth ({})",
                self.min_depth, self.max_depth
            ));
        }
        if self.max_depth > MAX_PLY {
            return fail(format!("max_depth ({}) exceeds {}", self.max_depth, MAX_PLY));
        }
        if self.queue_capacity == 0 {
            return fail("queue_capacity must be at least 1".to_string());
        }
        if self.poll_interval == 0 {
            return fail("poll_interval must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            min_depth: self.min_depth,
            poll_interval: self.poll_interval,
            max_quiescence_depth: self.max_quiescence_depth,
        }
    }

    /// Deepest iteration worth completing on own time
    pub fn own_time_depth(&self, go: &GoParams, side: Color) -> u32 {
        match go.remaining(side) {
            Some(ms) if ms < self.low_time_ms => self.min_depth,
            _ => self.max_depth,
        }
    }
}
