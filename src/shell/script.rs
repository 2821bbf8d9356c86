use std::collections::VecDeque;
use std::convert::Infallible;

use thiserror::Error;

use crate::board::Square;
use crate::{EventSource, ShellEvent};

/// Error when parsing an event script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid script token: '{0}'")]
pub struct ParseError(String);

/// A scriptable event source for tests and demos.
///
/// Holds a queue of events parsed from a script. New script can be
/// appended at any time.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents {
    pending: VecDeque<ShellEvent>,
}

impl ScriptedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and queue additional script.
    ///
    /// Format:
    /// - Tokens are separated by whitespace
    /// - A square in algebraic notation (e.g. `e2`) is a click
    /// - `reset` starts a new game
    ///
    /// Example: `"e2 e4 e7 e5 reset"`
    ///
    /// A script with any invalid token is rejected as a whole.
    pub fn push_script(&mut self, script: &str) -> Result<(), ParseError> {
        let events = parse_script(script)?;
        self.pending.extend(events);
        Ok(())
    }

    /// Queue a single event.
    pub fn push(&mut self, event: ShellEvent) {
        self.pending.push_back(event);
    }

    /// Number of events not yet delivered.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl EventSource for ScriptedEvents {
    type Error = Infallible;

    fn next_event(&mut self) -> Result<Option<ShellEvent>, Self::Error> {
        Ok(self.pending.pop_front())
    }
}

/// Parse a script string into events.
fn parse_script(script: &str) -> Result<Vec<ShellEvent>, ParseError> {
    script.split_whitespace().map(parse_token).collect()
}

fn parse_token(token: &str) -> Result<ShellEvent, ParseError> {
    if token.eq_ignore_ascii_case("reset") {
        return Ok(ShellEvent::Reset);
    }
    token
        .parse::<Square>()
        .map(ShellEvent::Click)
        .map_err(|_| ParseError(token.to_string()))
}
