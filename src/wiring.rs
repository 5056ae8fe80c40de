//! Per-session wiring state and the gestures that mutate it.
//!
//! [`WiringState`] is a small `Copy` value owned by the front end. Every
//! operation takes the current state and returns the next one, so a session
//! is nothing more than the last state the host kept.

use std::fmt;

use crate::classifier::Classification;
use crate::error::TrainerError;
use crate::model::{ConnectionState, Side, Terminal, TerminalEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WiringState {
    connections: ConnectionState,
    /// First endpoint of an in-progress two-click wire.
    pending: Option<Terminal>,
}

/// Non-fatal notice raised when a second click cannot form a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    SameSide,
    SelfConnection,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Advisory::SameSide => "Connect a CT terminal to a Meter terminal (S1/S2 ↔ M1/L1).",
            Advisory::SelfConnection => "Cannot connect a terminal to itself.",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// First endpoint chosen; waiting for the second click.
    Selected(Terminal),
    Connected { ct: Terminal, meter: Terminal },
    Rejected(Advisory),
}

impl ClickOutcome {
    pub fn is_advisory(&self) -> bool {
        matches!(self, ClickOutcome::Rejected(_))
    }
}

impl fmt::Display for ClickOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClickOutcome::Selected(t) => write!(
                f,
                "Selected: {t}. Now click another terminal to complete the wire."
            ),
            ClickOutcome::Connected { ct, meter } => write!(f, "Connected {ct} ↔ {meter}"),
            ClickOutcome::Rejected(advisory) => write!(f, "{advisory}"),
        }
    }
}

pub const RESET_NOTICE: &str =
    "Connections reset. Click a terminal, then another terminal to draw a wire.";

impl WiringState {
    pub fn connections(&self) -> &ConnectionState {
        &self.connections
    }

    pub fn pending(&self) -> Option<Terminal> {
        self.pending
    }

    pub fn classify(&self) -> Classification {
        self.connections.classify()
    }

    /// Wires `source` to `meter` directly, replacing whatever was there.
    pub fn select_direct(mut self, meter: Terminal, source: Terminal) -> Result<Self, TrainerError> {
        self.connections.set(meter, source)?;
        log::debug!("{meter} set to {source}");
        Ok(self)
    }

    /// Advances the two-click gesture by one click.
    pub fn handle_click(mut self, event: TerminalEvent) -> (Self, ClickOutcome) {
        let to = event.terminal();
        let Some(from) = self.pending.take() else {
            self.pending = Some(to);
            log::trace!("pending endpoint {to}");
            return (self, ClickOutcome::Selected(to));
        };

        let outcome = match (from.side(), to.side()) {
            _ if from == to => ClickOutcome::Rejected(Advisory::SelfConnection),
            (Some(Side::Ct), Some(Side::Meter)) => ClickOutcome::Connected { ct: from, meter: to },
            (Some(Side::Meter), Some(Side::Ct)) => ClickOutcome::Connected { ct: to, meter: from },
            _ => ClickOutcome::Rejected(Advisory::SameSide),
        };

        if let ClickOutcome::Connected { ct, meter } = outcome {
            // Both endpoints come from a TerminalEvent, so the pair is in domain.
            if let Err(err) = self.connections.set(meter, ct) {
                log::warn!("dropping wire {ct} ↔ {meter}: {err}");
            }
        }
        log::debug!("click {from} -> {to}: {outcome}");
        (self, outcome)
    }

    pub fn reset(self) -> Self {
        log::debug!("wiring reset");
        WiringState::default()
    }
}
