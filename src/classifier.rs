use std::fmt;

use crate::error::TrainerError;
use crate::model::{ConnectionState, Terminal};

// --- Outcome Definitions ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Reverse,
    Fault,
}

impl Status {
    pub fn severity(self) -> Severity {
        match self {
            Status::Ok => Severity::Success,
            Status::Reverse => Severity::Warning,
            Status::Fault => Severity::Error,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Ok => "OK",
            Status::Reverse => "REVERSE",
            Status::Fault => "FAULT",
        })
    }
}

/// How loudly the front end should present a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Correct,
    Reversed,
    OpenCircuit,
    /// Both sources present but not a valid pair, e.g. both on S1.
    Miswired,
}

impl Classification {
    pub fn status(self) -> Status {
        match self {
            Classification::Correct => Status::Ok,
            Classification::Reversed => Status::Reverse,
            Classification::OpenCircuit | Classification::Miswired => Status::Fault,
        }
    }

    pub fn severity(self) -> Severity {
        self.status().severity()
    }

    pub fn message(self) -> &'static str {
        match self {
            Classification::Correct => "Correct polarity — S1 → M1 and S2 → L1.",
            Classification::Reversed => "Reverse polarity — S2 → M1 and S1 → L1.",
            Classification::OpenCircuit => {
                "Open / Incomplete circuit — CT terminals not fully connected."
            }
            Classification::Miswired => "Fault wiring — CT terminals connected incorrectly.",
        }
    }

    pub fn hint(self) -> Option<&'static str> {
        match self {
            Classification::Reversed => Some("Meter will measure reverse direction."),
            Classification::OpenCircuit => Some("Both M1 and L1 must be connected to S1/S2."),
            Classification::Correct | Classification::Miswired => None,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status(), self.message())
    }
}

// --- CORE LOGIC: Polarity Check ---

/// Classifies the sources wired to M1 and L1.
///
/// Both arguments must be S1, S2 or [`Terminal::NotConnected`]; a meter
/// terminal is rejected.
pub fn classify(m1: Terminal, l1: Terminal) -> Result<Classification, TrainerError> {
    for source in [m1, l1] {
        if !source.is_source() {
            return Err(TrainerError::NotCtSource(source));
        }
    }
    Ok(classify_sources(m1, l1))
}

// Rule order matters: the open-circuit check must not shadow the two valid
// pairs, and must run before the generic miswire catch-all.
fn classify_sources(m1: Terminal, l1: Terminal) -> Classification {
    match (m1, l1) {
        (Terminal::S1, Terminal::S2) => Classification::Correct,
        (Terminal::S2, Terminal::S1) => Classification::Reversed,
        (Terminal::NotConnected, _) | (_, Terminal::NotConnected) => Classification::OpenCircuit,
        _ => Classification::Miswired,
    }
}

impl ConnectionState {
    pub fn classify(&self) -> Classification {
        let result = classify_sources(self.m1(), self.l1());
        log::debug!("classified M1={} L1={} as {}", self.m1(), self.l1(), result.status());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Terminal::{NotConnected, L1, M1, S1, S2};

    #[test]
    fn valid_pairs() {
        assert_eq!(classify(S1, S2).unwrap(), Classification::Correct);
        assert_eq!(classify(S1, S2).unwrap().status(), Status::Ok);
        assert_eq!(classify(S2, S1).unwrap(), Classification::Reversed);
        assert_eq!(classify(S2, S1).unwrap().status(), Status::Reverse);
    }

    #[test]
    fn open_circuit_dominates() {
        for x in [S1, S2, NotConnected] {
            assert_eq!(classify(NotConnected, x).unwrap(), Classification::OpenCircuit);
            assert_eq!(classify(x, NotConnected).unwrap(), Classification::OpenCircuit);
            assert_eq!(classify(x, NotConnected).unwrap().status(), Status::Fault);
        }
    }

    #[test]
    fn duplicate_source_is_a_fault() {
        for x in [S1, S2] {
            let result = classify(x, x).unwrap();
            assert_eq!(result, Classification::Miswired);
            assert_eq!(result.status(), Status::Fault);
        }
    }

    #[test]
    fn meter_terminal_as_source_is_rejected() {
        assert!(matches!(classify(M1, S2), Err(TrainerError::NotCtSource(M1))));
        assert!(matches!(classify(S1, L1), Err(TrainerError::NotCtSource(L1))));
    }

    #[test]
    fn messages_and_severities() {
        assert_eq!(
            Classification::Correct.message(),
            "Correct polarity — S1 → M1 and S2 → L1."
        );
        assert_eq!(
            Classification::Reversed.message(),
            "Reverse polarity — S2 → M1 and S1 → L1."
        );
        assert_eq!(
            Classification::OpenCircuit.message(),
            "Open / Incomplete circuit — CT terminals not fully connected."
        );
        assert_eq!(
            Classification::Miswired.message(),
            "Fault wiring — CT terminals connected incorrectly."
        );
        assert_eq!(Classification::Correct.severity(), Severity::Success);
        assert_eq!(Classification::Reversed.severity(), Severity::Warning);
        assert_eq!(Classification::Miswired.severity(), Severity::Error);
        assert_eq!(Classification::Correct.hint(), None);
    }

    #[test]
    fn display_prefixes_status() {
        assert_eq!(
            Classification::Miswired.to_string(),
            "FAULT: Fault wiring — CT terminals connected incorrectly."
        );
    }

    #[test]
    fn empty_state_is_open() {
        assert_eq!(ConnectionState::default().classify(), Classification::OpenCircuit);
    }
}
