use std::fmt;
use std::str::FromStr;

use crate::error::TrainerError;

// --- Terminal Definitions ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Ct,
    Meter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Terminal {
    S1,
    S2,
    M1,
    L1,
    /// No wire attached.
    #[default]
    NotConnected,
}

impl Terminal {
    pub const CT: [Terminal; 2] = [Terminal::S1, Terminal::S2];
    pub const METER: [Terminal; 2] = [Terminal::M1, Terminal::L1];

    /// Choices offered by the drop-down front end, sentinel first.
    pub const SOURCES: [Terminal; 3] = [Terminal::NotConnected, Terminal::S1, Terminal::S2];

    pub fn side(self) -> Option<Side> {
        match self {
            Terminal::S1 | Terminal::S2 => Some(Side::Ct),
            Terminal::M1 | Terminal::L1 => Some(Side::Meter),
            Terminal::NotConnected => None,
        }
    }

    pub fn is_ct(self) -> bool {
        self.side() == Some(Side::Ct)
    }

    /// True for values a meter terminal may be wired to.
    pub fn is_source(self) -> bool {
        self.side() != Some(Side::Meter)
    }

    pub fn label(self) -> &'static str {
        match self {
            Terminal::S1 => "S1",
            Terminal::S2 => "S2",
            Terminal::M1 => "M1",
            Terminal::L1 => "L1",
            Terminal::NotConnected => "Not Connected",
        }
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Terminal {
    type Err = TrainerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s1" => Ok(Terminal::S1),
            "s2" => Ok(Terminal::S2),
            "m1" => Ok(Terminal::M1),
            "l1" => Ok(Terminal::L1),
            "not connected" | "notconnected" | "nc" | "none" | "-" => Ok(Terminal::NotConnected),
            _ => Err(TrainerError::UnknownTerminal(s.to_string())),
        }
    }
}

// --- Gesture Definitions ---

/// A click on one terminal target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalEvent {
    terminal: Terminal,
}

impl TerminalEvent {
    pub fn new(terminal: Terminal) -> Result<Self, TrainerError> {
        if terminal.side().is_none() {
            return Err(TrainerError::NotClickable(terminal));
        }
        Ok(TerminalEvent { terminal })
    }

    pub fn terminal(&self) -> Terminal {
        self.terminal
    }
}

// --- Connection Definitions ---

/// Which CT terminal each meter terminal is wired to.
///
/// Keys are fixed to M1 and L1; values only ever hold S1, S2 or
/// [`Terminal::NotConnected`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectionState {
    m1: Terminal,
    l1: Terminal,
}

impl ConnectionState {
    pub fn m1(&self) -> Terminal {
        self.m1
    }

    pub fn l1(&self) -> Terminal {
        self.l1
    }

    /// Source wired to `meter`, or `None` if `meter` is not M1/L1.
    pub fn source_of(&self, meter: Terminal) -> Option<Terminal> {
        match meter {
            Terminal::M1 => Some(self.m1),
            Terminal::L1 => Some(self.l1),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.m1 == Terminal::NotConnected && self.l1 == Terminal::NotConnected
    }

    /// Wires currently attached, as `(ct, meter)` pairs.
    pub fn wires(&self) -> impl Iterator<Item = (Terminal, Terminal)> + '_ {
        Terminal::METER
            .into_iter()
            .filter_map(move |meter| match self.source_of(meter) {
                Some(ct) if ct.is_ct() => Some((ct, meter)),
                _ => None,
            })
    }

    pub(crate) fn set(&mut self, meter: Terminal, source: Terminal) -> Result<(), TrainerError> {
        if !source.is_source() {
            return Err(TrainerError::NotCtSource(source));
        }
        match meter {
            Terminal::M1 => self.m1 = source,
            Terminal::L1 => self.l1 = source,
            other => return Err(TrainerError::NotMeterTerminal(other)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sides_partition_the_terminals() {
        assert_eq!(Terminal::S1.side(), Some(Side::Ct));
        assert_eq!(Terminal::S2.side(), Some(Side::Ct));
        assert_eq!(Terminal::M1.side(), Some(Side::Meter));
        assert_eq!(Terminal::L1.side(), Some(Side::Meter));
        assert_eq!(Terminal::NotConnected.side(), None);
        assert!(Terminal::SOURCES.iter().all(|t| t.is_source()));
        assert!(Terminal::METER.iter().all(|t| !t.is_source()));
    }

    #[test]
    fn parses_labels_and_aliases() {
        assert_eq!("S1".parse::<Terminal>().unwrap(), Terminal::S1);
        assert_eq!(" l1 ".parse::<Terminal>().unwrap(), Terminal::L1);
        assert_eq!("Not Connected".parse::<Terminal>().unwrap(), Terminal::NotConnected);
        assert_eq!("nc".parse::<Terminal>().unwrap(), Terminal::NotConnected);
        assert!(matches!(
            "S3".parse::<Terminal>(),
            Err(TrainerError::UnknownTerminal(text)) if text == "S3"
        ));
    }

    #[test]
    fn display_matches_labels() {
        for t in [Terminal::S1, Terminal::S2, Terminal::M1, Terminal::L1, Terminal::NotConnected] {
            assert_eq!(t.to_string().parse::<Terminal>().unwrap(), t);
        }
        assert_eq!(Terminal::NotConnected.to_string(), "Not Connected");
    }

    #[test]
    fn sentinel_is_not_clickable() {
        assert!(matches!(
            TerminalEvent::new(Terminal::NotConnected),
            Err(TrainerError::NotClickable(Terminal::NotConnected))
        ));
        assert_eq!(TerminalEvent::new(Terminal::M1).unwrap().terminal(), Terminal::M1);
    }

    #[test]
    fn set_rejects_out_of_domain_keys_and_values() {
        let mut state = ConnectionState::default();
        assert!(matches!(
            state.set(Terminal::S1, Terminal::S2),
            Err(TrainerError::NotMeterTerminal(Terminal::S1))
        ));
        assert!(matches!(
            state.set(Terminal::M1, Terminal::L1),
            Err(TrainerError::NotCtSource(Terminal::L1))
        ));
        assert!(state.is_empty());
    }

    #[test]
    fn wires_skip_unconnected_terminals() {
        let mut state = ConnectionState::default();
        state.set(Terminal::L1, Terminal::S2).unwrap();
        assert_eq!(state.wires().collect::<Vec<_>>(), vec![(Terminal::S2, Terminal::L1)]);
        assert_eq!(state.source_of(Terminal::M1), Some(Terminal::NotConnected));
        assert_eq!(state.source_of(Terminal::S1), None);
    }
}
