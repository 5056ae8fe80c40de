//! Errors raised by the trainer core and its configuration layer.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::Terminal;

#[derive(Debug, Error)]
pub enum TrainerError {
    /// Text that names none of the known terminals.
    #[error("unknown terminal '{0}'")]
    UnknownTerminal(String),

    /// A CT-side terminal or the sentinel was used where M1/L1 is required.
    #[error("{0} is not a meter terminal (expected M1 or L1)")]
    NotMeterTerminal(Terminal),

    /// A meter terminal was used where a CT source is required.
    #[error("{0} is not a CT source (expected S1, S2 or Not Connected)")]
    NotCtSource(Terminal),

    /// The sentinel has no click target.
    #[error("{0} cannot be clicked")]
    NotClickable(Terminal),

    #[error("unknown variant '{0}' (expected 'select' or 'click')")]
    UnknownVariant(String),

    #[error("unknown theme '{0}' (expected 'dark' or 'light')")]
    UnknownTheme(String),

    #[error("invalid log level '{0}'")]
    InvalidLogLevel(String),

    #[error("failed to read config file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
