use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::TrainerError;

/// Front end used to build the wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainerVariant {
    /// Two drop-downs, one per meter terminal.
    Select,
    /// Click a terminal, then another, to draw a wire.
    #[default]
    Click,
}

impl TrainerVariant {
    pub const ALL: [TrainerVariant; 2] = [TrainerVariant::Select, TrainerVariant::Click];
}

impl fmt::Display for TrainerVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TrainerVariant::Select => "select",
            TrainerVariant::Click => "click",
        })
    }
}

impl FromStr for TrainerVariant {
    type Err = TrainerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "select" => Ok(TrainerVariant::Select),
            "click" => Ok(TrainerVariant::Click),
            _ => Err(TrainerError::UnknownVariant(s.to_string())),
        }
    }
}
