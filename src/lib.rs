//! Core of the CT → single-phase meter wiring trainer.
//!
//! The front ends only ever touch four entry points:
//! [`WiringState::select_direct`], [`WiringState::handle_click`],
//! [`WiringState::reset`] and [`classify`] (or [`WiringState::classify`]).

pub mod classifier;
pub mod config;
pub mod error;
pub mod model;
pub mod variant;
pub mod wiring;

pub use classifier::{classify, Classification, Severity, Status};
pub use config::{ThemeChoice, TrainerConfig};
pub use error::TrainerError;
pub use model::{ConnectionState, Side, Terminal, TerminalEvent};
pub use variant::TrainerVariant;
pub use wiring::{Advisory, ClickOutcome, WiringState};
