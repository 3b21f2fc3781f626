//! Hora: engagement tracking for carousels, accordions and page chrome.
//!
//! The tracking logic lives in the workspace crates; this crate adds the
//! YAML configuration and the script replayer the `hora` binary drives.

pub mod config;
pub mod replay;
pub mod script;

pub use config::{load_config, HoraConfig, LoadedConfig};
pub use replay::{ReplayOutcome, Replayer, StepFailure};
pub use script::{parse_script, ScriptFormat, Step};

pub use hora_commerce::{Transaction, TransactionItem, TransactionSender};
pub use hora_core_types::{AnalyticsEvent, Hit, HitArg, HoraError, WidgetKind};
pub use hora_engagement::{Tracker, TrackerConfig};
