use std::fmt;

use thiserror::Error;

pub mod event;

pub use event::{AnalyticsEvent, Hit, HitArg};

/// 1-based position of a slide or accordion item inside its widget.
pub type UnitIndex = u32;

/// Shared error type for the tracker crates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HoraError {
    /// An interaction referenced a widget that was never loaded.
    #[error("no {kind} named {title:?} has been loaded")]
    MissingState { kind: WidgetKind, title: String },
    #[error("{kind} {title:?} must declare at least one unit")]
    EmptyWidget { kind: WidgetKind, title: String },
}

impl HoraError {
    pub fn missing(kind: WidgetKind, title: impl Into<String>) -> Self {
        Self::MissingState {
            kind,
            title: title.into(),
        }
    }
}

/// The repeating UI components the tracker keeps history for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Carousel,
    Accordion,
}

impl WidgetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::Carousel => "carousel",
            WidgetKind::Accordion => "accordion",
        }
    }

    /// Analytics category used for every event of a widget, e.g. `Carousel - PDP`.
    pub fn category(&self, title: &str) -> String {
        match self {
            WidgetKind::Carousel => format!("Carousel - {title}"),
            WidgetKind::Accordion => format!("Accordion - {title}"),
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
