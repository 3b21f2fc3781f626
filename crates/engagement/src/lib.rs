//! Engagement tracking for repeating widgets.
//!
//! Raw UI calls (slide, swipe, open, ...) update per-widget history held in a
//! [`hora_registry::WidgetRegistry`] and are turned into analytics events.
//! Milestones (first interaction, complete view, multiple open) are derived
//! from that history and fire at most once where the history says so.

pub mod accordion;
pub mod carousel;
pub mod emitter;
pub mod metrics;
pub mod proxy;
pub mod site;
pub mod tracker;

pub use accordion::AccordionTracker;
pub use carousel::{ArrowDirection, CarouselChannel, CarouselTracker};
pub use emitter::{EventEmitter, TrackerConfig, EVENT_HIT_TYPE};
pub use site::{ErrorKind, ScrollKind, SiteEvents, Viewport};
pub use tracker::{GestureState, Tracker};
