//! Flattens [`AnalyticsEvent`]s into the positional call shape the sink expects.
//!
//! An event hit is `[<tracker>.send, "event", category, action, label?, value?, fields?]`.
//! Absent optional parts are skipped rather than passed as placeholders, so the
//! arity seen by the transport is exactly the number of present arguments.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use hora_core_types::{AnalyticsEvent, Hit, HitArg};
use hora_transport::AnalyticsTransport;

use crate::metrics;

pub const EVENT_HIT_TYPE: &str = "event";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Namespace of the analytics tracker the hits are routed through.
    pub tracker_name: String,
    /// Custom parameter set to 1 on the first event of every interaction channel.
    pub first_interaction_key: String,
    /// How long after `touchend` a slide still counts as a swipe.
    pub swipe_grace_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tracker_name: "mobifyTracker".into(),
            first_interaction_key: "firstInteraction".into(),
            swipe_grace_ms: 50,
        }
    }
}

impl TrackerConfig {
    pub fn send_command(&self) -> String {
        format!("{}.send", self.tracker_name)
    }
}

pub struct EventEmitter {
    config: TrackerConfig,
    send_command: String,
    transport: Arc<dyn AnalyticsTransport>,
}

impl EventEmitter {
    pub fn new(config: TrackerConfig, transport: Arc<dyn AnalyticsTransport>) -> Self {
        let send_command = config.send_command();
        Self {
            config,
            send_command,
            transport,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn transport(&self) -> Arc<dyn AnalyticsTransport> {
        Arc::clone(&self.transport)
    }

    /// Bare `[<tracker>.send, "event", ..]` hit with caller-supplied trailing arguments.
    pub fn event_hit<I>(&self, args: I) -> Hit
    where
        I: IntoIterator<Item = HitArg>,
    {
        let mut hit = Hit::new(self.send_command.as_str()).arg(EVENT_HIT_TYPE);
        for arg in args {
            hit.push(arg);
        }
        hit
    }

    pub fn compose(&self, event: &AnalyticsEvent) -> Hit {
        let mut hit = self.event_hit([
            HitArg::from(event.category.as_str()),
            HitArg::from(event.action.as_str()),
        ]);
        if let Some(label) = &event.label {
            hit.push(label.as_str());
        }
        if let Some(value) = event.value {
            hit.push(value);
        }
        if let Some(fields) = event.fields() {
            hit.push(fields);
        }
        hit
    }

    pub fn emit(&self, event: &AnalyticsEvent) {
        self.dispatch(self.compose(event));
    }

    /// Variadic escape hatch mirroring the raw `send(...)` call: no arguments
    /// produce the two-argument bare event marker.
    pub fn send_raw<I>(&self, args: I)
    where
        I: IntoIterator<Item = HitArg>,
    {
        self.dispatch(self.event_hit(args));
    }

    /// Tags `event` as the first interaction of its channel.
    pub fn flag_first(&self, event: AnalyticsEvent, first: bool) -> AnalyticsEvent {
        if first {
            event.param(self.config.first_interaction_key.as_str(), 1)
        } else {
            event
        }
    }

    pub fn dispatch(&self, hit: Hit) {
        trace!(command = hit.command(), arity = hit.arity(), "dispatching hit");
        metrics::record_hit(hit.command());
        self.transport.dispatch(hit);
    }
}
