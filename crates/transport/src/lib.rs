use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

use hora_core_types::Hit;

/// The external analytics sink. Calls are fire-and-forget: the tracker never
/// observes delivery success or failure.
pub trait AnalyticsTransport: Send + Sync {
    fn dispatch(&self, hit: Hit);
}

impl<T> AnalyticsTransport for Arc<T>
where
    T: AnalyticsTransport + ?Sized,
{
    fn dispatch(&self, hit: Hit) {
        (**self).dispatch(hit)
    }
}

impl<T> AnalyticsTransport for Box<T>
where
    T: AnalyticsTransport + ?Sized,
{
    fn dispatch(&self, hit: Hit) {
        (**self).dispatch(hit)
    }
}

/// Keeps every hit in call order; used by tests and the replay CLI.
#[derive(Default)]
pub struct RecordingTransport {
    hits: Mutex<Vec<Hit>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().clone()
    }

    /// Drains the recorded hits.
    pub fn take(&self) -> Vec<Hit> {
        std::mem::take(&mut *self.hits.lock())
    }

    pub fn len(&self) -> usize {
        self.hits.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.lock().is_empty()
    }

    pub fn clear(&self) {
        self.hits.lock().clear();
    }

    /// Hits whose action (position 3) matches.
    pub fn with_action(&self, action: &str) -> Vec<Hit> {
        self.hits
            .lock()
            .iter()
            .filter(|hit| hit.action() == Some(action))
            .cloned()
            .collect()
    }
}

impl AnalyticsTransport for RecordingTransport {
    fn dispatch(&self, hit: Hit) {
        self.hits.lock().push(hit);
    }
}

/// Debug-mode sink: logs the hit instead of forwarding it anywhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingTransport;

impl AnalyticsTransport for TracingTransport {
    fn dispatch(&self, hit: Hit) {
        info!(command = hit.command(), args = ?hit.args(), "hora hit");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(action: &str) -> Hit {
        Hit::new("mobifyTracker.send")
            .arg("event")
            .arg("Cart")
            .arg(action)
    }

    #[test]
    fn recording_keeps_call_order() {
        let transport = RecordingTransport::new();
        transport.dispatch(sample("Add Item"));
        transport.dispatch(sample("Remove Item"));

        let hits = transport.hits();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].action(), Some("Add Item"));
        assert_eq!(hits[1].action(), Some("Remove Item"));
        assert_eq!(transport.with_action("Remove Item").len(), 1);
    }

    #[test]
    fn take_drains() {
        let transport = RecordingTransport::new();
        transport.dispatch(sample("Add Item"));
        assert_eq!(transport.take().len(), 1);
        assert!(transport.is_empty());
    }

    #[test]
    fn arc_and_box_forward() {
        let transport = RecordingTransport::new();
        let boxed: Box<dyn AnalyticsTransport> = Box::new(Arc::clone(&transport));
        boxed.dispatch(sample("Add Item"));
        assert_eq!(transport.len(), 1);
    }
}
