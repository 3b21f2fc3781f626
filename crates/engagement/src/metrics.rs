use hora_core_types::WidgetKind;
use lazy_static::lazy_static;
use prometheus::{core::Collector, opts, IntCounterVec, Registry};
use tracing::error;

lazy_static! {
    static ref HITS_DISPATCHED: IntCounterVec = IntCounterVec::new(
        opts!(
            "hora_hits_dispatched_total",
            "Hits forwarded to the analytics transport grouped by command"
        ),
        &["command"]
    )
    .unwrap();
    static ref MILESTONES: IntCounterVec = IntCounterVec::new(
        opts!(
            "hora_milestones_total",
            "Derived milestone events grouped by widget kind"
        ),
        &["kind", "milestone"]
    )
    .unwrap();
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Milestone {
    FirstInteraction,
    MultipleOpen,
    CompleteView,
}

impl Milestone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Milestone::FirstInteraction => "first_interaction",
            Milestone::MultipleOpen => "multiple_open",
            Milestone::CompleteView => "complete_view",
        }
    }
}

fn register<C>(registry: &Registry, collector: C)
where
    C: Collector + Clone + Send + Sync + 'static,
{
    if let Err(err) = registry.register(Box::new(collector.clone())) {
        if !matches!(err, prometheus::Error::AlreadyReg) {
            error!(?err, "failed to register engagement metric");
        }
    }
}

pub fn register_metrics(registry: &Registry) {
    register(registry, HITS_DISPATCHED.clone());
    register(registry, MILESTONES.clone());
}

pub fn record_hit(command: &str) {
    HITS_DISPATCHED.with_label_values(&[command]).inc();
}

pub fn record_milestone(kind: WidgetKind, milestone: Milestone) {
    MILESTONES
        .with_label_values(&[kind.as_str(), milestone.as_str()])
        .inc();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_twice_without_error() {
        let registry = Registry::new();
        register_metrics(&registry);
        register_metrics(&registry);
        record_hit("mobifyTracker.send");
        assert!(!registry.gather().is_empty());
    }
}
