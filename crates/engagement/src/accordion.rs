use tracing::{debug, warn};

use hora_core_types::{AnalyticsEvent, HoraError, UnitIndex, WidgetKind};
use hora_registry::{AccordionState, WidgetRegistry};

use crate::emitter::EventEmitter;
use crate::metrics::{self, Milestone};

const KIND: WidgetKind = WidgetKind::Accordion;

#[derive(Debug, Default)]
pub struct AccordionTracker {
    registry: WidgetRegistry<AccordionState>,
}

impl AccordionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &WidgetRegistry<AccordionState> {
        &self.registry
    }

    pub fn clear(&mut self) {
        self.registry.clear();
    }

    pub fn load(
        &mut self,
        emitter: &EventEmitter,
        title: &str,
        total_items: u32,
    ) -> Result<(), HoraError> {
        self.registry.load(title, total_items)?;
        emitter.emit(
            &AnalyticsEvent::new(KIND.category(title), "Load")
                .label(format!("Total {total_items}"))
                .value(u64::from(total_items))
                .non_interaction(),
        );
        Ok(())
    }

    /// Emits `Open`, then `Open Multiple Items` while more items have been
    /// opened than closed, then `View All Items` once every item was opened.
    pub fn open(
        &mut self,
        emitter: &EventEmitter,
        title: &str,
        item: UnitIndex,
    ) -> Result<(), HoraError> {
        let state = self.registry.get_mut(title).map_err(|err| {
            warn!(title, item, "accordion opened before load");
            err
        })?;
        if item == 0 || item > state.total_units {
            warn!(title, item, total = state.total_units, "item outside accordion bounds");
        }

        let outcome = state.open(item);
        let category = KIND.category(title);
        let label = format!("Item #{item}");

        let event = AnalyticsEvent::new(category.as_str(), "Open").label(label.as_str());
        emitter.emit(&emitter.flag_first(event, outcome.first));
        if outcome.first {
            metrics::record_milestone(KIND, Milestone::FirstInteraction);
        }

        if let Some(open_now) = outcome.multiple_open {
            metrics::record_milestone(KIND, Milestone::MultipleOpen);
            emitter.emit(
                &AnalyticsEvent::new(category.as_str(), "Open Multiple Items")
                    .label(label.as_str())
                    .value(open_now),
            );
        }

        if outcome.completed {
            debug!(title, total = state.total_units, "accordion fully viewed");
            metrics::record_milestone(KIND, Milestone::CompleteView);
            emitter.emit(
                &AnalyticsEvent::new(category.as_str(), "View All Items")
                    .label(label.as_str())
                    .value(u64::from(state.total_units)),
            );
        }
        Ok(())
    }

    /// Records the close; it only feeds the open/close differential.
    pub fn close(&mut self, title: &str, item: UnitIndex) -> Result<(), HoraError> {
        let state = self.registry.get_mut(title).map_err(|err| {
            warn!(title, item, "accordion closed before load");
            err
        })?;
        state.close(item);
        Ok(())
    }

    pub fn full_view_fired(&self, title: &str) -> Result<bool, HoraError> {
        Ok(self.registry.get(title)?.complete.fired())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::TrackerConfig;
    use hora_transport::RecordingTransport;
    use std::sync::Arc;

    fn setup() -> (AccordionTracker, EventEmitter, Arc<RecordingTransport>) {
        let transport = RecordingTransport::new();
        let emitter = EventEmitter::new(TrackerConfig::default(), transport.clone());
        (AccordionTracker::new(), emitter, transport)
    }

    #[test]
    fn close_emits_nothing() {
        let (mut accordions, emitter, transport) = setup();
        accordions.load(&emitter, "FAQ", 3).unwrap();
        transport.clear();

        accordions.close("FAQ", 1).unwrap();
        assert!(transport.is_empty());
        assert_eq!(accordions.registry().get("FAQ").unwrap().closes.units(), &[1]);
    }

    #[test]
    fn closing_suppresses_multiple_open() {
        let (mut accordions, emitter, transport) = setup();
        accordions.load(&emitter, "FAQ", 5).unwrap();
        accordions.open(&emitter, "FAQ", 1).unwrap();
        accordions.close("FAQ", 1).unwrap();
        accordions.open(&emitter, "FAQ", 2).unwrap();
        assert_eq!(transport.with_action("Open Multiple Items").len(), 1);

        accordions.close("FAQ", 2).unwrap();
        accordions.close("FAQ", 2).unwrap();
        accordions.open(&emitter, "FAQ", 3).unwrap();
        assert_eq!(transport.with_action("Open Multiple Items").len(), 1);
    }

    #[test]
    fn open_first_flag_only_on_first_open() {
        let (mut accordions, emitter, transport) = setup();
        accordions.load(&emitter, "FAQ", 3).unwrap();
        accordions.open(&emitter, "FAQ", 2).unwrap();
        accordions.open(&emitter, "FAQ", 2).unwrap();

        let opens = transport.with_action("Open");
        assert_eq!(opens.len(), 2);
        assert_eq!(opens[0].label(), Some("Item #2"));
        assert!(opens[0].fields().unwrap().contains_key("firstInteraction"));
        assert!(opens[1].fields().is_none());
    }

    #[test]
    fn close_before_load_fails() {
        let (mut accordions, _, _) = setup();
        assert!(matches!(
            accordions.close("FAQ", 1),
            Err(HoraError::MissingState { .. })
        ));
    }
}
