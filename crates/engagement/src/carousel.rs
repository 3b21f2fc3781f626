use tracing::{debug, warn};

use hora_core_types::{AnalyticsEvent, HoraError, UnitIndex, WidgetKind};
use hora_registry::{CarouselState, InteractionChannel, Loaded, WidgetRegistry};

use crate::emitter::EventEmitter;
use crate::metrics::{self, Milestone};

const KIND: WidgetKind = WidgetKind::Carousel;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArrowDirection {
    Next,
    Previous,
}

impl ArrowDirection {
    /// `+1` means next, anything else previous.
    pub fn from_step(step: i32) -> Self {
        if step > 0 {
            ArrowDirection::Next
        } else {
            ArrowDirection::Previous
        }
    }

    fn action(&self) -> &'static str {
        match self {
            ArrowDirection::Next => "Next Icon",
            ArrowDirection::Previous => "Previous Icon",
        }
    }
}

/// The interaction channels a carousel keeps separate histories for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CarouselChannel {
    Move,
    Swipe,
    Zoom,
    Click,
    Arrow(ArrowDirection),
}

impl CarouselChannel {
    fn action(&self) -> &'static str {
        match self {
            CarouselChannel::Move => "Move",
            CarouselChannel::Swipe => "Swipe",
            CarouselChannel::Zoom => "Zoom",
            CarouselChannel::Click => "Click",
            CarouselChannel::Arrow(direction) => direction.action(),
        }
    }

    fn history<'a>(&self, state: &'a mut CarouselState) -> &'a mut InteractionChannel {
        match self {
            CarouselChannel::Move => &mut state.moves,
            CarouselChannel::Swipe => &mut state.swipes,
            CarouselChannel::Zoom => &mut state.zooms,
            CarouselChannel::Click => &mut state.clicks,
            CarouselChannel::Arrow(_) => &mut state.arrows,
        }
    }

    /// Only moves and swipes bring a slide into view.
    fn reveals_slide(&self) -> bool {
        matches!(self, CarouselChannel::Move | CarouselChannel::Swipe)
    }
}

#[derive(Debug, Default)]
pub struct CarouselTracker {
    registry: WidgetRegistry<CarouselState>,
}

impl CarouselTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &WidgetRegistry<CarouselState> {
        &self.registry
    }

    pub fn clear(&mut self) {
        self.registry.clear();
    }

    /// Registers the carousel on first sight and always reports the load.
    /// A freshly created carousel starts with slide 1 in view.
    pub fn load(
        &mut self,
        emitter: &EventEmitter,
        title: &str,
        total_slides: u32,
    ) -> Result<(), HoraError> {
        let loaded = self.registry.load(title, total_slides)?;
        let category = KIND.category(title);
        emitter.emit(
            &AnalyticsEvent::new(category.as_str(), "Load")
                .label(format!("Total {total_slides}"))
                .value(u64::from(total_slides))
                .non_interaction(),
        );

        if loaded == Loaded::Created {
            let state = self.registry.get_mut(title)?;
            if state.view(1) {
                complete_view(emitter, &category, 1, state.total_units);
            }
        }
        Ok(())
    }

    pub fn interact(
        &mut self,
        emitter: &EventEmitter,
        title: &str,
        slide: UnitIndex,
        channel: CarouselChannel,
    ) -> Result<(), HoraError> {
        let state = self.registry.get_mut(title).map_err(|err| {
            warn!(title, ?channel, "carousel interaction before load");
            err
        })?;
        if slide == 0 || slide > state.total_units {
            warn!(title, slide, total = state.total_units, "slide outside carousel bounds");
        }

        let first = channel.history(state).record(slide);
        let category = KIND.category(title);
        let event = AnalyticsEvent::new(category.as_str(), channel.action())
            .label(format!("Slide #{slide}"));
        emitter.emit(&emitter.flag_first(event, first));
        if first {
            metrics::record_milestone(KIND, Milestone::FirstInteraction);
        }

        if channel.reveals_slide() && state.view(slide) {
            complete_view(emitter, &category, slide, state.total_units);
        }
        Ok(())
    }

    pub fn full_view_fired(&self, title: &str) -> Result<bool, HoraError> {
        Ok(self.registry.get(title)?.complete.fired())
    }
}

fn complete_view(emitter: &EventEmitter, category: &str, slide: UnitIndex, total: u32) {
    debug!(category, total, "carousel fully viewed");
    metrics::record_milestone(KIND, Milestone::CompleteView);
    emitter.emit(
        &AnalyticsEvent::new(category, "View All Slides")
            .label(format!("Slide #{slide}"))
            .value(u64::from(total)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::TrackerConfig;
    use hora_transport::RecordingTransport;
    use std::sync::Arc;

    fn setup() -> (CarouselTracker, EventEmitter, Arc<RecordingTransport>) {
        let transport = RecordingTransport::new();
        let emitter = EventEmitter::new(TrackerConfig::default(), transport.clone());
        (CarouselTracker::new(), emitter, transport)
    }

    #[test]
    fn load_reports_size_as_non_interaction() {
        let (mut carousels, emitter, transport) = setup();
        carousels.load(&emitter, "PDP", 4).unwrap();

        let hits = transport.hits();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].category(), Some("Carousel - PDP"));
        assert_eq!(hits[0].action(), Some("Load"));
        assert_eq!(hits[0].label(), Some("Total 4"));
        assert_eq!(hits[0].value(), Some(4));
        assert!(hits[0].fields().unwrap().contains_key("nonInteraction"));
    }

    #[test]
    fn single_slide_carousel_completes_on_load() {
        let (mut carousels, emitter, transport) = setup();
        carousels.load(&emitter, "Hero", 1).unwrap();

        let actions: Vec<_> = transport
            .hits()
            .iter()
            .map(|hit| hit.action().unwrap_or_default().to_string())
            .collect();
        assert_eq!(actions, vec!["Load", "View All Slides"]);
        assert!(carousels.full_view_fired("Hero").unwrap());
    }

    #[test]
    fn reload_does_not_reseed() {
        let (mut carousels, emitter, _) = setup();
        carousels.load(&emitter, "PDP", 3).unwrap();
        carousels.load(&emitter, "PDP", 3).unwrap();
        assert_eq!(carousels.registry().get("PDP").unwrap().viewed, vec![1]);
    }

    #[test]
    fn arrow_direction_selects_action() {
        let (mut carousels, emitter, transport) = setup();
        carousels.load(&emitter, "PDP", 3).unwrap();
        transport.clear();

        let next = CarouselChannel::Arrow(ArrowDirection::from_step(1));
        let previous = CarouselChannel::Arrow(ArrowDirection::from_step(-1));
        carousels.interact(&emitter, "PDP", 2, next).unwrap();
        carousels.interact(&emitter, "PDP", 1, previous).unwrap();

        let hits = transport.hits();
        assert_eq!(hits[0].action(), Some("Next Icon"));
        assert!(hits[0].fields().is_some());
        assert_eq!(hits[1].action(), Some("Previous Icon"));
        assert!(hits[1].fields().is_none());
    }

    #[test]
    fn zoom_and_click_do_not_count_as_views() {
        let (mut carousels, emitter, transport) = setup();
        carousels.load(&emitter, "PDP", 2).unwrap();
        carousels
            .interact(&emitter, "PDP", 2, CarouselChannel::Zoom)
            .unwrap();
        carousels
            .interact(&emitter, "PDP", 2, CarouselChannel::Click)
            .unwrap();

        assert!(transport.with_action("View All Slides").is_empty());
        assert!(!carousels.full_view_fired("PDP").unwrap());
    }

    #[test]
    fn unknown_carousel_is_missing_state() {
        let (mut carousels, emitter, transport) = setup();
        let err = carousels
            .interact(&emitter, "Nope", 1, CarouselChannel::Move)
            .unwrap_err();
        assert_eq!(err, HoraError::missing(WidgetKind::Carousel, "Nope"));
        assert!(transport.is_empty());
    }
}
