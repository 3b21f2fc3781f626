use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error};

use hora_core_types::{HitArg, HoraError, UnitIndex};
use hora_transport::AnalyticsTransport;

use crate::accordion::AccordionTracker;
use crate::carousel::{ArrowDirection, CarouselChannel, CarouselTracker};
use crate::emitter::{EventEmitter, TrackerConfig};
use crate::proxy;
use crate::site::SiteEvents;

/// The transient "finger is on the screen" flag the UI keeps. A slide that
/// lands shortly after `touchend` still belongs to the gesture.
#[derive(Clone, Debug)]
pub struct GestureState {
    touching: bool,
    released_at: Option<Instant>,
    grace: Duration,
}

impl GestureState {
    pub fn new(grace: Duration) -> Self {
        Self {
            touching: false,
            released_at: None,
            grace,
        }
    }

    pub fn touch_move(&mut self) {
        self.touching = true;
        self.released_at = None;
    }

    pub fn touch_end(&mut self) {
        if self.touching {
            self.touching = false;
            self.released_at = Some(Instant::now());
        }
    }

    pub fn is_swiping(&self) -> bool {
        self.touching
            || self
                .released_at
                .is_some_and(|released| released.elapsed() < self.grace)
    }

    /// Drops any pending grace window.
    pub fn reset(&mut self) {
        self.touching = false;
        self.released_at = None;
    }
}

/// Page-scoped engagement tracker: owns both widget registries and the
/// emitter every event goes through.
pub struct Tracker {
    emitter: EventEmitter,
    carousels: CarouselTracker,
    accordions: AccordionTracker,
    gesture: GestureState,
}

impl Tracker {
    pub fn new(config: TrackerConfig, transport: Arc<dyn AnalyticsTransport>) -> Self {
        let gesture = GestureState::new(Duration::from_millis(config.swipe_grace_ms));
        Self {
            emitter: EventEmitter::new(config, transport),
            carousels: CarouselTracker::new(),
            accordions: AccordionTracker::new(),
            gesture,
        }
    }

    pub fn emitter(&self) -> &EventEmitter {
        &self.emitter
    }

    pub fn carousels(&self) -> &CarouselTracker {
        &self.carousels
    }

    pub fn accordions(&self) -> &AccordionTracker {
        &self.accordions
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn gesture_mut(&mut self) -> &mut GestureState {
        &mut self.gesture
    }

    pub fn site(&self) -> SiteEvents<'_> {
        SiteEvents::new(&self.emitter)
    }

    pub fn carousel_load(&mut self, title: &str, total_slides: u32) -> Result<(), HoraError> {
        self.carousels
            .load(&self.emitter, title, total_slides)
            .map_err(report)
    }

    pub fn carousel_move(&mut self, title: &str, slide: UnitIndex) -> Result<(), HoraError> {
        self.carousel(title, slide, CarouselChannel::Move)
    }

    pub fn carousel_swipe(&mut self, title: &str, slide: UnitIndex) -> Result<(), HoraError> {
        self.carousel(title, slide, CarouselChannel::Swipe)
    }

    /// Slide change of unknown origin: a swipe while a touch gesture is in
    /// progress, a move otherwise.
    pub fn carousel_slide(&mut self, title: &str, slide: UnitIndex) -> Result<(), HoraError> {
        let channel = if self.gesture.is_swiping() {
            CarouselChannel::Swipe
        } else {
            CarouselChannel::Move
        };
        debug!(title, slide, ?channel, "slide routed");
        self.carousel(title, slide, channel)
    }

    pub fn carousel_zoom(&mut self, title: &str, slide: UnitIndex) -> Result<(), HoraError> {
        self.carousel(title, slide, CarouselChannel::Zoom)
    }

    pub fn carousel_click(&mut self, title: &str, slide: UnitIndex) -> Result<(), HoraError> {
        self.carousel(title, slide, CarouselChannel::Click)
    }

    pub fn carousel_arrow_click(
        &mut self,
        title: &str,
        slide: UnitIndex,
        direction: i32,
    ) -> Result<(), HoraError> {
        let channel = CarouselChannel::Arrow(ArrowDirection::from_step(direction));
        self.carousel(title, slide, channel)
    }

    fn carousel(
        &mut self,
        title: &str,
        slide: UnitIndex,
        channel: CarouselChannel,
    ) -> Result<(), HoraError> {
        self.carousels
            .interact(&self.emitter, title, slide, channel)
            .map_err(report)
    }

    pub fn accordion_load(&mut self, title: &str, total_items: u32) -> Result<(), HoraError> {
        self.accordions
            .load(&self.emitter, title, total_items)
            .map_err(report)
    }

    pub fn accordion_open(&mut self, title: &str, item: UnitIndex) -> Result<(), HoraError> {
        self.accordions
            .open(&self.emitter, title, item)
            .map_err(report)
    }

    pub fn accordion_close(&mut self, title: &str, item: UnitIndex) -> Result<(), HoraError> {
        self.accordions.close(title, item).map_err(report)
    }

    /// Reports an add-to-cart, distinguishing shoppers who browsed a whole carousel first.
    pub fn cart_item_added(&self, product: &str) {
        let after_full_view = self.carousels.registry().any_full_view();
        self.site().cart_item_added(product, after_full_view);
    }

    /// Mirrors a classic `_gaq` push; returns false when the push was not an event.
    pub fn proxy_classic(&self, push: &[&str]) -> bool {
        match proxy::classic_event(push) {
            Some(event) => {
                self.emitter.emit(&event);
                true
            }
            None => false,
        }
    }

    /// Mirrors a universal `ga(...)` call; returns false when it was filtered out.
    pub fn proxy_universal(&self, args: &[HitArg]) -> bool {
        match proxy::universal_forward(&self.emitter.config().tracker_name, args) {
            Some(hit) => {
                self.emitter.dispatch(hit);
                true
            }
            None => false,
        }
    }

    pub fn clear_carousels(&mut self) {
        self.carousels.clear();
    }

    pub fn clear_accordions(&mut self) {
        self.accordions.clear();
    }

    /// Page-view boundary: forgets every widget and any in-flight gesture.
    pub fn reset(&mut self) {
        self.carousels.clear();
        self.accordions.clear();
        self.gesture.reset();
    }
}

fn report(err: HoraError) -> HoraError {
    error!(%err, "engagement tracking call rejected");
    err
}
