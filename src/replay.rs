//! Drives a [`Tracker`] and a [`TransactionSender`] from a parsed script and
//! collects every hit they emit.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use serde::Serialize;
use tracing::{debug, warn};

use hora_commerce::TransactionSender;
use hora_core_types::Hit;
use hora_engagement::{Tracker, TrackerConfig, Viewport};
use hora_registry::{AccordionState, CarouselState};
use hora_transport::RecordingTransport;

use crate::script::Step;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepFailure {
    pub index: usize,
    pub op: &'static str,
    pub error: String,
}

#[derive(Clone, Debug, Default)]
pub struct ReplayOutcome {
    pub hits: Vec<Hit>,
    pub failures: Vec<StepFailure>,
}

/// Registry contents at the end of a replay.
#[derive(Debug, Serialize)]
pub struct RegistrySnapshot<'a> {
    pub carousels: BTreeMap<&'a str, &'a CarouselState>,
    pub accordions: BTreeMap<&'a str, &'a AccordionState>,
}

pub struct Replayer {
    tracker: Tracker,
    commerce: TransactionSender,
    transport: Arc<RecordingTransport>,
}

impl Replayer {
    pub fn new(config: TrackerConfig) -> Self {
        let transport = RecordingTransport::new();
        let commerce = TransactionSender::new(&config.tracker_name, transport.clone());
        Self {
            tracker: Tracker::new(config, transport.clone()),
            commerce,
            transport,
        }
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// Runs every step. In strict mode the first failing step aborts the run;
    /// otherwise failures are collected and the replay continues.
    pub fn run(&mut self, steps: &[Step], strict: bool) -> Result<ReplayOutcome> {
        let mut failures = Vec::new();
        for (index, step) in steps.iter().enumerate() {
            if let Err(err) = self.apply(step) {
                if strict {
                    return Err(err.context(format!("step {index} ({}) failed", step.op())));
                }
                warn!(index, op = step.op(), error = %err, "step failed");
                failures.push(StepFailure {
                    index,
                    op: step.op(),
                    error: err.to_string(),
                });
            }
        }
        Ok(ReplayOutcome {
            hits: self.transport.take(),
            failures,
        })
    }

    pub fn apply(&mut self, step: &Step) -> Result<()> {
        debug!(op = step.op(), "applying step");
        let tracker = &mut self.tracker;
        match step {
            Step::CarouselLoad { title, units } => tracker.carousel_load(title, *units)?,
            Step::CarouselMove { title, slide } => tracker.carousel_move(title, *slide)?,
            Step::CarouselSwipe { title, slide } => tracker.carousel_swipe(title, *slide)?,
            Step::CarouselSlide { title, slide } => tracker.carousel_slide(title, *slide)?,
            Step::CarouselZoom { title, slide } => tracker.carousel_zoom(title, *slide)?,
            Step::CarouselClick { title, slide } => tracker.carousel_click(title, *slide)?,
            Step::CarouselArrow {
                title,
                slide,
                direction,
            } => tracker.carousel_arrow_click(title, *slide, *direction)?,
            Step::AccordionLoad { title, units } => tracker.accordion_load(title, *units)?,
            Step::AccordionOpen { title, item } => tracker.accordion_open(title, *item)?,
            Step::AccordionClose { title, item } => tracker.accordion_close(title, *item)?,
            Step::TouchMove => tracker.gesture_mut().touch_move(),
            Step::TouchEnd => tracker.gesture_mut().touch_end(),
            Step::Reset => tracker.reset(),
            Step::Orientation { width, height } => tracker.site().orientation_change(Viewport {
                width: *width,
                height: *height,
            }),
            Step::Error { title, comment } => tracker.site().error(title, comment),
            Step::NavigationClick { menu, item } => tracker.site().navigation_click(menu, item),
            Step::ButtonClick { title } => tracker.site().button_click(title),
            Step::ScrollToBottom => tracker.site().scroll_to_bottom(),
            Step::CartItemAdded { product } => tracker.cart_item_added(product),
            Step::Transaction {
                id,
                affiliation,
                transaction,
                items,
            } => self.commerce.send(id, affiliation, transaction, items)?,
            Step::ProxyClassic { push } => {
                let push: Vec<&str> = push.iter().map(String::as_str).collect();
                if !tracker.proxy_classic(&push) {
                    return Err(anyhow!("classic push {:?} is not an event", push));
                }
            }
            Step::ProxyUniversal { args } => {
                if !tracker.proxy_universal(args) {
                    debug!(?args, "universal call filtered out");
                }
            }
            Step::Raw { args } => tracker.emitter().send_raw(args.iter().cloned()),
        }
        Ok(())
    }

    pub fn snapshot(&self) -> RegistrySnapshot<'_> {
        RegistrySnapshot {
            carousels: self.tracker.carousels().registry().iter().collect(),
            accordions: self.tracker.accordions().registry().iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{parse_script, ScriptFormat};

    const PDP: &str = r#"
- op: carousel_load
  title: PDP
  units: 2
- op: touch_move
- op: carousel_slide
  title: PDP
  slide: 2
- op: touch_end
- op: carousel_zoom
  title: Ghost
  slide: 1
- op: cart_item_added
  product: Boots
"#;

    #[test]
    fn collects_hits_and_failures() {
        let steps = parse_script(PDP, ScriptFormat::Yaml).unwrap();
        let mut replayer = Replayer::new(TrackerConfig::default());
        let outcome = replayer.run(&steps, false).unwrap();

        let actions: Vec<_> = outcome.hits.iter().filter_map(Hit::action).collect();
        assert_eq!(
            actions,
            vec![
                "Load",
                "Swipe",
                "View All Slides",
                "Add Item After View All Carousel Items"
            ]
        );
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].index, 4);
        assert_eq!(outcome.failures[0].op, "carousel_zoom");
        assert_eq!(outcome.hits[3].label(), Some("Boots"));
    }

    #[test]
    fn strict_mode_stops_at_first_failure() {
        let steps = parse_script(PDP, ScriptFormat::Yaml).unwrap();
        let mut replayer = Replayer::new(TrackerConfig::default());
        let err = replayer.run(&steps, true).unwrap_err();
        assert!(err.to_string().contains("step 4 (carousel_zoom)"));
    }

    #[test]
    fn snapshot_lists_loaded_widgets() {
        let steps = parse_script(PDP, ScriptFormat::Yaml).unwrap();
        let mut replayer = Replayer::new(TrackerConfig::default());
        replayer.run(&steps, false).unwrap();

        let snapshot = serde_json::to_value(replayer.snapshot()).unwrap();
        assert!(snapshot["carousels"]["PDP"].is_object());
        assert!(snapshot["accordions"].as_object().unwrap().is_empty());
    }

    #[test]
    fn non_event_classic_push_is_a_failure() {
        let mut replayer = Replayer::new(TrackerConfig::default());
        let step = Step::ProxyClassic {
            push: vec!["_trackPageview".into()],
        };
        assert!(replayer.apply(&step).is_err());
    }
}
