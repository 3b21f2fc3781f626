use hora_core_types::{UnitIndex, WidgetKind};

/// State kept per registered widget title.
pub trait WidgetState {
    const KIND: WidgetKind;

    fn create(total_units: u32) -> Self;

    fn total_units(&self) -> u32;

    /// True once the complete-view milestone has been emitted.
    fn full_view_fired(&self) -> bool;
}

/// Append-only history of one interaction type.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InteractionChannel {
    units: Vec<UnitIndex>,
    has_fired: bool,
}

impl InteractionChannel {
    /// Appends `unit`, returning true when this is the channel's first interaction.
    pub fn record(&mut self, unit: UnitIndex) -> bool {
        let first = !self.has_fired;
        self.has_fired = true;
        self.units.push(unit);
        first
    }

    pub fn units(&self) -> &[UnitIndex] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn has_fired(&self) -> bool {
        self.has_fired
    }
}

/// Complete-view bookkeeping shared by every widget kind.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompleteView {
    reached: bool,
    fired: bool,
}

impl CompleteView {
    /// Re-evaluates coverage of `[1, total]` after an append to `seen`.
    /// Returns true exactly once: on the call where coverage first completes.
    pub fn evaluate(&mut self, seen: &[UnitIndex], total: u32) -> bool {
        if self.fired || seen.len() < total as usize {
            return false;
        }
        self.reached = covers_all(seen, total);
        if self.reached {
            self.fired = true;
        }
        self.reached
    }

    pub fn reached(&self) -> bool {
        self.reached
    }

    pub fn fired(&self) -> bool {
        self.fired
    }
}

/// Membership scan: duplicates in `seen` never count twice.
pub fn covers_all(seen: &[UnitIndex], total: u32) -> bool {
    (1..=total).all(|unit| seen.contains(&unit))
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarouselState {
    pub total_units: u32,
    pub moves: InteractionChannel,
    pub swipes: InteractionChannel,
    pub zooms: InteractionChannel,
    pub clicks: InteractionChannel,
    pub arrows: InteractionChannel,
    pub viewed: Vec<UnitIndex>,
    pub complete: CompleteView,
}

impl CarouselState {
    /// Marks `unit` as seen; true when this completes the carousel.
    pub fn view(&mut self, unit: UnitIndex) -> bool {
        self.viewed.push(unit);
        self.complete.evaluate(&self.viewed, self.total_units)
    }
}

impl WidgetState for CarouselState {
    const KIND: WidgetKind = WidgetKind::Carousel;

    fn create(total_units: u32) -> Self {
        Self {
            total_units,
            moves: InteractionChannel::default(),
            swipes: InteractionChannel::default(),
            zooms: InteractionChannel::default(),
            clicks: InteractionChannel::default(),
            arrows: InteractionChannel::default(),
            viewed: Vec::new(),
            complete: CompleteView::default(),
        }
    }

    fn total_units(&self) -> u32 {
        self.total_units
    }

    fn full_view_fired(&self) -> bool {
        self.complete.fired()
    }
}

/// What a single accordion `open` derived from the updated history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpenOutcome {
    pub first: bool,
    /// Items currently open and not yet closed, when more than one is open.
    pub multiple_open: Option<u64>,
    pub completed: bool,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccordionState {
    pub total_units: u32,
    pub opens: InteractionChannel,
    pub closes: InteractionChannel,
    pub complete: CompleteView,
}

impl AccordionState {
    pub fn open(&mut self, unit: UnitIndex) -> OpenOutcome {
        let first = self.opens.record(unit);
        let opens = self.opens.len();
        let closes = self.closes.len();
        let multiple_open = (opens > 1 && opens > closes).then(|| (opens - closes) as u64);
        let completed = self.complete.evaluate(self.opens.units(), self.total_units);
        OpenOutcome {
            first,
            multiple_open,
            completed,
        }
    }

    pub fn close(&mut self, unit: UnitIndex) {
        self.closes.record(unit);
    }
}

impl WidgetState for AccordionState {
    const KIND: WidgetKind = WidgetKind::Accordion;

    fn create(total_units: u32) -> Self {
        Self {
            total_units,
            opens: InteractionChannel::default(),
            closes: InteractionChannel::default(),
            complete: CompleteView::default(),
        }
    }

    fn total_units(&self) -> u32 {
        self.total_units
    }

    fn full_view_fired(&self) -> bool {
        self.complete.fired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_flags_only_first_record() {
        let mut channel = InteractionChannel::default();
        assert!(channel.record(2));
        assert!(!channel.record(2));
        assert_eq!(channel.units(), &[2, 2]);
    }

    #[test]
    fn coverage_ignores_duplicates() {
        assert!(!covers_all(&[1, 1, 2, 2], 3));
        assert!(covers_all(&[3, 1, 1, 2], 3));
    }

    #[test]
    fn complete_view_fires_once() {
        let mut complete = CompleteView::default();
        assert!(!complete.evaluate(&[1, 2], 3));
        assert!(complete.evaluate(&[1, 2, 3], 3));
        assert!(!complete.evaluate(&[1, 2, 3, 1], 3));
        assert!(complete.reached());
        assert!(complete.fired());
    }

    #[test]
    fn complete_view_skips_scan_until_enough_entries() {
        let mut complete = CompleteView::default();
        assert!(!complete.evaluate(&[1], 2));
        assert!(!complete.reached());
    }

    #[test]
    fn carousel_view_completes_in_any_order() {
        let mut carousel = CarouselState::create(3);
        assert!(!carousel.view(3));
        assert!(!carousel.view(1));
        assert!(carousel.view(2));
        assert!(carousel.full_view_fired());
    }

    #[test]
    fn accordion_reports_open_differential() {
        let mut accordion = AccordionState::create(4);
        let first = accordion.open(1);
        assert!(first.first);
        assert_eq!(first.multiple_open, None);

        let second = accordion.open(2);
        assert!(!second.first);
        assert_eq!(second.multiple_open, Some(2));

        accordion.close(1);
        accordion.close(2);
        let third = accordion.open(3);
        assert_eq!(third.multiple_open, Some(1));

        accordion.close(3);
        accordion.close(3);
        let fourth = accordion.open(4);
        assert_eq!(fourth.multiple_open, None);
        assert!(fourth.completed);
    }
}
