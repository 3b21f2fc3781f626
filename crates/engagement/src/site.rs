//! Stateless, single-call events for the rest of the page chrome.

use hora_core_types::AnalyticsEvent;

use crate::emitter::EventEmitter;

const OK: &str = "OK";

/// Viewport dimensions observed after an orientation change.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn orientation_transition(&self) -> &'static str {
        if self.height > self.width {
            "Landscape to Portrait"
        } else {
            "Portrait to Landscape"
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Alert,
    UnsuccessfulSubmission,
    UnsuccessfulAddToCart,
    UnsuccessfulPlaceOrder,
}

impl ErrorKind {
    fn action(&self) -> &'static str {
        match self {
            ErrorKind::Alert => "Alert",
            ErrorKind::UnsuccessfulSubmission => "Unsuccessful Submission",
            ErrorKind::UnsuccessfulAddToCart => "Unsuccessful Add To Cart",
            ErrorKind::UnsuccessfulPlaceOrder => "Unsuccessful Place Order",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScrollKind {
    Up,
    Down,
    Top,
    Bottom,
}

impl ScrollKind {
    fn action(&self) -> &'static str {
        match self {
            ScrollKind::Up => "Up",
            ScrollKind::Down => "Down",
            ScrollKind::Top => "Top",
            ScrollKind::Bottom => "Bottom",
        }
    }
}

pub struct SiteEvents<'a> {
    emitter: &'a EventEmitter,
}

impl<'a> SiteEvents<'a> {
    pub fn new(emitter: &'a EventEmitter) -> Self {
        Self { emitter }
    }

    fn send(&self, event: AnalyticsEvent) {
        self.emitter.emit(&event);
    }

    pub fn init(&self, template: &str) {
        self.send(
            AnalyticsEvent::new("Init", "Template")
                .label(template)
                .non_interaction(),
        );
    }

    pub fn orientation_change(&self, viewport: Viewport) {
        self.send(
            AnalyticsEvent::new("Orientation", "Change")
                .label(viewport.orientation_transition())
                .non_interaction(),
        );
    }

    pub fn error(&self, title: &str, comment: &str) {
        self.send(AnalyticsEvent::new("Error", title).label(comment));
    }

    pub fn known_error(&self, kind: ErrorKind, comment: &str) {
        self.error(kind.action(), comment);
    }

    pub fn scroll(&self, title: &str, kind: ScrollKind) {
        self.send(AnalyticsEvent::new(format!("Scroll - {title}"), kind.action()));
    }

    pub fn scroll_to_bottom(&self) {
        self.send(AnalyticsEvent::new("Scroll To Bottom", "Interaction").label(OK));
    }

    pub fn pinny_open(&self, title: &str) {
        self.send(AnalyticsEvent::new("Pinny", "Open").label(title));
    }

    pub fn pinny_close(&self, title: &str) {
        self.send(AnalyticsEvent::new("Pinny", "Close").label(title));
    }

    pub fn pinny_trigger(&self, category: &str, label: &str) {
        self.send(AnalyticsEvent::new(format!("{category} Pinny"), "Trigger By").label(label));
    }

    pub fn button_click(&self, title: &str) {
        self.send(AnalyticsEvent::new("Button", "Click").label(title));
    }

    pub fn navigation_click(&self, menu: &str, item: &str) {
        self.send(AnalyticsEvent::new(format!("Navigation - {menu}"), "Click").label(item));
    }

    pub fn search_toggle(&self) {
        self.send(AnalyticsEvent::new("Search", "Toggle").label(OK));
    }

    pub fn breadcrumb_click(&self) {
        self.send(AnalyticsEvent::new("Breadcrumb", "Click").label(OK));
    }

    pub fn back_to_top_click(&self) {
        self.send(AnalyticsEvent::new("Back To Top", "Click").label(OK));
    }

    pub fn newsletter_click(&self) {
        self.send(AnalyticsEvent::new("Newsletter", "Click").label(OK));
    }

    pub fn footer_click(&self) {
        self.send(AnalyticsEvent::new("Footer", "Click").label(OK));
    }

    pub fn pagination_click(&self) {
        self.send(AnalyticsEvent::new("Pagination", "Click").label(OK));
    }

    pub fn filter_toggle(&self, title: &str) {
        self.send(AnalyticsEvent::new(format!("Filter - {title}"), "Toggle").label(OK));
    }

    pub fn filter_change(&self, title: &str, kind: &str, amount: &str) {
        self.send(
            AnalyticsEvent::new(format!("Filter - {title}"), format!("Change: {kind}"))
                .label(amount),
        );
    }

    pub fn size_guide_open(&self, title: &str) {
        self.send(AnalyticsEvent::new(format!("Size Guide - {title}"), "Open"));
    }

    pub fn email_friend_open(&self, title: &str) {
        self.send(AnalyticsEvent::new(format!("Email Friend - {title}"), "Open"));
    }

    pub fn email_me_back_open(&self, title: &str) {
        self.send(AnalyticsEvent::new(format!("Email Me Back - {title}"), "Open"));
    }

    pub fn color_change(&self, title: &str) {
        self.send(AnalyticsEvent::new(format!("Color - {title}"), "Change"));
    }

    pub fn quantity_change(&self, title: &str, amount: u64) {
        self.send(
            AnalyticsEvent::new(format!("Quantity - {title}"), "Change").label(amount.to_string()),
        );
    }

    pub fn size_change(&self, title: &str, size: &str) {
        self.send(AnalyticsEvent::new(format!("Size - {title}"), "Change").label(size));
    }

    pub fn review_read(&self, title: &str) {
        self.send(AnalyticsEvent::new(format!("Review - {title}"), "Read"));
    }

    pub fn sidebar_open(&self, title: &str) {
        self.send(AnalyticsEvent::new(format!("Sidebar - {title}"), "Open"));
    }

    pub fn sidebar_close(&self, title: &str) {
        self.send(AnalyticsEvent::new(format!("Sidebar - {title}"), "Close"));
    }

    pub fn minicart_toggle(&self) {
        self.send(AnalyticsEvent::new("Mini-Cart", "Toggle").label(OK));
    }

    pub fn minicart_item_removed(&self) {
        self.send(AnalyticsEvent::new("Mini-Cart", "Remove Item").label(OK));
    }

    pub fn minicart_edit_enabled(&self) {
        self.send(AnalyticsEvent::new("Mini-Cart", "Enable Edit").label(OK));
    }

    pub fn minicart_edit_disabled(&self) {
        self.send(AnalyticsEvent::new("Mini-Cart", "Disable Edit").label(OK));
    }

    pub fn minicart_quantity_changed(&self) {
        self.send(AnalyticsEvent::new("Mini-Cart", "Change Quantity").label(OK));
    }

    pub fn checkout_start(&self, step: &str) {
        self.send(AnalyticsEvent::new("Checkout", format!("Start: {step}")));
    }

    /// `after_full_carousel_view` is true when any carousel on the page has
    /// fired its complete-view milestone.
    pub fn cart_item_added(&self, product: &str, after_full_carousel_view: bool) {
        let action = if after_full_carousel_view {
            "Add Item After View All Carousel Items"
        } else {
            "Add Item"
        };
        self.send(AnalyticsEvent::new("Cart", action).label(product));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::TrackerConfig;
    use hora_transport::RecordingTransport;

    #[test]
    fn orientation_is_non_interaction() {
        let transport = RecordingTransport::new();
        let emitter = EventEmitter::new(TrackerConfig::default(), transport.clone());
        let site = SiteEvents::new(&emitter);

        site.orientation_change(Viewport {
            width: 400,
            height: 800,
        });
        site.orientation_change(Viewport {
            width: 800,
            height: 400,
        });

        let hits = transport.hits();
        assert_eq!(hits[0].label(), Some("Landscape to Portrait"));
        assert_eq!(hits[1].label(), Some("Portrait to Landscape"));
        assert!(hits[1].fields().unwrap().contains_key("nonInteraction"));
    }

    #[test]
    fn errors_share_category() {
        let transport = RecordingTransport::new();
        let emitter = EventEmitter::new(TrackerConfig::default(), transport.clone());
        let site = SiteEvents::new(&emitter);

        site.known_error(ErrorKind::UnsuccessfulAddToCart, "out of stock");
        site.error("Payment", "declined");

        let hits = transport.hits();
        assert_eq!(hits[0].category(), Some("Error"));
        assert_eq!(hits[0].action(), Some("Unsuccessful Add To Cart"));
        assert_eq!(hits[0].label(), Some("out of stock"));
        assert_eq!(hits[1].action(), Some("Payment"));
    }

    #[test]
    fn scoped_categories_carry_title() {
        let transport = RecordingTransport::new();
        let emitter = EventEmitter::new(TrackerConfig::default(), transport.clone());
        let site = SiteEvents::new(&emitter);

        site.scroll("PLP", ScrollKind::Bottom);
        site.filter_change("Brand", "Checkbox", "3");
        site.sidebar_close("Filters");

        let hits = transport.hits();
        assert_eq!(hits[0].category(), Some("Scroll - PLP"));
        assert_eq!(hits[0].action(), Some("Bottom"));
        assert_eq!(hits[0].arity(), 4);
        assert_eq!(hits[1].action(), Some("Change: Checkbox"));
        assert_eq!(hits[2].category(), Some("Sidebar - Filters"));
    }

    #[test]
    fn every_event_has_expected_shape() {
        let transport = RecordingTransport::new();
        let emitter = EventEmitter::new(TrackerConfig::default(), transport.clone());
        let site = SiteEvents::new(&emitter);

        site.init("PDP");
        site.scroll_to_bottom();
        site.pinny_open("Size Chart");
        site.pinny_close("Size Chart");
        site.pinny_trigger("Quick View", "Hover");
        site.button_click("Buy");
        site.navigation_click("Main", "Shoes");
        site.search_toggle();
        site.breadcrumb_click();
        site.back_to_top_click();
        site.newsletter_click();
        site.footer_click();
        site.pagination_click();
        site.filter_toggle("Brand");
        site.size_guide_open("PDP");
        site.email_friend_open("PDP");
        site.email_me_back_open("PDP");
        site.color_change("PDP");
        site.quantity_change("PDP", 2);
        site.size_change("PDP", "M");
        site.review_read("PDP");
        site.sidebar_open("Filters");
        site.minicart_toggle();
        site.minicart_item_removed();
        site.minicart_edit_enabled();
        site.minicart_edit_disabled();
        site.minicart_quantity_changed();
        site.checkout_start("Shipping");
        site.cart_item_added("Boots", false);
        site.cart_item_added("Boots", true);

        let expected: &[(&str, &str, Option<&str>, usize)] = &[
            ("Init", "Template", Some("PDP"), 6),
            ("Scroll To Bottom", "Interaction", Some("OK"), 5),
            ("Pinny", "Open", Some("Size Chart"), 5),
            ("Pinny", "Close", Some("Size Chart"), 5),
            ("Quick View Pinny", "Trigger By", Some("Hover"), 5),
            ("Button", "Click", Some("Buy"), 5),
            ("Navigation - Main", "Click", Some("Shoes"), 5),
            ("Search", "Toggle", Some("OK"), 5),
            ("Breadcrumb", "Click", Some("OK"), 5),
            ("Back To Top", "Click", Some("OK"), 5),
            ("Newsletter", "Click", Some("OK"), 5),
            ("Footer", "Click", Some("OK"), 5),
            ("Pagination", "Click", Some("OK"), 5),
            ("Filter - Brand", "Toggle", Some("OK"), 5),
            ("Size Guide - PDP", "Open", None, 4),
            ("Email Friend - PDP", "Open", None, 4),
            ("Email Me Back - PDP", "Open", None, 4),
            ("Color - PDP", "Change", None, 4),
            ("Quantity - PDP", "Change", Some("2"), 5),
            ("Size - PDP", "Change", Some("M"), 5),
            ("Review - PDP", "Read", None, 4),
            ("Sidebar - Filters", "Open", None, 4),
            ("Mini-Cart", "Toggle", Some("OK"), 5),
            ("Mini-Cart", "Remove Item", Some("OK"), 5),
            ("Mini-Cart", "Enable Edit", Some("OK"), 5),
            ("Mini-Cart", "Disable Edit", Some("OK"), 5),
            ("Mini-Cart", "Change Quantity", Some("OK"), 5),
            ("Checkout", "Start: Shipping", None, 4),
            ("Cart", "Add Item", Some("Boots"), 5),
            ("Cart", "Add Item After View All Carousel Items", Some("Boots"), 5),
        ];

        let hits = transport.hits();
        assert_eq!(hits.len(), expected.len());
        for (hit, &(category, action, label, arity)) in hits.iter().zip(expected) {
            assert_eq!(hit.category(), Some(category));
            assert_eq!(hit.action(), Some(action), "category {category}");
            assert_eq!(hit.label(), label, "{category} / {action}");
            assert_eq!(hit.arity(), arity, "{category} / {action}");
        }
    }
}
