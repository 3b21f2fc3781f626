//! Interaction scripts: a recorded sequence of UI calls that can be replayed
//! through a tracker.
//!
//! ```yaml
//! - op: carousel_load
//!   title: PDP
//!   units: 3
//! - op: touch_move
//! - op: carousel_slide
//!   title: PDP
//!   slide: 2
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use hora_commerce::{Transaction, TransactionItem};
use hora_core_types::{HitArg, UnitIndex};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    CarouselLoad {
        title: String,
        units: u32,
    },
    CarouselMove {
        title: String,
        slide: UnitIndex,
    },
    CarouselSwipe {
        title: String,
        slide: UnitIndex,
    },
    /// Routed to swipe or move by the current touch state.
    CarouselSlide {
        title: String,
        slide: UnitIndex,
    },
    CarouselZoom {
        title: String,
        slide: UnitIndex,
    },
    CarouselClick {
        title: String,
        slide: UnitIndex,
    },
    CarouselArrow {
        title: String,
        slide: UnitIndex,
        direction: i32,
    },
    AccordionLoad {
        title: String,
        units: u32,
    },
    AccordionOpen {
        title: String,
        item: UnitIndex,
    },
    AccordionClose {
        title: String,
        item: UnitIndex,
    },
    TouchMove,
    TouchEnd,
    /// Page-view boundary.
    Reset,
    Orientation {
        width: u32,
        height: u32,
    },
    Error {
        title: String,
        #[serde(default)]
        comment: String,
    },
    NavigationClick {
        menu: String,
        item: String,
    },
    ButtonClick {
        title: String,
    },
    ScrollToBottom,
    CartItemAdded {
        product: String,
    },
    Transaction {
        id: String,
        affiliation: String,
        #[serde(default)]
        transaction: Transaction,
        #[serde(default)]
        items: Vec<TransactionItem>,
    },
    ProxyClassic {
        push: Vec<String>,
    },
    ProxyUniversal {
        args: Vec<HitArg>,
    },
    /// Arguments appended verbatim after the `send`/`event` pair.
    Raw {
        #[serde(default)]
        args: Vec<HitArg>,
    },
}

impl Step {
    pub fn op(&self) -> &'static str {
        match self {
            Step::CarouselLoad { .. } => "carousel_load",
            Step::CarouselMove { .. } => "carousel_move",
            Step::CarouselSwipe { .. } => "carousel_swipe",
            Step::CarouselSlide { .. } => "carousel_slide",
            Step::CarouselZoom { .. } => "carousel_zoom",
            Step::CarouselClick { .. } => "carousel_click",
            Step::CarouselArrow { .. } => "carousel_arrow",
            Step::AccordionLoad { .. } => "accordion_load",
            Step::AccordionOpen { .. } => "accordion_open",
            Step::AccordionClose { .. } => "accordion_close",
            Step::TouchMove => "touch_move",
            Step::TouchEnd => "touch_end",
            Step::Reset => "reset",
            Step::Orientation { .. } => "orientation",
            Step::Error { .. } => "error",
            Step::NavigationClick { .. } => "navigation_click",
            Step::ButtonClick { .. } => "button_click",
            Step::ScrollToBottom => "scroll_to_bottom",
            Step::CartItemAdded { .. } => "cart_item_added",
            Step::Transaction { .. } => "transaction",
            Step::ProxyClassic { .. } => "proxy_classic",
            Step::ProxyUniversal { .. } => "proxy_universal",
            Step::Raw { .. } => "raw",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScriptFormat {
    Json,
    Yaml,
}

impl ScriptFormat {
    /// `.json` files are JSON, everything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => ScriptFormat::Json,
            _ => ScriptFormat::Yaml,
        }
    }
}

pub fn parse_script(raw: &str, format: ScriptFormat) -> Result<Vec<Step>> {
    match format {
        ScriptFormat::Json => serde_json::from_str(raw).context("Failed to parse JSON script"),
        ScriptFormat::Yaml => serde_yaml::from_str(raw).context("Failed to parse YAML script"),
    }
}
