pub mod errors;
pub mod model;
pub mod state;

pub use errors::RegistryError;
pub use model::{
    covers_all, AccordionState, CarouselState, CompleteView, InteractionChannel, OpenOutcome,
    WidgetState,
};
pub use state::{Loaded, WidgetRegistry};
