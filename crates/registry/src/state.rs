use std::collections::HashMap;

use tracing::{debug, warn};

use crate::{errors::RegistryError, model::WidgetState};

/// Result of a `load` call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Loaded {
    /// A fresh state was created for the title.
    Created,
    /// The title was already registered; its state was left untouched.
    Existing,
}

/// Page-lifetime map from widget title to its interaction history.
///
/// States are created lazily on the first `load` of a title and only go away
/// through [`WidgetRegistry::clear`].
#[derive(Debug)]
pub struct WidgetRegistry<S> {
    widgets: HashMap<String, S>,
}

impl<S> Default for WidgetRegistry<S> {
    fn default() -> Self {
        Self {
            widgets: HashMap::new(),
        }
    }
}

impl<S: WidgetState> WidgetRegistry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, title: &str, total_units: u32) -> Result<Loaded, RegistryError> {
        if let Some(existing) = self.widgets.get(title) {
            if existing.total_units() != total_units {
                warn!(
                    kind = %S::KIND,
                    title,
                    declared = existing.total_units(),
                    requested = total_units,
                    "widget reloaded with a different size; keeping the original"
                );
            }
            return Ok(Loaded::Existing);
        }
        if total_units == 0 {
            return Err(RegistryError::EmptyWidget {
                kind: S::KIND,
                title: title.to_string(),
            });
        }
        debug!(kind = %S::KIND, title, total_units, "widget registered");
        self.widgets.insert(title.to_string(), S::create(total_units));
        Ok(Loaded::Created)
    }

    pub fn get(&self, title: &str) -> Result<&S, RegistryError> {
        self.widgets.get(title).ok_or_else(|| missing::<S>(title))
    }

    pub fn get_mut(&mut self, title: &str) -> Result<&mut S, RegistryError> {
        self.widgets.get_mut(title).ok_or_else(|| missing::<S>(title))
    }

    pub fn contains(&self, title: &str) -> bool {
        self.widgets.contains_key(title)
    }

    /// Drops every widget, including fired milestones. Future interactions
    /// after a re-load will fire their milestones again.
    pub fn clear(&mut self) {
        debug!(kind = %S::KIND, dropped = self.widgets.len(), "widget registry cleared");
        self.widgets.clear();
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &S)> {
        self.widgets.iter().map(|(title, state)| (title.as_str(), state))
    }

    /// True when any registered widget has fired its complete-view milestone.
    pub fn any_full_view(&self) -> bool {
        self.widgets.values().any(WidgetState::full_view_fired)
    }
}

fn missing<S: WidgetState>(title: &str) -> RegistryError {
    RegistryError::MissingState {
        kind: S::KIND,
        title: title.to_string(),
    }
}
