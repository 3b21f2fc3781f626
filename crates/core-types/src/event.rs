//! Event descriptor handed to the emitter and the positional hit it becomes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Marker key merged into the trailing field object of purely informational events.
pub const NON_INTERACTION_KEY: &str = "nonInteraction";

/// A semantic analytics event, before it is flattened for the transport.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub category: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
    #[serde(default)]
    pub non_interaction: bool,
}

impl AnalyticsEvent {
    pub fn new(category: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            action: action.into(),
            ..Self::default()
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn value(mut self, value: u64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Excludes the event from engagement and bounce-rate computations downstream.
    pub fn non_interaction(mut self) -> Self {
        self.non_interaction = true;
        self
    }

    /// Trailing field object for the hit: custom params plus the non-interaction marker.
    pub fn fields(&self) -> Option<Map<String, Value>> {
        let mut fields = self.params.clone();
        if self.non_interaction {
            fields.insert(NON_INTERACTION_KEY.to_string(), Value::from(1));
        }
        (!fields.is_empty()).then_some(fields)
    }
}

/// One positional argument of a transport call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HitArg {
    Number(u64),
    Text(String),
    Fields(Map<String, Value>),
}

impl HitArg {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HitArg::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<u64> {
        match self {
            HitArg::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_fields(&self) -> Option<&Map<String, Value>> {
        match self {
            HitArg::Fields(fields) => Some(fields),
            _ => None,
        }
    }
}

impl From<&str> for HitArg {
    fn from(value: &str) -> Self {
        HitArg::Text(value.to_string())
    }
}

impl From<String> for HitArg {
    fn from(value: String) -> Self {
        HitArg::Text(value)
    }
}

impl From<u64> for HitArg {
    fn from(value: u64) -> Self {
        HitArg::Number(value)
    }
}

impl From<Map<String, Value>> for HitArg {
    fn from(value: Map<String, Value>) -> Self {
        HitArg::Fields(value)
    }
}

/// Exact positional call made to the analytics sink. The first argument is
/// always the command (`mobifyTracker.send`, `mobifyTracker.ecommerce:addItem`, ..).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hit {
    args: Vec<HitArg>,
}

impl Hit {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            args: vec![HitArg::Text(command.into())],
        }
    }

    pub fn arg(mut self, arg: impl Into<HitArg>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn push(&mut self, arg: impl Into<HitArg>) {
        self.args.push(arg.into());
    }

    pub fn command(&self) -> &str {
        self.args.first().and_then(HitArg::as_str).unwrap_or_default()
    }

    pub fn args(&self) -> &[HitArg] {
        &self.args
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Positional argument, counting the command as position 0.
    pub fn get(&self, position: usize) -> Option<&HitArg> {
        self.args.get(position)
    }

    /// Event category for `send event` hits.
    pub fn category(&self) -> Option<&str> {
        self.get(2).and_then(HitArg::as_str)
    }

    /// Event action for `send event` hits.
    pub fn action(&self) -> Option<&str> {
        self.get(3).and_then(HitArg::as_str)
    }

    pub fn label(&self) -> Option<&str> {
        self.get(4).and_then(HitArg::as_str)
    }

    /// First numeric argument after the action, wherever the label omission left it.
    pub fn value(&self) -> Option<u64> {
        self.args.iter().skip(4).find_map(HitArg::as_number)
    }

    /// The trailing field object, when the hit carries one.
    pub fn fields(&self) -> Option<&Map<String, Value>> {
        self.args.last().and_then(HitArg::as_fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_merge_non_interaction_marker() {
        let event = AnalyticsEvent::new("Carousel - PDP", "Load")
            .param("metric1", 3)
            .non_interaction();
        let fields = event.fields().unwrap();
        assert_eq!(fields.get("metric1"), Some(&Value::from(3)));
        assert_eq!(fields.get(NON_INTERACTION_KEY), Some(&Value::from(1)));
    }

    #[test]
    fn fields_absent_without_params() {
        assert!(AnalyticsEvent::new("Search", "toggle").fields().is_none());
    }

    #[test]
    fn hit_serializes_as_flat_array() {
        let hit = Hit::new("mobifyTracker.send")
            .arg("event")
            .arg("Cart")
            .arg("Add Item")
            .arg(2u64);
        let json = serde_json::to_string(&hit).unwrap();
        assert_eq!(json, r#"["mobifyTracker.send","event","Cart","Add Item",2]"#);
        assert_eq!(hit.command(), "mobifyTracker.send");
        assert_eq!(hit.value(), Some(2));
        assert_eq!(hit.label(), None);
    }
}
