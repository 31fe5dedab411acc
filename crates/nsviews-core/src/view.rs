//! View descriptors understood by the in-process [`StatsProvider`].
//!
//! The registry itself never looks inside a view; these types exist so the
//! provider (and the configuration layer) have something concrete to work with.
//!
//! [`StatsProvider`]: crate::provider::StatsProvider

use serde::{Deserialize, Serialize};

/// How recorded measurements are folded into a view's data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Aggregation {
    Count,
    Sum,
    LastValue,
    /// Histogram with explicit upper bounds (strictly increasing).
    Distribution { bounds: Vec<f64> },
}

impl Aggregation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregation::Count => "count",
            Aggregation::Sum => "sum",
            Aggregation::LastValue => "last_value",
            Aggregation::Distribution { .. } => "distribution",
        }
    }
}

/// Describes what a view measures and how it aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewDescriptor {
    /// Unique view name within a provider (e.g., "http/latency").
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Name of the measure the view reads from.
    pub measure: String,
    pub aggregation: Aggregation,
    /// Tag keys the view breaks its data down by.
    #[serde(default)]
    pub tag_keys: Vec<String>,
}

impl ViewDescriptor {
    pub fn new(name: impl Into<String>, measure: impl Into<String>, aggregation: Aggregation) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            measure: measure.into(),
            aggregation,
            tag_keys: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tag_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_keys = keys.into_iter().map(Into::into).collect();
        self
    }
}
