//! Visual asset descriptors.
//!
//! An LLM content response may carry a `visualAssets` array describing
//! charts and timelines for the front end to render. The serde layout
//! mirrors the JSON contract the prompts ask for:
//!
//! ```json
//! { "type": "implicit_plotter", "data": "y=x^2; y=sin(x)" }
//! { "type": "hybrid_timeline", "data": [
//!     { "type": "period", "name": "Tang", "startStr": "618", "endStr": "907" },
//!     { "type": "event", "name": "An Lushan Rebellion", "dateStr": "755" }
//! ] }
//! { "type": "bar_chart", "data": "Apples: 3\nPears: 5" }
//! ```

use serde::{Deserialize, Serialize};

/// One visual aid. The shape of `data` is fixed by the kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VisualAsset {
    /// Equation graph. `data` holds one or more plain-text equations
    /// separated by semicolons.
    ImplicitPlotter { data: String },

    /// Mixed timeline of periods and point events.
    HybridTimeline {
        data: Vec<TimelineItem>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },

    /// Multi-line `Label: Value` data.
    BarChart { data: String },

    /// Multi-line `Label: Percentage` data.
    PieChart { data: String },

    /// Any kind this build does not know about. Kept so that one odd asset
    /// does not fail the whole response; describers skip it.
    #[serde(other)]
    Unsupported,
}

/// A timeline entry: either a span with both bounds or a single dated event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TimelineItem {
    Period {
        name: String,
        #[serde(rename = "startStr")]
        start: String,
        #[serde(rename = "endStr")]
        end: String,
    },
    Event {
        name: String,
        #[serde(rename = "dateStr")]
        date: String,
    },
}

impl TimelineItem {
    pub fn name(&self) -> &str {
        match self {
            Self::Period { name, .. } | Self::Event { name, .. } => name,
        }
    }
}
