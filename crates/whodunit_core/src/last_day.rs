//! Victim's last day types.

use serde::{Deserialize, Serialize};

/// One event on the victim's last day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineEvent {
    /// Short time label ("09:00", "late evening")
    pub time: String,
    /// Where it happened
    pub location: String,
    /// Cast members (and possibly the victim) involved
    pub participants: Vec<String>,
    /// What happened
    pub description: String,
    /// Whether the event should raise eyebrows
    pub suspicious: bool,
}

/// Chronological reconstruction of the victim's last day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LastDay {
    /// Two to four sentence summary
    pub overview: String,
    /// Events in order
    pub timeline: Vec<TimelineEvent>,
    /// Model reply kept when the reconstruction was replaced by the fallback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_model_output: Option<String>,
}
