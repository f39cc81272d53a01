/*
[INPUT]:  Status labels reported by the appliance
[OUTPUT]: Typed event lifecycle state with serde support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When the appliance reports new lifecycle labels
*/

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle label of a live event, as reported by the appliance.
///
/// Labels this crate does not know are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventState {
    Pending,
    Running,
    Preprocessing,
    Postprocessing,
    Stopped,
    Complete,
    Cancelled,
    Error,
    Other(String),
}

impl EventState {
    pub fn as_str(&self) -> &str {
        match self {
            EventState::Pending => "pending",
            EventState::Running => "running",
            EventState::Preprocessing => "preprocessing",
            EventState::Postprocessing => "postprocessing",
            EventState::Stopped => "stopped",
            EventState::Complete => "complete",
            EventState::Cancelled => "cancelled",
            EventState::Error => "error",
            EventState::Other(label) => label,
        }
    }

    /// The appliance refuses to delete events in these states
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            EventState::Pending
                | EventState::Running
                | EventState::Preprocessing
                | EventState::Postprocessing
        )
    }
}

impl From<&str> for EventState {
    fn from(label: &str) -> Self {
        match label {
            "pending" => EventState::Pending,
            "running" => EventState::Running,
            "preprocessing" => EventState::Preprocessing,
            "postprocessing" => EventState::Postprocessing,
            "stopped" => EventState::Stopped,
            "complete" => EventState::Complete,
            "cancelled" => EventState::Cancelled,
            "error" => EventState::Error,
            other => EventState::Other(other.to_string()),
        }
    }
}

impl From<String> for EventState {
    fn from(label: String) -> Self {
        EventState::from(label.as_str())
    }
}

impl From<EventState> for String {
    fn from(state: EventState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for EventState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pending", true)]
    #[case("running", true)]
    #[case("preprocessing", true)]
    #[case("postprocessing", true)]
    #[case("stopped", false)]
    #[case("complete", false)]
    #[case("cancelled", false)]
    #[case("error", false)]
    #[case("archived", false)]
    fn test_is_active(#[case] label: &str, #[case] active: bool) {
        assert_eq!(EventState::from(label).is_active(), active);
    }

    #[test]
    fn test_unknown_label_is_preserved() {
        let state = EventState::from("archived");
        assert_eq!(state, EventState::Other("archived".to_string()));
        assert_eq!(state.to_string(), "archived");
    }

    #[test]
    fn test_serde_uses_wire_label() {
        let json = serde_json::to_string(&EventState::Postprocessing).unwrap();
        assert_eq!(json, r#""postprocessing""#);
        let state: EventState = serde_json::from_str(r#""running""#).unwrap();
        assert_eq!(state, EventState::Running);
    }
}
