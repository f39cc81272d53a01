/*
[INPUT]:  Decoded XML and literal responses
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::enums::EventState;

/// Identifier of a newly created live event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventId {
    pub id: String,
}

/// Output destinations and lifecycle state of a live event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStatus {
    pub origin_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_url: Option<String>,
    pub status: EventState,
}

/// Input capture device, with availability derived from active events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub device_name: String,
    #[serde(default)]
    pub device_number: String,
    #[serde(default)]
    pub device_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub channel_type: String,
    #[serde(default)]
    pub quad: String,
    pub availability: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewUrl {
    pub preview_url: String,
}
