/*
[INPUT]:  Event description XML and event ids
[OUTPUT]: Created event ids, event status, lifecycle actions
[POS]:    HTTP layer - live event endpoints
[UPDATE]: When adding event actions or changing response parsing
*/

use std::time::Duration;

use reqwest::Method;

use crate::http::{ElementalClient, ElementalError, Result};
use crate::parse::XmlNode;
use crate::types::{EventId, EventState, EventStatus};

impl ElementalClient {
    /// Create a live event from a full event description
    ///
    /// POST /live_events
    pub async fn create_event(&self, event_xml: &str, timeout: Option<Duration>) -> Result<EventId> {
        let accepted = self
            .send_xml(
                Method::POST,
                "/live_events",
                Some(event_xml.to_string()),
                timeout,
            )
            .await?;
        parse_event_id(&accepted.body)
    }

    /// DELETE /live_events/{id}
    pub async fn delete_event(&self, event_id: &str, timeout: Option<Duration>) -> Result<()> {
        let endpoint = format!("/live_events/{event_id}");
        self.send_xml(Method::DELETE, &endpoint, None, timeout)
            .await?;
        Ok(())
    }

    /// POST /live_events/{id}/start
    pub async fn start_event(&self, event_id: &str, timeout: Option<Duration>) -> Result<()> {
        let endpoint = format!("/live_events/{event_id}/start");
        self.send_xml(
            Method::POST,
            &endpoint,
            Some("<start></start>".to_string()),
            timeout,
        )
        .await?;
        Ok(())
    }

    /// POST /live_events/{id}/stop
    pub async fn stop_event(&self, event_id: &str, timeout: Option<Duration>) -> Result<()> {
        let endpoint = format!("/live_events/{event_id}/stop");
        self.send_xml(
            Method::POST,
            &endpoint,
            Some("<stop></stop>".to_string()),
            timeout,
        )
        .await?;
        Ok(())
    }

    /// POST /live_events/{id}/reset
    pub async fn reset_event(&self, event_id: &str, timeout: Option<Duration>) -> Result<()> {
        let endpoint = format!("/live_events/{event_id}/reset");
        self.send_xml(Method::POST, &endpoint, Some(String::new()), timeout)
            .await?;
        Ok(())
    }

    /// Fetch output destinations and status of an event
    ///
    /// GET /live_events/{id}
    pub async fn describe_event(
        &self,
        event_id: &str,
        timeout: Option<Duration>,
    ) -> Result<EventStatus> {
        let endpoint = format!("/live_events/{event_id}");
        let accepted = self
            .send_xml(Method::GET, &endpoint, None, timeout)
            .await?;
        parse_event_status(&accepted.body)
    }

    /// Whether the appliance would accept deleting the event right now
    pub async fn event_can_delete(&self, event_id: &str, timeout: Option<Duration>) -> Result<bool> {
        let described = self.describe_event(event_id, timeout).await?;
        Ok(!described.status.is_active())
    }
}

fn parse_event_id(body: &str) -> Result<EventId> {
    let root = XmlNode::parse(body)?;
    let id = root
        .child_text("id")
        .ok_or_else(|| ElementalError::unexpected("no <id> element in created event"))?;
    Ok(EventId { id: id.to_string() })
}

fn parse_event_status(body: &str) -> Result<EventStatus> {
    let root = XmlNode::parse(body)?;

    let uris: Vec<Option<&str>> = root
        .descendants("destination")
        .into_iter()
        .map(|destination| destination.child_text("uri"))
        .collect();
    let origin_url = match uris.first() {
        Some(Some(uri)) => uri.to_string(),
        Some(None) => return Err(ElementalError::unexpected("first <destination> has no <uri>")),
        None => return Err(ElementalError::unexpected("no <destination> element in event")),
    };
    let backup_url = match uris.get(1) {
        Some(Some(uri)) => Some(uri.to_string()),
        Some(None) => return Err(ElementalError::unexpected("second <destination> has no <uri>")),
        None => None,
    };

    let status = root
        .child_text("status")
        .ok_or_else(|| ElementalError::unexpected("no <status> element in event"))?;

    Ok(EventStatus {
        origin_url,
        backup_url,
        status: EventState::from(status),
    })
}
