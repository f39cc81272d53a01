/*
[INPUT]:  Device ids and the active event list
[OUTPUT]: Input devices annotated with availability
[POS]:    HTTP layer - device endpoints
[UPDATE]: When device fields or the in-use rule change
*/

use std::collections::BTreeSet;
use std::time::Duration;

use reqwest::Method;
use tracing::debug;

use crate::http::{ElementalClient, ElementalError, Result};
use crate::parse::XmlNode;
use crate::types::Device;

impl ElementalClient {
    /// Names of devices referenced by any active event
    ///
    /// GET /live_events?filter=active
    pub async fn find_devices_in_use(&self, timeout: Option<Duration>) -> Result<BTreeSet<String>> {
        let accepted = self
            .send_xml(Method::GET, "/live_events?filter=active", None, timeout)
            .await?;
        let root = XmlNode::parse(&accepted.body)?;
        let in_use: BTreeSet<String> = root
            .descendants("device_name")
            .into_iter()
            .filter_map(XmlNode::text)
            .map(str::to_string)
            .collect();
        debug!(count = in_use.len(), "devices in use");
        Ok(in_use)
    }

    /// List all input devices, ascending by numeric id
    ///
    /// GET /devices
    pub async fn get_input_devices(&self, timeout: Option<Duration>) -> Result<Vec<Device>> {
        let accepted = self
            .send_xml(Method::GET, "/devices", None, timeout)
            .await?;
        let root = XmlNode::parse(&accepted.body)?;
        let in_use = self.find_devices_in_use(timeout).await?;

        let mut devices = Vec::new();
        for node in root.children_named("device") {
            let device = device_from_node(node, &in_use)?;
            devices.push((numeric_id(&device.id)?, device));
        }
        devices.sort_by_key(|(id, _)| *id);
        Ok(devices.into_iter().map(|(_, device)| device).collect())
    }

    /// GET /devices/{id}
    pub async fn get_input_device_by_id(
        &self,
        device_id: &str,
        timeout: Option<Duration>,
    ) -> Result<Device> {
        let endpoint = format!("/devices/{device_id}");
        let accepted = self
            .send_xml(Method::GET, &endpoint, None, timeout)
            .await?;
        let root = XmlNode::parse(&accepted.body)?;
        let in_use = self.find_devices_in_use(timeout).await?;
        device_from_node(&root, &in_use)
    }
}

fn device_from_node(node: &XmlNode, in_use: &BTreeSet<String>) -> Result<Device> {
    let required = |field: &str| {
        node.child_text(field)
            .map(str::to_string)
            .ok_or_else(|| ElementalError::unexpected(format!("<device> without <{field}>")))
    };
    let optional = |field: &str| node.child_text(field).map(str::to_string);
    let plain = |field: &str| optional(field).unwrap_or_default();

    let id = required("id")?;
    let device_name = required("device_name")?;
    let availability = !in_use.contains(&device_name);

    Ok(Device {
        id,
        name: optional("name"),
        device_name,
        device_number: plain("device_number"),
        device_type: plain("device_type"),
        description: optional("description"),
        channel: plain("channel"),
        channel_type: plain("channel_type"),
        quad: plain("quad"),
        availability,
    })
}

fn numeric_id(id: &str) -> Result<u64> {
    id.trim()
        .parse()
        .map_err(|_| ElementalError::unexpected(format!("device id '{id}' is not numeric")))
}
