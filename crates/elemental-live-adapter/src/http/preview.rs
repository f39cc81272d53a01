/*
[INPUT]:  Input device id
[OUTPUT]: Thumbnail URL of a freshly generated input preview
[POS]:    HTTP layer - preview generation (form request, literal response)
[UPDATE]: When the preview form or response payload changes
*/

use std::time::Duration;

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use serde_json::Value;
use tracing::warn;

use crate::http::{ElementalClient, ElementalError, Result};
use crate::parse::parse_literal;
use crate::types::PreviewUrl;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

impl ElementalClient {
    /// Ask the appliance to grab a preview frame from an input device
    ///
    /// POST /inputs/generate_preview
    pub async fn generate_preview(
        &self,
        input_id: &str,
        timeout: Option<Duration>,
    ) -> Result<PreviewUrl> {
        let url = self.endpoint_url("/inputs/generate_preview")?;
        let mut headers = self.headers_for(&url)?;
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));

        let accepted = self
            .send(
                Method::POST,
                url,
                headers,
                Some(preview_form(input_id)),
                timeout,
            )
            .await?;

        let payload = parse_literal(&accepted.body).map_err(|e| {
            ElementalError::unexpected(format!("unreadable preview response ({e})"))
        })?;

        if payload.get("type").and_then(Value::as_str) == Some("error") {
            warn!(input_id, "appliance refused to generate preview");
            return Err(ElementalError::OperationFailed {
                status: accepted.status,
                body: accepted.body,
            });
        }

        let image_id = match payload.get("preview_image_id") {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => {
                return Err(ElementalError::unexpected(
                    "preview response without preview_image_id",
                ));
            }
        };

        Ok(PreviewUrl {
            preview_url: format!(
                "{}/images/thumbs/p_{image_id}_job_0.jpg",
                self.server_url()
            ),
        })
    }
}

/// Form body describing a throwaway single-input event for `input_id`.
///
/// Brackets are left unencoded; the appliance accepts the raw form.
fn preview_form(input_id: &str) -> String {
    [
        "input_key=0".to_string(),
        "live_event[inputs_attributes][0][source_type]=DeviceInput".to_string(),
        "live_event[inputs_attributes][0][device_input_attributes][sdi_settings_attributes][input_format]=Auto".to_string(),
        format!("live_event[inputs_attributes][0][device_input_attributes][device_id]={input_id}"),
    ]
    .join("&")
}
