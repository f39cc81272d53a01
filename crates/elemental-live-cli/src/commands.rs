/*
[INPUT]:  Parsed subcommand and a configured client
[OUTPUT]: JSON value describing the operation's result
[POS]:    Command layer - maps subcommands onto client operations
[UPDATE]: When the client gains or changes operations
*/

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use elemental_live_adapter::ElementalClient;
use serde_json::{Value, json};
use tracing::info;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a live event from an XML description
    CreateEvent {
        #[arg(long, value_name = "XML")]
        file: PathBuf,
    },
    /// Delete a live event
    DeleteEvent { id: String },
    /// Start a live event
    StartEvent { id: String },
    /// Stop a live event
    StopEvent { id: String },
    /// Reset a live event
    ResetEvent { id: String },
    /// Show destinations and status of a live event
    DescribeEvent { id: String },
    /// Report whether a live event can be deleted now
    CanDelete { id: String },
    /// List device names used by active events
    DevicesInUse,
    /// List input devices with availability
    Devices,
    /// Show one input device with availability
    Device { id: String },
    /// Generate a preview image for an input device
    Preview { input_id: String },
    /// Validate configuration and print it without contacting the appliance
    CheckConfig,
}

/// Run one operation and return its result as JSON
pub async fn execute(client: &ElementalClient, command: &Command) -> Result<Value> {
    let value = match command {
        Command::CreateEvent { file } => {
            let xml = std::fs::read_to_string(file)
                .with_context(|| format!("read event description {}", file.display()))?;
            let event = client.create_event(&xml, None).await.context("create event")?;
            info!(event_id = %event.id, "event created");
            serde_json::to_value(event)?
        }
        Command::DeleteEvent { id } => {
            client.delete_event(id, None).await.context("delete event")?;
            action(id, "deleted")
        }
        Command::StartEvent { id } => {
            client.start_event(id, None).await.context("start event")?;
            action(id, "started")
        }
        Command::StopEvent { id } => {
            client.stop_event(id, None).await.context("stop event")?;
            action(id, "stopped")
        }
        Command::ResetEvent { id } => {
            client.reset_event(id, None).await.context("reset event")?;
            action(id, "reset")
        }
        Command::DescribeEvent { id } => {
            let status = client
                .describe_event(id, None)
                .await
                .context("describe event")?;
            serde_json::to_value(status)?
        }
        Command::CanDelete { id } => {
            let can_delete = client
                .event_can_delete(id, None)
                .await
                .context("check event status")?;
            json!({ "id": id, "can_delete": can_delete })
        }
        Command::DevicesInUse => {
            let in_use = client
                .find_devices_in_use(None)
                .await
                .context("list devices in use")?;
            serde_json::to_value(in_use)?
        }
        Command::Devices => {
            let devices = client
                .get_input_devices(None)
                .await
                .context("list input devices")?;
            serde_json::to_value(devices)?
        }
        Command::Device { id } => {
            let device = client
                .get_input_device_by_id(id, None)
                .await
                .context("get input device")?;
            serde_json::to_value(device)?
        }
        Command::Preview { input_id } => {
            let preview = client
                .generate_preview(input_id, None)
                .await
                .context("generate preview")?;
            serde_json::to_value(preview)?
        }
        Command::CheckConfig => {
            bail!("check-config does not contact the appliance")
        }
    };
    Ok(value)
}

fn action(id: &str, outcome: &str) -> Value {
    json!({ "id": id, "result": outcome })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn xml(body: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/xml")
    }

    #[tokio::test]
    async fn test_describe_event_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/live_events/5"))
            .respond_with(xml(
                "<live_event><destination><uri>rtmp://a/1</uri></destination>\
                 <destination><uri>rtmp://b/1</uri></destination>\
                 <status>postprocessing</status></live_event>",
            ))
            .mount(&server)
            .await;

        let client = ElementalClient::new(&server.uri()).expect("client init");
        let value = assert_ok!(
            execute(&client, &Command::DescribeEvent { id: "5".to_string() }).await
        );
        assert_eq!(
            value,
            json!({
                "origin_url": "rtmp://a/1",
                "backup_url": "rtmp://b/1",
                "status": "postprocessing",
            })
        );
    }

    #[tokio::test]
    async fn test_can_delete_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/live_events/5"))
            .respond_with(xml(
                "<live_event><destination><uri>rtmp://a/1</uri></destination><status>stopped</status></live_event>",
            ))
            .mount(&server)
            .await;

        let client = ElementalClient::new(&server.uri()).expect("client init");
        let value = assert_ok!(
            execute(&client, &Command::CanDelete { id: "5".to_string() }).await
        );
        assert_eq!(value, json!({ "id": "5", "can_delete": true }));
    }

    #[tokio::test]
    async fn test_devices_in_use_json_is_sorted_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/live_events"))
            .and(query_param("filter", "active"))
            .respond_with(xml(
                "<live_event_list><live_event><device_name>B</device_name></live_event>\
                 <live_event><device_name>A</device_name></live_event></live_event_list>",
            ))
            .mount(&server)
            .await;

        let client = ElementalClient::new(&server.uri()).expect("client init");
        let value = assert_ok!(execute(&client, &Command::DevicesInUse).await);
        assert_eq!(value, json!(["A", "B"]));
    }

    #[tokio::test]
    async fn test_start_event_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/live_events/9/start"))
            .respond_with(xml("<live_event><id>9</id></live_event>"))
            .expect(1)
            .mount(&server)
            .await;

        let client = ElementalClient::new(&server.uri()).expect("client init");
        let value = assert_ok!(
            execute(&client, &Command::StartEvent { id: "9".to_string() }).await
        );
        assert_eq!(value, json!({ "id": "9", "result": "started" }));
    }

    #[tokio::test]
    async fn test_create_event_missing_file() {
        let client = ElementalClient::new("http://127.0.0.1:1").expect("client init");
        let err = assert_err!(
            execute(
                &client,
                &Command::CreateEvent {
                    file: PathBuf::from("/nonexistent/event.xml"),
                },
            )
            .await
        );
        assert!(err.to_string().contains("read event description"));
    }

    #[tokio::test]
    async fn test_check_config_is_not_an_appliance_operation() {
        let server = MockServer::start().await;
        let client = ElementalClient::new(&server.uri()).expect("client init");
        let err = assert_err!(execute(&client, &Command::CheckConfig).await);
        assert!(err.to_string().contains("check-config"));

        let requests = server.received_requests().await.expect("recording enabled");
        assert!(requests.is_empty());
    }
}
