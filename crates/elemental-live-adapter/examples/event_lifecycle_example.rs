/*
[INPUT]:  Appliance URL, credentials and an event description XML file
[OUTPUT]: Created, started, described, stopped and deleted live event
[POS]:    Examples - event lifecycle
[UPDATE]: When event endpoints change
*/

use std::time::Duration;

use elemental_live_adapter::*;

/// Example: Drive one live event through its whole lifecycle
///
/// ELEMENTAL_SERVER_URL=http://elemental.local \
/// ELEMENTAL_EVENT_XML=event.xml cargo run --example event_lifecycle_example
#[tokio::main]
async fn main() {
    println!("=== Elemental Live Event Lifecycle Example ===\n");

    let server_url = std::env::var("ELEMENTAL_SERVER_URL")
        .unwrap_or_else(|_| "http://localhost".to_string());
    let xml_path = std::env::var("ELEMENTAL_EVENT_XML").unwrap_or_else(|_| "event.xml".to_string());
    let event_xml = match std::fs::read_to_string(&xml_path) {
        Ok(xml) => xml,
        Err(e) => {
            eprintln!("Failed to read {}: {}", xml_path, e);
            return;
        }
    };

    let credentials = match (std::env::var("ELEMENTAL_USER"), std::env::var("ELEMENTAL_API_KEY")) {
        (Ok(user), Ok(api_key)) => Some(Credentials::new(user, api_key)),
        _ => None,
    };
    let config = ClientConfig {
        timeout: Duration::from_secs(10),
        ..ClientConfig::default()
    };
    let client = match ElementalClient::with_config(&server_url, credentials, config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created (signed: {})\n", client.credentials().is_some());

    let event = match client.create_event(&event_xml, None).await {
        Ok(event) => event,
        Err(e) => {
            println!("✗ Create failed: {}", e);
            return;
        }
    };
    println!("✓ Created event {}", event.id);

    if let Err(e) = client.start_event(&event.id, None).await {
        println!("✗ Start failed: {}", e);
    }

    match client.describe_event(&event.id, None).await {
        Ok(status) => println!(
            "✓ Status: {} origin={} backup={:?}",
            status.status, status.origin_url, status.backup_url
        ),
        Err(e) => println!("✗ Describe failed: {}", e),
    }

    if let Err(e) = client.stop_event(&event.id, None).await {
        println!("✗ Stop failed: {}", e);
    }

    // Stopping is asynchronous on the appliance; the event may still be postprocessing.
    match client.event_can_delete(&event.id, None).await {
        Ok(true) => match client.delete_event(&event.id, None).await {
            Ok(()) => println!("✓ Deleted event {}", event.id),
            Err(e) => println!("✗ Delete failed: {}", e),
        },
        Ok(false) => println!("… Event {} still active, not deleting", event.id),
        Err(e) => println!("✗ Status check failed: {}", e),
    }

    println!("\n✓ Event lifecycle example complete");
}
