/*
[INPUT]:  Appliance URL (and optional credentials) from the environment
[OUTPUT]: Input devices with availability, preview URL of the first free one
[POS]:    Examples - device queries
[UPDATE]: When device endpoints change
*/

use elemental_live_adapter::*;

/// Example: List input devices and preview the first available one
///
/// ELEMENTAL_SERVER_URL=http://elemental.local cargo run --example device_availability_example
#[tokio::main]
async fn main() {
    println!("=== Elemental Live Device Example ===\n");

    let server_url = std::env::var("ELEMENTAL_SERVER_URL")
        .unwrap_or_else(|_| "http://localhost".to_string());
    let client = match (std::env::var("ELEMENTAL_USER"), std::env::var("ELEMENTAL_API_KEY")) {
        (Ok(user), Ok(api_key)) => ElementalClient::with_credentials(&server_url, &user, &api_key),
        _ => ElementalClient::new(&server_url),
    };
    let client = match client {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ HTTP client created for {}\n", client.server_url());

    let devices = match client.get_input_devices(None).await {
        Ok(devices) => devices,
        Err(e) => {
            println!("✗ Error: {}", e);
            return;
        }
    };
    for device in &devices {
        let marker = if device.availability { "free" } else { "in use" };
        println!("  [{}] {} ({}) - {}", device.id, device.device_name, device.device_type, marker);
    }

    if let Some(free) = devices.iter().find(|d| d.availability) {
        println!("\nGenerating preview for device {}...", free.id);
        match client.generate_preview(&free.id, None).await {
            Ok(preview) => println!("✓ Preview: {}", preview.preview_url),
            Err(e) => println!("✗ Error: {}", e),
        }
    }

    println!("\n✓ Device example complete");
}
