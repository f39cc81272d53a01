/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for elemental-live-adapter tests

#![allow(dead_code)]

use elemental_live_adapter::ElementalClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USER: &str = "FAKE";
pub const API_KEY: &str = "FAKE";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn unauthenticated_client(server: &MockServer) -> ElementalClient {
    ElementalClient::new(&server.uri()).expect("client init")
}

pub fn authenticated_client(server: &MockServer) -> ElementalClient {
    ElementalClient::with_credentials(&server.uri(), USER, API_KEY).expect("client init")
}

pub fn xml_response(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(body.to_string(), "application/xml")
}

/// Mount the active event list used for availability checks
pub async fn mount_active_events(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/live_events"))
        .and(query_param("filter", "active"))
        .respond_with(xml_response(200, body))
        .mount(server)
        .await;
}

pub const CREATE_RESPONSE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<live_event href="/live_events/80" product="Elemental Live" version="2.14.0.312121">
  <id>80</id>
  <name>qvbr_mediastore</name>
  <input>
    <id>165</id>
    <device_input>
      <id>11</id>
      <device_type>AJA</device_type>
      <device_number>0</device_number>
      <device_name>HD-SDI 1</device_name>
      <channel>1</channel>
    </device_input>
  </input>
  <status>pending</status>
</live_event>"#;

pub const DESCRIBE_WITH_BACKUP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<live_event href="/live_events/80">
  <id>80</id>
  <output_group>
    <apple_live_group_settings>
      <destination>
        <uri>https://origin.example.com/master/index.m3u8</uri>
      </destination>
    </apple_live_group_settings>
  </output_group>
  <output_group>
    <apple_live_group_settings>
      <destination>
        <uri>https://origin.example.com/backup/index.m3u8</uri>
      </destination>
    </apple_live_group_settings>
  </output_group>
  <status>running</status>
</live_event>"#;

pub const DESCRIBE_ORIGIN_ONLY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<live_event href="/live_events/81">
  <id>81</id>
  <output_group>
    <destination>
      <uri>https://origin.example.com/master/index.m3u8</uri>
    </destination>
  </output_group>
  <status>stopped</status>
</live_event>"#;

pub const ACTIVE_EVENTS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<live_event_list>
  <live_event href="/live_events/80">
    <id>80</id>
    <input>
      <device_input>
        <device_name>HD-SDI 1</device_name>
      </device_input>
    </input>
    <status>running</status>
  </live_event>
  <live_event href="/live_events/82">
    <id>82</id>
    <input>
      <device_input>
        <device_name>HD-SDI 3</device_name>
      </device_input>
    </input>
    <input>
      <device_input>
        <device_name>HD-SDI 1</device_name>
      </device_input>
    </input>
    <status>preprocessing</status>
  </live_event>
</live_event_list>"#;

pub const NO_ACTIVE_EVENTS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<live_event_list/>"#;

/// Devices in deliberately unsorted id order
pub const DEVICE_LIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<device_list>
  <device href="/devices/10">
    <id>10</id>
    <name/>
    <device_name>HD-SDI 4</device_name>
    <device_number>3</device_number>
    <device_type>AJA</device_type>
    <description>AJA Capture Card</description>
    <channel>4</channel>
    <channel_type>HD-SDI</channel_type>
    <quad>false</quad>
  </device>
  <device href="/devices/2">
    <id>2</id>
    <name/>
    <device_name>HD-SDI 1</device_name>
    <device_number>0</device_number>
    <device_type>AJA</device_type>
    <description>AJA Capture Card</description>
    <channel>1</channel>
    <channel_type>HD-SDI</channel_type>
    <quad>false</quad>
  </device>
  <device href="/devices/3">
    <id>3</id>
    <name>Studio B</name>
    <device_name>HD-SDI 3</device_name>
    <device_number>2</device_number>
    <device_type>AJA</device_type>
    <description>AJA Capture Card</description>
    <channel>3</channel>
    <channel_type>HD-SDI</channel_type>
    <quad>false</quad>
  </device>
</device_list>"#;

pub const SINGLE_DEVICE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<device href="/devices/2">
  <id>2</id>
  <name/>
  <device_name>HD-SDI 1</device_name>
  <device_number>0</device_number>
  <device_type>AJA</device_type>
  <description>AJA Capture Card</description>
  <channel>1</channel>
  <channel_type>HD-SDI</channel_type>
  <quad>false</quad>
</device>"#;
