// Wire key names matching the iKamand cgi-bin firmware API. The device
// speaks a flat form-urlencoded format with short cryptic keys; these
// strings must match the firmware bit-for-bit.

// Keys present in both directions
pub const COOK_ACTIVE: &str = "acs";
pub const GRILL_ACTIVE: &str = "ag";
pub const TARGET_PIT_TEMP: &str = "tpt";
pub const TARGET_FOOD_TEMP: &str = "tft";

// Command-only keys
pub const COOK_ID: &str = "csid";
pub const FOOD_PROBE: &str = "p";
pub const CURRENT_TIME: &str = "ct";
pub const COOK_END_TIME: &str = "sce";
pub const GRILL_END_TIME: &str = "sge";

/// Sent as `0` on cook-start by clients of later firmware revisions.
/// Meaning unknown; observed always-zero in captures.
pub const FIRMWARE_RESERVED: &str = "as";

// Status-only keys
pub const PIT_PROBE: &str = "pt";
pub const FOOD_PROBE_1: &str = "t1";
pub const FOOD_PROBE_2: &str = "t2";
pub const FOOD_PROBE_3: &str = "t3";
pub const FAN_DUTY: &str = "dc";

// Wi-Fi provisioning keys for the netset endpoint
pub const NET_SSID: &str = "ssid";
pub const NET_USERNAME: &str = "username";
pub const NET_PASSWORD: &str = "password";
