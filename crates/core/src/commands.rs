use std::fmt;

use serde::{Deserialize, Serialize};

use crate::keys;

/// Session expiry the firmware expects on a cook-start; the device wants
/// an explicit end time rather than running indefinitely.
pub const COOK_SESSION_SECS: u64 = 86_400;

/// Grill mode runs the fan flat out for ten minutes.
pub const GRILL_SESSION_SECS: u64 = 600;

// Control vocabulary for the cook endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum Command {
    StartCook {
        target_pit_temp: u16,
        target_food_temp: u16,
        food_probe: u8, // 1..=3, 0 when unused
    },
    StopCook,
    StartGrill,
    StopGrill,
}

impl Command {
    /// Flat parameter set for the `cook` endpoint, wire names preserved.
    ///
    /// `now` is Unix epoch seconds at issue time; session end times are
    /// derived from it. Encoding never fails on well-formed input.
    pub fn params(&self, now: u64) -> Vec<(&'static str, String)> {
        match *self {
            Command::StartCook {
                target_pit_temp,
                target_food_temp,
                food_probe,
            } => vec![
                (keys::COOK_ACTIVE, "1".to_string()),
                (keys::COOK_ID, String::new()),
                (keys::TARGET_PIT_TEMP, target_pit_temp.to_string()),
                (keys::TARGET_FOOD_TEMP, target_food_temp.to_string()),
                (keys::FOOD_PROBE, food_probe.to_string()),
                (keys::CURRENT_TIME, now.to_string()),
                (keys::COOK_END_TIME, (now + COOK_SESSION_SECS).to_string()),
                (keys::FIRMWARE_RESERVED, "0".to_string()),
            ],
            Command::StopCook => vec![
                (keys::COOK_ACTIVE, "0".to_string()),
                (keys::COOK_ID, String::new()),
                (keys::TARGET_PIT_TEMP, "0".to_string()),
                (keys::TARGET_FOOD_TEMP, "0".to_string()),
                (keys::FOOD_PROBE, "0".to_string()),
                (keys::CURRENT_TIME, now.to_string()),
                (keys::COOK_END_TIME, "0".to_string()),
            ],
            Command::StartGrill => vec![
                (keys::GRILL_ACTIVE, "1".to_string()),
                (keys::GRILL_END_TIME, (now + GRILL_SESSION_SECS).to_string()),
                (keys::CURRENT_TIME, now.to_string()),
            ],
            Command::StopGrill => vec![
                (keys::GRILL_ACTIVE, "0".to_string()),
                (keys::GRILL_END_TIME, "0".to_string()),
                (keys::CURRENT_TIME, now.to_string()),
            ],
        }
    }
}

/// Wi-Fi credentials for reprovisioning the device.
///
/// Write-only: the device never reports these back in a decodable form.
#[derive(Clone, PartialEq, Eq)]
pub struct NetworkCredentials {
    pub ssid: String,
    pub username: String,
    pub password: String,
}

impl NetworkCredentials {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            (keys::NET_SSID, self.ssid.clone()),
            (keys::NET_USERNAME, self.username.clone()),
            (keys::NET_PASSWORD, self.password.clone()),
        ]
    }
}

impl fmt::Debug for NetworkCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkCredentials")
            .field("ssid", &self.ssid)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: u64 = 1_700_000_000;

    fn value<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn start_cook_carries_targets_and_session_expiry() {
        let command = Command::StartCook {
            target_pit_temp: 225,
            target_food_temp: 165,
            food_probe: 1,
        };
        let params = command.params(NOW);

        assert_eq!(value(&params, keys::COOK_ACTIVE), Some("1"));
        assert_eq!(value(&params, keys::COOK_ID), Some(""));
        assert_eq!(value(&params, keys::TARGET_PIT_TEMP), Some("225"));
        assert_eq!(value(&params, keys::TARGET_FOOD_TEMP), Some("165"));
        assert_eq!(value(&params, keys::FOOD_PROBE), Some("1"));
        assert_eq!(
            value(&params, keys::CURRENT_TIME),
            Some(NOW.to_string().as_str())
        );
        assert_eq!(
            value(&params, keys::COOK_END_TIME),
            Some((NOW + COOK_SESSION_SECS).to_string().as_str())
        );
        assert_eq!(value(&params, keys::FIRMWARE_RESERVED), Some("0"));
    }

    #[test]
    fn stop_cook_zeroes_every_session_field() {
        let params = Command::StopCook.params(NOW);

        assert_eq!(value(&params, keys::COOK_ACTIVE), Some("0"));
        assert_eq!(value(&params, keys::TARGET_PIT_TEMP), Some("0"));
        assert_eq!(value(&params, keys::TARGET_FOOD_TEMP), Some("0"));
        assert_eq!(value(&params, keys::FOOD_PROBE), Some("0"));
        assert_eq!(value(&params, keys::COOK_END_TIME), Some("0"));
        assert_eq!(
            value(&params, keys::CURRENT_TIME),
            Some(NOW.to_string().as_str())
        );
    }

    #[test]
    fn grill_session_expires_after_ten_minutes() {
        let params = Command::StartGrill.params(NOW);

        assert_eq!(value(&params, keys::GRILL_ACTIVE), Some("1"));
        assert_eq!(
            value(&params, keys::GRILL_END_TIME),
            Some((NOW + GRILL_SESSION_SECS).to_string().as_str())
        );
        // Grill commands carry no cook fields.
        assert_eq!(value(&params, keys::TARGET_PIT_TEMP), None);
        assert_eq!(value(&params, keys::COOK_ACTIVE), None);
    }

    #[test]
    fn stop_grill_zeroes_the_end_time() {
        let params = Command::StopGrill.params(NOW);

        assert_eq!(value(&params, keys::GRILL_ACTIVE), Some("0"));
        assert_eq!(value(&params, keys::GRILL_END_TIME), Some("0"));
    }

    #[test]
    fn credentials_debug_redacts_the_password() {
        let credentials = NetworkCredentials {
            ssid: "kitchen".to_string(),
            username: "pit".to_string(),
            password: "hunter2".to_string(),
        };
        let printed = format!("{credentials:?}");
        assert!(printed.contains("kitchen"));
        assert!(!printed.contains("hunter2"));
    }
}
