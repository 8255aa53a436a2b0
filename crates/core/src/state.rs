use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::keys;

/// Temperature strings the firmware reports for a disconnected probe.
pub const UNAVAILABLE_TEMPS: [&str; 2] = ["-400", "400"];

/// Decoded form payload: key to ordered list of values. The device may
/// repeat a key; the first value is authoritative for every field here.
pub type FormValues = HashMap<String, Vec<String>>;

/// Parse form-urlencoded text into a key/values mapping.
pub fn parse_form(text: &str) -> FormValues {
    let mut form = FormValues::new();
    for (key, value) in form_urlencoded::parse(text.as_bytes()) {
        form.entry(key.into_owned())
            .or_insert_with(Vec::new)
            .push(value.into_owned());
    }
    form
}

/// Serialize flat key/value pairs into a form-urlencoded body.
pub fn encode_params(params: &[(&str, String)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Snapshot of the device's last reported status.
///
/// Replaced wholesale on every successful poll. Probe fields are `None`
/// when the probe is disconnected or the key is missing; the remaining
/// fields fall back to zero/false on missing or malformed values, so
/// decoding never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceState {
    pub cooking: bool,
    pub grilling: bool,
    /// Pit probe temperature, degrees Fahrenheit.
    pub pit_temp: Option<i32>,
    pub probe_1: Option<i32>,
    pub probe_2: Option<i32>,
    pub probe_3: Option<i32>,
    pub target_pit_temp: u16,
    /// Fan duty cycle, percent.
    pub fan_speed: u8,
}

impl DeviceState {
    pub fn decode(text: &str) -> Self {
        Self::from_form(&parse_form(text))
    }

    pub fn from_form(form: &FormValues) -> Self {
        DeviceState {
            cooking: flag(form, keys::COOK_ACTIVE),
            grilling: flag(form, keys::GRILL_ACTIVE),
            pit_temp: probe_temp(form, keys::PIT_PROBE),
            probe_1: probe_temp(form, keys::FOOD_PROBE_1),
            probe_2: probe_temp(form, keys::FOOD_PROBE_2),
            probe_3: probe_temp(form, keys::FOOD_PROBE_3),
            target_pit_temp: number(form, keys::TARGET_PIT_TEMP),
            fan_speed: number(form, keys::FAN_DUTY),
        }
    }
}

fn first<'a>(form: &'a FormValues, key: &str) -> Option<&'a str> {
    form.get(key)
        .and_then(|values| values.first())
        .map(String::as_str)
}

fn flag(form: &FormValues, key: &str) -> bool {
    first(form, key) == Some("1")
}

// A reading equal to either sentinel means "probe not connected" and must
// come out absent, never as the literal number.
fn probe_temp(form: &FormValues, key: &str) -> Option<i32> {
    first(form, key)
        .filter(|value| !UNAVAILABLE_TEMPS.contains(value))
        .and_then(|value| value.parse().ok())
}

fn number<T: FromStr + Default>(form: &FormValues, key: &str) -> T {
    first(form, key)
        .and_then(|value| value.parse().ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_typical_status_payload() {
        let state = DeviceState::decode("acs=1&ag=0&pt=225&t1=152&t2=-400&t3=400&tpt=250&dc=42");
        assert!(state.cooking);
        assert!(!state.grilling);
        assert_eq!(state.pit_temp, Some(225));
        assert_eq!(state.probe_1, Some(152));
        assert_eq!(state.probe_2, None);
        assert_eq!(state.probe_3, None);
        assert_eq!(state.target_pit_temp, 250);
        assert_eq!(state.fan_speed, 42);
    }

    #[test]
    fn sentinel_temps_decode_as_absent() {
        for sentinel in UNAVAILABLE_TEMPS {
            let state = DeviceState::decode(&format!("pt={sentinel}&t1={sentinel}"));
            assert_eq!(state.pit_temp, None);
            assert_eq!(state.probe_1, None);
        }
    }

    #[test]
    fn sentinel_filter_applies_per_probe() {
        let state = DeviceState::decode("pt=150&t1=400&acs=1");
        assert_eq!(state.pit_temp, Some(150));
        assert_eq!(state.probe_1, None);
        assert!(state.cooking);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let state = DeviceState::decode("");
        assert_eq!(state, DeviceState::default());
        assert!(!state.cooking);
        assert_eq!(state.pit_temp, None);
        assert_eq!(state.target_pit_temp, 0);
        assert_eq!(state.fan_speed, 0);
    }

    #[test]
    fn first_value_wins_on_repeated_keys() {
        let state = DeviceState::decode("pt=180&pt=999&dc=10&dc=90");
        assert_eq!(state.pit_temp, Some(180));
        assert_eq!(state.fan_speed, 10);
    }

    #[test]
    fn malformed_numbers_fall_back_to_defaults() {
        let state = DeviceState::decode("pt=warm&tpt=high&dc=full&acs=yes");
        assert_eq!(state.pit_temp, None);
        assert_eq!(state.target_pit_temp, 0);
        assert_eq!(state.fan_speed, 0);
        assert!(!state.cooking);
    }

    #[test]
    fn negative_real_temps_survive_the_filter() {
        let state = DeviceState::decode("pt=-4");
        assert_eq!(state.pit_temp, Some(-4));
    }

    #[test]
    fn parse_form_keeps_repeated_values_in_order() {
        let form = parse_form("n0=home&n0=shed&n1=garage");
        assert_eq!(form["n0"], vec!["home", "shed"]);
        assert_eq!(form["n1"], vec!["garage"]);
    }

    #[test]
    fn encode_params_round_trips_through_parse() {
        let body = encode_params(&[("tpt", "225".to_string()), ("csid", String::new())]);
        assert_eq!(body, "tpt=225&csid=");
        let form = parse_form(&body);
        assert_eq!(form["tpt"], vec!["225"]);
        assert_eq!(form["csid"], vec![""]);
    }
}
