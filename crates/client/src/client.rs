use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use tracing::{debug, info, warn};

use ikamand_core::{
    encode_params, parse_form, Command, DeviceState, FormValues, NetworkCredentials,
};

use crate::config::Config;
use crate::error::ApiError;

// Status codes the firmware uses for an accepted request.
const ACCEPTED_STATUS: [u16; 4] = [200, 201, 202, 203];

const USER_AGENT_NAME: &str = "ikamand";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Blocking client for a single iKamand device.
///
/// Owns the last good status snapshot and a coarse online flag. Every
/// network call updates the flag from that call's own outcome alone; there
/// is no debouncing or retry. Reads keep the previous snapshot on failure,
/// so callers always have the last good data to show (stale-but-available).
///
/// One client per device; for several devices, run independent instances.
pub struct Ikamand {
    http: HttpClient,
    base_url: String,
    state: DeviceState,
    networks: FormValues,
    online: bool,
}

impl Ikamand {
    pub fn new(host: &str) -> Result<Self, ApiError> {
        Self::from_config(&Config::new(host))
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        // The firmware contract wants JSON headers even though every body
        // on this API is form-encoded.
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_NAME));

        let http = HttpClient::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: format!("http://{}/cgi-bin/", config.host),
            state: DeviceState::default(),
            networks: FormValues::default(),
            online: false,
        })
    }

    /// Poll the `data` endpoint and replace the cached snapshot wholesale.
    ///
    /// On failure the previous snapshot stays readable through
    /// [`Ikamand::state`] and the client goes offline.
    pub fn fetch_status(&mut self) -> Result<&DeviceState, ApiError> {
        match self.read_form("data") {
            Ok(form) => {
                self.state = DeviceState::from_form(&form);
                self.online = true;
                Ok(&self.state)
            }
            Err(err) => {
                warn!(%err, "status poll failed, keeping last snapshot");
                self.online = false;
                Err(err)
            }
        }
    }

    pub fn start_cook(
        &mut self,
        target_pit_temp: u16,
        target_food_temp: u16,
        food_probe: u8,
    ) -> Result<(), ApiError> {
        self.send_command(&Command::StartCook {
            target_pit_temp,
            target_food_temp,
            food_probe,
        })
    }

    pub fn stop_cook(&mut self) -> Result<(), ApiError> {
        self.send_command(&Command::StopCook)
    }

    pub fn start_grill(&mut self) -> Result<(), ApiError> {
        self.send_command(&Command::StartGrill)
    }

    pub fn stop_grill(&mut self) -> Result<(), ApiError> {
        self.send_command(&Command::StopGrill)
    }

    /// POST a command to the `cook` endpoint, fire and forget.
    ///
    /// The response body is not inspected; transport success is taken as
    /// acceptance. A single failed attempt is the final outcome, no retry.
    pub fn send_command(&mut self, command: &Command) -> Result<(), ApiError> {
        let body = encode_params(&command.params(unix_now()));
        let url = format!("{}cook", self.base_url);

        match self.http.post(&url).body(body).send() {
            Ok(response) => {
                debug!(?command, status = %response.status(), "command sent");
                self.online = true;
                Ok(())
            }
            Err(err) => {
                warn!(?command, %err, "failed to send command");
                self.online = false;
                Err(err.into())
            }
        }
    }

    /// Push new Wi-Fi credentials through the `netset` endpoint.
    ///
    /// Write-only: neither the cached snapshot nor the online flag is
    /// touched, whatever the outcome. Unlike the rest of the API this
    /// endpoint takes an honest urlencoded content type.
    pub fn set_network(&self, credentials: &NetworkCredentials) -> Result<(), ApiError> {
        let body = encode_params(&credentials.params());
        let url = format!("{}netset", self.base_url);

        match self
            .http
            .post(&url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body)
            .send()
        {
            Ok(response) => {
                info!(ssid = %credentials.ssid, status = %response.status(), "pushed network credentials");
                Ok(())
            }
            Err(err) => {
                warn!(ssid = %credentials.ssid, %err, "failed to push network credentials");
                Err(err.into())
            }
        }
    }

    /// Fetch the device's known-networks list from `wifi_list`.
    ///
    /// The payload shape is undocumented, so it is kept as an opaque form
    /// mapping. The previous cache survives a failed fetch.
    pub fn fetch_known_networks(&mut self) -> Result<&FormValues, ApiError> {
        match self.read_form("wifi_list") {
            Ok(form) => {
                self.networks = form;
                self.online = true;
                Ok(&self.networks)
            }
            Err(err) => {
                warn!(%err, "network list fetch failed, keeping last cache");
                self.online = false;
                Err(err)
            }
        }
    }

    /// Last good status snapshot; defaults before the first successful poll.
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Whether the most recent network call reached the device.
    pub fn online(&self) -> bool {
        self.online
    }

    /// Last good known-networks payload.
    pub fn known_networks(&self) -> &FormValues {
        &self.networks
    }

    fn read_form(&self, endpoint: &str) -> Result<FormValues, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self.http.get(&url).send()?;

        let status = response.status();
        if !ACCEPTED_STATUS.contains(&status.as_u16()) {
            return Err(ApiError::Protocol(status));
        }

        Ok(parse_form(&response.text()?))
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}
