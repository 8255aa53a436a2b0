use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced by the device client.
///
/// Public methods never panic; they log the failure, keep the last good
/// snapshot readable and return one of these, while the coarse `online`
/// flag tracks reachability.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, timeout or any other low-level HTTP failure.
    #[error("transport failure talking to the device: {0}")]
    Transport(#[from] reqwest::Error),

    /// The device answered, but with a status code outside the accepted set.
    #[error("device rejected the request with HTTP {0}")]
    Protocol(StatusCode),
}
