pub mod commands;
pub mod keys;
pub mod state;

pub use commands::{Command, NetworkCredentials, COOK_SESSION_SECS, GRILL_SESSION_SECS};
pub use state::{encode_params, parse_form, DeviceState, FormValues, UNAVAILABLE_TEMPS};
