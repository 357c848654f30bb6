//! The backend's uniform response wrapper.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::{ApiError, Result};

/// Application status code meaning success. The transport status alone is
/// not a success signal; this field is.
pub const SUCCESS_CODE: i64 = 200;

/// Uniform JSON body every endpoint returns: `{code, msg, data}`, layered on
/// top of the transport status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Application status code; [`SUCCESS_CODE`] is the sole success value.
    pub code: i64,
    /// Human-readable message accompanying the code.
    #[serde(default)]
    pub msg: String,
    /// Operation payload, shape defined per endpoint.
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Envelope {
    /// Whether the application code signals success.
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Deserialize the payload into a typed value.
    pub fn data_as<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.data.clone())
            .map_err(|e| ApiError::Decode(format!("envelope payload: {e}")))
    }
}
