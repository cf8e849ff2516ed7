//! Request body decoding.

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::flight::Flight;

/// A flight record decoded from a JSON request body.
///
/// Unlike `axum::Json`, no `Content-Type` header is required and an empty
/// body decodes as an empty record. Malformed JSON, or JSON that is not an
/// object, is rejected with [`Error::InvalidBody`].
#[derive(Debug, Clone, PartialEq)]
pub struct FlightBody(pub Flight);

impl FlightBody {
    /// Decode a flight record from raw body bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBody`] if the bytes are not a JSON object.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(Flight::new()));
        }

        let value: Value =
            serde_json::from_slice(bytes).map_err(|err| Error::invalid_body(err.to_string()))?;
        Flight::try_from(value).map(Self)
    }
}

impl<S> FromRequest<S> for FlightBody
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| Error::invalid_body(rejection.body_text()))?;
        Self::decode(&bytes)
    }
}
