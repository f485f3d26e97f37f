//! Signed session-token codec.
//!
//! Encodes and decodes the platform's compact signed token format: three
//! dot-separated base64url segments, `header.payload.signature`, where the
//! signature is HMAC-SHA512 over the first two segments. The shape matches
//! a JWS compact serialization with a fixed `HS512` header so existing
//! tokens remain verifiable bit for bit.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sha2::Sha512;
use thiserror::Error;

type HmacSha512 = Hmac<Sha512>;

/// Token header. Fixed to `{"alg":"HS512","typ":"JWT"}` for every token the
/// service mints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub alg: String,
    pub typ: String,
}

impl Header {
    pub fn hs512() -> Self {
        Self { alg: "HS512".to_string(), typ: "JWT".to_string() }
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::hs512()
    }
}

/// Errors returned by the token codec.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("token is not in header.payload.signature form")]
    Malformed,
    #[error("token signature does not verify")]
    InvalidSignature,
    #[error("token segment is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode a header and payload into a signed token.
pub fn encode<P: Serialize>(
    header: &Header,
    payload: &P,
    secret: &[u8],
) -> Result<String, CodecError> {
    let header_part = URL_SAFE_NO_PAD.encode(serde_json::to_vec(header)?);
    let payload_part = URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload)?);
    let signing_input = format!("{}.{}", header_part, payload_part);

    let mut mac =
        HmacSha512::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{}.{}", signing_input, signature))
}

/// Decode a signed token, verifying its signature before parsing.
///
/// The MAC over `header.payload` is recomputed with `secret` and compared in
/// constant time against the supplied signature; only then is the payload
/// parsed. Fails with [`CodecError::InvalidSignature`] on any mismatch.
pub fn decode<P: DeserializeOwned>(token: &str, secret: &[u8]) -> Result<(Header, P), CodecError> {
    let mut segments = token.split('.');
    let (Some(header_part), Some(payload_part), Some(signature_part), None) =
        (segments.next(), segments.next(), segments.next(), segments.next())
    else {
        return Err(CodecError::Malformed);
    };

    let signature =
        URL_SAFE_NO_PAD.decode(signature_part).map_err(|_| CodecError::InvalidSignature)?;

    let mut mac =
        HmacSha512::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(header_part.as_bytes());
    mac.update(b".");
    mac.update(payload_part.as_bytes());
    mac.verify_slice(&signature).map_err(|_| CodecError::InvalidSignature)?;

    let header_bytes =
        URL_SAFE_NO_PAD.decode(header_part).map_err(|_| CodecError::Malformed)?;
    let payload_bytes =
        URL_SAFE_NO_PAD.decode(payload_part).map_err(|_| CodecError::Malformed)?;

    let header = serde_json::from_slice(&header_bytes)?;
    let payload = serde_json::from_slice(&payload_bytes)?;

    Ok((header, payload))
}
