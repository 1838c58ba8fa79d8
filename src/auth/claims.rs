//! Non-validating bearer token inspection.
//!
//! The API issues JWTs whose payload carries the account's role. The
//! client has no signing key and never verifies tokens: [`decode`] only
//! splits the compact form and parses the payload JSON so the views can
//! tailor themselves to the role. The server remains the authority on
//! every request, including whether the token is still acceptable.

use std::fmt;

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// Number of dot-separated segments in a compact JWT
const JWT_SEGMENTS: usize = 3;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Malformed token: expected 3 dot-separated segments")]
    MalformedToken,

    #[error("Invalid payload encoding: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("Invalid claims: {0}")]
    InvalidClaims(#[from] serde_json::Error),

    #[error("Unknown role {0:?}")]
    UnknownRole(String),
}

/// Account role embedded in issued tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Operator,
    Regulator,
}

impl Role {
    /// Parse a role claim string, ignoring case
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "operator" => Some(Role::Operator),
            "regulator" => Some(Role::Regulator),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Operator => "Operator",
            Role::Regulator => "Regulator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims extracted from a token payload.
///
/// `expires_at` is informational only. Expired tokens still decode here;
/// the API rejects them server-side when they stop being acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimSet {
    pub role: Role,
    pub subject: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Wire shape of the payload segment
#[derive(Debug, Deserialize)]
struct RawClaims {
    role: String,
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    exp: Option<i64>,
}

/// Decode the payload segment of a compact JWT without verifying it.
///
/// Splits `header.payload.signature`, base64url-decodes the payload, and
/// parses the claims JSON. Succeeds for any well-formed token regardless
/// of signature validity or expiry; the signature segment is never read.
pub fn decode(token: &str) -> Result<ClaimSet, DecodeError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != JWT_SEGMENTS {
        return Err(DecodeError::MalformedToken);
    }

    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD.decode(segments[1])?;
    let raw: RawClaims = serde_json::from_slice(&payload)?;

    let role = Role::parse(&raw.role).ok_or_else(|| DecodeError::UnknownRole(raw.role.clone()))?;
    let expires_at = raw.exp.and_then(|ts| DateTime::from_timestamp(ts, 0));

    Ok(ClaimSet {
        role,
        subject: raw.sub,
        expires_at,
    })
}
