// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Two-stage payload decoding: bytes to UTF-8 text, then a JSON attempt.
//!
//! Decode failures are never errors. Non-UTF-8 bytes become the
//! [`BINARY_SENTINEL`] marker; text that does not parse as JSON simply lacks
//! the enrichment field. The same rules apply to request bodies, response
//! bodies, and WebSocket frames.

use serde_json::Value;

/// Marker standing in for payloads that are not valid UTF-8 text.
pub const BINARY_SENTINEL: &str = "<binary>";

/// Result of decoding one payload.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedBody {
    /// Decoded text, or [`BINARY_SENTINEL`] when the bytes were not UTF-8.
    pub content: String,
    /// Present only when the decoded text parses as JSON.
    pub json: Option<Value>,
}

/// Decode one payload.
pub fn decode(bytes: &[u8]) -> DecodedBody {
    match std::str::from_utf8(bytes) {
        Ok(text) => DecodedBody {
            json: serde_json::from_str(text).ok(),
            content: text.to_string(),
        },
        Err(_) => DecodedBody {
            content: BINARY_SENTINEL.to_string(),
            json: None,
        },
    }
}
