// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Raw flow entries as produced by the capture transport.
//!
//! A flow log is a JSONL file of [`RawFlow`] entries; the live event stream
//! wraps the same shape in tagged [`FlowEvent`] lines. These types are the
//! wire boundary: nothing in here filters, decodes, or correlates.

use bytes::Bytes;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Headers as captured on the wire: insertion-ordered, last value wins.
pub type RawHeaders = IndexMap<String, String>;

/// Request half of a captured flow.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RawRequest {
    /// Start time of the request, fractional seconds since epoch.
    pub timestamp_start: f64,
    pub method: String,
    pub url: String,
    pub host: String,
    /// Request path, including any query string.
    pub path: String,
    #[serde(default)]
    pub headers: RawHeaders,
    /// Raw body bytes, base64 on the wire. Absent when no body was captured.
    #[serde(
        default,
        with = "crate::serde_helpers::base64_body",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Bytes>,
}

/// Response half of a captured flow (absent until observed).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RawResponse {
    pub status_code: u16,
    #[serde(default)]
    pub headers: RawHeaders,
    #[serde(
        default,
        with = "crate::serde_helpers::base64_body",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Bytes>,
}

/// Frame discriminator carried on every WebSocket message.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FrameKind {
    Text,
    Binary,
}

/// One captured WebSocket frame.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RawWsMessage {
    pub from_client: bool,
    pub timestamp: f64,
    #[serde(rename = "type")]
    pub kind: FrameKind,
    #[serde(with = "crate::serde_helpers::base64_payload")]
    pub content: Bytes,
}

/// Upgraded WebSocket session attached to a flow.
///
/// The capture runtime re-delivers the *cumulative* message list on every
/// websocket event, so the same frame can appear in many deliveries.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RawWebSocket {
    #[serde(default)]
    pub messages: Vec<RawWsMessage>,
}

/// One captured flow: a request, and whatever else has been observed so far.
///
/// `id` is the capture runtime's per-flow identifier and is stable across the
/// request/response/websocket events of the same exchange.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RawFlow {
    pub id: String,
    pub request: RawRequest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<RawResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub websocket: Option<RawWebSocket>,
}

/// One line of the live event stream.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FlowEvent {
    Request { flow: RawFlow },
    Response { flow: RawFlow },
    WebsocketMessage { flow: RawFlow },
    Done,
}
