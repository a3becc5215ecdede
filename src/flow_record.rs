// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Canonical records that flow through filtering -> decoding -> export.
//!
//! Both drivers produce the same shapes from raw flows: the offline reader
//! builds complete records in one pass, the live collector builds them
//! incrementally. WebSocket messages carry the frame discriminator in both
//! paths; there is one schema, not two.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::body;
use crate::raw_flow::{FrameKind, RawFlow, RawResponse, RawWsMessage};

/// Exported header mapping: insertion-ordered, duplicates collapse to last.
pub type Headers = IndexMap<String, String>;

/// Response portion of a flow record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResponseRecord {
    pub status_code: u16,
    pub headers: Headers,
    /// Decoded body text, or the binary sentinel. Absent when no body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Present only when `body` is valid JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<Value>,
}

/// One HTTP exchange for the target host.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FlowRecord {
    /// Start time of the request, fractional seconds since epoch.
    pub timestamp: f64,
    pub method: String,
    pub url: String,
    pub host: String,
    pub path: String,
    pub headers: Headers,
    /// Decoded request body text, or the binary sentinel. Absent when no body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<String>,
    /// Present only when `request_body` is valid JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_json: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseRecord>,
    /// Frames attached inline by the offline path. The live path collects
    /// frames in a separate top-level list instead.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub websocket_messages: Vec<WebSocketMessage>,
}

/// One WebSocket frame belonging to the target host.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WebSocketMessage {
    pub from_client: bool,
    pub timestamp: f64,
    #[serde(rename = "type")]
    pub kind: FrameKind,
    /// Decoded frame text, or the binary sentinel.
    pub content: String,
    /// Present only when `content` is valid JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<Value>,
}

impl FlowRecord {
    /// Build a request-only record (live path; the response attaches later).
    pub fn from_request(flow: &RawFlow) -> Self {
        let req = &flow.request;
        let (request_body, request_json) = split_decoded(req.content.as_deref());
        Self {
            timestamp: req.timestamp_start,
            method: req.method.clone(),
            url: req.url.clone(),
            host: req.host.clone(),
            path: req.path.clone(),
            headers: req.headers.clone(),
            request_body,
            request_json,
            response: None,
            websocket_messages: Vec::new(),
        }
    }

    /// Build a complete record from a fully formed flow entry (offline path).
    pub fn from_flow(flow: &RawFlow) -> Self {
        let mut record = Self::from_request(flow);
        if let Some(resp) = &flow.response {
            record.response = Some(ResponseRecord::from_raw(resp));
        }
        if let Some(ws) = &flow.websocket {
            record.websocket_messages = ws
                .messages
                .iter()
                .map(WebSocketMessage::from_raw)
                .collect();
        }
        record
    }
}

impl ResponseRecord {
    pub fn from_raw(resp: &RawResponse) -> Self {
        let (body, json) = split_decoded(resp.content.as_deref());
        Self {
            status_code: resp.status_code,
            headers: resp.headers.clone(),
            body,
            json,
        }
    }
}

impl WebSocketMessage {
    pub fn from_raw(msg: &RawWsMessage) -> Self {
        let decoded = body::decode(&msg.content);
        Self {
            from_client: msg.from_client,
            timestamp: msg.timestamp,
            kind: msg.kind,
            content: decoded.content,
            json: decoded.json,
        }
    }
}

/// Decode an optional body into its exported field pair.
///
/// Zero-length content counts as absent: captures record an empty body for
/// bodiless requests, and the export keeps those fields out entirely.
fn split_decoded(content: Option<&[u8]>) -> (Option<String>, Option<Value>) {
    match content.filter(|b| !b.is_empty()) {
        Some(bytes) => {
            let decoded = body::decode(bytes);
            (Some(decoded.content), decoded.json)
        }
        None => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BINARY_SENTINEL;
    use crate::test_helpers::{
        make_raw_flow, make_raw_response, make_ws_message, with_request_body,
    };

    #[test]
    fn request_only_record_has_no_optional_fields() {
        let flow = make_raw_flow("api.example.com", "GET", "/status");
        let record = FlowRecord::from_request(&flow);

        assert_eq!(record.method, "GET");
        assert_eq!(record.host, "api.example.com");
        assert_eq!(record.path, "/status");
        assert!(record.request_body.is_none());
        assert!(record.request_json.is_none());
        assert!(record.response.is_none());

        let json = serde_json::to_string(&record).expect("serialize");
        assert!(!json.contains("request_body"));
        assert!(!json.contains("response"));
        assert!(!json.contains("websocket_messages"));
    }

    #[test]
    fn json_request_body_gets_both_fields() {
        let flow = with_request_body(
            make_raw_flow("api.example.com", "POST", "/login"),
            br#"{"user":"a"}"#,
        );
        let record = FlowRecord::from_request(&flow);

        assert_eq!(record.request_body.as_deref(), Some(r#"{"user":"a"}"#));
        assert_eq!(
            record.request_json,
            Some(serde_json::json!({"user": "a"}))
        );
    }

    #[test]
    fn non_utf8_request_body_gets_sentinel_only() {
        let flow = with_request_body(
            make_raw_flow("api.example.com", "POST", "/upload"),
            &[0xde, 0xad, 0xbe, 0xef, 0xff],
        );
        let record = FlowRecord::from_request(&flow);

        assert_eq!(record.request_body.as_deref(), Some(BINARY_SENTINEL));
        assert!(record.request_json.is_none());
    }

    #[test]
    fn empty_request_body_counts_as_absent() {
        let flow = with_request_body(make_raw_flow("api.example.com", "GET", "/"), b"");
        let record = FlowRecord::from_request(&flow);
        assert!(record.request_body.is_none());
    }

    #[test]
    fn complete_flow_builds_response_and_frames() {
        let mut flow = make_raw_flow("api.example.com", "GET", "/devices");
        flow.response = Some(make_raw_response(200, Some(br#"{"ok":true}"#)));
        flow.websocket = Some(crate::raw_flow::RawWebSocket {
            messages: vec![
                make_ws_message(true, br#"{"cmd":"sub"}"#, FrameKind::Text),
                make_ws_message(false, &[0x01, 0xff], FrameKind::Binary),
            ],
        });

        let record = FlowRecord::from_flow(&flow);

        let resp = record.response.expect("response attached");
        assert_eq!(resp.status_code, 200);
        assert_eq!(resp.body.as_deref(), Some(r#"{"ok":true}"#));
        assert_eq!(resp.json, Some(serde_json::json!({"ok": true})));

        assert_eq!(record.websocket_messages.len(), 2);
        assert_eq!(record.websocket_messages[0].kind, FrameKind::Text);
        assert_eq!(
            record.websocket_messages[0].json,
            Some(serde_json::json!({"cmd": "sub"}))
        );
        assert_eq!(record.websocket_messages[1].content, BINARY_SENTINEL);
        assert!(record.websocket_messages[1].json.is_none());
    }

    #[test]
    fn frame_discriminator_serializes_as_type() {
        let msg = WebSocketMessage::from_raw(&make_ws_message(true, b"hi", FrameKind::Text));
        let json = serde_json::to_string(&msg).expect("serialize");
        assert!(json.contains(r#""type":"text""#));
        assert!(!json.contains(r#""kind""#));
    }
}
