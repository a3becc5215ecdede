// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Shared test utilities to reduce duplication across test modules.

use bytes::Bytes;
use uuid::Uuid;

use crate::raw_flow::{FrameKind, RawFlow, RawRequest, RawResponse, RawWsMessage};

/// Create a raw flow with a request only, no body.
pub fn make_raw_flow(host: &str, method: &str, path: &str) -> RawFlow {
    RawFlow {
        id: Uuid::new_v4().to_string(),
        request: RawRequest {
            timestamp_start: 1_700_000_000.5,
            method: method.to_string(),
            url: format!("https://{host}{path}"),
            host: host.to_string(),
            path: path.to_string(),
            headers: Default::default(),
            content: None,
        },
        response: None,
        websocket: None,
    }
}

/// Attach a request body to a raw flow.
pub fn with_request_body(mut flow: RawFlow, body: &[u8]) -> RawFlow {
    flow.request.content = Some(Bytes::copy_from_slice(body));
    flow
}

/// Create a raw response with an optional body.
pub fn make_raw_response(status_code: u16, body: Option<&[u8]>) -> RawResponse {
    RawResponse {
        status_code,
        headers: Default::default(),
        content: body.map(Bytes::copy_from_slice),
    }
}

/// Create a raw WebSocket frame.
pub fn make_ws_message(from_client: bool, content: &[u8], kind: FrameKind) -> RawWsMessage {
    RawWsMessage {
        from_client,
        timestamp: 1_700_000_001.0,
        kind,
        content: Bytes::copy_from_slice(content),
    }
}

/// Write raw flows to a JSONL flow log at `path`, one entry per line.
pub async fn write_flow_log(path: &std::path::Path, flows: &[RawFlow]) {
    let mut out = String::new();
    for flow in flows {
        out.push_str(&serde_json::to_string(flow).expect("serialize flow"));
        out.push('\n');
    }
    tokio::fs::write(path, out).await.expect("write flow log");
}
