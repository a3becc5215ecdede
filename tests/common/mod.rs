// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Fixture builders shared by the integration suites.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use bytes::Bytes;
use uuid::Uuid;

use sift_http::raw_flow::{FrameKind, RawFlow, RawRequest, RawResponse, RawWsMessage};

pub fn raw_flow(host: &str, method: &str, path: &str) -> RawFlow {
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

pub fn raw_response(status_code: u16, body: Option<&[u8]>) -> RawResponse {
    RawResponse {
        status_code,
        headers: Default::default(),
        content: body.map(Bytes::copy_from_slice),
    }
}

pub fn ws_message(from_client: bool, content: &[u8], kind: FrameKind) -> RawWsMessage {
    RawWsMessage {
        from_client,
        timestamp: 1_700_000_001.0,
        kind,
        content: Bytes::copy_from_slice(content),
    }
}

/// Unique temp path with the given suffix.
pub fn temp_path(suffix: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("sift_it_{}{suffix}", Uuid::new_v4()))
}

pub async fn write_flow_log(path: &std::path::Path, flows: &[RawFlow]) {
    let mut out = String::new();
    for flow in flows {
        out.push_str(&serde_json::to_string(flow).expect("serialize flow"));
        out.push('\n');
    }
    tokio::fs::write(path, out).await.expect("write flow log");
}
