// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Live, callback-driven flow accumulation.
//!
//! The capture runtime invokes one callback per lifecycle event, in event
//! order, each running to completion: request observed, response observed,
//! websocket frames observed, and a terminal shutdown. The collector rebuilds
//! the same record shapes the offline reader produces, incrementally.
//!
//! Responses correlate to requests by the runtime's per-flow id, not by URL:
//! a pending map from flow id to record index makes the attach an exact
//! lookup, so two concurrent in-flight requests to the same URL cannot be
//! confused and a record completes at most once.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use crate::flow_record::{FlowRecord, ResponseRecord, WebSocketMessage};
use crate::host_filter::HostFilter;
use crate::raw_flow::{FlowEvent, RawFlow};

/// Final aggregate produced at shutdown.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrafficExport {
    pub http_flows: Vec<FlowRecord>,
    pub websocket_messages: Vec<WebSocketMessage>,
}

/// Accumulates one capture session's traffic for the target host.
///
/// Owned by whoever drives it; all mutation happens inside the lifecycle
/// callbacks and [`LiveCollector::finish`] consumes the collector, so the
/// export cannot change after shutdown. Tests construct independent
/// instances.
#[derive(Debug)]
pub struct LiveCollector {
    filter: HostFilter,
    flows: Vec<FlowRecord>,
    ws_messages: Vec<WebSocketMessage>,
    /// Flow id -> index of the record still waiting for its response.
    pending: HashMap<String, usize>,
    /// Flow id -> frames already exported. The runtime re-delivers the
    /// cumulative frame list on every websocket event; only frames past this
    /// watermark are appended.
    ws_exported: HashMap<String, usize>,
}

impl LiveCollector {
    pub fn new(filter: HostFilter) -> Self {
        Self {
            filter,
            flows: Vec::new(),
            ws_messages: Vec::new(),
            pending: HashMap::new(),
            ws_exported: HashMap::new(),
        }
    }

    /// Request observed: append a record with no response attached.
    pub fn on_request(&mut self, flow: &RawFlow) {
        if !self.filter.matches(&flow.request.host) {
            return;
        }
        self.pending.insert(flow.id.clone(), self.flows.len());
        self.flows.push(FlowRecord::from_request(flow));
    }

    /// Response observed: attach it to the pending record for this flow id.
    ///
    /// The pending entry is removed on attach, so the record's only state
    /// transition (created -> completed) happens at most once. A response
    /// with no pending record is dropped silently; correlation either
    /// matches within this call or is permanently missed.
    pub fn on_response(&mut self, flow: &RawFlow) {
        if !self.filter.matches(&flow.request.host) {
            return;
        }
        let Some(resp) = &flow.response else {
            return;
        };
        if let Some(idx) = self.pending.remove(&flow.id) {
            self.flows[idx].response = Some(ResponseRecord::from_raw(resp));
        }
    }

    /// WebSocket frames observed: export every frame past the watermark.
    pub fn on_websocket_message(&mut self, flow: &RawFlow) {
        if !self.filter.matches(&flow.request.host) {
            return;
        }
        let Some(ws) = &flow.websocket else {
            return;
        };
        let exported = self.ws_exported.entry(flow.id.clone()).or_insert(0);
        for msg in ws.messages.iter().skip(*exported) {
            self.ws_messages.push(WebSocketMessage::from_raw(msg));
        }
        if ws.messages.len() > *exported {
            *exported = ws.messages.len();
        }
    }

    /// Terminal transition: consume the collector and yield the aggregate.
    pub fn finish(self) -> TrafficExport {
        TrafficExport {
            http_flows: self.flows,
            websocket_messages: self.ws_messages,
        }
    }
}

/// Drive a collector from a JSONL event stream until `done` or end-of-stream.
///
/// Malformed event lines are skipped with a warning; a read failure shuts the
/// session down with whatever was collected.
pub async fn run_live<R>(input: R, mut collector: LiveCollector) -> TrafficExport
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut line_num = 0u64;

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!(line = line_num, error = %e, "event stream read failed, shutting down");
                break;
            }
        };
        line_num += 1;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<FlowEvent>(&line) {
            Ok(FlowEvent::Request { flow }) => collector.on_request(&flow),
            Ok(FlowEvent::Response { flow }) => collector.on_response(&flow),
            Ok(FlowEvent::WebsocketMessage { flow }) => collector.on_websocket_message(&flow),
            Ok(FlowEvent::Done) => break,
            Err(e) => {
                warn!(line = line_num, error = %e, "failed to parse event, skipping");
            }
        }
    }

    collector.finish()
}
