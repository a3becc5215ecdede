// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Target-host traffic extraction from capture flow logs.
//!
//! This library filters a mixed stream of captured flows down to one host's
//! traffic, decodes request/response/WebSocket payloads into text and JSON
//! where possible, and produces a JSON-serializable export. Two drivers feed
//! the same data model: an offline reader over a recorded flow log and a live
//! collector driven by capture lifecycle events.

pub mod body;
pub mod collector;
pub mod config;
pub mod flow_record;
pub mod host_filter;
pub mod raw_flow;
pub mod reader;
pub mod report;
pub mod serde_helpers;

#[cfg(test)]
pub mod test_helpers;

// Keep library small; main.rs remains the binary entrypoint.
