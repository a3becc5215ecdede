// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Offline flow-log reading.
//!
//! Iterates a recorded JSONL flow log and builds complete records for every
//! flow matching the host filter. Replayed entries already bundle request,
//! response, and WebSocket messages as one unit, so there is no correlation
//! step in this path.

use std::path::{Path, PathBuf};

use tokio::io::AsyncBufReadExt;
use tracing::warn;

use crate::flow_record::FlowRecord;
use crate::host_filter::HostFilter;
use crate::raw_flow::RawFlow;

/// Read a flow log and build records for every flow matching `filter`.
///
/// Reads the file line by line and deserializes each line as a `RawFlow`.
/// Malformed lines are skipped with a warning (the recorder may still be
/// appending); a mid-stream read failure stops iteration and keeps the flows
/// read so far. Only a failure to open the file is an error.
pub async fn read_matching_flows(
    path: impl AsRef<Path>,
    filter: &HostFilter,
) -> anyhow::Result<Vec<FlowRecord>> {
    let file = tokio::fs::File::open(path.as_ref()).await?;
    let reader = tokio::io::BufReader::new(file);
    let mut lines = reader.lines();
    let mut records = Vec::new();
    let mut line_num = 0u64;

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!(line = line_num, error = %e, "flow log read failed mid-stream, keeping flows read so far");
                break;
            }
        };
        line_num += 1;
        if line.trim().is_empty() {
            continue;
        }

        let flow = match serde_json::from_str::<RawFlow>(&line) {
            Ok(flow) => flow,
            Err(e) => {
                warn!(line = line_num, error = %e, "failed to parse flow entry, skipping");
                continue;
            }
        };

        if !filter.matches(&flow.request.host) {
            continue;
        }
        records.push(FlowRecord::from_flow(&flow));
    }

    Ok(records)
}

/// Derive the analysis output path: the input file name with its extension
/// replaced by an `-analysis.json` suffix.
pub fn analysis_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("capture");
    input.with_file_name(format!("{stem}-analysis.json"))
}
