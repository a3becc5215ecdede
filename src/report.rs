// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Human-facing summary derivation.
//!
//! Pure functions over the final record collection; nothing here mutates the
//! records or touches I/O. Output goes to the console via `Display`.

use std::collections::BTreeSet;
use std::fmt;

use crate::flow_record::FlowRecord;

/// Console summary derived from the final record collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub flow_count: usize,
    pub websocket_count: usize,
    /// Distinct `METHOD path` pairs, query strings stripped, sorted.
    pub endpoints: BTreeSet<String>,
}

/// Distinct `METHOD path-without-query` pairs, sorted lexicographically.
pub fn endpoints(flows: &[FlowRecord]) -> BTreeSet<String> {
    flows
        .iter()
        .map(|f| {
            let path = f.path.split('?').next().unwrap_or(f.path.as_str());
            format!("{} {}", f.method, path)
        })
        .collect()
}

/// Summarize flows plus any frames collected outside the records.
///
/// The offline path attaches frames inline on each record; the live path
/// collects them in a separate top-level list and passes its length here.
pub fn summarize(flows: &[FlowRecord], extra_websocket_count: usize) -> Summary {
    let inline: usize = flows.iter().map(|f| f.websocket_messages.len()).sum();
    Summary {
        flow_count: flows.len(),
        websocket_count: inline + extra_websocket_count,
        endpoints: endpoints(flows),
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analyzed {} flows", self.flow_count)?;
        writeln!(f)?;
        writeln!(f, "API endpoints found:")?;
        for endpoint in &self.endpoints {
            writeln!(f, "  - {endpoint}")?;
        }
        write!(f, "\nWebSocket messages: {}", self.websocket_count)
    }
}
