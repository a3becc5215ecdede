// SPDX-FileCopyrightText: 2025 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Target-host predicate shared by every ingestion path.
//!
//! Flows failing the predicate are dropped before any decoding happens and
//! leave no trace in the output.

/// Case-sensitive substring match against a flow's request host.
///
/// Deliberately not domain-aware: `"example.com"` matches
/// `"api.example.com"` and `"example.com.evil"` alike. The target is an
/// operator-supplied fragment of a known vendor host, not a security
/// boundary.
#[derive(Debug, Clone)]
pub struct HostFilter {
    needle: String,
}

impl HostFilter {
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into(),
        }
    }

    /// True iff `host` contains the configured substring.
    pub fn matches(&self, host: &str) -> bool {
        host.contains(&self.needle)
    }
}
