// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Hosts file text codec.
//!
//! The format is line oriented:
//!
//! ```text
//! # comment
//! 10.0.0.1 a.example b.example
//! 10.0.0.2 a.example
//! ```
//!
//! The first field of each line is an IP address and every following field is
//! a hostname resolving to it. Blank lines and `#` comments are ignored. Lines
//! with fewer than two fields are reported and skipped; a bad line never fails
//! the whole blob.
//!
//! # Example
//!
//! ```rust
//! use hostsfile_webhook::hostsfile::{parse, serialize};
//!
//! let parsed = parse("10.0.0.1 a.example b.example\n");
//! assert!(parsed.malformed.is_empty());
//! assert_eq!(serialize(&parsed.mapping), "10.0.0.1 a.example b.example\n");
//! ```

use crate::constants::{HOSTS_COMMENT_PREFIX, HOSTS_MIN_FIELDS};
use crate::mapping::Mapping;
use std::collections::BTreeMap;
use tracing::warn;

/// A line that was skipped because it had fewer than two fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// 1-based line number in the blob
    pub line_number: usize,
    /// The trimmed line content
    pub content: String,
}

/// Result of parsing a hosts file blob.
#[derive(Debug, Clone, Default)]
pub struct ParsedHostsfile {
    pub mapping: Mapping,
    pub malformed: Vec<MalformedLine>,
}

/// Parse hosts file contents into a [`Mapping`].
///
/// Every hostname on a line is inserted against that line's IP. Malformed
/// lines are logged at `warn` and returned in [`ParsedHostsfile::malformed`].
#[must_use]
pub fn parse(contents: &str) -> ParsedHostsfile {
    let mut parsed = ParsedHostsfile::default();

    for (index, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(HOSTS_COMMENT_PREFIX) {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < HOSTS_MIN_FIELDS {
            warn!(line_number = index + 1, line, "Skipping invalid hosts file line");
            parsed.malformed.push(MalformedLine {
                line_number: index + 1,
                content: line.to_string(),
            });
            continue;
        }

        let ip = fields[0];
        for host in &fields[1..] {
            parsed.mapping.insert(host, ip);
        }
    }

    parsed
}

/// Whether `value` can be written as a single hosts file field and read back
/// unchanged: non-empty, no whitespace, not starting a comment.
#[must_use]
pub fn is_valid_field(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with(HOSTS_COMMENT_PREFIX)
        && !value.chars().any(char::is_whitespace)
}

/// Serialize a [`Mapping`] into hosts file contents.
///
/// Every host and IP must satisfy [`is_valid_field`]; anything else does not
/// survive a round trip through [`parse`].
///
/// Hostnames sharing an IP are grouped on one line, and a hostname with
/// several IPs appears once per IP. Lines are ordered by IP and hostnames
/// within a line by hostname, so the same mapping always produces the same
/// bytes.
#[must_use]
pub fn serialize(mapping: &Mapping) -> String {
    let mut by_ip: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (host, ips) in mapping.iter() {
        for ip in ips {
            by_ip.entry(ip.as_str()).or_default().push(host);
        }
    }

    let mut out = String::new();
    for (ip, hosts) in by_ip {
        out.push_str(ip);
        for host in hosts {
            out.push(' ');
            out.push_str(host);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "hostsfile_tests.rs"]
mod hostsfile_tests;
