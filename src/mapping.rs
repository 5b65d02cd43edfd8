// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Hostname to IP address mapping.
//!
//! A [`Mapping`] relates each hostname to an ordered list of IP address
//! strings. A hostname is present if and only if it has at least one address;
//! removing the last address removes the hostname.

use std::collections::BTreeMap;

/// Hostname → IP addresses, keyed in lexical hostname order.
///
/// Addresses are kept in insertion order and are not deduplicated: inserting
/// the same `(host, ip)` pair twice stores it twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    hosts: BTreeMap<String, Vec<String>>,
}

impl Mapping {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `ip` to the addresses of `host`, creating the host if absent.
    pub fn insert(&mut self, host: &str, ip: &str) {
        self.hosts
            .entry(host.to_string())
            .or_default()
            .push(ip.to_string());
    }

    /// Remove every occurrence of `ip` from `host`.
    ///
    /// The host is dropped once it has no addresses left. Removing a pair that
    /// does not exist is a no-op. Returns `true` if anything was removed.
    pub fn remove(&mut self, host: &str, ip: &str) -> bool {
        let Some(ips) = self.hosts.get_mut(host) else {
            return false;
        };

        let before = ips.len();
        ips.retain(|existing| existing != ip);
        let removed = ips.len() != before;

        if ips.is_empty() {
            self.hosts.remove(host);
        }

        removed
    }

    /// Addresses for `host`, if present.
    #[must_use]
    pub fn get(&self, host: &str) -> Option<&[String]> {
        self.hosts.get(host).map(Vec::as_slice)
    }

    /// Iterate hosts and their addresses in lexical hostname order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.hosts
            .iter()
            .map(|(host, ips)| (host.as_str(), ips.as_slice()))
    }

    /// Number of hostnames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Drop every hostname.
    pub fn clear(&mut self) {
        self.hosts.clear();
    }
}

#[cfg(test)]
#[path = "mapping_tests.rs"]
mod mapping_tests;
