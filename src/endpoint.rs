// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Types exchanged with the external-dns controller.
//!
//! Field names follow the external-dns webhook JSON layout (`dnsName`,
//! `recordTTL`, `Create`, `UpdateOld`, ...). Lists that external-dns sends as
//! `null` are read as empty.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A DNS record as seen by external-dns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    #[serde(default)]
    pub dns_name: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub targets: Vec<String>,

    #[serde(default)]
    pub record_type: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub set_identifier: String,

    #[serde(rename = "recordTTL", default, skip_serializing_if = "is_zero")]
    pub record_ttl: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: BTreeMap<String, String>,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub provider_specific: Vec<ProviderSpecificProperty>,
}

/// Provider specific key/value attached to an endpoint. Passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSpecificProperty {
    pub name: String,
    pub value: String,
}

impl Endpoint {
    pub fn new(dns_name: &str, record_type: &str, targets: Vec<String>) -> Self {
        Self {
            dns_name: dns_name.to_string(),
            record_type: record_type.to_string(),
            targets,
            ..Default::default()
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} IN {} {} [{}]",
            self.dns_name,
            self.record_ttl,
            self.record_type,
            self.set_identifier,
            self.targets.join(";")
        )
    }
}

/// A batch of changes computed by the external-dns planner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changes {
    #[serde(rename = "Create", default, deserialize_with = "null_as_default")]
    pub create: Vec<Endpoint>,

    #[serde(rename = "UpdateOld", default, deserialize_with = "null_as_default")]
    pub update_old: Vec<Endpoint>,

    #[serde(rename = "UpdateNew", default, deserialize_with = "null_as_default")]
    pub update_new: Vec<Endpoint>,

    #[serde(rename = "Delete", default, deserialize_with = "null_as_default")]
    pub delete: Vec<Endpoint>,
}

impl Changes {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.create.is_empty()
            && self.update_old.is_empty()
            && self.update_new.is_empty()
            && self.delete.is_empty()
    }
}

/// Domain filter reported to external-dns.
///
/// No filtering is ever applied: every domain matches, and the filter is sent
/// as an empty JSON object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainFilter {}

impl DomainFilter {
    #[must_use]
    pub fn match_all() -> Self {
        Self {}
    }

    #[must_use]
    pub fn matches(&self, _domain: &str) -> bool {
        true
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &i64) -> bool {
    *value == 0
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod endpoint_tests;
