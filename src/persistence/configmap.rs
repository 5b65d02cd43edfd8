// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Hosts file stored inside a Kubernetes `ConfigMap`.
//!
//! The blob lives under the reserved key [`CONFIGMAP_HOSTS_KEY`] of a single
//! `ConfigMap` identified by namespace and name. Writes emulate an upsert:
//! replace the object first and, if that fails (typically because it does not
//! exist yet), create it.

use super::HostsfileBackend;
use crate::constants::CONFIGMAP_HOSTS_KEY;
use crate::errors::BackendError;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::ConfigMap;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::{Api, PostParams};
use kube::Client;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Backend persisting the hosts file in `ConfigMap` `namespace/name`.
#[derive(Clone)]
pub struct ConfigMapBackend {
    api: Api<ConfigMap>,
    namespace: String,
    name: String,
}

impl ConfigMapBackend {
    pub fn new(client: Client, namespace: &str, name: &str) -> Self {
        Self {
            api: Api::namespaced(client, namespace),
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }

    fn build_configmap(&self, contents: &str) -> ConfigMap {
        ConfigMap {
            metadata: ObjectMeta {
                name: Some(self.name.clone()),
                namespace: Some(self.namespace.clone()),
                ..Default::default()
            },
            data: Some(BTreeMap::from([(
                CONFIGMAP_HOSTS_KEY.to_string(),
                contents.to_string(),
            )])),
            ..Default::default()
        }
    }
}

#[async_trait]
impl HostsfileBackend for ConfigMapBackend {
    fn kind(&self) -> &'static str {
        "configmap"
    }

    async fn read(&self) -> Result<String, BackendError> {
        let configmap =
            self.api
                .get(&self.name)
                .await
                .map_err(|e| BackendError::ConfigMapRead {
                    namespace: self.namespace.clone(),
                    name: self.name.clone(),
                    reason: e.to_string(),
                })?;

        configmap
            .data
            .and_then(|mut data| data.remove(CONFIGMAP_HOSTS_KEY))
            .ok_or_else(|| BackendError::ConfigMapKeyMissing {
                namespace: self.namespace.clone(),
                name: self.name.clone(),
                key: CONFIGMAP_HOSTS_KEY.to_string(),
            })
    }

    async fn write(&self, contents: &str) -> Result<(), BackendError> {
        let configmap = self.build_configmap(contents);

        let update_err = match self
            .api
            .replace(&self.name, &PostParams::default(), &configmap)
            .await
        {
            Ok(_) => return Ok(()),
            Err(e) => e,
        };

        warn!(
            "Failed to update ConfigMap {}/{}: {}. Attempting to create it instead",
            self.namespace, self.name, update_err
        );

        match self.api.create(&PostParams::default(), &configmap).await {
            Ok(_) => {
                info!(
                    "Created ConfigMap {}/{} successfully",
                    self.namespace, self.name
                );
                Ok(())
            }
            Err(create_err) => Err(BackendError::ConfigMapUpsert {
                namespace: self.namespace.clone(),
                name: self.name.clone(),
                update_reason: update_err.to_string(),
                create_reason: create_err.to_string(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "configmap_tests.rs"]
mod configmap_tests;
