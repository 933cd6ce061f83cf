// Copyright (C) 2023 Huawei Device Co., Ltd.
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Download task configuration.

use std::collections::HashMap;

use super::info::PausedReason;
use crate::manage::network::{NetworkState, NetworkType};

/// Specifies the network type required for task execution.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum NetworkConfig {
    /// Task can run on any available network type.
    Any = 0,
    /// Task requires a Wi-Fi connection.
    Wifi,
    /// Task requires a cellular network connection.
    Cellular,
}

/// Complete configuration for a download task.
#[derive(Clone, Debug)]
pub struct DownloadConfig {
    /// Target URL.
    pub(crate) url: String,
    /// HTTP headers to include in the request.
    pub(crate) headers: HashMap<String, String>,
    /// Local path the payload is written to.
    pub(crate) file_path: String,
    /// Human-readable title for the task.
    pub(crate) title: String,
    /// Detailed description of the task.
    pub(crate) description: String,
    /// Bundle name of the requesting application.
    pub(crate) bundle: String,
    /// Uid of the requesting application.
    pub(crate) uid: u64,
    /// Network type requirements.
    pub(crate) network_config: NetworkConfig,
    /// Whether the task can run on metered networks.
    pub(crate) metered: bool,
    /// Whether the task can run while roaming.
    pub(crate) roaming: bool,
}

impl DownloadConfig {
    /// Returns the target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the request headers.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Returns the local file path.
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// Returns the bundle name of the owner.
    pub fn bundle_name(&self) -> &str {
        &self.bundle
    }

    /// Returns the uid of the owner.
    pub fn uid(&self) -> u64 {
        self.uid
    }

    /// Checks whether `network` allows this task to run.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the task may transfer, otherwise the reason it must wait:
    /// `WaitingForNetwork` when offline, `QueuedForWifi` when the current
    /// network has the wrong type or is metered or roaming against the
    /// configuration.
    pub(crate) fn satisfy_network(&self, network: &NetworkState) -> Result<(), PausedReason> {
        match network {
            NetworkState::Offline => Err(PausedReason::WaitingForNetwork),
            NetworkState::Online(info) => {
                let type_ok = match self.network_config {
                    NetworkConfig::Any => true,
                    NetworkConfig::Wifi => info.network_type == NetworkType::Wifi,
                    NetworkConfig::Cellular => info.network_type == NetworkType::Cellular,
                };
                if type_ok
                    && (self.roaming || !info.is_roaming)
                    && (self.metered || !info.is_metered)
                {
                    Ok(())
                } else {
                    Err(PausedReason::QueuedForWifi)
                }
            }
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            url: "".to_string(),
            headers: Default::default(),
            file_path: "".to_string(),
            title: "".to_string(),
            description: "".to_string(),
            bundle: "".to_string(),
            uid: 0,
            network_config: NetworkConfig::Any,
            metered: false,
            roaming: false,
        }
    }
}

/// Builder for [`DownloadConfig`].
pub struct ConfigBuilder {
    inner: DownloadConfig,
}

impl ConfigBuilder {
    /// Creates a new builder with default task configuration.
    pub fn new() -> Self {
        Self {
            inner: DownloadConfig::default(),
        }
    }

    /// Sets the target URL.
    pub fn url(&mut self, url: &str) -> &mut Self {
        self.inner.url = url.to_string();
        self
    }

    /// Adds a request header.
    pub fn header(&mut self, key: &str, value: &str) -> &mut Self {
        self.inner
            .headers
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Sets the local file path.
    pub fn file_path(&mut self, file_path: &str) -> &mut Self {
        self.inner.file_path = file_path.to_string();
        self
    }

    /// Sets the task title.
    pub fn title(&mut self, title: &str) -> &mut Self {
        self.inner.title = title.to_string();
        self
    }

    /// Sets the task description.
    pub fn description(&mut self, description: &str) -> &mut Self {
        self.inner.description = description.to_string();
        self
    }

    /// Sets the name of the bundle requesting the task.
    pub fn bundle_name(&mut self, bundle_name: &str) -> &mut Self {
        self.inner.bundle = bundle_name.to_string();
        self
    }

    /// Sets the uid of the requesting application.
    pub fn uid(&mut self, uid: u64) -> &mut Self {
        self.inner.uid = uid;
        self
    }

    /// Sets the required network type.
    pub fn network(&mut self, network: NetworkConfig) -> &mut Self {
        self.inner.network_config = network;
        self
    }

    /// Allows or forbids metered networks.
    pub fn metered(&mut self, metered: bool) -> &mut Self {
        self.inner.metered = metered;
        self
    }

    /// Allows or forbids roaming.
    pub fn roaming(&mut self, roaming: bool) -> &mut Self {
        self.inner.roaming = roaming;
        self
    }

    /// Returns the configured [`DownloadConfig`].
    pub fn build(&mut self) -> DownloadConfig {
        self.inner.clone()
    }
}
