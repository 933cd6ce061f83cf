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

//! Network state tracking.
//!
//! The platform reports connectivity through [`request_utils::observe::network`].
//! [`NetworkListener`] turns those reports into a [`NetworkState`] shared
//! with every task and forwards transitions to the monitor.

use std::sync::{Arc, PoisonError, RwLock};

use request_utils::observe::network::{NetBearType, NetCap, NetInfo, Observer};
use tokio::sync::mpsc::UnboundedSender;
use NetworkState::{Offline, Online};

use super::events::StateEvent;

/// Types of network connections available.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[repr(u8)]
pub enum NetworkType {
    /// Any bearer other than Wi-Fi or cellular.
    Other,
    /// Wireless LAN.
    Wifi,
    /// Mobile data.
    Cellular,
}

/// Network connection information.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct NetworkInfo {
    /// Bearer of the connection.
    pub network_type: NetworkType,
    /// Whether traffic is billed.
    pub is_metered: bool,
    /// Whether the device is roaming.
    pub is_roaming: bool,
}

impl From<&NetInfo> for NetworkInfo {
    fn from(info: &NetInfo) -> Self {
        let network_type = if info.has_bear_type(NetBearType::Wifi) {
            NetworkType::Wifi
        } else if info.has_bear_type(NetBearType::Cellular) {
            NetworkType::Cellular
        } else {
            NetworkType::Other
        };
        Self {
            network_type,
            is_metered: !info.has_cap(NetCap::NotMetered),
            is_roaming: info.is_roaming,
        }
    }
}

/// Represents the current state of network connectivity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NetworkState {
    /// No active network connection available.
    Offline,
    /// Connected to a network with the provided network information.
    Online(NetworkInfo),
}

/// Shared, cheaply clonable view of the current network.
#[derive(Clone)]
pub(crate) struct Network {
    state: Arc<RwLock<NetworkState>>,
}

impl Network {
    /// Creates a network view starting offline.
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(Offline)),
        }
    }

    /// Retrieves the current network state.
    pub(crate) fn state(&self) -> NetworkState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Updates the network state to offline.
    ///
    /// # Returns
    ///
    /// `true` if the state changed.
    pub(crate) fn notify_offline(&self) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if *state != Offline {
            info!("network is offline");
            *state = Offline;
            true
        } else {
            false
        }
    }

    /// Updates the network state to online with the provided information.
    ///
    /// # Returns
    ///
    /// `true` if the state changed.
    pub(crate) fn notify_online(&self, info: NetworkInfo) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if !matches!(&*state, Online(old_info) if old_info == &info) {
            info!("network online {:?}", info);
            *state = Online(info);
            true
        } else {
            false
        }
    }
}

/// Network observer feeding the monitor.
pub(crate) struct NetworkListener {
    network: Network,
    tx: UnboundedSender<StateEvent>,
}

impl NetworkListener {
    pub(crate) fn new(network: Network, tx: UnboundedSender<StateEvent>) -> Self {
        Self { network, tx }
    }

    fn send(&self, event: StateEvent) {
        if self.tx.send(event).is_err() {
            debug!("monitor stopped, network event dropped");
        }
    }
}

impl Observer for NetworkListener {
    // Availability alone is not acted upon; the following capability report
    // tells whether the network is validated.
    fn net_available(&self, net_id: i32) {
        debug!("network {} available", net_id);
    }

    fn net_lost(&self, net_id: i32) {
        debug!("network {} lost", net_id);
        if self.network.notify_offline() {
            self.send(StateEvent::NetworkUnavailable);
        }
    }

    fn net_capability_changed(&self, net_id: i32, net_info: &NetInfo) {
        debug!("network {} capability changed {:?}", net_id, net_info);
        if net_info.has_cap(NetCap::Internet) && net_info.has_cap(NetCap::Validated) {
            // Every validated report counts, tasks parked by their own
            // transfer may be waiting on an unchanged network.
            self.network.notify_online(NetworkInfo::from(net_info));
            self.send(StateEvent::NetworkAvailable);
        } else if self.network.notify_offline() {
            self.send(StateEvent::NetworkUnavailable);
        }
    }
}
