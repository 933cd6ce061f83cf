// Copyright (C) 2025 Huawei Device Co., Ltd.
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

//! Network event dispatching.
//!
//! The platform glue owns a [`NetObserverWrapper`] obtained from a registered
//! [`NetRegistrar`](super::NetRegistrar) and forwards every connectivity event
//! it receives to it. The wrapper fans the event out to all observers.

use std::sync::{Arc, Mutex, PoisonError};

use super::Observer;

/// Network capabilities reported by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum NetCap {
    /// Multimedia messaging.
    Mms = 0,
    /// Secure user plane location.
    Supl = 1,
    /// Dial-up networking.
    Dun = 2,
    /// Initial attach.
    Ia = 3,
    /// XCAP configuration.
    Xcap = 4,
    /// Bearer independent protocol.
    Bip = 5,
    /// The network is not billed by traffic.
    NotMetered = 11,
    /// The network can reach the internet.
    Internet = 12,
    /// The network is not a VPN.
    NotVpn = 15,
    /// Internet connectivity has been validated.
    Validated = 16,
    /// The network sits behind a captive portal.
    Portal = 17,
    /// Internal default network.
    InternalDefault = 18,
    /// Connectivity check is in progress.
    CheckingConnectivity = 31,
}

/// Physical bearer of a network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum NetBearType {
    /// Mobile data.
    Cellular = 0,
    /// Wireless LAN.
    Wifi = 1,
    /// Bluetooth tethering.
    Bluetooth = 2,
    /// Wired ethernet.
    Ethernet = 3,
    /// Virtual private network.
    Vpn = 4,
    /// Wi-Fi aware (neighbor awareness networking).
    WifiAware = 5,
}

/// Network information containing capabilities and bearer types.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NetInfo {
    /// List of capabilities supported by the network.
    pub caps: Vec<NetCap>,
    /// Types of network bearers available.
    pub bear_types: Vec<NetBearType>,
    /// Whether the device is roaming on this network.
    pub is_roaming: bool,
}

impl NetInfo {
    /// Returns `true` if the network advertises `cap`.
    pub fn has_cap(&self, cap: NetCap) -> bool {
        self.caps.contains(&cap)
    }

    /// Returns `true` if the network is carried over `bear_type`.
    pub fn has_bear_type(&self, bear_type: NetBearType) -> bool {
        self.bear_types.contains(&bear_type)
    }
}

/// Fans network events out to a shared collection of observers.
#[derive(Clone)]
pub struct NetObserverWrapper {
    /// Shared collection of observers to receive network event notifications.
    inner: Arc<Mutex<Vec<Box<dyn Observer>>>>,
}

impl NetObserverWrapper {
    /// Creates a new network observer wrapper with the given collection of observers.
    pub fn new(inner: Arc<Mutex<Vec<Box<dyn Observer>>>>) -> Self {
        Self { inner }
    }

    /// Notifies all observers when a network becomes available.
    pub fn net_available(&self, net_id: i32) {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        for observer in inner.iter() {
            observer.net_available(net_id);
        }
    }

    /// Notifies all observers when a network is lost.
    pub fn net_lost(&self, net_id: i32) {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        for observer in inner.iter() {
            observer.net_lost(net_id);
        }
    }

    /// Notifies all observers when network capabilities change.
    pub fn net_capability_changed(&self, net_id: i32, net_info: NetInfo) {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        for observer in inner.iter() {
            observer.net_capability_changed(net_id, &net_info);
        }
    }
}

include!("../../../tests/ut/observe/network/ut_wrapper.rs");
