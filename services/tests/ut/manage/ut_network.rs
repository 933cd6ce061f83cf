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

use request_utils::observe::network::NetObserverWrapper;
use tokio::sync::mpsc::unbounded_channel;

use super::*;

fn wifi_info() -> NetInfo {
    NetInfo {
        caps: vec![NetCap::Internet, NetCap::Validated, NetCap::NotMetered],
        bear_types: vec![NetBearType::Wifi],
        is_roaming: false,
    }
}

// @tc.name: ut_network_info_from_net_info
// @tc.desc: Test conversion of platform network info
// @tc.precon: NA
// @tc.step: 1. Convert wifi, cellular and ethernet reports
// @tc.expect: Bearer, metered and roaming flags are mapped
// @tc.type: FUNC
// @tc.require: issues#ICN31I
#[test]
fn ut_network_info_from_net_info() {
    assert_eq!(
        NetworkInfo::from(&wifi_info()),
        NetworkInfo {
            network_type: NetworkType::Wifi,
            is_metered: false,
            is_roaming: false,
        }
    );
    let cellular = NetInfo {
        caps: vec![NetCap::Internet, NetCap::Validated],
        bear_types: vec![NetBearType::Cellular],
        is_roaming: true,
    };
    assert_eq!(
        NetworkInfo::from(&cellular),
        NetworkInfo {
            network_type: NetworkType::Cellular,
            is_metered: true,
            is_roaming: true,
        }
    );
    let ethernet = NetInfo {
        caps: vec![NetCap::Internet],
        bear_types: vec![NetBearType::Ethernet],
        is_roaming: false,
    };
    assert_eq!(NetworkInfo::from(&ethernet).network_type, NetworkType::Other);
}

// @tc.name: ut_network_notify_transitions
// @tc.desc: Test online and offline transitions of the network state
// @tc.precon: NA
// @tc.step: 1. Notify offline on a fresh state
//           2. Notify online twice with the same info
//           3. Notify offline
// @tc.expect: Only real transitions report a change
// @tc.type: FUNC
// @tc.require: issues#ICN31I
#[test]
fn ut_network_notify_transitions() {
    let network = Network::new();
    assert_eq!(network.state(), NetworkState::Offline);
    assert!(!network.notify_offline());
    let info = NetworkInfo::from(&wifi_info());
    assert!(network.notify_online(info.clone()));
    assert!(!network.notify_online(info.clone()));
    assert_eq!(network.state(), NetworkState::Online(info));
    assert!(network.notify_offline());
}

// @tc.name: ut_network_listener_events
// @tc.desc: Test the events the listener forwards to the monitor
// @tc.precon: NA
// @tc.step: 1. Dispatch the same validated capabilities twice
//           2. Dispatch an unvalidated capability report
//           3. Dispatch a lost network
// @tc.expect: One available event per validated report, then one unavailable event
// @tc.type: FUNC
// @tc.require: issues#ICN31I
#[test]
fn ut_network_listener_events() {
    let network = Network::new();
    let (tx, mut rx) = unbounded_channel();
    let observers: Vec<Box<dyn Observer>> =
        vec![Box::new(NetworkListener::new(network.clone(), tx))];
    let wrapper = NetObserverWrapper::new(Arc::new(std::sync::Mutex::new(observers)));

    wrapper.net_available(1);
    wrapper.net_capability_changed(1, wifi_info());
    wrapper.net_capability_changed(1, wifi_info());
    assert_eq!(rx.try_recv().ok(), Some(StateEvent::NetworkAvailable));
    assert_eq!(rx.try_recv().ok(), Some(StateEvent::NetworkAvailable));
    assert!(rx.try_recv().is_err());
    assert_eq!(
        network.state(),
        NetworkState::Online(NetworkInfo::from(&wifi_info()))
    );

    wrapper.net_capability_changed(
        1,
        NetInfo {
            caps: vec![NetCap::Internet],
            bear_types: vec![NetBearType::Wifi],
            is_roaming: false,
        },
    );
    wrapper.net_lost(1);
    assert_eq!(rx.try_recv().ok(), Some(StateEvent::NetworkUnavailable));
    assert!(rx.try_recv().is_err());
    assert_eq!(network.state(), NetworkState::Offline);
}
