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

#[cfg(test)]
mod ut_wrapper {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;

    struct CountingObserver {
        available: Arc<AtomicUsize>,
        lost: Arc<AtomicUsize>,
        changed: Arc<AtomicUsize>,
    }

    impl Observer for CountingObserver {
        fn net_available(&self, _net_id: i32) {
            self.available.fetch_add(1, Ordering::SeqCst);
        }
        fn net_lost(&self, _net_id: i32) {
            self.lost.fetch_add(1, Ordering::SeqCst);
        }
        fn net_capability_changed(&self, _net_id: i32, net_info: &NetInfo) {
            assert!(net_info.has_cap(NetCap::Internet));
            self.changed.fetch_add(1, Ordering::SeqCst);
        }
    }

    // @tc.name: ut_net_observer_wrapper_fan_out
    // @tc.desc: Test that every event reaches every observer
    // @tc.precon: NA
    // @tc.step: 1. Create wrapper over three counting observers
    // 2. Fire available, lost and capability events
    // @tc.expect: Each counter equals the number of observers
    // @tc.type: FUNC
    // @tc.require: issueNumber
    // @tc.level: Level 1
    #[test]
    fn ut_net_observer_wrapper_fan_out() {
        let available = Arc::new(AtomicUsize::new(0));
        let lost = Arc::new(AtomicUsize::new(0));
        let changed = Arc::new(AtomicUsize::new(0));
        let mut observers: Vec<Box<dyn Observer>> = Vec::new();
        for _ in 0..3 {
            observers.push(Box::new(CountingObserver {
                available: available.clone(),
                lost: lost.clone(),
                changed: changed.clone(),
            }));
        }
        let wrapper = NetObserverWrapper::new(Arc::new(Mutex::new(observers)));

        wrapper.net_available(1);
        wrapper.net_lost(1);
        wrapper.net_capability_changed(
            1,
            NetInfo {
                caps: vec![NetCap::Internet],
                bear_types: vec![NetBearType::Ethernet],
                is_roaming: false,
            },
        );
        assert_eq!(available.load(Ordering::SeqCst), 3);
        assert_eq!(lost.load(Ordering::SeqCst), 3);
        assert_eq!(changed.load(Ordering::SeqCst), 3);
    }

    // @tc.name: ut_net_observer_wrapper_empty
    // @tc.desc: Test dispatching with no observers
    // @tc.precon: NA
    // @tc.step: 1. Create wrapper over an empty list
    // 2. Fire events
    // @tc.expect: No panic occurs
    // @tc.type: FUNC
    // @tc.require: issueNumber
    // @tc.level: Level 2
    #[test]
    fn ut_net_observer_wrapper_empty() {
        let wrapper = NetObserverWrapper::new(Arc::new(Mutex::new(Vec::new())));
        wrapper.net_available(0);
        wrapper.net_lost(0);
        wrapper.net_capability_changed(0, NetInfo::default());
    }
}
