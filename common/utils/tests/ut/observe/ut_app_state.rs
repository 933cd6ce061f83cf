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

use std::sync::{Arc, Mutex};

use super::*;

struct RecordingObserver {
    seen: Arc<Mutex<Vec<(String, u64, ApplicationState)>>>,
}

impl AppStateObserver for RecordingObserver {
    fn app_state_changed(&self, bundle: &str, uid: u64, state: i32) {
        self.seen
            .lock()
            .unwrap()
            .push((bundle.to_string(), uid, state.into()));
    }
}

// @tc.name: ut_application_state_from_i32
// @tc.desc: Test conversion of raw lifecycle values
// @tc.precon: NA
// @tc.step: 1. Convert known and unknown raw values
// @tc.expect: Known values map to their state, others to End
// @tc.type: FUNC
// @tc.require: issueNumber
// @tc.level: Level 0
#[test]
fn ut_application_state_from_i32() {
    assert_eq!(ApplicationState::from(2), ApplicationState::Foreground);
    assert_eq!(ApplicationState::from(4), ApplicationState::Background);
    assert_eq!(ApplicationState::from(5), ApplicationState::Terminated);
    assert_eq!(ApplicationState::from(-1), ApplicationState::End);
    assert_eq!(ApplicationState::from(42), ApplicationState::End);
}

// @tc.name: ut_app_state_registrar_dispatch
// @tc.desc: Test lifecycle dispatch through the registrar
// @tc.precon: NA
// @tc.step: 1. Add a recording observer and register
// 2. Fire two changes through the notifier
// 3. Unregister
// @tc.expect: Changes arrive in order and notifier disappears after unregister
// @tc.type: FUNC
// @tc.require: issueNumber
// @tc.level: Level 1
#[test]
fn ut_app_state_registrar_dispatch() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let registrar = AppStateRegistrar::new();
    registrar.add_observer(RecordingObserver { seen: seen.clone() });
    assert!(registrar.notifier().is_none());
    assert!(registrar.register());
    assert!(!registrar.register());

    let notifier = registrar.notifier().unwrap();
    notifier.app_state_changed("com.example.app", 20010001, 2);
    notifier.app_state_changed("com.example.app", 20010001, 4);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            ("com.example.app".to_string(), 20010001, ApplicationState::Foreground),
            ("com.example.app".to_string(), 20010001, ApplicationState::Background),
        ]
    );

    assert!(registrar.unregister());
    assert!(!registrar.unregister());
    assert!(registrar.notifier().is_none());
}
