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

//! Application state monitoring.

use request_utils::observe::app_state::AppStateObserver;
use tokio::sync::mpsc::UnboundedSender;

use super::events::StateEvent;

/// Forwards application lifecycle changes to the monitor.
pub(crate) struct AppStateListener {
    tx: UnboundedSender<StateEvent>,
}

impl AppStateListener {
    pub(crate) fn new(tx: UnboundedSender<StateEvent>) -> Self {
        Self { tx }
    }
}

impl AppStateObserver for AppStateListener {
    fn app_state_changed(&self, bundle: &str, uid: u64, state: i32) {
        debug!("app state changed, bundle {} uid {} state {}", bundle, uid, state);
        let event = StateEvent::AppStateChanged {
            bundle: bundle.to_string(),
            uid,
            state,
        };
        if self.tx.send(event).is_err() {
            debug!("monitor stopped, app state event dropped");
        }
    }
}
