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

//! Background task reacting to platform signals.

use std::sync::Arc;
use std::time::Duration;

use request_utils::observe::app_state::AppStateRegistrar;
use request_utils::observe::network::NetRegistrar;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::app_state::AppStateListener;
use super::events::StateEvent;
use super::network::NetworkListener;
use super::service_manager::ManagerInner;

/// Registrars through which the platform reports network and application
/// state to the service.
#[derive(Clone)]
pub struct Watchers {
    network: Arc<NetRegistrar>,
    app_state: Arc<AppStateRegistrar>,
}

impl Watchers {
    /// Creates empty registrars.
    pub fn new() -> Self {
        Self {
            network: Arc::new(NetRegistrar::new()),
            app_state: Arc::new(AppStateRegistrar::new()),
        }
    }

    /// Network registrar the platform glue reports connectivity to.
    pub fn network(&self) -> &NetRegistrar {
        &self.network
    }

    /// Application state registrar the platform glue reports lifecycle to.
    pub fn app_state(&self) -> &AppStateRegistrar {
        &self.app_state
    }
}

/// Subscribes to the watchers and dispatches their events until shut down.
///
/// Also drives the retry tick resuming tasks that wait to retry.
pub(crate) async fn run(
    inner: Arc<ManagerInner>,
    watchers: Watchers,
    tx: UnboundedSender<StateEvent>,
    mut rx: UnboundedReceiver<StateEvent>,
    mut shutdown: watch::Receiver<bool>,
) {
    watchers
        .network
        .add_observer(NetworkListener::new(inner.network().clone(), tx.clone()));
    if let Err(e) = watchers.network.register() {
        error!("register network observer failed: {:?}", e);
    }
    watchers.app_state.add_observer(AppStateListener::new(tx));
    if !watchers.app_state.register() {
        error!("register app state observer failed");
    }
    info!("monitor started");

    let period = inner.retry_interval().max(Duration::from_millis(1));
    let mut retry = time::interval_at(Instant::now() + period, period);
    retry.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            event = rx.recv() => match event {
                Some(event) => inner.handle_state_event(event),
                None => break,
            },
            _ = retry.tick() => inner.on_retry_tick(),
        }
    }

    detach(&watchers);
    info!("monitor exited");
}

/// Unregisters and drops the listeners installed by [`run`].
pub(crate) fn detach(watchers: &Watchers) {
    if let Err(e) = watchers.network.unregister() {
        debug!("unregister network observer: {:?}", e);
    }
    watchers.network.clear_observers();
    watchers.app_state.unregister();
    watchers.app_state.clear_observers();
}
