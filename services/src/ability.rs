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

//! Process entry of the download service.

use std::sync::{Arc, Once};

use crate::error::{ErrorCode, ServiceError};
use crate::manage::{DownloadServiceManager, ServiceConfig, Watchers};
use crate::service::host::SystemAbilityHost;
use crate::task::transfer::Transfer;

/// Logs panics of any thread before the default hook runs.
static PANIC_HOOK: Once = Once::new();

/// The download system ability.
///
/// Owns the [`DownloadServiceManager`] from [`start`](RequestAbility::start)
/// until [`stop`](RequestAbility::stop).
pub struct RequestAbility {
    manager: DownloadServiceManager,
}

impl RequestAbility {
    /// Initializes logging, then builds and creates the manager.
    ///
    /// # Errors
    ///
    /// Returns `ServiceNotInitialize` if the manager could not start its
    /// threads.
    pub fn start(
        config: ServiceConfig,
        transfer: Arc<dyn Transfer>,
        host: Arc<dyn SystemAbilityHost>,
        watchers: Watchers,
    ) -> Result<Self, ServiceError> {
        init_log();
        info!("ability init");

        PANIC_HOOK.call_once(|| {
            let default_hook = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                error!("{}", info);
                default_hook(info);
            }));
        });

        let thread_num = config.thread_num();
        let manager = DownloadServiceManager::new(config, transfer, host, watchers);
        if !manager.create(thread_num) {
            error!("ability init failed");
            return Err(ServiceError::ErrorCode(ErrorCode::ServiceNotInitialize));
        }
        info!("ability init succeed");
        Ok(Self { manager })
    }

    /// Returns the manager serving requests.
    pub fn manager(&self) -> &DownloadServiceManager {
        &self.manager
    }

    /// Tears the service down.
    pub fn stop(self) {
        info!("ability stop");
        self.manager.destroy();
    }
}

fn init_log() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
