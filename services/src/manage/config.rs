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

//! Service-wide tuning knobs.

use std::time::Duration;

/// Default number of worker threads.
pub const DEFAULT_THREAD_NUM: usize = 4;
/// Default worker polling interval.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);
/// Default retry budget of a task.
pub const DEFAULT_MAX_RETRY: u32 = 3;
/// Default idle time before the service unloads itself.
pub const DEFAULT_UNLOAD_WAIT: Duration = Duration::from_secs(60);
/// Default period of the retry tick.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(30);
/// System ability id of the download service.
pub const DOWNLOAD_SERVICE_ID: i32 = 3706;

/// Configuration of a [`DownloadServiceManager`](super::DownloadServiceManager).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceConfig {
    pub(crate) thread_num: usize,
    pub(crate) interval: Duration,
    pub(crate) max_retry: u32,
    pub(crate) unload_wait: Duration,
    pub(crate) retry_interval: Duration,
    pub(crate) service_id: i32,
}

impl ServiceConfig {
    /// Number of worker threads started by `RequestAbility`.
    pub fn thread_num(&self) -> usize {
        self.thread_num
    }

    /// Polling interval of idle workers.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Retry budget given to new tasks.
    pub fn max_retry(&self) -> u32 {
        self.max_retry
    }

    /// Idle time before the service asks to be unloaded.
    pub fn unload_wait(&self) -> Duration {
        self.unload_wait
    }

    /// Period of the retry tick.
    pub fn retry_interval(&self) -> Duration {
        self.retry_interval
    }

    /// Id passed to the host when unloading.
    pub fn service_id(&self) -> i32 {
        self.service_id
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            thread_num: DEFAULT_THREAD_NUM,
            interval: DEFAULT_INTERVAL,
            max_retry: DEFAULT_MAX_RETRY,
            unload_wait: DEFAULT_UNLOAD_WAIT,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            service_id: DOWNLOAD_SERVICE_ID,
        }
    }
}

/// Builder for [`ServiceConfig`].
pub struct ServiceConfigBuilder {
    inner: ServiceConfig,
}

impl ServiceConfigBuilder {
    /// Creates a builder holding the defaults.
    pub fn new() -> Self {
        Self {
            inner: ServiceConfig::default(),
        }
    }

    /// Sets the number of worker threads.
    pub fn thread_num(&mut self, thread_num: usize) -> &mut Self {
        self.inner.thread_num = thread_num;
        self
    }

    /// Sets the worker polling interval.
    pub fn interval(&mut self, interval: Duration) -> &mut Self {
        self.inner.interval = interval;
        self
    }

    /// Sets the retry budget of new tasks.
    pub fn max_retry(&mut self, max_retry: u32) -> &mut Self {
        self.inner.max_retry = max_retry;
        self
    }

    /// Sets the idle time before unloading.
    pub fn unload_wait(&mut self, unload_wait: Duration) -> &mut Self {
        self.inner.unload_wait = unload_wait;
        self
    }

    /// Sets the period of the retry tick.
    pub fn retry_interval(&mut self, retry_interval: Duration) -> &mut Self {
        self.inner.retry_interval = retry_interval;
        self
    }

    /// Sets the system ability id.
    pub fn service_id(&mut self, service_id: i32) -> &mut Self {
        self.inner.service_id = service_id;
        self
    }

    /// Returns the configured [`ServiceConfig`].
    pub fn build(&mut self) -> ServiceConfig {
        self.inner.clone()
    }
}
