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

//! Idle countdown before the service unloads itself.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// One-shot, restartable countdown.
///
/// Every [`arm`](SaKeeper::arm) cancels the pending countdown and starts a
/// new one under a fresh generation. A countdown that was already past its
/// sleep when superseded still fires, so the callback must check
/// [`is_current`](SaKeeper::is_current) before acting.
pub(crate) struct SaKeeper {
    inner: Mutex<Inner>,
}

struct Inner {
    runtime: Option<Handle>,
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl SaKeeper {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                runtime: None,
                generation: 0,
                handle: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sets the runtime countdowns are spawned on.
    pub(crate) fn attach(&self, runtime: Handle) {
        self.lock().runtime = Some(runtime);
    }

    /// Starts the countdown, restarting it if already armed.
    ///
    /// # Returns
    ///
    /// The generation of the new countdown, or `None` if no runtime is
    /// attached.
    pub(crate) fn arm<F>(&self, wait: Duration, on_fire: F) -> Option<u64>
    where
        F: FnOnce(u64) + Send + 'static,
    {
        let mut inner = self.lock();
        let runtime = match inner.runtime.as_ref() {
            Some(runtime) => runtime.clone(),
            None => {
                debug!("keeper detached, countdown not armed");
                return None;
            }
        };
        if let Some(handle) = inner.handle.take() {
            handle.abort();
            debug!("countdown {} canceled", inner.generation);
        }
        inner.generation += 1;
        let generation = inner.generation;
        inner.handle = Some(runtime.spawn(async move {
            tokio::time::sleep(wait).await;
            on_fire(generation);
        }));
        debug!("countdown {} started, {:?}", generation, wait);
        Some(generation)
    }

    /// Returns `true` if `generation` is the armed countdown.
    pub(crate) fn is_current(&self, generation: u64) -> bool {
        let inner = self.lock();
        inner.handle.is_some() && inner.generation == generation
    }

    /// Disarms the countdown if `generation` is still the armed one.
    pub(crate) fn stop(&self, generation: u64) -> bool {
        let mut inner = self.lock();
        if inner.generation != generation || inner.handle.is_none() {
            return false;
        }
        // The countdown calling this is finishing on its own; dropping the
        // handle detaches it.
        inner.handle = None;
        true
    }

    /// Returns `true` while a countdown is armed.
    #[cfg(test)]
    pub(crate) fn is_waiting(&self) -> bool {
        self.lock().handle.is_some()
    }

    /// Cancels any countdown and detaches from the runtime.
    pub(crate) fn shutdown(&self) {
        let mut inner = self.lock();
        if let Some(handle) = inner.handle.take() {
            handle.abort();
        }
        inner.runtime = None;
    }
}
