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

//! Polling worker threads.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Work pulled by a [`DownloadThread`].
pub(crate) trait Job: Send + Sync + 'static {
    /// Processes one unit of work.
    ///
    /// # Returns
    ///
    /// `false` if there was nothing to do, in which case the worker waits for
    /// [`Job::interval`] before polling again.
    fn process(&self) -> bool;

    /// Polling interval of an idle worker.
    fn interval(&self) -> Duration;
}

/// A worker thread looping over a [`Job`] until stopped.
pub(crate) struct DownloadThread {
    alive: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl DownloadThread {
    /// Spawns the worker thread.
    ///
    /// # Errors
    ///
    /// Returns the error of the OS if the thread cannot be spawned.
    pub(crate) fn start<J: Job>(index: usize, job: Arc<J>) -> io::Result<Self> {
        let alive = Arc::new(AtomicBool::new(true));
        let flag = alive.clone();
        let handle = thread::Builder::new()
            .name(format!("download-worker-{}", index))
            .spawn(move || {
                debug!("download worker {} started", index);
                while flag.load(Ordering::Acquire) {
                    if !job.process() {
                        thread::park_timeout(job.interval());
                    }
                }
                debug!("download worker {} exited", index);
            })?;
        Ok(Self {
            alive,
            handle: Some(handle),
        })
    }

    /// Stops the loop and joins the thread.
    ///
    /// A task being executed is allowed to finish first.
    pub(crate) fn stop(&mut self) {
        self.alive.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                error!("download worker panicked");
            }
        }
    }
}

impl Drop for DownloadThread {
    fn drop(&mut self) {
        self.stop();
    }
}
