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

//! The seam between the scheduler and the component moving bytes.
//!
//! The scheduler never performs I/O itself. Each run of a task hands its
//! [`DownloadConfig`] to a [`Transfer`] together with a [`TransferControl`]
//! through which the transfer reports progress and observes cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::config::DownloadConfig;
use super::info::DownloadErrorCode;
use super::notify::{TaskCallback, TaskEvent};

/// Executes the actual transfer of a task.
#[cfg_attr(test, mockall::automock)]
pub trait Transfer: Send + Sync {
    /// Runs one attempt of the transfer described by `config`.
    ///
    /// Implementations should poll [`TransferControl::is_interrupted`] and
    /// return [`TransferError::Interrupted`] promptly once it is set.
    fn transfer(&self, config: &DownloadConfig, control: &TransferControl)
        -> Result<(), TransferError>;

    /// Releases whatever the transfer left behind for `config`.
    ///
    /// Called exactly once when the task is removed.
    fn release(&self, _config: &DownloadConfig) {}
}

/// Outcome of a failed transfer attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferError {
    /// The network went away during the transfer.
    Offline,
    /// The transfer stopped because it was interrupted.
    Interrupted,
    /// The transfer failed.
    Failed {
        /// What went wrong.
        code: DownloadErrorCode,
        /// Whether another attempt may succeed.
        retryable: bool,
    },
}

/// State a task shares with its running transfer.
pub(crate) struct TaskShared {
    task_id: u32,
    notify: AtomicBool,
    progress: Mutex<(i64, i64)>,
    mime_type: Mutex<String>,
    callback: Mutex<Option<TaskCallback>>,
}

impl TaskShared {
    pub(crate) fn new(task_id: u32) -> Self {
        Self {
            task_id,
            notify: AtomicBool::new(true),
            progress: Mutex::new((0, -1)),
            mime_type: Mutex::new(String::new()),
            callback: Mutex::new(None),
        }
    }

    pub(crate) fn set_notify(&self, notify: bool) {
        self.notify.store(notify, Ordering::Release);
    }

    pub(crate) fn notify(&self) -> bool {
        self.notify.load(Ordering::Acquire)
    }

    pub(crate) fn progress(&self) -> (i64, i64) {
        *self.progress.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn mime_type(&self) -> String {
        self.mime_type
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn install_callback(&self, callback: TaskCallback) {
        *self.callback.lock().unwrap_or_else(PoisonError::into_inner) = Some(callback);
    }

    /// Delivers `event` to the installed callback.
    ///
    /// Progress is dropped while notification is disabled.
    pub(crate) fn emit(&self, event: TaskEvent) {
        if event.is_progress() && !self.notify() {
            return;
        }
        let callback = self
            .callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(callback) = callback {
            callback(self.task_id, &event);
        }
    }
}

/// Handle given to a [`Transfer`] for a single attempt.
#[derive(Clone)]
pub struct TransferControl {
    interrupted: Arc<AtomicBool>,
    shared: Arc<TaskShared>,
}

impl TransferControl {
    pub(crate) fn new(interrupted: Arc<AtomicBool>, shared: Arc<TaskShared>) -> Self {
        Self {
            interrupted,
            shared,
        }
    }

    /// Returns the id of the task being transferred.
    pub fn task_id(&self) -> u32 {
        self.shared.task_id
    }

    /// Returns `true` once the task was paused or removed.
    pub fn is_interrupted(&self) -> bool {
        self.interrupted.load(Ordering::Acquire)
    }

    /// Records progress and reports it to the owner if notification is on.
    pub fn report_progress(&self, received: i64, total: i64) {
        *self
            .shared
            .progress
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = (received, total);
        self.shared.emit(TaskEvent::Progress { received, total });
    }

    /// Records the mime type announced by the server.
    pub fn set_mime_type(&self, mime_type: &str) {
        *self
            .shared
            .mime_type
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = mime_type.to_string();
    }
}
