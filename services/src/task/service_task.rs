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

//! A single download job.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::config::DownloadConfig;
use super::info::{DownloadErrorCode, DownloadInfo, DownloadStatus, PausedReason, RunResult};
use super::notify::{TaskCallback, TaskEvent};
use super::transfer::{TaskShared, Transfer, TransferControl, TransferError};
use crate::manage::network::Network;

/// Mutable state of a task guarded by its own lock.
struct TaskState {
    status: DownloadStatus,
    code: DownloadErrorCode,
    reason: PausedReason,
    retry_left: u32,
    removed: bool,
    /// Bumped by pause and remove so a transfer started earlier knows its
    /// outcome is stale.
    epoch: u64,
    /// Interrupt flag of the attempt in flight.
    interrupt: Option<Arc<AtomicBool>>,
}

/// One download job driven by the workers.
pub(crate) struct DownloadServiceTask {
    task_id: u32,
    config: DownloadConfig,
    network: Network,
    transfer: Arc<dyn Transfer>,
    running: AtomicBool,
    state: Mutex<TaskState>,
    shared: Arc<TaskShared>,
}

impl DownloadServiceTask {
    /// Creates a task in the `Unknown` status so it routes into pending.
    pub(crate) fn new(
        task_id: u32,
        config: DownloadConfig,
        network: Network,
        transfer: Arc<dyn Transfer>,
    ) -> Self {
        Self {
            task_id,
            config,
            network,
            transfer,
            running: AtomicBool::new(false),
            state: Mutex::new(TaskState {
                status: DownloadStatus::Unknown,
                code: DownloadErrorCode::NoError,
                reason: PausedReason::Unknown,
                retry_left: 0,
                removed: false,
                epoch: 0,
                interrupt: None,
            }),
            shared: Arc::new(TaskShared::new(task_id)),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, TaskState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn task_id(&self) -> u32 {
        self.task_id
    }

    pub(crate) fn bundle_name(&self) -> &str {
        &self.config.bundle
    }

    pub(crate) fn uid(&self) -> u64 {
        self.config.uid
    }

    /// Returns `true` while a worker is executing this task.
    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Executes one attempt of the transfer.
    ///
    /// # Returns
    ///
    /// `true` only if the transfer completed successfully. Any other outcome
    /// is recorded in the run result. Returns `false` without touching the
    /// task if another worker is already executing it.
    pub(crate) fn run(&self) -> bool {
        if self.running.swap(true, Ordering::AcqRel) {
            debug!("task {} is already running", self.task_id);
            return false;
        }
        let ret = self.run_once();
        self.running.store(false, Ordering::Release);
        ret
    }

    fn run_once(&self) -> bool {
        let (epoch, interrupt) = {
            let mut state = self.lock_state();
            if state.removed
                || matches!(
                    state.status,
                    DownloadStatus::Paused | DownloadStatus::Success | DownloadStatus::Failed
                )
            {
                return false;
            }
            if let Err(reason) = self.config.satisfy_network(&self.network.state()) {
                info!("task {} paused, network unsatisfied {:?}", self.task_id, reason);
                Self::park(&mut state, reason);
                drop(state);
                self.shared.emit(TaskEvent::Pause(reason));
                return false;
            }
            state.status = DownloadStatus::Running;
            state.code = DownloadErrorCode::NoError;
            state.reason = PausedReason::Unknown;
            let interrupt = Arc::new(AtomicBool::new(false));
            state.interrupt = Some(interrupt.clone());
            (state.epoch, interrupt)
        };

        debug!("task {} transfer start", self.task_id);
        let control = TransferControl::new(interrupt, self.shared.clone());
        let outcome = self.transfer.transfer(&self.config, &control);

        let mut state = self.lock_state();
        state.interrupt = None;
        if state.removed || state.epoch != epoch {
            debug!("task {} outcome {:?} discarded", self.task_id, outcome);
            return false;
        }
        let event = match outcome {
            Ok(()) => {
                info!("task {} completed", self.task_id);
                state.status = DownloadStatus::Success;
                state.code = DownloadErrorCode::NoError;
                Some(TaskEvent::Complete)
            }
            Err(TransferError::Offline) => {
                Self::park(&mut state, PausedReason::WaitingForNetwork);
                Some(TaskEvent::Pause(PausedReason::WaitingForNetwork))
            }
            Err(TransferError::Interrupted) => {
                match self.config.satisfy_network(&self.network.state()) {
                    Ok(()) => {
                        state.status = DownloadStatus::Unknown;
                        state.reason = PausedReason::Unknown;
                        None
                    }
                    Err(reason) => {
                        Self::park(&mut state, reason);
                        Some(TaskEvent::Pause(reason))
                    }
                }
            }
            Err(TransferError::Failed { code, retryable }) if retryable && state.retry_left > 0 => {
                state.retry_left -= 1;
                info!(
                    "task {} failed with {:?}, {} retries left",
                    self.task_id, code, state.retry_left
                );
                state.status = DownloadStatus::Paused;
                state.code = code;
                state.reason = PausedReason::WaitingToRetry;
                Some(TaskEvent::Pause(PausedReason::WaitingToRetry))
            }
            Err(TransferError::Failed { code, .. }) => {
                error!("task {} failed with {:?}", self.task_id, code);
                state.status = DownloadStatus::Failed;
                state.code = code;
                Some(TaskEvent::Fail(code))
            }
        };
        let success = state.status == DownloadStatus::Success;
        drop(state);
        if let Some(event) = event {
            self.shared.emit(event);
        }
        success
    }

    fn park(state: &mut TaskState, reason: PausedReason) {
        state.status = DownloadStatus::Paused;
        state.reason = reason;
        state.code = match reason {
            PausedReason::WaitingForNetwork => DownloadErrorCode::Offline,
            _ => DownloadErrorCode::UnsupportedNetworkType,
        };
    }

    /// Pauses the task on behalf of its owner.
    ///
    /// Succeeds from `Unknown`, `Pending` and `Running`, and overrides an
    /// automatic pause.
    pub(crate) fn pause(&self) -> bool {
        let mut state = self.lock_state();
        if state.removed {
            return false;
        }
        let pausable = match state.status {
            DownloadStatus::Unknown | DownloadStatus::Pending | DownloadStatus::Running => true,
            DownloadStatus::Paused => state.reason != PausedReason::ByUser,
            DownloadStatus::Success | DownloadStatus::Failed => false,
        };
        if !pausable {
            return false;
        }
        state.status = DownloadStatus::Paused;
        state.reason = PausedReason::ByUser;
        state.epoch += 1;
        if let Some(interrupt) = state.interrupt.as_ref() {
            interrupt.store(true, Ordering::Release);
        }
        drop(state);
        info!("task {} paused by user", self.task_id);
        self.shared.emit(TaskEvent::Pause(PausedReason::ByUser));
        true
    }

    /// Resumes a paused task, making it eligible for scheduling again.
    pub(crate) fn resume(&self) -> bool {
        let mut state = self.lock_state();
        if state.removed || state.status != DownloadStatus::Paused {
            return false;
        }
        state.status = DownloadStatus::Unknown;
        state.reason = PausedReason::Unknown;
        state.code = DownloadErrorCode::NoError;
        drop(state);
        info!("task {} resumed", self.task_id);
        self.shared.emit(TaskEvent::Resume);
        true
    }

    /// Cancels the task and releases its transfer artifacts.
    ///
    /// Repeated calls succeed without releasing again.
    pub(crate) fn remove(&self) -> bool {
        let mut state = self.lock_state();
        if state.removed {
            return true;
        }
        state.removed = true;
        state.epoch += 1;
        if let Some(interrupt) = state.interrupt.as_ref() {
            interrupt.store(true, Ordering::Release);
        }
        drop(state);
        info!("task {} removed", self.task_id);
        self.transfer.release(&self.config);
        self.shared.emit(TaskEvent::Remove);
        true
    }

    /// Snapshots the task.
    pub(crate) fn query(&self) -> DownloadInfo {
        let (downloaded_bytes, total_size) = self.shared.progress();
        let state = self.lock_state();
        DownloadInfo {
            task_id: self.task_id,
            url: self.config.url.clone(),
            file_path: self.config.file_path.clone(),
            title: self.config.title.clone(),
            description: self.config.description.clone(),
            bundle: self.config.bundle.clone(),
            uid: self.config.uid,
            status: state.status,
            code: state.code,
            reason: state.reason,
            downloaded_bytes,
            total_size,
            mime_type: self.shared.mime_type(),
            retry_left: state.retry_left,
            notify: self.shared.notify(),
        }
    }

    pub(crate) fn query_mime_type(&self) -> String {
        self.shared.mime_type()
    }

    pub(crate) fn get_run_result(&self) -> RunResult {
        let state = self.lock_state();
        RunResult {
            status: state.status,
            code: state.code,
            reason: state.reason,
        }
    }

    pub(crate) fn set_notify_app(&self, notify: bool) {
        self.shared.set_notify(notify);
    }

    pub(crate) fn set_retry_time(&self, retry: u32) {
        self.lock_state().retry_left = retry;
    }

    pub(crate) fn install_callback(&self, callback: TaskCallback) {
        self.shared.install_callback(callback);
    }

    /// Asks the transfer in flight to stop without superseding its attempt.
    ///
    /// The `Interrupted` outcome is then mapped against the current network.
    ///
    /// # Returns
    ///
    /// `true` if a transfer was in flight.
    pub(crate) fn interrupt(&self) -> bool {
        let state = self.lock_state();
        match state.interrupt.as_ref() {
            Some(interrupt) => {
                interrupt.store(true, Ordering::Release);
                debug!("task {} transfer interrupted", self.task_id);
                true
            }
            None => false,
        }
    }

    pub(crate) fn is_satisfied_configuration(&self) -> bool {
        self.config.satisfy_network(&self.network.state()).is_ok()
    }
}
