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

//! The download service manager.
//!
//! [`DownloadServiceManager`] owns the task table together with the pending
//! and paused queues. Worker threads pull task ids from the front of the
//! pending queue, run them without holding the manager lock, then route them
//! back by the status they ended in:
//!
//! | status    | destination                     |
//! |-----------|---------------------------------|
//! | `Paused`  | paused queue                    |
//! | `Unknown` | pending queue                   |
//! | otherwise | neither (running or terminal)   |
//!
//! `task_count` counts the ids resident in either queue plus the tasks being
//! executed. When it drops to zero the idle countdown is armed and, once it
//! fires with the counter still at zero, the service asks its host to be
//! unloaded.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use request_utils::observe::app_state::ApplicationState;
use tokio::runtime::{Handle, Runtime};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::config::ServiceConfig;
use super::events::StateEvent;
use super::keeper::SaKeeper;
use super::monitor::{self, Watchers};
use super::network::Network;
use super::queue::TaskQueue;
use super::worker::{DownloadThread, Job};
use crate::error::{ErrorCode, ServiceError};
use crate::service::host::SystemAbilityHost;
use crate::task::config::DownloadConfig;
use crate::task::info::{DownloadInfo, DownloadStatus, PausedReason};
use crate::task::notify::TaskCallback;
use crate::task::service_task::DownloadServiceTask;
use crate::task::transfer::Transfer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum QueueKind {
    Pending,
    Paused,
}

/// Everything guarded by the manager lock.
pub(crate) struct ManagerState {
    pub(crate) task_map: HashMap<u32, Arc<DownloadServiceTask>>,
    pub(crate) pending: TaskQueue,
    pub(crate) paused: TaskQueue,
    pub(crate) task_count: i64,
    pub(crate) next_task_id: u32,
}

impl ManagerState {
    fn new() -> Self {
        Self {
            task_map: HashMap::new(),
            pending: TaskQueue::new(),
            paused: TaskQueue::new(),
            task_count: 0,
            next_task_id: 0,
        }
    }

    fn queue_mut(&mut self, kind: QueueKind) -> &mut TaskQueue {
        match kind {
            QueueKind::Pending => &mut self.pending,
            QueueKind::Paused => &mut self.paused,
        }
    }

    /// Returns the task if it exists and belongs to `uid`.
    fn owned_task(&self, task_id: u32, uid: u64) -> Option<Arc<DownloadServiceTask>> {
        self.task_map
            .get(&task_id)
            .filter(|task| task.uid() == uid)
            .cloned()
    }
}

/// State shared by the manager, its workers, the monitor and the countdown.
///
/// Public entries lock `state` once and hand the guard to the helpers, which
/// never lock it again. Lock order is state, then keeper, then task.
pub(crate) struct ManagerInner {
    this: Weak<ManagerInner>,
    state: Mutex<ManagerState>,
    initialized: AtomicBool,
    quitting: AtomicBool,
    interval_ms: AtomicU64,
    config: ServiceConfig,
    keeper: SaKeeper,
    network: Network,
    transfer: Arc<dyn Transfer>,
    host: Arc<dyn SystemAbilityHost>,
}

impl ManagerInner {
    fn new(
        config: ServiceConfig,
        transfer: Arc<dyn Transfer>,
        host: Arc<dyn SystemAbilityHost>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            this: this.clone(),
            state: Mutex::new(ManagerState::new()),
            initialized: AtomicBool::new(false),
            quitting: AtomicBool::new(false),
            interval_ms: AtomicU64::new(config.interval.as_millis() as u64),
            config,
            keeper: SaKeeper::new(),
            network: Network::new(),
            transfer,
            host,
        })
    }

    pub(crate) fn lock_state(&self) -> MutexGuard<'_, ManagerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn network(&self) -> &Network {
        &self.network
    }

    pub(crate) fn retry_interval(&self) -> Duration {
        self.config.retry_interval
    }

    fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    fn add_task(&self, config: DownloadConfig) -> Result<u32, ErrorCode> {
        if !self.is_initialized() {
            error!("add task failed, service not initialized");
            return Err(ErrorCode::ServiceNotInitialize);
        }
        let mut state = self.lock_state();
        if self.quitting.load(Ordering::Acquire) {
            error!("add task failed, service is quitting");
            return Err(ErrorCode::ServiceSaQuitting);
        }
        let task_id = state.next_task_id;
        state.next_task_id = task_id.wrapping_add(1);
        if state.task_map.contains_key(&task_id) {
            error!("add task failed, task {} already exists", task_id);
            return Err(ErrorCode::DuplicateTaskId);
        }
        let task = Arc::new(DownloadServiceTask::new(
            task_id,
            config,
            self.network.clone(),
            self.transfer.clone(),
        ));
        task.set_retry_time(self.config.max_retry);
        state.task_map.insert(task_id, task.clone());
        self.move_task_to_queue(&mut state, task_id, &task);
        info!("add task {} ok", task_id);
        Ok(task_id)
    }

    /// Appends `task_id` to `kind` unless it is already queued there.
    ///
    /// Ids missing from the task table are ignored.
    fn push_queue(&self, state: &mut ManagerState, kind: QueueKind, task_id: u32) {
        if !state.task_map.contains_key(&task_id) {
            debug!("task {} not found, not queued", task_id);
            return;
        }
        if state.queue_mut(kind).push(task_id) {
            state.task_count += 1;
        }
    }

    fn remove_from_queue(&self, state: &mut ManagerState, kind: QueueKind, task_id: u32) {
        if state.queue_mut(kind).remove(task_id) {
            self.decrease_task_count(state);
        }
    }

    fn decrease_task_count(&self, state: &mut ManagerState) {
        state.task_count -= 1;
        if state.task_count <= 0 {
            self.arm_keeper();
        }
    }

    fn arm_keeper(&self) {
        let this = self.this.clone();
        self.keeper.arm(self.config.unload_wait, move |generation| {
            if let Some(inner) = this.upgrade() {
                inner.on_unload_timer(generation);
            }
        });
    }

    fn on_unload_timer(&self, generation: u64) {
        let state = self.lock_state();
        if !self.keeper.is_current(generation) {
            return;
        }
        if state.task_count <= 0 && self.is_initialized() {
            self.quitting.store(true, Ordering::Release);
            info!("no task left, unload service {}", self.config.service_id);
            if let Err(code) = self.host.unload_system_ability(self.config.service_id) {
                error!("{}", ServiceError::UnloadFailed(code));
                self.quitting.store(false, Ordering::Release);
            }
        }
        self.keeper.stop(generation);
    }

    /// Routes a task by its latest status.
    fn move_task_to_queue(
        &self,
        state: &mut ManagerState,
        task_id: u32,
        task: &DownloadServiceTask,
    ) {
        match task.get_run_result().status {
            DownloadStatus::Paused => {
                self.push_queue(state, QueueKind::Paused, task_id);
                self.remove_from_queue(state, QueueKind::Pending, task_id);
            }
            DownloadStatus::Unknown => {
                self.push_queue(state, QueueKind::Pending, task_id);
                self.remove_from_queue(state, QueueKind::Paused, task_id);
            }
            _ => {
                self.remove_from_queue(state, QueueKind::Pending, task_id);
                self.remove_from_queue(state, QueueKind::Paused, task_id);
            }
        }
    }

    fn pause(&self, task_id: u32, uid: u64) -> bool {
        if !self.is_initialized() {
            error!("pause task {} failed, service not initialized", task_id);
            return false;
        }
        let mut state = self.lock_state();
        let Some(task) = state.owned_task(task_id, uid) else {
            return false;
        };
        if !task.pause() {
            return false;
        }
        self.move_task_to_queue(&mut state, task_id, &task);
        true
    }

    fn resume(&self, task_id: u32, uid: u64) -> bool {
        if !self.is_initialized() {
            error!("resume task {} failed, service not initialized", task_id);
            return false;
        }
        let mut state = self.lock_state();
        let Some(task) = state.owned_task(task_id, uid) else {
            return false;
        };
        if !task.resume() {
            return false;
        }
        self.move_task_to_queue(&mut state, task_id, &task);
        true
    }

    fn remove(&self, task_id: u32, uid: u64) -> bool {
        if !self.is_initialized() {
            error!("remove task {} failed, service not initialized", task_id);
            return false;
        }
        let task = {
            let mut state = self.lock_state();
            let Some(task) = state.owned_task(task_id, uid) else {
                return false;
            };
            state.task_map.remove(&task_id);
            self.remove_from_queue(&mut state, QueueKind::Pending, task_id);
            self.remove_from_queue(&mut state, QueueKind::Paused, task_id);
            task
        };
        // Releasing may touch the file system, keep it out of the lock.
        task.remove()
    }

    /// Resumes the paused tasks whose reason passes `filter`.
    ///
    /// Visits each id queued at the start exactly once; ids left paused are
    /// rotated to the back in their original order.
    fn resume_paused<F>(&self, state: &mut ManagerState, filter: F)
    where
        F: Fn(PausedReason) -> bool,
    {
        let rounds = state.paused.len();
        for _ in 0..rounds {
            let Some(task_id) = state.paused.front() else {
                break;
            };
            let Some(task) = state.task_map.get(&task_id).cloned() else {
                self.remove_from_queue(state, QueueKind::Paused, task_id);
                continue;
            };
            if filter(task.get_run_result().reason) {
                task.resume();
                self.move_task_to_queue(state, task_id, &task);
            }
            if state.paused.front() == Some(task_id) {
                state.paused.rotate();
            }
        }
    }

    fn resume_task_by_network(&self, state: &mut ManagerState) {
        debug!("resume task by network, {} paused", state.paused.len());
        self.resume_paused(state, |reason| reason != PausedReason::ByUser);
    }

    fn resume_task_by_retry(&self, state: &mut ManagerState) {
        self.resume_paused(state, |reason| reason == PausedReason::WaitingToRetry);
    }

    fn update_network_type(&self, state: &mut ManagerState) {
        let mut task_ids: Vec<u32> = state.task_map.keys().copied().collect();
        task_ids.sort_unstable();
        for task_id in task_ids {
            let Some(task) = state.task_map.get(&task_id).cloned() else {
                continue;
            };
            let status = task.get_run_result().status;
            if matches!(
                status,
                DownloadStatus::Running | DownloadStatus::Pending | DownloadStatus::Paused
            ) && !task.is_satisfied_configuration()
            {
                debug!("task {} parked, network unsatisfied", task_id);
                if status == DownloadStatus::Running {
                    task.interrupt();
                }
                self.push_queue(state, QueueKind::Paused, task_id);
                self.remove_from_queue(state, QueueKind::Pending, task_id);
            }
        }
    }

    fn update_app_state(&self, state: &ManagerState, bundle: &str, uid: u64, app_state: i32) {
        let notify = match ApplicationState::from(app_state) {
            ApplicationState::Foreground => true,
            ApplicationState::Background | ApplicationState::Terminated => false,
            _ => return,
        };
        info!(
            "update app state, bundle {} uid {} notify {}",
            bundle, uid, notify
        );
        state
            .task_map
            .values()
            .filter(|task| task.uid() == uid && task.bundle_name() == bundle)
            .for_each(|task| task.set_notify_app(notify));
    }

    pub(crate) fn handle_state_event(&self, event: StateEvent) {
        let mut state = self.lock_state();
        match event {
            StateEvent::NetworkAvailable => {
                self.resume_task_by_network(&mut state);
                self.update_network_type(&mut state);
            }
            StateEvent::NetworkUnavailable => self.update_network_type(&mut state),
            StateEvent::AppStateChanged { bundle, uid, state: app_state } => {
                self.update_app_state(&state, &bundle, uid, app_state)
            }
        }
    }

    pub(crate) fn on_retry_tick(&self) {
        let mut state = self.lock_state();
        self.resume_task_by_retry(&mut state);
    }
}

impl Job for ManagerInner {
    fn process(&self) -> bool {
        let task = {
            let mut state = self.lock_state();
            let Some(task_id) = state.pending.pop_front() else {
                return false;
            };
            match state.task_map.get(&task_id).cloned() {
                Some(task) => task,
                None => {
                    debug!("task {} not found", task_id);
                    self.decrease_task_count(&mut state);
                    return true;
                }
            }
        };
        let busy = task.is_running();
        if !busy {
            task.run();
        }
        let mut state = self.lock_state();
        self.move_task_to_queue(&mut state, task.task_id(), &task);
        self.decrease_task_count(&mut state);
        !busy
    }

    fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.load(Ordering::Relaxed))
    }
}

/// Threads and tasks owned between `create` and `destroy`.
struct Lifecycle {
    runtime: Option<Runtime>,
    workers: Vec<DownloadThread>,
    monitor: Option<JoinHandle<()>>,
    shutdown: Option<watch::Sender<bool>>,
}

/// Schedules download tasks over a pool of workers.
///
/// Constructed once by the process entry and torn down explicitly with
/// [`destroy`](DownloadServiceManager::destroy), or on drop.
pub struct DownloadServiceManager {
    inner: Arc<ManagerInner>,
    watchers: Watchers,
    lifecycle: Mutex<Lifecycle>,
}

impl DownloadServiceManager {
    /// Creates a manager. No thread is started until [`create`](Self::create).
    ///
    /// # Arguments
    ///
    /// * `config` - Service tuning knobs.
    /// * `transfer` - Executor performing the actual transfers.
    /// * `host` - Host asked to unload the service when idle.
    /// * `watchers` - Registrars through which the platform reports network
    ///   and application state.
    pub fn new(
        config: ServiceConfig,
        transfer: Arc<dyn Transfer>,
        host: Arc<dyn SystemAbilityHost>,
        watchers: Watchers,
    ) -> Self {
        Self {
            inner: ManagerInner::new(config, transfer, host),
            watchers,
            lifecycle: Mutex::new(Lifecycle {
                runtime: None,
                workers: Vec::new(),
                monitor: None,
                shutdown: None,
            }),
        }
    }

    fn lock_lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts `thread_num` workers and the monitor.
    ///
    /// Calling it again after success does nothing.
    ///
    /// # Returns
    ///
    /// `true` once the manager is initialized.
    pub fn create(&self, thread_num: usize) -> bool {
        let mut lifecycle = self.lock_lifecycle();
        if self.inner.initialized.load(Ordering::Acquire) {
            return true;
        }
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("download-monitor")
            .enable_time()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                error!("build runtime failed: {}", e);
                return false;
            }
        };

        let mut workers = Vec::with_capacity(thread_num);
        for index in 0..thread_num {
            match DownloadThread::start(index, self.inner.clone()) {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    error!("start download worker {} failed: {}", index, e);
                    return false;
                }
            }
        }

        self.inner.keeper.attach(runtime.handle().clone());
        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let monitor = runtime.spawn(monitor::run(
            self.inner.clone(),
            self.watchers.clone(),
            tx,
            rx,
            shutdown_rx,
        ));

        lifecycle.runtime = Some(runtime);
        lifecycle.workers = workers;
        lifecycle.monitor = Some(monitor);
        lifecycle.shutdown = Some(shutdown_tx);
        self.inner.quitting.store(false, Ordering::Release);
        self.inner.initialized.store(true, Ordering::Release);

        let state = self.inner.lock_state();
        if state.task_count <= 0 {
            self.inner.arm_keeper();
        }
        info!("download service manager created, {} workers", thread_num);
        true
    }

    /// Stops the workers and the monitor and cancels the idle countdown.
    ///
    /// Tasks being executed finish their current attempt first.
    pub fn destroy(&self) {
        let mut lifecycle = self.lock_lifecycle();
        if !self.inner.initialized.swap(false, Ordering::AcqRel) {
            return;
        }
        for worker in lifecycle.workers.iter_mut() {
            worker.stop();
        }
        lifecycle.workers.clear();
        if let Some(shutdown) = lifecycle.shutdown.take() {
            let _ = shutdown.send(true);
        }
        self.inner.keeper.shutdown();
        let monitor = lifecycle.monitor.take();
        if let Some(runtime) = lifecycle.runtime.take() {
            if let Some(monitor) = monitor {
                if Handle::try_current().is_err() {
                    if let Err(e) = runtime.block_on(monitor) {
                        error!("monitor exited abnormally: {}", e);
                    }
                } else {
                    // Blocking is not allowed here, the monitor is dropped
                    // before it can unregister.
                    monitor.abort();
                    monitor::detach(&self.watchers);
                }
            }
            runtime.shutdown_background();
        }
        info!("download service manager destroyed");
    }

    /// Returns `true` between `create` and `destroy`.
    pub fn is_initialized(&self) -> bool {
        self.inner.is_initialized()
    }

    /// Returns `true` while the service is unloading itself.
    pub fn is_quitting(&self) -> bool {
        self.inner.quitting.load(Ordering::Acquire)
    }

    /// Submits a new task.
    ///
    /// # Errors
    ///
    /// * `ServiceNotInitialize` - the manager is not created.
    /// * `ServiceSaQuitting` - the service is unloading.
    /// * `DuplicateTaskId` - the allocated id is still in use.
    pub fn add_task(&self, config: DownloadConfig) -> Result<u32, ErrorCode> {
        self.inner.add_task(config)
    }

    /// Installs the event callback of a task.
    ///
    /// Task operations and queries below report a missing task while the
    /// manager is not initialized.
    pub fn install_callback(&self, task_id: u32, callback: TaskCallback) -> bool {
        if !self.inner.is_initialized() {
            return false;
        }
        let state = self.inner.lock_state();
        match state.task_map.get(&task_id) {
            Some(task) => {
                task.install_callback(callback);
                true
            }
            None => false,
        }
    }

    /// Pauses a task owned by `uid`.
    ///
    /// A task owned by another uid is reported as missing.
    pub fn pause(&self, task_id: u32, uid: u64) -> bool {
        self.inner.pause(task_id, uid)
    }

    /// Resumes a task owned by `uid`.
    pub fn resume(&self, task_id: u32, uid: u64) -> bool {
        self.inner.resume(task_id, uid)
    }

    /// Removes a task owned by `uid`.
    pub fn remove(&self, task_id: u32, uid: u64) -> bool {
        self.inner.remove(task_id, uid)
    }

    /// Snapshots any task.
    pub fn query(&self, task_id: u32) -> Option<DownloadInfo> {
        if !self.inner.is_initialized() {
            return None;
        }
        let state = self.inner.lock_state();
        state.task_map.get(&task_id).map(|task| task.query())
    }

    /// Snapshots a task owned by `uid`.
    pub fn query_with_uid(&self, task_id: u32, uid: u64) -> Option<DownloadInfo> {
        if !self.inner.is_initialized() {
            return None;
        }
        let state = self.inner.lock_state();
        state.owned_task(task_id, uid).map(|task| task.query())
    }

    /// Returns the mime type of a task owned by `uid`.
    pub fn query_mime_type(&self, task_id: u32, uid: u64) -> Option<String> {
        if !self.inner.is_initialized() {
            return None;
        }
        let state = self.inner.lock_state();
        state
            .owned_task(task_id, uid)
            .map(|task| task.query_mime_type())
    }

    /// Snapshots every task, ordered by id.
    pub fn query_all_task(&self) -> Vec<DownloadInfo> {
        if !self.inner.is_initialized() {
            return Vec::new();
        }
        let state = self.inner.lock_state();
        let mut infos: Vec<DownloadInfo> = state.task_map.values().map(|task| task.query()).collect();
        infos.sort_by_key(|info| info.task_id);
        infos
    }

    /// Resumes every task paused for another reason than the user.
    pub fn resume_task_by_network(&self) {
        let mut state = self.inner.lock_state();
        self.inner.resume_task_by_network(&mut state);
    }

    /// Resumes every task waiting to retry.
    pub fn resume_task_by_retry(&self) {
        self.inner.on_retry_tick();
    }

    /// Parks every active task the current network no longer satisfies.
    pub fn update_network_type(&self) {
        let mut state = self.inner.lock_state();
        self.inner.update_network_type(&mut state);
    }

    /// Toggles progress notification of the tasks owned by `(bundle, uid)`.
    pub fn update_app_state(&self, bundle: &str, uid: u64, state: i32) {
        let guard = self.inner.lock_state();
        self.inner.update_app_state(&guard, bundle, uid, state);
    }

    /// Returns the id the next task will get.
    pub fn start_id(&self) -> u32 {
        self.inner.lock_state().next_task_id
    }

    /// Sets the polling interval of idle workers.
    pub fn set_interval(&self, interval: Duration) {
        self.inner
            .interval_ms
            .store(interval.as_millis() as u64, Ordering::Relaxed);
    }

    /// Returns the polling interval of idle workers.
    pub fn interval(&self) -> Duration {
        self.inner.interval()
    }

    /// Returns the number of queued and executing tasks.
    pub fn task_count(&self) -> i64 {
        self.inner.lock_state().task_count
    }

    /// Returns the length of the pending queue.
    pub fn pending_len(&self) -> usize {
        self.inner.lock_state().pending.len()
    }

    /// Returns the length of the paused queue.
    pub fn paused_len(&self) -> usize {
        self.inner.lock_state().paused.len()
    }
}

impl Drop for DownloadServiceManager {
    fn drop(&mut self) {
        self.destroy();
    }
}
