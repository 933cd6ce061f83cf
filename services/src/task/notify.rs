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

//! Per-task event delivery.

use std::sync::Arc;

use super::info::{DownloadErrorCode, PausedReason};

/// Event delivered to the callback installed on a task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskEvent {
    /// Transfer progress, `total` is `-1` when unknown.
    Progress {
        /// Bytes received so far.
        received: i64,
        /// Total size in bytes.
        total: i64,
    },
    /// The task finished successfully.
    Complete,
    /// The task failed terminally.
    Fail(DownloadErrorCode),
    /// The task was paused.
    Pause(PausedReason),
    /// The task was resumed by its owner.
    Resume,
    /// The task was removed.
    Remove,
}

impl TaskEvent {
    /// Returns `true` for events that may be suppressed while the owner is
    /// not in the foreground.
    pub fn is_progress(&self) -> bool {
        matches!(self, TaskEvent::Progress { .. })
    }
}

/// Callback receiving the task id and the event.
///
/// Invoked on worker or monitor threads, sometimes while the manager lock is
/// held, so it must not call back into the manager.
pub type TaskCallback = Arc<dyn Fn(u32, &TaskEvent) + Send + Sync>;
