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

//! Task status and snapshots.

/// Execution status of a download task.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum DownloadStatus {
    /// Waiting to be picked up by a worker.
    Pending = 0,
    /// Being transferred by a worker.
    Running,
    /// Deferred until a network, retry or user condition clears.
    Paused,
    /// Finished successfully.
    Success,
    /// Finished with a terminal error.
    Failed,
    /// Eligible for scheduling; freshly created or resumed.
    Unknown,
}

/// Error reported by a task.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum DownloadErrorCode {
    /// No error.
    NoError = 0,
    /// A partial download could not be resumed.
    CannotResume,
    /// The storage device could not be found.
    DeviceNotFound,
    /// The storage device has insufficient space.
    InsufficientSpace,
    /// The target file already exists.
    FileAlreadyExists,
    /// A file operation failed.
    FileError,
    /// The server sent malformed data.
    HttpDataError,
    /// Too many redirects were followed.
    TooManyRedirects,
    /// The server answered with an unhandled status code.
    UnhandledHttpCode,
    /// Unclassified error.
    Unknown,
    /// There is no network connection.
    Offline,
    /// The current network does not match the task configuration.
    UnsupportedNetworkType,
}

/// Why a task is paused.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum PausedReason {
    /// A retryable failure occurred; the task waits for the retry tick.
    WaitingToRetry = 0,
    /// The device is offline.
    WaitingForNetwork,
    /// The current network does not match the task configuration.
    QueuedForWifi,
    /// The owner paused the task.
    ByUser,
    /// Not paused, or no reason recorded.
    Unknown,
}

/// Latest outcome of a task, used to route it between queues.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RunResult {
    /// Current status.
    pub status: DownloadStatus,
    /// Current error code.
    pub code: DownloadErrorCode,
    /// Current paused reason.
    pub reason: PausedReason,
}

/// Snapshot of a task as reported to callers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadInfo {
    /// Task id.
    pub task_id: u32,
    /// Target URL.
    pub url: String,
    /// Local file path.
    pub file_path: String,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Owner bundle name.
    pub bundle: String,
    /// Owner uid.
    pub uid: u64,
    /// Current status.
    pub status: DownloadStatus,
    /// Current error code.
    pub code: DownloadErrorCode,
    /// Current paused reason.
    pub reason: PausedReason,
    /// Bytes received so far.
    pub downloaded_bytes: i64,
    /// Total size in bytes, `-1` when unknown.
    pub total_size: i64,
    /// Mime type reported by the transfer.
    pub mime_type: String,
    /// Retries left before a retryable failure becomes terminal.
    pub retry_left: u32,
    /// Whether progress is currently reported to the owner.
    pub notify: bool,
}

impl DownloadInfo {
    /// Returns `true` if the task is in a terminal state.
    pub fn is_finished(&self) -> bool {
        matches!(self.status, DownloadStatus::Success | DownloadStatus::Failed)
    }
}
