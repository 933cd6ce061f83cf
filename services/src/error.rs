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

use core::fmt;

/// Error codes surfaced to callers of the download service.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(i32)]
pub enum ErrorCode {
    /// No error. Success is reported through `Ok`, the code only completes
    /// the table shared with callers.
    ErrOk = 0,
    /// The manager has not been created yet or has been destroyed.
    ServiceNotInitialize = 1,
    /// The service is unloading itself and refuses new work.
    ServiceSaQuitting = 2,
    /// The allocated task id already exists in the task table.
    DuplicateTaskId = 3,
    /// A task record could not be constructed.
    NullPointer = 4,
}

/// Errors raised inside the service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServiceError {
    /// A plain error code.
    ErrorCode(ErrorCode),
    /// The service host refused to unload the service, carrying its code.
    UnloadFailed(i32),
}

impl From<ErrorCode> for ServiceError {
    fn from(value: ErrorCode) -> Self {
        ServiceError::ErrorCode(value)
    }
}

impl std::error::Error for ServiceError {}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ServiceError::ErrorCode(code) => write!(f, "{:?}", code),
            ServiceError::UnloadFailed(code) => write!(f, "unload system ability failed: {}", code),
        }
    }
}
