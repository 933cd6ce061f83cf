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

//! Background download service.
//!
//! Applications submit download tasks which are executed by a fixed pool of
//! worker threads. Tasks are parked and resumed as the network and the state
//! of their owner change, and the service unloads itself once it has been
//! idle for a while.

#![allow(unreachable_pub, clippy::new_without_default)]
#![warn(
    missing_docs,
    clippy::redundant_static_lifetimes,
    clippy::enum_variant_names,
    clippy::clone_on_copy
)]

#[macro_use]
extern crate request_utils;

pub mod ability;
mod error;
mod manage;
mod service;
mod task;

pub use ability::RequestAbility;
pub use error::{ErrorCode, ServiceError};
pub use manage::config::{
    DEFAULT_INTERVAL, DEFAULT_MAX_RETRY, DEFAULT_RETRY_INTERVAL, DEFAULT_THREAD_NUM,
    DEFAULT_UNLOAD_WAIT, DOWNLOAD_SERVICE_ID,
};
pub use manage::{
    DownloadServiceManager, NetworkInfo, NetworkState, NetworkType, ServiceConfig,
    ServiceConfigBuilder, Watchers,
};
pub use service::host::SystemAbilityHost;
pub use task::{config, info, notify, transfer};
