// Copyright (C) 2025 Huawei Device Co., Ltd.
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

use std::sync::{Arc, Mutex, PoisonError};

use super::wrapper::NetObserverWrapper;
use super::Observer;

/// Holds network observers and the live subscription that feeds them.
///
/// Observers may be added at any time. Events only flow once
/// [`register`](NetRegistrar::register) has been called and stop again after
/// [`unregister`](NetRegistrar::unregister).
pub struct NetRegistrar {
    observer: Arc<Mutex<Vec<Box<dyn Observer>>>>,
    registration: Mutex<Option<NetObserverWrapper>>,
}

impl NetRegistrar {
    /// Creates a registrar without observers or subscription.
    pub fn new() -> Self {
        Self {
            observer: Arc::new(Mutex::new(Vec::new())),
            registration: Mutex::new(None),
        }
    }

    /// Adds an observer which will receive every subsequent event.
    pub fn add_observer(&self, observer: impl Observer + 'static) {
        self.observer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(observer));
    }

    /// Drops every observer added so far.
    pub fn clear_observers(&self) {
        self.observer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Starts the subscription.
    pub fn register(&self) -> Result<(), NetRegisterError> {
        let mut registration = self
            .registration
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if registration.is_some() {
            return Err(NetRegisterError::AlreadyRegistered);
        }
        *registration = Some(NetObserverWrapper::new(self.observer.clone()));
        Ok(())
    }

    /// Ends the subscription.
    pub fn unregister(&self) -> Result<(), NetUnregisterError> {
        let mut registration = self
            .registration
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match registration.take() {
            Some(_) => Ok(()),
            None => Err(NetUnregisterError::NotRegistered),
        }
    }

    /// Returns the dispatcher the platform forwards events to, if subscribed.
    pub fn notifier(&self) -> Option<NetObserverWrapper> {
        self.registration
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Errors returned by [`NetRegistrar::register`].
#[derive(Debug, PartialEq, Eq)]
pub enum NetRegisterError {
    /// A subscription is already active.
    AlreadyRegistered,
}

/// Errors returned by [`NetRegistrar::unregister`].
#[derive(Debug, PartialEq, Eq)]
pub enum NetUnregisterError {
    /// There is no active subscription.
    NotRegistered,
}

include!("../../../tests/ut/observe/network/ut_register.rs");
