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

//! Application lifecycle observation.
//!
//! Mirrors the network side: observers are collected in an
//! [`AppStateRegistrar`], and once registered the platform glue forwards
//! every lifecycle change to the [`AppStateObserverWrapper`] it obtains from
//! [`AppStateRegistrar::notifier`].

use std::sync::{Arc, Mutex, PoisonError};

/// Lifecycle states an application can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum ApplicationState {
    /// The application is being created.
    Create = 0,
    /// The application is ready.
    Ready = 1,
    /// The application is in the foreground.
    Foreground = 2,
    /// The application holds input focus.
    Focus = 3,
    /// The application moved to the background.
    Background = 4,
    /// The application has terminated.
    Terminated = 5,
    /// Sentinel for values outside the known range.
    End = 6,
}

impl From<i32> for ApplicationState {
    fn from(value: i32) -> Self {
        match value {
            0 => ApplicationState::Create,
            1 => ApplicationState::Ready,
            2 => ApplicationState::Foreground,
            3 => ApplicationState::Focus,
            4 => ApplicationState::Background,
            5 => ApplicationState::Terminated,
            _ => ApplicationState::End,
        }
    }
}

/// Receiver of application lifecycle changes.
pub trait AppStateObserver: Send + Sync {
    /// The application `bundle` running as `uid` entered `state`.
    fn app_state_changed(&self, bundle: &str, uid: u64, state: i32);
}

/// Fans lifecycle changes out to a shared collection of observers.
#[derive(Clone)]
pub struct AppStateObserverWrapper {
    inner: Arc<Mutex<Vec<Box<dyn AppStateObserver>>>>,
}

impl AppStateObserverWrapper {
    /// Creates a wrapper dispatching to `inner`.
    pub fn new(inner: Arc<Mutex<Vec<Box<dyn AppStateObserver>>>>) -> Self {
        Self { inner }
    }

    /// Notifies every observer of a lifecycle change.
    pub fn app_state_changed(&self, bundle: &str, uid: u64, state: i32) {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        for observer in inner.iter() {
            observer.app_state_changed(bundle, uid, state);
        }
    }
}

/// Holds lifecycle observers and the live subscription that feeds them.
pub struct AppStateRegistrar {
    observer: Arc<Mutex<Vec<Box<dyn AppStateObserver>>>>,
    registration: Mutex<Option<AppStateObserverWrapper>>,
}

impl AppStateRegistrar {
    /// Creates a registrar without observers or subscription.
    pub fn new() -> Self {
        Self {
            observer: Arc::new(Mutex::new(Vec::new())),
            registration: Mutex::new(None),
        }
    }

    /// Adds an observer which will receive every subsequent change.
    pub fn add_observer(&self, observer: impl AppStateObserver + 'static) {
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

    /// Starts the subscription. Returns `false` if already subscribed.
    pub fn register(&self) -> bool {
        let mut registration = self
            .registration
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if registration.is_some() {
            return false;
        }
        *registration = Some(AppStateObserverWrapper::new(self.observer.clone()));
        true
    }

    /// Ends the subscription. Returns `false` if not subscribed.
    pub fn unregister(&self) -> bool {
        self.registration
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some()
    }

    /// Returns the dispatcher the platform forwards changes to, if subscribed.
    pub fn notifier(&self) -> Option<AppStateObserverWrapper> {
        self.registration
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
