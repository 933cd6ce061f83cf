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

//! Ordered, duplicate-free queue of task ids.

use std::collections::{HashSet, VecDeque};

/// FIFO of task ids with O(1) membership checks.
///
/// An id is stored at most once. Removing an id keeps the relative order of
/// the remaining ids.
#[derive(Debug, Default)]
pub(crate) struct TaskQueue {
    order: VecDeque<u32>,
    members: HashSet<u32>,
}

impl TaskQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends `task_id` unless it is already queued.
    ///
    /// # Returns
    ///
    /// `true` if the id was appended.
    pub(crate) fn push(&mut self, task_id: u32) -> bool {
        if !self.members.insert(task_id) {
            return false;
        }
        self.order.push_back(task_id);
        true
    }

    /// Removes `task_id` if queued.
    ///
    /// # Returns
    ///
    /// `true` if the id was present.
    pub(crate) fn remove(&mut self, task_id: u32) -> bool {
        if !self.members.remove(&task_id) {
            return false;
        }
        if self.order.front() == Some(&task_id) {
            self.order.pop_front();
        } else if let Some(pos) = self.order.iter().position(|id| *id == task_id) {
            self.order.remove(pos);
        }
        true
    }

    pub(crate) fn pop_front(&mut self) -> Option<u32> {
        let task_id = self.order.pop_front()?;
        self.members.remove(&task_id);
        Some(task_id)
    }

    pub(crate) fn front(&self) -> Option<u32> {
        self.order.front().copied()
    }

    /// Moves the front id to the back.
    pub(crate) fn rotate(&mut self) {
        if let Some(task_id) = self.order.pop_front() {
            self.order.push_back(task_id);
        }
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, task_id: u32) -> bool {
        self.members.contains(&task_id)
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = &u32> {
        self.order.iter()
    }
}
