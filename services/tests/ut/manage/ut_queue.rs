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

use rand::Rng;

use super::*;

fn snapshot(queue: &TaskQueue) -> Vec<u32> {
    queue.iter().copied().collect()
}

// @tc.name: ut_queue_push_dedup
// @tc.desc: Test that pushing a queued id keeps the queue unchanged
// @tc.precon: NA
// @tc.step: 1. Push 1, 2, 3
//           2. Push 2 and 1 again
// @tc.expect: No duplicates and the original order is kept
// @tc.type: FUNC
// @tc.require: issues#ICN31I
#[test]
fn ut_queue_push_dedup() {
    let mut queue = TaskQueue::new();
    assert!(queue.is_empty());
    assert!(queue.push(1));
    assert!(queue.push(2));
    assert!(queue.push(3));
    assert!(!queue.push(2));
    assert!(!queue.push(1));
    assert_eq!(snapshot(&queue), vec![1, 2, 3]);
    assert_eq!(queue.len(), 3);
    assert!(queue.contains(2));
}

// @tc.name: ut_queue_remove
// @tc.desc: Test removal from the front, middle and of absent ids
// @tc.precon: NA
// @tc.step: 1. Remove an absent id
//           2. Remove the middle id, then the front id
//           3. Remove the only remaining id
// @tc.expect: Absent removal changes nothing, other ids keep their order
// @tc.type: FUNC
// @tc.require: issues#ICN31I
#[test]
fn ut_queue_remove() {
    let mut queue = TaskQueue::new();
    for id in 0..5 {
        queue.push(id);
    }
    assert!(!queue.remove(9));
    assert_eq!(snapshot(&queue), vec![0, 1, 2, 3, 4]);
    assert!(queue.remove(2));
    assert_eq!(snapshot(&queue), vec![0, 1, 3, 4]);
    assert!(queue.remove(0));
    assert_eq!(snapshot(&queue), vec![1, 3, 4]);
    assert!(!queue.contains(0));

    let mut single = TaskQueue::new();
    single.push(7);
    assert!(single.remove(7));
    assert!(single.is_empty());
    assert!(!single.remove(7));
}

// @tc.name: ut_queue_pop_rotate
// @tc.desc: Test FIFO pop and rotation
// @tc.precon: NA
// @tc.step: 1. Push 1, 2, 3 and rotate once
//           2. Pop every id
// @tc.expect: Ids come out as 2, 3, 1 and may be pushed again after popping
// @tc.type: FUNC
// @tc.require: issues#ICN31I
#[test]
fn ut_queue_pop_rotate() {
    let mut queue = TaskQueue::new();
    queue.rotate();
    for id in 1..=3 {
        queue.push(id);
    }
    queue.rotate();
    assert_eq!(queue.front(), Some(2));
    assert_eq!(queue.pop_front(), Some(2));
    assert!(queue.push(2));
    assert_eq!(snapshot(&queue), vec![3, 1, 2]);
    assert_eq!(queue.pop_front(), Some(3));
    assert_eq!(queue.pop_front(), Some(1));
    assert_eq!(queue.pop_front(), Some(2));
    assert_eq!(queue.pop_front(), None);
}

// @tc.name: ut_queue_random_operations
// @tc.desc: Test random operation sequences against a vector model
// @tc.precon: NA
// @tc.step: 1. Apply random push, remove and pop operations
//           2. Compare against a plain vector after every step
// @tc.expect: Queue and model never diverge
// @tc.type: FUNC
// @tc.require: issues#ICN31I
#[test]
fn ut_queue_random_operations() {
    let mut rng = rand::thread_rng();
    let mut queue = TaskQueue::new();
    let mut model: Vec<u32> = Vec::new();
    for _ in 0..2000 {
        let id = rng.gen_range(0..16);
        match rng.gen_range(0..3) {
            0 => {
                let inserted = queue.push(id);
                assert_eq!(inserted, !model.contains(&id));
                if inserted {
                    model.push(id);
                }
            }
            1 => {
                let removed = queue.remove(id);
                assert_eq!(removed, model.contains(&id));
                model.retain(|x| *x != id);
            }
            _ => {
                let expected = if model.is_empty() {
                    None
                } else {
                    Some(model.remove(0))
                };
                assert_eq!(queue.pop_front(), expected);
            }
        }
        assert_eq!(snapshot(&queue), model);
        assert_eq!(queue.len(), model.len());
    }
}
