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

use super::*;

// @tc.name: ut_service_config_default
// @tc.desc: Test default service configuration
// @tc.precon: NA
// @tc.step: 1. Build a config without overrides
// @tc.expect: Every knob holds its default
// @tc.type: FUNC
// @tc.require: issues#ICN31I
#[test]
fn ut_service_config_default() {
    let config = ServiceConfigBuilder::new().build();
    assert_eq!(config, ServiceConfig::default());
    assert_eq!(config.thread_num(), 4);
    assert_eq!(config.interval(), Duration::from_secs(1));
    assert_eq!(config.max_retry(), 3);
    assert_eq!(config.unload_wait(), Duration::from_secs(60));
    assert_eq!(config.retry_interval(), Duration::from_secs(30));
    assert_eq!(config.service_id(), 3706);
}

// @tc.name: ut_service_config_builder
// @tc.desc: Test overriding every knob
// @tc.precon: NA
// @tc.step: 1. Build a config overriding all fields
// @tc.expect: Getters return the overrides
// @tc.type: FUNC
// @tc.require: issues#ICN31I
#[test]
fn ut_service_config_builder() {
    let config = ServiceConfigBuilder::new()
        .thread_num(2)
        .interval(Duration::from_millis(10))
        .max_retry(0)
        .unload_wait(Duration::from_millis(200))
        .retry_interval(Duration::from_millis(50))
        .service_id(1)
        .build();
    assert_eq!(config.thread_num(), 2);
    assert_eq!(config.interval(), Duration::from_millis(10));
    assert_eq!(config.max_retry(), 0);
    assert_eq!(config.unload_wait(), Duration::from_millis(200));
    assert_eq!(config.retry_interval(), Duration::from_millis(50));
    assert_eq!(config.service_id(), 1);
}
