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

// @tc.name: ut_enum_error_code
// @tc.desc: Test the values of ErrorCode enumeration
// @tc.precon: NA
// @tc.step: 1. Assert each ErrorCode variant's i32 value matches expected constants
// @tc.expect: All ErrorCode variants have correct i32 values as defined
// @tc.type: FUNC
// @tc.require: issues#ICN31I
#[test]
fn ut_enum_error_code() {
    assert_eq!(ErrorCode::ErrOk as i32, 0);
    assert_eq!(ErrorCode::ServiceNotInitialize as i32, 1);
    assert_eq!(ErrorCode::ServiceSaQuitting as i32, 2);
    assert_eq!(ErrorCode::DuplicateTaskId as i32, 3);
    assert_eq!(ErrorCode::NullPointer as i32, 4);
}

// @tc.name: ut_service_error_conversion
// @tc.desc: Test conversion and formatting of ServiceError
// @tc.precon: NA
// @tc.step: 1. Convert an ErrorCode into ServiceError
//           2. Format it and an unload failure
// @tc.expect: The code is wrapped and both errors format as expected
// @tc.type: FUNC
// @tc.require: issues#ICN31I
#[test]
fn ut_service_error_conversion() {
    let error = ServiceError::from(ErrorCode::DuplicateTaskId);
    assert_eq!(error, ServiceError::ErrorCode(ErrorCode::DuplicateTaskId));
    assert_eq!(error.to_string(), "DuplicateTaskId");

    let unload = ServiceError::UnloadFailed(-1);
    assert_eq!(unload.to_string(), "unload system ability failed: -1");
}
