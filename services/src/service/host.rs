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

/// The system ability manager hosting this service.
pub trait SystemAbilityHost: Send + Sync {
    /// Asks the host to unload the service identified by `service_id`.
    ///
    /// # Errors
    ///
    /// Returns the host's error code if the unload request was refused.
    fn unload_system_ability(&self, service_id: i32) -> Result<(), i32>;
}
