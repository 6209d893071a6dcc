// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

// Env values used by the storage provisioner.
pub const AZURE_SUBSCRIPTION_ID: &str = "AZURE_SUBSCRIPTION_ID";
pub const AZURE_RESOURCE_MANAGER_ENDPOINT: &str = "AZURE_RESOURCE_MANAGER_ENDPOINT";
pub const AZURE_ACCESS_TOKEN: &str = "AZURE_ACCESS_TOKEN";

pub const DEFAULT_MANAGEMENT_ENDPOINT: &str = "https://management.azure.com";
pub const DEFAULT_API_VERSION: &str = "2023-01-01";
pub const DEFAULT_REGION: &str = "westeurope";
pub const MANAGEMENT_RESOURCE: &str = "https://management.azure.com/";

/// Upper bound of a `Retry-After` delay, in poll intervals.
pub const MAX_RETRY_AFTER_FACTOR: u32 = 12;

pub const ACCOUNT_NAME_PREFIX: &str = "storageaccount";
pub const CONTAINER_NAME_PREFIX: &str = "container";
pub const ACCOUNT_KIND: &str = "StorageV2";
pub const ACCOUNT_SKU: &str = "Standard_LRS";
pub const ACCOUNT_RESOURCE_TYPE: &str = "Microsoft.Storage/storageAccounts";

/// Resource group, account and container names end up as path segments.
pub static PATH_SEGMENT_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'(')
    .remove(b')');
