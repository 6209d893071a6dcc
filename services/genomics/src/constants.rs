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

// Headers
pub const SUBSCRIPTION_KEY_HEADER: &str = "ocp-apim-subscription-key";
pub const USER_AGENT_VALUE: &str = concat!("azgen-genomics/", env!("CARGO_PKG_VERSION"));

// SAS
pub const SAS_VERSION: &str = "2018-11-09";
pub const SAS_RESOURCE_CONTAINER: &str = "c";
pub const WORKFLOW_SAS_PERMISSIONS: &str = "rwcdl";

// Workflow
pub const WORKFLOWS_PATH: &str = "/api/workflows/";
pub const BLOCK_BLOB_STORAGE: &str = "AZURE_BLOCK_BLOB";
pub const DEFAULT_PROCESS: &str = "gatk";
pub const DEFAULT_REFERENCE: &str = "hg38m1";
pub const DEFAULT_DESCRIPTION: &str = "Submitted by azgen client";
