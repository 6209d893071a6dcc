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

//! Microsoft Genomics workflow submission
//!
//! This crate mints container SAS tokens with storage account keys and
//! submits paired-end workflows to a Microsoft Genomics account.
//!
//! # Example
//!
//! ```rust,no_run
//! use azgen_core::Context;
//! use azgen_genomics::{GenomicsClient, StorageLocation, Workflow};
//!
//! # async fn example(ctx: Context) -> azgen_core::Result<()> {
//! let input = StorageLocation::new("genomicsinput", "<account key>", "reads");
//! let client = GenomicsClient::new("<subscription key>", "westeurope", input);
//!
//! let workflow = Workflow::new("sample_R1.fastq.gz", "sample_R2.fastq.gz");
//! let submission = client.submit_workflow(&ctx, &workflow).await?;
//! println!("submitted: {}", submission.status);
//! # Ok(())
//! # }
//! ```

mod constants;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::StaticCredentialProvider;

mod sign_request;
pub use sign_request::RequestSigner;

pub mod sas;
pub use sas::{ContainerSas, SasPermissions, SasToken, SasWindow};

mod location;
pub use location::StorageLocation;

mod workflow;
pub use workflow::{InputArgs, OutputArgs, Workflow, WorkflowRequest, WorkflowSubmission};

mod client;
pub use client::{GenomicsClient, SasTokens};
