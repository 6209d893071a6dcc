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

//! Provision Azure storage and submit Microsoft Genomics workflows.
//!
//! This crate re-exports [`azgen_core`] together with the service crates:
//!
//! - [`storage`]: storage accounts and blob containers through Azure Resource Manager
//! - [`genomics`]: container SAS tokens and workflow submission
//!
//! With the `default-context` feature, [`default_context`] returns a
//! [`Context`] backed by tokio, reqwest, the OS environment and the Azure CLI.
//!
//! # Example
//!
//! ```no_run
//! # async fn example() -> azgen::Result<()> {
//! use azgen::genomics::{GenomicsClient, StorageLocation, Workflow};
//! use azgen::storage::StorageProvisioner;
//!
//! let ctx = azgen::default_context();
//! let management = azgen::storage::default_management(&ctx)?;
//!
//! let mut provisioner = StorageProvisioner::new("genomics-rg");
//! let identity = provisioner.provision_storage(&management).await?.clone();
//! let container = provisioner.provision_blob_container(&management, None).await?;
//! let keys = provisioner.access_keys().expect("keys are fetched on provisioning");
//!
//! let input = StorageLocation::new(&identity.account_name, &keys.primary, &container);
//! let client = GenomicsClient::new("<subscription key>", &identity.region, input);
//! client
//!     .submit_workflow(&ctx, &Workflow::new("r1.fq.gz", "r2.fq.gz"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use azgen_core::*;

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::default_context;

#[cfg(feature = "storage")]
pub mod storage;

#[cfg(feature = "genomics")]
pub mod genomics {
    //! Microsoft Genomics workflow submission.
    pub use azgen_genomics::*;
}
