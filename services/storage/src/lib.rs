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

//! Azure storage provisioning
//!
//! This crate creates storage accounts and blob containers through the Azure
//! Resource Manager API:
//!
//! - [`StorageProvisioner`] holds what was provisioned and can persist it
//! - [`StorageManagement`] is the narrow management interface it runs against
//! - [`ArmStorageManagement`] implements it over HTTP, authorized by a bearer
//!   token from [`DefaultCredentialProvider`]
//!
//! # Example
//!
//! ```rust,no_run
//! use azgen_core::{Context, Signer};
//! use azgen_storage::{
//!     ArmStorageManagement, Config, DefaultCredentialProvider, RequestSigner, StorageProvisioner,
//! };
//!
//! # async fn example(ctx: Context) -> azgen_core::Result<()> {
//! let config = Config::default().from_env(&ctx);
//! let signer = Signer::new(ctx.clone(), DefaultCredentialProvider::new(), RequestSigner::new());
//! let management = ArmStorageManagement::new(config, signer)?;
//!
//! let mut provisioner = StorageProvisioner::new("genomics-rg").with_region("westeurope");
//! let identity = provisioner.provision_storage(&management).await?.clone();
//! println!("created {}", identity.account_name);
//! # Ok(())
//! # }
//! ```

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod sign_request;
pub use sign_request::RequestSigner;

mod management;
pub use management::{
    AccountKey, AccountParameters, NameAvailability, Sku, StorageAccount, StorageManagement,
};

mod arm;
pub use arm::ArmStorageManagement;

mod identity;
pub use identity::{AccessKeys, StorageIdentity};

mod provision;
pub use provision::StorageProvisioner;
