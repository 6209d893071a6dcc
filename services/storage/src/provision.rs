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

use azgen_core::{Context, Error, Result};
use log::{debug, info};
use rand::Rng;

use crate::constants::*;
use crate::identity::{AccessKeys, StorageIdentity};
use crate::management::{AccountParameters, StorageManagement};

/// StorageProvisioner creates a storage account and blob containers under a
/// resource group and remembers what it created.
///
/// Construction never talks to the network. Every operation takes the
/// [`StorageManagement`] implementation to run against.
///
/// # Example
///
/// ```no_run
/// use azgen_core::{Context, Signer};
/// use azgen_storage::{
///     ArmStorageManagement, Config, DefaultCredentialProvider, RequestSigner, StorageProvisioner,
/// };
///
/// # async fn example(ctx: Context) -> azgen_core::Result<()> {
/// let config = Config::default().from_env(&ctx);
/// let signer = Signer::new(ctx.clone(), DefaultCredentialProvider::new(), RequestSigner::new());
/// let management = ArmStorageManagement::new(config, signer)?;
///
/// let mut provisioner = StorageProvisioner::new("genomics-rg");
/// provisioner.provision_storage(&management).await?;
/// let container = provisioner.provision_blob_container(&management, None).await?;
/// provisioner.status_to_json(&ctx, "status.json").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct StorageProvisioner {
    resource_group: String,
    account_name: Option<String>,
    region: String,
    identity: Option<StorageIdentity>,
    access_keys: Option<AccessKeys>,
}

impl StorageProvisioner {
    /// Create a provisioner for a resource group in the default region.
    pub fn new(resource_group: impl Into<String>) -> Self {
        Self {
            resource_group: resource_group.into(),
            account_name: None,
            region: DEFAULT_REGION.to_string(),
            identity: None,
            access_keys: None,
        }
    }

    /// Use this account name instead of generating one.
    pub fn with_account_name(mut self, account_name: impl Into<String>) -> Self {
        self.account_name = Some(account_name.into());
        self
    }

    /// Create the account in this region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Rebuild a provisioner from a persisted identity.
    ///
    /// Access keys are never persisted, so [`Self::access_keys`] returns `None`
    /// on the result until they are fetched again.
    pub fn from_identity(identity: StorageIdentity) -> Self {
        Self {
            resource_group: identity.resource_group.clone(),
            account_name: Some(identity.account_name.clone()),
            region: identity.region.clone(),
            identity: Some(identity),
            access_keys: None,
        }
    }

    /// Rebuild a provisioner from a record written by [`Self::status_to_json`].
    pub async fn from_status_json(ctx: &Context, path: &str) -> Result<Self> {
        let content = ctx.file_read_as_string(path).await?;
        let identity = StorageIdentity::from_json(&content)?;
        debug!("loaded storage identity from {path}: {identity:?}");
        Ok(Self::from_identity(identity))
    }

    /// Resource group the provisioner works in.
    pub fn resource_group(&self) -> &str {
        &self.resource_group
    }

    /// Account name, either given, generated or provisioned.
    pub fn account_name(&self) -> Option<&str> {
        self.account_name.as_deref()
    }

    /// Region accounts are created in.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Identity of the provisioned account, if provisioning completed.
    pub fn identity(&self) -> Option<&StorageIdentity> {
        self.identity.as_ref()
    }

    /// Access keys fetched right after provisioning.
    pub fn access_keys(&self) -> Option<&AccessKeys> {
        self.access_keys.as_ref()
    }

    /// Provision a new storage account under the resource group.
    ///
    /// The account name is checked for availability exactly once. A taken
    /// name fails with `NameConflict` and nothing else is called.
    pub async fn provision_storage<M>(&mut self, management: &M) -> Result<&StorageIdentity>
    where
        M: StorageManagement + ?Sized,
    {
        let account_name = match &self.account_name {
            Some(v) => v.clone(),
            None => generate_name(ACCOUNT_NAME_PREFIX),
        };

        let availability = management.check_name_availability(&account_name).await?;
        if !availability.name_available {
            let mut message = format!("Name {account_name} is already taken");
            if let Some(reason) = availability.message.or(availability.reason) {
                message = format!("{message}: {reason}");
            }
            return Err(Error::name_conflict(message));
        }
        // Only a name that passed the check is kept.
        self.account_name = Some(account_name.clone());

        let account = management
            .create_account(
                &self.resource_group,
                &account_name,
                &AccountParameters::new(&self.region),
            )
            .await?;
        // The identity is recorded even if listing the keys fails afterwards.
        let identity = &*self.identity.insert(StorageIdentity {
            account_name: account.name,
            region: account.location,
            resource_group: self.resource_group.clone(),
        });
        info!("provisioned storage account: {identity:?}");

        let keys = management
            .list_keys(&self.resource_group, &identity.account_name)
            .await?;
        let mut keys = keys.into_iter();
        let (Some(primary), Some(secondary)) = (keys.next(), keys.next()) else {
            return Err(Error::unexpected(format!(
                "storage account {} returned less than two access keys",
                identity.account_name
            )));
        };

        self.access_keys = Some(AccessKeys {
            primary: primary.value,
            secondary: secondary.value,
        });
        Ok(identity)
    }

    /// Provision a blob container in the account and return its name.
    ///
    /// A name is generated if none is given. Creating a container that already
    /// exists behaves however the management API behaves.
    pub async fn provision_blob_container<M>(
        &self,
        management: &M,
        container_name: Option<&str>,
    ) -> Result<String>
    where
        M: StorageManagement + ?Sized,
    {
        let account_name = self
            .identity
            .as_ref()
            .map(|v| v.account_name.as_str())
            .or(self.account_name.as_deref())
            .ok_or_else(|| {
                Error::not_provisioned("a storage account is required to create a container")
            })?;

        let container_name = match container_name {
            Some(v) => v.to_string(),
            None => generate_name(CONTAINER_NAME_PREFIX),
        };

        management
            .create_container(&self.resource_group, account_name, &container_name)
            .await?;
        Ok(container_name)
    }

    /// Render the persisted identity record.
    pub fn status_json(&self) -> Result<String> {
        self.identity
            .as_ref()
            .ok_or_else(|| Error::not_provisioned("storage account has not been provisioned"))?
            .to_json()
    }

    /// Write the identity record to `path`.
    pub async fn status_to_json(&self, ctx: &Context, path: &str) -> Result<()> {
        let content = self.status_json()?;
        ctx.file_write(path, content.as_bytes()).await?;
        debug!("storage identity written to {path}");
        Ok(())
    }
}

/// `prefix` followed by a zero padded number in `0..=10000`.
fn generate_name(prefix: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..=10000);
    format!("{prefix}{suffix:04}")
}
