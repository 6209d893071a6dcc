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

//! Azure storage provisioning with convenience APIs.

pub use azgen_storage::*;

use crate::{Context, Result, Signer};

/// Storage management signer with commonly used components.
pub type DefaultSigner = Signer<Credential>;

/// Create a management signer loading its token from `AZURE_ACCESS_TOKEN`
/// or the Azure CLI.
pub fn default_signer(ctx: &Context) -> DefaultSigner {
    Signer::new(
        ctx.clone(),
        DefaultCredentialProvider::new(),
        RequestSigner::new(),
    )
}

/// Create an Azure Resource Manager client configured from env.
///
/// Fails with `ConfigInvalid` if `AZURE_SUBSCRIPTION_ID` is not set.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> azgen::Result<()> {
/// use azgen::storage::{default_management, StorageProvisioner};
///
/// let ctx = azgen::default_context();
/// let management = default_management(&ctx)?;
///
/// let mut provisioner = StorageProvisioner::new("genomics-rg");
/// provisioner.provision_storage(&management).await?;
/// provisioner.status_to_json(&ctx, "status.json").await?;
/// # Ok(())
/// # }
/// ```
pub fn default_management(ctx: &Context) -> Result<ArmStorageManagement> {
    let config = Config::default().from_env(ctx);
    ArmStorageManagement::new(config, default_signer(ctx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, StaticEnv};

    #[test]
    fn test_default_management_requires_subscription() {
        let ctx = Context::new().with_env(StaticEnv::default());
        let err = default_management(&ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let ctx = Context::new().with_env(StaticEnv::from_pairs([(
            "AZURE_SUBSCRIPTION_ID",
            "00000000-1111-2222-3333-444444444444",
        )]));
        assert!(default_management(&ctx).is_ok());
    }
}
