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

use std::fmt::{Debug, Formatter};

use async_trait::async_trait;
use azgen_core::utils::Redact;
use azgen_core::Result;
use serde::{Deserialize, Serialize};

use crate::constants::{ACCOUNT_KIND, ACCOUNT_SKU};

/// StorageManagement is the narrow slice of the management API the provisioner needs.
///
/// [`crate::ArmStorageManagement`] talks to Azure Resource Manager, tests plug in
/// an in-memory implementation.
#[async_trait]
pub trait StorageManagement: Debug + Send + Sync + 'static {
    /// Ask whether a storage account name is still free.
    async fn check_name_availability(&self, account_name: &str) -> Result<NameAvailability>;

    /// Create a storage account and wait until it exists.
    async fn create_account(
        &self,
        resource_group: &str,
        account_name: &str,
        parameters: &AccountParameters,
    ) -> Result<StorageAccount>;

    /// List the access keys of a storage account.
    async fn list_keys(&self, resource_group: &str, account_name: &str)
        -> Result<Vec<AccountKey>>;

    /// Create a blob container inside a storage account.
    async fn create_container(
        &self,
        resource_group: &str,
        account_name: &str,
        container_name: &str,
    ) -> Result<()>;
}

/// Result of a name availability check.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameAvailability {
    /// Whether the name can be used.
    pub name_available: bool,
    /// Machine readable reason, e.g. `AlreadyExists`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Human readable explanation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NameAvailability {
    /// A name that can be used.
    pub fn available() -> Self {
        Self {
            name_available: true,
            ..Default::default()
        }
    }

    /// A name that is taken.
    pub fn taken(message: impl Into<String>) -> Self {
        Self {
            name_available: false,
            reason: Some("AlreadyExists".to_string()),
            message: Some(message.into()),
        }
    }
}

/// Body of a storage account creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccountParameters {
    /// Region the account lives in.
    pub location: String,
    /// Account kind.
    pub kind: String,
    /// Pricing tier.
    pub sku: Sku,
}

impl AccountParameters {
    /// General purpose v2 account with locally redundant storage.
    pub fn new(location: &str) -> Self {
        Self {
            location: location.to_string(),
            kind: ACCOUNT_KIND.to_string(),
            sku: Sku {
                name: ACCOUNT_SKU.to_string(),
            },
        }
    }
}

/// Storage account sku.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sku {
    /// Sku name such as `Standard_LRS`.
    pub name: String,
}

/// A storage account as reported by the management API.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct StorageAccount {
    /// Full ARM resource id.
    #[serde(default)]
    pub id: Option<String>,
    /// Account name.
    pub name: String,
    /// Region the account lives in.
    pub location: String,
}

/// One storage account access key.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountKey {
    /// Key name, `key1` or `key2`.
    pub key_name: String,
    /// Base64 encoded key.
    pub value: String,
}

impl Debug for AccountKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountKey")
            .field("key_name", &self.key_name)
            .field("value", &Redact::from(&self.value))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_account_parameters_body() {
        let body = serde_json::to_value(AccountParameters::new("westeurope")).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "location": "westeurope",
                "kind": "StorageV2",
                "sku": {"name": "Standard_LRS"}
            })
        );
    }

    #[test]
    fn test_parse_name_availability() {
        let v: NameAvailability = serde_json::from_str(
            r#"{"nameAvailable": false, "reason": "AlreadyExists", "message": "The storage account named storageaccount0042 is already taken."}"#,
        )
        .unwrap();

        assert!(!v.name_available);
        assert_eq!(v.reason.as_deref(), Some("AlreadyExists"));
    }
}
