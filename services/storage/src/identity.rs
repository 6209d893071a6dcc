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

use azgen_core::utils::Redact;
use azgen_core::Result;
use serde::{Deserialize, Serialize};

/// StorageIdentity names a provisioned storage account.
///
/// It is persisted as `{"SA_name": .., "SA_region": .., "RG": ..}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageIdentity {
    /// Storage account name.
    #[serde(rename = "SA_name")]
    pub account_name: String,
    /// Region the account lives in.
    #[serde(rename = "SA_region")]
    pub region: String,
    /// Resource group owning the account.
    #[serde(rename = "RG")]
    pub resource_group: String,
}

impl StorageIdentity {
    /// Create a new identity.
    pub fn new(resource_group: &str, account_name: &str, region: &str) -> Self {
        Self {
            account_name: account_name.to_string(),
            region: region.to_string(),
            resource_group: resource_group.to_string(),
        }
    }

    /// Render the persisted record.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a persisted record.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

/// AccessKeys of a freshly provisioned account.
///
/// Only ever held in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessKeys {
    /// First account key.
    pub primary: String,
    /// Second account key.
    pub secondary: String,
}

impl Debug for AccessKeys {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessKeys")
            .field("primary", &Redact::from(&self.primary))
            .field("secondary", &Redact::from(&self.secondary))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use azgen_core::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_identity_record_keys() {
        let identity = StorageIdentity::new("genomics-rg", "storageaccount0042", "westeurope");
        let value: serde_json::Value = serde_json::from_str(&identity.to_json().unwrap()).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "SA_name": "storageaccount0042",
                "SA_region": "westeurope",
                "RG": "genomics-rg"
            })
        );
    }

    #[test]
    fn test_identity_from_json_missing_field() {
        let err = StorageIdentity::from_json(r#"{"SA_name": "storageaccount0042"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Serialization);
    }

    #[test]
    fn test_access_keys_debug_is_redacted() {
        let keys = AccessKeys {
            primary: "cHJpbWFyeS1hY2NvdW50LWtleQ==".to_string(),
            secondary: "c2Vjb25kYXJ5LWFjY291bnQta2V5".to_string(),
        };

        let printed = format!("{keys:?}");
        assert!(!printed.contains("cHJpbWFyeS1hY2NvdW50LWtleQ=="));
        assert!(printed.contains("cHJ***Q=="));
    }
}
