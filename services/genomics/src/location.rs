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

use crate::sas::{ContainerSas, SasPermissions, SasWindow};

/// A blob container together with the key of the account it lives in.
#[derive(Clone, PartialEq, Eq)]
pub struct StorageLocation {
    /// Storage account name.
    pub account_name: String,
    /// Base64 encoded storage account key.
    pub account_key: String,
    /// Blob container name.
    pub container: String,
}

impl Debug for StorageLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageLocation")
            .field("account_name", &self.account_name)
            .field("account_key", &Redact::from(&self.account_key))
            .field("container", &self.container)
            .finish()
    }
}

impl StorageLocation {
    /// Create a new storage location.
    pub fn new(account_name: &str, account_key: &str, container: &str) -> Self {
        Self {
            account_name: account_name.to_string(),
            account_key: account_key.to_string(),
            container: container.to_string(),
        }
    }

    pub(crate) fn container_sas(
        &self,
        permissions: SasPermissions,
        window: SasWindow,
    ) -> ContainerSas {
        ContainerSas::new(
            &self.account_name,
            &self.account_key,
            &self.container,
            permissions,
            window,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_key() {
        let location = StorageLocation::new(
            "genomicsinput",
            "c2VjcmV0LWFjY291bnQta2V5PT0=",
            "reads",
        );

        assert_eq!(
            format!("{location:?}"),
            r#"StorageLocation { account_name: "genomicsinput", account_key: c2V***T0=, container: "reads" }"#
        );
    }
}
