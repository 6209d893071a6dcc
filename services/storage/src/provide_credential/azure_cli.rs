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

use async_trait::async_trait;
use azgen_core::time::{format_rfc3339, parse_rfc3339, DateTime};
use azgen_core::{Context, Error, ProvideCredential, Result};
use log::debug;
use serde::Deserialize;

use crate::constants::MANAGEMENT_RESOURCE;
use crate::credential::Credential;

/// AzureCliCredentialProvider asks a logged in Azure CLI for a management token.
///
/// It runs `az account get-access-token --resource <resource> --output json`
/// through [`Context::command_execute`]. A missing CLI or a CLI without a
/// login yields `Ok(None)` so that a chain can move on.
#[derive(Clone, Debug)]
pub struct AzureCliCredentialProvider {
    resource: String,
}

impl Default for AzureCliCredentialProvider {
    fn default() -> Self {
        Self {
            resource: MANAGEMENT_RESOURCE.to_string(),
        }
    }
}

impl AzureCliCredentialProvider {
    /// Create a provider for the Azure Resource Manager resource.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a token for another resource.
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    async fn get_access_token_from_cli(&self, ctx: &Context) -> Result<AzureCliToken> {
        let output = ctx
            .command_execute(
                "az",
                &[
                    "account",
                    "get-access-token",
                    "--resource",
                    self.resource.as_str(),
                    "--output",
                    "json",
                ],
            )
            .await?;

        if !output.success() {
            return Err(Error::credential_invalid(format!(
                "Azure CLI command failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AzureCliToken {
    access_token: String,
    expires_on: Option<String>,
    #[serde(rename = "expires_on")]
    expires_on_timestamp: Option<i64>,
}

impl AzureCliToken {
    fn expires_in(&self) -> Option<DateTime> {
        if let Some(timestamp) = self.expires_on_timestamp {
            return chrono::DateTime::from_timestamp(timestamp, 0);
        }

        // Either RFC3339, or the local "2023-10-31 21:59:10.000000" older CLIs print, taken as UTC.
        self.expires_on.as_deref().and_then(|v| {
            parse_rfc3339(v).ok().or_else(|| {
                chrono::NaiveDateTime::parse_from_str(v, "%Y-%m-%d %H:%M:%S%.f")
                    .ok()
                    .map(|dt| dt.and_utc())
            })
        })
    }
}

#[async_trait]
impl ProvideCredential for AzureCliCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        match self.get_access_token_from_cli(ctx).await {
            Ok(token) => {
                let expires_in = token.expires_in();
                if let Some(t) = expires_in {
                    debug!("azure cli token expires at {}", format_rfc3339(t));
                }
                Ok(Some(Credential::with_bearer_token(
                    &token.access_token,
                    expires_in,
                )))
            }
            Err(e) => {
                debug!("azure cli credential is not available: {e:?}");
                Ok(None)
            }
        }
    }
}
