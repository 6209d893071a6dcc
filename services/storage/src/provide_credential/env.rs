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
use azgen_core::{Context, ProvideCredential, Result};

use crate::constants::AZURE_ACCESS_TOKEN;
use crate::credential::Credential;

/// EnvCredentialProvider reads a management bearer token from `AZURE_ACCESS_TOKEN`.
#[derive(Clone, Debug, Default)]
pub struct EnvCredentialProvider {}

impl EnvCredentialProvider {
    /// Create a new env credential provider.
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        Ok(ctx
            .env_var(AZURE_ACCESS_TOKEN)
            .filter(|v| !v.is_empty())
            .map(|token| Credential::with_bearer_token(&token, None)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use azgen_core::StaticEnv;

    #[tokio::test]
    async fn test_env_credential_provider() {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([(AZURE_ACCESS_TOKEN, "token")]));

        let cred = EnvCredentialProvider::new()
            .provide_credential(&ctx)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cred.token, "token");
        assert!(cred.expires_in.is_none());
    }

    #[tokio::test]
    async fn test_env_credential_provider_none() {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([(AZURE_ACCESS_TOKEN, "")]));

        let cred = EnvCredentialProvider::new()
            .provide_credential(&ctx)
            .await
            .unwrap();
        assert!(cred.is_none());
    }
}
