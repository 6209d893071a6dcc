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
use azgen_core::{Context, Error, Result, SignRequest};
use http::request::Parts;
use http::HeaderValue;

use crate::constants::*;
use crate::Credential;

/// RequestSigner authorizes genomics calls with the account's subscription key.
#[derive(Debug, Default)]
pub struct RequestSigner {}

impl RequestSigner {
    /// Create a new request signer.
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let Some(cred) = credential else {
            return Err(Error::request_invalid("credential is required"));
        };

        let mut value: HeaderValue = cred.subscription_key.parse().map_err(|e| {
            Error::credential_invalid("subscription key is not a valid header value")
                .with_source(e)
        })?;
        value.set_sensitive(true);
        req.headers.insert(SUBSCRIPTION_KEY_HEADER, value);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use azgen_core::ErrorKind;

    fn parts() -> Parts {
        http::Request::post("https://westeurope.microsoftgenomics.net/api/workflows/")
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    #[tokio::test]
    async fn test_sign_sets_subscription_key() {
        let mut parts = parts();
        let cred = Credential::with_subscription_key("subscription-key");

        RequestSigner::new()
            .sign_request(&Context::new(), &mut parts, Some(&cred))
            .await
            .unwrap();

        let value = parts.headers.get("Ocp-Apim-Subscription-Key").unwrap();
        assert_eq!(value, "subscription-key");
        assert!(value.is_sensitive());
    }

    #[tokio::test]
    async fn test_sign_rejects_bad_key() {
        let cred = Credential::with_subscription_key("line\nbreak");

        let err = RequestSigner::new()
            .sign_request(&Context::new(), &mut parts(), Some(&cred))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    }

    #[tokio::test]
    async fn test_sign_without_credential() {
        let err = RequestSigner::new()
            .sign_request(&Context::new(), &mut parts(), None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }
}
