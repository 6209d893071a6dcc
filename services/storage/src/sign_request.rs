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
use http::header::AUTHORIZATION;
use http::request::Parts;
use http::HeaderValue;

use crate::Credential;

/// RequestSigner authorizes Azure Resource Manager calls with a bearer token.
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

        let mut value: HeaderValue = format!("Bearer {}", cred.token).parse().map_err(|e| {
            Error::credential_invalid("bearer token is not a valid header value").with_source(e)
        })?;
        value.set_sensitive(true);
        req.headers.insert(AUTHORIZATION, value);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use azgen_core::ErrorKind;

    #[tokio::test]
    async fn test_sign_sets_bearer_header() {
        let (mut parts, _) = http::Request::put("https://management.azure.com/subscriptions/sub")
            .body(())
            .unwrap()
            .into_parts();
        let cred = Credential::with_bearer_token("token", None);

        RequestSigner::new()
            .sign_request(&Context::new(), &mut parts, Some(&cred))
            .await
            .unwrap();

        let value = parts.headers.get(AUTHORIZATION).unwrap();
        assert_eq!(value, "Bearer token");
        assert!(value.is_sensitive());
    }

    #[tokio::test]
    async fn test_sign_without_credential() {
        let (mut parts, _) = http::Request::get("https://management.azure.com")
            .body(())
            .unwrap()
            .into_parts();

        let err = RequestSigner::new()
            .sign_request(&Context::new(), &mut parts, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }
}
