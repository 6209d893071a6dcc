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

use std::time::Duration;

use async_trait::async_trait;
use azgen_core::{Error, Result, Signer};
use bytes::Bytes;
use http::header::{CONTENT_TYPE, LOCATION, RETRY_AFTER};
use http::{HeaderMap, Method, Request, Response, StatusCode};
use log::{debug, info};
use percent_encoding::utf8_percent_encode;
use serde::Deserialize;

use crate::constants::*;
use crate::management::{
    AccountKey, AccountParameters, NameAvailability, StorageAccount, StorageManagement,
};
use crate::{Config, Credential};

/// ArmStorageManagement implements [`StorageManagement`] on top of the Azure
/// Resource Manager REST API.
///
/// - [Storage Accounts REST API](https://learn.microsoft.com/en-us/rest/api/storagerp/storage-accounts)
/// - [Blob Containers REST API](https://learn.microsoft.com/en-us/rest/api/storagerp/blob-containers)
///
/// Every call is signed with the given [`Signer`] and sent through the
/// signer's context.
#[derive(Clone, Debug)]
pub struct ArmStorageManagement {
    config: Config,
    signer: Signer<Credential>,
}

impl ArmStorageManagement {
    /// Create a new management client.
    ///
    /// Fails with `ConfigInvalid` when the config carries no subscription id.
    pub fn new(config: Config, signer: Signer<Credential>) -> Result<Self> {
        config.subscription_id()?;
        Ok(Self { config, signer })
    }

    fn subscription_url(&self) -> Result<String> {
        Ok(format!(
            "{}/subscriptions/{}",
            self.config.endpoint(),
            encode(self.config.subscription_id()?)
        ))
    }

    fn account_url(&self, resource_group: &str, account_name: &str, suffix: &str) -> Result<String> {
        Ok(format!(
            "{}/resourceGroups/{}/providers/Microsoft.Storage/storageAccounts/{}{}?api-version={}",
            self.subscription_url()?,
            encode(resource_group),
            encode(account_name),
            suffix,
            self.config.api_version
        ))
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<Response<Bytes>> {
        let body = match body {
            Some(v) => Bytes::from(serde_json::to_vec(&v)?),
            None => Bytes::new(),
        };
        let mut req = Request::builder().method(method).uri(url);
        if !body.is_empty() {
            req = req.header(CONTENT_TYPE, "application/json");
        }
        let req = req.body(body)?;

        let (mut parts, body) = req.into_parts();
        self.signer.sign(&mut parts).await?;
        let req = Request::from_parts(parts, body);

        debug!("sending management request: {} {}", req.method(), req.uri());
        let resp = self.signer.context().http_send(req).await?;
        debug!("got management response: {}", resp.status());

        check_status(resp)
    }

    async fn poll_account(&self, mut resp: Response<Bytes>) -> Result<StorageAccount> {
        for attempt in 0..self.config.max_polls {
            let location = resp
                .headers()
                .get(LOCATION)
                .ok_or_else(|| {
                    Error::unexpected("account creation was accepted without a Location header")
                })?
                .to_str()
                .map_err(|e| Error::unexpected("invalid Location header").with_source(e))?
                .to_string();

            let delay = poll_delay(resp.headers(), self.config.poll_interval);
            debug!("account creation still running (poll {attempt}), waiting {delay:?}");
            tokio::time::sleep(delay).await;

            resp = self.send(Method::GET, &location, None).await?;
            if resp.status() != StatusCode::ACCEPTED && !resp.body().is_empty() {
                return Ok(serde_json::from_slice(resp.body())?);
            }
        }

        Err(Error::unexpected(format!(
            "account creation did not finish after {} polls",
            self.config.max_polls
        )))
    }
}

#[async_trait]
impl StorageManagement for ArmStorageManagement {
    async fn check_name_availability(&self, account_name: &str) -> Result<NameAvailability> {
        let url = format!(
            "{}/providers/Microsoft.Storage/checkNameAvailability?api-version={}",
            self.subscription_url()?,
            self.config.api_version
        );
        let body = serde_json::json!({
            "name": account_name,
            "type": ACCOUNT_RESOURCE_TYPE,
        });

        let resp = self.send(Method::POST, &url, Some(body)).await?;
        Ok(serde_json::from_slice(resp.body())?)
    }

    async fn create_account(
        &self,
        resource_group: &str,
        account_name: &str,
        parameters: &AccountParameters,
    ) -> Result<StorageAccount> {
        let url = self.account_url(resource_group, account_name, "")?;
        let body = serde_json::to_value(parameters)?;

        let resp = self.send(Method::PUT, &url, Some(body)).await?;
        let account = if resp.status() == StatusCode::ACCEPTED || resp.body().is_empty() {
            self.poll_account(resp).await?
        } else {
            serde_json::from_slice(resp.body())?
        };

        info!(
            "storage account {} created in {}",
            account.name, account.location
        );
        Ok(account)
    }

    async fn list_keys(
        &self,
        resource_group: &str,
        account_name: &str,
    ) -> Result<Vec<AccountKey>> {
        #[derive(Deserialize)]
        struct ListKeysResult {
            keys: Vec<AccountKey>,
        }

        let url = self.account_url(resource_group, account_name, "/listKeys")?;
        let resp = self.send(Method::POST, &url, None).await?;
        let result: ListKeysResult = serde_json::from_slice(resp.body())?;
        Ok(result.keys)
    }

    async fn create_container(
        &self,
        resource_group: &str,
        account_name: &str,
        container_name: &str,
    ) -> Result<()> {
        let suffix = format!(
            "/blobServices/default/containers/{}",
            encode(container_name)
        );
        let url = self.account_url(resource_group, account_name, &suffix)?;
        let body = serde_json::json!({ "properties": {} });

        self.send(Method::PUT, &url, Some(body)).await?;
        info!("blob container {container_name} created in {account_name}");
        Ok(())
    }
}

fn encode(segment: &str) -> String {
    utf8_percent_encode(segment, &PATH_SEGMENT_ENCODE_SET).to_string()
}

#[derive(Deserialize)]
struct ArmErrorResponse {
    error: ArmError,
}

#[derive(Deserialize)]
struct ArmError {
    code: String,
    message: String,
}

/// Map non-success statuses into errors, keeping the ARM error code when there is one.
fn check_status(resp: Response<Bytes>) -> Result<Response<Bytes>> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let detail = match serde_json::from_slice::<ArmErrorResponse>(resp.body()) {
        Ok(v) => format!("{}: {}", v.error.code, v.error.message),
        Err(_) => String::from_utf8_lossy(resp.body()).to_string(),
    };
    let message = format!("management api returned {status}: {detail}");

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::credential_denied(message),
        StatusCode::CONFLICT => Error::name_conflict(message),
        _ => Error::unexpected(message),
    })
}

/// Wait as long as `Retry-After` asks, capped at
/// [`MAX_RETRY_AFTER_FACTOR`] poll intervals.
fn poll_delay(headers: &HeaderMap, poll_interval: Duration) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
        .map(|v| v.min(poll_interval * MAX_RETRY_AFTER_FACTOR))
        .unwrap_or(poll_interval)
}

#[cfg(test)]
mod tests {
    use super::*;
    use azgen_core::ErrorKind;
    use test_case::test_case;

    fn response(status: u16, body: &str) -> Response<Bytes> {
        Response::builder()
            .status(status)
            .body(Bytes::from(body.to_string()))
            .unwrap()
    }

    #[test_case(401, ErrorKind::CredentialDenied ; "unauthorized")]
    #[test_case(403, ErrorKind::CredentialDenied ; "forbidden")]
    #[test_case(409, ErrorKind::NameConflict ; "conflict")]
    #[test_case(404, ErrorKind::Unexpected ; "not found")]
    #[test_case(500, ErrorKind::Unexpected ; "server error")]
    fn test_check_status(status: u16, kind: ErrorKind) {
        let err = check_status(response(
            status,
            r#"{"error": {"code": "ResourceGroupNotFound", "message": "Resource group 'rg' could not be found."}}"#,
        ))
        .unwrap_err();

        assert_eq!(err.kind(), kind);
        assert!(err.to_string().contains("ResourceGroupNotFound"));
    }

    #[test_case(None, Duration::from_secs(5) ; "no header")]
    #[test_case(Some("2"), Duration::from_secs(2) ; "within cap")]
    #[test_case(Some("86400"), Duration::from_secs(60) ; "capped")]
    #[test_case(Some("Wed, 21 Oct 2015 07:28:00 GMT"), Duration::from_secs(5) ; "http date")]
    fn test_poll_delay(retry_after: Option<&str>, expected: Duration) {
        let mut headers = HeaderMap::new();
        if let Some(v) = retry_after {
            headers.insert(RETRY_AFTER, v.parse().unwrap());
        }

        assert_eq!(poll_delay(&headers, Duration::from_secs(5)), expected);
    }

    #[test]
    fn test_check_status_passes_success() {
        assert!(check_status(response(202, "")).is_ok());
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode("my-rg_1.(test)"), "my-rg_1.(test)");
        assert_eq!(encode("rg with space"), "rg%20with%20space");
    }
}
