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

//! Reqwest-based HTTP sending implementation for azgen.
//!
//! `ReqwestHttpSend` implements the `HttpSend` trait from `azgen_core`. Both
//! the management calls made by the storage provisioner and the genomics
//! workflow submission go through it.
//!
//! ## Example
//!
//! ```no_run
//! use azgen_core::Context;
//! use azgen_http_send_reqwest::ReqwestHttpSend;
//!
//! let ctx = Context::new().with_http_send(ReqwestHttpSend::default());
//! ```

use async_trait::async_trait;
use azgen_core::{Error, HttpSend, Result};
use bytes::Bytes;
use http_body_util::BodyExt;
use reqwest::{Client, Request};

/// Reqwest-based implementation of the `HttpSend` trait.
///
/// The wrapped client is reused for every request sent through the same
/// context.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("failed to convert request").with_source(e))?;
        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(map_reqwest_error)?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| Error::network("failed to read response body").with_source(e))?;
        Ok(http::Response::from_parts(parts, bs))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> Error {
    if err.is_builder() {
        Error::request_invalid("failed to build request").with_source(err)
    } else {
        Error::network(format!("failed to send request: {err}")).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use azgen_core::ErrorKind;

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let send = ReqwestHttpSend::default();
        let req = http::Request::post("http://127.0.0.1:9/api/workflows/")
            .body(Bytes::from_static(b"{}"))
            .unwrap();

        let err = send.http_send(req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }
}
