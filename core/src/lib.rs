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

//! Core components shared by the azgen service crates.
//!
//! This crate provides the foundational types and traits that the storage
//! provisioner and the genomics submission client are built on.
//!
//! ## Overview
//!
//! The crate is built around several key concepts:
//!
//! - **Context**: A container that holds implementations for file reading and writing,
//!   HTTP sending, environment access and command execution
//! - **Traits**: Abstract interfaces for credential loading (`ProvideCredential`) and
//!   request signing (`SignRequest`)
//! - **Signer**: The orchestrator that caches a credential and applies it to requests
//! - **Error**: A single error type whose [`ErrorKind`] tells callers what went wrong
//!
//! ## Example
//!
//! ```no_run
//! use async_trait::async_trait;
//! use azgen_core::{Context, ProvideCredential, Result, SignRequest, Signer, SigningCredential};
//! use http::request::Parts;
//!
//! #[derive(Clone, Debug)]
//! struct ApiKey(String);
//!
//! impl SigningCredential for ApiKey {
//!     fn is_valid(&self) -> bool {
//!         !self.0.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct EnvApiKey;
//!
//! #[async_trait]
//! impl ProvideCredential for EnvApiKey {
//!     type Credential = ApiKey;
//!
//!     async fn provide_credential(&self, ctx: &Context) -> Result<Option<ApiKey>> {
//!         Ok(ctx.env_var("MY_API_KEY").map(ApiKey))
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct ApiKeyHeader;
//!
//! #[async_trait]
//! impl SignRequest for ApiKeyHeader {
//!     type Credential = ApiKey;
//!
//!     async fn sign_request(
//!         &self,
//!         _: &Context,
//!         req: &mut Parts,
//!         credential: Option<&ApiKey>,
//!     ) -> Result<()> {
//!         if let Some(key) = credential {
//!             req.headers.insert("x-api-key", key.0.parse()?);
//!         }
//!         Ok(())
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let signer = Signer::new(Context::new(), EnvApiKey, ApiKeyHeader);
//!
//! let mut parts = http::Request::post("https://example.com")
//!     .body(())?
//!     .into_parts()
//!     .0;
//! signer.sign(&mut parts).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Base64 and HMAC helpers used by SAS signing
//! - [`time`]: Time helpers
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{
    CommandExecute, CommandOutput, Context, Env, FileRead, FileWrite, HttpSend, NoopCommandExecute,
    NoopEnv, NoopFileRead, NoopFileWrite, NoopHttpSend, OsEnv, StaticEnv,
};

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{ProvideCredential, ProvideCredentialChain, SignRequest, SigningCredential};
mod signer;
pub use signer::Signer;
