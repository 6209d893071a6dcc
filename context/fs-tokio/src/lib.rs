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

//! Tokio-based file system implementation for azgen.
//!
//! This crate provides `TokioFileRead` and `TokioFileWrite`, which implement
//! the `FileRead` and `FileWrite` traits from `azgen_core` using Tokio's file
//! system operations. The storage provisioner persists and reloads its
//! identity record through them.
//!
//! ## Example
//!
//! ```no_run
//! use azgen_core::Context;
//! use azgen_fs_tokio::{TokioFileRead, TokioFileWrite};
//!
//! #[tokio::main]
//! async fn main() -> azgen_core::Result<()> {
//!     let ctx = Context::new()
//!         .with_file_read(TokioFileRead)
//!         .with_file_write(TokioFileWrite);
//!
//!     ctx.file_write("status.json", br#"{"SA_name":"storageaccount0042"}"#)
//!         .await?;
//!     let content = ctx.file_read_as_string("status.json").await?;
//!     println!("{content}");
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use azgen_core::{Error, FileRead, FileWrite, Result};

/// Tokio-based implementation of the `FileRead` trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileRead;

#[async_trait]
impl FileRead for TokioFileRead {
    async fn file_read(&self, path: &str) -> Result<Vec<u8>> {
        tokio::fs::read(path)
            .await
            .map_err(|e| Error::unexpected(format!("failed to read file {path}")).with_source(e))
    }
}

/// Tokio-based implementation of the `FileWrite` trait.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileWrite;

#[async_trait]
impl FileWrite for TokioFileWrite {
    async fn file_write(&self, path: &str, content: &[u8]) -> Result<()> {
        tokio::fs::write(path, content)
            .await
            .map_err(|e| Error::unexpected(format!("failed to write file {path}")).with_source(e))
    }
}
