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

use azgen_command_execute_tokio::TokioCommandExecute;
use azgen_core::{Context, OsEnv};
use azgen_fs_tokio::{TokioFileRead, TokioFileWrite};
use azgen_http_send_reqwest::ReqwestHttpSend;

/// Create a context with every component configured.
///
/// - files are read and written with tokio
/// - http goes through a shared reqwest client
/// - env comes from the current process
/// - commands such as `az` run through tokio
pub fn default_context() -> Context {
    Context::new()
        .with_file_read(TokioFileRead)
        .with_file_write(TokioFileWrite)
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv)
        .with_command_execute(TokioCommandExecute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_context_is_configured() {
        let ctx = default_context();

        assert_eq!(
            ctx.env_var("PATH"),
            std::env::var("PATH").ok(),
            "env must come from the process"
        );

        let dir = std::env::temp_dir().join(format!("azgen-context-{}", std::process::id()));
        let path = dir.to_str().unwrap();
        ctx.file_write(path, b"{}").await.unwrap();
        assert_eq!(ctx.file_read_as_string(path).await.unwrap(), "{}");
        std::fs::remove_file(&dir).unwrap();
    }
}
