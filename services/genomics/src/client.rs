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

use azgen_core::time::{now, DateTime};
use azgen_core::utils::Redact;
use azgen_core::{Context, Error, Result, Signer};
use bytes::Bytes;
use http::header::{CONTENT_TYPE, USER_AGENT};
use http::{Request, StatusCode};
use log::{debug, info};

use crate::constants::*;
use crate::location::StorageLocation;
use crate::sas::{SasPermissions, SasToken, SasWindow};
use crate::workflow::{InputArgs, OutputArgs, Workflow, WorkflowRequest, WorkflowSubmission};
use crate::{RequestSigner, StaticCredentialProvider};

/// SAS tokens for the input and the output container of a workflow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SasTokens {
    /// Token for the container holding the reads.
    pub input: SasToken,
    /// Token for the container receiving the results.
    pub output: SasToken,
}

/// GenomicsClient submits workflows to a Microsoft Genomics account.
///
/// Construction does no IO and signs nothing. SAS tokens are minted when
/// asked for, and again on every submission.
#[derive(Clone)]
pub struct GenomicsClient {
    subscription_key: String,
    region: String,
    endpoint: String,
    input: StorageLocation,
    output: StorageLocation,
}

impl Debug for GenomicsClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenomicsClient")
            .field("subscription_key", &Redact::from(&self.subscription_key))
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("input", &self.input)
            .field("output", &self.output)
            .finish()
    }
}

impl GenomicsClient {
    /// Create a client for the genomics account in `region`.
    ///
    /// Results are written next to the inputs unless [`Self::with_output`]
    /// says otherwise.
    pub fn new(subscription_key: &str, region: &str, input: StorageLocation) -> Self {
        Self {
            subscription_key: subscription_key.to_string(),
            region: region.to_string(),
            endpoint: format!("https://{region}.microsoftgenomics.net"),
            output: input.clone(),
            input,
        }
    }

    /// Write results to another container.
    pub fn with_output(mut self, output: StorageLocation) -> Self {
        self.output = output;
        self
    }

    /// Talk to another endpoint than the region's default.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    /// Region of the genomics account.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Service endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Where the reads are.
    pub fn input(&self) -> &StorageLocation {
        &self.input
    }

    /// Where the results go.
    pub fn output(&self) -> &StorageLocation {
        &self.output
    }

    /// Mint input and output SAS tokens valid from the date of `now` for one day.
    pub fn sas_tokens(&self, now: DateTime) -> Result<SasTokens> {
        let permissions: SasPermissions = WORKFLOW_SAS_PERMISSIONS.parse()?;
        let window = SasWindow::starting_at(now)?;

        Ok(SasTokens {
            input: self.input.container_sas(permissions, window).sign()?,
            output: self.output.container_sas(permissions, window).sign()?,
        })
    }

    /// Build the submission body for `workflow`.
    pub fn build_request(&self, tokens: &SasTokens, workflow: &Workflow) -> WorkflowRequest {
        let blobnames = [&workflow.blob_r1, &workflow.blob_r2]
            .iter()
            .map(|blob| format!("{blob}?{}", tokens.input))
            .collect::<Vec<_>>()
            .join(",");

        WorkflowRequest {
            workflow_class: String::new(),
            description: workflow.description.clone(),
            input_args: InputArgs {
                blobnames_with_sas: blobnames.clone(),
                account: self.input.account_name.clone(),
                container: self.input.container.clone(),
                blobnames,
            },
            input_storage_type: BLOCK_BLOB_STORAGE.to_string(),
            output_args: OutputArgs {
                account: self.output.account_name.clone(),
                container: self.output.container.clone(),
                container_sas: tokens.output.to_string(),
                output_include_logfiles: workflow.output_include_logfiles,
                overwrite: workflow.overwrite,
                output_filename_base: workflow.output_filename_base.clone(),
            },
            output_storage_type: BLOCK_BLOB_STORAGE.to_string(),
            process_args: format!("R={}", workflow.reference),
            process: workflow.process.clone(),
            optional_args: serde_json::Map::new(),
            ignore_azure_region: None,
        }
    }

    /// Submit `workflow` with freshly minted SAS tokens.
    ///
    /// The request is sent once. Any 2xx answer is returned as is.
    pub async fn submit_workflow(
        &self,
        ctx: &Context,
        workflow: &Workflow,
    ) -> Result<WorkflowSubmission> {
        let tokens = self.sas_tokens(now())?;
        let body = serde_json::to_vec(&self.build_request(&tokens, workflow))?;

        let req = Request::post(format!("{}{WORKFLOWS_PATH}", self.endpoint))
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, USER_AGENT_VALUE)
            .body(Bytes::from(body))?;

        let signer = Signer::new(
            ctx.clone(),
            StaticCredentialProvider::new(&self.subscription_key),
            RequestSigner::new(),
        );
        let (mut parts, body) = req.into_parts();
        signer.sign(&mut parts).await?;
        let req = Request::from_parts(parts, body);

        debug!("submitting workflow: {} {}", req.method(), req.uri());
        let resp = ctx.http_send_as_string(req).await?;
        let status = resp.status();
        info!("workflow submission returned {status}");

        let body = resp.into_body();
        if status.is_success() {
            return Ok(WorkflowSubmission { status, body });
        }

        let message = format!("workflow submission returned {status}: {body}");
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::credential_denied(message),
            _ => Error::unexpected(message),
        })
    }
}
