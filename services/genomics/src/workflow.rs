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

use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// One paired-end genomics job to run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Workflow {
    /// First read file, as a blob name in the input container.
    pub blob_r1: String,
    /// Second read file, as a blob name in the input container.
    pub blob_r2: String,
    /// Process to run, `gatk` by default.
    pub process: String,
    /// Reference genome, `hg38m1` by default.
    pub reference: String,
    /// Free text description shown by the service.
    pub description: String,
    /// Base name of the output files, empty lets the service pick one.
    pub output_filename_base: String,
    /// Overwrite existing output files.
    pub overwrite: bool,
    /// Copy log files into the output container.
    pub output_include_logfiles: bool,
}

impl Workflow {
    /// Create a workflow for the given pair of read files.
    pub fn new(blob_r1: &str, blob_r2: &str) -> Self {
        Self {
            blob_r1: blob_r1.to_string(),
            blob_r2: blob_r2.to_string(),
            process: DEFAULT_PROCESS.to_string(),
            reference: DEFAULT_REFERENCE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            output_filename_base: String::new(),
            overwrite: false,
            output_include_logfiles: true,
        }
    }

    /// Set the process.
    pub fn with_process(mut self, process: &str) -> Self {
        self.process = process.to_string();
        self
    }

    /// Set the reference genome.
    pub fn with_reference(mut self, reference: &str) -> Self {
        self.reference = reference.to_string();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Set the output file base name.
    pub fn with_output_filename_base(mut self, base: &str) -> Self {
        self.output_filename_base = base.to_string();
        self
    }

    /// Overwrite existing output files.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// Body of `POST /api/workflows/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WorkflowRequest {
    /// Always empty.
    pub workflow_class: String,
    /// Free text description.
    pub description: String,
    /// Where the reads are.
    pub input_args: InputArgs,
    /// Storage type of the input.
    pub input_storage_type: String,
    /// Where the results go.
    pub output_args: OutputArgs,
    /// Storage type of the output.
    pub output_storage_type: String,
    /// Arguments for the process, `R=<reference>`.
    pub process_args: String,
    /// Process to run.
    pub process: String,
    /// Always empty.
    pub optional_args: serde_json::Map<String, serde_json::Value>,
    /// Always null.
    pub ignore_azure_region: Option<bool>,
}

/// Input section of a [`WorkflowRequest`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct InputArgs {
    /// SAS qualified blob names joined by `,`.
    pub blobnames_with_sas: String,
    /// Input storage account.
    pub account: String,
    /// Input container.
    pub container: String,
    /// Same value as `blobnames_with_sas`.
    pub blobnames: String,
}

/// Output section of a [`WorkflowRequest`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct OutputArgs {
    /// Output storage account.
    pub account: String,
    /// Output container.
    pub container: String,
    /// SAS granting write access to the output container.
    pub container_sas: String,
    /// Copy log files into the output container.
    pub output_include_logfiles: bool,
    /// Overwrite existing output files.
    pub overwrite: bool,
    /// Base name of the output files.
    pub output_filename_base: String,
}

/// What the service answered to a submission.
#[derive(Clone, Debug)]
pub struct WorkflowSubmission {
    /// Response status, always a success.
    pub status: StatusCode,
    /// Raw response body.
    pub body: String,
}

impl WorkflowSubmission {
    /// Parse the response body as json.
    pub fn json(&self) -> azgen_core::Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_workflow_defaults() {
        let workflow = Workflow::new("r1.fq.gz", "r2.fq.gz");

        assert_eq!(workflow.process, "gatk");
        assert_eq!(workflow.reference, "hg38m1");
        assert_eq!(workflow.description, "Submitted by azgen client");
        assert_eq!(workflow.output_filename_base, "");
        assert!(!workflow.overwrite);
        assert!(workflow.output_include_logfiles);
    }

    #[test]
    fn test_workflow_builders() {
        let workflow = Workflow::new("r1.fq.gz", "r2.fq.gz")
            .with_process("snapgatk")
            .with_reference("hg19m1")
            .with_description("sample 42")
            .with_output_filename_base("sample42")
            .with_overwrite(true);

        assert_eq!(workflow.process, "snapgatk");
        assert_eq!(workflow.reference, "hg19m1");
        assert_eq!(workflow.description, "sample 42");
        assert_eq!(workflow.output_filename_base, "sample42");
        assert!(workflow.overwrite);
    }

    #[test]
    fn test_submission_json() {
        let submission = WorkflowSubmission {
            status: StatusCode::CREATED,
            body: r#"{"Id": "42", "Status": "Queued"}"#.to_string(),
        };
        assert_eq!(submission.json().unwrap()["Id"], "42");

        let submission = WorkflowSubmission {
            status: StatusCode::OK,
            body: "accepted".to_string(),
        };
        assert_eq!(
            submission.json().unwrap_err().kind(),
            azgen_core::ErrorKind::Serialization
        );
    }
}
