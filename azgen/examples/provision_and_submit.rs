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

use std::env;

use anyhow::Result;
use azgen::genomics::{GenomicsClient, StorageLocation, Workflow};
use azgen::storage::{default_management, StorageProvisioner};

/// Provision a storage account with an input container, then submit a
/// workflow reading from it.
///
/// Expects `AZURE_SUBSCRIPTION_ID`, a logged in Azure CLI (or
/// `AZURE_ACCESS_TOKEN`) and `AZGEN_GENOMICS_SUBSCRIPTION_KEY`.
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let resource_group = env::args().nth(1).unwrap_or_else(|| "genomics-rg".to_string());
    let subscription_key = env::var("AZGEN_GENOMICS_SUBSCRIPTION_KEY")?;

    let ctx = azgen::default_context();
    let management = default_management(&ctx)?;

    // Reuse the account from a previous run when there is one.
    let status_path = "status.json";
    let mut provisioner = match StorageProvisioner::from_status_json(&ctx, status_path).await {
        Ok(v) => v,
        Err(_) => StorageProvisioner::new(resource_group),
    };
    if provisioner.identity().is_none() {
        provisioner.provision_storage(&management).await?;
        provisioner.status_to_json(&ctx, status_path).await?;
    }
    let container = provisioner
        .provision_blob_container(&management, Some("reads"))
        .await?;

    let Some(keys) = provisioner.access_keys() else {
        println!("account restored from {status_path}, access keys are not persisted");
        return Ok(());
    };
    let Some(identity) = provisioner.identity() else {
        return Ok(());
    };

    let input = StorageLocation::new(&identity.account_name, &keys.primary, &container);
    let client = GenomicsClient::new(&subscription_key, &identity.region, input);

    let workflow = Workflow::new("sample_R1.fastq.gz", "sample_R2.fastq.gz")
        .with_output_filename_base("sample");
    let submission = client.submit_workflow(&ctx, &workflow).await?;
    println!("Request sent with code {}", submission.status);

    Ok(())
}
