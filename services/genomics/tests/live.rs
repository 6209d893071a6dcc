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

use azgen_core::{Context, OsEnv};
use azgen_genomics::{GenomicsClient, StorageLocation, Workflow};
use azgen_http_send_reqwest::ReqwestHttpSend;
use log::{info, warn};

fn init_client() -> Option<(Context, GenomicsClient)> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("AZGEN_GENOMICS_TEST").unwrap_or_default() != "on" {
        return None;
    }

    let var = |key: &str| env::var(key).unwrap_or_else(|_| panic!("env {key} must be set"));
    let input = StorageLocation::new(
        &var("AZGEN_GENOMICS_ACCOUNT_NAME"),
        &var("AZGEN_GENOMICS_ACCOUNT_KEY"),
        &var("AZGEN_GENOMICS_CONTAINER"),
    );
    let client = GenomicsClient::new(
        &var("AZGEN_GENOMICS_SUBSCRIPTION_KEY"),
        &var("AZGEN_GENOMICS_REGION"),
        input,
    );

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    Some((ctx, client))
}

#[tokio::test]
async fn test_live_submit_workflow() {
    let Some((ctx, client)) = init_client() else {
        warn!("AZGEN_GENOMICS_TEST is not set, skipped");
        return;
    };

    let workflow = Workflow::new(
        &env::var("AZGEN_GENOMICS_BLOB_R1").expect("env AZGEN_GENOMICS_BLOB_R1 must be set"),
        &env::var("AZGEN_GENOMICS_BLOB_R2").expect("env AZGEN_GENOMICS_BLOB_R2 must be set"),
    );

    let submission = client
        .submit_workflow(&ctx, &workflow)
        .await
        .expect("workflow submission must succeed");
    info!("submitted workflow: {}", submission.body);
    assert!(submission.status.is_success());
}
