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

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use azgen_core::{Context, ErrorKind, Result};
use azgen_fs_tokio::{TokioFileRead, TokioFileWrite};
use azgen_storage::{
    AccountKey, AccountParameters, NameAvailability, StorageAccount, StorageIdentity,
    StorageManagement, StorageProvisioner,
};
use pretty_assertions::assert_eq;

/// In-memory management API that records every call.
#[derive(Debug, Default)]
struct RecordingManagement {
    taken: bool,
    single_key: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingManagement {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl StorageManagement for RecordingManagement {
    async fn check_name_availability(&self, account_name: &str) -> Result<NameAvailability> {
        self.record(format!("check_name_availability {account_name}"));
        if self.taken {
            Ok(NameAvailability::taken(format!(
                "The storage account named {account_name} is already taken."
            )))
        } else {
            Ok(NameAvailability::available())
        }
    }

    async fn create_account(
        &self,
        resource_group: &str,
        account_name: &str,
        parameters: &AccountParameters,
    ) -> Result<StorageAccount> {
        self.record(format!(
            "create_account {resource_group} {account_name} {} {} {}",
            parameters.location, parameters.kind, parameters.sku.name
        ));
        Ok(StorageAccount {
            id: None,
            name: account_name.to_string(),
            location: parameters.location.clone(),
        })
    }

    async fn list_keys(&self, resource_group: &str, account_name: &str) -> Result<Vec<AccountKey>> {
        self.record(format!("list_keys {resource_group} {account_name}"));
        let mut keys = vec![AccountKey {
            key_name: "key1".to_string(),
            value: "cHJpbWFyeQ==".to_string(),
        }];
        if !self.single_key {
            keys.push(AccountKey {
                key_name: "key2".to_string(),
                value: "c2Vjb25kYXJ5".to_string(),
            });
        }
        Ok(keys)
    }

    async fn create_container(
        &self,
        resource_group: &str,
        account_name: &str,
        container_name: &str,
    ) -> Result<()> {
        self.record(format!(
            "create_container {resource_group} {account_name} {container_name}"
        ));
        Ok(())
    }
}

fn fs_context() -> Context {
    Context::new()
        .with_file_read(TokioFileRead)
        .with_file_write(TokioFileWrite)
}

#[tokio::test]
async fn test_provision_generates_account_name() {
    let _ = env_logger::builder().is_test(true).try_init();

    let management = RecordingManagement::default();
    let mut provisioner = StorageProvisioner::new("genomics-rg");

    let identity = provisioner.provision_storage(&management).await.unwrap().clone();

    let suffix = identity
        .account_name
        .strip_prefix("storageaccount")
        .expect("generated name must use the fixed prefix");
    assert!(suffix.len() >= 4 && suffix.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(identity.resource_group, "genomics-rg");
    assert_eq!(identity.region, "westeurope");

    let record: serde_json::Value =
        serde_json::from_str(&provisioner.status_json().unwrap()).unwrap();
    let mut keys: Vec<_> = record.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, ["RG", "SA_name", "SA_region"]);

    let access_keys = provisioner.access_keys().unwrap();
    assert_eq!(access_keys.primary, "cHJpbWFyeQ==");
    assert_eq!(access_keys.secondary, "c2Vjb25kYXJ5");

    let name = &identity.account_name;
    assert_eq!(
        management.calls(),
        [
            format!("check_name_availability {name}"),
            format!("create_account genomics-rg {name} westeurope StorageV2 Standard_LRS"),
            format!("list_keys genomics-rg {name}"),
        ]
    );
}

#[tokio::test]
async fn test_provision_with_given_name_and_region() {
    let management = RecordingManagement::default();
    let mut provisioner = StorageProvisioner::new("genomics-rg")
        .with_account_name("genomicsinput")
        .with_region("northeurope");

    let identity = provisioner.provision_storage(&management).await.unwrap();

    assert_eq!(
        identity,
        &StorageIdentity::new("genomics-rg", "genomicsinput", "northeurope")
    );
}

#[tokio::test]
async fn test_taken_name_stops_provisioning() {
    let management = RecordingManagement {
        taken: true,
        ..Default::default()
    };
    let mut provisioner = StorageProvisioner::new("genomics-rg").with_account_name("taken");

    let err = provisioner.provision_storage(&management).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NameConflict);
    assert!(err.to_string().contains("Name taken is already taken"));
    assert_eq!(management.calls(), ["check_name_availability taken"]);
    assert!(provisioner.identity().is_none());
    assert!(provisioner.access_keys().is_none());
}

#[tokio::test]
async fn test_taken_generated_name_is_not_kept() {
    let management = RecordingManagement {
        taken: true,
        ..Default::default()
    };
    let mut provisioner = StorageProvisioner::new("genomics-rg");

    let err = provisioner.provision_storage(&management).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NameConflict);
    assert!(provisioner.account_name().is_none());

    let err = provisioner
        .provision_blob_container(&management, Some("reads"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotProvisioned);

    let calls = management.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].starts_with("check_name_availability storageaccount"));
}

#[tokio::test]
async fn test_missing_second_key_is_reported() {
    let management = RecordingManagement {
        single_key: true,
        ..Default::default()
    };
    let mut provisioner = StorageProvisioner::new("genomics-rg").with_account_name("onekey");

    let err = provisioner.provision_storage(&management).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Unexpected);
    assert!(provisioner.access_keys().is_none());
    // The account exists, so its identity is still recorded.
    assert_eq!(provisioner.identity().unwrap().account_name, "onekey");
}

#[tokio::test]
async fn test_provision_blob_container() {
    let management = RecordingManagement::default();
    let mut provisioner = StorageProvisioner::new("genomics-rg").with_account_name("genomicsinput");
    provisioner.provision_storage(&management).await.unwrap();

    let named = provisioner
        .provision_blob_container(&management, Some("reads"))
        .await
        .unwrap();
    let generated = provisioner
        .provision_blob_container(&management, None)
        .await
        .unwrap();

    assert_eq!(named, "reads");
    let suffix = generated.strip_prefix("container").unwrap();
    assert!(suffix.len() >= 4 && suffix.chars().all(|c| c.is_ascii_digit()));

    let calls = management.calls();
    assert_eq!(calls[3], "create_container genomics-rg genomicsinput reads");
    assert_eq!(
        calls[4],
        format!("create_container genomics-rg genomicsinput {generated}")
    );
}

#[tokio::test]
async fn test_container_requires_account() {
    let management = RecordingManagement::default();
    let provisioner = StorageProvisioner::new("genomics-rg");

    let err = provisioner
        .provision_blob_container(&management, Some("reads"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotProvisioned);
    assert!(management.calls().is_empty());
}

#[tokio::test]
async fn test_status_to_json_requires_provisioning() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("status.json");

    let err = StorageProvisioner::new("genomics-rg")
        .status_to_json(&fs_context(), path.to_str().unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotProvisioned);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_status_round_trip_drops_access_keys() {
    let ctx = fs_context();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("status.json");
    let path = path.to_str().unwrap();

    let management = RecordingManagement::default();
    let mut provisioner = StorageProvisioner::new("genomics-rg").with_region("eastus");
    provisioner.provision_storage(&management).await.unwrap();
    assert!(provisioner.access_keys().is_some());
    provisioner.status_to_json(&ctx, path).await.unwrap();

    let restored = StorageProvisioner::from_status_json(&ctx, path).await.unwrap();

    assert_eq!(restored.identity(), provisioner.identity());
    assert_eq!(restored.resource_group(), "genomics-rg");
    assert_eq!(restored.region(), "eastus");
    assert_eq!(restored.account_name(), provisioner.account_name());
    // Keys are never persisted, a restored provisioner has none.
    assert!(restored.access_keys().is_none());

    // A restored provisioner still knows which account to put containers in.
    restored
        .provision_blob_container(&management, Some("outputs"))
        .await
        .unwrap();
    let account = provisioner.account_name().unwrap();
    assert_eq!(
        management.calls().last().unwrap(),
        &format!("create_container genomics-rg {account} outputs")
    );
}

#[tokio::test]
async fn test_from_status_json_rejects_partial_record() {
    let ctx = fs_context();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("status.json");
    std::fs::write(&path, r#"{"SA_name": "storageaccount0042", "RG": "genomics-rg"}"#).unwrap();

    let err = StorageProvisioner::from_status_json(&ctx, path.to_str().unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Serialization);
}
