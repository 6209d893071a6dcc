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

use azgen_core::hash;
use azgen_core::time::DateTime;
use azgen_genomics::{ContainerSas, GenomicsClient, SasWindow, StorageLocation, Workflow};
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::Criterion;

criterion_group!(benches, bench);
criterion_main!(benches);

pub fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("sas");
    let now: DateTime = "2024-03-01T08:12:34Z".parse().expect("time must be valid");
    let key = hash::base64_encode(b"account_key_for_bench");

    group.bench_function("container_sas", |b| {
        let window = SasWindow::starting_at(now).expect("window must be valid");
        let permissions = "rwcdl".parse().expect("permissions must be valid");

        b.iter(|| {
            ContainerSas::new("genomicsinput", &key, "reads", permissions, window)
                .sign()
                .expect("must success")
        })
    });

    group.bench_function("workflow_request", |b| {
        let client = GenomicsClient::new(
            "subscription_key",
            "westeurope",
            StorageLocation::new("genomicsinput", &key, "reads"),
        );
        let workflow = Workflow::new("r1.fq.gz", "r2.fq.gz");

        b.iter(|| {
            let tokens = client.sas_tokens(now).expect("must success");
            serde_json::to_vec(&client.build_request(&tokens, &workflow)).expect("must success")
        })
    });

    group.finish();
}
