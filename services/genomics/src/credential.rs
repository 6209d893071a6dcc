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

use azgen_core::utils::Redact;
use azgen_core::SigningCredential;
use std::fmt::{Debug, Formatter};

/// Subscription key of a Microsoft Genomics account.
#[derive(Clone)]
pub struct Credential {
    /// Primary or secondary key of the genomics account.
    pub subscription_key: String,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("subscription_key", &Redact::from(&self.subscription_key))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.subscription_key.is_empty()
    }
}

impl Credential {
    /// Create a new subscription key credential.
    pub fn with_subscription_key(subscription_key: &str) -> Self {
        Self {
            subscription_key: subscription_key.to_string(),
        }
    }
}
