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

use std::time::Duration;

use azgen_core::{Context, Error, Result};

use crate::constants::*;

/// Config carries all the configuration for the Azure Resource Manager storage API.
#[derive(Clone, Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Config {
    /// `subscription_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_SUBSCRIPTION_ID`]
    pub subscription_id: Option<String>,
    /// `endpoint` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_RESOURCE_MANAGER_ENDPOINT`]
    /// - default to `https://management.azure.com`
    pub endpoint: Option<String>,
    /// The ARM api-version sent with every call.
    pub api_version: String,
    /// How long to wait between polls of a long running account creation
    /// when the service does not send `Retry-After`.
    pub poll_interval: Duration,
    /// Give up on a long running account creation after this many polls.
    pub max_polls: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            subscription_id: None,
            endpoint: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            poll_interval: Duration::from_secs(5),
            max_polls: 120,
        }
    }
}

impl Config {
    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if self.subscription_id.is_none() {
            self.subscription_id = ctx.env_var(AZURE_SUBSCRIPTION_ID);
        }

        if self.endpoint.is_none() {
            self.endpoint = ctx.env_var(AZURE_RESOURCE_MANAGER_ENDPOINT);
        }

        self
    }

    /// Set the subscription id.
    pub fn with_subscription_id(mut self, subscription_id: impl Into<String>) -> Self {
        self.subscription_id = Some(subscription_id.into());
        self
    }

    /// Set the management endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the polling behaviour for long running operations.
    pub fn with_polling(mut self, poll_interval: Duration, max_polls: usize) -> Self {
        self.poll_interval = poll_interval;
        self.max_polls = max_polls;
        self
    }

    /// Returns the subscription id or a config error if it was never set.
    pub fn subscription_id(&self) -> Result<&str> {
        match self.subscription_id.as_deref() {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(Error::config_invalid(format!(
                "subscription id is required, set {AZURE_SUBSCRIPTION_ID}"
            ))),
        }
    }

    pub(crate) fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or(DEFAULT_MANAGEMENT_ENDPOINT)
            .trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use azgen_core::{ErrorKind, StaticEnv};

    #[test]
    fn test_config_from_env() {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([
            (AZURE_SUBSCRIPTION_ID, "00000000-0000-0000-0000-000000000000"),
            (AZURE_RESOURCE_MANAGER_ENDPOINT, "http://127.0.0.1:8080/"),
        ]));

        let config = Config::default().from_env(&ctx);
        assert_eq!(
            config.subscription_id().unwrap(),
            "00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(config.endpoint(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_explicit_subscription_wins_over_env() {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([(AZURE_SUBSCRIPTION_ID, "env")]));

        let config = Config::default()
            .with_subscription_id("explicit")
            .from_env(&ctx);
        assert_eq!(config.subscription_id().unwrap(), "explicit");
    }

    #[test]
    fn test_explicit_endpoint_wins_over_env() {
        let ctx = Context::new().with_env(StaticEnv::from_pairs([(
            AZURE_RESOURCE_MANAGER_ENDPOINT,
            "http://127.0.0.1:8080",
        )]));

        let config = Config::default()
            .with_endpoint("https://management.usgovcloudapi.net/")
            .from_env(&ctx);
        assert_eq!(config.endpoint(), "https://management.usgovcloudapi.net");
    }

    #[test]
    fn test_default_endpoint() {
        let config = Config::default().from_env(&Context::new());
        assert_eq!(config.endpoint(), "https://management.azure.com");
    }

    #[test]
    fn test_missing_subscription_id() {
        let config = Config::default().from_env(&Context::new());

        assert_eq!(config, Config::default());
        let err = config.subscription_id().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}
