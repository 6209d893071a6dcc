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

//! Service SAS tokens scoped to a single blob container.
//!
//! [Create a service SAS](https://learn.microsoft.com/en-us/rest/api/storageservices/create-service-sas)

use std::fmt;
use std::str::FromStr;

use azgen_core::time::{format_date, Date, DateTime};
use azgen_core::utils::Redact;
use azgen_core::{hash, Error, Result};

use crate::constants::*;

/// Specifies the protocol permitted for a request made with the SAS.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Protocol {
    /// Only https.
    Https,
    /// Both http and https.
    HttpHttps,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Protocol::Https => write!(f, "https"),
            Protocol::HttpHttps => write!(f, "http,https"),
        }
    }
}

/// Permissions granted by a container SAS.
///
/// Parsed from any ordering of `racwdl` and always rendered in the order
/// Azure expects, so `"rwcdl"` renders as `"rcwdl"`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SasPermissions {
    /// `r`
    pub read: bool,
    /// `a`
    pub add: bool,
    /// `c`
    pub create: bool,
    /// `w`
    pub write: bool,
    /// `d`
    pub delete: bool,
    /// `l`
    pub list: bool,
}

impl FromStr for SasPermissions {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::request_invalid("sas permissions must not be empty"));
        }

        let mut perms = SasPermissions::default();
        for c in s.chars() {
            match c {
                'r' => perms.read = true,
                'a' => perms.add = true,
                'c' => perms.create = true,
                'w' => perms.write = true,
                'd' => perms.delete = true,
                'l' => perms.list = true,
                _ => {
                    return Err(Error::request_invalid(format!(
                        "unsupported sas permission {c:?} in {s:?}"
                    )))
                }
            }
        }
        Ok(perms)
    }
}

impl fmt::Display for SasPermissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (granted, c) in [
            (self.read, 'r'),
            (self.add, 'a'),
            (self.create, 'c'),
            (self.write, 'w'),
            (self.delete, 'd'),
            (self.list, 'l'),
        ] {
            if granted {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

/// Validity window of a SAS, with day granularity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SasWindow {
    /// First day the token is valid.
    pub start: Date,
    /// Day the token expires.
    pub expiry: Date,
}

impl SasWindow {
    /// A window starting on the UTC date of `now` and expiring one day later.
    pub fn starting_at(now: DateTime) -> Result<Self> {
        let start = now.date_naive();
        let expiry = start
            .checked_add_days(chrono::Days::new(1))
            .ok_or_else(|| Error::unexpected(format!("no day follows {start}")))?;
        Ok(Self { start, expiry })
    }
}

/// ContainerSas signs a service SAS for one blob container with the
/// account's shared key.
#[derive(Clone)]
pub struct ContainerSas {
    account_name: String,
    account_key: String,
    container: String,
    permissions: SasPermissions,
    window: SasWindow,
    version: String,
    protocol: Option<Protocol>,
}

impl fmt::Debug for ContainerSas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerSas")
            .field("account_name", &self.account_name)
            .field("account_key", &Redact::from(&self.account_key))
            .field("container", &self.container)
            .field("permissions", &self.permissions.to_string())
            .field("window", &self.window)
            .field("version", &self.version)
            .field("protocol", &self.protocol)
            .finish()
    }
}

impl ContainerSas {
    /// Create a SAS signer for `container` with the default version.
    pub fn new(
        account_name: &str,
        account_key: &str,
        container: &str,
        permissions: SasPermissions,
        window: SasWindow,
    ) -> Self {
        Self {
            account_name: account_name.to_string(),
            account_key: account_key.to_string(),
            container: container.to_string(),
            permissions,
            window,
            version: SAS_VERSION.to_string(),
            protocol: None,
        }
    }

    /// Restrict the protocols the token may be used with.
    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = Some(protocol);
        self
    }

    fn canonicalized_resource(&self) -> String {
        format!("/blob/{}/{}", self.account_name, self.container)
    }

    fn string_to_sign(&self) -> String {
        [
            self.permissions.to_string(),
            format_date(self.window.start),
            format_date(self.window.expiry),
            self.canonicalized_resource(),
            // signed identifier
            String::new(),
            // signed ip
            String::new(),
            self.protocol.map(|v| v.to_string()).unwrap_or_default(),
            self.version.clone(),
            SAS_RESOURCE_CONTAINER.to_string(),
            // snapshot time
            String::new(),
            // rscc, rscd, rsce, rscl, rsct
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
        ]
        .join("\n")
    }

    fn signature(&self) -> Result<String> {
        let key = hash::base64_decode(&self.account_key)?;
        Ok(hash::base64_hmac_sha256(
            &key,
            self.string_to_sign().as_bytes(),
        ))
    }

    /// The ordered query pairs that make up the token.
    pub fn token(&self) -> Result<Vec<(String, String)>> {
        let mut elements: Vec<(String, String)> = vec![
            ("sv".to_string(), self.version.to_string()),
            ("st".to_string(), format_date(self.window.start)),
            ("se".to_string(), format_date(self.window.expiry)),
            ("sr".to_string(), SAS_RESOURCE_CONTAINER.to_string()),
            ("sp".to_string(), self.permissions.to_string()),
        ];

        if let Some(protocol) = &self.protocol {
            elements.push(("spr".to_string(), urlencoded(protocol.to_string())))
        }

        let sig = self.signature()?;
        elements.push(("sig".to_string(), urlencoded(sig)));

        Ok(elements)
    }

    /// Sign and render the token as a query string.
    pub fn sign(&self) -> Result<SasToken> {
        let query = self
            .token()?
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");

        Ok(SasToken {
            query,
            window: self.window,
        })
    }
}

/// A signed SAS query string, without the leading `?`.
#[derive(Clone, PartialEq, Eq)]
pub struct SasToken {
    query: String,
    window: SasWindow,
}

impl SasToken {
    /// The query string.
    pub fn as_str(&self) -> &str {
        &self.query
    }

    /// Window the token is valid in.
    pub fn window(&self) -> SasWindow {
        self.window
    }
}

impl fmt::Display for SasToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query)
    }
}

impl fmt::Debug for SasToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (params, sig) = self
            .query
            .rsplit_once("&sig=")
            .unwrap_or((self.query.as_str(), ""));
        f.debug_struct("SasToken")
            .field("params", &params)
            .field("sig", &Redact::from(sig))
            .field("window", &self.window)
            .finish()
    }
}

fn urlencoded(s: String) -> String {
    form_urlencoded::byte_serialize(s.as_bytes()).collect()
}
