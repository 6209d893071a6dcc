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

//! Time related utils.

use chrono::Utc;

use crate::{Error, Result};

/// DateTime is the time type used across azgen.
pub type DateTime = chrono::DateTime<Utc>;

/// Date is the day-granular type SAS windows are expressed in.
pub type Date = chrono::NaiveDate;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Format date into `2022-03-13`.
pub fn format_date(date: Date) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format time into RFC3339: `2022-03-13T07:20:04Z`
pub fn format_rfc3339(t: DateTime) -> String {
    t.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Parse time from RFC3339, converting any offset to UTC.
pub fn parse_rfc3339(s: &str) -> Result<DateTime> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|v| v.with_timezone(&Utc))
        .map_err(|e| {
            Error::unexpected(format!("parse '{s}' into rfc3339 failed")).with_source(e)
        })
}
