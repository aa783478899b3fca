/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use thiserror::Error;

pub type Result<T> = std::result::Result<T,OdinFlightListError>;

#[derive(Error,Debug)]
pub enum OdinFlightListError {

    /// feed could not be retrieved - the report is not produced
    #[error("fetch error {0}")]
    FetchError(String),

    /// a single aircraft entry has a field with an unexpected shape - recovered per record
    #[error("malformed record {0}")]
    MalformedRecord(String),

    /// detected before we fetch anything
    #[error("config error {0}")]
    ConfigError(String),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("reqwest error {0}")]
    ReqwestError( #[from] reqwest::Error),

    #[error("serde error {0}")]
    SerdeError( #[from] serde_json::Error),

    #[error("config RON error {0}")]
    RonError( #[from] ron::error::SpannedError),
}

impl OdinFlightListError {
    pub fn is_fetch_error (&self)->bool {
        matches!( self, OdinFlightListError::FetchError(_))
    }
}

macro_rules! fetch_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        crate::errors::OdinFlightListError::FetchError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use fetch_error;

macro_rules! malformed {
    ($fmt:literal $(, $arg:expr )* ) => {
        crate::errors::OdinFlightListError::MalformedRecord( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use malformed;

macro_rules! config_error {
    ($fmt:literal $(, $arg:expr )* ) => {
        crate::errors::OdinFlightListError::ConfigError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use config_error;
