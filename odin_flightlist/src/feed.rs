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

///! the raw tar1090/readsb `aircraft.json` snapshot and the sources we can get it from

use std::{path::{Path,PathBuf}, time::Duration};
use serde::Deserialize;
use serde_json::{Map,Value};
use chrono::{DateTime,Utc};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::{ACCEPT,HeaderValue}};
use tracing::debug;

use crate::{Altitude, Position};
use crate::errors::{Result,fetch_error,malformed};

/// one retrieved set of all currently tracked aircraft, see
/// https://github.com/wiedehopf/readsb/blob/dev/README-json.md
#[derive(Deserialize,Debug,Default)]
pub struct RawSnapshot {
    #[serde(default)]
    pub now: Option<f64>, // epoch seconds
    #[serde(default)]
    pub messages: Option<u64>,
    pub aircraft: Vec<RawAircraftEntry>
}

impl RawSnapshot {
    pub fn new (aircraft: Vec<RawAircraftEntry>)->Self {
        RawSnapshot { now: None, messages: None, aircraft }
    }

    pub fn timestamp (&self)->Option<DateTime<Utc>> {
        self.now.and_then( |secs| DateTime::from_timestamp_millis( (secs * 1000.0) as i64))
    }

    pub fn len (&self)->usize { self.aircraft.len() }
    pub fn is_empty (&self)->bool { self.aircraft.is_empty() }
}

/// a single, partially populated aircraft entry as we get it from the feed.
/// We keep this as a JSON object so that a field with an unexpected type only affects that
/// field (and not the whole snapshot)
#[derive(Deserialize,Debug,Clone,Default)]
#[serde(transparent)]
pub struct RawAircraftEntry(Map<String,Value>);

impl RawAircraftEntry {
    /// returns None if this is not a JSON object
    pub fn from_value (v: Value)->Option<Self> {
        match v {
            Value::Object(map) => Some( RawAircraftEntry(map)),
            _ => None
        }
    }

    pub fn get (&self, key: &str)->Option<&Value> {
        match self.0.get( key) {
            Some(Value::Null) | None => None,
            other => other
        }
    }

    /// the ICAO 24bit address (or '~' prefixed non-ICAO id) - the key of an entry within a snapshot
    pub fn hex (&self)->Option<&str> {
        match self.get("hex") {
            Some(Value::String(s)) if !s.trim().is_empty() => Some( s.trim()),
            _ => None
        }
    }

    pub fn str_field (&self, key: &str)->Result<Option<&str>> {
        match self.get( key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok( Some( s.as_str())),
            Some(v) => Err( malformed!("'{}' is not a string: {}", key, v))
        }
    }

    pub fn f64_field (&self, key: &str)->Result<Option<f64>> {
        match self.get( key) {
            None => Ok(None),
            Some(Value::Number(n)) => n.as_f64().map( Some).ok_or_else( || malformed!("'{}' not a f64: {}", key, n)),
            Some(v) => Err( malformed!("'{}' is not numeric: {}", key, v))
        }
    }

    pub fn callsign (&self)->Result<Option<&str>> { self.str_field("flight") }
    pub fn squawk (&self)->Result<Option<&str>> { self.str_field("squawk") }
    pub fn mach (&self)->Result<Option<f64>> { self.f64_field("mach") }
    pub fn track (&self)->Result<Option<f64>> { self.f64_field("track") }

    /// barometric altitude in ft, or the literal "ground"
    pub fn altitude (&self)->Result<Option<Altitude>> {
        match self.get("alt_baro") {
            None => Ok(None),
            Some(Value::Number(n)) => n.as_f64().map( |ft| Some(Altitude::from_feet(ft))).ok_or_else( || malformed!("'alt_baro' not a f64: {}", n)),
            Some(Value::String(s)) if s == "ground" => Ok( Some(Altitude::Ground)),
            Some(v) => Err( malformed!("'alt_baro' is neither numeric nor ground: {}", v))
        }
    }

    /// position requires both lat and lon. A malformed value of either one is an error
    pub fn position (&self)->Result<Option<Position>> {
        let lat = self.f64_field("lat")?;
        let lon = self.f64_field("lon")?;

        match (lat, lon) {
            (Some(latitude), Some(longitude)) => {
                if latitude.abs() > 90.0 || longitude.abs() > 180.0 {
                    Err( malformed!("position out of range: {},{}", latitude, longitude))
                } else {
                    Ok( Some( Position { latitude, longitude }))
                }
            }
            _ => Ok(None)
        }
    }
}

pub fn parse_snapshot (data: &[u8])->Result<RawSnapshot> {
    Ok( serde_json::from_slice( data)? )
}

/* #region sources *********************************************************************************/

/// the fetch interface the pipeline consumes. Any error returned from here is a
/// `FetchError`, i.e. the report is not produced
#[async_trait]
pub trait AircraftSource: Send + Sync {
    async fn fetch_snapshot (&self)->Result<RawSnapshot>;
    fn description (&self)->String;
}

/// retrieves the snapshot from a tar1090/readsb web server
pub struct HttpAircraftSource {
    client: Client,
    url: String,
}

impl HttpAircraftSource {
    pub fn new (url: impl ToString, timeout: Duration)->Result<Self> {
        let client = Client::builder().timeout( timeout).build()?;
        Ok( HttpAircraftSource { client, url: url.to_string() } )
    }

    pub fn with_client (client: Client, url: impl ToString)->Self {
        HttpAircraftSource { client, url: url.to_string() }
    }
}

#[async_trait]
impl AircraftSource for HttpAircraftSource {
    async fn fetch_snapshot (&self)->Result<RawSnapshot> {
        debug!("retrieving {}", self.url);
        let response = self.client.get( self.url.as_str())
            .header( ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err( |e| fetch_error!("request to {} failed: {}", self.url, e))?;

        match response.status() {
            StatusCode::OK => {
                let bytes = response.bytes().await.map_err( |e| fetch_error!("reading {} failed: {}", self.url, e))?;
                parse_snapshot( &bytes).map_err( |e| fetch_error!("invalid snapshot from {}: {}", self.url, e))
            }
            other => Err( fetch_error!("response status {:?} from {}", other, self.url))
        }
    }

    fn description (&self)->String { self.url.clone() }
}

/// reads a previously saved aircraft.json (e.g. for offline runs)
pub struct FileAircraftSource {
    path: PathBuf,
}

impl FileAircraftSource {
    pub fn new (path: impl AsRef<Path>)->Self {
        FileAircraftSource { path: path.as_ref().to_path_buf() }
    }
}

#[async_trait]
impl AircraftSource for FileAircraftSource {
    async fn fetch_snapshot (&self)->Result<RawSnapshot> {
        debug!("reading {:?}", self.path);
        let data = tokio::fs::read( &self.path).await.map_err( |e| fetch_error!("cannot read {:?}: {}", self.path, e))?;
        parse_snapshot( &data).map_err( |e| fetch_error!("invalid snapshot in {:?}: {}", self.path, e))
    }

    fn description (&self)->String { self.path.display().to_string() }
}

/* #endregion sources */
