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

///! configuration of the flight list report, loaded from RON files

use std::{collections::HashSet, env, fs, path::{Path,PathBuf}, time::Duration};
use serde::{Serialize,Deserialize};
use geo::Point;
use tracing::debug;

use crate::errors::{Result,config_error};

pub const CONFIGS: &'static str = "configs";
pub const DEFAULT_CONFIG: &'static str = "flightlist.ron";

/// the fixed location we compute aircraft distances from (decimal degrees)
#[derive(Deserialize,Serialize,Debug,Clone,Copy,PartialEq)]
pub struct ObserverLocation {
    pub lat: f64,
    pub lon: f64,
}

impl ObserverLocation {
    pub fn new (lat: f64, lon: f64)->Self { ObserverLocation { lat, lon } }

    /// note that geo uses x,y (lon,lat) order
    pub fn point (&self)->Point { Point::new( self.lon, self.lat) }

    pub fn check (&self)->Result<()> {
        if !self.lat.is_finite() || self.lat < -90.0 || self.lat > 90.0 {
            return Err( config_error!("observer latitude out of range: {}", self.lat))
        }
        if !self.lon.is_finite() || self.lon < -180.0 || self.lon > 180.0 {
            return Err( config_error!("observer longitude out of range: {}", self.lon))
        }
        Ok(())
    }
}

/// process-wide settings, read-only for the duration of a run
#[derive(Deserialize,Serialize,Debug,Clone)]
#[serde(default)]
pub struct FlightListConfig {
    pub observer: Option<ObserverLocation>, // has to be set - there is no sensible default
    pub url: String, // of the tar1090/readsb aircraft.json feed
    pub timeout: Duration, // for the feed request

    pub max_display: usize, // max number of flights in the report
    pub exclude: HashSet<String>, // hex ids we never report
    pub require_callsign_and_position: bool, // only report flights with call sign and known distance
    pub stats_include_excluded: bool, // do excluded/filtered flights count for highest/fastest/furthest

    pub include_stats: bool,
    pub stats_links: bool,
    pub flight_links: bool,
    pub show_speed: bool,

    pub flight_link: String, // base URL, the hex id gets appended
    pub header: String,
    pub footer: Vec<String>,
}

impl Default for FlightListConfig {
    fn default()->Self {
        FlightListConfig {
            observer: None,
            url: "http://localhost/tar1090/data/aircraft.json".to_string(),
            timeout: Duration::from_secs(10),
            max_display: 15,
            exclude: HashSet::new(),
            require_callsign_and_position: false,
            stats_include_excluded: true,
            include_stats: true,
            stats_links: true,
            flight_links: true,
            show_speed: true,
            flight_link: "https://adsb.oarc.uk/?icao=".to_string(),
            header: "Current flights tracked using 1090 MHz Radio ADSB transmissions".to_string(),
            footer: Vec::new(),
        }
    }
}

impl FlightListConfig {
    /// the observer location, which is only available for validated configs
    pub fn observer (&self)->Result<ObserverLocation> {
        self.observer.ok_or_else( || config_error!("observer location not set"))
    }

    pub fn is_excluded (&self, id: &str)->bool {
        self.exclude.contains( id)
    }

    /// check everything we need before we go out and fetch data
    pub fn validate (&self)->Result<()> {
        self.observer()?.check()?;

        if self.url.trim().is_empty() {
            return Err( config_error!("no feed url"))
        }
        if self.max_display == 0 {
            return Err( config_error!("max_display has to be > 0"))
        }
        Ok(())
    }
}

/// locate a config file. Lookup order is
///   1. $ODIN_HOME/configs/odin_flightlist/<filename>
///   2. ~/.odin/configs/odin_flightlist/<filename>
///   3. <crate-dir>/configs/<filename> (within the source repo)
pub fn find_config_file (filename: &str)->Option<PathBuf> {
    let resource_crate = env!("CARGO_PKG_NAME");

    if let Ok(odin_home) = env::var("ODIN_HOME") {
        let path = Path::new( odin_home.as_str()).join(CONFIGS).join(resource_crate).join(filename);
        if path.is_file() { return Some(path) }
    }

    if let Ok(usr_home) = env::var("HOME") {
        let path = Path::new( usr_home.as_str()).join(".odin").join(CONFIGS).join(resource_crate).join(filename);
        if path.is_file() { return Some(path) }
    }

    let path = Path::new( env!("CARGO_MANIFEST_DIR")).join(CONFIGS).join(filename);
    if path.is_file() { Some(path) } else { None }
}

pub fn load_config (filename: &str)->Result<FlightListConfig> {
    match find_config_file( filename) {
        Some(path) => load_config_from( &path),
        None => Err( config_error!("config file not found: {}", filename))
    }
}

pub fn load_config_from (path: impl AsRef<Path>)->Result<FlightListConfig> {
    let path = path.as_ref();
    debug!("loading config from {:?}", path);
    let data = fs::read_to_string( path)?;
    parse_config( &data)
}

pub fn parse_config (ron_src: &str)->Result<FlightListConfig> {
    Ok( ron::from_str( ron_src)? )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_observer () {
        let config = FlightListConfig::default();
        match config.validate() {
            Err(crate::errors::OdinFlightListError::ConfigError(_)) => {}
            other => panic!("expected config error, got {:?}", other)
        }
    }

    #[test]
    fn test_observer_range () {
        let mut config = FlightListConfig::default();
        config.observer = Some( ObserverLocation::new( 91.0, 0.0));
        assert!( config.validate().is_err());

        config.observer = Some( ObserverLocation::new( 51.5, -0.12));
        assert!( config.validate().is_ok());

        config.max_display = 0;
        assert!( config.validate().is_err());
    }

    #[test]
    fn test_parse_partial () {
        let src = r#"(
            observer: Some(( lat: 51.5, lon: -0.12 )),
            max_display: 25,
            exclude: ["43bf94", "43bf95"],
        )"#;
        let config = parse_config( src).unwrap();
        assert_eq!( config.max_display, 25);
        assert!( config.is_excluded("43bf95"));
        assert!( !config.is_excluded("4ca7b5"));
        assert!( config.include_stats); // default
        assert!( config.validate().is_ok());
    }
}
