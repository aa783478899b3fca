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

///! odin_flightlist - a one-shot report of the aircraft currently tracked by a local ADS-B receiver
///!
///! The flight list is computed from a single tar1090/readsb `aircraft.json` snapshot. Each entry is normalized into
///! a [`FlightRecord`], enriched with its distance from a configured observer location and its speed (from Mach),
///! filtered, ranked by distance and finally rendered as a text report (see [`report`]).

use std::fmt;
use uom::si::{f64::{Length,Velocity}, length::{foot,kilometer}, velocity::kilometer_per_hour};
use tracing::warn;

pub mod errors;
use errors::{Result,malformed};

pub mod config;
use config::ObserverLocation;

pub mod feed;
use feed::RawAircraftEntry;

pub mod derived;
pub mod pipeline;
pub mod report;

#[derive(Debug,Clone,Copy,PartialEq)]
pub struct Position { pub latitude: f64, pub longitude: f64 }

impl Position {
    /// positions are reported (and distances computed) with 0.01 deg resolution
    pub fn rounded (&self)->Self {
        Position { latitude: derived::round2( self.latitude), longitude: derived::round2( self.longitude) }
    }
}

/// barometric altitude as reported by the feed, which uses "ground" for aircraft on the surface
#[derive(Debug,Clone,Copy,PartialEq)]
pub enum Altitude {
    Ground,
    Airborne(Length)
}

impl Altitude {
    pub fn from_feet (ft: f64)->Self { Altitude::Airborne( Length::new::<foot>(ft)) }

    /// None if on ground
    pub fn feet (&self)->Option<f64> {
        match self {
            Altitude::Ground => None,
            Altitude::Airborne(alt) => Some( alt.get::<foot>())
        }
    }
}

impl fmt::Display for Altitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Altitude::Ground => write!( f, "ground"),
            Altitude::Airborne(alt) => write!( f, "{:.0}", alt.get::<foot>())
        }
    }
}

/// the normalized data model for an aircraft within a snapshot. Fields the feed did not provide
/// (or provided in a form we could not use) are None - display defaults are only applied by the report
#[derive(Debug,Clone)]
pub struct FlightRecord {
    pub id: String, // the hex id
    pub callsign: Option<String>,
    pub altitude: Option<Altitude>,
    pub mach: Option<f64>,
    pub squawk: Option<String>,
    pub heading: Option<f64>, // track over ground in degrees
    pub position: Option<Position>,
    pub link: String,

    // derived
    pub speed: Option<Velocity>,
    pub distance: Option<Length>,
}

impl FlightRecord {
    pub fn new (id: impl ToString, link_base: &str)->Self {
        let id = id.to_string();
        let link = flight_link( link_base, &id);

        FlightRecord {
            id,
            callsign: None,
            altitude: None,
            mach: None,
            squawk: None,
            heading: None,
            position: None,
            link,
            speed: None,
            distance: None
        }
    }

    /// map a raw feed entry into a record. This only fails if the entry has no id - malformed
    /// fields are logged and treated as not available
    pub fn from_raw (entry: &RawAircraftEntry, link_base: &str)->Result<Self> {
        let id = entry.hex().ok_or_else( || malformed!("entry without hex id"))?;
        let mut rec = FlightRecord::new( id, link_base);

        rec.callsign = recover( id, entry.callsign())
            .map( |cs| cs.trim())
            .filter( |cs| !cs.is_empty())
            .map( |cs| cs.to_string());
        rec.squawk = recover( id, entry.squawk())
            .map( |s| s.trim())
            .filter( |s| !s.is_empty())
            .map( |s| s.to_string());
        rec.altitude = recover( id, entry.altitude());
        rec.mach = recover( id, entry.mach());
        rec.heading = recover( id, entry.track());
        rec.position = recover( id, entry.position()).map( |p| p.rounded());

        Ok(rec)
    }

    pub fn compute_derived (&mut self, observer: &ObserverLocation) {
        self.distance = derived::opt_distance_from( observer, &self.position);
        self.speed = derived::opt_speed_from_mach( self.mach);
    }

    pub fn has_position (&self)->bool { self.position.is_some() }

    pub fn has_callsign (&self)->bool { self.callsign.is_some() }

    /// unknown distance ranks as 0.0
    pub fn distance_km (&self)->f64 {
        self.distance.map( |d| d.get::<kilometer>()).unwrap_or(0.0)
    }

    pub fn speed_kmh (&self)->f64 {
        self.speed.map( |v| v.get::<kilometer_per_hour>()).unwrap_or(0.0)
    }

    /// unknown altitude counts as 0, aircraft on the ground have no altitude value
    pub fn altitude_ft (&self)->Option<f64> {
        match self.altitude {
            Some(alt) => alt.feet(),
            None => Some(0.0)
        }
    }
}

impl fmt::Display for FlightRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "FlightRecord( id: {}", self.id)?;
        if let Some(cs) = &self.callsign { write!( f, ", cs: \"{cs}\"")?; }
        if let Some(alt) = &self.altitude { write!( f, ", alt: {alt}")?; }
        if let Some(spd) = self.speed { write!( f, ", spd: {:.2}", spd.get::<kilometer_per_hour>())?; }
        if let Some(sq) = &self.squawk { write!( f, ", squawk: {sq}")?; }
        if let Some(hdg) = self.heading { write!( f, ", hdg: {hdg:.1}")?; }
        if let Some(p) = &self.position { write!( f, ", pos: [{:.4},{:.4}]", p.latitude, p.longitude)?; }
        if let Some(d) = self.distance { write!( f, ", dist: {:.2}", d.get::<kilometer>())?; }
        write!( f, ")")
    }
}

/// the report link for a flight is a plain concatenation - the URL is not validated
pub fn flight_link (base: &str, id: &str)->String {
    format!("{}{}", base, id)
}

fn recover<T> (id: &str, res: Result<Option<T>>)->Option<T> {
    match res {
        Ok(v) => v,
        Err(e) => {
            warn!("{}: {}", id, e);
            None
        }
    }
}
