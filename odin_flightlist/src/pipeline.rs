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

///! the single pass over a snapshot: inclusion policy, running superlatives/counters and ranking

use std::fmt;
use tracing::{debug,warn};

use crate::{FlightRecord, config::FlightListConfig, feed::RawSnapshot, errors::Result};

/// the flight currently holding the max value of a tracked metric
#[derive(Debug,Clone,PartialEq)]
pub struct Superlative {
    pub id: String,
    pub callsign: Option<String>,
    pub value: f64,
}

/// replace the holder only for strictly greater values, i.e. ties keep the earlier flight.
/// Note the implicit initial threshold of 0 - no holder for non-positive values
fn update_max (slot: &mut Option<Superlative>, rec: &FlightRecord, value: f64) {
    let current = slot.as_ref().map( |s| s.value).unwrap_or(0.0);
    if value > current {
        *slot = Some( Superlative { id: rec.id.clone(), callsign: rec.callsign.clone(), value });
    }
}

/// the accumulator for the pass
#[derive(Debug,Clone,Default)]
pub struct FlightStats {
    pub highest: Option<Superlative>,  // ft
    pub fastest: Option<Superlative>,  // km/h
    pub furthest: Option<Superlative>, // km

    pub n_included: usize,
    pub n_no_position: usize,
    pub n_excluded: usize, // hex id in exclusion set
    pub n_filtered: usize, // no call sign or no distance (if required)
    pub n_skipped: usize,  // entries without id
}

impl FlightStats {
    pub fn update_superlatives (&mut self, rec: &FlightRecord) {
        if let Some(alt) = rec.altitude_ft() { // skips aircraft on the ground
            update_max( &mut self.highest, rec, alt);
        }
        update_max( &mut self.fastest, rec, rec.speed_kmh());
        update_max( &mut self.furthest, rec, rec.distance_km());
    }

    pub fn n_total (&self)->usize {
        self.n_included + self.n_excluded + self.n_filtered
    }
}

impl fmt::Display for FlightStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "FlightStats( included: {}, no_position: {}, excluded: {}, filtered: {}, skipped: {}",
                self.n_included, self.n_no_position, self.n_excluded, self.n_filtered, self.n_skipped)?;
        if let Some(s) = &self.highest { write!( f, ", highest: {}={:.0}", s.id, s.value)?; }
        if let Some(s) = &self.fastest { write!( f, ", fastest: {}={:.2}", s.id, s.value)?; }
        if let Some(s) = &self.furthest { write!( f, ", furthest: {}={:.2}", s.id, s.value)?; }
        write!( f, ")")
    }
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum Inclusion {
    Included,
    Excluded,
    Filtered
}

/// the exclusion set takes precedence over everything else
pub fn inclusion (rec: &FlightRecord, config: &FlightListConfig)->Inclusion {
    if config.is_excluded( &rec.id) {
        Inclusion::Excluded
    } else if config.require_callsign_and_position && !(rec.has_callsign() && rec.distance_km() > 0.0) {
        Inclusion::Filtered
    } else {
        Inclusion::Included
    }
}

/// stable sort by distance (unknown distance ranks as 0.0) and truncate to `max_display`.
/// There is no secondary key - equal distances keep their feed order
pub fn rank (flights: &mut Vec<FlightRecord>, max_display: usize) {
    flights.sort_by( |a,b| a.distance_km().total_cmp( &b.distance_km()));
    flights.truncate( max_display);
}

/// the result of processing one snapshot
#[derive(Debug)]
pub struct FlightReport {
    pub flights: Vec<FlightRecord>, // ranked and capped
    pub stats: FlightStats,
}

/// the single forward pass over the (normalized) records of a snapshot in feed order
pub struct FlightPass<'a> {
    config: &'a FlightListConfig,
    stats: FlightStats,
    flights: Vec<FlightRecord>,
}

impl<'a> FlightPass<'a> {
    pub fn new (config: &'a FlightListConfig)->Self {
        FlightPass { config, stats: FlightStats::default(), flights: Vec::new() }
    }

    pub fn add (&mut self, rec: FlightRecord) {
        if !rec.has_position() {
            self.stats.n_no_position += 1;
        }

        let inc = inclusion( &rec, self.config);
        if inc == Inclusion::Included || self.config.stats_include_excluded {
            self.stats.update_superlatives( &rec);
        }

        match inc {
            Inclusion::Included => {
                self.stats.n_included += 1;
                self.flights.push( rec);
            }
            Inclusion::Excluded => {
                debug!("excluded {}", rec.id);
                self.stats.n_excluded += 1;
            }
            Inclusion::Filtered => {
                debug!("filtered {}", rec);
                self.stats.n_filtered += 1;
            }
        }
    }

    pub fn skip (&mut self) {
        self.stats.n_skipped += 1;
    }

    pub fn finish (mut self)->FlightReport {
        rank( &mut self.flights, self.config.max_display);
        FlightReport { flights: self.flights, stats: self.stats }
    }
}

/// run records that are already normalized and enriched through filter, tracker and ranker
pub fn process_records (records: impl IntoIterator<Item=FlightRecord>, config: &FlightListConfig)->FlightReport {
    let mut pass = FlightPass::new( config);
    for rec in records {
        pass.add( rec);
    }
    pass.finish()
}

/// the whole core pipeline for one snapshot. This only fails if there is no observer location
pub fn process_snapshot (snapshot: &RawSnapshot, config: &FlightListConfig)->Result<FlightReport> {
    let observer = config.observer()?;
    let mut pass = FlightPass::new( config);

    for entry in &snapshot.aircraft {
        match FlightRecord::from_raw( entry, &config.flight_link) {
            Ok(mut rec) => {
                rec.compute_derived( &observer);
                pass.add( rec);
            }
            Err(e) => {
                warn!("skipping aircraft entry: {}", e);
                pass.skip();
            }
        }
    }

    Ok( pass.finish() )
}
