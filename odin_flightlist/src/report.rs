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

///! text rendering of a processed snapshot. This is where unknown values turn into display markers

use std::io::{self,Write};

use crate::{FlightRecord, flight_link, config::FlightListConfig, pipeline::{FlightReport,FlightStats,Superlative}};

/// display marker for unknown call signs, squawks and positions
pub const UNKNOWN: &'static str = "XX";

/// display marker for unknown headings and missing superlatives
pub const DEFAULT: &'static str = "XXXX";

/// what we print if we could not get a snapshot
pub const FETCH_APOLOGY: &'static str = "I'm sorry but I've been unable to retrieve Flight details right now.\n Please try again later.";

pub const STATS_TITLE: &'static str = "Real Time Flight information:";

pub fn write_report<W: Write> (w: &mut W, report: &FlightReport, config: &FlightListConfig)->io::Result<()> {
    writeln!( w, "{}\n", config.header)?;

    if config.include_stats {
        writeln!( w, "{}\n", STATS_TITLE)?;
        for line in stats_lines( &report.stats, config) {
            writeln!( w, "{}", line)?;
        }
        writeln!( w, "\n")?;
    }

    for rec in report.flights.iter().take( config.max_display) {
        writeln!( w, "{}", flight_line( rec, config))?;
    }

    for line in &config.footer {
        write!( w, "\n\n{}", line)?;
    }
    if !config.footer.is_empty() {
        writeln!( w)?;
    }

    Ok(())
}

pub fn report_to_string (report: &FlightReport, config: &FlightListConfig)->String {
    let mut buf: Vec<u8> = Vec::with_capacity(4096);
    write_report( &mut buf, report, config).ok(); // writing to a Vec does not fail
    String::from_utf8_lossy( &buf).into_owned()
}

/// the 3 statistics lines: total/highest, no-position/fastest, excluded/furthest
pub fn stats_lines (stats: &FlightStats, config: &FlightListConfig)->[String;3] {
    let n_excluded = stats.n_excluded + stats.n_filtered;

    let mut l1 = format!("\tTotal Aircraft: {}\t\tHighest:  {}\tAltitude: {}ft",
                         stats.n_included, holder( &stats.highest), value( &stats.highest, 0));
    let mut l2 = format!("\tNo Position: {}\t\tFastest:  {}\tSpeed:    {}km/h",
                         stats.n_no_position, holder( &stats.fastest), value( &stats.fastest, 2));
    let mut l3 = format!("\tTotal Excluded: {}\t\tFurthest: {}\tDistance: {}km",
                         n_excluded, holder( &stats.furthest), value( &stats.furthest, 2));

    if config.stats_links {
        append_link( &mut l1, &stats.highest, config);
        append_link( &mut l2, &stats.fastest, config);
        append_link( &mut l3, &stats.furthest, config);
    }

    [l1, l2, l3]
}

fn holder (s: &Option<Superlative>)->String {
    match s {
        Some(s) => format!("Id: {}\tCall:  {}", s.id, s.callsign.as_deref().unwrap_or(UNKNOWN)),
        None => format!("Id: {}\tCall:  {}", DEFAULT, DEFAULT)
    }
}

fn value (s: &Option<Superlative>, precision: usize)->String {
    match s {
        Some(s) => format!("{:.*}", precision, s.value),
        None => DEFAULT.to_string()
    }
}

fn append_link (line: &mut String, s: &Option<Superlative>, config: &FlightListConfig) {
    if let Some(s) = s {
        line.push('\t');
        line.push_str( &flight_link( &config.flight_link, &s.id));
    }
}

/// one tab separated line per flight
pub fn flight_line (rec: &FlightRecord, config: &FlightListConfig)->String {
    let mut line = format!("Id: {}\tCall: {}\tAlt: {}\tSquawk: {}",
        rec.id,
        rec.callsign.as_deref().unwrap_or(UNKNOWN),
        rec.altitude.map( |alt| alt.to_string()).unwrap_or_else( || "0".to_string()),
        rec.squawk.as_deref().unwrap_or(UNKNOWN)
    );

    if config.show_speed {
        line.push_str( &format!("\tSpeed: {:.2}", rec.speed_kmh()));
    }

    let heading = rec.heading.map( |hdg| hdg.to_string()).unwrap_or_else( || DEFAULT.to_string());
    let (lat,lon) = match &rec.position {
        Some(p) => (format!("{:5.2}", p.latitude), format!("{:5.2}", p.longitude)),
        None => (UNKNOWN.to_string(), UNKNOWN.to_string())
    };
    line.push_str( &format!("\tHeading: {}\tLat: {}\tLon: {}\tDistance: {:7.2}km", heading, lat, lon, rec.distance_km()));

    if config.flight_links {
        line.push('\t');
        line.push_str( &rec.link);
    }

    line
}
