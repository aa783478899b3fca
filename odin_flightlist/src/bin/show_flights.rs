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

use std::io::{self,Write};
use tokio;
use anyhow::Result;
use clap::Parser;
use tracing::{info,error};
use tracing_subscriber::EnvFilter;
use odin_flightlist::{
    config::{load_config, load_config_from, FlightListConfig, DEFAULT_CONFIG},
    feed::{AircraftSource, FileAircraftSource, HttpAircraftSource},
    pipeline::process_snapshot,
    report::{write_report, FETCH_APOLOGY}
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "print the list of aircraft currently tracked by a tar1090/readsb ADS-B receiver")]
pub struct Args {
    /// pathname of config file (default is a lookup of flightlist.ron)
    #[arg(short,long)]
    pub config: Option<String>,

    /// read the aircraft.json snapshot from a file instead of the configured URL
    #[arg(short,long)]
    pub file: Option<String>,

    /// override the configured feed URL
    #[arg(short,long)]
    pub url: Option<String>,

    /// override the max number of reported flights
    #[arg(short,long)]
    pub max_display: Option<usize>,

    /// do not print statistics
    #[arg(long)]
    pub no_stats: bool,

    /// do not append flight links
    #[arg(long)]
    pub no_links: bool,
}

#[tokio::main]
async fn main()->Result<()> {
    // logs go to stderr so that they don't get mixed into the report
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::from_default_env()) // use RUST_LOG to set max level
        .with_writer( io::stderr)
        .init();

    let args = Args::parse();

    let mut config: FlightListConfig = match &args.config {
        Some(path) => load_config_from( path)?,
        None => load_config( DEFAULT_CONFIG)?
    };
    apply_args( &mut config, &args);
    config.validate()?; // before we fetch anything

    let source: Box<dyn AircraftSource> = match &args.file {
        Some(path) => Box::new( FileAircraftSource::new( path)),
        None => Box::new( HttpAircraftSource::new( &config.url, config.timeout)?)
    };

    let snapshot = match source.fetch_snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("{}", e);
            println!("{}", FETCH_APOLOGY);
            std::process::exit(1);
        }
    };
    info!("got {} aircraft from {} (snapshot time: {:?})", snapshot.len(), source.description(), snapshot.timestamp());

    let report = process_snapshot( &snapshot, &config)?;
    info!("{}", report.stats);

    let mut out = io::stdout().lock();
    write_report( &mut out, &report, &config)?;
    out.flush()?;

    Ok(())
}

fn apply_args (config: &mut FlightListConfig, args: &Args) {
    if let Some(url) = &args.url { config.url = url.clone(); }
    if let Some(max_display) = args.max_display { config.max_display = max_display; }
    if args.no_stats { config.include_stats = false; }
    if args.no_links {
        config.stats_links = false;
        config.flight_links = false;
    }
}
