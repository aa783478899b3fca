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

use std::time::Duration;
use serde_json::json;
use tokio::{io::{AsyncReadExt, AsyncWriteExt}, net::TcpListener};
use reqwest::Client;
use odin_flightlist::{
    Altitude,
    config::{load_config_from, parse_config},
    feed::{parse_snapshot, AircraftSource, FileAircraftSource, HttpAircraftSource, RawAircraftEntry},
    errors::OdinFlightListError
};

// run with "cargo test -p odin_flightlist --test test_feed -- --nocapture"

const SNAPSHOT: &'static str = concat!( env!("CARGO_MANIFEST_DIR"), "/resources/aircraft.json");

#[tokio::test]
async fn test_file_source () {
    let source = FileAircraftSource::new( SNAPSHOT);
    let snapshot = source.fetch_snapshot().await.unwrap();
    println!("{} aircraft at {:?}", snapshot.len(), snapshot.timestamp());

    assert_eq!( snapshot.len(), 8);
    assert_eq!( snapshot.messages, Some(104512736));
    assert_eq!( snapshot.aircraft[0].hex(), Some("4ca7b5"));
}

#[tokio::test]
async fn test_missing_file () {
    let source = FileAircraftSource::new( "no/such/aircraft.json");
    match source.fetch_snapshot().await {
        Err(e) => assert!( e.is_fetch_error()),
        Ok(_) => panic!("should not have a snapshot")
    }
}

#[tokio::test]
async fn test_unreachable_server () {
    // nothing should listen on the discard port
    let source = HttpAircraftSource::new( "http://127.0.0.1:9/tar1090/data/aircraft.json", Duration::from_secs(2)).unwrap();
    match source.fetch_snapshot().await {
        Err(e) => assert!( e.is_fetch_error()),
        Ok(_) => panic!("should not have a snapshot")
    }
}

/// serve a single canned HTTP response on a local port and return the feed URL
async fn serve_once (status: &str, content_type: &str, body: &str)->String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/tar1090/data/aircraft.json", listener.local_addr().unwrap());
    let response = format!("HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                           status, content_type, body.len(), body);

    tokio::spawn( async move {
        if let Ok((mut socket,_)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = socket.read( &mut buf).await;
            let _ = socket.write_all( response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    url
}

#[tokio::test]
async fn test_http_source () {
    let url = serve_once( "200 OK", "application/json", r#"{ "now": 1760540400.1, "aircraft": [ { "hex": "4ca7b5", "flight": "RYR8TK  " } ] }"#).await;
    let source = HttpAircraftSource::with_client( Client::new(), &url);
    let snapshot = source.fetch_snapshot().await.unwrap();
    assert_eq!( snapshot.len(), 1);
    assert_eq!( snapshot.aircraft[0].hex(), Some("4ca7b5"));
    assert_eq!( source.description(), url);
}

#[tokio::test]
async fn test_http_error_status () {
    let url = serve_once( "404 Not Found", "text/plain", "").await;
    let source = HttpAircraftSource::new( &url, Duration::from_secs(2)).unwrap();
    match source.fetch_snapshot().await {
        Err(e) => { println!("{e}"); assert!( e.is_fetch_error()) }
        Ok(_) => panic!("should not have a snapshot")
    }
}

#[tokio::test]
async fn test_http_invalid_body () {
    let url = serve_once( "200 OK", "text/html", "<html>").await;
    let source = HttpAircraftSource::new( &url, Duration::from_secs(2)).unwrap();
    match source.fetch_snapshot().await {
        Err(e) => { println!("{e}"); assert!( e.is_fetch_error()) }
        Ok(_) => panic!("should not have a snapshot")
    }
}

#[test]
fn test_entry_fields () {
    let e = RawAircraftEntry::from_value( json!({
        "hex": " 4ca7b5 ", "flight": "RYR8TK  ", "alt_baro": "ground", "squawk": null, "lat": 51.9, "lon": "x"
    })).unwrap();

    assert_eq!( e.hex(), Some("4ca7b5"));
    assert_eq!( e.callsign().unwrap(), Some("RYR8TK  ")); // trimming is done by the normalizer
    assert_eq!( e.squawk().unwrap(), None);
    assert_eq!( e.altitude().unwrap(), Some(Altitude::Ground));
    assert!( matches!( e.position(), Err(OdinFlightListError::MalformedRecord(_))));

    let e = RawAircraftEntry::from_value( json!({ "hex": "4ca7b5", "lat": 51.9 })).unwrap();
    assert_eq!( e.position().unwrap(), None); // needs both lat and lon

    let e = RawAircraftEntry::from_value( json!({ "hex": "4ca7b5", "alt_baro": "unknown" })).unwrap();
    assert!( e.altitude().is_err());

    assert!( RawAircraftEntry::from_value( json!([1,2,3])).is_none());
}

#[test]
fn test_parse_snapshot () {
    assert!( parse_snapshot( br#"{ "now": 1.0, "aircraft": [] }"#).unwrap().is_empty());
    assert!( parse_snapshot( br#"{ "now": 1.0 }"#).is_err());
    assert!( parse_snapshot( b"<html>").is_err());
}

#[test]
fn test_crate_config () {
    let path = concat!( env!("CARGO_MANIFEST_DIR"), "/configs/flightlist.ron");
    let config = load_config_from( path).unwrap();

    assert_eq!( config.max_display, 15);
    assert_eq!( config.timeout, Duration::from_secs(10));
    assert!( config.is_excluded("43bf96"));
    assert_eq!( config.footer.len(), 2);

    // the shipped config has no observer location, which has to be set before running
    assert!( config.validate().is_err());

    let config = parse_config( r#"( observer: Some(( lat: 51.48, lon: -0.61 )) )"#).unwrap();
    assert!( config.validate().is_ok());
}
