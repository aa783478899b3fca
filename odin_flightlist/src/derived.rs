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

///! derived flight quantities: geodesic distance from the observer and speed from Mach number

use geo::{Distance, Geodesic, Point};
use uom::si::{f64::{Length,Velocity}, length::kilometer, velocity::kilometer_per_hour};

use crate::{Position, config::ObserverLocation};

/// speed of sound at Mach 1 we use as reference (km/h)
pub const MACH_1_KMH: f64 = 1235.0;

/// we report distances and speeds with 2 decimals and compare them with that resolution
pub fn round2 (v: f64)->f64 {
    (v * 100.0).round() / 100.0
}

/// geodesic (WGS84 ellipsoid) distance between observer and aircraft position, rounded to 10m
pub fn distance_from (observer: &ObserverLocation, pos: &Position)->Length {
    let p = Point::new( pos.longitude, pos.latitude);
    let d_m = Geodesic.distance( observer.point(), p);
    Length::new::<kilometer>( round2( d_m / 1000.0))
}

pub fn opt_distance_from (observer: &ObserverLocation, pos: &Option<Position>)->Option<Length> {
    pos.as_ref().map( |p| distance_from( observer, p))
}

pub fn speed_from_mach (mach: f64)->Velocity {
    Velocity::new::<kilometer_per_hour>( round2( mach * MACH_1_KMH))
}

pub fn opt_speed_from_mach (mach: Option<f64>)->Option<Velocity> {
    mach.map( speed_from_mach)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed () {
        let v = speed_from_mach( 0.85);
        let kmh = v.get::<kilometer_per_hour>();
        assert!( (kmh - 1049.75).abs() < 1e-9);
        assert_eq!( format!("{:.2}", kmh), "1049.75");

        assert!( opt_speed_from_mach( None).is_none());
    }

    #[test]
    fn test_distance () {
        let observer = ObserverLocation::new( 51.5, -0.12);

        let d = distance_from( &observer, &Position{ latitude: 51.5, longitude: -0.12 });
        assert_eq!( d.get::<kilometer>(), 0.0);

        // one degree of latitude around 51.5N is ~111.25km on the WGS84 ellipsoid
        let d = distance_from( &observer, &Position{ latitude: 52.5, longitude: -0.12 });
        let km = d.get::<kilometer>();
        assert!( km > 111.0 && km < 111.5, "unexpected distance {km}");

        assert!( opt_distance_from( &observer, &None).is_none());
    }
}
