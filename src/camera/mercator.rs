//! Web Mercator projection into a 512-unit world square.
//!
//! Longitude -180..180 maps to x 0..512 and latitude maps to y 0..512 with
//! north up, so a [`Viewport`](super::viewport::Viewport) at zoom `z`
//! matches web map tile zoom `z`.

use std::f64::consts::PI;

/// World units spanned by the whole map.
pub const WORLD_SIZE: f64 = 512.0;

/// Latitude limit where the projection reaches the square's edge.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// `[longitude, latitude]` in degrees to world coordinates.
///
/// Latitude is clamped to ±[`MAX_LATITUDE`].
pub fn lng_lat_to_world(lng_lat: [f64; 2]) -> [f64; 2] {
    let lambda = lng_lat[0].to_radians();
    let phi = lng_lat[1].clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = WORLD_SIZE * (lambda + PI) / (2.0 * PI);
    let y = WORLD_SIZE * (PI + (PI / 4.0 + phi / 2.0).tan().ln()) / (2.0 * PI);
    [x, y]
}

/// World coordinates back to `[longitude, latitude]` in degrees.
pub fn world_to_lng_lat(world: [f64; 2]) -> [f64; 2] {
    let lambda = world[0] / WORLD_SIZE * 2.0 * PI - PI;
    let phi = 2.0 * ((world[1] / WORLD_SIZE * 2.0 * PI - PI).exp().atan() - PI / 4.0);
    [lambda.to_degrees(), phi.to_degrees()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f64; 2], b: [f64; 2], eps: f64) -> bool {
        (a[0] - b[0]).abs() < eps && (a[1] - b[1]).abs() < eps
    }

    #[test]
    fn null_island_is_world_center() {
        assert!(close(lng_lat_to_world([0.0, 0.0]), [256.0, 256.0], 1e-9));
    }

    #[test]
    fn antimeridian_and_poles_hit_edges() {
        assert!(close(lng_lat_to_world([180.0, MAX_LATITUDE]), [512.0, 512.0], 1e-6));
        assert!(close(lng_lat_to_world([-180.0, -MAX_LATITUDE]), [0.0, 0.0], 1e-6));
    }

    #[test]
    fn latitude_clamps_past_limit() {
        assert_eq!(lng_lat_to_world([0.0, 89.9]), lng_lat_to_world([0.0, MAX_LATITUDE]));
    }

    #[test]
    fn north_is_up() {
        assert!(lng_lat_to_world([0.0, 10.0])[1] > lng_lat_to_world([0.0, -10.0])[1]);
    }

    #[test]
    fn inverse_round_trips() {
        for lng_lat in [[-122.4194, 37.7749], [139.6917, 35.6895], [0.0, -60.0]] {
            let back = world_to_lng_lat(lng_lat_to_world(lng_lat));
            assert!(close(back, lng_lat, 1e-9), "{lng_lat:?} -> {back:?}");
        }
    }
}
