use crate::core::Geo;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle surface distance between two positions, in meters.
pub fn haversine_distance(from: Geo, to: Geo) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let delta_phi = (to.lat - from.lat).to_radians();
    let delta_lambda = (to.lng - from.lng).to_radians();

    // rounding can push `a` just past 1.0 for near-antipodal points
    let a = ((delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}
