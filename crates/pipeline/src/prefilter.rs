//! Straight-line pre-filter.
//!
//! Road distance is always at least the great-circle distance, so anything
//! beyond `radius * margin` in a straight line cannot possibly be within the
//! radius by road and is safe to drop. The converse does not hold: a
//! facility whose road/straight-line ratio exceeds the margin can still be
//! missed. The 1.2 margin is an accepted approximation, not a completeness
//! guarantee.

use carefind_core::model::{Facility, ProximityEstimate};
use carefind_geo::{haversine_distance, Coordinate};

/// Multiplicative slack applied to the radius before enrichment.
pub const PREFILTER_MARGIN: f64 = 1.2;

/// Computes straight-line distances, drops facilities beyond the margin,
/// and sorts the survivors by ascending straight-line distance.
///
/// Returns the full retained set; capping the enrichment batch is the
/// caller's job. Ties are broken arbitrarily at this stage, the final
/// ranking breaks them by wait time.
pub fn prefilter(
    facilities: &[Facility],
    origin: Coordinate,
    radius_km: f64,
) -> Vec<ProximityEstimate> {
    let cutoff = radius_km * PREFILTER_MARGIN;

    let mut estimates: Vec<ProximityEstimate> = facilities
        .iter()
        .map(|facility| {
            let distance = haversine_distance(&origin, &facility.coordinate);
            ProximityEstimate::straight_line(facility.clone(), distance)
        })
        .filter(|estimate| estimate.straight_line_km <= cutoff)
        .collect();

    estimates.sort_by(|a, b| {
        a.straight_line_km
            .partial_cmp(&b.straight_line_km)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    estimates
}
