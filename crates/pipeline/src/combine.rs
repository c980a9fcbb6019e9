//! Authoritative radius filter and final ranking.

use carefind_core::model::{ProximityEstimate, RankedResult};

/// Filters estimates to the exact radius and ranks the survivors.
///
/// Each estimate is judged by its best available distance: the routed
/// distance when enrichment produced one, the straight-line distance
/// otherwise. Survivors are ordered by that same distance, with shorter
/// wait time breaking ties. The sort is stable, so facilities tied on both
/// keys keep their incoming (straight-line) order.
pub fn combine(estimates: Vec<ProximityEstimate>, radius_km: f64) -> RankedResult {
    let mut ranked: Vec<ProximityEstimate> = estimates
        .into_iter()
        .filter(|estimate| estimate.effective_km() <= radius_km)
        .collect();

    ranked.sort_by(|a, b| {
        a.effective_km()
            .partial_cmp(&b.effective_km())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.facility.wait_time_minutes.cmp(&b.facility.wait_time_minutes))
    });

    ranked
}
