//! Route enrichment.
//!
//! The first `cap` candidates by straight-line order each get one routing
//! call, issued concurrently as a fixed-size fan-out/fan-in batch. Route
//! distance correlates with straight-line distance, so capping here bounds
//! the expensive calls while keeping the true-closest facilities likely to
//! be enriched. Each call independently succeeds or degrades its own
//! estimate; candidates beyond the cap pass through unchanged.

use carefind_core::model::ProximityEstimate;
use carefind_geo::Coordinate;
use carefind_providers::{RoutingError, RoutingProvider};
use futures::future::join_all;
use tracing::{debug, warn};

/// Maximum number of routing calls per cycle.
pub const ENRICHMENT_CAP: usize = 10;

/// Enriches the head of the candidate list with routed distance and time.
///
/// Fails only when the routing provider was unreachable for every call in a
/// non-empty batch; any other mix of per-call outcomes degrades the affected
/// estimates to straight-line-only and succeeds.
pub async fn enrich<R: RoutingProvider>(
    candidates: Vec<ProximityEstimate>,
    origin: Coordinate,
    cap: usize,
    routing: &R,
) -> Result<Vec<ProximityEstimate>, RoutingError> {
    let split = cap.min(candidates.len());
    let mut candidates = candidates;
    let tail = candidates.split_off(split);
    let head = candidates;

    if head.is_empty() {
        return Ok(tail);
    }

    let batch = join_all(head.into_iter().map(|estimate| {
        enrich_one(estimate, origin, routing)
    }))
    .await;

    let dispatched = batch.len();
    let unreachable = batch
        .iter()
        .filter(|(_, error)| matches!(error, Some(e) if e.is_unavailable()))
        .count();

    if unreachable == dispatched {
        let first_error = batch
            .into_iter()
            .find_map(|(_, error)| error)
            .unwrap_or_else(|| {
                RoutingError::Unavailable("no routing call completed".to_string())
            });
        return Err(first_error);
    }

    debug!(
        dispatched,
        degraded = batch.iter().filter(|(_, e)| e.is_some()).count(),
        passed_through = tail.len(),
        "Enrichment batch settled"
    );

    let mut enriched: Vec<ProximityEstimate> =
        batch.into_iter().map(|(estimate, _)| estimate).collect();
    enriched.extend(tail);
    Ok(enriched)
}

/// Issues one routing call, converting failure into an unenriched estimate.
async fn enrich_one<R: RoutingProvider>(
    mut estimate: ProximityEstimate,
    origin: Coordinate,
    routing: &R,
) -> (ProximityEstimate, Option<RoutingError>) {
    match routing.route(origin, estimate.facility.coordinate).await {
        Ok(leg) => {
            estimate.route_km = Some(leg.kilometers());
            estimate.route_minutes = Some(leg.minutes());
            (estimate, None)
        }
        Err(error) => {
            warn!(
                facility = %estimate.facility.name,
                %error,
                "Routing failed, keeping straight-line estimate"
            );
            (estimate, Some(error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carefind_core::model::Facility;
    use carefind_providers::RouteLeg;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ORIGIN: Coordinate = Coordinate {
        latitude: 0.0,
        longitude: 0.0,
    };

    fn estimate(id: i64, straight_line_km: f64) -> ProximityEstimate {
        ProximityEstimate::straight_line(
            Facility {
                id,
                name: format!("Facility {id}"),
                coordinate: Coordinate::new(0.0, 0.01 * id as f64),
                wait_time_minutes: 0,
                street: String::new(),
                district: String::new(),
                city: String::new(),
                region: String::new(),
                photo: None,
            },
            straight_line_km,
        )
    }

    /// Routing fake with a call counter and a scriptable outcome.
    struct FakeRouting {
        calls: AtomicUsize,
        outcome: Outcome,
    }

    enum Outcome {
        Route { meters: f64, seconds: f64 },
        Status,
        Unavailable,
    }

    impl FakeRouting {
        fn new(outcome: Outcome) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                outcome,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RoutingProvider for FakeRouting {
        async fn route(
            &self,
            _origin: Coordinate,
            _destination: Coordinate,
        ) -> Result<RouteLeg, RoutingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.outcome {
                Outcome::Route { meters, seconds } => Ok(RouteLeg {
                    distance_meters: meters,
                    duration_seconds: seconds,
                }),
                Outcome::Status => Err(RoutingError::Status("NOT_FOUND".to_string())),
                Outcome::Unavailable => {
                    Err(RoutingError::Unavailable("connection refused".to_string()))
                }
            }
        }
    }

    #[tokio::test]
    async fn test_enriches_head_with_route_fields() {
        let routing = FakeRouting::new(Outcome::Route {
            meters: 8200.0,
            seconds: 930.0,
        });
        let candidates = vec![estimate(1, 5.0), estimate(2, 6.0)];

        let enriched = enrich(candidates, ORIGIN, 10, &routing).await.unwrap();
        assert_eq!(enriched.len(), 2);
        assert_eq!(enriched[0].route_km, Some(8.2));
        assert_eq!(enriched[0].route_minutes, Some(16));
    }

    #[tokio::test]
    async fn test_cap_bounds_routing_calls() {
        let routing = FakeRouting::new(Outcome::Route {
            meters: 1000.0,
            seconds: 60.0,
        });
        let candidates: Vec<_> = (1..=25).map(|id| estimate(id, id as f64)).collect();

        let enriched = enrich(candidates, ORIGIN, ENRICHMENT_CAP, &routing)
            .await
            .unwrap();

        assert_eq!(routing.call_count(), ENRICHMENT_CAP);
        assert_eq!(enriched.len(), 25);
        // Beyond the cap, estimates pass through unchanged
        assert!(enriched[ENRICHMENT_CAP..]
            .iter()
            .all(|e| e.route_km.is_none()));
    }

    #[tokio::test]
    async fn test_status_failures_degrade_per_facility() {
        let routing = FakeRouting::new(Outcome::Status);
        let candidates = vec![estimate(1, 5.0), estimate(2, 6.0)];

        let enriched = enrich(candidates, ORIGIN, 10, &routing).await.unwrap();
        assert_eq!(enriched.len(), 2);
        assert!(enriched.iter().all(|e| e.route_km.is_none()));
        assert_eq!(enriched[0].straight_line_km, 5.0);
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_a_hard_failure() {
        let routing = FakeRouting::new(Outcome::Unavailable);
        let candidates = vec![estimate(1, 5.0), estimate(2, 6.0)];

        let result = enrich(candidates, ORIGIN, 10, &routing).await;
        assert!(matches!(result, Err(RoutingError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_empty_batch_passes_tail_through() {
        let routing = FakeRouting::new(Outcome::Unavailable);
        let enriched = enrich(vec![], ORIGIN, 10, &routing).await.unwrap();
        assert!(enriched.is_empty());
        assert_eq!(routing.call_count(), 0);
    }

    #[tokio::test]
    async fn test_zero_cap_skips_routing_entirely() {
        let routing = FakeRouting::new(Outcome::Unavailable);
        let candidates = vec![estimate(1, 5.0)];
        let enriched = enrich(candidates, ORIGIN, 0, &routing).await.unwrap();
        assert_eq!(enriched.len(), 1);
        assert_eq!(routing.call_count(), 0);
    }
}
