//! Session orchestration.
//!
//! [`RadiusPipeline`] owns the session state (resolved location, active
//! radius, last published ranking) and strings the stages together:
//! directory fetch, straight-line pre-filter, capped route enrichment, and
//! the final radius filter and ranking. Radius and ranking changes are
//! published through `watch` channels so subscribers always see the latest
//! value without queueing intermediates.
//!
//! Cycles are numbered. A cycle that finishes after a newer one has started
//! discards its output instead of publishing, so a rapid radius change can
//! never be overwritten by a slower, earlier computation. A cycle that fails
//! publishes nothing; the previous ranking stays in place.

use crate::combine::combine;
use crate::enrich::{enrich, ENRICHMENT_CAP};
use crate::error::PipelineError;
use crate::prefilter::prefilter;
use crate::resolver::LocationResolver;
use carefind_core::config::{SavedSettings, SettingsStore, DEFAULT_RADIUS_KM};
use carefind_core::error::ConfigError;
use carefind_core::model::{LocationSource, RadiusConfig, RankedResult, UserLocation};
use carefind_providers::{DirectoryProvider, GeocodingProvider, PositionProvider, RoutingProvider};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, warn};

/// Mutable session state, replaced wholesale on every change.
#[derive(Debug, Clone)]
struct SessionState {
    location: UserLocation,
    config: RadiusConfig,
}

/// Reactive proximity-ranking session.
pub struct RadiusPipeline<D, R, G, P> {
    directory: D,
    routing: R,
    resolver: LocationResolver<G, P>,
    store: SettingsStore,
    state: RwLock<Option<SessionState>>,
    /// Monotonic cycle counter; a finished cycle publishes only while it is
    /// still the newest
    generation: AtomicU64,
    radius_tx: watch::Sender<u32>,
    results_tx: watch::Sender<RankedResult>,
}

impl<D, R, G, P> RadiusPipeline<D, R, G, P>
where
    D: DirectoryProvider,
    R: RoutingProvider,
    G: GeocodingProvider,
    P: PositionProvider,
{
    pub fn new(
        directory: D,
        routing: R,
        resolver: LocationResolver<G, P>,
        store: SettingsStore,
    ) -> Self {
        let (radius_tx, _) = watch::channel(DEFAULT_RADIUS_KM);
        let (results_tx, _) = watch::channel(RankedResult::new());
        Self {
            directory,
            routing,
            resolver,
            store,
            state: RwLock::new(None),
            generation: AtomicU64::new(0),
            radius_tx,
            results_tx,
        }
    }

    /// Observes radius changes. The receiver starts at the current value.
    pub fn subscribe_radius(&self) -> watch::Receiver<u32> {
        self.radius_tx.subscribe()
    }

    /// Observes ranking publications. The receiver starts at the latest
    /// published ranking (empty before the first successful cycle).
    pub fn subscribe_results(&self) -> watch::Receiver<RankedResult> {
        self.results_tx.subscribe()
    }

    /// The currently active radius in kilometers.
    pub fn current_radius(&self) -> u32 {
        *self.radius_tx.borrow()
    }

    /// The location the session is currently ranking against, if resolved.
    pub async fn current_location(&self) -> Option<UserLocation> {
        self.state.read().await.as_ref().map(|s| s.location.clone())
    }

    /// The active radius plus the location preference behind it, once the
    /// session has started.
    pub async fn current_config(&self) -> Option<RadiusConfig> {
        self.state.read().await.as_ref().map(|s| s.config.clone())
    }

    /// Starts the session from persisted settings.
    ///
    /// Missing settings fall back to defaults (device position, default
    /// radius); a present-but-malformed file is an error. Publishes the
    /// radius first so subscribers see it even if location resolution fails.
    pub async fn start(&self) -> Result<(), PipelineError> {
        let settings = match self.store.load() {
            Ok(settings) => settings,
            Err(ConfigError::Missing) => {
                debug!("No saved settings, starting with defaults");
                SavedSettings::default()
            }
            Err(error) => return Err(error.into()),
        };

        self.radius_tx.send_replace(settings.radius_km);

        let location = self.resolver.resolve_from_settings(&settings).await?;
        let source = settings
            .location_source()
            .unwrap_or(LocationSource::CurrentDevicePosition);
        *self.state.write().await = Some(SessionState {
            location,
            config: RadiusConfig {
                kilometers: settings.radius_km,
                source,
            },
        });

        self.run_cycle().await
    }

    /// Changes the active radius.
    ///
    /// The new value is persisted and published immediately; the ranking is
    /// then recomputed if a location is held. A failed recomputation leaves
    /// the radius changed and the previous ranking in place.
    pub async fn set_radius(&self, radius_km: u32) -> Result<(), PipelineError> {
        if radius_km == 0 {
            return Err(ConfigError::Malformed(
                "radius must be greater than zero".to_string(),
            )
            .into());
        }

        self.store.set_radius(radius_km)?;
        self.radius_tx.send_replace(radius_km);
        info!(radius_km, "Radius changed");

        let has_location = {
            let mut state = self.state.write().await;
            match state.as_mut() {
                Some(session) => {
                    session.config.kilometers = radius_km;
                    true
                }
                None => false,
            }
        };

        if has_location {
            self.run_cycle().await
        } else {
            Ok(())
        }
    }

    /// Re-resolves the location from the saved preference and recomputes.
    ///
    /// The active radius is kept; it only changes through [`set_radius`].
    ///
    /// [`set_radius`]: Self::set_radius
    pub async fn refresh_location(&self) -> Result<(), PipelineError> {
        let settings = match self.store.load() {
            Ok(settings) => settings,
            Err(ConfigError::Missing) => SavedSettings::default(),
            Err(error) => return Err(error.into()),
        };

        let location = self.resolver.resolve_from_settings(&settings).await?;
        let source = settings
            .location_source()
            .unwrap_or(LocationSource::CurrentDevicePosition);
        {
            let mut state = self.state.write().await;
            let kilometers = state
                .as_ref()
                .map(|s| s.config.kilometers)
                .unwrap_or(settings.radius_km);
            *state = Some(SessionState {
                location,
                config: RadiusConfig { kilometers, source },
            });
        }

        self.run_cycle().await
    }

    /// Ends the session: drops the held location and publishes an empty
    /// ranking. In-flight cycles become stale and discard their output.
    pub async fn shutdown(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.state.write().await = None;
        self.results_tx.send_replace(RankedResult::new());
        info!("Session shut down");
    }

    /// Runs one full computation cycle against the held state.
    async fn run_cycle(&self) -> Result<(), PipelineError> {
        let (location, radius_km) = {
            let state = self.state.read().await;
            match state.as_ref() {
                Some(session) => (session.location.clone(), session.config.kilometers),
                None => return Ok(()),
            }
        };
        let cycle = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let radius = f64::from(radius_km);

        // A failed fetch empties the published ranking before surfacing:
        // without a directory there is nothing the previous ranking can
        // still vouch for.
        let facilities = match self.directory.fetch_facilities().await {
            Ok(facilities) => facilities,
            Err(error) => {
                self.results_tx.send_replace(RankedResult::new());
                return Err(error.into());
            }
        };
        let candidates = prefilter(&facilities, location.coordinate, radius);
        debug!(
            cycle,
            total = facilities.len(),
            candidates = candidates.len(),
            "Pre-filter complete"
        );

        let enriched = enrich(candidates, location.coordinate, ENRICHMENT_CAP, &self.routing).await?;
        let ranked = combine(enriched, radius);

        if self.generation.load(Ordering::SeqCst) != cycle {
            warn!(cycle, "Cycle superseded, discarding result");
            return Ok(());
        }

        info!(cycle, results = ranked.len(), radius_km, "Ranking published");
        self.results_tx.send_replace(ranked);
        Ok(())
    }
}
