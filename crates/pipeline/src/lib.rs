//! Proximity ranking pipeline for Carefind.
//!
//! Given a resolved user position, an active search radius, and the facility
//! directory, the pipeline produces a ranked, radius-filtered list of
//! facilities annotated with the best available travel distance:
//!
//! 1. [`resolver`] resolves the user's position (saved address or device)
//! 2. [`prefilter`] applies the straight-line pre-filter with a safety margin
//! 3. [`enrich`] issues capped concurrent routing calls, degrading per facility
//! 4. [`combine`] applies the authoritative radius filter and stable ranking
//!
//! [`RadiusPipeline`] strings the stages together, holds the session state,
//! and publishes radius and ranking changes to subscribers.

pub mod combine;
pub mod enrich;
pub mod error;
pub mod pipeline;
pub mod prefilter;
pub mod resolver;

pub use combine::combine;
pub use enrich::{enrich, ENRICHMENT_CAP};
pub use error::{LocationError, PipelineError};
pub use pipeline::RadiusPipeline;
pub use prefilter::{prefilter, PREFILTER_MARGIN};
pub use resolver::LocationResolver;
