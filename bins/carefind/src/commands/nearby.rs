//! Nearby command - run one full ranking cycle and print the result.

use anyhow::{Context, Result};
use carefind_core::config::SettingsStore;
use carefind_core::model::ProximityEstimate;
use carefind_geo::Coordinate;
use carefind_pipeline::{LocationResolver, RadiusPipeline};
use carefind_providers::{FinderClient, StaticPositionProvider};
use owo_colors::OwoColorize;

/// Run the ranking and print it.
pub async fn run(
    radius: Option<u32>,
    lat: Option<f64>,
    lng: Option<f64>,
    format: &str,
) -> Result<()> {
    let client = FinderClient::new().context("provider configuration is incomplete")?;
    let store = SettingsStore::new().context("could not locate the settings directory")?;

    let position = match (lat, lng) {
        (Some(lat), Some(lng)) => {
            let coordinate = Coordinate::try_new(lat, lng)?;
            StaticPositionProvider::at(coordinate)
        }
        _ => StaticPositionProvider::unavailable(),
    };
    let resolver = LocationResolver::new(client.geocoding(), position);

    let pipeline = RadiusPipeline::new(client.directory(), client.routing(), resolver, store);
    pipeline.start().await?;
    if let Some(km) = radius {
        pipeline.set_radius(km).await?;
    }

    let results = pipeline.subscribe_results().borrow().clone();
    let radius_km = pipeline.current_radius();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!();
    if let Some(location) = pipeline.current_location().await {
        let from = match location.source_address {
            Some(address) => address,
            // Device-derived position: reverse geocode for display, fall
            // back to the raw coordinate
            None => client
                .geocoding()
                .reverse(location.coordinate)
                .await
                .map(|geocoded| geocoded.formatted_address)
                .unwrap_or_else(|_| location.coordinate.to_string()),
        };
        println!("  {} {from}", "From:".dimmed());
    }
    println!(
        "  {} facilities within {} km",
        results.len().to_string().green().bold(),
        radius_km
    );
    println!();

    for (rank, estimate) in results.iter().enumerate() {
        print_estimate(rank + 1, estimate);
    }

    if results.is_empty() {
        println!("  {}", "Try a larger radius.".yellow());
        println!();
    }
    Ok(())
}

fn print_estimate(rank: usize, estimate: &ProximityEstimate) {
    let distance = match (estimate.route_km, estimate.route_minutes) {
        (Some(km), Some(minutes)) => format!("{km:.1} km by road, ~{minutes} min"),
        // No route available, straight-line only
        _ => format!("{:.1} km direct", estimate.straight_line_km),
    };

    println!(
        "  {:>2}. {}  {}",
        rank,
        estimate.facility.name.bold(),
        distance.green()
    );

    let address = estimate.facility.full_address();
    if !address.is_empty() {
        println!("      {}", address.dimmed());
    }
    println!(
        "      wait ~{} min",
        estimate.facility.wait_time_minutes.to_string().cyan()
    );
    println!();
}
