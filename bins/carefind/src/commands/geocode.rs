//! Geocode command - resolve an address through the configured provider.

use anyhow::{Context, Result};
use carefind_providers::FinderClient;
use owo_colors::OwoColorize;

pub async fn run(address: &str, format: &str) -> Result<()> {
    let client = FinderClient::new().context("provider configuration is incomplete")?;
    let geocoded = client.geocoding().geocode_address(address).await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&geocoded)?);
        return Ok(());
    }

    println!();
    println!("  {}", geocoded.formatted_address.bold());
    println!("  {}", geocoded.coordinate.to_string().green());
    println!();
    Ok(())
}
