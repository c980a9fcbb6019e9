//! Config command - inspect and change saved settings.

use anyhow::{Context, Result};
use carefind_core::config::{SavedSettings, SettingsStore};
use carefind_core::error::ConfigError;
use owo_colors::OwoColorize;

fn store() -> Result<SettingsStore> {
    SettingsStore::new().context("could not locate the settings directory")
}

fn load_or_default(store: &SettingsStore) -> Result<SavedSettings> {
    match store.load() {
        Ok(settings) => Ok(settings),
        Err(ConfigError::Missing) => Ok(SavedSettings::default()),
        Err(e) => Err(e).context("saved settings are unreadable"),
    }
}

/// Print the saved settings.
pub fn show(format: &str) -> Result<()> {
    let store = store()?;
    let settings = load_or_default(&store)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    println!();
    println!("  {}", "Saved settings".blue().bold());
    println!("  {} {}", "File:".dimmed(), store.path().display());
    println!();
    println!("  Radius:   {} km", settings.radius_km.to_string().green());

    let location = if settings.wants_device_position() {
        "device position".to_string()
    } else if let Some(address) = settings.manual_address() {
        address.to_string()
    } else {
        "not configured".yellow().to_string()
    };
    println!("  Location: {location}");
    println!();
    Ok(())
}

/// Save a new search radius.
pub fn set_radius(km: u32) -> Result<()> {
    let store = store()?;
    store
        .set_radius(km)
        .context("could not save the new radius")?;
    println!("{} radius set to {km} km", "✓".green().bold());
    Ok(())
}

/// Save a manual address as the location preference.
pub fn set_address(address: &str) -> Result<()> {
    let store = store()?;
    let mut settings = load_or_default(&store)?;
    settings.manual_address = address.to_string();
    settings.use_current_position = "false".to_string();
    store.save(&settings).context("could not save settings")?;
    println!("{} searching from: {address}", "✓".green().bold());
    Ok(())
}

/// Use the device position as the location preference.
pub fn use_device() -> Result<()> {
    let store = store()?;
    let mut settings = load_or_default(&store)?;
    settings.use_current_position = "true".to_string();
    settings.manual_address = "false".to_string();
    store.save(&settings).context("could not save settings")?;
    println!("{} searching from the device position", "✓".green().bold());
    Ok(())
}
