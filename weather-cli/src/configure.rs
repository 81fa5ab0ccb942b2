use anyhow::{Context, Result};
use inquire::{Password, PasswordDisplayMode, Text};
use weather_core::{Config, config::DEFAULT_BASE_URL};

/// Interactive `weather configure`.
pub fn run() -> Result<()> {
    let mut config = Config::load_file()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Get one at https://openweathermap.org/api")
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());

    let base_url = Text::new("API base URL:")
        .with_default(config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))
        .prompt()
        .context("Failed to read base URL")?;
    config.base_url = Some(base_url.trim().to_string());

    let city = Text::new("Default city:")
        .with_default(config.default_city())
        .prompt()
        .context("Failed to read default city")?;
    config.default_city = Some(city.trim().to_string());

    // Fail now rather than on the first lookup.
    config.credentials()?;
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
