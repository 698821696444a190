//! Authorization and account commands.

use std::path::Path;

use console::style;
use dialoguer::Password;
use tracing::error;

use rt_core::config::ClientConfig;
use rt_core::error::{RtError, RtResult};

use crate::OutputFormat;

/// Verify credentials, prompting for the password when none is configured.
pub fn run(
    mut config: ClientConfig,
    config_path: Option<&Path>,
    save: bool,
    format: OutputFormat,
) -> RtResult<()> {
    let username = match config.auth.username.clone().filter(|u| !u.is_empty()) {
        Some(u) => u,
        None => {
            error!("no username configured. Use --username or set it in config.");
            return Err(RtError::Config("no username configured".into()));
        }
    };

    if config.auth.password.is_none() {
        let password = Password::new()
            .with_prompt(format!("Password for {username}"))
            .interact()
            .map_err(anyhow::Error::from)?;
        config.auth.password = Some(password);
    }

    let client = super::create_client(&config)?;

    match format {
        OutputFormat::Json => super::print_json(&serde_json::json!({
            "host": config.server.host,
            "secure": client.is_secure(),
            "authorized": client.is_authorized(),
        })),
        OutputFormat::Text => println!(
            "  {} Authorized as {} on {}",
            style("OK").green().bold(),
            style(&username).cyan(),
            client.transport().base_url()
        ),
    }

    if save {
        let path = config_path
            .ok_or_else(|| RtError::Config("could not determine config file location".into()))?;
        config.save_to_file(path)?;
        if let OutputFormat::Text = format {
            println!("  Saved to {}", path.display());
        }
    }

    Ok(())
}

/// Change the password of the configured user.
pub fn change_password(
    config: &ClientConfig,
    current: Option<String>,
    format: OutputFormat,
) -> RtResult<()> {
    let client = super::create_client(config)?;
    if !client.is_authorized() {
        return Err(RtError::Config(
            "changing the password requires a configured username and password".into(),
        ));
    }

    let current = match current.or_else(|| config.auth.password.clone()) {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Current password")
            .interact()
            .map_err(anyhow::Error::from)?,
    };
    let new = Password::new()
        .with_prompt("New password")
        .with_confirmation("Repeat new password", "Passwords do not match")
        .interact()
        .map_err(anyhow::Error::from)?;

    let result = client.account().change_password(&current, &new)?;
    match format {
        OutputFormat::Json => super::print_json(&result),
        OutputFormat::Text => println!("  {} Password changed.", style("OK").green().bold()),
    }
    Ok(())
}
