//! Rutube CLI - command-line client for the Rutube API.
//!
//! Uploads and manages videos, delayed publications and show relations,
//! browses the TV show catalogue, and issues raw API calls for endpoints
//! without a dedicated command.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use rt_core::config::ClientConfig;
use rt_core::constants;
use rt_core::error::RtResult;
use rt_core::logging;

/// Rutube - video hosting API client.
#[derive(Parser)]
#[command(
    name = "rutube",
    version,
    about = "Rutube API command-line client",
    long_about = "A command-line client for the Rutube REST API.\n\
                  Credentials and connection settings come from the config file \
                  and can be overridden per invocation."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// API host (overrides config).
    #[arg(long, global = true)]
    host: Option<String>,

    /// Use plain http instead of https.
    #[arg(long, global = true)]
    insecure: bool,

    /// Username to authorize with (overrides config).
    #[arg(short, long, global = true)]
    username: Option<String>,

    /// Password to authorize with (overrides config).
    #[arg(long, global = true)]
    password: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Check credentials by exchanging them for a token.
    Auth {
        /// Save host and credentials to the config file on success.
        #[arg(long)]
        save: bool,
    },
    /// Upload and manage videos.
    Video {
        #[command(subcommand)]
        action: commands::video::VideoAction,
    },
    /// Browse the TV show catalogue.
    Show {
        #[command(subcommand)]
        action: commands::show::ShowAction,
    },
    /// Change the account password.
    Password {
        /// Current password (prompted when omitted).
        #[arg(long)]
        current: Option<String>,
    },
    /// Call any API path directly.
    Raw {
        /// HTTP method: GET, POST, PUT, PATCH or DELETE.
        method: String,
        /// Path relative to the host, e.g. api/video/person/.
        path: String,
        /// JSON object sent as the request body.
        #[arg(short, long)]
        data: Option<String>,
        /// Query parameter as key=value (repeatable).
        #[arg(short, long)]
        query: Vec<String>,
        /// File upload as field=path (repeatable).
        #[arg(long)]
        file: Vec<String>,
        /// Print only the response status.
        #[arg(long)]
        status: bool,
    },
}

fn main() -> RtResult<()> {
    let cli = Cli::parse();

    // Load configuration: explicit path must exist, default path may not
    let (config_path, mut config) = match cli.config.as_deref() {
        Some(path) => {
            let path = PathBuf::from(path);
            let config = ClientConfig::load_from_file(&path)?;
            (Some(path), config)
        }
        None => match ClientConfig::default_path() {
            Ok(path) => {
                let config = ClientConfig::load_or_default(&path)?;
                (Some(path), config)
            }
            Err(_) => (None, ClientConfig::default()),
        },
    };

    // Command-line overrides
    if let Some(host) = cli.host.as_deref() {
        config.server.host = ClientConfig::sanitize_host(host);
    }
    if cli.insecure {
        config.server.secure = false;
    }
    if cli.username.is_some() {
        config.auth.username = cli.username.clone();
    }
    if cli.password.is_some() {
        config.auth.password = cli.password.clone();
    }

    // Initialize logging
    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    let log_dir = config
        .log_dir()
        .or_else(|| ClientConfig::default_log_dir().ok());
    let _guard = match log_dir {
        Some(dir) => Some(logging::init_logging(&log_level, &dir, config.logging.json_output)?),
        None => {
            logging::init_console_logging(&log_level);
            None
        }
    };

    info!("Rutube CLI v{}", constants::CLIENT_VERSION);

    // Dispatch to command handlers
    match cli.command {
        Commands::Auth { save } => {
            commands::auth::run(config, config_path.as_deref(), save, cli.format)
        }
        Commands::Video { action } => commands::video::run(&config, action, cli.format),
        Commands::Show { action } => commands::show::run(&config, action, cli.format),
        Commands::Password { current } => {
            commands::auth::change_password(&config, current, cli.format)
        }
        Commands::Raw {
            method,
            path,
            data,
            query,
            file,
            status,
        } => {
            let request = commands::raw::RawRequest {
                method,
                path,
                data,
                query,
                files: file,
                status,
            };
            commands::raw::run(&config, request, cli.format)
        }
    }
}
