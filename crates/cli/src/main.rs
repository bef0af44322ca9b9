//! Command line tool for signing and verifying network request headers.
//!
//! This tool provides commands for:
//! - Generating Ed25519 key pairs for configuration
//! - Creating `Signature` authorization headers for a JSON body
//! - Verifying authorization headers against a body
//! - Formatting signed registry lookups
//! - Running an end-to-end smoke test with a sample search request

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use ondc_auth_common::authenticator::RequestAuthenticator;
use ondc_auth_common::identity::Role;
use ondc_auth_common::logging::init_logging;
use ondc_auth_common::request_signing::RegistryLookup;
use ondc_auth_common::settings::Settings;

mod commands;
mod error;

use error::CliError;

#[derive(Parser)]
#[command(name = "ondcauth")]
#[command(about = "Sign and verify network request authorization headers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML file with per-role identities (environment `ONDC_AUTH__*` overrides it)
    #[arg(long, short, global = true, env = "ONDC_AUTH_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a fresh Ed25519 key pair
    Keygen {
        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Create an authorization header for a JSON body
    Sign {
        /// Role whose identity signs the body
        #[arg(long, short, value_parser = parse_role)]
        role: Role,

        /// Path to the JSON request body
        #[arg(long, short)]
        body: PathBuf,

        /// Signature creation time (unix seconds, default now)
        #[arg(long)]
        created: Option<i64>,

        /// Signature expiry time (unix seconds, default now + 1h)
        #[arg(long)]
        expires: Option<i64>,
    },

    /// Verify an authorization header against a JSON body
    Verify {
        /// Role whose public key checks the signature
        #[arg(long, short, value_parser = parse_role)]
        role: Role,

        /// The full `Signature ...` header value
        #[arg(long)]
        header: String,

        /// Path to the JSON request body
        #[arg(long, short)]
        body: PathBuf,

        /// Expected creation time; read from the header when neither bound is given
        #[arg(long)]
        created: Option<i64>,

        /// Expected expiry time; read from the header when neither bound is given
        #[arg(long)]
        expires: Option<i64>,
    },

    /// Format a signed registry lookup
    Registry {
        #[arg(long)]
        country: Option<String>,

        #[arg(long)]
        domain: Option<String>,

        #[arg(long)]
        city: Option<String>,

        #[arg(long)]
        subscriber_id: Option<String>,
    },

    /// Sign and verify a sample search request as the logistics app
    Smoke,
}

#[derive(Clone, ValueEnum, Debug)]
pub enum OutputFormat {
    Text,
    Json,
}

fn parse_role(value: &str) -> Result<Role, String> {
    value
        .parse::<Role>()
        .map_err(|report| report.current_context().to_string())
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    if let Err(e) = init_logging(level) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn load_authenticator(config: Option<&PathBuf>) -> Result<RequestAuthenticator, CliError> {
    let settings = match config {
        Some(path) => Settings::from_file(path),
        None => Settings::new(),
    }
    .map_err(|e| CliError::Config(format!("Failed to load settings: {}", e)))?;

    Ok(RequestAuthenticator::new(settings.identity_table()))
}

fn run(cli: Cli) -> Result<String, CliError> {
    let config = cli.config.as_ref();

    match cli.command {
        Commands::Keygen { format } => commands::keygen(&format),
        Commands::Sign {
            role,
            body,
            created,
            expires,
        } => commands::sign(&load_authenticator(config)?, role, &body, created, expires),
        Commands::Verify {
            role,
            header,
            body,
            created,
            expires,
        } => commands::verify(
            &load_authenticator(config)?,
            role,
            &header,
            &body,
            created,
            expires,
        ),
        Commands::Registry {
            country,
            domain,
            city,
            subscriber_id,
        } => commands::registry(
            &load_authenticator(config)?,
            &RegistryLookup {
                country,
                domain,
                lookup_type: None,
                city,
                subscriber_id,
            },
        ),
        Commands::Smoke => commands::smoke(&load_authenticator(config)?),
    }
}
