use std::path::Path;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::identity::{Identity, IdentityTable, Role};

/// Prefix for environment overrides, e.g. `ONDC_AUTH__BUYER_APP__PRIVATE_KEY`.
pub const ENV_PREFIX: &str = "ONDC_AUTH";

/// Per-role identities as configured. Missing values default to empty strings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub buyer_app: Identity,
    pub seller_app: Identity,
    pub logistics_app: Identity,
}

impl Settings {
    /// Loads settings from environment variables only.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment holds values of the wrong shape.
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_toml("")
    }

    /// Loads settings from a TOML file, with environment overrides on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(environment())
            .build()?;

        config.try_deserialize()
    }

    /// Loads settings from a TOML string, with environment overrides on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid TOML.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let toml = File::from_str(toml_str, FileFormat::Toml);
        let config = Config::builder()
            .add_source(toml)
            .add_source(environment())
            .build()?;

        config.try_deserialize()
    }

    #[must_use]
    pub fn identity(&self, role: Role) -> &Identity {
        match role {
            Role::BuyerApp => &self.buyer_app,
            Role::SellerApp => &self.seller_app,
            Role::LogisticsApp => &self.logistics_app,
        }
    }

    /// Freezes the configured identities into a lookup table.
    #[must_use]
    pub fn identity_table(&self) -> IdentityTable {
        Role::ALL
            .into_iter()
            .map(|role| (role, self.identity(role).clone()))
            .collect()
    }
}

fn environment() -> Environment {
    Environment::default().prefix(ENV_PREFIX).separator("__")
}
