use anyhow::{bail, Result};
use dotenvy::dotenv;
use std::env;

use crate::country::CountrySet;

/// Member ID configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub countries: CountrySet,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// `MEMBER_ID_COUNTRIES` (comma-separated two-letter codes) replaces
    /// the built-in supported set when present.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let countries = match env::var("MEMBER_ID_COUNTRIES") {
            Ok(raw) => {
                let countries = CountrySet::new(raw.split(','));
                if countries.is_empty() {
                    bail!("MEMBER_ID_COUNTRIES must contain at least one two-letter code");
                }
                countries
            }
            Err(_) => CountrySet::default(),
        };

        Ok(Self { countries })
    }
}
