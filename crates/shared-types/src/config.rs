use serde::Deserialize;
use std::path::PathBuf;

/// Top-level shape of `config.toml` at the project root. Every section is
/// optional; missing sections fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

/// Database connection settings. `url` falls back to the DATABASE_URL
/// environment variable, then to a local file database.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
        }
    }
}

/// Settings for the seed binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// How many cases one seed run generates.
    pub cases: usize,
    /// Where the JSON export is written.
    pub output: PathBuf,
    /// Fixed RNG seed for reproducible datasets; random when unset.
    pub rng_seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            cases: 10,
            output: PathBuf::from("legal_cases.json"),
            rng_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.seed.cases, 10);
        assert_eq!(config.seed.output, PathBuf::from("legal_cases.json"));
        assert_eq!(config.seed.rng_seed, None);
        assert_eq!(config.database.max_connections, 10);
        assert!(config.database.url.is_none());
    }

    #[test]
    fn partial_config_overrides_only_named_keys() {
        let config: AppConfig = toml::from_str(
            r#"
            [seed]
            cases = 100
            rng_seed = 42
            "#,
        )
        .unwrap();
        assert_eq!(config.seed.cases, 100);
        assert_eq!(config.seed.rng_seed, Some(42));
        assert_eq!(config.seed.output, PathBuf::from("legal_cases.json"));
    }
}
