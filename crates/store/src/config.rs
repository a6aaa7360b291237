use shared_types::AppConfig;
use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Path to the config file, relative to the project root.
const CONFIG_PATH: &str = "config.toml";

/// Read `config.toml` and store the parsed config in the global
/// `OnceLock`. Safe to call multiple times; only the first call has effect.
///
/// A missing file yields all defaults; an unparseable file is reported on
/// stderr and also yields defaults.
pub fn load_config() {
    CONFIG.get_or_init(read_config);
}

/// Get the loaded application config, loading it on first use.
pub fn app_config() -> &'static AppConfig {
    CONFIG.get_or_init(read_config)
}

fn read_config() -> AppConfig {
    match std::fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
            eprintln!("[config] Failed to parse {CONFIG_PATH}: {e}; using defaults");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}
