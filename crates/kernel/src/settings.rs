use std::path::PathBuf;

use anyhow::{anyhow, Context};
use serde::Deserialize;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "BOOKS_ENV";
const CONFIG_DIR_ENV: &str = "BOOKS_CONFIG_DIR";
const ENV_PREFIX: &str = "BOOKS";

/// Unprefixed variables applied last, mapped onto their configuration keys.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("NYT_API_KEY", "providers.nyt.api_key"),
    ("GOOGLE_BOOKS_API_KEY", "providers.google_books.api_key"),
];

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

impl Environment {
    fn parse(raw: &str) -> anyhow::Result<Self> {
        match raw {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(anyhow!(
                "unsupported environment '{}'; expected local/staging/production",
                other
            )),
        }
    }
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
    #[serde(default)]
    pub providers: ProviderSettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, environment overlay
    /// and process environment variables.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Same as [`Settings::load`] but resolves the bootstrap and override
    /// variables through `lookup` instead of the process environment.
    pub fn load_with<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup(ENV_VAR_NAME).unwrap_or_else(|| DEFAULT_ENV.to_string());
        let environment = Environment::parse(&environment)?;

        let config_dir = match lookup(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir()
                .context("unable to resolve current directory")?
                .join("config"),
        };

        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{}.toml", environment_name(&environment)));

        let mut builder = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            );

        for (var, key) in ENV_OVERRIDES {
            builder = builder
                .set_override_option(*key, lookup(*var))
                .with_context(|| format!("failed to apply {} override", var))?;
        }

        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        settings.environment = environment;

        Ok(settings)
    }
}

fn environment_name(environment: &Environment) -> &'static str {
    match environment {
        Environment::Local => "local",
        Environment::Staging => "staging",
        Environment::Production => "production",
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_host")]
    pub host: String,
    #[serde(default = "ServerSettings::default_port")]
    pub port: u16,
    /// Whole-request timeout. Unset means requests wait on upstream for as
    /// long as the HTTP client allows.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

impl ServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        3000
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            request_timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Credentials and endpoints of the upstream book providers.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProviderSettings {
    #[serde(default)]
    pub nyt: NytSettings,
    #[serde(default)]
    pub google_books: GoogleBooksSettings,
}

/// NYT Books API (bestseller lists).
#[derive(Debug, Clone, Deserialize)]
pub struct NytSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "NytSettings::default_base_url")]
    pub base_url: String,
}

impl NytSettings {
    fn default_base_url() -> String {
        "https://api.nytimes.com".to_string()
    }
}

impl Default for NytSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: Self::default_base_url(),
        }
    }
}

/// Google Books API (catalog search).
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleBooksSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "GoogleBooksSettings::default_base_url")]
    pub base_url: String,
}

impl GoogleBooksSettings {
    fn default_base_url() -> String {
        "https://www.googleapis.com".to_string()
    }
}

impl Default for GoogleBooksSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: Self::default_base_url(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    fn empty_config_dir() -> String {
        std::env::temp_dir()
            .join("books-api-settings-tests-missing")
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn default_environment_is_local() {
        let settings = Settings::default();
        assert_eq!(settings.environment, Environment::Local);
    }

    #[test]
    fn default_port_is_3000() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.server.request_timeout_ms, None);
    }

    #[test]
    fn default_credentials_are_empty() {
        let settings = Settings::default();
        assert_eq!(settings.providers.nyt.api_key, "");
        assert_eq!(settings.providers.google_books.api_key, "");
        assert_eq!(settings.providers.nyt.base_url, "https://api.nytimes.com");
        assert_eq!(
            settings.providers.google_books.base_url,
            "https://www.googleapis.com"
        );
    }

    #[test]
    fn well_known_variables_override_settings() {
        let dir = empty_config_dir();
        let settings = Settings::load_with(lookup_from(&[
            ("BOOKS_CONFIG_DIR", dir.as_str()),
            ("PORT", "8081"),
            ("NYT_API_KEY", "nyt-key"),
            ("GOOGLE_BOOKS_API_KEY", "google-key"),
        ]))
        .unwrap();

        assert_eq!(settings.server.port, 8081);
        assert_eq!(settings.providers.nyt.api_key, "nyt-key");
        assert_eq!(settings.providers.google_books.api_key, "google-key");
        assert_eq!(settings.providers.nyt.base_url, "https://api.nytimes.com");
    }

    #[test]
    fn missing_variables_fall_back_to_defaults() {
        let dir = empty_config_dir();
        let settings =
            Settings::load_with(lookup_from(&[("BOOKS_CONFIG_DIR", dir.as_str())])).unwrap();

        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.providers.nyt.api_key, "");
        assert_eq!(settings.providers.google_books.api_key, "");
    }

    #[test]
    fn environment_is_taken_from_books_env() {
        let dir = empty_config_dir();
        let settings = Settings::load_with(lookup_from(&[
            ("BOOKS_CONFIG_DIR", dir.as_str()),
            ("BOOKS_ENV", "staging"),
        ]))
        .unwrap();

        assert_eq!(settings.environment, Environment::Staging);
    }

    #[test]
    fn unknown_environment_is_rejected() {
        let dir = empty_config_dir();
        let result = Settings::load_with(lookup_from(&[
            ("BOOKS_CONFIG_DIR", dir.as_str()),
            ("BOOKS_ENV", "moon"),
        ]));

        assert!(result.is_err());
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let dir = empty_config_dir();
        let result = Settings::load_with(lookup_from(&[
            ("BOOKS_CONFIG_DIR", dir.as_str()),
            ("PORT", "not-a-port"),
        ]));

        assert!(result.is_err());
    }
}
