use anyhow::{ensure, Context, Result};
use compute::{AzureOpenAiClient, CompletionService, ForecastBackend, Forecaster, RandomWalk};
use ::config::{Config, Environment, File};
use model::JsonFileStore;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::schemas::AppState;

/// Base name of the optional settings file (`cashcast.toml`, `cashcast.json`, ...)
const SETTINGS_FILE: &str = "cashcast";
const ENV_PREFIX: &str = "CASHCAST";

/// Application settings
#[derive(Clone, Deserialize)]
pub struct Settings {
    pub bind_address: String,
    pub data_file: PathBuf,
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub azure_openai: AzureOpenAiSettings,
    pub random_walk: RandomWalkSettings,
}

/// Connection settings for the completion service. Leaving any of endpoint,
/// api_key or deployment_name empty disables the service.
#[derive(Clone, Default, Deserialize)]
pub struct AzureOpenAiSettings {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub deployment_name: Option<String>,
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default = "default_service_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RandomWalkSettings {
    pub min_delta: i64,
    pub max_delta: i64,
}

fn default_service_timeout_secs() -> u64 {
    100
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl AzureOpenAiSettings {
    /// Endpoint, key and deployment when all three are set.
    pub fn connection(&self) -> Option<(&str, &str, &str)> {
        Some((
            non_empty(&self.endpoint)?,
            non_empty(&self.api_key)?,
            non_empty(&self.deployment_name)?,
        ))
    }

    fn is_partially_set(&self) -> bool {
        [&self.endpoint, &self.api_key, &self.deployment_name]
            .into_iter()
            .any(|value| non_empty(value).is_some())
    }
}

impl fmt::Debug for AzureOpenAiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureOpenAiSettings")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("deployment_name", &self.deployment_name)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("bind_address", &self.bind_address)
            .field("data_file", &self.data_file)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("azure_openai", &self.azure_openai)
            .field("random_walk", &self.random_walk)
            .finish()
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Load settings from defaults, `cashcast.*` in the working directory and
/// `CASHCAST_*` environment variables, in increasing precedence.
pub fn load_settings() -> Result<Settings> {
    settings_from(Some(Path::new(SETTINGS_FILE)), None)
}

/// Build settings from an optional settings file and either the process
/// environment (`env = None`) or an explicit set of variables.
pub fn settings_from(file: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Settings> {
    let mut builder = Config::builder()
        .set_default("bind_address", "0.0.0.0:5000")?
        .set_default("data_file", "mock_transactions.json")?
        .set_default("request_timeout_secs", 120)?
        .set_default("azure_openai.timeout_secs", default_service_timeout_secs())?
        .set_default("random_walk.min_delta", RandomWalk::DEFAULT_MIN_DELTA)?
        .set_default("random_walk.max_delta", RandomWalk::DEFAULT_MAX_DELTA)?;

    if let Some(file) = file {
        builder = builder.add_source(File::from(file).required(false));
    }

    let settings: Settings = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()
        .context("Failed to read settings")?
        .try_deserialize()
        .context("Invalid settings")?;

    debug!("Loaded settings: {:?}", settings);
    Ok(settings)
}

/// Pick the forecast backend. The random-walk bounds are validated either way.
/// A configured completion service must time out before the request does, so
/// a slow upstream call surfaces as a call error rather than a bare 408.
pub fn build_forecaster(settings: &Settings) -> Result<Forecaster> {
    let walk = RandomWalk::new(settings.random_walk.min_delta, settings.random_walk.max_delta)
        .context("Invalid random_walk settings")?;

    let azure = &settings.azure_openai;
    let backend = match azure.connection() {
        Some((endpoint, api_key, deployment)) => {
            ensure!(
                azure.timeout_secs < settings.request_timeout_secs,
                "azure_openai.timeout_secs ({}) must be below request_timeout_secs ({})",
                azure.timeout_secs,
                settings.request_timeout_secs
            );
            let api_version = non_empty(&azure.api_version)
                .unwrap_or(compute::completion::azure::DEFAULT_API_VERSION);
            let client = AzureOpenAiClient::new(
                endpoint,
                api_key,
                deployment,
                api_version,
                Duration::from_secs(azure.timeout_secs),
            )
            .context("Failed to build completion client")?;
            info!(
                "Forecasts delegated to deployment '{}' at {}",
                deployment, endpoint
            );
            let service: Arc<dyn CompletionService> = Arc::new(client);
            ForecastBackend::ExternalService(service)
        }
        None => {
            if azure.is_partially_set() {
                warn!("Completion service settings are incomplete, using random walk forecasts");
            } else {
                info!("No completion service configured, using random walk forecasts");
            }
            ForecastBackend::NoService(walk)
        }
    };

    Ok(Forecaster::new(backend))
}

/// Initialize application state from settings
pub fn initialize_app_state(settings: &Settings) -> Result<AppState> {
    let forecaster = build_forecaster(settings)?;
    info!("Serving transactions from {}", settings.data_file.display());

    Ok(AppState {
        store: Arc::new(JsonFileStore::new(settings.data_file.clone())),
        forecaster: Arc::new(forecaster),
        request_timeout: settings.request_timeout(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let settings = settings_from(None, env(&[])).unwrap();
        assert_eq!(settings.bind_address, "0.0.0.0:5000");
        assert_eq!(settings.data_file, PathBuf::from("mock_transactions.json"));
        assert_eq!(settings.request_timeout(), Duration::from_secs(120));
        assert_eq!(settings.azure_openai.timeout_secs, 100);
        assert!(settings.azure_openai.connection().is_none());
        assert_eq!(settings.random_walk.min_delta, -1000);
        assert_eq!(settings.random_walk.max_delta, 2000);
    }

    #[test]
    fn test_environment_overrides() {
        let settings = settings_from(
            None,
            env(&[
                ("CASHCAST_BIND_ADDRESS", "127.0.0.1:8080"),
                ("CASHCAST_REQUEST_TIMEOUT_SECS", "30"),
                ("CASHCAST_AZURE_OPENAI__ENDPOINT", "https://example.openai.azure.com"),
                ("CASHCAST_AZURE_OPENAI__API_KEY", "secret"),
                ("CASHCAST_AZURE_OPENAI__DEPLOYMENT_NAME", "gpt-forecast"),
                ("CASHCAST_RANDOM_WALK__MIN_DELTA", "-50"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.bind_address, "127.0.0.1:8080");
        assert_eq!(settings.request_timeout_secs, 30);
        assert_eq!(
            settings.azure_openai.connection(),
            Some(("https://example.openai.azure.com", "secret", "gpt-forecast"))
        );
        assert_eq!(settings.random_walk.min_delta, -50);
        assert!(!format!("{:?}", settings).contains("secret\""));
    }

    #[test]
    fn test_settings_file_is_layered_under_environment() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "data_file = \"/srv/data.json\"\nbind_address = \"127.0.0.1:9000\"\n[random_walk]\nmin_delta = 1\nmax_delta = 5"
        )
        .unwrap();

        let settings = settings_from(
            Some(file.path()),
            env(&[("CASHCAST_BIND_ADDRESS", "127.0.0.1:9100")]),
        )
        .unwrap();
        assert_eq!(settings.data_file, PathBuf::from("/srv/data.json"));
        assert_eq!(settings.bind_address, "127.0.0.1:9100");
        assert_eq!(settings.random_walk.max_delta, 5);
    }

    #[test]
    fn test_missing_settings_file_is_ignored() {
        let settings = settings_from(Some(Path::new("/nonexistent/cashcast")), env(&[])).unwrap();
        assert_eq!(settings.bind_address, "0.0.0.0:5000");
    }

    #[test]
    fn test_empty_service_settings_select_random_walk() {
        let settings = settings_from(
            None,
            env(&[
                ("CASHCAST_AZURE_OPENAI__ENDPOINT", "https://example.openai.azure.com"),
                ("CASHCAST_AZURE_OPENAI__API_KEY", ""),
            ]),
        )
        .unwrap();
        let forecaster = build_forecaster(&settings).unwrap();
        assert_eq!(forecaster.backend().label(), "random-walk");
    }

    #[test]
    fn test_complete_service_settings_select_external_service() {
        let settings = settings_from(
            None,
            env(&[
                ("CASHCAST_AZURE_OPENAI__ENDPOINT", "https://example.openai.azure.com"),
                ("CASHCAST_AZURE_OPENAI__API_KEY", "secret"),
                ("CASHCAST_AZURE_OPENAI__DEPLOYMENT_NAME", "gpt-forecast"),
            ]),
        )
        .unwrap();
        let forecaster = build_forecaster(&settings).unwrap();
        assert_eq!(forecaster.backend().label(), "external-service");
    }

    #[test]
    fn test_inverted_walk_bounds_fail_start_up() {
        let settings = settings_from(
            None,
            env(&[
                ("CASHCAST_RANDOM_WALK__MIN_DELTA", "10"),
                ("CASHCAST_RANDOM_WALK__MAX_DELTA", "10"),
            ]),
        )
        .unwrap();
        assert!(build_forecaster(&settings).is_err());
        assert!(initialize_app_state(&settings).is_err());
    }

    #[test]
    fn test_service_timeout_must_be_below_request_timeout() {
        let service = [
            ("CASHCAST_AZURE_OPENAI__ENDPOINT", "https://example.openai.azure.com"),
            ("CASHCAST_AZURE_OPENAI__API_KEY", "secret"),
            ("CASHCAST_AZURE_OPENAI__DEPLOYMENT_NAME", "gpt-forecast"),
        ];

        let mut vars = service.to_vec();
        vars.push(("CASHCAST_REQUEST_TIMEOUT_SECS", "60"));
        let settings = settings_from(None, env(&vars)).unwrap();
        let err = build_forecaster(&settings).unwrap_err();
        assert!(err.to_string().contains("timeout_secs (100)"));

        vars.push(("CASHCAST_AZURE_OPENAI__TIMEOUT_SECS", "59"));
        let settings = settings_from(None, env(&vars)).unwrap();
        assert_eq!(build_forecaster(&settings).unwrap().backend().label(), "external-service");

        // Without a service the pair is irrelevant
        let settings = settings_from(None, env(&[("CASHCAST_REQUEST_TIMEOUT_SECS", "5")])).unwrap();
        assert_eq!(build_forecaster(&settings).unwrap().backend().label(), "random-walk");
    }
}
