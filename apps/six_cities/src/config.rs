use std::{fs, path::PathBuf, time::Duration};

use anyhow::{anyhow, Context};
use serde::Deserialize;
use shared::domain::{find_city, known_cities, City, DEFAULT_CITY};
use url::Url;

pub const CONFIG_FILE: &str = "six-cities.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub request_timeout_ms: u64,
    pub token_path: PathBuf,
    pub default_city: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "https://14.design.htmlacademy.pro/six-cities".into(),
            request_timeout_ms: 5000,
            token_path: PathBuf::from("./.six-cities-token"),
            default_city: DEFAULT_CITY.into(),
            log_filter: "info".into(),
        }
    }
}

/// Keys accepted in `six-cities.toml`; all optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    api_url: Option<String>,
    request_timeout_ms: Option<u64>,
    token_path: Option<PathBuf>,
    default_city: Option<String>,
    log_filter: Option<String>,
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn city(&self) -> anyhow::Result<City> {
        find_city(&self.default_city).ok_or_else(|| {
            let known: Vec<String> = known_cities().map(|city| city.name).collect();
            anyhow!(
                "unknown default city '{}', expected one of: {}",
                self.default_city,
                known.join(", ")
            )
        })
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        Url::parse(&self.api_url)
            .with_context(|| format!("invalid api url '{}'", self.api_url))?;
        if self.request_timeout_ms == 0 {
            return Err(anyhow!("request timeout must be greater than zero"));
        }
        self.city()?;
        Ok(())
    }

    fn apply_file(&mut self, raw: &str) -> anyhow::Result<()> {
        let file: FileSettings = toml::from_str(raw).context("failed to parse settings file")?;
        if let Some(v) = file.api_url {
            self.api_url = v;
        }
        if let Some(v) = file.request_timeout_ms {
            self.request_timeout_ms = v;
        }
        if let Some(v) = file.token_path {
            self.token_path = v;
        }
        if let Some(v) = file.default_city {
            self.default_city = v;
        }
        if let Some(v) = file.log_filter {
            self.log_filter = v;
        }
        Ok(())
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(v) = var("SIX_CITIES_API_URL") {
            self.api_url = v;
        }
        if let Some(v) = var("APP__API_URL") {
            self.api_url = v;
        }

        if let Some(v) = var("APP__REQUEST_TIMEOUT_MS") {
            self.request_timeout_ms = v
                .parse()
                .with_context(|| format!("APP__REQUEST_TIMEOUT_MS is not a number: '{v}'"))?;
        }

        if let Some(v) = var("APP__TOKEN_PATH") {
            self.token_path = PathBuf::from(v);
        }
        if let Some(v) = var("APP__DEFAULT_CITY") {
            self.default_city = v;
        }
        if let Some(v) = var("APP__LOG_FILTER") {
            self.log_filter = v;
        }
        Ok(())
    }
}

/// Defaults, then `six-cities.toml` when present, then the environment.
pub fn load_settings() -> anyhow::Result<Settings> {
    let file = match fs::read_to_string(CONFIG_FILE) {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => return Err(err).with_context(|| format!("failed to read {CONFIG_FILE}")),
    };
    settings_from(file.as_deref(), |key| std::env::var(key).ok())
}

fn settings_from(
    file: Option<&str>,
    var: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();
    if let Some(raw) = file {
        settings.apply_file(raw)?;
    }
    settings.apply_env(var)?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
