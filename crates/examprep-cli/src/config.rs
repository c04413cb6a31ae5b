//! Application configuration
//!
//! Layers, lowest priority first: built-in defaults, an optional TOML file,
//! `EXAMPREP__SECTION__KEY` environment variables. A `.env` file is loaded
//! first, and `YOUTUBE_API_KEY` is honoured when no key is configured.

use anyhow::{Context, Result, bail};
use examprep_core::{ClientConfig, ScraperConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_PREFIX: &str = "EXAMPREP";
pub const YOUTUBE_KEY_VAR: &str = "YOUTUBE_API_KEY";
pub const MAX_RETRIES_LIMIT: u32 = 10;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpSettings,
    pub limits: LimitSettings,
    pub youtube_api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpSettings {
    pub requests_per_second: f64,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for HttpSettings {
    fn default() -> Self {
        let client = ClientConfig::default();
        Self {
            requests_per_second: client.requests_per_second,
            timeout_secs: client.timeout_secs,
            max_retries: client.max_retries,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitSettings {
    pub max_videos: usize,
    pub max_books: usize,
    pub max_pyqs: usize,
}

impl Default for LimitSettings {
    fn default() -> Self {
        let scraper = ScraperConfig::default();
        Self {
            max_videos: scraper.max_videos,
            max_books: scraper.max_books,
            max_pyqs: scraper.max_pyqs,
        }
    }
}

impl AppConfig {
    /// Loads configuration, skipping the file when it does not exist
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Some(path) = path.filter(|p| p.exists()) {
            builder = builder.add_source(config::File::from(path));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build().context("Failed to read configuration")?;
        let mut app: AppConfig = settings
            .try_deserialize()
            .context("Invalid configuration")?;

        if app.youtube_api_key.is_none() {
            app.youtube_api_key = std::env::var(YOUTUBE_KEY_VAR).ok();
        }

        app.validate()?;
        Ok(app)
    }

    fn validate(&self) -> Result<()> {
        if !(self.http.requests_per_second > 0.0) {
            bail!("http.requests_per_second must be greater than 0");
        }
        if self.http.timeout_secs == 0 {
            bail!("http.timeout_secs must be greater than 0");
        }
        if self.http.max_retries > MAX_RETRIES_LIMIT {
            bail!("http.max_retries must be at most {}", MAX_RETRIES_LIMIT);
        }
        Ok(())
    }

    pub fn scraper_config(&self) -> ScraperConfig {
        ScraperConfig {
            client: ClientConfig {
                requests_per_second: self.http.requests_per_second,
                timeout_secs: self.http.timeout_secs,
                max_retries: self.http.max_retries,
            },
            youtube_api_key: self.youtube_api_key.clone(),
            max_videos: self.limits.max_videos,
            max_books: self.limits.max_books,
            max_pyqs: self.limits.max_pyqs,
            ..ScraperConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_core() {
        let app = AppConfig::default();
        assert_eq!(app.http.timeout_secs, 12);
        assert_eq!(app.limits.max_pyqs, 5);
        assert!(app.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "youtube_api_key = \"from-file\"\n\n[http]\nrequests_per_second = 1.5\n\n[limits]\nmax_books = 3"
        )
        .unwrap();

        let app = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(app.http.requests_per_second, 1.5);
        assert_eq!(app.http.max_retries, 2);
        assert_eq!(app.limits.max_books, 3);
        assert_eq!(app.youtube_api_key.as_deref(), Some("from-file"));

        let scraper = app.scraper_config();
        assert_eq!(scraper.max_books, 3);
        assert_eq!(scraper.client.requests_per_second, 1.5);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let app = AppConfig::load(Some(Path::new("/nonexistent/examprep.toml"))).unwrap();
        assert_eq!(app.limits.max_videos, 6);
    }

    #[test]
    fn test_validate_rejects_zero_rate() {
        let mut app = AppConfig::default();
        app.http.requests_per_second = 0.0;
        assert!(app.validate().is_err());

        let mut app = AppConfig::default();
        app.http.timeout_secs = 0;
        assert!(app.validate().is_err());
    }

    #[test]
    fn test_validate_bounds_max_retries() {
        let mut app = AppConfig::default();
        app.http.max_retries = MAX_RETRIES_LIMIT;
        assert!(app.validate().is_ok());

        app.http.max_retries = 64;
        assert!(app.validate().is_err());
    }
}
