use crate::domain::chart::SeriesLabel;
use serde::Deserialize;
use std::path::PathBuf;

const ENV_PREFIX: &str = "COVIZ";
const DEFAULT_FEED_KEY: &str = "latestData.json";

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    #[serde(default)]
    pub freshness: FreshnessSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StorageSettings {
    Http {
        endpoint: String,
        bucket: String,
        #[serde(default = "default_feed_key")]
        key: String,
        token: Option<String>,
        #[serde(default = "default_request_timeout_secs")]
        timeout_secs: u64,
    },
    File {
        path: PathBuf,
    },
}

#[derive(Debug, Deserialize, Clone)]
pub struct FreshnessSettings {
    pub max_age_hours: i64,
    pub refresh_secs: u64,
    /// Upper bound on one feed fetch, whatever the store does internally.
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,
}

impl Default for FreshnessSettings {
    fn default() -> Self {
        Self {
            max_age_hours: 24,
            refresh_secs: 300,
            fetch_timeout_ms: default_fetch_timeout_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CardsConfig {
    #[serde(default)]
    pub cards: Vec<CardConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CardConfig {
    pub id: String,
    pub title: String,
    pub embed_path: String,
    #[serde(default)]
    pub short_date: bool,
    #[serde(default)]
    pub series: Vec<CardSeriesConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CardSeriesConfig {
    pub metric: String,
    pub name: String,
    pub color: String,
}

impl CardConfig {
    pub fn metric_keys(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.metric.as_str()).collect()
    }

    pub fn labels(&self) -> Vec<SeriesLabel> {
        self.series
            .iter()
            .map(|s| SeriesLabel::new(s.name.clone(), s.color.clone()))
            .collect()
    }
}

fn default_feed_key() -> String {
    DEFAULT_FEED_KEY.to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_fetch_timeout_ms() -> u64 {
    15_000
}

pub fn load_service_config() -> anyhow::Result<ServiceConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/service"))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_cards_config() -> anyhow::Result<CardsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/cards"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    fn parse<T: serde::de::DeserializeOwned>(toml: &str) -> T {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_http_storage_defaults_key() {
        let cfg: ServiceConfig = parse(
            r#"
            [server]
            bind = "0.0.0.0:8080"

            [storage]
            kind = "http"
            endpoint = "https://s3.eu-central-1.amazonaws.com"
            bucket = "coviz"
            "#,
        );

        assert_eq!(
            cfg.storage,
            StorageSettings::Http {
                endpoint: "https://s3.eu-central-1.amazonaws.com".to_string(),
                bucket: "coviz".to_string(),
                key: "latestData.json".to_string(),
                token: None,
                timeout_secs: 10,
            }
        );
        assert_eq!(cfg.freshness.max_age_hours, 24);
        assert_eq!(cfg.freshness.fetch_timeout_ms, 15_000);
    }

    #[test]
    fn test_file_storage() {
        let cfg: ServiceConfig = parse(
            r#"
            [server]
            bind = "127.0.0.1:3000"

            [storage]
            kind = "file"
            path = "data/latestData.json"

            [freshness]
            max_age_hours = 48
            refresh_secs = 60
            fetch_timeout_ms = 2500
            "#,
        );

        assert_eq!(
            cfg.storage,
            StorageSettings::File {
                path: PathBuf::from("data/latestData.json")
            }
        );
        assert_eq!(cfg.freshness.refresh_secs, 60);
        assert_eq!(cfg.freshness.fetch_timeout_ms, 2500);
    }

    #[test]
    fn test_card_labels_in_order() {
        let cfg: CardsConfig = parse(
            r##"
            [[cards]]
            id = "vaccines-per-day"
            title = "Doze administrate"
            embed_path = "doze-pe-zi"
            short_date = true

            [[cards.series]]
            metric = "pfizer"
            name = "Pfizer BioNTech"
            color = "#0a6ebd"

            [[cards.series]]
            metric = "moderna"
            name = "Moderna"
            color = "#f28e2b"
            "##,
        );

        let card = &cfg.cards[0];
        assert!(card.short_date);
        assert_eq!(card.metric_keys(), vec!["pfizer", "moderna"]);
        assert_eq!(card.labels()[1], SeriesLabel::new("Moderna", "#f28e2b"));
    }
}
