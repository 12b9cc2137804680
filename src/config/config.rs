use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppCfg {
    #[serde(default)]
    pub http: HttpCfg,
    #[serde(default)]
    pub llm: LlmCfg,
    #[serde(default)]
    pub staking: StakingCfg,
}

// Keys stay snake_case: environment overrides arrive lowercased
// (LLM__RATE_LIMIT_RPM -> llm.rate_limit_rpm) and must land on the same name.
#[derive(Debug, Deserialize, Clone)]
pub struct HttpCfg {
    #[serde(default = "default_ua")]
    pub user_agent: String,
    #[serde(with = "humantime_serde", default = "default_timeout")]
    pub timeout: Duration,
    #[serde(
        with = "humantime_serde",
        default = "default_pool_idle"
    )]
    pub pool_idle_timeout: Duration,
    #[serde(
        with = "humantime_serde",
        default = "default_keep_alive"
    )]
    pub tcp_keep_alive: Duration,
    #[serde(default = "default_pool")]
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpCfg {
    fn default() -> Self {
        Self {
            user_agent: default_ua(),
            timeout: default_timeout(),
            pool_idle_timeout: default_pool_idle(),
            tcp_keep_alive: default_keep_alive(),
            pool_max_idle_per_host: default_pool(),
        }
    }
}
fn default_ua() -> String {
    "bet-strategist/0.1".into()
}
// grounded generation with web search is slow, keep this generous
fn default_timeout() -> Duration {
    Duration::from_secs(60)
}
fn default_pool_idle() -> Duration {
    Duration::from_secs(90)
}
fn default_keep_alive() -> Duration {
    Duration::from_secs(60)
}
fn default_pool() -> usize {
    4
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmCfg {
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_rpm")]
    pub rate_limit_rpm: u32,
    #[serde(default = "default_grounding")]
    pub grounding_search: bool,
}

impl Default for LlmCfg {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            model: default_model(),
            api_key: "".to_string(),
            rate_limit_rpm: default_rpm(),
            grounding_search: default_grounding(),
        }
    }
}
fn default_llm_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}
fn default_rpm() -> u32 {
    15
}
fn default_grounding() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct StakingCfg {
    #[serde(default = "default_export_path")]
    pub export_path: String,
}

impl Default for StakingCfg {
    fn default() -> Self {
        Self {
            export_path: default_export_path(),
        }
    }
}
fn default_export_path() -> String {
    crate::report::csv::EXPORT_FILE_NAME.to_string()
}

/// Fallback variable for the API key when `llm.api_key` is unset.
const LEGACY_API_KEY_VAR: &str = "API_KEY";

impl AppCfg {
    /// Loads `path` when it exists, then layers `SECTION__KEY` environment
    /// variables on top.
    pub fn load(path: &str) -> Result<Self> {
        let cfg = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::default().separator("__"))
            .build()
            .context("building config")?;

        let mut app: AppCfg = cfg.try_deserialize().context("deserializing config")?;
        if app.llm.api_key.is_empty() {
            if let Ok(key) = std::env::var(LEGACY_API_KEY_VAR) {
                app.llm.api_key = key;
            }
        }
        app.validate()?;
        Ok(app)
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.llm.base_url.is_empty(), "llm.base_url missing");
        anyhow::ensure!(!self.llm.model.is_empty(), "llm.model missing");
        anyhow::ensure!(
            self.llm.rate_limit_rpm > 0,
            "llm.rate_limit_rpm must be > 0"
        );
        anyhow::ensure!(
            !self.staking.export_path.is_empty(),
            "staking.export_path missing"
        );
        Ok(())
    }

    /// The key is only needed for match analysis, so it is checked on demand.
    pub fn require_api_key(&self) -> Result<&str> {
        anyhow::ensure!(
            !self.llm.api_key.trim().is_empty(),
            "llm.api_key missing (set LLM__API_KEY or API_KEY)"
        );
        Ok(&self.llm.api_key)
    }
}
