use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// SQLite database connection URL
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// API key for the diary-drafting text service (unset disables drafting)
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// Base URL of the OpenAI-compatible chat completions API
    #[serde(default = "default_openai_api_url")]
    pub openai_api_url: String,

    /// Model used for diary drafting
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_database_url() -> String {
    "sqlite://golmok.db?mode=rwc".to_string()
}

fn default_openai_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
