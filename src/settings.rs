use std::path::PathBuf;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

pub const DEFAULT_INPUT: &str = "tweets.js";
pub const DEFAULT_OUTPUT: &str = "tweets_text_only.txt";
pub const DEFAULT_LOG_FILE: &str = "tweet_extraction.log";
pub const DEFAULT_TEXT_FIELD: &str = "tweet.full_text";

const ENV_PREFIX: &str = "TWEETS";

/// Run settings: built-in defaults, then `TWEETS_*` environment variables.
/// Command-line flags are applied on top by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub log_file: PathBuf,
    #[serde(default)]
    pub max_tweets: Option<usize>,
    pub text_field: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .set_default("input", DEFAULT_INPUT)?
            .set_default("output", DEFAULT_OUTPUT)?
            .set_default("log_file", DEFAULT_LOG_FILE)?
            .set_default("text_field", DEFAULT_TEXT_FIELD)?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;
        // Same rule as --max-tweets.
        if settings.max_tweets == Some(0) {
            return Err(ConfigError::Message(
                "max_tweets must be a positive integer".to_string(),
            ));
        }
        Ok(settings)
    }
}
