//! Server configuration.
//!
//! Built once in `main` from command-line flags (each with an environment
//! fallback) plus `OPENAI_API_KEY`, then passed down explicitly.

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::{json, Value as JsonValue};
use std::net::SocketAddr;
use std::path::PathBuf;

use intake_runtime::{ApiCredential, EvaluatorConfig, OPENAI_API_KEY_ENV};

/// Command-line flags.
#[derive(Debug, Parser)]
#[command(name = "intake-server", version, about = "Network onboarding risk evaluation API")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "INTAKE_BIND", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    /// Directory holding requests.json
    #[arg(long, env = "INTAKE_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// YAML file with evaluator settings
    #[arg(long, env = "INTAKE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub bind: SocketAddr,
    pub data_dir: PathBuf,
    pub evaluator: EvaluatorConfig,
    pub api_key: ApiCredential,
}

impl Config {
    /// Resolve configuration from parsed flags and the environment.
    ///
    /// Fails if `OPENAI_API_KEY` is unset or blank, or if the settings file
    /// cannot be read.
    pub fn from_args(args: Args) -> Result<Self> {
        let api_key = ApiCredential::from_env(OPENAI_API_KEY_ENV, "OpenAI API key")
            .with_context(|| format!("{} must be set", OPENAI_API_KEY_ENV))?;

        let evaluator = match &args.config {
            Some(path) => EvaluatorConfig::from_yaml_file(path).with_context(|| {
                format!("failed to load evaluator settings from {}", path.display())
            })?,
            None => EvaluatorConfig::default(),
        };

        Ok(Self {
            bind: args.bind,
            data_dir: args.data_dir,
            evaluator,
            api_key,
        })
    }

    /// JSON handed to the provider factory.
    pub fn provider_config(&self) -> JsonValue {
        let mut config = json!({ "api_key": self.api_key.expose() });
        if let Some(url) = &self.evaluator.base_url {
            config["base_url"] = json!(url);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_defaults() {
        let args = Args::try_parse_from(["intake-server"]).unwrap();
        assert!(args.bind.port() > 0);
        assert!(!args.data_dir.as_os_str().is_empty());
    }

    #[test]
    fn test_flags_override() {
        let args = Args::try_parse_from([
            "intake-server",
            "--bind",
            "127.0.0.1:9000",
            "--data-dir",
            "/tmp/intake",
            "--config",
            "intake.yaml",
        ])
        .unwrap();

        assert_eq!(args.bind, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(args.data_dir, PathBuf::from("/tmp/intake"));
        assert_eq!(args.config, Some(PathBuf::from("intake.yaml")));
    }

    #[test]
    fn test_api_key_and_settings_checked_at_startup() {
        let args = || Args::try_parse_from(["intake-server"]).unwrap();

        std::env::remove_var(OPENAI_API_KEY_ENV);
        let err = Config::from_args(args()).unwrap_err();
        assert!(err.to_string().contains(OPENAI_API_KEY_ENV));

        std::env::set_var(OPENAI_API_KEY_ENV, "   ");
        assert!(Config::from_args(args()).is_err());

        std::env::set_var(OPENAI_API_KEY_ENV, "sk-test");
        let config = Config::from_args(args()).unwrap();
        std::env::remove_var(OPENAI_API_KEY_ENV);

        assert_eq!(config.api_key.expose(), "sk-test");
        assert_eq!(config.provider_config()["api_key"], "sk-test");
        assert_eq!(config.evaluator, EvaluatorConfig::default());

        std::env::set_var(OPENAI_API_KEY_ENV, "sk-test");
        let missing = ["intake-server", "--config", "/nonexistent/intake.yaml"];
        let err = Config::from_args(Args::try_parse_from(missing).unwrap()).unwrap_err();
        std::env::remove_var(OPENAI_API_KEY_ENV);
        assert!(format!("{:#}", err).contains("/nonexistent/intake.yaml"));
    }

    #[test]
    fn test_bad_bind_rejected() {
        assert!(Args::try_parse_from(["intake-server", "--bind", "not-an-addr"]).is_err());
    }
}
