use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const DEFAULT_COMPANY: &str = "Ploy";
const DEFAULT_ABOUT: &str = "Ploy provides a platform that automates identity and access management for companies. It helps manage employee access to cloud resources, streamline onboarding/offboarding, detect shadow IT, automate security processes, and ensure compliance. Ploy integrates with major tools and offers features like access reviews, OAuth token revocation, SaaS usage monitoring, and risk identification.";

/// Generation-service flags shared by every subcommand that calls a model.
#[derive(Args, Debug, Clone)]
pub struct GeneratorArgs {
    /// API key for the generation service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,
    /// Model ID
    #[arg(long, env = "HOOKS_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,
    /// Request timeout in seconds (default: none)
    #[arg(long)]
    pub timeout_secs: Option<u64>,
    /// TOML file describing the seller the hooks are written for
    #[arg(long, value_name = "FILE")]
    pub seller: Option<std::path::PathBuf>,
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Option<Duration>,
}

impl GeneratorArgs {
    pub fn generator_config(&self) -> Result<GeneratorConfig> {
        let api_key = self
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .context("OPENAI_API_KEY is not set (pass --api-key or export it)")?;
        Ok(GeneratorConfig {
            base_url: self.base_url.clone(),
            api_key,
            model: self.model.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        })
    }

    pub fn seller_context(&self) -> Result<SellerContext> {
        match &self.seller {
            Some(path) => SellerContext::load(path),
            None => Ok(SellerContext::default()),
        }
    }
}

/// The company whose sales reps consume the hooks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SellerContext {
    pub company: String,
    pub about: String,
}

impl Default for SellerContext {
    fn default() -> Self {
        Self {
            company: DEFAULT_COMPANY.to_string(),
            about: DEFAULT_ABOUT.to_string(),
        }
    }
}

impl SellerContext {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seller file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid seller file {}", path.display()))
    }

    fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}
