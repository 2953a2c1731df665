use clap::{Args as ClapArgs, Parser};
use rasoi_core::domain::common::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, LLMConfig, RasoiConfig,
};
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "rasoi-api", version, about = "Rasoi Revive HTTP API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub log: LogArgs,

    #[command(flatten)]
    pub llm: LlmArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "PORT", default_value_t = 3333)]
    pub port: u16,

    #[arg(long = "server-root-path", env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "server-allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON")]
    pub json: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long = "llm-api-key", env = "API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    #[arg(long = "llm-text-model", env = "GEMINI_TEXT_MODEL", default_value = DEFAULT_TEXT_MODEL)]
    pub text_model: String,

    #[arg(long = "llm-image-model", env = "GEMINI_IMAGE_MODEL", default_value = DEFAULT_IMAGE_MODEL)]
    pub image_model: String,

    #[arg(long = "llm-base-url", env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub base_url: String,

    #[arg(long = "llm-timeout-secs", env = "GEMINI_TIMEOUT_SECS", default_value_t = 120)]
    pub timeout_secs: u64,
}

impl From<Args> for RasoiConfig {
    fn from(args: Args) -> Self {
        RasoiConfig {
            llm: LLMConfig {
                gemini_api_key: args.llm.api_key,
                text_model: args.llm.text_model,
                image_model: args.llm.image_model,
                base_url: args.llm.base_url,
                request_timeout: Duration::from_secs(args.llm.timeout_secs),
            },
        }
    }
}
