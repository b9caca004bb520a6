use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;

/// Gemini model used when `GEMINI_MODEL` is not set.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-05-20";

/// Gemini REST base URL used when `GEMINI_API_BASE` is not set.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Upper bound on stored training records.
pub const DEFAULT_MAX_TRAINING_ENTRIES: usize = 100;

/// Number of most recent records folded into the system instruction.
pub const DEFAULT_PROMPT_EXAMPLES: usize = 10;

/// JSON bodies carry inline base64 images, so the limit is generous.
pub const DEFAULT_MAX_BODY_BYTES: usize = 15 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct InspectionConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub training: TrainingSettings,
    pub http: HttpSettings,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    pub model: String,
    pub api_base: String,
    /// Request timeout for the outbound call. `None` keeps the transport default.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct TrainingSettings {
    /// JSON document holding the training records.
    pub data_path: PathBuf,
    pub max_entries: usize,
    pub prompt_examples: usize,
}

#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// Directory served for any path not matched by the API routes.
    pub static_dir: PathBuf,
    pub max_body_bytes: usize,
}

impl InspectionConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(InspectionConfig {
            common: common_config,
            gemini: GeminiSettings {
                api_key: Secret::new(get_env("GEMINI_API_KEY", None, is_prod)?),
                model: get_env("GEMINI_MODEL", Some(DEFAULT_GEMINI_MODEL), is_prod)?,
                api_base: get_env("GEMINI_API_BASE", Some(DEFAULT_GEMINI_API_BASE), is_prod)?,
                timeout_secs: env::var("GEMINI_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok()),
            },
            training: TrainingSettings {
                data_path: PathBuf::from(get_env(
                    "TRAINING_DATA_PATH",
                    Some("training_data.json"),
                    is_prod,
                )?),
                max_entries: get_env(
                    "TRAINING_MAX_ENTRIES",
                    Some(&DEFAULT_MAX_TRAINING_ENTRIES.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_MAX_TRAINING_ENTRIES),
                prompt_examples: get_env(
                    "TRAINING_PROMPT_EXAMPLES",
                    Some(&DEFAULT_PROMPT_EXAMPLES.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_PROMPT_EXAMPLES),
            },
            http: HttpSettings {
                static_dir: PathBuf::from(get_env("STATIC_DIR", Some("public"), is_prod)?),
                max_body_bytes: get_env(
                    "MAX_BODY_BYTES",
                    Some(&DEFAULT_MAX_BODY_BYTES.to_string()),
                    is_prod,
                )?
                .parse()
                .unwrap_or(DEFAULT_MAX_BODY_BYTES),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
