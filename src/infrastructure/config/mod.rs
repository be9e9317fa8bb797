use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    // Storage
    pub upload_dir: PathBuf,
    pub audio_dir: PathBuf,
    pub audio_url_prefix: String,
    pub desktop_app_path: PathBuf,
    pub max_upload_bytes: usize,
    // Speech synthesis
    pub tts_backend: TtsBackend,
    pub tts_male_voice: Option<String>,
    pub tts_female_voice: Option<String>,
    pub synthesis_timeout_secs: u64,
    pub aws_region: String,
    pub openai_api_key: Option<String>,
    pub openai_tts_model: String,
    pub espeak_path: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Speech synthesis engine selected at startup
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TtsBackend {
    Polly,
    OpenAi,
    Espeak,
}

impl TtsBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            TtsBackend::Polly => "polly",
            TtsBackend::OpenAi => "openai",
            TtsBackend::Espeak => "espeak",
        }
    }
}

impl FromStr for TtsBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "polly" => Ok(TtsBackend::Polly),
            "openai" => Ok(TtsBackend::OpenAi),
            "espeak" | "espeak-ng" => Ok(TtsBackend::Espeak),
            other => Err(format!(
                "Unknown TTS_BACKEND '{}' (expected polly, openai or espeak)",
                other
            )),
        }
    }
}

impl std::fmt::Display for TtsBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let max_upload_mb: usize = env::var("MAX_UPLOAD_MB")
            .unwrap_or_else(|_| "50".to_string())
            .parse()?;

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            log_format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads".to_string())
                .into(),
            audio_dir: env::var("AUDIO_DIR")
                .unwrap_or_else(|_| "static/audio".to_string())
                .into(),
            audio_url_prefix: env::var("AUDIO_URL_PREFIX")
                .unwrap_or_else(|_| "/static/audio".to_string())
                .trim_end_matches('/')
                .to_string(),
            desktop_app_path: env::var("DESKTOP_APP_PATH")
                .unwrap_or_else(|_| "download/app.exe".to_string())
                .into(),
            max_upload_bytes: megabytes_to_bytes(max_upload_mb)?,
            tts_backend: env::var("TTS_BACKEND")
                .unwrap_or_else(|_| "espeak".to_string())
                .parse()?,
            tts_male_voice: optional_var("TTS_MALE_VOICE"),
            tts_female_voice: optional_var("TTS_FEMALE_VOICE"),
            synthesis_timeout_secs: env::var("SYNTHESIS_TIMEOUT_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()?,
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "eu-west-1".to_string()),
            openai_api_key: optional_var("OPENAI_API_KEY"),
            openai_tts_model: env::var("OPENAI_TTS_MODEL").unwrap_or_else(|_| "tts-1".to_string()),
            espeak_path: env::var("ESPEAK_PATH").unwrap_or_else(|_| "espeak-ng".to_string()),
        };

        config.validate()?;

        Ok(config)
    }

    /// Cross-field checks that cannot be expressed per variable
    pub fn validate(&self) -> Result<(), String> {
        if self.tts_backend == TtsBackend::OpenAi && self.openai_api_key.is_none() {
            return Err("OPENAI_API_KEY is required when TTS_BACKEND=openai".to_string());
        }
        if self.synthesis_timeout_secs == 0 {
            return Err("SYNTHESIS_TIMEOUT_SECS must be greater than zero".to_string());
        }
        if self.max_upload_bytes == 0 {
            return Err("MAX_UPLOAD_MB must be greater than zero".to_string());
        }
        if !self.audio_url_prefix.starts_with('/') || self.audio_url_prefix.len() < 2 {
            return Err("AUDIO_URL_PREFIX must be a path such as /static/audio".to_string());
        }
        Ok(())
    }
}

fn megabytes_to_bytes(megabytes: usize) -> Result<usize, String> {
    megabytes
        .checked_mul(1024 * 1024)
        .ok_or_else(|| format!("MAX_UPLOAD_MB is too large: {}", megabytes))
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
