use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pdf_narrator::controllers::{
    audio::AudioController, conversion::ConversionController, desktop_app::DesktopAppController,
    health::Readiness,
};
use pdf_narrator::domain::conversion::ConversionService;
use pdf_narrator::domain::tts::{TtsService, VoicePreferences};
use pdf_narrator::infrastructure::config::{Config, LogFormat, TtsBackend};
use pdf_narrator::infrastructure::http::{start_http_server, AppControllers};
use pdf_narrator::infrastructure::pdf::LopdfTextExtractor;
use pdf_narrator::infrastructure::repositories::{
    EspeakTtsRepository, OpenAiTtsRepository, PollyTtsRepository, TtsRepository,
};
use pdf_narrator::infrastructure::storage::{AudioStore, UploadStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting PDF Narrator on {}:{}",
        config.host,
        config.port
    );

    // Storage directories are created on first open
    let upload_store = Arc::new(UploadStore::open(config.upload_dir.clone()).await?);
    let audio_store = Arc::new(AudioStore::open(config.audio_dir.clone()).await?);
    tracing::info!(
        upload_dir = %config.upload_dir.display(),
        audio_dir = %config.audio_dir.display(),
        "Storage directories ready"
    );

    let tts_repo = create_tts_repository(&config).await?;
    tracing::info!(provider = tts_repo.provider(), "Speech synthesis backend initialized");

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Services
    let tts_service = Arc::new(TtsService::new(
        tts_repo.clone(),
        audio_store.clone(),
        VoicePreferences {
            male: config.tts_male_voice.clone(),
            female: config.tts_female_voice.clone(),
        },
        Duration::from_secs(config.synthesis_timeout_secs),
    ));
    let conversion_service = Arc::new(ConversionService::new(
        upload_store.clone(),
        audio_store.clone(),
        Arc::new(LopdfTextExtractor::new()),
        tts_service,
        config.audio_url_prefix.clone(),
    ));

    // 2. Controllers
    let controllers = AppControllers {
        conversion: Arc::new(ConversionController::new(
            conversion_service.clone(),
            audio_store.clone(),
        )),
        audio: Arc::new(AudioController::new(audio_store.clone(), conversion_service)),
        desktop_app: Arc::new(DesktopAppController::new(config.desktop_app_path.clone())),
        readiness: Arc::new(Readiness {
            upload_dir: upload_store.dir().to_path_buf(),
            audio_dir: audio_store.dir().to_path_buf(),
            tts_provider: tts_repo.provider(),
        }),
    };

    // Start HTTP server with all routes
    start_http_server(config, controllers).await?;

    Ok(())
}

async fn create_tts_repository(
    config: &Config,
) -> Result<Arc<dyn TtsRepository>, Box<dyn std::error::Error>> {
    let repo: Arc<dyn TtsRepository> = match config.tts_backend {
        TtsBackend::Polly => {
            tracing::info!("Initializing AWS Polly client with region: {}", config.aws_region);

            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;
            tracing::info!(region = ?aws_config.region(), "AWS configuration loaded");

            let polly_client = aws_sdk_polly::Client::new(&aws_config);
            Arc::new(PollyTtsRepository::new(Arc::new(polly_client)))
        }
        TtsBackend::OpenAi => {
            let api_key = config
                .openai_api_key
                .clone()
                .ok_or("OPENAI_API_KEY is required when TTS_BACKEND=openai")?;
            let client = async_openai::Client::with_config(
                async_openai::config::OpenAIConfig::new().with_api_key(api_key),
            );
            Arc::new(OpenAiTtsRepository::new(
                Arc::new(client),
                config.openai_tts_model.clone(),
            ))
        }
        TtsBackend::Espeak => Arc::new(EspeakTtsRepository::new(config.espeak_path.clone())),
    };

    Ok(repo)
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pdf_narrator=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
