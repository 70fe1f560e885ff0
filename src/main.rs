use std::env;
use std::path::PathBuf;

use restyle::{
    ingest_paths, run_generation, Config, HttpDesignService, PreferenceStore, SessionState,
    StoreConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    restyle::logger::init_with_config(restyle::logger::LoggerConfig::development())?;

    let photos: Vec<PathBuf> = env::args().skip(1).map(PathBuf::from).collect();
    if photos.is_empty() {
        log::error!("❌ Usage: restyle <photo> [photo ...]");
        return Ok(());
    }

    log::info!("🔍 Checking service environment...");
    if env::var("RESTYLE_API_URL").is_err() {
        log::warn!("⚠️  RESTYLE_API_URL not set, the service client will fail to build");
    }
    if env::var("RESTYLE_API_KEY").is_err() {
        log::warn!("⚠️  RESTYLE_API_KEY not set, the service client will fail to build");
    }

    let config = Config::from_env();

    log::info!("🔄 Creating design service client...");
    let service = match HttpDesignService::new(config.service.unwrap_or_default()) {
        Ok(service) => {
            log::info!("✅ Design service client ready");
            service
        }
        Err(e) => {
            log::error!("❌ Failed to build service client: {}", e);
            return Err(e.into());
        }
    };

    let store_config = config.store.unwrap_or_else(StoreConfig::in_memory);
    let prefs_store = match PreferenceStore::new(store_config) {
        Ok(store) => store,
        Err(_) => {
            log::warn!("⚠️  No preference path configured, using in-memory store");
            PreferenceStore::new(StoreConfig::in_memory())?
        }
    };

    let mut session = SessionState::new();
    session.style = Some(env::var("RESTYLE_STYLE").unwrap_or_else(|_| "Scandinavian".to_string()));
    session.palette = env::var("RESTYLE_PALETTE").ok();
    session.atmosphere = env::var("RESTYLE_ATMOSPHERE").ok();

    if let Some(saved) = prefs_store.load().await? {
        log::info!("📖 Applying saved preferences");
        session.apply_preferences(&saved);
    }

    log::info!("📥 Ingesting {} photo(s)...", photos.len());
    let accepted = ingest_paths(&mut session, &photos).await?;
    if accepted == 0 {
        log::error!("❌ None of the given files look like images");
        return Ok(());
    }

    log::info!("🎨 Generating designs...");
    match run_generation(&mut session, &service).await {
        Ok(()) => {
            let done = session.generated.iter().flatten().count();
            log::info!("✅ Generated {} design(s)", done);
            if let Some(explanation) = &session.explanation {
                log::info!("📝 {}", explanation);
            }
        }
        Err(e) => {
            log::error!("❌ Generation failed: {}", e);
            if let Some(banner) = &session.banner {
                log::info!("🪧 Banner shown to the user: {}", banner);
            }
            return Ok(());
        }
    }

    prefs_store.save(&session.current_preferences()).await?;
    log::info!("🎉 Session complete");

    Ok(())
}
