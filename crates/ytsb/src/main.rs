use std::{path::Path, sync::Arc};

use ytsb_core::{config::Config, search::SearchProvider};
use ytsb_youtube::YoutubeClient;

#[tokio::main]
async fn main() -> Result<(), ytsb_core::Error> {
    // Logging comes up before the full config load so a missing token is
    // logged to the file too.
    ytsb_core::config::load_dotenv(Path::new(".env"));
    ytsb_core::logging::init("ytsb", &ytsb_core::config::log_file_from_env())?;

    let cfg = match Config::load() {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            tracing::error!(error = %e, "startup aborted");
            return Err(e);
        }
    };

    let provider: Arc<dyn SearchProvider> = Arc::new(YoutubeClient::new(cfg.search_timeout)?);

    tracing::info!("starting telegram bot");
    ytsb_telegram::router::run_polling(cfg, provider)
        .await
        .map_err(|e| ytsb_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
